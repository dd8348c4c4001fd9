#![forbid(unsafe_code)]

//! Cancellable "next frame" task queue.
//!
//! Widgets defer work to the next paint to coalesce bursts of triggers
//! (typing, resize drags) into a single pass. Instead of registering host
//! callbacks that could outlive the widget, a widget owns a [`FrameQueue`]:
//! it schedules tasks, keeps the returned [`FrameToken`] to cancel them, and
//! the host drives the queue by calling the widget once per animation frame.
//!
//! # Invariants
//!
//! - A task runs at most once, on the first frame after it was scheduled.
//! - Tasks scheduled while a frame is being processed run on the next frame.
//! - A cancelled task never runs.
//!
//! ```
//! use tarea_core::frame::FrameQueue;
//!
//! let mut queue = FrameQueue::new();
//! let a = queue.schedule("measure");
//! let _b = queue.schedule("settle");
//! assert!(queue.cancel(a).is_some());
//!
//! let due: Vec<_> = queue.take_frame().into_iter().map(|(_, task)| task).collect();
//! assert_eq!(due, vec!["settle"]);
//! assert!(queue.is_empty());
//! ```

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Raw id, for logging.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Single-threaded queue of tasks deferred to the next frame.
#[derive(Debug, Clone)]
pub struct FrameQueue<T> {
    pending: Vec<(FrameToken, T)>,
    next_id: u64,
    frames: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
            frames: 0,
        }
    }

    /// Defer `task` to the next frame.
    pub fn schedule(&mut self, task: T) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push((token, task));
        token
    }

    /// Cancel a pending task, returning it if it had not run yet.
    pub fn cancel(&mut self, token: FrameToken) -> Option<T> {
        let idx = self.pending.iter().position(|(t, _)| *t == token)?;
        Some(self.pending.remove(idx).1)
    }

    /// Whether `token` is still waiting for a frame.
    #[must_use]
    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.iter().any(|(t, _)| *t == token)
    }

    /// Advance one frame and hand back every task that is now due, in
    /// scheduling order.
    pub fn take_frame(&mut self) -> Vec<(FrameToken, T)> {
        self.frames = self.frames.wrapping_add(1);
        std::mem::take(&mut self.pending)
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Frames processed so far.
    #[must_use]
    pub fn frames_elapsed(&self) -> u64 {
        self.frames
    }
}
