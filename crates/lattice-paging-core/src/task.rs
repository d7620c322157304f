//! Deferred task queue modelling turns of the UI event loop.
//!
//! Work that must not run inside the current callback (for example a data
//! load finishing "later") is posted here and executed when the owner
//! processes the queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// Manages the deferred task queue.
pub struct TaskQueue {
    tasks: VecDeque<TaskData>,
    /// Maximum number of tasks to process per turn.
    batch_size: usize,
}

impl TaskQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self::with_batch_size(10)
    }

    /// Create a new task queue with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            tasks: VecDeque::new(),
            batch_size,
        }
    }

    /// Post a task to be executed on a later turn.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.push_back(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            crate::paging_debug!(task = id.as_u64(), "cancelled task");
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Process up to `batch_size` tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_batch(&mut self) -> usize {
        let count = self.tasks.len().min(self.batch_size);
        for _ in 0..count {
            if let Some(task_data) = self.tasks.pop_front() {
                (task_data.task)();
            }
        }
        count
    }

    /// Process all pending tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&mut self) -> usize {
        let mut count = 0;
        while let Some(task_data) = self.tasks.pop_front() {
            (task_data.task)();
            count += 1;
        }
        count
    }

    /// Set the batch size for each turn.
    pub fn set_batch_size(&mut self, size: usize) {
        self.batch_size = size;
    }

    fn pop_front(&mut self) -> Option<BoxedTask> {
        self.tasks.pop_front().map(|t| t.task)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A shareable task queue.
///
/// Unlike [`TaskQueue`], tasks run with the internal lock released, so a
/// running task may post follow-up work. Follow-ups posted during a turn run
/// on the next turn, not the current one.
pub struct SharedTaskQueue {
    inner: Mutex<TaskQueue>,
}

impl SharedTaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskQueue::new()),
        }
    }

    /// Post a task to run on a later turn.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(task)
    }

    /// Cancel a pending task.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.inner.lock().cancel(id)
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    /// Run one turn: the tasks pending right now, up to the batch size.
    ///
    /// Returns the number of tasks processed.
    pub fn process_turn(&self) -> usize {
        let count = {
            let queue = self.inner.lock();
            queue.pending_count().min(queue.batch_size)
        };
        let mut processed = 0;
        for _ in 0..count {
            let task = self.inner.lock().pop_front();
            match task {
                Some(task) => {
                    task();
                    processed += 1;
                }
                None => break,
            }
        }
        crate::paging_trace!(processed, "processed turn");
        processed
    }

    /// Run turns until the queue is empty.
    ///
    /// Returns the total number of tasks processed.
    pub fn process_all(&self) -> usize {
        let mut total = 0;
        while self.has_pending() {
            total += self.process_turn();
        }
        total
    }

    /// Set the batch size for each turn.
    pub fn set_batch_size(&self, size: usize) {
        self.inner.lock().set_batch_size(size.max(1));
    }
}

impl Default for SharedTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedTaskQueue: Send, Sync);
