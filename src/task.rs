//! Task polling utilities
//!
//! The UI thread never awaits. Fetches run as tokio tasks, and the UI checks
//! them once per frame, collecting whatever has finished.

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, JoinError>),
}

/// Poll an optional task handle and return its result if finished.
///
/// Takes the handle out of the option once the task has completed.
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = task else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        return PollResult::Pending;
    }

    let Some(handle) = task.take() else {
        return PollResult::NoTask;
    };
    match handle.now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            // Shouldn't happen since we checked is_finished()
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

/// A set of running tasks, each tagged with a key.
///
/// Tasks are never cancelled; every task that is spawned is eventually drained.
pub struct TaskSet<K, T> {
    tasks: Vec<(K, Option<JoinHandle<T>>)>,
}

impl<K, T> Default for TaskSet<K, T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K, T> TaskSet<K, T> {
    pub fn push(&mut self, key: K, handle: JoinHandle<T>) {
        self.tasks.push((key, Some(handle)));
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return every finished task, in the order they were pushed.
    ///
    /// Tasks that finish between two calls come back in push order, not in the
    /// order they completed. Completion order is only observable per call.
    pub fn drain_finished(&mut self) -> Vec<(K, Result<T, JoinError>)> {
        let mut finished = Vec::new();
        let mut still_running = Vec::with_capacity(self.tasks.len());

        for (key, mut task) in self.tasks.drain(..) {
            match poll_task(&mut task) {
                PollResult::Complete(result) => finished.push((key, result)),
                PollResult::Pending => still_running.push((key, task)),
                PollResult::NoTask => {}
            }
        }

        self.tasks = still_running;
        finished
    }
}
