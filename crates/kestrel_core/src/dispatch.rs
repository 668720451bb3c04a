//! UI-thread task queue
//!
//! Work that must not run inside the call that triggered it (for example a
//! control re-rendering while a property write is still in progress) is posted
//! here and executed on the next turn of the UI event loop.
//!
//! The queue is thread-local: every UI thread owns its own queue and tasks
//! never cross threads. The host event loop calls [`run_turn`] once per
//! iteration; tests call [`run_until_idle`].
//!
//! Tasks posted while a turn is running are deferred to the following turn.

use std::cell::RefCell;
use std::collections::VecDeque;

/// Upper bound on turns executed by [`run_until_idle`]
pub const MAX_IDLE_TURNS: usize = 1024;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct MainQueue {
    tasks: VecDeque<Task>,
}

thread_local! {
    static MAIN_QUEUE: RefCell<MainQueue> = RefCell::new(MainQueue::default());
}

/// Post a task to run on the next turn of this thread's queue
pub fn dispatch_async<F>(task: F)
where
    F: FnOnce() + 'static,
{
    // The queue is gone during thread teardown; nothing could run the task anyway.
    let _ = MAIN_QUEUE.try_with(|queue| queue.borrow_mut().tasks.push_back(Box::new(task)));
}

/// Number of tasks waiting for the next turn
pub fn pending() -> usize {
    MAIN_QUEUE
        .try_with(|queue| queue.borrow().tasks.len())
        .unwrap_or(0)
}

/// Run one turn: every task queued before this call, in posting order.
///
/// Returns the number of tasks executed.
pub fn run_turn() -> usize {
    let batch = MAIN_QUEUE
        .try_with(|queue| std::mem::take(&mut queue.borrow_mut().tasks))
        .unwrap_or_default();

    let count = batch.len();
    if count > 0 {
        tracing::trace!("dispatch turn running {} task(s)", count);
    }
    for task in batch {
        task();
    }
    count
}

/// Run turns until the queue is empty, returning the total number of tasks executed.
///
/// Stops after [`MAX_IDLE_TURNS`] turns if tasks keep re-posting themselves.
pub fn run_until_idle() -> usize {
    let mut total = 0;
    for _ in 0..MAX_IDLE_TURNS {
        if pending() == 0 {
            return total;
        }
        total += run_turn();
    }
    tracing::warn!(
        "dispatch queue still busy after {} turns ({} task(s) pending)",
        MAX_IDLE_TURNS,
        pending()
    );
    total
}
