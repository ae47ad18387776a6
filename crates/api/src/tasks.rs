//! Background executor for async mutations
//!
//! Adapters whose backend has no native async form run their synchronous
//! mutation on this executor and hand the caller a [`Completion`]. A
//! small fixed pool of named workers drains an unbounded FIFO channel;
//! tasks are executed in dispatch order.
//!
//! FIFO order also makes continuation chaining safe: a task that waits
//! on a completion enqueued *before* it can never starve the pool,
//! because its target was dequeued first.

use std::sync::{Arc, LazyLock};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex};

use crate::error::ProviderError;

type Job = Box<dyn FnOnce() + Send + 'static>;

const WORKER_COUNT: usize = 2;

struct Executor {
    sender: Sender<Job>,
}

static EXECUTOR: LazyLock<Executor> = LazyLock::new(|| {
    let (sender, receiver) = unbounded::<Job>();
    for n in 0..WORKER_COUNT {
        let rx: Receiver<Job> = receiver.clone();
        std::thread::Builder::new()
            .name(format!("permbridge-worker-{n}"))
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    job();
                }
            })
            .expect("failed to spawn permission worker");
    }
    Executor { sender }
});

#[derive(Default)]
struct State {
    result: Mutex<Option<Result<(), ProviderError>>>,
    done: Condvar,
}

/// Handle to an in-flight async operation.
///
/// Resolves exactly once, with `Ok(())` on success or the backend's
/// failure. Cloneable; every clone observes the same outcome.
#[derive(Clone)]
pub struct Completion {
    state: Arc<State>,
}

impl Completion {
    fn pending() -> (Completion, CompletionHandle) {
        let state = Arc::new(State::default());
        (
            Completion {
                state: Arc::clone(&state),
            },
            CompletionHandle {
                state,
                resolved: false,
            },
        )
    }

    /// An already-successful completion, for operations that resolve
    /// immediately
    pub fn completed() -> Completion {
        Self::resolved(Ok(()))
    }

    /// An already-failed completion
    pub fn failed(err: ProviderError) -> Completion {
        Self::resolved(Err(err))
    }

    fn resolved(result: Result<(), ProviderError>) -> Completion {
        let (completion, handle) = Self::pending();
        handle.resolve(result);
        completion
    }

    /// Block until the operation resolves and return its outcome
    pub fn wait(&self) -> Result<(), ProviderError> {
        let mut guard = self.state.result.lock();
        loop {
            if let Some(result) = guard.as_ref() {
                return result.clone();
            }
            self.state.done.wait(&mut guard);
        }
    }

    /// The outcome, if the operation has already resolved
    pub fn try_wait(&self) -> Option<Result<(), ProviderError>> {
        self.state.result.lock().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state.result.lock().is_some()
    }
}

/// Fulfilling side of a [`Completion`].
///
/// Dropping an unresolved handle resolves the completion with
/// [`ProviderError::WorkerGone`], so waiters never hang on a task that
/// was dropped without running.
struct CompletionHandle {
    state: Arc<State>,
    resolved: bool,
}

impl CompletionHandle {
    fn resolve(mut self, result: Result<(), ProviderError>) {
        self.set(result);
    }

    fn set(&mut self, result: Result<(), ProviderError>) {
        if self.resolved {
            return;
        }
        *self.state.result.lock() = Some(result);
        self.state.done.notify_all();
        self.resolved = true;
    }
}

impl Drop for CompletionHandle {
    fn drop(&mut self) {
        self.set(Err(ProviderError::WorkerGone));
    }
}

/// Run `f` on the background executor.
///
/// Returns immediately; the completion resolves with `f`'s outcome once
/// a worker has run it.
pub fn dispatch<F>(f: F) -> Completion
where
    F: FnOnce() -> Result<(), ProviderError> + Send + 'static,
{
    let (completion, handle) = Completion::pending();
    let job: Job = Box::new(move || handle.resolve(f()));
    if EXECUTOR.sender.send(job).is_err() {
        // The returned job is dropped here, which resolves the
        // completion as WorkerGone.
        tracing::error!("permission task queue disconnected");
    }
    completion
}

#[cfg(test)]
mod tests {
    use super::*;
    use permbridge_sdk::BackendError;

    #[test]
    fn test_dispatch_resolves_ok() {
        let completion = dispatch(|| Ok(()));
        assert!(completion.wait().is_ok());
        assert!(completion.is_finished());
    }

    #[test]
    fn test_dispatch_surfaces_failure() {
        let completion = dispatch(|| Err(BackendError::new("store offline").into()));
        match completion.wait() {
            Err(ProviderError::Backend(e)) => assert_eq!(e.message, "store offline"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_completed_short_circuit() {
        let completion = Completion::completed();
        assert!(matches!(completion.try_wait(), Some(Ok(()))));
    }

    #[test]
    fn test_clones_observe_same_outcome() {
        let completion = dispatch(|| Ok(()));
        let clone = completion.clone();
        assert!(completion.wait().is_ok());
        assert!(clone.wait().is_ok());
    }

    #[test]
    fn test_dropped_job_resolves_worker_gone() {
        let (completion, handle) = Completion::pending();
        drop(handle);
        assert!(matches!(completion.wait(), Err(ProviderError::WorkerGone)));
    }
}
