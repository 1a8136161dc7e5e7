//! Cancellable delayed work.
//!
//! DESIGN
//! ======
//! Delayed navigation, alert dismissal and badge polling are all
//! `spawn_local`ed futures wrapped in `futures::future::abortable`. The
//! returned handle cancels the work; dropping it does not, so a scheduled
//! redirect still fires when the caller ignores the handle.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::future::Future;

use futures::future::{AbortHandle, abortable};

#[derive(Clone, Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    /// Wrap `work` without running it. The caller drives the returned future;
    /// it completes early, skipping the rest of `work`, once cancelled.
    pub fn new<F>(work: F) -> (Self, impl Future<Output = ()>)
    where
        F: Future<Output = ()>,
    {
        let (work, handle) = abortable(work);
        let run = async move {
            let _ = work.await;
        };
        (Self { handle }, run)
    }

    /// Run `work` on the browser's microtask queue.
    #[cfg(feature = "hydrate")]
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = ()> + 'static,
    {
        let (task, run) = Self::new(work);
        wasm_bindgen_futures::spawn_local(run);
        task
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}
