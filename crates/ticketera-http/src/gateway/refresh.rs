//! Single-flight coordination of token refreshes.
//!
//! At most one caller redeems the refresh token at a time. Callers that hit
//! a 401 while a refresh is running park a oneshot handle in a queue and are
//! released, in the order they arrived, once the refresh settles.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;
use tracing::trace;

use ticketera_core::AccessToken;

/// How a refresh cycle ended, as seen by queued callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefreshOutcome {
    /// A new access token is available.
    Refreshed(AccessToken),
    /// The session could not be renewed.
    Failed,
}

#[derive(Debug, Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Shared refresh flag and waiter queue for one gateway.
#[derive(Debug, Default)]
pub(crate) struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

/// What a caller should do after [`RefreshCoordinator::join`].
pub(crate) enum RefreshTicket<'a> {
    /// This caller runs the refresh and must settle the lease.
    Leader(RefreshLease<'a>),
    /// Another caller is refreshing; wait for its outcome.
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshCoordinator {
    /// Either take the refresh lease or queue behind the current holder.
    pub(crate) fn join(&self) -> RefreshTicket<'_> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            trace!(queued = state.waiters.len(), "Queued behind in-flight refresh");
            RefreshTicket::Waiter(rx)
        } else {
            state.in_flight = true;
            RefreshTicket::Leader(RefreshLease {
                coordinator: self,
                settled: false,
            })
        }
    }

    /// Returns true while a refresh is running.
    #[cfg(test)]
    fn is_in_flight(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight
    }

    fn settle(&self, outcome: RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };

        let released = waiters.len();
        for waiter in waiters {
            // A waiter whose caller went away has nothing to resume.
            let _ = waiter.send(outcome.clone());
        }
        released
    }
}

/// Exclusive right to run the current refresh.
///
/// Dropping an unsettled lease (the leading call was cancelled) releases
/// every waiter with [`RefreshOutcome::Failed`] so nobody waits forever.
pub(crate) struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Release waiters with the new access token. Returns how many were queued.
    pub(crate) fn succeed(mut self, token: AccessToken) -> usize {
        self.settled = true;
        self.coordinator.settle(RefreshOutcome::Refreshed(token))
    }

    /// Release waiters with a failure. Returns how many were queued.
    pub(crate) fn fail(mut self) -> usize {
        self.settled = true;
        self.coordinator.settle(RefreshOutcome::Failed)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.settle(RefreshOutcome::Failed);
        }
    }
}
