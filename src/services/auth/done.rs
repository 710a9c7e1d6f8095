//! Completion callback handed to collaborators, and the future that waits on it.
//!
//! A collaborator receives a [`Done`] and reports through it exactly like a
//! `(error, ...results)` callback. The matching [`Pending`] settles on the
//! first report; every later report is ignored.
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::ContextError;
use crate::services::auth::authenticator::Verified;

type Slot<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

/// Build a connected callback/future pair.
pub fn deferred<T, E>() -> (Done<T, E>, Pending<T, E>) {
    let (tx, rx) = oneshot::channel();
    let done = Done {
        slot: Arc::new(Mutex::new(Some(tx))),
    };
    (done, Pending { rx })
}

/// Single-fire completion callback.
///
/// Clones share the same slot, so a collaborator may keep several copies
/// around; only the first `call` across all of them counts.
pub struct Done<T, E> {
    slot: Slot<T, E>,
}

impl<T, E> Clone for Done<T, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T, E> fmt::Debug for Done<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T, E> Done<T, E> {
    /// Report the outcome.
    ///
    /// Returns `false` when an earlier invocation already took the slot.
    pub fn call(&self, result: Result<T, E>) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                // 受信側が既に drop されていても「最初の呼び出し」であることに変わりはない
                let _ = tx.send(result);
                true
            }
            None => false,
        }
    }

    pub fn fail(&self, error: E) -> bool {
        self.call(Err(error))
    }

    pub fn is_settled(&self) -> bool {
        match self.slot.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

impl<E> Done<(), E> {
    pub fn ok(&self) -> bool {
        self.call(Ok(()))
    }
}

impl<U, I, E> Done<Verified<U, I>, E> {
    /// `done(null, user, info)`
    pub fn verified(&self, user: Option<U>, info: Option<I>) -> bool {
        self.call(Ok(Verified { user, info }))
    }
}

/// Receiving half of [`deferred`].
pub struct Pending<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> fmt::Debug for Pending<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending").finish_non_exhaustive()
    }
}

impl<T, E> Pending<T, E> {
    /// Wait for the first invocation of the paired [`Done`].
    ///
    /// - `Failed(e)`: the callback reported `e`
    /// - `Abandoned`: every `Done` clone was dropped without a call
    /// - `TimedOut`: `timeout` elapsed first
    pub async fn settle(self, timeout: Option<Duration>) -> Result<T, ContextError<E>> {
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.rx)
                .await
                .map_err(|_| ContextError::TimedOut(limit))?,
            None => self.rx.await,
        };

        match received {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ContextError::Failed(e)),
            Err(_) => Err(ContextError::Abandoned),
        }
    }
}
