//! Caller side of a connect operation
//!
//! [`Connecting`] is the future handed back by a connect call. It resolves
//! exactly once with the operation's result and can cancel the operation
//! while it runs. Dropping it cancels too.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{oneshot, watch};

use crate::error::{ConnectError, Result};

/// Cancels the operation it was taken from.
///
/// Cloneable and usable from any thread. Cancelling a settled operation, or
/// cancelling twice, does nothing.
#[derive(Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(crate) fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            tracing::trace!("connect operation cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// In-progress hostname connect operation.
///
/// Resolves to the winning connection, to the terminal error once every
/// candidate failed, or to [`ConnectError::Cancelled`].
#[must_use = "dropping Connecting cancels the operation"]
pub struct Connecting<T> {
    result: ResultSlot<T>,
    cancel: CancelHandle,
}

enum ResultSlot<T> {
    Pending(oneshot::Receiver<Result<T>>),
    Ready(Option<Result<T>>),
}

impl<T> Connecting<T> {
    pub(crate) fn new(result: oneshot::Receiver<Result<T>>, cancel: CancelHandle) -> Self {
        Self {
            result: ResultSlot::Pending(result),
            cancel,
        }
    }

    /// Operation that settled before it started, e.g. on invalid input.
    pub(crate) fn ready(result: Result<T>) -> Self {
        let (cancel, _rx) = CancelHandle::new();
        Self {
            result: ResultSlot::Ready(Some(result)),
            cancel,
        }
    }

    /// Cancel the operation. Idempotent; a no-op once it has settled.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Handle for cancelling the operation from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<T> Future for Connecting<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.result {
            ResultSlot::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                // The operation task went away without reporting, e.g. the
                // runtime shut down underneath it.
                Poll::Ready(Err(_)) => Poll::Ready(Err(ConnectError::Terminated)),
                Poll::Pending => Poll::Pending,
            },
            ResultSlot::Ready(result) => {
                Poll::Ready(result.take().unwrap_or(Err(ConnectError::Terminated)))
            }
        }
    }
}

impl<T> Unpin for Connecting<T> {}

impl<T> Drop for Connecting<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<T> fmt::Debug for Connecting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connecting")
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}
