//! Async result handling
//!
//! Every awaitable operation runs on the tokio runtime and reports back through a oneshot
//! channel; these futures are the receiving end.

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

fn task_failed() -> JwtError {
    tracing::error!("JWT task ended without sending a result");
    JwtError::TaskFailed
}

/// Async JWT result for direct operations
#[must_use = "futures do nothing unless awaited"]
pub struct AsyncJwtResult<T> {
    receiver: oneshot::Receiver<JwtResult<T>>,
}

impl<T> AsyncJwtResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<JwtResult<T>>) -> Self {
        Self { receiver }
    }

    /// Run `operation` on the blocking pool and resolve with its result
    pub(crate) fn spawn_blocking<F>(operation: F) -> Self
    where
        F: FnOnce() -> JwtResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(operation());
        });
        Self::new(rx)
    }

    /// Transform the error of a failed operation
    pub fn on_error<E>(self, handler: E) -> AsyncJwtResultWithError<T, E>
    where
        E: Fn(JwtError) -> JwtError + Send + Sync + 'static + Unpin,
    {
        AsyncJwtResultWithError::new(self.receiver, handler)
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(task_failed())),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Async JWT result with error handler
#[must_use = "futures do nothing unless awaited"]
pub struct AsyncJwtResultWithError<T, E> {
    receiver: oneshot::Receiver<JwtResult<T>>,
    error_handler: E,
}

impl<T, E> AsyncJwtResultWithError<T, E> {
    pub(crate) fn new(receiver: oneshot::Receiver<JwtResult<T>>, error_handler: E) -> Self {
        Self {
            receiver,
            error_handler,
        }
    }
}

impl<T, E> Future for AsyncJwtResultWithError<T, E>
where
    E: Fn(JwtError) -> JwtError + Send + Sync + 'static + Unpin,
{
    type Output = JwtResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result.map_err(&this.error_handler)),
            Poll::Ready(Err(_)) => Poll::Ready(Err((this.error_handler)(task_failed()))),
            Poll::Pending => Poll::Pending,
        }
    }
}
