//! Call context: cancellation + optional deadline
//!
//! Every execution method takes a [`Context`]. The context races the
//! in-flight call against its cancellation token and deadline, so a
//! cancelled or expired call is dropped at the next await point and
//! reported as [`ClientError::Cancelled`] / [`ClientError::DeadlineExceeded`].

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Never cancelled, no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Cancelled when `token` is
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Child context that expires after `timeout`, or at the parent's
    /// deadline if that comes first.
    ///
    /// The returned guard owns the child's token: dropping it cancels the
    /// child and detaches it from the parent. Keep it alive for the scope of
    /// the call.
    ///
    /// A timeout past the end of the clock's range adds no deadline of its
    /// own; the parent's still applies.
    pub fn with_timeout(&self, timeout: Duration) -> (Context, DropGuard) {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.derive(self.deadline),
        }
    }

    pub fn with_deadline(&self, deadline: Instant) -> (Context, DropGuard) {
        let deadline = match self.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        self.derive(Some(deadline))
    }

    fn derive(&self, deadline: Option<Instant>) -> (Context, DropGuard) {
        let child = self.token.child_token();
        let ctx = Context {
            token: child.clone(),
            deadline,
        };
        (ctx, child.drop_guard())
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Error describing why this context is no longer usable, if it isn't
    pub fn err(&self) -> Option<ClientError> {
        if self.token.is_cancelled() {
            return Some(ClientError::Cancelled);
        }
        match self.deadline {
            Some(d) if d <= Instant::now() => Some(ClientError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drive `call` until it completes, the context is cancelled, or the
    /// deadline passes, whichever happens first.
    pub async fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ClientError::Cancelled),
            _ = expired => Err(ClientError::DeadlineExceeded),
            result = call => result,
        }
    }
}
