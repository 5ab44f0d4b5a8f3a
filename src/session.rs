use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::results::ResultSet;

/// The connection to the service, supplied by the surrounding application.
///
/// Implementations send one statement per call. Service-side failures should be reported as
/// [`Error::Service`](crate::error::Error::Service) with the service's error code when
/// known, and connection failures as [`Error::Transport`](crate::error::Error::Transport);
/// the client classifies them further.
#[async_trait]
pub trait Session: Send + Sync {
    /// Execute a statement that returns no rows of interest (DDL, USE, ALTER SESSION).
    async fn exec(&self, sql: &str) -> Result<()>;

    /// Execute a statement and return its tabular result.
    async fn query(&self, sql: &str) -> Result<ResultSet>;
}

#[async_trait]
impl<S: Session + ?Sized> Session for std::sync::Arc<S> {
    async fn exec(&self, sql: &str) -> Result<()> {
        (**self).exec(sql).await
    }

    async fn query(&self, sql: &str) -> Result<ResultSet> {
        (**self).query(sql).await
    }
}

/// Per-call context: cancellation and an optional timeout.
///
/// Cancelling a context whose statement is already in flight does not roll anything back;
/// the call reports [`Error::UnknownOutcome`](crate::error::Error::UnknownOutcome).
/// ```rust
/// use std::time::Duration;
/// use warehouse_client::session::Context;
///
/// let ctx = Context::background().with_timeout(Duration::from_secs(30));
/// let child = ctx.child();
/// ctx.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl Context {
    /// A context that is never cancelled and has no timeout.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Use an existing token, e.g. one shared with a shutdown handler.
    #[must_use]
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// A context cancelled whenever this one is, with the same timeout.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            timeout: self.timeout,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }
}
