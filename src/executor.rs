use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::ddl::OperationKind;
use crate::error::{Error, Result};
use crate::results::ResultSet;
use crate::session::{Context, Session};

/// Sends one statement per call through the session and classifies whatever comes back.
///
/// There is no retry: a create/alter/drop repeated after an ambiguous failure could apply
/// twice, so that decision stays with the caller.
#[derive(Clone)]
pub struct CommandExecutor {
    session: Arc<dyn Session>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CommandExecutor {
    pub(crate) fn new(session: Arc<dyn Session>, config: Arc<ClientConfig>) -> Self {
        Self { session, config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a statement that returns nothing of interest.
    ///
    /// # Errors
    /// Returns `Error::Cancelled` if `ctx` was already cancelled, `Error::UnknownOutcome` if it
    /// was cancelled or timed out mid-flight, and the classified session error otherwise.
    pub async fn exec(&self, ctx: &Context, kind: OperationKind, sql: &str) -> Result<()> {
        self.run(ctx, kind, sql, self.session.exec(sql)).await
    }

    /// Execute a statement and return its rows.
    ///
    /// # Errors
    /// Same as [`CommandExecutor::exec`].
    pub async fn query(&self, ctx: &Context, kind: OperationKind, sql: &str) -> Result<ResultSet> {
        self.run(ctx, kind, sql, self.session.query(sql)).await
    }

    async fn run<T, F>(&self, ctx: &Context, kind: OperationKind, sql: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if ctx.is_cancelled() {
            debug!(%kind, "context cancelled, statement not sent");
            return Err(Error::Cancelled);
        }

        if self.config.log_statements {
            debug!(%kind, sql, "sending statement");
        } else {
            debug!(%kind, "sending statement");
        }

        // Statement text only leaves the executor when the config allows it.
        let shown = if self.config.log_statements {
            format!(": {sql}")
        } else {
            String::new()
        };

        let limit = ctx.timeout().or_else(|| self.config.statement_timeout());
        let bounded = async {
            match limit {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    Err(Error::UnknownOutcome(format!(
                        "{kind} timed out after {limit:?}{shown}"
                    )))
                }),
                None => call.await,
            }
        };

        let outcome = tokio::select! {
            biased;
            () = ctx.cancelled() => Err(Error::UnknownOutcome(format!("{kind} cancelled{shown}"))),
            result = bounded => result,
        };

        match outcome {
            Ok(value) => Ok(value),
            Err(err @ Error::UnknownOutcome(_)) => {
                warn!(%kind, error = %err, "statement outcome unknown");
                Err(err)
            }
            Err(err) => {
                let err = err.classify();
                debug!(%kind, error = %err, "statement failed");
                Err(err)
            }
        }
    }
}
