//! Session-level commands: `USE`, `ALTER SESSION`, and trusted passthrough.

use crate::ddl::{OperationKind, SqlBuilder, SqlValue};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::identifier::AccountObjectIdentifier;
use crate::session::Context;

#[derive(Debug, Clone, Copy)]
pub struct SessionCommands<'c> {
    executor: &'c CommandExecutor,
}

impl<'c> SessionCommands<'c> {
    pub(crate) fn new(executor: &'c CommandExecutor) -> Self {
        Self { executor }
    }

    /// `USE WAREHOUSE <id>`.
    ///
    /// # Errors
    /// Classified session error.
    pub async fn use_warehouse(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<()> {
        let sql = SqlBuilder::new("USE WAREHOUSE").ident(id).finish();
        self.executor.exec(ctx, OperationKind::Other, &sql).await
    }

    /// `USE ROLE <id>`.
    ///
    /// # Errors
    /// Classified session error.
    pub async fn use_role(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<()> {
        let sql = SqlBuilder::new("USE ROLE").ident(id).finish();
        self.executor.exec(ctx, OperationKind::Other, &sql).await
    }

    /// Warehouse in use by the session, `None` when there is none.
    ///
    /// # Errors
    /// Classified session error.
    pub async fn current_warehouse(&self, ctx: &Context) -> Result<Option<String>> {
        let rows = self
            .executor
            .query(ctx, OperationKind::Other, "SELECT CURRENT_WAREHOUSE()")
            .await?;
        Ok(rows
            .results
            .first()
            .and_then(|row| row.get_by_index(0))
            .and_then(|v| v.as_text())
            .map(str::to_string))
    }

    /// `ALTER SESSION SET QUERY_TAG = '<tag>'`.
    ///
    /// # Errors
    /// Classified session error.
    pub async fn set_query_tag(&self, ctx: &Context, tag: &str) -> Result<()> {
        let sql = SqlBuilder::new("ALTER SESSION SET")
            .param("QUERY_TAG", Some(SqlValue::Text(tag)))
            .finish();
        self.executor.exec(ctx, OperationKind::Other, &sql).await
    }

    /// Send caller-authored SQL as is. Nothing is quoted; only pass trusted text.
    ///
    /// # Errors
    /// Classified session error.
    pub async fn exec_raw(&self, ctx: &Context, sql: &str) -> Result<()> {
        self.executor.exec(ctx, OperationKind::Other, sql).await
    }
}
