//! Warehouse DDL: option types, statement rendering, and the client facade.

mod model;
mod options;
mod parse;
mod statements;

pub use model::{
    ScalingPolicy, Warehouse, WarehouseDetails, WarehouseSize, WarehouseState, WarehouseType,
};
pub use options::{
    AlterWarehouseOptions, CreateWarehouseOptions, DropWarehouseOptions, Like,
    ShowWarehouseOptions, WarehouseSet, WarehouseUnset,
};
pub use statements::WarehouseStatement;

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::CommandExecutor;
use crate::identifier::AccountObjectIdentifier;
use crate::quoting::escape_like;
use crate::session::Context;

/// Warehouse operations, borrowed from a [`Client`](crate::Client).
///
/// Every call renders its statement locally first, so option errors surface before anything
/// is sent.
#[derive(Debug, Clone, Copy)]
pub struct Warehouses<'c> {
    executor: &'c CommandExecutor,
}

impl<'c> Warehouses<'c> {
    pub(crate) fn new(executor: &'c CommandExecutor) -> Self {
        Self { executor }
    }

    async fn exec(&self, ctx: &Context, statement: WarehouseStatement<'_>) -> Result<()> {
        let sql = statement.render()?;
        self.executor.exec(ctx, statement.kind(), &sql).await
    }

    /// `CREATE WAREHOUSE`.
    ///
    /// # Errors
    /// Option conflicts and range violations fail locally; service errors are classified.
    pub async fn create(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
        opts: Option<&CreateWarehouseOptions>,
    ) -> Result<()> {
        self.exec(ctx, WarehouseStatement::Create { id, opts }).await
    }

    /// `ALTER WAREHOUSE` with exactly one action group.
    ///
    /// `abort_all_queries` returns once the service accepts the statement; the running and
    /// queued counters drop asynchronously.
    ///
    /// # Errors
    /// `Error::ConflictingOptions` when more than one group is given, `Error::InvalidOptions`
    /// when none is.
    pub async fn alter(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
        opts: &AlterWarehouseOptions,
    ) -> Result<()> {
        self.exec(ctx, WarehouseStatement::Alter { id, opts }).await
    }

    /// `DROP WAREHOUSE`.
    ///
    /// # Errors
    /// Without `if_exists`, a missing warehouse is `Error::ObjectNotExistOrAuthorized`.
    pub async fn drop(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
        opts: Option<&DropWarehouseOptions>,
    ) -> Result<()> {
        self.exec(ctx, WarehouseStatement::Drop { id, opts }).await
    }

    /// `SHOW WAREHOUSES`, in the order the service returned them.
    ///
    /// # Errors
    /// `Error::Decode` when a row cannot be mapped.
    pub async fn show(
        &self,
        ctx: &Context,
        opts: Option<&ShowWarehouseOptions>,
    ) -> Result<Vec<Warehouse>> {
        let statement = WarehouseStatement::Show { opts };
        let sql = statement.render()?;
        let rows = self.executor.query(ctx, statement.kind(), &sql).await?;
        rows.results.iter().map(Warehouse::try_from).collect()
    }

    /// Look a single warehouse up by exact name.
    ///
    /// `\`, `_` and `%` in the name are escaped for the `LIKE` filter. The filter still
    /// ignores case, so the rows are narrowed to the exact name afterwards.
    ///
    /// # Errors
    /// `Error::ObjectNotFound` unless exactly one warehouse carries the name.
    pub async fn show_by_id(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
    ) -> Result<Warehouse> {
        let opts = ShowWarehouseOptions::like(escape_like(id.name()));
        let mut matches: Vec<Warehouse> = self
            .show(ctx, Some(&opts))
            .await?
            .into_iter()
            .filter(|w| w.name == id.name())
            .collect();
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(Error::ObjectNotFound(format!("warehouse {id}"))),
            n => {
                debug!(count = n, warehouse = %id, "ambiguous warehouse lookup");
                Err(Error::ObjectNotFound(format!(
                    "warehouse {id} matched {n} warehouses"
                )))
            }
        }
    }

    /// `DESCRIBE WAREHOUSE`.
    ///
    /// # Errors
    /// `Error::ObjectNotExistOrAuthorized` when the warehouse is missing or hidden.
    pub async fn describe(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
    ) -> Result<WarehouseDetails> {
        let statement = WarehouseStatement::Describe { id };
        let sql = statement.render()?;
        let rows = self.executor.query(ctx, statement.kind(), &sql).await?;
        match rows.results.as_slice() {
            [row] => WarehouseDetails::try_from(row),
            [] => Err(Error::ObjectNotExistOrAuthorized(format!("warehouse {id}"))),
            more => Err(Error::Decode(format!(
                "DESCRIBE WAREHOUSE {id} returned {} rows",
                more.len()
            ))),
        }
    }
}
