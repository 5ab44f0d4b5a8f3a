//! Typed DDL for warehouses over a caller-supplied session.
//!
//! Option structs are sparse: anything left `None` is omitted from the statement, so the
//! service applies its own defaults. Every statement is rendered and validated locally, then
//! sent exactly once through the [`Session`] trait.
//!
//! ```rust,no_run
//! # async fn run(session: impl warehouse_client::session::Session + 'static) -> warehouse_client::Result<()> {
//! use warehouse_client::prelude::*;
//!
//! let client = Client::new(session, ClientConfig::default())?;
//! let ctx = Context::background();
//! let id = AccountObjectIdentifier::new("REPORTING_WH");
//! let opts = CreateWarehouseOptions {
//!     warehouse_size: Some(WarehouseSize::Small),
//!     auto_suspend: Some(60),
//!     ..Default::default()
//! };
//! client.warehouses().create(&ctx, &id, Some(&opts)).await?;
//! let wh = client.warehouses().show_by_id(&ctx, &id).await?;
//! assert_eq!(wh.size, WarehouseSize::Small);
//! # Ok(())
//! # }
//! ```

mod client;
mod ddl;
mod executor;
mod tag;

pub mod config;
pub mod error;
pub mod identifier;
pub mod prelude;
pub mod quoting;
pub mod results;
pub mod session;
pub mod session_commands;
pub mod system_functions;
pub mod types;
pub mod warehouses;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use client::Client;
pub use config::ClientConfig;
pub use ddl::OperationKind;
pub use error::{Error, Result};
pub use executor::CommandExecutor;
pub use session::{Context, Session};
pub use tag::TagAssociation;
