//! Convenient imports for common functionality.

pub use crate::client::Client;
pub use crate::config::ClientConfig;
pub use crate::error::Error;
pub use crate::identifier::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier,
};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::session::{Context, Session};
pub use crate::tag::TagAssociation;
pub use crate::types::{ObjectType, RowValues};
pub use crate::warehouses::{
    AlterWarehouseOptions, CreateWarehouseOptions, DropWarehouseOptions, Like, ScalingPolicy,
    ShowWarehouseOptions, Warehouse, WarehouseDetails, WarehouseSet, WarehouseSize,
    WarehouseState, WarehouseType, WarehouseUnset,
};
