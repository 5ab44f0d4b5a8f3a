//! Sparse option structs for warehouse statements.
//!
//! Every field is optional. A field left at `None` (or an empty tag list) is omitted from the
//! rendered statement, so the service applies its own default rather than one chosen here.
//! Flags such as `or_replace` count as present only when set to `Some(true)`.

use crate::identifier::{AccountObjectIdentifier, SchemaObjectIdentifier};
use crate::tag::TagAssociation;

use super::model::{ScalingPolicy, WarehouseSize, WarehouseType};

/// Options for `CREATE WAREHOUSE`.
///
/// ```rust
/// use warehouse_client::warehouses::{CreateWarehouseOptions, WarehouseSize};
///
/// let opts = CreateWarehouseOptions {
///     warehouse_size: Some(WarehouseSize::Small),
///     max_cluster_count: Some(8),
///     min_cluster_count: Some(2),
///     ..Default::default()
/// };
/// # let _ = opts;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateWarehouseOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    pub max_cluster_count: Option<u32>,
    pub min_cluster_count: Option<u32>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub auto_suspend: Option<u32>,
    pub auto_resume: Option<bool>,
    pub initially_suspended: Option<bool>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<u32>,
    pub max_concurrency_level: Option<u32>,
    pub statement_queued_timeout_in_seconds: Option<u32>,
    pub statement_timeout_in_seconds: Option<u32>,
    pub tag: Vec<TagAssociation>,
}

/// Options for `ALTER WAREHOUSE`.
///
/// Exactly one of `new_name`, `set`, `unset`, `suspend`, `resume` and `abort_all_queries`
/// must be given; `if_suspended` qualifies `resume`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterWarehouseOptions {
    pub if_exists: Option<bool>,
    pub new_name: Option<AccountObjectIdentifier>,
    pub set: Option<WarehouseSet>,
    pub unset: Option<WarehouseUnset>,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
    pub if_suspended: Option<bool>,
    pub abort_all_queries: Option<bool>,
}

/// `SET` group of `ALTER WAREHOUSE`. Either properties or tags, not both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseSet {
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    /// Only meaningful together with `warehouse_size`.
    pub wait_for_completion: Option<bool>,
    pub max_cluster_count: Option<u32>,
    pub min_cluster_count: Option<u32>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub auto_suspend: Option<u32>,
    pub auto_resume: Option<bool>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<u32>,
    pub max_concurrency_level: Option<u32>,
    pub statement_queued_timeout_in_seconds: Option<u32>,
    pub statement_timeout_in_seconds: Option<u32>,
    pub tag: Vec<TagAssociation>,
}

/// `UNSET` group of `ALTER WAREHOUSE`. Either properties or tags, not both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseUnset {
    pub warehouse_type: Option<bool>,
    pub warehouse_size: Option<bool>,
    pub max_cluster_count: Option<bool>,
    pub min_cluster_count: Option<bool>,
    pub scaling_policy: Option<bool>,
    pub auto_suspend: Option<bool>,
    pub auto_resume: Option<bool>,
    pub resource_monitor: Option<bool>,
    pub comment: Option<bool>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<bool>,
    pub max_concurrency_level: Option<bool>,
    pub statement_queued_timeout_in_seconds: Option<bool>,
    pub statement_timeout_in_seconds: Option<bool>,
    pub tag: Vec<SchemaObjectIdentifier>,
}

/// Options for `DROP WAREHOUSE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropWarehouseOptions {
    pub if_exists: Option<bool>,
}

/// Options for `SHOW WAREHOUSES`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowWarehouseOptions {
    pub like: Option<Like>,
}

/// `LIKE '<pattern>'` filter; `%` and `_` are wildcards and matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl ShowWarehouseOptions {
    /// Filter by a LIKE pattern.
    pub fn like(pattern: impl Into<String>) -> Self {
        Self {
            like: Some(Like::new(pattern)),
        }
    }
}

impl DropWarehouseOptions {
    #[must_use]
    pub fn if_exists() -> Self {
        Self {
            if_exists: Some(true),
        }
    }
}
