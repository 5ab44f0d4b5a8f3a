//! Rendering of warehouse statements.

use crate::ddl::{OperationKind, SqlBuilder, SqlValue};
use crate::error::{Error, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::tag::TagAssociation;

use super::model::{ScalingPolicy, WarehouseSize, WarehouseType};
use super::options::{
    AlterWarehouseOptions, CreateWarehouseOptions, DropWarehouseOptions, ShowWarehouseOptions,
    WarehouseSet, WarehouseUnset,
};

const CLUSTER_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
const SCALE_FACTOR_RANGE: std::ops::RangeInclusive<u32> = 0..=100;

/// One warehouse statement. `None` options behave like all-absent options.
#[derive(Debug, Clone, Copy)]
pub enum WarehouseStatement<'a> {
    Create {
        id: &'a AccountObjectIdentifier,
        opts: Option<&'a CreateWarehouseOptions>,
    },
    Alter {
        id: &'a AccountObjectIdentifier,
        opts: &'a AlterWarehouseOptions,
    },
    Drop {
        id: &'a AccountObjectIdentifier,
        opts: Option<&'a DropWarehouseOptions>,
    },
    Show {
        opts: Option<&'a ShowWarehouseOptions>,
    },
    Describe {
        id: &'a AccountObjectIdentifier,
    },
}

impl WarehouseStatement<'_> {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            WarehouseStatement::Create { .. } => OperationKind::Create,
            WarehouseStatement::Alter { .. } => OperationKind::Alter,
            WarehouseStatement::Drop { .. } => OperationKind::Drop,
            WarehouseStatement::Show { .. } => OperationKind::Show,
            WarehouseStatement::Describe { .. } => OperationKind::Describe,
        }
    }

    /// Validate the options and render the statement text.
    ///
    /// # Errors
    /// Returns `Error::ConflictingOptions` or `Error::InvalidOptions` when the options cannot
    /// form a single valid statement.
    ///
    /// ```rust
    /// use warehouse_client::identifier::AccountObjectIdentifier;
    /// use warehouse_client::warehouses::{DropWarehouseOptions, WarehouseStatement};
    ///
    /// let id = AccountObjectIdentifier::new("WH");
    /// let opts = DropWarehouseOptions::if_exists();
    /// let sql = WarehouseStatement::Drop { id: &id, opts: Some(&opts) }.render()?;
    /// assert_eq!(sql, "DROP WAREHOUSE IF EXISTS \"WH\"");
    /// # Ok::<(), warehouse_client::Error>(())
    /// ```
    pub fn render(&self) -> Result<String> {
        match *self {
            WarehouseStatement::Create { id, opts } => {
                let fallback = CreateWarehouseOptions::default();
                render_create(id, opts.unwrap_or(&fallback))
            }
            WarehouseStatement::Alter { id, opts } => render_alter(id, opts),
            WarehouseStatement::Drop { id, opts } => Ok(SqlBuilder::new("DROP WAREHOUSE")
                .flag(opts.and_then(|o| o.if_exists), "IF EXISTS")
                .ident(id)
                .finish()),
            WarehouseStatement::Show { opts } => Ok(SqlBuilder::new("SHOW WAREHOUSES")
                .like(opts.and_then(|o| o.like.as_ref()).map(|l| l.pattern.as_str()))
                .finish()),
            WarehouseStatement::Describe { id } => {
                Ok(SqlBuilder::new("DESCRIBE WAREHOUSE").ident(id).finish())
            }
        }
    }
}

/// Properties shared by `CREATE` and `ALTER ... SET`, in rendering order.
struct Properties<'a> {
    warehouse_type: Option<WarehouseType>,
    warehouse_size: Option<WarehouseSize>,
    wait_for_completion: Option<bool>,
    max_cluster_count: Option<u32>,
    min_cluster_count: Option<u32>,
    scaling_policy: Option<ScalingPolicy>,
    auto_suspend: Option<u32>,
    auto_resume: Option<bool>,
    initially_suspended: Option<bool>,
    resource_monitor: Option<&'a AccountObjectIdentifier>,
    comment: Option<&'a str>,
    enable_query_acceleration: Option<bool>,
    query_acceleration_max_scale_factor: Option<u32>,
    max_concurrency_level: Option<u32>,
    statement_queued_timeout_in_seconds: Option<u32>,
    statement_timeout_in_seconds: Option<u32>,
}

impl<'a> Properties<'a> {
    fn from_create(o: &'a CreateWarehouseOptions) -> Self {
        Self {
            warehouse_type: o.warehouse_type,
            warehouse_size: o.warehouse_size,
            wait_for_completion: None,
            max_cluster_count: o.max_cluster_count,
            min_cluster_count: o.min_cluster_count,
            scaling_policy: o.scaling_policy,
            auto_suspend: o.auto_suspend,
            auto_resume: o.auto_resume,
            initially_suspended: o.initially_suspended,
            resource_monitor: o.resource_monitor.as_ref(),
            comment: o.comment.as_deref(),
            enable_query_acceleration: o.enable_query_acceleration,
            query_acceleration_max_scale_factor: o.query_acceleration_max_scale_factor,
            max_concurrency_level: o.max_concurrency_level,
            statement_queued_timeout_in_seconds: o.statement_queued_timeout_in_seconds,
            statement_timeout_in_seconds: o.statement_timeout_in_seconds,
        }
    }

    fn from_set(o: &'a WarehouseSet) -> Self {
        Self {
            warehouse_type: o.warehouse_type,
            warehouse_size: o.warehouse_size,
            wait_for_completion: o.wait_for_completion,
            max_cluster_count: o.max_cluster_count,
            min_cluster_count: o.min_cluster_count,
            scaling_policy: o.scaling_policy,
            auto_suspend: o.auto_suspend,
            auto_resume: o.auto_resume,
            initially_suspended: None,
            resource_monitor: o.resource_monitor.as_ref(),
            comment: o.comment.as_deref(),
            enable_query_acceleration: o.enable_query_acceleration,
            query_acceleration_max_scale_factor: o.query_acceleration_max_scale_factor,
            max_concurrency_level: o.max_concurrency_level,
            statement_queued_timeout_in_seconds: o.statement_queued_timeout_in_seconds,
            statement_timeout_in_seconds: o.statement_timeout_in_seconds,
        }
    }

    fn is_empty(&self) -> bool {
        self.warehouse_type.is_none()
            && self.warehouse_size.is_none()
            && self.wait_for_completion.is_none()
            && self.max_cluster_count.is_none()
            && self.min_cluster_count.is_none()
            && self.scaling_policy.is_none()
            && self.auto_suspend.is_none()
            && self.auto_resume.is_none()
            && self.initially_suspended.is_none()
            && self.resource_monitor.is_none()
            && self.comment.is_none()
            && self.enable_query_acceleration.is_none()
            && self.query_acceleration_max_scale_factor.is_none()
            && self.max_concurrency_level.is_none()
            && self.statement_queued_timeout_in_seconds.is_none()
            && self.statement_timeout_in_seconds.is_none()
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("MAX_CLUSTER_COUNT", self.max_cluster_count),
            ("MIN_CLUSTER_COUNT", self.min_cluster_count),
        ] {
            match value {
                Some(v) if !CLUSTER_COUNT_RANGE.contains(&v) => {
                    return Err(Error::InvalidOptions(format!(
                        "{key} must be between 1 and 10, got {v}"
                    )));
                }
                _ => {}
            }
        }
        match (self.min_cluster_count, self.max_cluster_count) {
            (Some(min), Some(max)) if min > max => {
                return Err(Error::InvalidOptions(format!(
                    "MIN_CLUSTER_COUNT ({min}) must not exceed MAX_CLUSTER_COUNT ({max})"
                )));
            }
            _ => {}
        }
        match self.query_acceleration_max_scale_factor {
            Some(v) if !SCALE_FACTOR_RANGE.contains(&v) => {
                return Err(Error::InvalidOptions(format!(
                    "QUERY_ACCELERATION_MAX_SCALE_FACTOR must be between 0 and 100, got {v}"
                )));
            }
            _ => {}
        }
        if self.wait_for_completion.is_some() && self.warehouse_size.is_none() {
            return Err(Error::InvalidOptions(
                "WAIT_FOR_COMPLETION requires WAREHOUSE_SIZE".to_string(),
            ));
        }
        Ok(())
    }

    fn write(&self, builder: SqlBuilder) -> SqlBuilder {
        let int = |v: Option<u32>| v.map(|n| SqlValue::Int(i64::from(n)));
        builder
            .param(
                "WAREHOUSE_TYPE",
                self.warehouse_type.map(|t| SqlValue::Text(t.as_sql())),
            )
            .param(
                "WAREHOUSE_SIZE",
                self.warehouse_size.map(|s| SqlValue::Keyword(s.as_sql())),
            )
            .param(
                "WAIT_FOR_COMPLETION",
                self.wait_for_completion.map(SqlValue::Bool),
            )
            .param("MAX_CLUSTER_COUNT", int(self.max_cluster_count))
            .param("MIN_CLUSTER_COUNT", int(self.min_cluster_count))
            .param(
                "SCALING_POLICY",
                self.scaling_policy.map(|p| SqlValue::Keyword(p.as_sql())),
            )
            .param("AUTO_SUSPEND", int(self.auto_suspend))
            .param("AUTO_RESUME", self.auto_resume.map(SqlValue::Bool))
            .param(
                "INITIALLY_SUSPENDED",
                self.initially_suspended.map(SqlValue::Bool),
            )
            .param(
                "RESOURCE_MONITOR",
                self.resource_monitor
                    .map(|m| SqlValue::Ident(m.fully_qualified_name())),
            )
            .param("COMMENT", self.comment.map(SqlValue::Text))
            .param(
                "ENABLE_QUERY_ACCELERATION",
                self.enable_query_acceleration.map(SqlValue::Bool),
            )
            .param(
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
                int(self.query_acceleration_max_scale_factor),
            )
            .param("MAX_CONCURRENCY_LEVEL", int(self.max_concurrency_level))
            .param(
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
                int(self.statement_queued_timeout_in_seconds),
            )
            .param(
                "STATEMENT_TIMEOUT_IN_SECONDS",
                int(self.statement_timeout_in_seconds),
            )
    }
}

fn render_tags(tags: &[TagAssociation]) -> Vec<String> {
    tags.iter().map(TagAssociation::render).collect()
}

fn render_create(id: &AccountObjectIdentifier, opts: &CreateWarehouseOptions) -> Result<String> {
    if opts.or_replace == Some(true) && opts.if_not_exists == Some(true) {
        return Err(Error::ConflictingOptions(
            "OR REPLACE and IF NOT EXISTS cannot be used together".to_string(),
        ));
    }
    let props = Properties::from_create(opts);
    props.validate()?;

    let builder = SqlBuilder::new("CREATE")
        .flag(opts.or_replace, "OR REPLACE")
        .keyword("WAREHOUSE")
        .flag(opts.if_not_exists, "IF NOT EXISTS")
        .ident(id);
    Ok(props
        .write(builder)
        .parenthesized("TAG", &render_tags(&opts.tag))
        .finish())
}

/// The single action an `ALTER WAREHOUSE` performs once its options are validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AlterAction<'a> {
    Rename(&'a AccountObjectIdentifier),
    Set(&'a WarehouseSet),
    SetTag(&'a [TagAssociation]),
    Unset(&'a WarehouseUnset),
    UnsetTag(&'a [SchemaObjectIdentifier]),
    Suspend,
    Resume { if_suspended: bool },
    AbortAllQueries,
}

impl AlterWarehouseOptions {
    pub(crate) fn action(&self) -> Result<AlterAction<'_>> {
        let is_set = |flag: Option<bool>| flag == Some(true);
        let groups = [
            ("NewName", self.new_name.is_some()),
            ("Set", self.set.is_some()),
            ("Unset", self.unset.is_some()),
            ("Suspend", is_set(self.suspend)),
            ("Resume", is_set(self.resume)),
            ("AbortAllQueries", is_set(self.abort_all_queries)),
        ];
        let present: Vec<&str> = groups
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();

        if present.len() > 1 {
            return Err(Error::ConflictingOptions(format!(
                "exactly one of NewName, Set, Unset, Suspend, Resume, AbortAllQueries may be set, got {}",
                present.join(", ")
            )));
        }
        if is_set(self.if_suspended) && !is_set(self.resume) {
            return Err(Error::InvalidOptions(
                "IfSuspended can only be used with Resume".to_string(),
            ));
        }

        if let Some(new_name) = &self.new_name {
            return Ok(AlterAction::Rename(new_name));
        }
        if let Some(set) = &self.set {
            return set_action(set);
        }
        if let Some(unset) = &self.unset {
            return unset_action(unset);
        }
        if is_set(self.suspend) {
            return Ok(AlterAction::Suspend);
        }
        if is_set(self.resume) {
            return Ok(AlterAction::Resume {
                if_suspended: is_set(self.if_suspended),
            });
        }
        if is_set(self.abort_all_queries) {
            return Ok(AlterAction::AbortAllQueries);
        }
        Err(Error::InvalidOptions(
            "one of NewName, Set, Unset, Suspend, Resume, AbortAllQueries must be set".to_string(),
        ))
    }
}

fn set_action(set: &WarehouseSet) -> Result<AlterAction<'_>> {
    let props = Properties::from_set(set);
    match (props.is_empty(), set.tag.is_empty()) {
        (true, true) => Err(Error::InvalidOptions(
            "Set requires at least one property or tag".to_string(),
        )),
        (false, false) => Err(Error::ConflictingOptions(
            "tags cannot be set together with other properties".to_string(),
        )),
        (true, false) => Ok(AlterAction::SetTag(&set.tag)),
        (false, true) => {
            props.validate()?;
            Ok(AlterAction::Set(set))
        }
    }
}

fn unset_keywords(unset: &WarehouseUnset) -> Vec<String> {
    [
        ("WAREHOUSE_TYPE", unset.warehouse_type),
        ("WAREHOUSE_SIZE", unset.warehouse_size),
        ("MAX_CLUSTER_COUNT", unset.max_cluster_count),
        ("MIN_CLUSTER_COUNT", unset.min_cluster_count),
        ("SCALING_POLICY", unset.scaling_policy),
        ("AUTO_SUSPEND", unset.auto_suspend),
        ("AUTO_RESUME", unset.auto_resume),
        ("RESOURCE_MONITOR", unset.resource_monitor),
        ("COMMENT", unset.comment),
        ("ENABLE_QUERY_ACCELERATION", unset.enable_query_acceleration),
        (
            "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
            unset.query_acceleration_max_scale_factor,
        ),
        ("MAX_CONCURRENCY_LEVEL", unset.max_concurrency_level),
        (
            "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
            unset.statement_queued_timeout_in_seconds,
        ),
        (
            "STATEMENT_TIMEOUT_IN_SECONDS",
            unset.statement_timeout_in_seconds,
        ),
    ]
    .into_iter()
    .filter(|(_, flag)| *flag == Some(true))
    .map(|(key, _)| key.to_string())
    .collect()
}

fn unset_action(unset: &WarehouseUnset) -> Result<AlterAction<'_>> {
    let has_props = !unset_keywords(unset).is_empty();
    match (has_props, unset.tag.is_empty()) {
        (false, true) => Err(Error::InvalidOptions(
            "Unset requires at least one property or tag".to_string(),
        )),
        (true, false) => Err(Error::ConflictingOptions(
            "tags cannot be unset together with other properties".to_string(),
        )),
        (false, false) => Ok(AlterAction::UnsetTag(&unset.tag)),
        (true, true) => Ok(AlterAction::Unset(unset)),
    }
}

fn render_alter(id: &AccountObjectIdentifier, opts: &AlterWarehouseOptions) -> Result<String> {
    let action = opts.action()?;
    let builder = SqlBuilder::new("ALTER WAREHOUSE")
        .flag(opts.if_exists, "IF EXISTS")
        .ident(id);
    let builder = match action {
        AlterAction::Rename(new_name) => builder.keyword("RENAME TO").ident(new_name),
        AlterAction::Set(set) => Properties::from_set(set).write(builder.keyword("SET")),
        AlterAction::SetTag(tags) => builder.list("SET TAG", &render_tags(tags)),
        AlterAction::Unset(unset) => builder.list("UNSET", &unset_keywords(unset)),
        AlterAction::UnsetTag(tags) => {
            let names: Vec<String> = tags
                .iter()
                .map(ObjectIdentifier::fully_qualified_name)
                .collect();
            builder.list("UNSET TAG", &names)
        }
        AlterAction::Suspend => builder.keyword("SUSPEND"),
        AlterAction::Resume { if_suspended } => builder
            .keyword("RESUME")
            .flag(Some(if_suspended), "IF SUSPENDED"),
        AlterAction::AbortAllQueries => builder.keyword("ABORT ALL QUERIES"),
    };
    Ok(builder.finish())
}
