//! Helper utilities for testing without a live service.
//!
//! Enabled by the `test-utils` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::error::{Error, Result};
use crate::identifier::AccountObjectIdentifier;
use crate::results::{CustomDbRow, ResultSet};
use crate::session::Session;
use crate::types::RowValues;
use crate::warehouses::{ScalingPolicy, WarehouseSize, WarehouseState, WarehouseType};

enum Reply {
    Exec(Result<()>),
    Query(Result<ResultSet>),
}

impl Reply {
    fn kind(&self) -> &'static str {
        match self {
            Reply::Exec(_) => "exec",
            Reply::Query(_) => "query",
        }
    }
}

struct Expectation {
    sql: String,
    delay: Option<Duration>,
    reply: Reply,
}

#[derive(Default)]
struct Script {
    pending: VecDeque<Expectation>,
    log: Vec<String>,
}

/// A [`Session`] that answers from a script of expected statements.
///
/// Each incoming statement takes the first pending expectation with identical SQL and the
/// same call kind, so a statement running in a background task does not block the ones
/// scripted after it. Anything unscripted fails with `Error::Transport`.
///
/// ```rust
/// use std::sync::Arc;
/// use warehouse_client::test_utils::ScriptedSession;
/// use warehouse_client::{Client, ClientConfig, Context};
///
/// let session = Arc::new(ScriptedSession::new());
/// session.expect_exec("USE ROLE \"SYSADMIN\"", Ok(()));
///
/// let client = Client::new(session.clone(), ClientConfig::default())?;
/// let rt = tokio::runtime::Runtime::new().expect("runtime");
/// rt.block_on(async {
///     let role = warehouse_client::identifier::AccountObjectIdentifier::new("SYSADMIN");
///     client.session_commands().use_role(&Context::background(), &role).await
/// })?;
/// session.assert_done();
/// # Ok::<(), warehouse_client::Error>(())
/// ```
#[derive(Default)]
pub struct ScriptedSession {
    script: Mutex<Script>,
}

impl ScriptedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn push(&self, sql: &str, delay: Option<Duration>, reply: Reply) -> &Self {
        self.script().pending.push_back(Expectation {
            sql: sql.to_string(),
            delay,
            reply,
        });
        self
    }

    pub fn expect_exec(&self, sql: &str, reply: Result<()>) -> &Self {
        self.push(sql, None, Reply::Exec(reply))
    }

    pub fn expect_query(&self, sql: &str, reply: Result<ResultSet>) -> &Self {
        self.push(sql, None, Reply::Query(reply))
    }

    /// Answer `sql` only after `delay`, for in-flight cancellation and background work.
    pub fn expect_exec_delayed(&self, sql: &str, delay: Duration, reply: Result<()>) -> &Self {
        self.push(sql, Some(delay), Reply::Exec(reply))
    }

    pub fn expect_query_delayed(
        &self,
        sql: &str,
        delay: Duration,
        reply: Result<ResultSet>,
    ) -> &Self {
        self.push(sql, Some(delay), Reply::Query(reply))
    }

    /// Every statement received so far, in arrival order.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.script().log.clone()
    }

    /// Statements scripted but not yet received.
    #[must_use]
    pub fn pending(&self) -> Vec<String> {
        self.script().pending.iter().map(|e| e.sql.clone()).collect()
    }

    /// Panics if any scripted statement was never received.
    pub fn assert_done(&self) {
        let pending = self.pending();
        assert!(pending.is_empty(), "statements never sent: {pending:?}");
    }

    async fn take(&self, sql: &str, kind: &'static str) -> Result<Reply> {
        let expectation = {
            let mut script = self.script();
            script.log.push(sql.to_string());
            let position = script
                .pending
                .iter()
                .position(|e| e.sql == sql && e.reply.kind() == kind);
            position.and_then(|i| script.pending.remove(i))
        };
        let Some(expectation) = expectation else {
            return Err(Error::Transport(format!("unexpected statement ({kind}): {sql}")));
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(expectation.reply)
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn exec(&self, sql: &str) -> Result<()> {
        match self.take(sql, "exec").await? {
            Reply::Exec(reply) => reply,
            Reply::Query(_) => Err(Error::Transport(format!("scripted as query: {sql}"))),
        }
    }

    async fn query(&self, sql: &str) -> Result<ResultSet> {
        match self.take(sql, "query").await? {
            Reply::Query(reply) => reply,
            Reply::Exec(_) => Err(Error::Transport(format!("scripted as exec: {sql}"))),
        }
    }
}

/// Columns of `SHOW WAREHOUSES`, in service order.
pub const SHOW_WAREHOUSE_COLUMNS: &[&str] = &[
    "name",
    "state",
    "type",
    "size",
    "min_cluster_count",
    "max_cluster_count",
    "started_clusters",
    "running",
    "queued",
    "is_default",
    "is_current",
    "auto_suspend",
    "auto_resume",
    "available",
    "provisioning",
    "quiescing",
    "other",
    "created_on",
    "resumed_on",
    "updated_on",
    "owner",
    "comment",
    "enable_query_acceleration",
    "query_acceleration_max_scale_factor",
    "resource_monitor",
    "scaling_policy",
];

/// Builds one `SHOW WAREHOUSES` row, starting from what the service reports for a warehouse
/// created without options.
#[derive(Debug, Clone)]
pub struct WarehouseRowBuilder {
    name: String,
    state: WarehouseState,
    warehouse_type: WarehouseType,
    size: WarehouseSize,
    min_cluster_count: i64,
    max_cluster_count: i64,
    running: i64,
    queued: i64,
    auto_suspend: i64,
    auto_resume: bool,
    comment: String,
    enable_query_acceleration: bool,
    query_acceleration_max_scale_factor: i64,
    resource_monitor: String,
    scaling_policy: ScalingPolicy,
    created_on: NaiveDateTime,
}

impl WarehouseRowBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: WarehouseState::Started,
            warehouse_type: WarehouseType::Standard,
            size: WarehouseSize::XSmall,
            min_cluster_count: 1,
            max_cluster_count: 1,
            running: 0,
            queued: 0,
            auto_suspend: 600,
            auto_resume: true,
            comment: String::new(),
            enable_query_acceleration: false,
            query_acceleration_max_scale_factor: 8,
            resource_monitor: "null".to_string(),
            scaling_policy: ScalingPolicy::Standard,
            created_on: chrono::Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn state(mut self, state: WarehouseState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn warehouse_type(mut self, warehouse_type: WarehouseType) -> Self {
        self.warehouse_type = warehouse_type;
        self
    }

    #[must_use]
    pub fn size(mut self, size: WarehouseSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn clusters(mut self, min: i64, max: i64) -> Self {
        self.min_cluster_count = min;
        self.max_cluster_count = max;
        self
    }

    #[must_use]
    pub fn load(mut self, running: i64, queued: i64) -> Self {
        self.running = running;
        self.queued = queued;
        self
    }

    #[must_use]
    pub fn auto_suspend(mut self, seconds: i64) -> Self {
        self.auto_suspend = seconds;
        self
    }

    #[must_use]
    pub fn auto_resume(mut self, auto_resume: bool) -> Self {
        self.auto_resume = auto_resume;
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn query_acceleration(mut self, enabled: bool, max_scale_factor: i64) -> Self {
        self.enable_query_acceleration = enabled;
        self.query_acceleration_max_scale_factor = max_scale_factor;
        self
    }

    #[must_use]
    pub fn scaling_policy(mut self, policy: ScalingPolicy) -> Self {
        self.scaling_policy = policy;
        self
    }

    /// Values in [`SHOW_WAREHOUSE_COLUMNS`] order, spelled the way the service reports them.
    #[must_use]
    pub fn values(&self) -> Vec<RowValues> {
        let text = |s: &str| RowValues::Text(s.to_string());
        let flag = |b: bool| text(if b { "true" } else { "false" });
        vec![
            text(&self.name),
            text(self.state.as_str()),
            text(self.warehouse_type.as_sql()),
            text(display_size(self.size)),
            RowValues::Int(self.min_cluster_count),
            RowValues::Int(self.max_cluster_count),
            RowValues::Int(i64::from(self.state.is_running())),
            RowValues::Int(self.running),
            RowValues::Int(self.queued),
            text("N"),
            text("N"),
            RowValues::Int(self.auto_suspend),
            flag(self.auto_resume),
            text(""),
            text(""),
            text(""),
            text(""),
            RowValues::Timestamp(self.created_on),
            RowValues::Timestamp(self.created_on),
            RowValues::Timestamp(self.created_on),
            text("ACCOUNTADMIN"),
            text(&self.comment),
            flag(self.enable_query_acceleration),
            RowValues::Int(self.query_acceleration_max_scale_factor),
            text(&self.resource_monitor),
            text(self.scaling_policy.as_sql()),
        ]
    }

    #[must_use]
    pub fn build(&self) -> CustomDbRow {
        let columns = SHOW_WAREHOUSE_COLUMNS.iter().map(|c| (*c).to_string()).collect();
        CustomDbRow::new(Arc::new(columns), self.values())
    }
}

fn display_size(size: WarehouseSize) -> &'static str {
    match size {
        WarehouseSize::XSmall => "X-Small",
        WarehouseSize::Small => "Small",
        WarehouseSize::Medium => "Medium",
        WarehouseSize::Large => "Large",
        WarehouseSize::XLarge => "X-Large",
        WarehouseSize::XXLarge => "2X-Large",
        WarehouseSize::XXXLarge => "3X-Large",
        WarehouseSize::X4Large => "4X-Large",
        WarehouseSize::X5Large => "5X-Large",
        WarehouseSize::X6Large => "6X-Large",
    }
}

/// A `SHOW WAREHOUSES` result holding the given rows.
#[must_use]
pub fn show_result(rows: &[&WarehouseRowBuilder]) -> ResultSet {
    let mut result = ResultSet::with_columns(SHOW_WAREHOUSE_COLUMNS.iter().copied());
    for row in rows {
        result.add_row_values(row.values());
    }
    result
}

/// A `DESCRIBE WAREHOUSE` result for `name`.
#[must_use]
pub fn describe_result(name: &str, created_on: NaiveDateTime) -> ResultSet {
    let mut result = ResultSet::with_columns(["created_on", "name", "kind"]);
    result.add_row_values(vec![
        RowValues::Timestamp(created_on),
        RowValues::Text(name.to_string()),
        RowValues::Text("WAREHOUSE".to_string()),
    ]);
    result
}

/// A one-column, one-row result, as returned by scalar `SELECT`s.
#[must_use]
pub fn scalar_result(column: &str, value: RowValues) -> ResultSet {
    let mut result = ResultSet::with_columns([column]);
    result.add_row_values(vec![value]);
    result
}

/// The error the service returns for a missing (or hidden) object.
#[must_use]
pub fn not_exist_error(object: &str) -> Error {
    Error::service(
        Some(crate::error::NOT_EXIST_OR_AUTHORIZED_CODE),
        format!("Object '{object}' does not exist or not authorized."),
    )
}

/// A fresh upper-case identifier, unlikely to collide with existing objects.
#[must_use]
pub fn random_account_object_identifier() -> AccountObjectIdentifier {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    AccountObjectIdentifier::new(format!("TEST_{}", suffix.to_ascii_uppercase()))
}

/// Install a test-writer `tracing` subscriber at debug level. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
