//! Mapping of SHOW / DESCRIBE rows onto typed records.

use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::results::CustomDbRow;
use crate::types::RowValues;

use super::model::{Warehouse, WarehouseDetails};

fn present<'r>(row: &'r CustomDbRow, column: &str) -> Option<&'r RowValues> {
    row.get(column).filter(|v| !v.is_null())
}

fn required_text(row: &CustomDbRow, column: &str) -> Result<String> {
    match row.require(column)? {
        RowValues::Text(s) => Ok(s.clone()),
        other => Err(Error::Decode(format!(
            "column `{column}` is not text: {other:?}"
        ))),
    }
}

fn required_enum<T: FromStr<Err = Error>>(row: &CustomDbRow, column: &str) -> Result<T> {
    required_text(row, column)?.parse()
}

fn text_or_empty(row: &CustomDbRow, column: &str) -> String {
    present(row, column)
        .and_then(RowValues::as_text)
        .map(str::to_string)
        .unwrap_or_default()
}

fn count(row: &CustomDbRow, column: &str) -> Result<u32> {
    match present(row, column) {
        None => Ok(0),
        Some(value) => {
            let n = value
                .as_int()
                .ok_or_else(|| Error::Decode(format!("column `{column}` is not an integer")))?;
            u32::try_from(n)
                .map_err(|_| Error::Decode(format!("column `{column}` out of range: {n}")))
        }
    }
}

fn flag(row: &CustomDbRow, column: &str) -> Result<bool> {
    match present(row, column) {
        None => Ok(false),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| Error::Decode(format!("column `{column}` is not a boolean"))),
    }
}

/// Percentages are reported as numbers or as blank text when not applicable.
fn percentage(row: &CustomDbRow, column: &str) -> f64 {
    present(row, column)
        .and_then(RowValues::as_float)
        .unwrap_or_default()
}

fn timestamp(row: &CustomDbRow, column: &str) -> Option<NaiveDateTime> {
    present(row, column).and_then(RowValues::as_timestamp)
}

impl TryFrom<&CustomDbRow> for Warehouse {
    type Error = Error;

    fn try_from(row: &CustomDbRow) -> Result<Self> {
        Ok(Warehouse {
            name: required_text(row, "name")?,
            state: required_enum(row, "state")?,
            warehouse_type: required_enum(row, "type")?,
            size: required_enum(row, "size")?,
            min_cluster_count: count(row, "min_cluster_count")?,
            max_cluster_count: count(row, "max_cluster_count")?,
            started_clusters: count(row, "started_clusters")?,
            running: count(row, "running")?,
            queued: count(row, "queued")?,
            is_default: flag(row, "is_default")?,
            is_current: flag(row, "is_current")?,
            auto_suspend: count(row, "auto_suspend")?,
            auto_resume: flag(row, "auto_resume")?,
            available: percentage(row, "available"),
            provisioning: percentage(row, "provisioning"),
            quiescing: percentage(row, "quiescing"),
            other: percentage(row, "other"),
            created_on: timestamp(row, "created_on"),
            resumed_on: timestamp(row, "resumed_on"),
            updated_on: timestamp(row, "updated_on"),
            owner: text_or_empty(row, "owner"),
            comment: text_or_empty(row, "comment"),
            enable_query_acceleration: flag(row, "enable_query_acceleration")?,
            query_acceleration_max_scale_factor: count(
                row,
                "query_acceleration_max_scale_factor",
            )?,
            resource_monitor: text_or_empty(row, "resource_monitor"),
            scaling_policy: required_enum(row, "scaling_policy")?,
        })
    }
}

impl TryFrom<&CustomDbRow> for WarehouseDetails {
    type Error = Error;

    fn try_from(row: &CustomDbRow) -> Result<Self> {
        let created_on = timestamp(row, "created_on")
            .ok_or_else(|| Error::Decode("column `created_on` is not a timestamp".to_string()))?;
        Ok(WarehouseDetails {
            created_on,
            name: required_text(row, "name")?,
            kind: required_text(row, "kind")?,
        })
    }
}
