use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identifier::AccountObjectIdentifier;

/// Warehouse size.
///
/// Renders with the DDL spelling (`XSMALL`); parses both that and the display spelling the
/// service uses in SHOW output (`X-Small`, `2X-Large`):
/// ```rust
/// use warehouse_client::warehouses::WarehouseSize;
///
/// assert_eq!("X-Small".parse::<WarehouseSize>()?, WarehouseSize::XSmall);
/// assert_eq!("2X-Large".parse::<WarehouseSize>()?, WarehouseSize::XXLarge);
/// assert_eq!(WarehouseSize::XXLarge.as_sql(), "XXLARGE");
/// # Ok::<(), warehouse_client::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarehouseSize {
    #[value(name = "xsmall")]
    XSmall,
    #[value(name = "small")]
    Small,
    #[value(name = "medium")]
    Medium,
    #[value(name = "large")]
    Large,
    #[value(name = "xlarge")]
    XLarge,
    #[value(name = "xxlarge")]
    XXLarge,
    #[value(name = "xxxlarge")]
    XXXLarge,
    #[value(name = "x4large")]
    X4Large,
    #[value(name = "x5large")]
    X5Large,
    #[value(name = "x6large")]
    X6Large,
}

impl WarehouseSize {
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            WarehouseSize::XSmall => "XSMALL",
            WarehouseSize::Small => "SMALL",
            WarehouseSize::Medium => "MEDIUM",
            WarehouseSize::Large => "LARGE",
            WarehouseSize::XLarge => "XLARGE",
            WarehouseSize::XXLarge => "XXLARGE",
            WarehouseSize::XXXLarge => "XXXLARGE",
            WarehouseSize::X4Large => "X4LARGE",
            WarehouseSize::X5Large => "X5LARGE",
            WarehouseSize::X6Large => "X6LARGE",
        }
    }
}

impl FromStr for WarehouseSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        let size = match normalized.as_str() {
            "XSMALL" => WarehouseSize::XSmall,
            "SMALL" => WarehouseSize::Small,
            "MEDIUM" => WarehouseSize::Medium,
            "LARGE" => WarehouseSize::Large,
            "XLARGE" => WarehouseSize::XLarge,
            "XXLARGE" | "X2LARGE" | "2XLARGE" => WarehouseSize::XXLarge,
            "XXXLARGE" | "X3LARGE" | "3XLARGE" => WarehouseSize::XXXLarge,
            "X4LARGE" | "4XLARGE" => WarehouseSize::X4Large,
            "X5LARGE" | "5XLARGE" => WarehouseSize::X5Large,
            "X6LARGE" | "6XLARGE" => WarehouseSize::X6Large,
            _ => return Err(Error::Decode(format!("unknown warehouse size {s:?}"))),
        };
        Ok(size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum WarehouseType {
    Standard,
    SnowparkOptimized,
}

impl WarehouseType {
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            WarehouseType::Standard => "STANDARD",
            WarehouseType::SnowparkOptimized => "SNOWPARK-OPTIMIZED",
        }
    }
}

impl FromStr for WarehouseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "STANDARD" => Ok(WarehouseType::Standard),
            "SNOWPARK-OPTIMIZED" => Ok(WarehouseType::SnowparkOptimized),
            _ => Err(Error::Decode(format!("unknown warehouse type {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScalingPolicy {
    Standard,
    Economy,
}

impl ScalingPolicy {
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            ScalingPolicy::Standard => "STANDARD",
            ScalingPolicy::Economy => "ECONOMY",
        }
    }
}

impl FromStr for ScalingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(ScalingPolicy::Standard),
            "ECONOMY" => Ok(ScalingPolicy::Economy),
            _ => Err(Error::Decode(format!("unknown scaling policy {s:?}"))),
        }
    }
}

/// State reported by the service. The client never drives transitions itself:
/// `SUSPENDED -> RESUMING -> STARTED -> SUSPENDING -> SUSPENDED`, plus `RESIZING` while a
/// size change is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarehouseState {
    Suspended,
    Resuming,
    Started,
    Suspending,
    Resizing,
}

impl WarehouseState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseState::Suspended => "SUSPENDED",
            WarehouseState::Resuming => "RESUMING",
            WarehouseState::Started => "STARTED",
            WarehouseState::Suspending => "SUSPENDING",
            WarehouseState::Resizing => "RESIZING",
        }
    }

    /// Running or on its way there.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            WarehouseState::Started | WarehouseState::Resuming | WarehouseState::Resizing
        )
    }
}

impl FromStr for WarehouseState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUSPENDED" => Ok(WarehouseState::Suspended),
            "RESUMING" => Ok(WarehouseState::Resuming),
            "STARTED" => Ok(WarehouseState::Started),
            "SUSPENDING" => Ok(WarehouseState::Suspending),
            "RESIZING" => Ok(WarehouseState::Resizing),
            _ => Err(Error::Decode(format!("unknown warehouse state {s:?}"))),
        }
    }
}

macro_rules! display_via {
    ($method:ident: $($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.$method())
                }
            }
        )+
    };
}

display_via!(as_sql: WarehouseSize, WarehouseType, ScalingPolicy);
display_via!(as_str: WarehouseState);

/// One row of `SHOW WAREHOUSES`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub name: String,
    pub state: WarehouseState,
    #[serde(rename = "type")]
    pub warehouse_type: WarehouseType,
    pub size: WarehouseSize,
    pub min_cluster_count: u32,
    pub max_cluster_count: u32,
    pub started_clusters: u32,
    pub running: u32,
    pub queued: u32,
    pub is_default: bool,
    pub is_current: bool,
    /// Seconds of inactivity before suspension; `0` means never.
    pub auto_suspend: u32,
    pub auto_resume: bool,
    pub available: f64,
    pub provisioning: f64,
    pub quiescing: f64,
    pub other: f64,
    pub created_on: Option<NaiveDateTime>,
    pub resumed_on: Option<NaiveDateTime>,
    pub updated_on: Option<NaiveDateTime>,
    pub owner: String,
    pub comment: String,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: u32,
    pub resource_monitor: String,
    pub scaling_policy: ScalingPolicy,
}

impl Warehouse {
    /// Identifier of this warehouse, case preserved as reported.
    #[must_use]
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }
}

/// Result of `DESCRIBE WAREHOUSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseDetails {
    pub created_on: NaiveDateTime,
    pub name: String,
    pub kind: String,
}
