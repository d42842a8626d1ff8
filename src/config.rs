use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The order in which collector items are offered up for trade credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOrder {
    /// Highest trade percentage first. Ties keep input order.
    #[default]
    TradeRateDescending,
    /// Lowest trade percentage first. Ties keep input order.
    TradeRateAscending,
    /// The caller's order, untouched.
    InputOrder,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown allocation order '{0}', expected descending, ascending or input")]
pub struct UnknownOrder(pub String);

impl FromStr for AllocationOrder {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "descending" | "desc" => Ok(AllocationOrder::TradeRateDescending),
            "ascending" | "asc" => Ok(AllocationOrder::TradeRateAscending),
            "input" => Ok(AllocationOrder::InputOrder),
            _ => Err(UnknownOrder(s.to_string())),
        }
    }
}

impl fmt::Display for AllocationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AllocationOrder::TradeRateDescending => "descending",
            AllocationOrder::TradeRateAscending => "ascending",
            AllocationOrder::InputOrder => "input",
        };
        write!(f, "{}", name)
    }
}

/// How the CLI prints a deal summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown output format '{0}', expected text or json")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Settings for a settlement run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettlementConfig {
    pub order: AllocationOrder,
}

impl SettlementConfig {
    pub fn with_order(order: AllocationOrder) -> Self {
        Self { order }
    }
}
