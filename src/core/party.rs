use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a trade-in deal.
///
/// The vendor lists items at a single flat payout percentage and sets the
/// total to be covered. The collector lists items that can be either sold for
/// cash or applied as trade credit against that total.
///
/// # Examples
///
/// ```
/// use trade_settlement::core::party::Party;
///
/// assert_eq!(Party::Vendor.counterparty(), Party::Collector);
/// assert_eq!(Party::Collector.to_string(), "Collector");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Vendor,
    Collector,
}

impl Party {
    /// The other side of the deal.
    pub fn counterparty(self) -> Self {
        match self {
            Party::Vendor => Party::Collector,
            Party::Collector => Party::Vendor,
        }
    }

    /// Lowercase identifier, as stored in deal records.
    pub fn as_str(self) -> &'static str {
        match self {
            Party::Vendor => "vendor",
            Party::Collector => "collector",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Vendor => write!(f, "Vendor"),
            Party::Collector => write!(f, "Collector"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterparty_round_trip() {
        assert_eq!(Party::Vendor.counterparty(), Party::Collector);
        assert_eq!(Party::Collector.counterparty().counterparty(), Party::Collector);
    }

    #[test]
    fn test_party_display() {
        assert_eq!(format!("{}", Party::Vendor), "Vendor");
        assert_eq!(Party::Collector.as_str(), "collector");
    }

    #[test]
    fn test_party_serializes_snake_case() {
        let json = serde_json::to_string(&Party::Collector).unwrap();
        assert_eq!(json, "\"collector\"");
    }
}
