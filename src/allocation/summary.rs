use crate::allocation::rounded;
use crate::allocation::settlement::{Balance, SettlementEngine, SettlementResult};
use crate::allocation::valuation::{self, CollectorOffer, VendorLine};
use crate::config::SettlementConfig;
use crate::core::item::{CollectorItem, VendorItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a deal looks like for the current item lists.
///
/// Only the `Settled` case runs the allocation pass. The single-sided cases
/// report what is on the table, and an empty deal is not a zero settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DealSummary {
    NoDeal,
    VendorOnly {
        lines: Vec<VendorLine>,
        total: Decimal,
    },
    CollectorOnly(CollectorOffer),
    Settled(SettlementResult),
}

impl DealSummary {
    pub fn evaluate(vendor: &[VendorItem], collector: &[CollectorItem]) -> Self {
        Self::evaluate_with(vendor, collector, &SettlementConfig::default())
    }

    pub fn evaluate_with(
        vendor: &[VendorItem],
        collector: &[CollectorItem],
        config: &SettlementConfig,
    ) -> Self {
        match (vendor.is_empty(), collector.is_empty()) {
            (true, true) => DealSummary::NoDeal,
            (true, false) => DealSummary::CollectorOnly(valuation::collector_only_offer(collector)),
            (false, true) => DealSummary::VendorOnly {
                lines: valuation::vendor_lines(vendor),
                total: valuation::vendor_total(vendor),
            },
            (false, false) => {
                DealSummary::Settled(SettlementEngine::settle_with(vendor, collector, config))
            }
        }
    }

    pub fn is_no_deal(&self) -> bool {
        matches!(self, DealSummary::NoDeal)
    }

    /// The settled balance, if both sides have items.
    pub fn balance(&self) -> Option<Balance> {
        match self {
            DealSummary::Settled(result) => Some(result.balance()),
            _ => None,
        }
    }

    pub fn settlement(&self) -> Option<&SettlementResult> {
        match self {
            DealSummary::Settled(result) => Some(result),
            _ => None,
        }
    }

    /// One-line status, as shown above the item lists.
    pub fn headline(&self) -> String {
        match self {
            DealSummary::NoDeal => "Add items to start a deal".to_string(),
            DealSummary::VendorOnly { total, .. } => {
                format!("Collector owes {}", rounded(*total))
            }
            DealSummary::CollectorOnly(offer) => format!(
                "Collector receives {} in cash OR {} in trade",
                rounded(offer.cash_total),
                rounded(offer.trade_total)
            ),
            DealSummary::Settled(result) => result.balance().to_string(),
        }
    }
}

impl fmt::Display for DealSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealSummary::NoDeal => writeln!(f, "{}", self.headline()),
            DealSummary::VendorOnly { lines, .. } => {
                writeln!(f, "Vendor is offering")?;
                for line in lines {
                    if line.flat {
                        writeln!(f, "  {:<24} {:>12}", line.label, rounded(line.value))?;
                    } else {
                        writeln!(
                            f,
                            "  {:<24} {} at {}% {:>12}",
                            line.label,
                            rounded(line.value),
                            line.rate.normalize(),
                            rounded(line.payout)
                        )?;
                    }
                }
                writeln!(f, "\n{}", self.headline())
            }
            DealSummary::CollectorOnly(offer) => {
                writeln!(f, "Collector is offering")?;
                for line in &offer.lines {
                    writeln!(
                        f,
                        "  {:<24} {} cash {:>12} / trade {:>12}",
                        line.label,
                        rounded(line.value),
                        rounded(line.cash_amount),
                        rounded(line.trade_amount)
                    )?;
                }
                writeln!(f, "\n{}", self.headline())
            }
            DealSummary::Settled(result) => write!(f, "{}", result),
        }
    }
}
