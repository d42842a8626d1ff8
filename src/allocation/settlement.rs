use crate::allocation::{rounded, total};
use crate::allocation::valuation::{self, VendorLine};
use crate::config::{AllocationOrder, SettlementConfig};
use crate::core::item::{CollectorItem, VendorItem};
use crate::core::party::Party;
use crate::core::percentage;
use log::{debug, trace};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How a slice of a collector item is monetized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    Cash,
    Trade,
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMode::Cash => write!(f, "cash"),
            AllocationMode::Trade => write!(f, "trade"),
        }
    }
}

/// One slice of a collector item consumed in one mode.
///
/// `portion_value` is the raw (pre-percentage) value of the slice and `rate`
/// the percentage applied to it. `amount` is what the slice adds to the
/// collector total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    /// Position of the item in the caller's collector list.
    pub source_index: usize,
    pub label: String,
    pub portion_value: Decimal,
    pub rate: Decimal,
    pub mode: AllocationMode,
    /// Set on both lines of an item that was partly traded and partly sold.
    pub is_split: bool,
    pub amount: Decimal,
}

/// Net balance of a deal, projected from a [`SettlementResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum Balance {
    Even,
    CollectorOwes(Decimal),
    VendorOwes(Decimal),
}

impl Balance {
    /// Classify `vendor_total - collector_total`.
    pub fn from_difference(difference: Decimal) -> Self {
        match difference.cmp(&Decimal::ZERO) {
            Ordering::Greater => Balance::CollectorOwes(difference),
            Ordering::Less => Balance::VendorOwes(difference.abs()),
            Ordering::Equal => Balance::Even,
        }
    }

    pub fn debtor(&self) -> Option<Party> {
        match self {
            Balance::Even => None,
            Balance::CollectorOwes(_) => Some(Party::Collector),
            Balance::VendorOwes(_) => Some(Party::Vendor),
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Balance::Even => Decimal::ZERO,
            Balance::CollectorOwes(amount) | Balance::VendorOwes(amount) => *amount,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Even => write!(f, "Nobody owes anything"),
            Balance::CollectorOwes(amount) => write!(f, "Collector owes {}", rounded(*amount)),
            Balance::VendorOwes(amount) => write!(f, "Vendor owes {}", rounded(*amount)),
        }
    }
}

/// Full outcome of a two-sided settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Sum of vendor payouts: the amount the collector has to cover.
    pub vendor_total: Decimal,
    /// Sum of every allocation line's amount.
    pub collector_total: Decimal,
    /// Vendor items in input order.
    pub vendor_lines: Vec<VendorLine>,
    /// Collector allocation lines in allocation order.
    pub lines: Vec<AllocationLine>,
    /// `None` when the deal is exactly even.
    pub owed_by: Option<Party>,
    pub owed_amount: Decimal,
}

impl SettlementResult {
    /// The net balance without the line breakdown.
    pub fn balance(&self) -> Balance {
        match self.owed_by {
            None => Balance::Even,
            Some(Party::Collector) => Balance::CollectorOwes(self.owed_amount),
            Some(Party::Vendor) => Balance::VendorOwes(self.owed_amount),
        }
    }

    /// Trade credit applied against the vendor total.
    pub fn trade_used(&self) -> Decimal {
        self.mode_total(AllocationMode::Trade)
    }

    /// Cash raised by selling collector items.
    pub fn cash_raised(&self) -> Decimal {
        self.mode_total(AllocationMode::Cash)
    }

    fn mode_total(&self, mode: AllocationMode) -> Decimal {
        total(
            self.lines
                .iter()
                .filter(|l| l.mode == mode)
                .map(|l| l.amount),
        )
    }

    /// Lines produced for one collector item.
    pub fn lines_for(&self, source_index: usize) -> Vec<&AllocationLine> {
        self.lines
            .iter()
            .filter(|l| l.source_index == source_index)
            .collect()
    }

    /// Number of collector items that were split between trade and cash.
    pub fn split_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.is_split && l.mode == AllocationMode::Trade)
            .count()
    }

    /// Collector total as a percentage of the vendor total.
    pub fn coverage_percent(&self) -> f64 {
        if self.vendor_total.is_zero() {
            return 0.0;
        }
        let pct = percentage::safe_div(self.collector_total, self.vendor_total)
            .saturating_mul(Decimal::ONE_HUNDRED);
        pct.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement ===")?;
        writeln!(f, "\nVendor is offering")?;
        for line in &self.vendor_lines {
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
        writeln!(f, "  Vendor total:    {}", rounded(self.vendor_total))?;

        writeln!(f, "\nCollector is offering")?;
        for line in &self.lines {
            let split = if line.is_split { " - split" } else { "" };
            writeln!(
                f,
                "  {}{}: {} at {}% ({}) {:>12}",
                line.label,
                split,
                rounded(line.portion_value),
                line.rate.normalize(),
                line.mode,
                rounded(line.amount)
            )?;
        }
        writeln!(f, "  Collector total: {}", rounded(self.collector_total))?;
        writeln!(f, "\n{}", self.balance())
    }
}

/// The settlement allocation engine.
///
/// Stateless: every call recomputes the whole allocation from its inputs.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Settle with the default configuration (highest trade rate first).
    pub fn settle(vendor: &[VendorItem], collector: &[CollectorItem]) -> SettlementResult {
        Self::settle_with(vendor, collector, &SettlementConfig::default())
    }

    /// Allocate collector items against the vendor total.
    ///
    /// # Algorithm
    ///
    /// 1. Order collector items (by default descending trade percentage,
    ///    stable so ties keep input order).
    /// 2. Walk the items with `remaining` set to the vendor total:
    ///    - nothing left to cover, or no trade rate: the whole item is sold
    ///      for cash;
    ///    - the item's full trade value fits in `remaining`: the whole item
    ///      is traded in;
    ///    - otherwise the item is split: just enough raw value is traded to
    ///      cover `remaining` exactly and the leftover is sold for cash.
    /// 3. The sign of `vendor_total - collector_total` decides who owes.
    ///
    /// For every item the portion values of its lines add up to its value.
    pub fn settle_with(
        vendor: &[VendorItem],
        collector: &[CollectorItem],
        config: &SettlementConfig,
    ) -> SettlementResult {
        let vendor_total = valuation::vendor_total(vendor);
        debug!(
            "settling {} vendor items (total {}) against {} collector items, order {}",
            vendor.len(),
            vendor_total,
            collector.len(),
            config.order
        );

        let mut lines = Vec::with_capacity(collector.len() + 1);
        let mut remaining = vendor_total;

        for index in allocation_order(collector, config.order) {
            let item = &collector[index];
            let label = item.label(index);

            if remaining <= Decimal::ZERO || item.trade_percentage.is_zero() {
                trace!("{}: sold for cash", label);
                lines.push(AllocationLine {
                    source_index: index,
                    label,
                    portion_value: item.value,
                    rate: item.sell_percentage,
                    mode: AllocationMode::Cash,
                    is_split: false,
                    amount: item.cash_value(),
                });
                continue;
            }

            let max_trade = item.trade_value();
            if max_trade <= remaining {
                trace!("{}: fully traded for {}", label, max_trade);
                lines.push(AllocationLine {
                    source_index: index,
                    label,
                    portion_value: item.value,
                    rate: item.trade_percentage,
                    mode: AllocationMode::Trade,
                    is_split: false,
                    amount: max_trade,
                });
                remaining = remaining.saturating_sub(max_trade);
                continue;
            }

            let needed_raw =
                percentage::safe_div(remaining, percentage::fraction(item.trade_percentage));
            let leftover_raw = item.value.saturating_sub(needed_raw).max(Decimal::ZERO);
            trace!(
                "{}: split, {} raw traded for {}, {} raw sold",
                label,
                needed_raw,
                remaining,
                leftover_raw
            );
            lines.push(AllocationLine {
                source_index: index,
                label: label.clone(),
                portion_value: needed_raw,
                rate: item.trade_percentage,
                mode: AllocationMode::Trade,
                is_split: true,
                amount: remaining,
            });
            lines.push(AllocationLine {
                source_index: index,
                label,
                portion_value: leftover_raw,
                rate: item.sell_percentage,
                mode: AllocationMode::Cash,
                is_split: true,
                amount: percentage::apply(leftover_raw, item.sell_percentage),
            });
            remaining = Decimal::ZERO;
        }

        let collector_total = total(lines.iter().map(|l| l.amount));
        let balance = Balance::from_difference(vendor_total.saturating_sub(collector_total));
        debug!(
            "collector total {}, uncovered {}: {}",
            collector_total,
            remaining.max(Decimal::ZERO),
            balance
        );

        SettlementResult {
            vendor_total,
            collector_total,
            vendor_lines: valuation::vendor_lines(vendor),
            lines,
            owed_by: balance.debtor(),
            owed_amount: balance.amount(),
        }
    }
}

/// Indices of `items` in the order they are offered for trade.
fn allocation_order(items: &[CollectorItem], order: AllocationOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    match order {
        AllocationOrder::TradeRateDescending => indices
            .sort_by(|&a, &b| items[b].trade_percentage.cmp(&items[a].trade_percentage)),
        AllocationOrder::TradeRateAscending => indices
            .sort_by(|&a, &b| items[a].trade_percentage.cmp(&items[b].trade_percentage)),
        AllocationOrder::InputOrder => {}
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vendor(total: Decimal) -> Vec<VendorItem> {
        vec![VendorItem::new(total, dec!(100))]
    }

    #[test]
    fn test_full_trade_coverage() {
        let collector = vec![CollectorItem::new(dec!(100), dec!(70), dec!(100))];
        let result = SettlementEngine::settle(&vendor(dec!(100)), &collector);

        assert_eq!(result.lines.len(), 1);
        let line = &result.lines[0];
        assert_eq!(line.mode, AllocationMode::Trade);
        assert_eq!(line.amount, dec!(100));
        assert_eq!(line.portion_value, dec!(100));
        assert!(!line.is_split);
        assert_eq!(result.cash_raised(), Decimal::ZERO);
        assert_eq!(result.owed_by, None);
        assert_eq!(result.balance(), Balance::Even);
    }

    #[test]
    fn test_split_item() {
        let collector = vec![CollectorItem::new(dec!(100), dec!(50), dec!(100))];
        let result = SettlementEngine::settle(&vendor(dec!(50)), &collector);

        assert_eq!(result.lines.len(), 2);
        let trade = &result.lines[0];
        let cash = &result.lines[1];
        assert_eq!(trade.mode, AllocationMode::Trade);
        assert_eq!(trade.portion_value, dec!(50));
        assert_eq!(trade.amount, dec!(50));
        assert!(trade.is_split);
        assert_eq!(cash.mode, AllocationMode::Cash);
        assert_eq!(cash.portion_value, dec!(50));
        assert_eq!(cash.amount, dec!(25));
        assert!(cash.is_split);

        assert_eq!(result.collector_total, dec!(75));
        assert_eq!(result.split_count(), 1);
        assert_eq!(result.balance(), Balance::VendorOwes(dec!(25)));
    }

    #[test]
    fn test_insufficient_supply() {
        let collector = vec![CollectorItem::new(dec!(100), dec!(50), dec!(50))];
        let result = SettlementEngine::settle(&vendor(dec!(200)), &collector);

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].mode, AllocationMode::Trade);
        assert_eq!(result.trade_used(), dec!(50));
        assert_eq!(result.collector_total, dec!(50));
        assert_eq!(result.owed_by, Some(Party::Collector));
        assert_eq!(result.owed_amount, dec!(150));
    }

    #[test]
    fn test_covered_items_are_sold_for_cash() {
        let collector = vec![
            CollectorItem::new(dec!(50), dec!(60), dec!(80)),
            CollectorItem::new(dec!(100), dec!(70), dec!(100)),
        ];
        let result = SettlementEngine::settle(&vendor(dec!(100)), &collector);

        // Highest trade rate goes first and covers everything.
        assert_eq!(result.lines[0].source_index, 1);
        assert_eq!(result.lines[0].mode, AllocationMode::Trade);
        assert_eq!(result.lines[1].source_index, 0);
        assert_eq!(result.lines[1].mode, AllocationMode::Cash);
        assert_eq!(result.lines[1].amount, dec!(30));
        assert_eq!(result.balance(), Balance::VendorOwes(dec!(30)));
    }

    #[test]
    fn test_zero_trade_rate_goes_to_cash() {
        let collector = vec![CollectorItem::new(dec!(40), dec!(50), Decimal::ZERO)];
        let result = SettlementEngine::settle(&vendor(dec!(100)), &collector);

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].mode, AllocationMode::Cash);
        assert_eq!(result.lines[0].portion_value, dec!(40));
        assert_eq!(result.collector_total, dec!(20));
        assert_eq!(result.balance(), Balance::CollectorOwes(dec!(80)));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let collector = vec![
            CollectorItem::new(dec!(10), dec!(50), dec!(80)).with_name("first"),
            CollectorItem::new(dec!(10), dec!(50), dec!(90)).with_name("top"),
            CollectorItem::new(dec!(10), dec!(50), dec!(80)).with_name("second"),
        ];
        let result = SettlementEngine::settle(&vendor(dec!(1000)), &collector);
        let labels: Vec<&str> = result.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_ascending_order_config() {
        let collector = vec![
            CollectorItem::new(dec!(100), dec!(50), dec!(100)),
            CollectorItem::new(dec!(100), dec!(50), dec!(50)),
        ];
        let config = SettlementConfig::with_order(AllocationOrder::TradeRateAscending);
        let ascending = SettlementEngine::settle_with(&vendor(dec!(50)), &collector, &config);
        let descending = SettlementEngine::settle(&vendor(dec!(50)), &collector);

        assert_eq!(ascending.lines[0].source_index, 1);
        assert_eq!(ascending.collector_total, dec!(100));
        assert_eq!(descending.collector_total, dec!(125));
    }

    #[test]
    fn test_split_with_fractional_rate_conserves_value() {
        let collector = vec![CollectorItem::new(dec!(20), dec!(70), dec!(97.5))];
        let result = SettlementEngine::settle(&vendor(dec!(10)), &collector);

        let portions: Decimal = result.lines.iter().map(|l| l.portion_value).sum();
        assert!((portions - dec!(20)).abs() < dec!(0.000000001));
        assert_eq!(result.trade_used(), dec!(10));
    }

    #[test]
    fn test_empty_sides() {
        let result = SettlementEngine::settle(&[], &[]);
        assert!(result.lines.is_empty());
        assert_eq!(result.balance(), Balance::Even);
        assert_eq!(result.coverage_percent(), 0.0);

        let collector = vec![CollectorItem::new(dec!(10), dec!(50), dec!(80))];
        let result = SettlementEngine::settle(&[], &collector);
        assert_eq!(result.balance(), Balance::VendorOwes(dec!(5)));
    }

    #[test]
    fn test_huge_values_saturate_instead_of_panicking() {
        let vendor = vec![
            VendorItem::new(Decimal::MAX, dec!(100)),
            VendorItem::new(Decimal::MAX, dec!(100)),
        ];
        let result = SettlementEngine::settle(&vendor, &[]);
        assert_eq!(result.vendor_total, Decimal::MAX);
        assert_eq!(result.balance(), Balance::CollectorOwes(Decimal::MAX));

        let collector = vec![
            CollectorItem::new(Decimal::MAX, dec!(100), dec!(100)),
            CollectorItem::new(Decimal::MAX, dec!(100), dec!(100)),
        ];
        let result = SettlementEngine::settle(&vendor, &collector);
        assert_eq!(result.trade_used(), Decimal::MAX);
        assert_eq!(result.collector_total, Decimal::MAX);
        assert_eq!(result.balance(), Balance::Even);
        assert_eq!(result.coverage_percent(), 100.0);
    }

    #[test]
    fn test_balance_display() {
        assert_eq!(
            Balance::CollectorOwes(dec!(12.345)).to_string(),
            "Collector owes 12.34"
        );
        assert_eq!(Balance::Even.to_string(), "Nobody owes anything");
    }
}
