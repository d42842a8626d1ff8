use crate::allocation::total;
use crate::core::item::{CollectorItem, VendorItem};
use crate::core::percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

impl VendorItem {
    /// What the vendor is paid for this item: `value × percentage / 100`.
    pub fn payout(&self) -> Decimal {
        percentage::apply(self.value, self.percentage)
    }
}

impl CollectorItem {
    /// Proceeds of selling the whole item for cash.
    pub fn cash_value(&self) -> Decimal {
        percentage::apply(self.value, self.sell_percentage)
    }

    /// Credit earned by trading in the whole item.
    pub fn trade_value(&self) -> Decimal {
        percentage::apply(self.value, self.trade_percentage)
    }
}

/// Total the collector must cover: the sum of all vendor payouts.
pub fn vendor_total(items: &[VendorItem]) -> Decimal {
    total(items.iter().map(VendorItem::payout))
}

/// One collector item valued both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferLine {
    pub source_index: usize,
    pub label: String,
    pub value: Decimal,
    pub cash_amount: Decimal,
    pub trade_amount: Decimal,
}

/// What the collector's items are worth when there is nothing to balance
/// against.
///
/// The two totals are alternatives, not a sum: the collector either sells
/// everything for `cash_total` or trades everything in for `trade_total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorOffer {
    pub cash_total: Decimal,
    pub trade_total: Decimal,
    pub lines: Vec<OfferLine>,
}

impl CollectorOffer {
    /// Extra value the collector gets by trading instead of selling.
    pub fn trade_premium(&self) -> Decimal {
        self.trade_total.saturating_sub(self.cash_total)
    }
}

/// Value every collector item for cash and for trade, without allocating.
pub fn collector_only_offer(items: &[CollectorItem]) -> CollectorOffer {
    let lines: Vec<OfferLine> = items
        .iter()
        .enumerate()
        .map(|(source_index, item)| OfferLine {
            source_index,
            label: item.label(source_index),
            value: item.value,
            cash_amount: item.cash_value(),
            trade_amount: item.trade_value(),
        })
        .collect();

    CollectorOffer {
        cash_total: total(lines.iter().map(|l| l.cash_amount)),
        trade_total: total(lines.iter().map(|l| l.trade_amount)),
        lines,
    }
}

/// One vendor item as shown in a summary.
///
/// `flat` lines are paid at 100% and display as their bare value; the rest
/// show value, rate and payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorLine {
    pub source_index: usize,
    pub label: String,
    pub value: Decimal,
    pub rate: Decimal,
    pub payout: Decimal,
    pub flat: bool,
}

/// Summary lines for the vendor's side, in input order.
pub fn vendor_lines(items: &[VendorItem]) -> Vec<VendorLine> {
    items
        .iter()
        .enumerate()
        .map(|(source_index, item)| VendorLine {
            source_index,
            label: item.label(source_index),
            value: item.value,
            rate: item.percentage,
            payout: item.payout(),
            flat: item.is_flat(),
        })
        .collect()
}
