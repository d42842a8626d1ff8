use crate::core::party::Party;
use crate::core::percentage::{
    DEFAULT_SELL_PERCENTAGE, DEFAULT_TRADE_PERCENTAGE, DEFAULT_VENDOR_PERCENTAGE,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors a supplier may report when checking item input.
///
/// The settlement engine never returns these: it computes with whatever it
/// is given. They exist for the code that builds item lists from user input.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("{party} item {index} has negative value {value}")]
    NegativeValue {
        party: Party,
        index: usize,
        value: Decimal,
    },
    #[error("{party} item {index} has {field} {percentage}, expected 0 to 100")]
    PercentageOutOfRange {
        party: Party,
        index: usize,
        field: &'static str,
        percentage: Decimal,
    },
}

fn check_value(party: Party, index: usize, value: Decimal) -> Result<(), ItemError> {
    if value < Decimal::ZERO {
        return Err(ItemError::NegativeValue {
            party,
            index,
            value,
        });
    }
    Ok(())
}

fn check_percentage(
    party: Party,
    index: usize,
    field: &'static str,
    percentage: Decimal,
) -> Result<(), ItemError> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(ItemError::PercentageOutOfRange {
            party,
            index,
            field,
            percentage,
        });
    }
    Ok(())
}

/// Display label for an item: its name, or `Item N` for the 1-based
/// position when unnamed or blank.
pub fn label(name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("Item {}", index + 1),
    }
}

fn default_vendor_percentage() -> Decimal {
    DEFAULT_VENDOR_PERCENTAGE
}

fn default_sell_percentage() -> Decimal {
    DEFAULT_SELL_PERCENTAGE
}

fn default_trade_percentage() -> Decimal {
    DEFAULT_TRADE_PERCENTAGE
}

/// Read an amount typed into a form field: a number, a numeric string, or
/// nothing at all (`null` or a blank string), which yields `None`.
fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> serde::de::Visitor<'de> for AmountVisitor {
        type Value = Option<Decimal>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a numeric string, blank or null")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            Decimal::from_str(value)
                .map(Some)
                .map_err(|e| E::custom(format!("invalid amount '{}': {}", value, e)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(Decimal::from(value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(Decimal::from(value)))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if !value.is_finite() {
                return Ok(None);
            }
            self.visit_str(&value.to_string())
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

fn value_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_amount(deserializer)?.unwrap_or_default())
}

fn vendor_percentage_or_default<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_amount(deserializer)?.unwrap_or(DEFAULT_VENDOR_PERCENTAGE))
}

fn sell_percentage_or_default<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_amount(deserializer)?.unwrap_or(DEFAULT_SELL_PERCENTAGE))
}

fn trade_percentage_or_default<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_amount(deserializer)?.unwrap_or(DEFAULT_TRADE_PERCENTAGE))
}

/// An item the vendor puts into the deal, paid out at one flat percentage.
///
/// # Examples
///
/// ```
/// use trade_settlement::core::item::VendorItem;
/// use rust_decimal_macros::dec;
///
/// let binder = VendorItem::new(dec!(120), dec!(90)).with_name("Binder");
/// assert_eq!(binder.payout(), dec!(108));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw value. Missing, `null` or blank input counts as zero.
    #[serde(default, deserialize_with = "value_or_zero")]
    pub value: Decimal,
    #[serde(
        default = "default_vendor_percentage",
        deserialize_with = "vendor_percentage_or_default"
    )]
    pub percentage: Decimal,
}

impl VendorItem {
    pub fn new(value: Decimal, percentage: Decimal) -> Self {
        Self {
            name: None,
            value,
            percentage,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(&self, index: usize) -> String {
        label(self.name.as_deref(), index)
    }

    /// Whether the item is paid out at face value.
    pub fn is_flat(&self) -> bool {
        self.percentage == Decimal::ONE_HUNDRED
    }

    /// Check value and percentage ranges. `index` is used in the error only.
    pub fn validate(&self, index: usize) -> Result<(), ItemError> {
        check_value(Party::Vendor, index, self.value)?;
        check_percentage(Party::Vendor, index, "percentage", self.percentage)
    }
}

impl Default for VendorItem {
    fn default() -> Self {
        Self::new(Decimal::ZERO, DEFAULT_VENDOR_PERCENTAGE)
    }
}

/// An item the collector puts into the deal.
///
/// It can be sold for cash at `sell_percentage` or applied as trade credit
/// at `trade_percentage`. Trade usually pays better than cash, but nothing
/// here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "value_or_zero")]
    pub value: Decimal,
    #[serde(
        default = "default_sell_percentage",
        deserialize_with = "sell_percentage_or_default"
    )]
    pub sell_percentage: Decimal,
    #[serde(
        default = "default_trade_percentage",
        deserialize_with = "trade_percentage_or_default"
    )]
    pub trade_percentage: Decimal,
}

impl CollectorItem {
    pub fn new(value: Decimal, sell_percentage: Decimal, trade_percentage: Decimal) -> Self {
        Self {
            name: None,
            value,
            sell_percentage,
            trade_percentage,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(&self, index: usize) -> String {
        label(self.name.as_deref(), index)
    }

    pub fn validate(&self, index: usize) -> Result<(), ItemError> {
        check_value(Party::Collector, index, self.value)?;
        check_percentage(
            Party::Collector,
            index,
            "sell percentage",
            self.sell_percentage,
        )?;
        check_percentage(
            Party::Collector,
            index,
            "trade percentage",
            self.trade_percentage,
        )
    }
}

impl Default for CollectorItem {
    fn default() -> Self {
        Self::new(
            Decimal::ZERO,
            DEFAULT_SELL_PERCENTAGE,
            DEFAULT_TRADE_PERCENTAGE,
        )
    }
}

/// Validate a whole vendor list, stopping at the first bad item.
pub fn validate_vendor_items(items: &[VendorItem]) -> Result<(), ItemError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| item.validate(index))
}

/// Validate a whole collector list, stopping at the first bad item.
pub fn validate_collector_items(items: &[CollectorItem]) -> Result<(), ItemError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| item.validate(index))
}
