use crate::allocation::settlement::{Balance, SettlementResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named trading session (a show, a store visit) that groups deals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A settled deal as handed to the deals store.
///
/// Records are built from a [`SettlementResult`] and are immutable once
/// created. Writing them anywhere is the caller's business.
///
/// # Examples
///
/// ```
/// use trade_settlement::allocation::settlement::SettlementEngine;
/// use trade_settlement::core::deal::{DealRecord, Session};
/// use trade_settlement::core::item::{CollectorItem, VendorItem};
/// use rust_decimal_macros::dec;
///
/// let session = Session::new("Saturday show");
/// let result = SettlementEngine::settle(
///     &[VendorItem::new(dec!(50), dec!(100))],
///     &[CollectorItem::new(dec!(100), dec!(50), dec!(100))],
/// );
///
/// let record = DealRecord::from_settlement(&session, &result);
/// assert_eq!(record.deal_status(), "vendor_owes");
/// assert_eq!(record.owed_amount(), dec!(25));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    id: Uuid,
    session_id: Uuid,
    vendor_name: Option<String>,
    collector_name: Option<String>,
    vendor_total: Decimal,
    collector_total: Decimal,
    deal_status: String,
    owed_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl DealRecord {
    pub fn from_settlement(session: &Session, result: &SettlementResult) -> Self {
        let balance = result.balance();
        Self {
            id: Uuid::new_v4(),
            session_id: session.id(),
            vendor_name: None,
            collector_name: None,
            vendor_total: result.vendor_total,
            collector_total: result.collector_total,
            deal_status: status_for(&balance).to_string(),
            owed_amount: balance.amount(),
            created_at: Utc::now(),
        }
    }

    pub fn with_vendor_name(mut self, name: impl Into<String>) -> Self {
        self.vendor_name = Some(name.into());
        self
    }

    pub fn with_collector_name(mut self, name: impl Into<String>) -> Self {
        self.collector_name = Some(name.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor_name.as_deref()
    }

    pub fn collector_name(&self) -> Option<&str> {
        self.collector_name.as_deref()
    }

    pub fn vendor_total(&self) -> Decimal {
        self.vendor_total
    }

    pub fn collector_total(&self) -> Decimal {
        self.collector_total
    }

    pub fn deal_status(&self) -> &str {
        &self.deal_status
    }

    pub fn owed_amount(&self) -> Decimal {
        self.owed_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn status_for(balance: &Balance) -> &'static str {
    match balance {
        Balance::Even => "even",
        Balance::CollectorOwes(_) => "collector_owes",
        Balance::VendorOwes(_) => "vendor_owes",
    }
}
