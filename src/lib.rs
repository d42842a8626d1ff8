//! # trade-settlement
//!
//! Settlement engine for trade-in deals between a vendor and a collector.
//!
//! The vendor lists items at a flat payout percentage; the collector lists
//! items that can be sold for cash or traded in for credit. The engine
//! spends the collector's best trade rates first, splits the one item that
//! would overshoot, sells whatever is left for cash and reports who owes
//! whom.
//!
//! ## Architecture
//!
//! - **core** — Items, parties, percentage helpers, deal records
//! - **allocation** — Valuation primitives, the settlement pass, deal summaries
//! - **config** — Allocation order and other settlement settings
//! - **input** — JSON deal files
//! - **simulation** — Random deal generation

pub mod allocation;
pub mod config;
pub mod core;
pub mod input;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::allocation::settlement::{
        AllocationLine, AllocationMode, Balance, SettlementEngine, SettlementResult,
    };
    pub use crate::allocation::summary::DealSummary;
    pub use crate::allocation::valuation::{collector_only_offer, vendor_total, CollectorOffer};
    pub use crate::config::{AllocationOrder, SettlementConfig};
    pub use crate::core::item::{CollectorItem, VendorItem};
    pub use crate::core::party::Party;
}
