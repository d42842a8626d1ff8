//! Basic trade-in settlement example.
//!
//! Walks through the four shapes a deal can take as items are added.

use rust_decimal_macros::dec;
use trade_settlement::allocation::summary::DealSummary;
use trade_settlement::core::deal::{DealRecord, Session};
use trade_settlement::core::item::{CollectorItem, VendorItem};

fn main() {
    println!("╔════════════════════════════════════════════════╗");
    println!("║  trade-settlement: Basic Settlement Example    ║");
    println!("╚════════════════════════════════════════════════╝\n");

    let mut vendor: Vec<VendorItem> = Vec::new();
    let mut collector: Vec<CollectorItem> = Vec::new();

    println!("━━━ Step 1: Empty table ━━━\n");
    println!("{}", DealSummary::evaluate(&vendor, &collector));

    println!("━━━ Step 2: Collector lays out items ━━━\n");
    collector.push(CollectorItem::new(dec!(100), dec!(60), dec!(80)).with_name("Binder"));
    collector.push(CollectorItem::new(dec!(250), dec!(70), dec!(90)).with_name("Vintage holo"));
    collector.push(CollectorItem::new(dec!(40), dec!(50), dec!(50)).with_name("Bulk"));
    println!("{}", DealSummary::evaluate(&vendor, &collector));

    println!("━━━ Step 3: Vendor picks items ━━━\n");
    vendor.push(VendorItem::new(dec!(150), dec!(100)).with_name("Booster box"));
    vendor.push(VendorItem::new(dec!(200), dec!(75)).with_name("Graded slab"));
    let summary = DealSummary::evaluate(&vendor, &collector);
    println!("{}", summary);

    if let Some(result) = summary.settlement() {
        println!("━━━ Deal record ━━━\n");
        let session = Session::new("Saturday show");
        let record = DealRecord::from_settlement(&session, result)
            .with_vendor_name("Sam")
            .with_collector_name("Ari");
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("cannot serialize record: {}", e),
        }
    }
}
