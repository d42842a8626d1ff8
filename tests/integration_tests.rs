use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trade_settlement::allocation::settlement::{AllocationMode, Balance, SettlementEngine};
use trade_settlement::allocation::summary::DealSummary;
use trade_settlement::core::deal::{DealRecord, Session};
use trade_settlement::core::item::{CollectorItem, VendorItem};
use trade_settlement::core::party::Party;
use trade_settlement::input::DealFile;

const TOLERANCE: Decimal = dec!(0.000000001);

/// Full pipeline: deal file → summary → settlement → deal record.
#[test]
fn full_pipeline_card_show_deal() {
    let deal = DealFile::from_json(
        r#"{
            "vendor": [
                { "name": "Booster box", "value": "150", "percentage": "100" },
                { "name": "Graded slab", "value": "200", "percentage": "75" }
            ],
            "collector": [
                { "name": "Binder", "value": "100", "sell_percentage": "60", "trade_percentage": "80" },
                { "name": "Vintage holo", "value": "250", "sell_percentage": "70", "trade_percentage": "90" },
                { "name": "Bulk", "value": "40", "sell_percentage": "50", "trade_percentage": "50" }
            ]
        }"#,
    )
    .unwrap();

    let summary = DealSummary::evaluate(&deal.vendor, &deal.collector);
    let result = summary.settlement().expect("both sides have items").clone();

    // Vendor: 150 + 200 × 0.75 = 300 to cover.
    assert_eq!(result.vendor_total, dec!(300));

    // Holo (90%) trades fully for 225, binder (80%) covers the last 75 with
    // 93.75 raw and sells 6.25 raw at 60%, bulk is sold for cash.
    assert_eq!(result.lines.len(), 4);
    assert_eq!(result.lines[0].label, "Vintage holo");
    assert_eq!(result.lines[0].amount, dec!(225));
    assert!(!result.lines[0].is_split);

    let binder = result.lines_for(0);
    assert_eq!(binder.len(), 2);
    assert!(binder.iter().all(|l| l.is_split));
    assert_eq!(binder[0].mode, AllocationMode::Trade);
    assert_eq!(binder[0].portion_value, dec!(93.75));
    assert_eq!(binder[0].amount, dec!(75));
    assert_eq!(binder[1].mode, AllocationMode::Cash);
    assert_eq!(binder[1].portion_value, dec!(6.25));
    assert_eq!(binder[1].amount, dec!(3.75));

    let bulk = result.lines_for(2);
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk[0].mode, AllocationMode::Cash);
    assert_eq!(bulk[0].amount, dec!(20));

    assert_eq!(result.trade_used(), dec!(300));
    assert_eq!(result.cash_raised(), dec!(23.75));
    assert_eq!(result.collector_total, dec!(323.75));
    assert_eq!(result.balance(), Balance::VendorOwes(dec!(23.75)));

    let session = Session::new("Saturday show");
    let record = DealRecord::from_settlement(&session, &result);
    assert_eq!(record.deal_status(), "vendor_owes");
    assert_eq!(record.owed_amount(), dec!(23.75));
}

/// The balance-only view is a projection of the full result.
#[test]
fn balance_projection_matches_totals() {
    let vendor = vec![VendorItem::new(dec!(80), dec!(90))];
    let collector = vec![
        CollectorItem::new(dec!(30), dec!(60), dec!(70)),
        CollectorItem::new(dec!(20), dec!(65), dec!(75)),
    ];
    let result = SettlementEngine::settle(&vendor, &collector);

    let difference = result.vendor_total - result.collector_total;
    assert_eq!(result.balance(), Balance::from_difference(difference));
    assert_eq!(result.owed_by, Some(Party::Collector));
    assert_eq!(result.owed_amount, difference);
}

#[test]
fn settlement_result_serializes() {
    let result = SettlementEngine::settle(
        &[VendorItem::new(dec!(50), dec!(100))],
        &[CollectorItem::new(dec!(100), dec!(50), dec!(100))],
    );
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["owed_by"], "vendor");
    assert_eq!(json["lines"][0]["mode"], "trade");
    assert_eq!(json["lines"][1]["is_split"], true);
    assert!(json.get("vendor_lines").is_some());
}

#[test]
fn empty_deal_is_not_a_settlement() {
    let summary = DealSummary::evaluate(&[], &[]);
    assert!(summary.is_no_deal());
    assert!(summary.settlement().is_none());
    assert_eq!(summary.balance(), None);
}

#[test]
fn coverage_percent_reports_overshoot() {
    let result = SettlementEngine::settle(
        &[VendorItem::new(dec!(50), dec!(100))],
        &[CollectorItem::new(dec!(100), dec!(50), dec!(100))],
    );
    approx::assert_relative_eq!(result.coverage_percent(), 150.0, epsilon = 1e-9);
}

/// Mid-edit input: blank values and a zero trade rate never fail.
#[test]
fn partial_input_degrades_to_zero() {
    let deal = DealFile::from_json(
        r#"{
            "vendor": [{ "name": "typing..." }, { "value": "10", "percentage": "50" }],
            "collector": [{ "value": "10", "sell_percentage": "40", "trade_percentage": "0" }, {}]
        }"#,
    )
    .unwrap();

    let result = SettlementEngine::settle(&deal.vendor, &deal.collector);
    assert_eq!(result.vendor_total, dec!(5));
    assert_eq!(result.lines.len(), 2);
    assert_eq!(result.collector_total, dec!(4));
    assert_eq!(result.balance(), Balance::CollectorOwes(dec!(1)));
    for line in &result.lines {
        assert!(line.portion_value >= Decimal::ZERO);
    }
}

/// A split at 82.5% leaves a repeating decimal; totals still agree whichever
/// order the line amounts are added in.
#[test]
fn fractional_split_totals_agree_in_any_order() {
    let vendor = vec![VendorItem::new(dec!(100), dec!(100))];
    let collector = vec![
        CollectorItem::new(dec!(100), dec!(60), dec!(82.5)),
        CollectorItem::new(dec!(10), dec!(50), dec!(50)),
        CollectorItem::new(dec!(30), dec!(70), dec!(95)),
        CollectorItem::new(dec!(7.77), dec!(70), dec!(52.5)),
        CollectorItem::new(dec!(20), dec!(70), dec!(97.5)),
    ];
    let result = SettlementEngine::settle(&vendor, &collector);

    // 19.5 + 28.5 traded in full, 52 of the 82.5% item, two items sold.
    assert_eq!(result.split_count(), 1);
    assert_eq!(result.trade_used(), dec!(100));
    let cash_lines = result
        .lines
        .iter()
        .filter(|l| l.mode == AllocationMode::Cash)
        .count();
    assert_eq!(cash_lines, 3);

    let split = result.lines_for(0);
    let portions: Decimal = split.iter().map(|l| l.portion_value).sum();
    assert!((portions - dec!(100)).abs() <= TOLERANCE);

    let per_item: Decimal = (0..collector.len())
        .map(|i| result.lines_for(i).iter().map(|l| l.amount).sum::<Decimal>())
        .sum();
    assert!((result.collector_total - per_item).abs() <= TOLERANCE);

    let reversed: Decimal = result.lines.iter().rev().map(|l| l.amount).sum();
    assert!((result.collector_total - reversed).abs() <= TOLERANCE);

    assert!((result.collector_total - dec!(132.62081818181818)).abs() <= TOLERANCE);
}
