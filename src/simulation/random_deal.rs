//! Random deal generation for benchmarks, property checks and the CLI.

use crate::core::item::{CollectorItem, VendorItem};
use crate::core::percentage::percentage_options;
use crate::input::DealFile;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random deal.
#[derive(Debug, Clone)]
pub struct DealConfig {
    pub vendor_items: usize,
    pub collector_items: usize,
    /// Smallest item value, in whole currency units.
    pub min_value: u32,
    /// Largest item value, in whole currency units.
    pub max_value: u32,
}

impl Default for DealConfig {
    fn default() -> Self {
        Self {
            vendor_items: 5,
            collector_items: 5,
            min_value: 1,
            max_value: 500,
        }
    }
}

/// Generate a random deal.
///
/// Values have cents; percentages come from the standard picker options,
/// and a collector's sell rate never exceeds its trade rate.
pub fn generate_random_deal(config: &DealConfig) -> DealFile {
    let mut rng = rand::thread_rng();
    let options = percentage_options();
    let max_value = config.max_value.max(config.min_value);

    let random_value = |rng: &mut rand::rngs::ThreadRng| {
        let cents = rng.gen_range(u64::from(config.min_value) * 100..=u64::from(max_value) * 100);
        Decimal::new(cents as i64, 2)
    };

    let vendor = (0..config.vendor_items)
        .map(|_| {
            let value = random_value(&mut rng);
            let percentage = options.choose(&mut rng).copied().unwrap_or(Decimal::ONE_HUNDRED);
            VendorItem::new(value, percentage)
        })
        .collect();

    let collector = (0..config.collector_items)
        .map(|_| {
            let value = random_value(&mut rng);
            let a = options.choose(&mut rng).copied().unwrap_or(Decimal::ONE_HUNDRED);
            let b = options.choose(&mut rng).copied().unwrap_or(Decimal::ONE_HUNDRED);
            CollectorItem::new(value, a.min(b), a.max(b))
        })
        .collect();

    DealFile { vendor, collector }
}
