//! Collapses raw records into calendar-month totals.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    records::{resolve_amount, resolve_category, resolve_date, HistoricalRecord},
    stats::Point,
    time::month_key,
};

/// `YYYY-MM` key to summed amount. Keys sort chronologically.
pub type MonthlyAggregate = BTreeMap<String, f64>;

/// Category name to that category's monthly totals.
pub type CategorizedMonthlyAggregate = BTreeMap<String, MonthlyAggregate>;

pub fn aggregate_monthly_data(records: &[HistoricalRecord]) -> MonthlyAggregate {
    let mut monthly = MonthlyAggregate::new();
    let mut skipped = 0usize;
    for record in records {
        match dated_amount(record) {
            Some((month, amount)) => *monthly.entry(month).or_insert(0.0) += amount,
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, months = monthly.len(), "skipped records without usable date or amount");
    }
    monthly
}

pub fn aggregate_by_category_and_month(records: &[HistoricalRecord]) -> CategorizedMonthlyAggregate {
    let mut categorized = CategorizedMonthlyAggregate::new();
    for record in records {
        let Some((month, amount)) = dated_amount(record) else {
            continue;
        };
        *categorized
            .entry(resolve_category(record))
            .or_default()
            .entry(month)
            .or_insert(0.0) += amount;
    }
    categorized
}

/// Chronological `(index, total)` pairs.
pub fn indexed_points(monthly: &MonthlyAggregate) -> Vec<Point> {
    monthly
        .values()
        .enumerate()
        .map(|(index, total)| (index as f64, *total))
        .collect()
}

fn dated_amount(record: &HistoricalRecord) -> Option<(String, f64)> {
    let date = resolve_date(record)?;
    let amount = resolve_amount(record)?;
    Some((month_key(date), amount))
}
