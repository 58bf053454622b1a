use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};

/// Clock abstracts access to the current timestamp so forecasts remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Pins the clock to midnight UTC of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(DateTime::from_naive_utc_and_offset(
            date.and_time(NaiveTime::default()),
            Utc,
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Formats the `YYYY-MM` bucket a date belongs to. The year is padded to four
/// digits so keys sort chronologically as strings.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// First day of the month `months` after the month containing `today`.
///
/// Anchoring on the first of the month means a run on Jan 31 labels February
/// rather than overflowing into March the way a plain "today plus N months"
/// date would. That difference is flagged for product review.
pub fn months_ahead(today: NaiveDate, months: u32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_add_months(Months::new(months)).unwrap_or(first)
}
