//! Loosely-shaped financial records (expenses, invoices, payroll) and the
//! ordered field lookups that turn them into dated amounts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category assigned when a record carries none.
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// Date fields, highest precedence first.
pub const DATE_FIELDS: [RecordField; 3] = [
    RecordField::Date,
    RecordField::PaymentDate,
    RecordField::InvoiceDate,
];

/// Amount fields, highest precedence first.
pub const AMOUNT_FIELDS: [RecordField; 4] = [
    RecordField::Amount,
    RecordField::AmountPaid,
    RecordField::Salary,
    RecordField::AmountInclGst,
];

/// Category fields, highest precedence first.
pub const CATEGORY_FIELDS: [RecordField; 2] =
    [RecordField::SuggestedCategory, RecordField::Category];

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Raw JSON value of a single record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Date,
    PaymentDate,
    InvoiceDate,
    Amount,
    AmountPaid,
    Salary,
    AmountInclGst,
    SuggestedCategory,
    Category,
}

impl RecordField {
    /// JSON key the field is read from.
    pub fn key(self) -> &'static str {
        match self {
            RecordField::Date => "date",
            RecordField::PaymentDate => "paymentDate",
            RecordField::InvoiceDate => "invoiceDate",
            RecordField::Amount => "amount",
            RecordField::AmountPaid => "amountPaid",
            RecordField::Salary => "salary",
            RecordField::AmountInclGst => "amountInclGST",
            RecordField::SuggestedCategory => "suggestedCategory",
            RecordField::Category => "category",
        }
    }
}

/// A historical expense or income entry as supplied by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<FieldValue>,
    #[serde(
        default,
        rename = "amountInclGST",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_incl_gst: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FieldValue>,
}

impl HistoricalRecord {
    /// Convenience constructor for a dated `amount` entry.
    pub fn new(date: &str, amount: f64) -> Self {
        Self {
            date: Some(date.into()),
            amount: Some(amount.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn field(&self, field: RecordField) -> Option<&FieldValue> {
        match field {
            RecordField::Date => self.date.as_ref(),
            RecordField::PaymentDate => self.payment_date.as_ref(),
            RecordField::InvoiceDate => self.invoice_date.as_ref(),
            RecordField::Amount => self.amount.as_ref(),
            RecordField::AmountPaid => self.amount_paid.as_ref(),
            RecordField::Salary => self.salary.as_ref(),
            RecordField::AmountInclGst => self.amount_incl_gst.as_ref(),
            RecordField::SuggestedCategory => self.suggested_category.as_ref(),
            RecordField::Category => self.category.as_ref(),
        }
    }
}

/// First date field that parses, in [`DATE_FIELDS`] order.
pub fn resolve_date(record: &HistoricalRecord) -> Option<NaiveDate> {
    DATE_FIELDS
        .iter()
        .filter_map(|field| record.field(*field))
        .find_map(parse_date)
}

/// First amount field that parses to a finite number, in [`AMOUNT_FIELDS`] order.
///
/// A record without any amount field counts as zero; one whose amount fields
/// are all unparseable yields `None` and is skipped by the aggregators.
pub fn resolve_amount(record: &HistoricalRecord) -> Option<f64> {
    let mut present = false;
    for value in AMOUNT_FIELDS.iter().filter_map(|field| record.field(*field)) {
        present = true;
        if let Some(amount) = parse_amount(value) {
            return Some(amount);
        }
    }
    if present {
        None
    } else {
        Some(0.0)
    }
}

pub fn resolve_category(record: &HistoricalRecord) -> String {
    CATEGORY_FIELDS
        .iter()
        .filter_map(|field| match record.field(*field) {
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        })
        .next()
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// Converts an arbitrary JSON document into records.
///
/// `null` and non-array documents mean "no history". Elements that are not
/// record-shaped become empty records, which still count toward the history
/// length but never contribute to a monthly total.
pub fn records_from_json(document: Value) -> Option<Vec<HistoricalRecord>> {
    match document {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
                    _ => HistoricalRecord::default(),
                })
                .collect(),
        ),
        _ => None,
    }
}

fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Text(text) => parse_date_text(text.trim()),
        FieldValue::Number(millis) if millis.is_finite() => {
            DateTime::<Utc>::from_timestamp_millis(*millis as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

fn parse_amount(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(number) if number.is_finite() => Some(*number),
        FieldValue::Text(text) => parse_leading_number(text),
        _ => None,
    }
}

/// Parses the longest numeric prefix of `text`, so `"42.50 AUD"` reads as 42.5.
fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }
    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
