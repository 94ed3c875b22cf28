//! Transaction record validator.
//!
//! The analyzer is untrusted: its body may be any JSON value. Validation is
//! total. Non-arrays yield nothing, malformed elements are dropped, and
//! surviving elements keep the order the analyzer returned them in.

use lens_core::{OPENING_BALANCE, Transaction};
use serde_json::{Map, Value};

/// Why an element was not admitted. Checks run in declaration order and the
/// first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotARecord,
    OpeningBalance,
    InvalidAmount,
    MissingDate,
    MissingDescription,
    MissingCategory,
}

/// Outcome of validating one response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub transactions: Vec<Transaction>,
    /// Number of elements looked at (0 for a non-array body)
    pub inspected: usize,
    /// Index into the response array and the reason it was dropped
    pub rejected: Vec<(usize, Rejection)>,
}

/// Keep every well-formed transaction in `raw`.
pub fn validate(raw: &Value) -> Vec<Transaction> {
    validate_with_report(raw).transactions
}

pub fn validate_with_report(raw: &Value) -> Validation {
    let Some(items) = raw.as_array() else {
        return Validation::default();
    };

    let mut out = Validation {
        inspected: items.len(),
        ..Validation::default()
    };

    for (i, item) in items.iter().enumerate() {
        match admit(item) {
            Ok(t) => out.transactions.push(t),
            Err(r) => out.rejected.push((i, r)),
        }
    }

    out
}

/// Decide whether a single element becomes a [`Transaction`].
pub fn admit(item: &Value) -> Result<Transaction, Rejection> {
    let record = item.as_object().ok_or(Rejection::NotARecord)?;

    if record.get("description").and_then(Value::as_str) == Some(OPENING_BALANCE) {
        return Err(Rejection::OpeningBalance);
    }

    let amount = record
        .get("amount")
        .and_then(Value::as_f64)
        .filter(|a| a.is_finite())
        .ok_or(Rejection::InvalidAmount)?;

    let date = label(record, "date").ok_or(Rejection::MissingDate)?;
    let description = label(record, "description").ok_or(Rejection::MissingDescription)?;
    let category = label(record, "category").ok_or(Rejection::MissingCategory)?;

    Ok(Transaction::new(date, description, category, amount))
}

/// A label must be a JSON string with at least one character. Numbers,
/// booleans and nulls are not coerced.
fn label<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
