//! The single domain entity: one cash-flow event extracted from a statement.

use serde::{Deserialize, Serialize};

/// Description the analyzer uses for a statement's starting balance.
/// Never a real transaction; excluded from every aggregate.
pub const OPENING_BALANCE: &str = "Opening Balance";

/// Bucket used for expenses that carry no category label.
pub const OTHER_CATEGORY: &str = "Other";

/// A validated transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Display label, not parsed into a calendar type
    pub date: String,
    pub description: String,
    /// Label assigned by the remote analyzer
    pub category: String,
    /// Positive = income/credit, negative = expense/debit
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount,
        }
    }

    /// True for the starting-balance pseudo record.
    pub fn is_opening_balance(&self) -> bool {
        self.description == OPENING_BALANCE
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Whether this record may contribute to any aggregate.
    pub fn counts_toward_totals(&self) -> bool {
        !self.is_opening_balance() && self.amount.is_finite()
    }

    /// Category label, or `"Other"` when the label is blank.
    pub fn category_or_other(&self) -> &str {
        if self.category.is_empty() {
            OTHER_CATEGORY
        } else {
            &self.category
        }
    }
}
