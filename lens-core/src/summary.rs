//! Aggregation engine: summary metrics and per-category expense totals.
//!
//! Both computations re-apply the Opening Balance exclusion themselves, so
//! they stay correct when handed a list that never went through validation.
//! Summation runs in input order; results are reproducible for a fixed input.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::transaction::Transaction;

/// Income, expenses and their net for one transaction set.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Summary {
    pub total_income: f64,
    /// Keeps its negative sign
    pub total_expenses: f64,
    pub net_savings: f64,
}

/// Sum amounts by sign. Empty input yields all zeros.
pub fn compute_summary(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for t in transactions.iter().filter(|t| t.counts_toward_totals()) {
        if t.is_income() {
            total_income += t.amount;
        } else if t.is_expense() {
            total_expenses += t.amount;
        }
    }

    Summary {
        total_income,
        total_expenses,
        net_savings: total_income + total_expenses,
    }
}

/// One bucket of the expense breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Sum of absolute expense amounts, always >= 0
    pub total: f64,
}

/// Category -> absolute spend, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every bucket.
    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.total += amount,
            None => self.entries.push(CategoryTotal {
                category: category.to_string(),
                total: amount,
            }),
        }
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.category, &e.total)?;
        }
        map.end()
    }
}

/// Bucket expenses by category, accumulating absolute values.
pub fn compute_category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for t in transactions {
        // Re-checked here even though validated input never carries the sentinel.
        if !t.is_expense() || !t.counts_toward_totals() {
            continue;
        }
        totals.add(t.category_or_other(), t.amount.abs());
    }

    totals
}

/// Everything the display layer needs for one analysis result.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Dashboard {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub category_totals: CategoryTotals,
}

impl Dashboard {
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let summary = compute_summary(&transactions);
        let category_totals = compute_category_totals(&transactions);
        Self {
            transactions,
            summary,
            category_totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::OPENING_BALANCE;

    fn tx(description: &str, category: &str, amount: f64) -> Transaction {
        Transaction::new("2024-01-01", description, category, amount)
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        assert_eq!(compute_summary(&[]), Summary::default());
        assert!(compute_category_totals(&[]).is_empty());
    }

    #[test]
    fn test_salary_only() {
        let txns = vec![tx("Salary", "Income", 50000.0)];
        let s = compute_summary(&txns);
        assert_eq!(s.total_income, 50000.0);
        assert_eq!(s.total_expenses, 0.0);
        assert_eq!(s.net_savings, 50000.0);
        assert!(compute_category_totals(&txns).is_empty());
    }

    #[test]
    fn test_mixed_month() {
        let txns = vec![
            tx("Salary", "Income", 85000.0),
            tx("Rent", "Rent/Mortgage", -25000.0),
            tx("BigBasket", "Groceries", -3200.5),
            tx("Zomato", "Dining Out", -640.0),
            tx("DMart", "Groceries", -1799.5),
            tx("Refund", "Shopping", 1200.0),
        ];
        let s = compute_summary(&txns);
        assert_eq!(s.total_income, 86200.0);
        assert_eq!(s.total_expenses, -30640.0);
        assert_eq!(s.net_savings, 55560.0);

        let totals = compute_category_totals(&txns);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals.get("Rent/Mortgage"), Some(25000.0));
        assert_eq!(totals.get("Groceries"), Some(5000.0));
        assert_eq!(totals.get("Dining Out"), Some(640.0));
        assert_eq!(totals.get("Shopping"), None);
        assert_eq!(totals.grand_total(), 30640.0);
    }

    #[test]
    fn test_category_order_is_first_occurrence() {
        let txns = vec![
            tx("Uber", "Transport", -300.0),
            tx("Netflix", "Subscription", -649.0),
            tx("Ola", "Transport", -250.0),
        ];
        let totals = compute_category_totals(&txns);
        let order: Vec<&str> = totals
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        assert_eq!(order, vec!["Transport", "Subscription"]);
    }

    #[test]
    fn test_opening_balance_excluded_everywhere() {
        let txns = vec![
            tx(OPENING_BALANCE, "Other", 10000.0),
            tx(OPENING_BALANCE, "Other", -10000.0),
            tx("Groceries", "Food", -1500.0),
        ];
        let s = compute_summary(&txns);
        assert_eq!(s.total_income, 0.0);
        assert_eq!(s.total_expenses, -1500.0);
        assert_eq!(s.net_savings, -1500.0);

        let totals = compute_category_totals(&txns);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Food"), Some(1500.0));
        assert_eq!(totals.get("Other"), None);
    }

    #[test]
    fn test_blank_category_buckets_as_other() {
        let txns = vec![tx("ATM", "", -2000.0), tx("Misc", "Other", -100.0)];
        let totals = compute_category_totals(&txns);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Other"), Some(2100.0));
    }

    #[test]
    fn test_non_finite_amounts_ignored() {
        let txns = vec![
            tx("Broken", "Food", f64::NAN),
            tx("Broken", "Food", f64::NEG_INFINITY),
            tx("Tea", "Food", -20.0),
        ];
        let s = compute_summary(&txns);
        assert_eq!(s.total_expenses, -20.0);
        assert_eq!(compute_category_totals(&txns).get("Food"), Some(20.0));
    }

    #[test]
    fn test_net_is_income_plus_expenses() {
        let txns = vec![
            tx("A", "Income", 0.1),
            tx("B", "Food", -0.2),
            tx("C", "Income", 1234.56),
            tx("D", "Transport", -78.9),
        ];
        let s = compute_summary(&txns);
        assert_eq!(s.net_savings, s.total_income + s.total_expenses);
        assert!(s.total_expenses <= 0.0);
        assert!(s.total_income >= 0.0);
    }

    #[test]
    fn test_category_totals_never_negative() {
        let txns = vec![
            tx("A", "Food", -1.0),
            tx("B", "Food", 5.0),
            tx("C", "Health", -0.01),
        ];
        assert!(compute_category_totals(&txns).iter().all(|e| e.total >= 0.0));
    }

    #[test]
    fn test_deterministic() {
        let txns = vec![
            tx("A", "Food", -0.1),
            tx("B", "Food", -0.2),
            tx("C", "Food", -0.3),
        ];
        assert_eq!(compute_category_totals(&txns), compute_category_totals(&txns));
        assert_eq!(compute_summary(&txns), compute_summary(&txns));
    }

    #[test]
    fn test_category_totals_serialize_as_ordered_map() {
        let txns = vec![tx("Uber", "Transport", -300.0), tx("Tea", "Food", -20.0)];
        let json = serde_json::to_string(&compute_category_totals(&txns)).unwrap();
        assert_eq!(json, r#"{"Transport":300.0,"Food":20.0}"#);
    }

    #[test]
    fn test_dashboard_bundles_aggregates() {
        let d = Dashboard::from_transactions(vec![
            tx("Salary", "Income", 40000.0),
            tx("Rent", "Rent/Mortgage", -15000.0),
        ]);
        assert!(!d.is_empty());
        assert_eq!(d.summary.net_savings, 25000.0);
        assert_eq!(d.category_totals.get("Rent/Mortgage"), Some(15000.0));
        assert!(Dashboard::default().is_empty());
    }
}
