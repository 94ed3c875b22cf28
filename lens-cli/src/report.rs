//! Terminal dashboard: summary cards, spending breakdown, transaction table.
//!
//! Amounts stay full-precision f64 until they reach this module; rounding to
//! paise and Indian digit grouping happen here only.

use lens_analyzer::SessionNotice;
use lens_core::{CategoryTotal, Dashboard, Summary, Transaction};
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;
const DESC_WIDTH: usize = 34;
const CAT_WIDTH: usize = 16;

/// `₹12,34,567.89`, with a leading `-` for negative values.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹-".to_string();
    }
    let paise = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    format!(
        "{sign}₹{}.{:02}",
        group_indian(&(paise / 100).to_string()),
        paise % 100
    )
}

/// Lakh/crore grouping: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Total income     {:>18}", format_inr(summary.total_income));
    let _ = writeln!(out, "  Total expenses   {:>18}", format_inr(summary.total_expenses));
    let _ = writeln!(out, "  Net savings      {:>18}", format_inr(summary.net_savings));
    out
}

/// Largest spend first. Shares are of total spend.
pub fn render_breakdown<'a>(totals: impl IntoIterator<Item = &'a CategoryTotal>) -> String {
    let mut rows: Vec<&CategoryTotal> = totals.into_iter().collect();
    if rows.is_empty() {
        return "  (no expenses)\n".to_string();
    }
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));

    let grand: f64 = rows.iter().map(|r| r.total).sum();
    let mut out = String::new();
    for r in rows {
        let share = if grand > 0.0 { r.total / grand } else { 0.0 };
        let bar = "█".repeat((share * BAR_WIDTH as f64).round() as usize);
        let _ = writeln!(
            out,
            "  {:<cw$} {:>16} {:>6.1}%  {}",
            truncate(&r.category, CAT_WIDTH),
            format_inr(r.total),
            share * 100.0,
            bar,
            cw = CAT_WIDTH
        );
    }
    out
}

/// `max_rows == 0` prints every row.
pub fn render_table(transactions: &[Transaction], max_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<12} {:<dw$} {:<cw$} {:>16}",
        "DATE",
        "DESCRIPTION",
        "CATEGORY",
        "AMOUNT",
        dw = DESC_WIDTH,
        cw = CAT_WIDTH
    );

    let limit = if max_rows == 0 {
        transactions.len()
    } else {
        max_rows.min(transactions.len())
    };

    for t in &transactions[..limit] {
        let _ = writeln!(
            out,
            "  {:<12} {:<dw$} {:<cw$} {:>16}",
            truncate(&t.date, 12),
            truncate(&t.description, DESC_WIDTH),
            truncate(&t.category, CAT_WIDTH),
            format_inr(t.amount),
            dw = DESC_WIDTH,
            cw = CAT_WIDTH
        );
    }

    let hidden = transactions.len() - limit;
    if hidden > 0 {
        let _ = writeln!(out, "  … {hidden} more (pass --rows 0 to show all)");
    }
    out
}

pub fn render_dashboard(dash: &Dashboard, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str("Summary\n");
    out.push_str(&render_summary(&dash.summary));
    out.push_str("\nSpending by category\n");
    out.push_str(&render_breakdown(dash.category_totals.iter()));
    let _ = writeln!(out, "\nTransactions ({})", dash.transactions.len());
    out.push_str(&render_table(&dash.transactions, max_rows));
    out
}

/// `--json` output: the dashboard plus the informational notice, so an
/// unreadable statement is distinguishable from one with no activity.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a str,
    pub notice: Option<String>,
    pub informational: bool,
    #[serde(flatten)]
    pub dashboard: &'a Dashboard,
}

impl<'a> JsonReport<'a> {
    pub fn new(file: &'a str, dashboard: &'a Dashboard, notice: Option<&SessionNotice>) -> Self {
        Self {
            file,
            notice: notice.map(|n| n.to_string()),
            informational: notice.is_some_and(SessionNotice::is_informational),
            dashboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(5.5), "₹5.50");
        assert_eq!(format_inr(999.999), "₹1,000.00");
        assert_eq!(format_inr(50000.0), "₹50,000.00");
        assert_eq!(format_inr(-1500.0), "-₹1,500.00");
        assert_eq!(format_inr(123456.78), "₹1,23,456.78");
        assert_eq!(format_inr(12345678.9), "₹1,23,45,678.90");
        assert_eq!(format_inr(-0.001), "₹0.00");
        assert_eq!(format_inr(f64::NAN), "₹-");
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("1"), "1");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("100000"), "1,00,000");
        assert_eq!(group_indian("1000000000"), "1,00,00,00,000");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Food", 16), "Food");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_breakdown_sorted_by_spend() {
        let dash = Dashboard::from_transactions(vec![
            Transaction::new("2024-01-01", "Tea", "Food", -100.0),
            Transaction::new("2024-01-02", "Rent", "Rent/Mortgage", -300.0),
        ]);
        let text = render_breakdown(dash.category_totals.iter());
        let rent = text.find("Rent/Mortgage").unwrap();
        let food = text.find("Food").unwrap();
        assert!(rent < food);
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
    }

    #[test]
    fn test_breakdown_without_expenses() {
        assert_eq!(render_breakdown(Vec::<&CategoryTotal>::new()), "  (no expenses)\n");
    }

    #[test]
    fn test_table_row_limit() {
        let txns: Vec<Transaction> = (1..=5)
            .map(|i| Transaction::new(format!("2024-01-0{i}"), format!("Item {i}"), "Food", -(i as f64)))
            .collect();

        let limited = render_table(&txns, 2);
        assert!(limited.contains("Item 2"));
        assert!(!limited.contains("Item 3"));
        assert!(limited.contains("3 more"));

        let all = render_table(&txns, 0);
        assert!(all.contains("Item 5"));
        assert!(!all.contains("more"));
    }

    #[test]
    fn test_dashboard_sections() {
        let dash = Dashboard::from_transactions(vec![
            Transaction::new("2024-01-01", "Salary", "Income", 50000.0),
            Transaction::new("2024-01-03", "Groceries", "Food", -1500.0),
        ]);
        let text = render_dashboard(&dash, 50);
        assert!(text.contains("Total income"));
        assert!(text.contains("₹50,000.00"));
        assert!(text.contains("-₹1,500.00"));
        assert!(text.contains("₹48,500.00"));
        assert!(text.contains("Transactions (2)"));
    }

    #[test]
    fn test_json_report_carries_empty_result_notice() {
        let dash = Dashboard::default();
        let report = JsonReport::new("jan.pdf", &dash, Some(&SessionNotice::NoTransactions));
        let v = serde_json::to_value(&report).unwrap();

        assert_eq!(v["file"], "jan.pdf");
        assert_eq!(v["informational"], true);
        assert_eq!(
            v["notice"],
            "No valid transactions could be extracted from this statement."
        );
        assert_eq!(v["transactions"], serde_json::json!([]));
        assert_eq!(v["category_totals"], serde_json::json!({}));
    }

    #[test]
    fn test_json_report_without_notice() {
        let dash = Dashboard::from_transactions(vec![Transaction::new(
            "2024-01-01",
            "Salary",
            "Income",
            50000.0,
        )]);
        let v = serde_json::to_value(JsonReport::new("jan.pdf", &dash, None)).unwrap();

        assert!(v["notice"].is_null());
        assert_eq!(v["informational"], false);
        assert_eq!(v["summary"]["net_savings"], 50000.0);
        assert_eq!(v["transactions"].as_array().map(Vec::len), Some(1));
    }
}
