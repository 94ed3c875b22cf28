//! lens-core: transaction entity, statement handle, and the aggregation engine.
//!
//! Everything here is pure. No I/O, no clocks, no logging.

pub mod statement;
pub mod summary;
pub mod transaction;

pub use statement::{StatementFile, StatementKind};
pub use summary::{
    CategoryTotal, CategoryTotals, Dashboard, Summary, compute_category_totals, compute_summary,
};
pub use transaction::{OPENING_BALANCE, OTHER_CATEGORY, Transaction};
