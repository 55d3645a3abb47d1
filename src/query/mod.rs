//! # Query Translation
//!
//! Converts request query parameters into a structured filter / sort /
//! pagination / projection plan the store can execute. Comparison
//! operators are matched against a typed allow-list parsed out of the
//! `field[op]` key suffix; field names are never rewritten textually.

pub mod filter;
pub mod page;
pub mod params;

pub use filter::{FilterExpr, FilterOperator, FilterSet};
pub use page::{PageBounds, PageRef, Pagination};
pub use params::{ListQuery, SortKey, DEFAULT_LIMIT, DEFAULT_PAGE};
