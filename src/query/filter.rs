//! Filter expressions
//!
//! The typed predicate a query string translates into, evaluated directly
//! against JSON documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equals
    #[serde(rename = "eq")]
    Eq,

    /// Greater than
    #[serde(rename = "gt")]
    Gt,

    /// Greater than or equal
    #[serde(rename = "gte")]
    Gte,

    /// Less than
    #[serde(rename = "lt")]
    Lt,

    /// Less than or equal
    #[serde(rename = "lte")]
    Lte,

    /// Value in list
    #[serde(rename = "in")]
    In,
}

impl FilterOperator {
    /// Parse an operator name from a `field[op]` qualifier. Unknown names
    /// return None so they never silently alter a filter.
    pub fn from_qualifier(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(FilterOperator::Eq),
            "gt" => Some(FilterOperator::Gt),
            "gte" => Some(FilterOperator::Gte),
            "lt" => Some(FilterOperator::Lt),
            "lte" => Some(FilterOperator::Lte),
            "in" => Some(FilterOperator::In),
            _ => None,
        }
    }

    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
        }
    }
}

/// A filter expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterExpr {
    /// Field to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: Value,
}

impl FilterExpr {
    /// Create a new filter expression
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = match doc.get(&self.field) {
            Some(v) => v,
            None => return false,
        };

        match self.operator {
            FilterOperator::Eq => field_value == &self.value,
            FilterOperator::Gt => compare_json_values(field_value, &self.value)
                .map(|o| o == std::cmp::Ordering::Greater)
                .unwrap_or(false),
            FilterOperator::Gte => compare_json_values(field_value, &self.value)
                .map(|o| o != std::cmp::Ordering::Less)
                .unwrap_or(false),
            FilterOperator::Lt => compare_json_values(field_value, &self.value)
                .map(|o| o == std::cmp::Ordering::Less)
                .unwrap_or(false),
            FilterOperator::Lte => compare_json_values(field_value, &self.value)
                .map(|o| o != std::cmp::Ordering::Greater)
                .unwrap_or(false),
            FilterOperator::In => {
                if let Some(candidates) = self.value.as_array() {
                    match field_value.as_array() {
                        // Array field: match when any element is listed
                        Some(elements) => elements.iter().any(|e| candidates.contains(e)),
                        None => candidates.contains(field_value),
                    }
                } else {
                    false
                }
            }
        }
    }
}

/// Compare two JSON values for ordering; None when the types are not
/// comparable
fn compare_json_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a_f = a.as_f64()?;
            let b_f = b.as_f64()?;
            a_f.partial_cmp(&b_f)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}
