//! Query parameter translation
//!
//! Turns the raw key/value set of a request's query string into a
//! `ListQuery`. The reserved keys `select`, `sort`, `page` and `limit` are
//! stripped before filters are built; every remaining key is parsed as
//! `field[op]=value` against the operator allow-list, with a bare key
//! meaning equality.

use std::collections::HashMap;

use serde_json::Value;

use super::filter::{FilterExpr, FilterOperator};

/// Default page when absent or non-numeric
pub const DEFAULT_PAGE: usize = 1;

/// Default page size when absent or non-numeric
pub const DEFAULT_LIMIT: usize = 100;

/// Keys that configure the query rather than filter data
const RESERVED_KEYS: &[&str] = &["select", "sort", "page", "limit"];

/// A sort key; `descending` comes from a leading `-`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    fn parse(part: &str) -> Option<Self> {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        match part.strip_prefix('-') {
            Some(field) => Some(SortKey {
                field: field.to_string(),
                descending: true,
            }),
            None => Some(SortKey {
                field: part.to_string(),
                descending: false,
            }),
        }
    }
}

/// Parsed list query
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Filter expressions, AND-combined
    pub filters: Vec<FilterExpr>,

    /// Fields to project (None = all); `id` is always retained
    pub select: Option<Vec<String>>,

    /// Sort keys, applied in order
    pub sort: Vec<SortKey>,

    /// 1-based page number
    pub page: usize,

    /// Page size
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            select: None,
            sort: default_sort(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Newest records first unless the caller asks otherwise
fn default_sort() -> Vec<SortKey> {
    vec![SortKey {
        field: "createdAt".to_string(),
        descending: true,
    }]
}

impl ListQuery {
    /// Translate a request's query parameters
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut query = ListQuery::default();

        for (key, value) in params {
            // Reserved keys are never data filters
            if let Some(base) = reserved_key(key) {
                match base {
                    "select" => {
                        let fields: Vec<String> = value
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                        if !fields.is_empty() {
                            query.select = Some(fields);
                        }
                    }
                    "sort" => {
                        let keys: Vec<SortKey> =
                            value.split(',').filter_map(SortKey::parse).collect();
                        if !keys.is_empty() {
                            query.sort = keys;
                        }
                    }
                    // Non-numeric page/limit silently fall back to defaults
                    "page" => {
                        if let Ok(page) = value.parse::<usize>() {
                            if page > 0 {
                                query.page = page;
                            }
                        }
                    }
                    "limit" => {
                        if let Ok(limit) = value.parse::<usize>() {
                            if limit > 0 {
                                query.limit = limit;
                            }
                        }
                    }
                    _ => unreachable!(),
                }
                continue;
            }

            if let Some(filter) = parse_filter(key, value) {
                query.filters.push(filter);
            }
        }

        query
    }
}

/// Match a key against the reserved set, canonicalizing it
fn reserved_key(key: &str) -> Option<&'static str> {
    RESERVED_KEYS.iter().copied().find(|r| *r == key)
}

/// Parse one `field[op]=value` pair into a filter expression. A key with an
/// unknown qualifier is dropped rather than misread as an equality filter on
/// a bracketed field name.
fn parse_filter(key: &str, value: &str) -> Option<FilterExpr> {
    if let Some((field, qualifier)) = split_qualifier(key) {
        let operator = FilterOperator::from_qualifier(qualifier)?;
        let parsed = if operator == FilterOperator::In {
            Value::Array(value.split(',').map(|v| parse_value(v.trim())).collect())
        } else {
            parse_value(value)
        };
        return Some(FilterExpr::new(field, operator, parsed));
    }

    Some(FilterExpr::eq(key, parse_value(value)))
}

/// Split `field[op]` into (field, op); None when there is no bracket suffix
fn split_qualifier(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let inner = key.get(open + 1..)?.strip_suffix(']')?;
    Some((&key[..open], inner))
}

/// Coerce a raw parameter value into a typed JSON value
fn parse_value(value: &str) -> Value {
    if value == "null" {
        return Value::Null;
    }
    if value == "true" {
        return Value::Bool(true);
    }
    if value == "false" {
        return Value::Bool(false);
    }
    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reserved_keys_are_not_filters() {
        let query = ListQuery::from_params(&params(&[
            ("select", "name,description"),
            ("sort", "name"),
            ("page", "2"),
            ("limit", "10"),
        ]));

        assert!(query.filters.is_empty());
        assert_eq!(
            query.select,
            Some(vec!["name".to_string(), "description".to_string()])
        );
        assert_eq!(query.sort, vec![SortKey { field: "name".to_string(), descending: false }]);
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_bracket_operator_parsing() {
        let query = ListQuery::from_params(&params(&[("averageCost[gte]", "1000")]));

        assert_eq!(query.filters.len(), 1);
        let filter = &query.filters[0];
        assert_eq!(filter.field, "averageCost");
        assert_eq!(filter.operator, FilterOperator::Gte);
        assert_eq!(filter.value, json!(1000));
    }

    #[test]
    fn test_bare_key_is_equality() {
        let query = ListQuery::from_params(&params(&[("housing", "true")]));

        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].operator, FilterOperator::Eq);
        assert_eq!(query.filters[0].value, json!(true));
    }

    #[test]
    fn test_in_operator_splits_commas() {
        let query = ListQuery::from_params(&params(&[("careers[in]", "Business,UI/UX")]));

        assert_eq!(query.filters[0].operator, FilterOperator::In);
        assert_eq!(query.filters[0].value, json!(["Business", "UI/UX"]));
    }

    #[test]
    fn test_unknown_qualifier_dropped() {
        // A bracketed qualifier outside the allow-list must not degrade
        // into an equality filter on a mangled field name
        let query = ListQuery::from_params(&params(&[("name[regex]", ".*")]));
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_field_named_like_operator_is_plain_equality() {
        let query = ListQuery::from_params(&params(&[("gt", "5")]));

        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].field, "gt");
        assert_eq!(query.filters[0].operator, FilterOperator::Eq);
    }

    #[test]
    fn test_non_numeric_page_and_limit_fall_back() {
        let query = ListQuery::from_params(&params(&[("page", "abc"), ("limit", "-5")]));

        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_zero_page_falls_back() {
        let query = ListQuery::from_params(&params(&[("page", "0"), ("limit", "0")]));

        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let query = ListQuery::from_params(&HashMap::new());

        assert_eq!(query.sort.len(), 1);
        assert_eq!(query.sort[0].field, "createdAt");
        assert!(query.sort[0].descending);
    }

    #[test]
    fn test_descending_sort_prefix() {
        let query = ListQuery::from_params(&params(&[("sort", "name,-averageCost")]));

        assert_eq!(
            query.sort,
            vec![
                SortKey { field: "name".to_string(), descending: false },
                SortKey { field: "averageCost".to_string(), descending: true },
            ]
        );
    }

    #[test]
    fn test_value_coercion() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("4.5"), json!(4.5));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("Boston"), json!("Boston"));
    }
}
