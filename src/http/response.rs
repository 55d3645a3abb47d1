//! Response envelopes
//!
//! Every response, success or failure, is JSON carrying a `success` boolean.

use serde::Serialize;
use serde_json::Value;

use crate::query::Pagination;

/// List response: `{ success, count, pagination?, data }`. `count` is the
/// size of the returned page, not the filtered total.
#[derive(Debug, Serialize)]
pub struct ListBody {
    pub success: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    pub data: Vec<Value>,
}

impl ListBody {
    pub fn paginated(data: Vec<Value>, pagination: Pagination) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination: Some(pagination),
            data,
        }
    }

    /// Radius search reports all matches without pagination
    pub fn unpaginated(data: Vec<Value>) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination: None,
            data,
        }
    }
}

/// Single record response: `{ success, data }`
#[derive(Debug, Serialize)]
pub struct ItemBody {
    pub success: bool,
    pub data: Value,
}

impl ItemBody {
    pub fn new(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Delete responses carry an empty data object
    pub fn empty() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_body_counts_page() {
        let body = ListBody::paginated(
            vec![json!({"id": 1}), json!({"id": 2})],
            Pagination::compute(1, 2, 5),
        );

        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["count"], 2);
        assert_eq!(v["pagination"]["next"]["page"], 2);
    }

    #[test]
    fn test_unpaginated_omits_pagination() {
        let body = ListBody::unpaginated(vec![json!({"id": 1})]);
        let v = serde_json::to_value(&body).unwrap();
        assert!(v.get("pagination").is_none());
    }

    #[test]
    fn test_empty_item_body() {
        let v = serde_json::to_value(ItemBody::empty()).unwrap();
        assert_eq!(v["data"], json!({}));
    }
}
