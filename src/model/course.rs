//! Course resource
//!
//! A teachable offering belonging to exactly one bootcamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Minimum skill level required for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

/// Validate a full course document, collecting one message per violated
/// field.
pub fn validate(doc: &Value) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match doc.get("title").and_then(Value::as_str) {
        None | Some("") => errors.push("Please add a course title".to_string()),
        Some(_) => {}
    }

    match doc.get("description").and_then(Value::as_str) {
        None | Some("") => errors.push("Please add a description".to_string()),
        Some(_) => {}
    }

    match doc.get("weeks").and_then(Value::as_u64) {
        None => errors.push("Please add number of weeks".to_string()),
        Some(0) => errors.push("Number of weeks must be at least 1".to_string()),
        Some(_) => {}
    }

    match doc.get("tuition").and_then(Value::as_f64) {
        None => errors.push("Please add a tuition cost".to_string()),
        Some(t) if t < 0.0 => errors.push("Tuition can not be negative".to_string()),
        Some(_) => {}
    }

    match doc.get("minimumSkill") {
        Some(value) if serde_json::from_value::<MinimumSkill>(value.clone()).is_ok() => {}
        _ => errors.push(
            "Please add a minimum skill of beginner, intermediate or advanced".to_string(),
        ),
    }

    match doc.get("bootcamp").and_then(Value::as_str) {
        Some(id) if Uuid::parse_str(id).is_ok() => {}
        _ => errors.push("Course must belong to a bootcamp".to_string()),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_doc() -> Value {
        json!({
            "title": "Front End Web Development",
            "description": "HTML, CSS, JavaScript",
            "weeks": 8,
            "tuition": 8000,
            "minimumSkill": "beginner",
            "bootcamp": Uuid::new_v4().to_string()
        })
    }

    #[test]
    fn test_valid_course_passes() {
        assert!(validate(&valid_doc()).is_ok());
    }

    #[test]
    fn test_missing_fields_collected() {
        let errors = validate(&json!({})).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("title")));
        assert!(errors.iter().any(|e| e.contains("weeks")));
        assert!(errors.iter().any(|e| e.contains("tuition")));
        assert!(errors.iter().any(|e| e.contains("bootcamp")));
    }

    #[test]
    fn test_unknown_skill_level_rejected() {
        let mut doc = valid_doc();
        doc["minimumSkill"] = json!("wizard");
        let errors = validate(&doc).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("minimum skill")));
    }

    #[test]
    fn test_negative_tuition_rejected() {
        let mut doc = valid_doc();
        doc["tuition"] = json!(-100);
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn test_minimum_skill_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(MinimumSkill::Intermediate).unwrap(),
            json!("intermediate")
        );
        let skill: MinimumSkill = serde_json::from_value(json!("advanced")).unwrap();
        assert_eq!(skill, MinimumSkill::Advanced);
    }
}
