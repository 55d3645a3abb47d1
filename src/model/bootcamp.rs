//! Bootcamp resource
//!
//! A directory listing entity representing an educational program provider.
//! Owns zero or more courses; deleting a bootcamp cascades to its courses at
//! the store layer. Records are stored as raw JSON documents; the typed
//! pieces here are the ones the service actually interprets.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Allowed career tags
pub const CAREERS: &[&str] = &[
    "Web Development",
    "Mobile Development",
    "UI/UX",
    "Data Science",
    "Business",
    "Other",
];

/// GeoJSON-style point with a formatted address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Always "Point"
    #[serde(rename = "type", default = "default_point_type")]
    pub point_type: String,

    /// [longitude, latitude]
    pub coordinates: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

fn default_point_type() -> String {
    "Point".to_string()
}

/// Photo filename used until an image is uploaded
pub fn default_photo() -> String {
    "no-photo.jpg".to_string()
}

/// Validate a full bootcamp document, collecting one message per violated
/// field. Runs against the merged document so updates are re-validated.
pub fn validate(doc: &Value) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match doc.get("name").and_then(Value::as_str) {
        None | Some("") => errors.push("Please add a name".to_string()),
        Some(name) if name.chars().count() > 50 => {
            errors.push("Name can not be more than 50 characters".to_string());
        }
        Some(_) => {}
    }

    match doc.get("description").and_then(Value::as_str) {
        None | Some("") => errors.push("Please add a description".to_string()),
        Some(desc) if desc.chars().count() > 500 => {
            errors.push("Description can not be more than 500 characters".to_string());
        }
        Some(_) => {}
    }

    if let Some(website) = doc.get("website").and_then(Value::as_str) {
        if !website.starts_with("http://") && !website.starts_with("https://") {
            errors.push("Please use a valid URL with HTTP or HTTPS".to_string());
        }
    }

    if let Some(phone) = doc.get("phone").and_then(Value::as_str) {
        if phone.chars().count() > 20 {
            errors.push("Phone number can not be longer than 20 characters".to_string());
        }
    }

    if let Some(email) = doc.get("email").and_then(Value::as_str) {
        if !email.contains('@') {
            errors.push("Please add a valid email".to_string());
        }
    }

    match doc.get("address").and_then(Value::as_str) {
        None | Some("") => errors.push("Please add an address".to_string()),
        Some(_) => {}
    }

    if let Some(careers) = doc.get("careers").and_then(Value::as_array) {
        for career in careers {
            match career.as_str() {
                Some(tag) if CAREERS.contains(&tag) => {}
                _ => errors.push(format!("Career '{}' is not a valid option", career)),
            }
        }
    }

    if let Some(rate) = doc.get("acceptedJobRate") {
        match rate.as_f64() {
            Some(r) if (0.0..=100.0).contains(&r) => {}
            _ => errors.push("Accepted job rate must be between 0 and 100".to_string()),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
