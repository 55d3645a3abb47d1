//! Postal-code geocoding
//!
//! The provider is an external collaborator behind the `Geocoder` trait; an
//! empty result set is an explicit `None`, handled by callers like any other
//! missing resource rather than crashing on an empty index.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

use super::radius::GeoPoint;

/// Resolves a postal/zip code to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for the code, or None when the provider has no result
    async fn geocode(&self, zipcode: &str) -> ApiResult<Option<GeoPoint>>;
}

/// Geocoder backed by a MapQuest-style HTTP geocoding endpoint
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, zipcode: &str) -> ApiResult<Option<GeoPoint>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("location", zipcode)])
            .send()
            .await
            .map_err(|e| ApiError::Geocode(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Geocode(format!(
                "provider returned status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Geocode(e.to_string()))?;

        Ok(first_match(&body))
    }
}

/// Pull the first location out of a provider response; None when the result
/// set is empty
fn first_match(body: &Value) -> Option<GeoPoint> {
    let lat_lng = body
        .get("results")?
        .as_array()?
        .first()?
        .get("locations")?
        .as_array()?
        .first()?
        .get("latLng")?;

    Some(GeoPoint {
        lat: lat_lng.get("lat")?.as_f64()?,
        lng: lat_lng.get("lng")?.as_f64()?,
    })
}

/// Fixed-table geocoder for tests and offline development
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    table: HashMap<String, GeoPoint>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, zipcode: impl Into<String>, point: GeoPoint) -> Self {
        self.table.insert(zipcode.into(), point);
        self
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, zipcode: &str) -> ApiResult<Option<GeoPoint>> {
        Ok(self.table.get(zipcode).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_match_extracts_lat_lng() {
        let body = json!({
            "results": [{
                "locations": [
                    {"latLng": {"lat": 42.3601, "lng": -71.0589}},
                    {"latLng": {"lat": 0.0, "lng": 0.0}}
                ]
            }]
        });

        let point = first_match(&body).unwrap();
        assert_eq!(point.lat, 42.3601);
        assert_eq!(point.lng, -71.0589);
    }

    #[test]
    fn test_empty_results_is_none() {
        assert!(first_match(&json!({"results": []})).is_none());
        assert!(first_match(&json!({"results": [{"locations": []}]})).is_none());
        assert!(first_match(&json!({})).is_none());
    }

    #[tokio::test]
    async fn test_static_geocoder() {
        let geocoder = StaticGeocoder::new().with(
            "02215",
            GeoPoint { lat: 42.35, lng: -71.10 },
        );

        let hit = geocoder.geocode("02215").await.unwrap();
        assert!(hit.is_some());

        let miss = geocoder.geocode("99999").await.unwrap();
        assert!(miss.is_none());
    }
}
