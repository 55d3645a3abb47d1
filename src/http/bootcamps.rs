//! Bootcamp handlers

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::geo::angular_radius;
use crate::query::{ListQuery, Pagination};
use crate::upload;

use super::response::{ItemBody, ListBody};
use super::{parse_json, AppState};

/// GET /api/v1/bootcamps
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListBody>> {
    let query = ListQuery::from_params(&params);
    let (data, total) = state.store.find_bootcamps(&query)?;
    let pagination = Pagination::compute(query.page, query.limit, total);
    Ok(Json(ListBody::paginated(data, pagination)))
}

/// GET /api/v1/bootcamps/{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemBody>> {
    let bootcamp = state.store.get_bootcamp(&id)?;
    Ok(Json(ItemBody::new(bootcamp)))
}

/// POST /api/v1/bootcamps
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ItemBody>)> {
    let body = parse_json(&body)?;
    let created = state.store.insert_bootcamp(body)?;
    Ok((StatusCode::CREATED, Json(ItemBody::new(created))))
}

/// PUT /api/v1/bootcamps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ItemBody>> {
    let patch = parse_json(&body)?;
    let updated = state.store.update_bootcamp(&id, patch)?;
    Ok(Json(ItemBody::new(updated)))
}

/// DELETE /api/v1/bootcamps/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemBody>> {
    state.store.delete_bootcamp(&id)?;
    Ok(Json(ItemBody::empty()))
}

/// GET /api/v1/bootcamps/radius/{zipcode}/{distance}
///
/// Distance is in kilometers; results are unpaginated. The distance segment
/// is parsed here rather than by the extractor so a malformed value renders
/// through the standard error envelope.
pub async fn within_radius(
    State(state): State<AppState>,
    Path((zipcode, distance)): Path<(String, String)>,
) -> ApiResult<Json<ListBody>> {
    let distance: f64 = distance
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid distance '{}'", distance)))?;

    let center = state
        .geocoder
        .geocode(&zipcode)
        .await?
        .ok_or_else(|| ApiError::not_found("Location", zipcode.as_str()))?;

    let data = state
        .store
        .bootcamps_within(&center, angular_radius(distance))?;
    Ok(Json(ListBody::unpaginated(data)))
}

/// PUT /api/v1/bootcamps/{id}/photo
///
/// Strictly sequential: validate, write to disk, then update the record.
/// A failed write responds 500 and leaves the photo field untouched.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<ItemBody>> {
    // The bootcamp must exist before any file work happens
    state.store.get_bootcamp(&id)?;
    let bootcamp_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Bootcamp", id.as_str()))?;

    let mut file: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() == Some("file") && field.file_name().is_some() {
            let original_name = field.file_name().unwrap_or("photo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            file = Some((original_name, content_type, data));
            break;
        }
    }

    let (original_name, content_type, data) =
        file.ok_or_else(|| ApiError::bad_request("Please upload a file"))?;

    upload::validate_content_type(&content_type)?;
    upload::validate_size(data.len() as u64, state.config.max_file_upload)?;

    let filename = upload::photo_filename(bootcamp_id, &original_name);
    state.photos.write(&filename, &data)?;
    let updated = state.store.update_bootcamp_photo(&id, &filename)?;
    Ok(Json(ItemBody::new(updated)))
}
