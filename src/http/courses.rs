//! Course handlers

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiResult;
use crate::query::{ListQuery, Pagination};

use super::response::{ItemBody, ListBody};
use super::{parse_json, AppState};

/// GET /api/v1/courses
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListBody>> {
    let query = ListQuery::from_params(&params);
    let (data, total) = state.store.find_courses(&query, None)?;
    let pagination = Pagination::compute(query.page, query.limit, total);
    Ok(Json(ListBody::paginated(data, pagination)))
}

/// GET /api/v1/bootcamps/{id}/courses
pub async fn list_for_bootcamp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListBody>> {
    let query = ListQuery::from_params(&params);
    let (data, total) = state.store.find_courses(&query, Some(&id))?;
    let pagination = Pagination::compute(query.page, query.limit, total);
    Ok(Json(ListBody::paginated(data, pagination)))
}

/// GET /api/v1/courses/{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemBody>> {
    let course = state.store.get_course(&id)?;
    Ok(Json(ItemBody::new(course)))
}

/// POST /api/v1/bootcamps/{id}/courses
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ItemBody>)> {
    let body = parse_json(&body)?;
    let created = state.store.insert_course(&id, body)?;
    Ok((StatusCode::CREATED, Json(ItemBody::new(created))))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ItemBody>> {
    let patch = parse_json(&body)?;
    let updated = state.store.update_course(&id, patch)?;
    Ok(Json(ItemBody::new(updated)))
}

/// DELETE /api/v1/courses/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemBody>> {
    state.store.delete_course(&id)?;
    Ok(Json(ItemBody::empty()))
}
