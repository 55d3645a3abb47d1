//! Router and shared state

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::config::{Config, RunMode};
use crate::geo::Geocoder;
use crate::logger::Logger;
use crate::store::Store;
use crate::upload::PhotoStore;

use super::{bootcamps, courses};

/// Shared application state, injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub geocoder: Arc<dyn Geocoder>,
    pub photos: Arc<PhotoStore>,
    pub config: Arc<Config>,
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/bootcamps",
            get(bootcamps::list).post(bootcamps::create),
        )
        .route(
            "/bootcamps/radius/{zipcode}/{distance}",
            get(bootcamps::within_radius),
        )
        .route(
            "/bootcamps/{id}",
            get(bootcamps::get_one)
                .put(bootcamps::update)
                .delete(bootcamps::remove),
        )
        .route("/bootcamps/{id}/photo", put(bootcamps::upload_photo))
        .route(
            "/bootcamps/{id}/courses",
            get(courses::list_for_bootcamp).post(courses::create),
        )
        .route("/courses", get(courses::list))
        .route(
            "/courses/{id}",
            get(courses::get_one)
                .put(courses::update)
                .delete(courses::remove),
        );

    let dev_mode = state.config.mode == RunMode::Development;

    let mut router = Router::new()
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Request logging in development only (production logs events and
    // failures, not every request)
    if dev_mode {
        router = router.layer(middleware::from_fn(log_request));
    }

    router
}

/// Unknown routes still answer with the JSON envelope
async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "success": false, "error": "Route not found" })),
    )
        .into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    Logger::info(
        "http_request",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", response.status().as_str()),
        ],
    );
    response
}
