//! HTTP front-end for the resolver.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use revgeo::{LocationDescription, ResolveError, Resolver};

/// Application state shared across handlers
pub struct AppState {
    // One connection, used by one lookup at a time.
    resolver: Mutex<Resolver>,
    feature_count: u64,
}

impl AppState {
    pub fn new(resolver: Resolver, feature_count: u64) -> Self {
        Self {
            resolver: Mutex::new(resolver),
            feature_count,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/reverse", get(reverse_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    features: u64,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        features: state.feature_count,
    })
}

#[derive(Debug, Deserialize)]
pub struct ReverseQueryParams {
    /// Point latitude
    #[serde(rename = "point.lat")]
    pub point_lat: f64,
    /// Point longitude
    #[serde(rename = "point.lon")]
    pub point_lon: f64,
}

/// Reverse geocoding
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQueryParams>,
) -> Result<Json<LocationDescription>, (StatusCode, String)> {
    let (lat, lon) = (params.point_lat, params.point_lon);

    // SQLite work is blocking; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        let resolver = state
            .resolver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        resolver.resolve(lat, lon)
    })
    .await
    .map_err(|e| {
        tracing::error!("Reverse lookup task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    result.map(Json).map_err(|e| {
        let status = status_for(&e);
        if status.is_server_error() {
            tracing::error!("Reverse geocoding failed: {}", e);
        }
        (status, e.to_string())
    })
}

/// HTTP status for a lookup failure.
pub fn status_for(err: &ResolveError) -> StatusCode {
    match err {
        ResolveError::NotFound { .. } => StatusCode::NOT_FOUND,
        ResolveError::InvalidCoordinate { .. } => StatusCode::BAD_REQUEST,
        ResolveError::Connection { .. }
        | ResolveError::InvalidRecord { .. }
        | ResolveError::Query(_)
        | ResolveError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use revgeo::store::{FeatureRecord, GazetteerWriter};
    use tower::ServiceExt;

    fn app(dir: &tempfile::TempDir) -> Router {
        let path = dir.path().join("g.sqlite");
        let mut writer = GazetteerWriter::create(&path).unwrap();
        writer
            .insert_batch(&[FeatureRecord::new(1, "Reykjavík", 64.13548, -21.89541)
                .with_admin("Capital Region")
                .with_country("IS", "Iceland")])
            .unwrap();
        writer.finish().unwrap();

        let resolver = Resolver::open(&path).unwrap();
        router(Arc::new(AppState::new(resolver, 1)))
    }

    async fn fetch(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()));
        (status, body)
    }

    #[tokio::test]
    async fn test_reverse_returns_nearest_feature() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let (status, body) = fetch(&app, "/v1/reverse?point.lat=64.1&point.lon=-21.9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Reykjavík");
        assert_eq!(body["countryCode"], "IS");
    }

    #[tokio::test]
    async fn test_reverse_outside_box_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let (status, _) = fetch(&app, "/v1/reverse?point.lat=0&point.lon=0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reverse_out_of_range_latitude_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let (status, _) = fetch(&app, "/v1/reverse?point.lat=95&point.lon=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fetch(&app, "/v1/reverse?point.lat=north").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_feature_count() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let (status, body) = fetch(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["features"], 1);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ResolveError::NotFound {
            latitude: 0.0,
            longitude: 0.0,
        };
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_coordinate_maps_to_400() {
        let err = ResolveError::InvalidCoordinate {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_data_maps_to_500() {
        let err = ResolveError::InvalidRecord {
            column: "name",
            reason: "is NULL".into(),
        };
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_query_params_use_dotted_names() {
        let params: ReverseQueryParams =
            serde_json::from_str(r#"{"point.lat": 51.5, "point.lon": -0.12}"#).unwrap();
        assert_eq!(params.point_lat, 51.5);
        assert_eq!(params.point_lon, -0.12);
    }
}
