//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use otto_finder::models::{GeoBbox, GeoPoint, NearestResult};
use otto_finder::{distance_km, Dataset, ResolveError};

/// Application state shared across handlers
pub struct AppState {
    pub dataset: Dataset,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    machines: usize,
    source: String,
    loaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<GeoBbox>,
}

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = &state.dataset;
    Json(HealthResponse {
        status: if dataset.is_empty() { "degraded" } else { "ok" },
        machines: dataset.len(),
        source: dataset.source().to_string(),
        loaded_at: dataset.loaded_at(),
        bbox: dataset.bbox(),
    })
}

#[derive(Deserialize)]
pub struct NearestQueryParams {
    #[serde(rename = "point.lat")]
    point_lat: f64,
    #[serde(rename = "point.lon")]
    point_lon: f64,
}

/// Nearest machine to a point
pub async fn nearest_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQueryParams>,
) -> Result<Json<NearestResult>, (StatusCode, String)> {
    let query = GeoPoint::new(params.point_lat, params.point_lon);
    let result = state.dataset.nearest(query).map_err(|e| {
        tracing::error!("Nearest lookup failed for {}: {}", query, e);
        error_response(e)
    })?;

    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct DistanceQueryParams {
    #[serde(rename = "from.lat")]
    from_lat: f64,
    #[serde(rename = "from.lon")]
    from_lon: f64,
    #[serde(rename = "to.lat")]
    to_lat: f64,
    #[serde(rename = "to.lon")]
    to_lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    distance_km: f64,
}

/// Great-circle distance between two points
pub async fn distance_handler(
    Query(params): Query<DistanceQueryParams>,
) -> Result<Json<DistanceResponse>, (StatusCode, String)> {
    let from = GeoPoint::new(params.from_lat, params.from_lon);
    let to = GeoPoint::new(params.to_lat, params.to_lon);

    let distance_km = distance_km(from, to).map_err(error_response)?;
    Ok(Json(DistanceResponse { distance_km }))
}

fn error_response(e: ResolveError) -> (StatusCode, String) {
    let status = match e {
        ResolveError::InvalidCoordinate { .. } => StatusCode::BAD_REQUEST,
        ResolveError::EmptyCandidateSet => StatusCode::NOT_FOUND,
    };
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use otto_finder::VendingMachine;

    fn state(machines: Vec<VendingMachine>) -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            dataset: Dataset::from_machines(machines, "test"),
        }))
    }

    fn kaivokatu() -> VendingMachine {
        VendingMachine {
            lat: 60.1713,
            lon: 24.9427,
            street_address: "Kaivokatu 1".to_string(),
            postal_code: "00100".to_string(),
            postal_locality: "HELSINKI".to_string(),
        }
    }

    #[tokio::test]
    async fn test_nearest() {
        let params = NearestQueryParams {
            point_lat: 60.17,
            point_lon: 24.94,
        };
        let Json(result) = nearest_handler(state(vec![kaivokatu()]), Query(params))
            .await
            .unwrap();
        assert_eq!(result.machine.street_address, "Kaivokatu 1");
        assert!(result.distance_km < 0.5);
    }

    #[tokio::test]
    async fn test_nearest_invalid_point() {
        let params = NearestQueryParams {
            point_lat: -91.0,
            point_lon: 24.94,
        };
        let (status, _) = nearest_handler(state(vec![kaivokatu()]), Query(params))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_nearest_empty_dataset() {
        let params = NearestQueryParams {
            point_lat: 60.17,
            point_lon: 24.94,
        };
        let (status, body) = nearest_handler(state(vec![]), Query(params))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "no candidate locations to search");
    }

    #[tokio::test]
    async fn test_distance() {
        let params = DistanceQueryParams {
            from_lat: 60.1699,
            from_lon: 24.9384,
            to_lat: 60.4518,
            to_lon: 22.2666,
        };
        let Json(resp) = distance_handler(Query(params)).await.unwrap();
        assert!((resp.distance_km - 150.0).abs() <= 2.0);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(resp) = health_handler(state(vec![kaivokatu()])).await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.machines, 1);

        let Json(resp) = health_handler(state(vec![])).await;
        assert_eq!(resp.status, "degraded");
        assert!(resp.bbox.is_none());
    }
}
