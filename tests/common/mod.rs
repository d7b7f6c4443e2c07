// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared fixtures: trail/dataset builders and a mock elevation service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use geojson::{Geometry, Value};

use trail_enricher::models::{Trail, TrailDataset};

/// A bare trail record with no geometry and no elevation data.
#[allow(dead_code)]
pub fn trail(id: &str, length_miles: Option<f64>) -> Trail {
    Trail {
        id: id.to_string(),
        name: format!("Trail {}", id),
        surface: Some("dirt".to_string()),
        manager: None,
        access: None,
        length_miles,
        geometry: None,
        centroid: None,
        min_elevation_m: None,
        max_elevation_m: None,
        elevation_min_m: None,
        elevation_max_m: None,
        elevation_gain_m: None,
        aspect: None,
        elevation_profile: Vec::new(),
    }
}

/// GeoJSON MultiLineString geometry from parts of [lon, lat] positions.
#[allow(dead_code)]
pub fn multi_line(parts: &[&[[f64; 2]]]) -> Geometry {
    let coords = parts
        .iter()
        .map(|part| part.iter().map(|pos| pos.to_vec()).collect())
        .collect();
    Geometry::new(Value::MultiLineString(coords))
}

/// A straight line of `n` evenly spaced positions between two endpoints.
#[allow(dead_code)]
pub fn straight_line(start: [f64; 2], end: [f64; 2], n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            [
                start[0] + (end[0] - start[0]) * t,
                start[1] + (end[1] - start[1]) * t,
            ]
        })
        .collect()
}

/// Wrap trails in a dataset the way the catalogue ships them.
#[allow(dead_code)]
pub fn dataset(trails: Vec<Trail>) -> TrailDataset {
    TrailDataset {
        fetched_at: Some("2026-08-01T00:00:00Z".to_string()),
        source: Some("test-catalogue".to_string()),
        attribution: Some("Test data".to_string()),
        trail_count: trails.len(),
        enriched_at: None,
        trails,
    }
}

/// How the mock elevation service answers queries.
#[derive(Clone, Copy, Debug)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Every point resolves to this elevation
    FixedElevation(f64),
    /// Elevation derived from the query latitude, so points differ
    ElevationFromLatitude,
    /// Every point returns the no-data sentinel
    NoData,
    /// Every request fails with HTTP 500
    ServerError,
}

/// Handle to a running mock elevation service.
pub struct MockEpqs {
    pub base_url: String,
    hits: Arc<AtomicU64>,
}

impl MockEpqs {
    /// Total requests the mock has served.
    #[allow(dead_code)]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct MockState {
    behavior: MockBehavior,
    hits: Arc<AtomicU64>,
}

/// Spawn a mock elevation service on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_epqs(behavior: MockBehavior) -> MockEpqs {
    let hits = Arc::new(AtomicU64::new(0));
    let state = MockState {
        behavior,
        hits: Arc::clone(&hits),
    };

    let app = Router::new()
        .route("/v1/json", get(epqs_handler))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock listener");
    let addr = listener.local_addr().expect("Mock listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock elevation service died");
    });

    MockEpqs {
        base_url: format!("http://{}/v1/json", addr),
        hits,
    }
}

async fn epqs_handler(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match state.behavior {
        MockBehavior::FixedElevation(meters) => elevation_json(meters),
        MockBehavior::ElevationFromLatitude => {
            let lat: f64 = params.get("y").and_then(|v| v.parse().ok()).unwrap_or(0.0);
            elevation_json(1000.0 + lat * 100.0)
        }
        MockBehavior::NoData => elevation_json(-1_000_000.0),
        MockBehavior::ServerError => {
            (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
    }
}

fn elevation_json(meters: f64) -> axum::response::Response {
    axum::Json(serde_json::json!({ "value": meters })).into_response()
}
