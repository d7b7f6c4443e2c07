// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point-elevation client for the USGS EPQS service.
//!
//! Handles:
//! - Single-coordinate elevation queries (meters, WGS84)
//! - Retry with linear backoff on transient failures
//! - The service's "no data" sentinel (definitive, never retried)
//!
//! An unknown elevation is an expected outcome, not an error: lookups that
//! exhaust their retries resolve to `None` and the caller moves on.

use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;
use crate::error::{EnrichError, Result};

/// Value EPQS returns for coordinates outside its coverage.
pub const NO_DATA_SENTINEL: f64 = -1_000_000.0;

/// EPQS point-elevation client.
#[derive(Clone)]
pub struct ElevationClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl ElevationClient {
    /// Create a client from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.epqs_url.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Resolve the elevation at a coordinate, in meters.
    ///
    /// Returns `None` when the service reports no data for the point or when
    /// every attempt failed. Transient failures are retried with a linearly
    /// growing delay (base delay times the attempt number).
    pub async fn elevation_at(&self, lat: f64, lon: f64) -> Option<f64> {
        for attempt in 1..=self.max_attempts {
            match self.query(lat, lon).await {
                Ok(Some(meters)) => return Some(meters),
                Ok(None) => {
                    tracing::debug!(lat, lon, "EPQS has no data for point");
                    return None;
                }
                Err(e) => {
                    if attempt < self.max_attempts {
                        let delay = self.retry_base_delay * attempt;
                        tracing::debug!(
                            lat,
                            lon,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "EPQS query failed, retrying: {}",
                            e
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        tracing::debug!(
                            lat,
                            lon,
                            attempts = self.max_attempts,
                            "EPQS query failed, giving up: {}",
                            e
                        );
                    }
                }
            }
        }
        None
    }

    /// Issue one EPQS request. `Ok(None)` means the definitive no-data
    /// sentinel; `Err` means a transient failure the caller may retry.
    async fn query(&self, lat: f64, lon: f64) -> Result<Option<f64>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("x", lon.to_string()),
                ("y", lat.to_string()),
                ("units", "Meters".to_string()),
                ("wkid", "4326".to_string()),
            ])
            .send()
            .await
            .map_err(|e| EnrichError::ElevationService(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EnrichError::ElevationService(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: EpqsResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::ElevationService(format!("JSON parse error: {}", e)))?;

        let meters = body.value.as_meters().ok_or_else(|| {
            EnrichError::ElevationService("unparseable elevation value".to_string())
        })?;

        if is_no_data(meters) {
            return Ok(None);
        }
        Ok(Some(meters))
    }
}

/// EPQS no-data check. The sentinel sometimes arrives as a string, so compare
/// with a little slack after parsing.
fn is_no_data(meters: f64) -> bool {
    (meters - NO_DATA_SENTINEL).abs() < 0.5
}

/// EPQS response body. Only the elevation value matters here.
#[derive(Debug, Clone, Deserialize)]
struct EpqsResponse {
    value: EpqsValue,
}

/// EPQS has served the elevation both as a JSON number and as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EpqsValue {
    Number(f64),
    Text(String),
}

impl EpqsValue {
    fn as_meters(&self) -> Option<f64> {
        match self {
            EpqsValue::Number(n) => Some(*n),
            EpqsValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value_parses() {
        let body: EpqsResponse = serde_json::from_str(r#"{"value": 123.45}"#).unwrap();
        assert_eq!(body.value.as_meters(), Some(123.45));
    }

    #[test]
    fn test_string_value_parses() {
        let body: EpqsResponse = serde_json::from_str(r#"{"value": "678.9"}"#).unwrap();
        assert_eq!(body.value.as_meters(), Some(678.9));
    }

    #[test]
    fn test_garbage_string_value_is_unparseable() {
        let body: EpqsResponse = serde_json::from_str(r#"{"value": "n/a"}"#).unwrap();
        assert_eq!(body.value.as_meters(), None);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = r#"{"location": {"x": -122.0, "y": 37.0}, "value": 88.0, "rasterId": 12}"#;
        let body: EpqsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.value.as_meters(), Some(88.0));
    }

    #[test]
    fn test_sentinel_detection() {
        assert!(is_no_data(-1_000_000.0));
        assert!(is_no_data(-999_999.9));
        assert!(!is_no_data(0.0));
        assert!(!is_no_data(-500.0));
        assert!(!is_no_data(4421.0));
    }
}
