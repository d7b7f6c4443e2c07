// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline error types.
//!
//! Only [`EnrichError::InputMissing`] (and a failed dataset write) can end a
//! run. Everything else is handled below the orchestrator: transient service
//! failures are retried and then downgraded to "unknown" inside the elevation
//! client, and per-trail failures are caught by the orchestrator, which falls
//! back to an interpolated profile and keeps going.

/// Pipeline error type.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("No input dataset found (searched: {0})")]
    InputMissing(String),

    #[error("File I/O error for {0}: {1}")]
    Io(String, String),

    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),

    #[error("Trail has no geometry")]
    MissingGeometry,

    #[error("Unsupported geometry type (expected MultiLineString or LineString)")]
    UnsupportedGeometry,

    #[error("Elevation service error: {0}")]
    ElevationService(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EnrichError>;
