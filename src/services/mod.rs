// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - enrichment logic layer.

pub mod aspect;
pub mod elevation;
pub mod enrich;
pub mod geometry;
pub mod profile;

pub use elevation::ElevationClient;
pub use enrich::{EnrichmentPipeline, EnrichmentSummary};
pub use geometry::SampledPoint;
