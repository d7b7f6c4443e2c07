// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dataset wrapper: the single unit the pipeline reads and writes.

use crate::models::Trail;
use serde::{Deserialize, Serialize};

/// The trail dataset document.
///
/// Produced by the upstream acquisition step, enriched in place here, and
/// always rewritten in full (never appended).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailDataset {
    /// When the upstream catalogue was fetched (RFC3339)
    pub fetched_at: Option<String>,
    /// Upstream catalogue name
    pub source: Option<String>,
    /// Attribution string required by the catalogue
    pub attribution: Option<String>,
    /// Total trail count as reported at acquisition time
    pub trail_count: usize,
    /// When this pipeline last enriched the dataset (RFC3339)
    #[serde(default)]
    pub enriched_at: Option<String>,
    /// The ordered trail records
    pub trails: Vec<Trail>,
}

impl TrailDataset {
    /// Trails that already carry an elevation profile.
    pub fn enriched_count(&self) -> usize {
        self.trails.iter().filter(|t| t.is_enriched()).count()
    }

    /// Trails that have a dominant aspect.
    pub fn aspect_count(&self) -> usize {
        self.trails.iter().filter(|t| t.aspect.is_some()).count()
    }
}
