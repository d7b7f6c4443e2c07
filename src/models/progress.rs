// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Enrichment progress record for crash-resumable runs.
//!
//! The record is threaded through every trail iteration as an explicit
//! value, persisted alongside the dataset at checkpoints, and deleted once
//! a run completes. Its presence on disk is the signal that a prior run was
//! interrupted; its absence means "start fresh".

use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// Durable progress marker for the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentProgress {
    /// Index of the last fully processed trail, -1 if none
    pub last_processed_index: i64,
    /// Trails processed, cumulative across resumed runs
    #[serde(default)]
    pub processed_count: u64,
    /// Per-trail failures downgraded to interpolated fallbacks
    #[serde(default)]
    pub error_count: u64,
    /// Sampled points submitted to the elevation service
    #[serde(default)]
    pub service_call_count: u64,
    /// When the (possibly since-resumed) run first started (RFC3339)
    pub started_at: String,
    /// When the record was last updated (RFC3339)
    pub updated_at: String,
}

impl EnrichmentProgress {
    /// Fresh record for a run with no resume state.
    pub fn start_new() -> Self {
        let now = now_rfc3339();
        Self {
            last_processed_index: -1,
            processed_count: 0,
            error_count: 0,
            service_call_count: 0,
            started_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether a loaded record can drive a resume of `trail_count` trails.
    ///
    /// An index outside `[-1, trail_count)` means the record belongs to a
    /// different (or truncated) dataset; callers discard it and start fresh.
    pub fn is_valid_for(&self, trail_count: usize) -> bool {
        self.last_processed_index >= -1 && self.last_processed_index < trail_count as i64
    }

    /// Mark one trail as fully processed.
    pub fn record_trail(&mut self, index: usize) {
        self.last_processed_index = index as i64;
        self.processed_count += 1;
        self.updated_at = now_rfc3339();
    }

    /// Advance the marker past a trail that needed no work.
    ///
    /// Already-enriched trails must still move `last_processed_index` so a
    /// resume does not revisit them, but they are not counted as processed.
    pub fn mark_skipped(&mut self, index: usize) {
        self.last_processed_index = index as i64;
        self.updated_at = now_rfc3339();
    }

    /// First trail index a resumed run should look at.
    pub fn resume_from(&self) -> usize {
        (self.last_processed_index + 1).max(0) as usize
    }
}
