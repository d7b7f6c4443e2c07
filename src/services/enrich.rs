// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch enrichment orchestrator.
//!
//! Handles the core workflow:
//! 1. Load the dataset, resuming from an interrupted run when progress exists
//! 2. Rank trails by length; the top K get service-derived profiles
//! 3. Per trail: resolve min/max, compute aspect, build the elevation profile
//! 4. Checkpoint dataset and progress at a fixed interval
//! 5. Final save, progress cleanup, and a summary report
//!
//! Trails are processed one at a time; concurrency exists only inside a
//! single trail's elevation lookups, which run in fixed-width batches.

use std::collections::HashSet;

use futures_util::future::join_all;

use crate::config::Config;
use crate::error::{EnrichError, Result};
use crate::models::{EnrichmentProgress, ProfilePoint, Trail};
use crate::services::elevation::ElevationClient;
use crate::services::geometry::SampledPoint;
use crate::services::{aspect, geometry, profile};
use crate::store::CheckpointStore;
use crate::time_utils::now_rfc3339;

/// Drives elevation and aspect enrichment over a whole trail dataset.
pub struct EnrichmentPipeline {
    config: Config,
    client: ElevationClient,
}

impl EnrichmentPipeline {
    pub fn new(config: Config) -> Self {
        let client = ElevationClient::new(&config);
        Self { config, client }
    }

    /// Run enrichment to completion.
    ///
    /// Loads the dataset (or an interrupted run's checkpoint), processes every
    /// trail that still needs work, and persists the result. Per-trail
    /// failures are counted and fall back to interpolated profiles; only
    /// missing input and failed dataset/progress writes abort the run.
    pub async fn run(&self, store: &CheckpointStore) -> Result<EnrichmentSummary> {
        let (mut dataset, saved) = store.load_for_run()?;
        let trail_count = dataset.trails.len();

        let mut progress = match saved {
            Some(p) if p.is_valid_for(trail_count) => {
                tracing::info!(
                    last_processed_index = p.last_processed_index,
                    processed = p.processed_count,
                    "Resuming interrupted run"
                );
                p
            }
            Some(p) => {
                tracing::warn!(
                    last_processed_index = p.last_processed_index,
                    trail_count,
                    "Progress record does not match the dataset, starting fresh"
                );
                EnrichmentProgress::start_new()
            }
            None => EnrichmentProgress::start_new(),
        };

        // Eligibility comes from the original lengths, fixed before iteration,
        // so a resumed run reproduces the same set.
        let eligible = select_service_eligible(&dataset.trails, self.config.service_trail_limit);
        let resume_at = progress.resume_from();
        let checkpoint_interval = self.config.checkpoint_interval.max(1) as u64;

        tracing::info!(
            trail_count,
            service_eligible = eligible.len(),
            resume_at,
            "Starting elevation enrichment"
        );

        let mut run_service: u64 = 0;
        let mut run_interpolated: u64 = 0;
        let mut run_skipped: u64 = 0;
        let mut run_errors: u64 = 0;

        for idx in resume_at..trail_count {
            if dataset.trails[idx].is_enriched() {
                tracing::debug!(
                    index = idx,
                    name = %dataset.trails[idx].name,
                    "Already enriched, skipping"
                );
                progress.mark_skipped(idx);
                run_skipped += 1;
                continue;
            }

            let service_branch = eligible.contains(&idx);
            {
                let trail = &mut dataset.trails[idx];

                // Supplied bounds become the resolved bounds wherever present.
                if trail.min_elevation_m.is_some() {
                    trail.elevation_min_m = trail.min_elevation_m;
                }
                if trail.max_elevation_m.is_some() {
                    trail.elevation_max_m = trail.max_elevation_m;
                }

                let parts = trail
                    .geometry
                    .as_ref()
                    .and_then(|g| geometry::line_strings(g).ok());
                trail.aspect = parts.as_deref().and_then(aspect::dominant_aspect);
            }

            if service_branch {
                match self.service_profile(&dataset.trails[idx]).await {
                    Ok(outcome) if !outcome.profile.is_empty() => {
                        progress.service_call_count += outcome.lookups;
                        let trail = &mut dataset.trails[idx];
                        trail.elevation_gain_m = Some(profile::elevation_gain(&outcome.profile));
                        if let Some((lo, hi)) = profile::elevation_bounds(&outcome.profile) {
                            if trail.elevation_min_m.is_none() {
                                trail.elevation_min_m = Some(lo);
                            }
                            if trail.elevation_max_m.is_none() {
                                trail.elevation_max_m = Some(hi);
                            }
                        }
                        tracing::info!(
                            index = idx,
                            name = %trail.name,
                            points = outcome.profile.len(),
                            lookups = outcome.lookups,
                            "Service-derived profile"
                        );
                        trail.elevation_profile = outcome.profile;
                        run_service += 1;
                    }
                    Ok(outcome) => {
                        // Service path attempted but produced no signal: fall
                        // back to interpolation and leave gain absent.
                        progress.service_call_count += outcome.lookups;
                        apply_interpolated(&mut dataset.trails[idx], false);
                        tracing::info!(
                            index = idx,
                            name = %dataset.trails[idx].name,
                            lookups = outcome.lookups,
                            "No usable elevation samples, interpolated fallback"
                        );
                        run_interpolated += 1;
                    }
                    Err(e) => {
                        progress.error_count += 1;
                        run_errors += 1;
                        apply_interpolated(&mut dataset.trails[idx], false);
                        tracing::warn!(
                            index = idx,
                            name = %dataset.trails[idx].name,
                            error = %e,
                            "Service profile failed, interpolated fallback"
                        );
                        run_interpolated += 1;
                    }
                }
            } else {
                apply_interpolated(&mut dataset.trails[idx], true);
                tracing::debug!(
                    index = idx,
                    name = %dataset.trails[idx].name,
                    "Interpolated profile"
                );
                run_interpolated += 1;
            }

            progress.record_trail(idx);

            // Checkpoints land after service-path trails, where an interrupted
            // run would otherwise lose the most expensive work.
            let run_processed = run_service + run_interpolated;
            if service_branch && run_processed % checkpoint_interval == 0 {
                store.save_checkpoint(&dataset, &progress)?;
                tracing::info!(
                    index = idx,
                    processed = run_processed,
                    "Checkpoint saved"
                );
            }
        }

        dataset.enriched_at = Some(now_rfc3339());
        store.save_dataset(&dataset)?;
        store.clear_progress()?;

        let summary = EnrichmentSummary {
            trail_count,
            service_profiled: run_service,
            interpolated: run_interpolated,
            skipped: run_skipped,
            errors: run_errors,
            enriched_count: dataset.enriched_count(),
            aspect_count: dataset.aspect_count(),
            processed_total: progress.processed_count,
            service_calls_total: progress.service_call_count,
            errors_total: progress.error_count,
        };

        tracing::info!(
            service_profiled = summary.service_profiled,
            interpolated = summary.interpolated,
            skipped = summary.skipped,
            errors = summary.errors,
            service_calls = summary.service_calls_total,
            "Enrichment run complete"
        );

        Ok(summary)
    }

    /// Build a service-derived profile for one trail.
    ///
    /// Samples the geometry, queries the elevation service for each sample in
    /// fixed-width batches (each batch joins fully before the next starts),
    /// and keeps only the points that resolved. An unsampleable geometry
    /// yields an empty profile with zero lookups; missing or unsupported
    /// geometry is an error the caller downgrades per trail.
    async fn service_profile(&self, trail: &Trail) -> Result<ServiceOutcome> {
        let geometry = trail.geometry.as_ref().ok_or(EnrichError::MissingGeometry)?;
        let parts = geometry::line_strings(geometry)?;
        let samples =
            geometry::sample_points(&parts, self.config.samples_per_trail, trail.length_miles);
        if samples.is_empty() {
            return Ok(ServiceOutcome {
                profile: Vec::new(),
                lookups: 0,
            });
        }

        let width = self.config.lookup_batch_width.max(1);
        let mut resolved: Vec<(usize, SampledPoint, Option<f64>)> =
            Vec::with_capacity(samples.len());
        for (batch_index, batch) in samples.chunks(width).enumerate() {
            let lookups = batch.iter().enumerate().map(|(offset, point)| {
                let index = batch_index * width + offset;
                let point = *point;
                async move {
                    (
                        index,
                        point,
                        self.client.elevation_at(point.lat, point.lon).await,
                    )
                }
            });
            resolved.extend(join_all(lookups).await);
        }

        // Restore original sample order; completion order is not guaranteed.
        resolved.sort_by_key(|(index, _, _)| *index);

        let lookups = resolved.len() as u64;
        let profile = resolved
            .into_iter()
            .filter_map(|(_, point, meters)| {
                meters.map(|elevation_m| ProfilePoint {
                    distance_mi: point.distance_mi,
                    elevation_m,
                })
            })
            .collect();

        Ok(ServiceOutcome { profile, lookups })
    }
}

/// Outcome of the service path for one trail.
struct ServiceOutcome {
    profile: Vec<ProfilePoint>,
    lookups: u64,
}

/// Indices of the trails whose profiles come from the elevation service:
/// the top `limit` by descending length, missing lengths ranking as zero.
/// The sort is stable, so catalogue order breaks ties.
pub fn select_service_eligible(trails: &[Trail], limit: usize) -> HashSet<usize> {
    let mut ranked: Vec<(usize, f64)> = trails
        .iter()
        .enumerate()
        .map(|(idx, trail)| (idx, trail.length_miles.unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().take(limit).map(|(idx, _)| idx).collect()
}

/// Give a trail a synthesized profile from its resolved (or default) bounds.
///
/// With `with_spread_gain`, gain is set to half the min-to-max spread when
/// both resolved bounds are known; the service-path fallbacks leave gain
/// absent.
fn apply_interpolated(trail: &mut Trail, with_spread_gain: bool) {
    let min_m = trail
        .elevation_min_m
        .unwrap_or(profile::DEFAULT_MIN_ELEVATION_M);
    let max_m = trail
        .elevation_max_m
        .unwrap_or(profile::DEFAULT_MAX_ELEVATION_M);
    let length_mi = trail.length_miles.unwrap_or(profile::DEFAULT_LENGTH_MI);
    trail.elevation_profile =
        profile::interpolated_profile(min_m, max_m, length_mi, profile::DEFAULT_PROFILE_POINTS);
    if with_spread_gain {
        if let (Some(lo), Some(hi)) = (trail.elevation_min_m, trail.elevation_max_m) {
            trail.elevation_gain_m = Some(((hi - lo) / 2.0).max(0.0));
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone)]
pub struct EnrichmentSummary {
    /// Trails in the dataset
    pub trail_count: usize,
    /// Trails given a service-derived profile this run
    pub service_profiled: u64,
    /// Trails given an interpolated profile this run (fallbacks included)
    pub interpolated: u64,
    /// Trails skipped because they were already enriched
    pub skipped: u64,
    /// Per-trail failures downgraded to fallbacks this run
    pub errors: u64,
    /// Trails with a profile, dataset-wide
    pub enriched_count: usize,
    /// Trails with an aspect, dataset-wide
    pub aspect_count: usize,
    /// Trails processed, cumulative across resumed runs
    pub processed_total: u64,
    /// Elevation service lookups, cumulative across resumed runs
    pub service_calls_total: u64,
    /// Per-trail failures, cumulative across resumed runs
    pub errors_total: u64,
}

impl EnrichmentSummary {
    /// Human-readable report printed at the end of a successful run.
    pub fn report(&self) -> String {
        let mut out = String::from("Elevation enrichment complete\n");
        out.push_str(&format!(
            "  Trails in dataset:          {}\n",
            self.trail_count
        ));
        out.push_str(&format!(
            "  Service-derived this run:   {}\n",
            self.service_profiled
        ));
        out.push_str(&format!(
            "  Interpolated this run:      {}\n",
            self.interpolated
        ));
        out.push_str(&format!(
            "  Skipped (already done):     {}\n",
            self.skipped
        ));
        out.push_str(&format!("  Errors this run:            {}\n", self.errors));
        out.push_str(&format!(
            "  Errors (total):             {}\n",
            self.errors_total
        ));
        out.push_str(&format!(
            "  Trails with profile:        {}/{}\n",
            self.enriched_count, self.trail_count
        ));
        out.push_str(&format!(
            "  Trails with aspect:         {}/{}\n",
            self.aspect_count, self.trail_count
        ));
        out.push_str(&format!(
            "  Service calls (total):      {}\n",
            self.service_calls_total
        ));
        out.push_str(&format!(
            "  Processed (total):          {}",
            self.processed_total
        ));
        out
    }
}
