// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Checkpoint store - dataset and progress persistence.
//!
//! The store owns the three paths a run touches: input dataset, output
//! dataset, and progress record. A progress file on disk signals an
//! interrupted run; when one exists alongside a checkpointed output, the
//! resumed run reloads the output so finished trails are kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{EnrichError, Result};
use crate::models::{EnrichmentProgress, TrailDataset};

/// Input files tried in order when no explicit path is configured. The
/// conditions-merged file wins when both exist.
const INPUT_CANDIDATES: [&str; 2] = ["data/trails_with_conditions.json", "data/trails.json"];

/// Default progress file name, placed next to the output dataset.
const PROGRESS_FILE: &str = "elevation_progress.json";

/// Files the enrichment run reads and writes.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    input_path: PathBuf,
    output_path: PathBuf,
    progress_path: PathBuf,
}

impl CheckpointStore {
    /// Resolve paths from configuration, locating the input dataset.
    ///
    /// A missing input dataset is the single fatal error of a run; output
    /// defaults to enriching the input in place.
    pub fn from_config(config: &Config) -> Result<Self> {
        let input_path = match &config.input_path {
            Some(path) => {
                if !path.exists() {
                    return Err(EnrichError::InputMissing(path.display().to_string()));
                }
                path.clone()
            }
            None => INPUT_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
                .ok_or_else(|| EnrichError::InputMissing(INPUT_CANDIDATES.join(", ")))?,
        };

        let output_path = config
            .output_path
            .clone()
            .unwrap_or_else(|| input_path.clone());
        let progress_path = config.progress_path.clone().unwrap_or_else(|| {
            output_path
                .parent()
                .map(|dir| dir.join(PROGRESS_FILE))
                .unwrap_or_else(|| PathBuf::from(PROGRESS_FILE))
        });

        Ok(Self {
            input_path,
            output_path,
            progress_path,
        })
    }

    /// Load the dataset for a run, with any saved progress.
    ///
    /// When a progress record exists and a checkpointed output is on disk,
    /// the output is loaded instead of the pristine input.
    pub fn load_for_run(&self) -> Result<(TrailDataset, Option<EnrichmentProgress>)> {
        let progress = self.load_progress();
        let path = if progress.is_some() && self.output_path.exists() {
            &self.output_path
        } else {
            &self.input_path
        };
        let dataset = Self::read_dataset(path)?;
        tracing::info!(
            path = %path.display(),
            trail_count = dataset.trails.len(),
            resuming = progress.is_some(),
            "Loaded trail dataset"
        );
        Ok((dataset, progress))
    }

    /// Read the progress record, if a prior run left one.
    ///
    /// A missing file means "start fresh". So does a corrupt one: the run is
    /// about to replace it anyway.
    pub fn load_progress(&self) -> Option<EnrichmentProgress> {
        let raw = match fs::read_to_string(&self.progress_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.progress_path.display(),
                    error = %e,
                    "Could not read progress file, starting fresh"
                );
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(progress) => Some(progress),
            Err(e) => {
                tracing::warn!(
                    path = %self.progress_path.display(),
                    error = %e,
                    "Could not parse progress file, starting fresh"
                );
                None
            }
        }
    }

    /// Persist the progress record.
    pub fn save_progress(&self, progress: &EnrichmentProgress) -> Result<()> {
        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| EnrichError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;
        fs::write(&self.progress_path, json)
            .map_err(|e| EnrichError::Io(self.progress_path.display().to_string(), e.to_string()))
    }

    /// Rewrite the output dataset in full.
    pub fn save_dataset(&self, dataset: &TrailDataset) -> Result<()> {
        let json = serde_json::to_string_pretty(dataset)
            .map_err(|e| EnrichError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;
        fs::write(&self.output_path, json)
            .map_err(|e| EnrichError::Io(self.output_path.display().to_string(), e.to_string()))
    }

    /// Persist a mid-run checkpoint: the dataset, then the progress record.
    ///
    /// Ordering matters. A crash between the two writes leaves the dataset
    /// ahead of its progress record, which a resume absorbs by skipping
    /// already-enriched trails; the reverse order could mark trails done
    /// that the saved dataset never received.
    pub fn save_checkpoint(
        &self,
        dataset: &TrailDataset,
        progress: &EnrichmentProgress,
    ) -> Result<()> {
        self.save_dataset(dataset)?;
        self.save_progress(progress)
    }

    /// Delete the progress record after a fully successful run.
    pub fn clear_progress(&self) -> Result<()> {
        match fs::remove_file(&self.progress_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EnrichError::Io(
                self.progress_path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    fn read_dataset(path: &Path) -> Result<TrailDataset> {
        let raw = fs::read_to_string(path)
            .map_err(|e| EnrichError::Io(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|e| EnrichError::Parse(path.display().to_string(), e.to_string()))
    }
}
