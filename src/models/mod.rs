// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the pipeline.

pub mod dataset;
pub mod progress;
pub mod trail;

pub use dataset::TrailDataset;
pub use progress::EnrichmentProgress;
pub use trail::{Aspect, ProfilePoint, Trail};
