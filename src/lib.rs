// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trail-Enricher: elevation and aspect metadata for the trail catalogue
//!
//! This crate is the batch pipeline that annotates trail records with an
//! elevation profile (service-derived for the longest trails, interpolated
//! for the rest), resolved min/max/gain figures, and a dominant compass
//! aspect, checkpointing as it goes so an interrupted run resumes where it
//! left off.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;
