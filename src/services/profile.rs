// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Synthesized elevation profiles and shared profile math.

use crate::models::ProfilePoint;

/// Points in a synthesized profile.
pub const DEFAULT_PROFILE_POINTS: usize = 10;

/// Fallback bounds (meters) for trails with no elevation data at all.
pub const DEFAULT_MIN_ELEVATION_M: f64 = 2000.0;
pub const DEFAULT_MAX_ELEVATION_M: f64 = 2500.0;

/// Length (miles) assumed for trails the catalogue did not measure.
pub const DEFAULT_LENGTH_MI: f64 = 1.0;

/// Synthesize a triangular elevation profile from min/max bounds.
///
/// The profile rises linearly from `min_m` to `max_m` at the trail midpoint
/// and descends symmetrically back to `min_m`. Distances span
/// `[0, length_mi]`.
pub fn interpolated_profile(
    min_m: f64,
    max_m: f64,
    length_mi: f64,
    points: usize,
) -> Vec<ProfilePoint> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![ProfilePoint {
            distance_mi: 0.0,
            elevation_m: min_m,
        }];
    }

    let spread = max_m - min_m;
    (0..points)
        .map(|i| {
            let fraction = i as f64 / (points - 1) as f64;
            // 0 at both ends, 1 at the midpoint
            let climb = if fraction <= 0.5 {
                fraction * 2.0
            } else {
                (1.0 - fraction) * 2.0
            };
            ProfilePoint {
                distance_mi: fraction * length_mi,
                elevation_m: min_m + spread * climb,
            }
        })
        .collect()
}

/// Total elevation gain of a profile: the sum of positive deltas between
/// consecutive entries in distance order. An empty or single-point profile
/// gains 0.
pub fn elevation_gain(profile: &[ProfilePoint]) -> f64 {
    profile
        .windows(2)
        .map(|pair| (pair[1].elevation_m - pair[0].elevation_m).max(0.0))
        .sum()
}

/// Minimum and maximum elevation over a profile, `None` when it is empty.
pub fn elevation_bounds(profile: &[ProfilePoint]) -> Option<(f64, f64)> {
    let first = profile.first()?.elevation_m;
    let bounds = profile.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (lo.min(p.elevation_m), hi.max(p.elevation_m))
    });
    Some(bounds)
}
