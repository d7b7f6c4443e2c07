// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geometry sampling: evenly distance-spaced points along a trail path.

use crate::error::{EnrichError, Result};
use geo::{Distance, Haversine, InterpolatePoint, LineString, MultiLineString, Point};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// A point sampled along a trail, with its cumulative distance from the
/// trailhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPoint {
    pub lat: f64,
    pub lon: f64,
    /// Cumulative distance along the trail in miles
    pub distance_mi: f64,
}

/// Convert a trail's GeoJSON geometry into `geo` line parts.
///
/// The catalogue normally ships MultiLineString geometry; a bare LineString
/// becomes a single part. Anything else is an error the orchestrator catches
/// per trail.
pub fn line_strings(geometry: &geojson::Geometry) -> Result<Vec<LineString<f64>>> {
    let multi: std::result::Result<MultiLineString<f64>, _> = geometry.value.clone().try_into();
    if let Ok(multi) = multi {
        return Ok(multi.0);
    }

    let single: std::result::Result<LineString<f64>, _> = geometry.value.clone().try_into();
    if let Ok(line) = single {
        return Ok(vec![line]);
    }

    Err(EnrichError::UnsupportedGeometry)
}

/// Sample `target` evenly distance-spaced points along a multi-part path.
///
/// Points are spread proportionally across parts in input order: sample `i`
/// sits at `i/(target-1)` of the total path length (at the trailhead when
/// `target` is 1). Per-point distances are reported in miles against
/// `known_length_mi` when the catalogue supplied one, otherwise against the
/// geometry's own haversine length, so the first point is at 0 and the last
/// at the trail's length.
///
/// Degenerate geometry (no part with two or more coordinates, or zero total
/// length) yields an empty result: "no real sampling possible", which callers
/// answer with an interpolated profile, not an error.
pub fn sample_points(
    parts: &[LineString<f64>],
    target: usize,
    known_length_mi: Option<f64>,
) -> Vec<SampledPoint> {
    let usable: Vec<&LineString<f64>> = parts.iter().filter(|p| p.0.len() >= 2).collect();
    if usable.is_empty() {
        return Vec::new();
    }

    let part_lengths_m: Vec<f64> = usable.iter().map(|p| part_length_m(p)).collect();
    let total_m: f64 = part_lengths_m.iter().sum();
    if total_m <= 0.0 {
        return Vec::new();
    }

    let total_mi = known_length_mi
        .filter(|l| *l > 0.0)
        .unwrap_or(total_m / METERS_PER_MILE);

    (0..target)
        .map(|i| {
            let fraction = if target <= 1 {
                0.0
            } else {
                i as f64 / (target - 1) as f64
            };
            let point = point_at(&usable, &part_lengths_m, fraction * total_m);
            SampledPoint {
                lat: point.y(),
                lon: point.x(),
                distance_mi: fraction * total_mi,
            }
        })
        .collect()
}

/// Haversine length of one part in meters.
fn part_length_m(part: &LineString<f64>) -> f64 {
    part.lines()
        .map(|seg| Haversine.distance(seg.start_point(), seg.end_point()))
        .sum()
}

/// Locate the point `target_m` meters along the concatenated parts.
///
/// Walks parts in order; the final part is the catch-all so floating-point
/// drift at the very end of the path cannot fall off the geometry.
fn point_at(parts: &[&LineString<f64>], part_lengths_m: &[f64], target_m: f64) -> Point<f64> {
    let mut walked = 0.0;
    for (part, len) in parts.iter().zip(part_lengths_m).take(parts.len() - 1) {
        if target_m <= walked + len {
            return point_within_part(part, target_m - walked);
        }
        walked += len;
    }

    let last = parts.len() - 1;
    point_within_part(parts[last], (target_m - walked).clamp(0.0, part_lengths_m[last]))
}

/// Interpolate the point `offset_m` meters into one part.
fn point_within_part(part: &LineString<f64>, offset_m: f64) -> Point<f64> {
    let mut walked = 0.0;
    for seg in part.lines() {
        let seg_len = Haversine.distance(seg.start_point(), seg.end_point());
        if seg_len > 0.0 && offset_m <= walked + seg_len {
            return Haversine.point_at_distance_between(
                seg.start_point(),
                seg.end_point(),
                offset_m - walked,
            );
        }
        walked += seg_len;
    }

    // Offset at (or past) the end of the part: its last coordinate.
    // Parts reaching here always have >= 2 coordinates.
    Point::from(part.0[part.0.len() - 1])
}
