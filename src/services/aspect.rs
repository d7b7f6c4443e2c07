// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dominant aspect estimation from a trail's bearing trend.

use crate::models::Aspect;
use geo::{Bearing, Haversine, LineString, Point};

/// Estimate the dominant compass aspect of a multi-part path.
///
/// Parts are flattened in input order; the jump between disjoint parts is
/// treated as just another segment. Each consecutive coordinate pair
/// contributes its initial bearing to a circular mean (summed sines and
/// cosines), which stays correct across the 0°/360° wrap. The mean bearing
/// is then mapped to its compass octant.
///
/// Fewer than two coordinates, or a non-finite mean, yields `None`: "no
/// aspect", never a guessed value.
pub fn dominant_aspect(parts: &[LineString<f64>]) -> Option<Aspect> {
    let coords: Vec<Point<f64>> = parts.iter().flat_map(|part| part.points()).collect();
    if coords.len() < 2 {
        return None;
    }

    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;
    for pair in coords.windows(2) {
        let bearing = Haversine.bearing(pair[0], pair[1]).to_radians();
        sin_sum += bearing.sin();
        cos_sum += bearing.cos();
    }

    let mean = sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0);
    if !mean.is_finite() {
        return None;
    }
    Some(Aspect::from_bearing(mean))
}
