// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aspect estimation tests: octant mapping, circular mean, sector bounds.

use geo::LineString;
use trail_enricher::models::Aspect;
use trail_enricher::services::aspect::dominant_aspect;

#[test]
fn test_due_east_path_is_east() {
    let parts = vec![LineString::from(vec![
        (-122.0, 37.0),
        (-121.99, 37.0),
        (-121.98, 37.0),
        (-121.97, 37.0),
    ])];
    assert_eq!(dominant_aspect(&parts), Some(Aspect::E));
}

#[test]
fn test_northwest_path_is_northwest() {
    // At 37°N, 0.01252° of longitude covers the same ground as 0.01° of
    // latitude, which puts this bearing within a fraction of a degree of 315°
    let parts = vec![LineString::from(vec![
        (-122.0, 37.0),
        (-122.01252, 37.01),
        (-122.02504, 37.02),
    ])];
    assert_eq!(dominant_aspect(&parts), Some(Aspect::NW));
}

#[test]
fn test_circular_mean_handles_the_north_wrap() {
    // Bearings of ~350° then ~10°: the circular mean is due north, where an
    // arithmetic mean of degrees would land at 180°
    let parts = vec![LineString::from(vec![
        (-122.0, 37.0),
        (-122.002208, 37.01),
        (-122.0, 37.02),
    ])];
    assert_eq!(dominant_aspect(&parts), Some(Aspect::N));
}

#[test]
fn test_majority_heading_dominates() {
    // Three eastward segments and one northward one: the mean bearing stays
    // inside the east sector
    let parts = vec![LineString::from(vec![
        (-122.0, 37.0),
        (-121.99, 37.0),
        (-121.98, 37.0),
        (-121.97, 37.0),
        (-121.97, 37.01),
    ])];
    assert_eq!(dominant_aspect(&parts), Some(Aspect::E));
}

#[test]
fn test_sector_bounds_are_half_open() {
    // Sector edges belong to the next octant over
    assert_eq!(Aspect::from_bearing(337.5), Aspect::N);
    assert_eq!(Aspect::from_bearing(337.4), Aspect::NW);
    assert_eq!(Aspect::from_bearing(22.5), Aspect::NE);
    assert_eq!(Aspect::from_bearing(22.4), Aspect::N);
    assert_eq!(Aspect::from_bearing(360.0), Aspect::N);
}

#[test]
fn test_too_little_geometry_yields_no_aspect() {
    assert_eq!(dominant_aspect(&[]), None);
    let single = vec![LineString::from(vec![(-122.0, 37.0)])];
    assert_eq!(dominant_aspect(&single), None);
}
