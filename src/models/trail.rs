// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trail record model for storage and enrichment.

use serde::{Deserialize, Serialize};

/// Dominant compass aspect of a trail, one of the eight octants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Aspect {
    /// Map a bearing (degrees clockwise from north) to its compass octant.
    ///
    /// Sectors are 45° wide, half-open, and centered on each direction:
    /// N covers [337.5°, 360°) plus [0°, 22.5°), NE covers [22.5°, 67.5°),
    /// and so on around the compass.
    pub fn from_bearing(degrees: f64) -> Self {
        const OCTANTS: [Aspect; 8] = [
            Aspect::N,
            Aspect::NE,
            Aspect::E,
            Aspect::SE,
            Aspect::S,
            Aspect::SW,
            Aspect::W,
            Aspect::NW,
        ];
        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        OCTANTS[sector]
    }
}

/// One entry of a trail's elevation profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the trailhead in miles
    pub distance_mi: f64,
    /// Elevation in meters
    pub elevation_m: f64,
}

/// A trail record from the upstream catalogue, enriched in place.
///
/// The `min_elevation_m`/`max_elevation_m` pair is supplied by the upstream
/// dataset (when it has them); `elevation_min_m`/`elevation_max_m` are the
/// values this pipeline resolves, copied from the supplied pair when
/// present and otherwise backfilled from a service-derived profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    /// Catalogue identifier
    pub id: String,
    /// Trail name
    pub name: String,
    /// Surface type (dirt, gravel, paved, ...)
    pub surface: Option<String>,
    /// Managing agency
    pub manager: Option<String>,
    /// Access rules (open, permit, seasonal, ...)
    pub access: Option<String>,
    /// Trail length in miles, when the catalogue knows it
    pub length_miles: Option<f64>,
    /// Trail geometry: a GeoJSON MultiLineString (or LineString) of
    /// [lon, lat] positions; parts may be disjoint
    pub geometry: Option<geojson::Geometry>,
    /// Centroid as [lon, lat]
    pub centroid: Option<[f64; 2]>,
    /// Minimum elevation in meters, as supplied upstream
    pub min_elevation_m: Option<f64>,
    /// Maximum elevation in meters, as supplied upstream
    pub max_elevation_m: Option<f64>,

    // ─── Enrichment output (defaulted so un-enriched input parses) ───
    /// Resolved minimum elevation in meters
    #[serde(default)]
    pub elevation_min_m: Option<f64>,
    /// Resolved maximum elevation in meters
    #[serde(default)]
    pub elevation_max_m: Option<f64>,
    /// Total elevation gain in meters (sum of positive profile deltas)
    #[serde(default)]
    pub elevation_gain_m: Option<f64>,
    /// Dominant compass aspect derived from the path bearing trend
    #[serde(default)]
    pub aspect: Option<Aspect>,
    /// Elevation profile, ordered by distance; non-empty once enriched
    #[serde(default)]
    pub elevation_profile: Vec<ProfilePoint>,
}

impl Trail {
    /// Whether this trail already carries an elevation profile.
    ///
    /// Enriched trails are skipped on later runs, which is what makes an
    /// interrupted run resumable without redoing completed work.
    pub fn is_enriched(&self) -> bool {
        !self.elevation_profile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bearing_cardinal_centers() {
        assert_eq!(Aspect::from_bearing(0.0), Aspect::N);
        assert_eq!(Aspect::from_bearing(45.0), Aspect::NE);
        assert_eq!(Aspect::from_bearing(90.0), Aspect::E);
        assert_eq!(Aspect::from_bearing(135.0), Aspect::SE);
        assert_eq!(Aspect::from_bearing(180.0), Aspect::S);
        assert_eq!(Aspect::from_bearing(225.0), Aspect::SW);
        assert_eq!(Aspect::from_bearing(270.0), Aspect::W);
        assert_eq!(Aspect::from_bearing(315.0), Aspect::NW);
    }

    #[test]
    fn test_from_bearing_sector_boundaries_are_half_open() {
        // 22.5° starts NE; everything below it is still N
        assert_eq!(Aspect::from_bearing(22.4), Aspect::N);
        assert_eq!(Aspect::from_bearing(22.5), Aspect::NE);
        // 337.5° wraps back into the N sector
        assert_eq!(Aspect::from_bearing(337.4), Aspect::NW);
        assert_eq!(Aspect::from_bearing(337.5), Aspect::N);
        assert_eq!(Aspect::from_bearing(359.9), Aspect::N);
    }

    #[test]
    fn test_from_bearing_normalizes_out_of_range_input() {
        assert_eq!(Aspect::from_bearing(360.0), Aspect::N);
        assert_eq!(Aspect::from_bearing(450.0), Aspect::E);
        assert_eq!(Aspect::from_bearing(-90.0), Aspect::W);
    }

    #[test]
    fn test_aspect_serializes_as_compass_point() {
        let json = serde_json::to_string(&Aspect::NE).unwrap();
        assert_eq!(json, "\"NE\"");
        let back: Aspect = serde_json::from_str("\"SW\"").unwrap();
        assert_eq!(back, Aspect::SW);
    }
}
