//! Farthest-candidate distance from a fixed reference point.
//!
//! Distances use an equirectangular projection scaled by the Earth's mean
//! radius. This is not the haversine great-circle distance; published
//! `tokyo_sta_distance` values depend on this exact formula.

use std::f64::consts::PI;

use crate::error::ResolveError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Tokyo Station, the reference point for `tokyo_sta_distance`.
pub const TOKYO_STATION: Coordinate = Coordinate {
    longitude: 139.767_306_8,
    latitude: 35.680_959_1,
};

/// A point in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Parses the numeric strings carried by a geocoding candidate.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedCoordinate`] if either value is not a
    /// finite decimal number. Surrounding whitespace is not accepted.
    pub fn parse(longitude: &str, latitude: &str) -> Result<Self, ResolveError> {
        Ok(Self {
            longitude: parse_component("longitude", longitude)?,
            latitude: parse_component("latitude", latitude)?,
        })
    }

    /// Equirectangular distance to `other` in kilometres.
    #[must_use]
    pub fn planar_distance_km(&self, other: &Coordinate) -> f64 {
        let dx = (self.longitude - other.longitude)
            * (PI * (self.latitude + other.latitude) / 360.0).cos();
        let dy = self.latitude - other.latitude;
        PI * EARTH_RADIUS_KM / 180.0 * (dx.powi(2) + dy.powi(2)).sqrt()
    }

    fn ensure_finite(&self) -> Result<(), ResolveError> {
        for (field, value) in [("longitude", self.longitude), ("latitude", self.latitude)] {
            if !value.is_finite() {
                return Err(ResolveError::MalformedCoordinate {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_component(field: &'static str, raw: &str) -> Result<f64, ResolveError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ResolveError::MalformedCoordinate {
            field,
            value: raw.to_owned(),
        })
}

/// Returns the greatest distance from `reference` to any of `candidates`,
/// rounded to one decimal place (half away from zero).
///
/// # Errors
///
/// Returns [`ResolveError::InvalidInput`] if `candidates` is empty, or
/// [`ResolveError::MalformedCoordinate`] if any candidate holds a non-finite
/// component.
pub fn farthest_distance_km(
    candidates: &[Coordinate],
    reference: Coordinate,
) -> Result<f64, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::InvalidInput("candidates"));
    }

    let mut farthest = 0.0_f64;
    for candidate in candidates {
        candidate.ensure_finite()?;
        farthest = farthest.max(candidate.planar_distance_km(&reference));
    }

    Ok(round_to_tenth(farthest))
}

// `f64::round` rounds half away from zero.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
