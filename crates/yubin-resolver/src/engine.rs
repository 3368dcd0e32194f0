use yubin_core::{AddressInfo, LookupResult};

use crate::distance::{farthest_distance_km, Coordinate, TOKYO_STATION};
use crate::error::ResolveError;
use crate::prefix::common_prefix;

/// Resolves lookups against a fixed reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    reference: Coordinate,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(TOKYO_STATION)
    }
}

impl Resolver {
    #[must_use]
    pub const fn new(reference: Coordinate) -> Self {
        Self { reference }
    }

    #[must_use]
    pub const fn reference(&self) -> Coordinate {
        self.reference
    }

    /// Builds the single [`AddressInfo`] for `lookup`.
    ///
    /// Prefecture and city come from the first candidate; the town part is the
    /// prefix shared by every candidate's town. The distance is the farthest
    /// candidate from the reference point.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if `lookup` has no candidates.
    /// - [`ResolveError::MalformedCoordinate`] if any candidate's longitude or
    ///   latitude is not a finite number.
    pub fn resolve(&self, lookup: &LookupResult) -> Result<AddressInfo, ResolveError> {
        let first = lookup.first().ok_or(ResolveError::NotFound)?;

        let towns: Vec<&str> = lookup.candidates.iter().map(|c| c.town.as_str()).collect();
        let town = common_prefix(&towns)?;

        let coordinates = lookup
            .candidates
            .iter()
            .map(|c| Coordinate::parse(&c.longitude, &c.latitude))
            .collect::<Result<Vec<_>, _>>()?;
        let distance_km = farthest_distance_km(&coordinates, self.reference)?;

        let info = AddressInfo {
            postal_code: first.postal_code.clone(),
            hit_count: lookup.len(),
            address: format!("{}{}{}", first.prefecture, first.city, town),
            distance_km,
        };

        tracing::debug!(
            postal_code = %info.postal_code,
            hit_count = info.hit_count,
            distance_km = info.distance_km,
            "resolved lookup"
        );

        Ok(info)
    }
}

/// Resolves `lookup` against Tokyo Station.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(lookup: &LookupResult) -> Result<AddressInfo, ResolveError> {
    Resolver::default().resolve(lookup)
}

#[cfg(test)]
mod tests {
    use yubin_core::LocationCandidate;

    use super::*;

    fn candidate(town: &str, longitude: &str, latitude: &str) -> LocationCandidate {
        LocationCandidate {
            city: "Chiyoda".to_string(),
            town: town.to_string(),
            prefecture: "Tokyo".to_string(),
            postal_code: "1000005".to_string(),
            longitude: longitude.to_string(),
            latitude: latitude.to_string(),
        }
    }

    #[test]
    fn resolves_single_candidate() {
        let lookup = LookupResult::new(vec![candidate("Marunouchi", "139.766", "35.681")]);
        let info = resolve(&lookup).unwrap();

        assert_eq!(info.postal_code, "1000005");
        assert_eq!(info.hit_count, 1);
        assert_eq!(info.address, "TokyoChiyodaMarunouchi");
        assert!((info.distance_km - 0.1).abs() < 1e-9, "got {}", info.distance_km);
    }

    #[test]
    fn reduces_towns_to_common_prefix() {
        let lookup = LookupResult::new(vec![
            candidate("Otsuka", "139.73", "35.73"),
            candidate("Otsuka2", "139.74", "35.72"),
        ]);
        let info = resolve(&lookup).unwrap();

        assert_eq!(info.hit_count, 2);
        assert_eq!(info.address, "TokyoChiyodaOtsuka");
    }

    #[test]
    fn prefecture_and_city_come_from_first_candidate() {
        let mut second = candidate("Kanda", "139.77", "35.69");
        second.prefecture = "Other".to_string();
        second.city = "Elsewhere".to_string();
        let lookup = LookupResult::new(vec![candidate("Kanda", "139.77", "35.69"), second]);

        assert_eq!(resolve(&lookup).unwrap().address, "TokyoChiyodaKanda");
    }

    #[test]
    fn distance_uses_farthest_candidate() {
        let lookup = LookupResult::new(vec![
            candidate("A", "139.7673068", "35.6809591"),
            candidate("B", "139.7673068", "36.6809591"),
        ]);
        let info = resolve(&lookup).unwrap();
        assert!((info.distance_km - 111.2).abs() < 1e-9, "got {}", info.distance_km);
    }

    #[test]
    fn towns_without_shared_prefix_leave_prefecture_and_city() {
        let lookup = LookupResult::new(vec![
            candidate("Hitotsubashi", "139.75", "35.69"),
            candidate("Marunouchi", "139.76", "35.68"),
        ]);
        assert_eq!(resolve(&lookup).unwrap().address, "TokyoChiyoda");
    }

    #[test]
    fn empty_lookup_is_not_found() {
        assert_eq!(
            resolve(&LookupResult::default()),
            Err(ResolveError::NotFound)
        );
    }

    #[test]
    fn malformed_coordinate_aborts_resolution() {
        let lookup = LookupResult::new(vec![
            candidate("Marunouchi", "139.766", "35.681"),
            candidate("Marunouchi", "east", "35.681"),
        ]);
        assert_eq!(
            resolve(&lookup),
            Err(ResolveError::MalformedCoordinate {
                field: "longitude",
                value: "east".to_string(),
            })
        );
    }

    #[test]
    fn custom_reference_point_changes_distance() {
        let resolver = Resolver::new(Coordinate::new(139.766, 35.681));
        let lookup = LookupResult::new(vec![candidate("Marunouchi", "139.766", "35.681")]);
        let info = resolver.resolve(&lookup).unwrap();
        assert!(info.distance_km.abs() < f64::EPSILON);
        assert_eq!(resolver.reference(), Coordinate::new(139.766, 35.681));
    }

    #[test]
    fn default_resolver_uses_tokyo_station() {
        assert_eq!(Resolver::default().reference(), TOKYO_STATION);
    }
}
