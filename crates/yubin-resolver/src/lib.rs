//! Postal-code resolution engine.
//!
//! Turns the candidates of one geocoding lookup into a single [`AddressInfo`]:
//! the town names are reduced to their common prefix ([`prefix`]) and the
//! candidate coordinates are reduced to the farthest distance from a fixed
//! reference point ([`distance`]). Everything here is pure and synchronous.
//!
//! [`AddressInfo`]: yubin_core::AddressInfo

pub mod distance;
pub mod engine;
pub mod error;
pub mod prefix;

pub use distance::{farthest_distance_km, Coordinate, EARTH_RADIUS_KM, TOKYO_STATION};
pub use engine::{resolve, Resolver};
pub use error::ResolveError;
pub use prefix::common_prefix;
