//! Client for the HeartRails Geo API `searchByPostal` endpoint.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{GeoApiClient, GeoApiClientConfig, GeoLookup};
pub use error::GeoApiError;
pub use types::{GeoApiResponse, GeoLocation, ResponseBody};
