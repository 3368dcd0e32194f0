//! Geo API response types.
//!
//! Every response is wrapped in `{"response": {...}}`. A successful lookup
//! carries a `location` array; an unknown postal code carries an `error`
//! message instead.

use serde::Deserialize;
use yubin_core::LocationCandidate;

/// Top-level envelope: `{ "response": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct GeoApiResponse {
    pub response: ResponseBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub location: Vec<GeoLocation>,
    /// Set instead of `location` when the API has no match, e.g.
    /// `"Postal code does not exist."`.
    #[serde(default)]
    pub error: Option<String>,
}

/// One location entry from `searchByPostal`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub city: String,
    #[serde(default)]
    pub city_kana: Option<String>,
    pub town: String,
    #[serde(default)]
    pub town_kana: Option<String>,
    /// Longitude as a decimal string.
    pub x: String,
    /// Latitude as a decimal string.
    pub y: String,
    pub prefecture: String,
    pub postal: String,
}

impl From<GeoLocation> for LocationCandidate {
    fn from(location: GeoLocation) -> Self {
        Self {
            city: location.city,
            town: location.town,
            prefecture: location.prefecture,
            postal_code: location.postal,
            longitude: location.x,
            latitude: location.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_location_list() {
        let body = r#"{"response":{"location":[{
            "city":"千代田区","city_kana":"ちよだく",
            "town":"丸の内","town_kana":"まるのうち",
            "x":"139.766084","y":"35.681382",
            "prefecture":"東京都","postal":"1000005"
        }]}}"#;
        let parsed: GeoApiResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.response.error.is_none());
        assert_eq!(parsed.response.location.len(), 1);

        let candidate = LocationCandidate::from(parsed.response.location[0].clone());
        assert_eq!(candidate.town, "丸の内");
        assert_eq!(candidate.postal_code, "1000005");
        assert_eq!(candidate.longitude, "139.766084");
        assert_eq!(candidate.latitude, "35.681382");
    }

    #[test]
    fn deserializes_error_envelope_without_locations() {
        let body = r#"{"response":{"error":"Postal code does not exist."}}"#;
        let parsed: GeoApiResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.response.location.is_empty());
        assert_eq!(
            parsed.response.error.as_deref(),
            Some("Postal code does not exist.")
        );
    }

    #[test]
    fn kana_fields_are_optional() {
        let body = r#"{"response":{"location":[{
            "city":"Chiyoda","town":"Marunouchi",
            "x":"139.766","y":"35.681",
            "prefecture":"Tokyo","postal":"1000005"
        }]}}"#;
        let parsed: GeoApiResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.response.location[0].city_kana.is_none());
    }
}
