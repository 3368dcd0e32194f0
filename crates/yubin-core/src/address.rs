use serde::{Deserialize, Serialize};

/// One locality matched by the geocoding service for a postal code.
///
/// Coordinates are kept as the numeric strings the upstream API returns;
/// parsing them is the resolver's job so that malformed values surface as a
/// resolution error rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub city: String,
    pub town: String,
    pub prefecture: String,
    /// Seven ASCII digits, identical across every candidate of one lookup.
    pub postal_code: String,
    /// Decimal degrees, e.g. `"139.766"`.
    pub longitude: String,
    /// Decimal degrees, e.g. `"35.681"`.
    pub latitude: String,
}

/// Ordered candidates returned by one lookup. Empty means "no such postal code".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub candidates: Vec<LocationCandidate>,
}

impl LookupResult {
    #[must_use]
    pub fn new(candidates: Vec<LocationCandidate>) -> Self {
        Self { candidates }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the first candidate, which supplies the prefecture and city of
    /// the resolved address.
    #[must_use]
    pub fn first(&self) -> Option<&LocationCandidate> {
        self.candidates.first()
    }
}

impl From<Vec<LocationCandidate>> for LookupResult {
    fn from(candidates: Vec<LocationCandidate>) -> Self {
        Self::new(candidates)
    }
}

/// The single address record resolved from a [`LookupResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub postal_code: String,
    pub hit_count: usize,
    /// Prefecture + city + the town prefix shared by all candidates.
    pub address: String,
    /// Farthest candidate distance from Tokyo Station, one decimal place.
    #[serde(rename = "tokyo_sta_distance")]
    pub distance_km: f64,
}

/// Number of logged lookups for one postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogCount {
    pub postal_code: String,
    pub request_count: i64,
}

/// Body of the access-log report, most requested postal code first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogSummary {
    pub access_logs: Vec<AccessLogCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_info_serializes_with_wire_field_names() {
        let info = AddressInfo {
            postal_code: "1000005".to_string(),
            hit_count: 1,
            address: "東京都千代田区丸の内".to_string(),
            distance_km: 0.1,
        };
        let json: serde_json::Value = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["postal_code"], "1000005");
        assert_eq!(json["hit_count"], 1);
        assert_eq!(json["address"], "東京都千代田区丸の内");
        assert_eq!(json["tokyo_sta_distance"], 0.1);
        assert!(json.get("distance_km").is_none());
    }

    #[test]
    fn access_log_summary_serializes_as_access_logs_array() {
        let summary = AccessLogSummary {
            access_logs: vec![AccessLogCount {
                postal_code: "1020082".to_string(),
                request_count: 3,
            }],
        };
        let json = serde_json::to_string(&summary).expect("serialize");
        assert_eq!(
            json,
            r#"{"access_logs":[{"postal_code":"1020082","request_count":3}]}"#
        );
    }

    #[test]
    fn lookup_result_first_is_none_when_empty() {
        let lookup = LookupResult::default();
        assert!(lookup.is_empty());
        assert_eq!(lookup.len(), 0);
        assert!(lookup.first().is_none());
    }
}
