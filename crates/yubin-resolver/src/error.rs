use thiserror::Error;

/// Errors that abort resolution of a single lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The reducer or estimator was handed an empty set.
    #[error("invalid input: {0} is empty")]
    InvalidInput(&'static str),

    /// The lookup returned no candidates; the postal code does not exist.
    #[error("postal_code is invalid")]
    NotFound,

    /// A longitude or latitude from upstream is not a finite decimal number.
    #[error("malformed coordinate {field}={value:?}")]
    MalformedCoordinate { field: &'static str, value: String },
}
