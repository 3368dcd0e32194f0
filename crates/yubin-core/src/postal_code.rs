use std::fmt;

use crate::CoreError;

const POSTAL_CODE_LEN: usize = 7;

/// A Japanese postal code: exactly seven ASCII digits, no hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validates `raw` as a postal code.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPostalCode`] unless `raw` is seven ASCII
    /// digits. Full-width digits, signs and surrounding whitespace are rejected.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() == POSTAL_CODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(CoreError::InvalidPostalCode(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
