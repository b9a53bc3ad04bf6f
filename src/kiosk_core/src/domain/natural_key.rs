use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{1,4}$").expect("valid country code regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,15}$").expect("valid phone regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NaturalKeyError {
    #[error("Country code is required")]
    MissingCountryCode,
    #[error("Invalid country code")]
    InvalidCountryCode,
    #[error("Phone is required")]
    MissingPhone,
    #[error("Phone number must be numeric and between 8-15 characters")]
    InvalidPhone,
}

/// Dialling prefix such as `+1` or `+358`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = NaturalKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(NaturalKeyError::MissingCountryCode);
        }
        if !COUNTRY_CODE_RE.is_match(value) {
            return Err(NaturalKeyError::InvalidCountryCode);
        }
        Ok(Self(value.to_owned()))
    }
}

/// Local phone number, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = NaturalKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(NaturalKeyError::MissingPhone);
        }
        if !PHONE_RE.is_match(value) {
            return Err(NaturalKeyError::InvalidPhone);
        }
        Ok(Self(value.to_owned()))
    }
}

/// The login identifier of a user: country code plus phone, unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub country_code: CountryCode,
    pub phone: Phone,
}

impl NaturalKey {
    pub fn new(country_code: CountryCode, phone: Phone) -> Self {
        Self {
            country_code,
            phone,
        }
    }
}
