use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{
    natural_key::{CountryCode, NaturalKey, Phone},
    password::{Password, PasswordHash},
    validation::ValidationErrors,
};

/// Surrogate key of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be at most 255 characters")]
    TooLong(&'static str),
}

/// One display name part (first or last name), trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn parse(value: String, label: &'static str) -> Result<Self, NameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(NameError::Missing(label));
        }
        if value.chars().count() > 255 {
            return Err(NameError::TooLong(label));
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user as exposed on every read path. There is deliberately no password
/// field here; see [`UserCredentials`] for the login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub firstname: Name,
    pub lastname: Name,
    pub country_code: CountryCode,
    pub phone: Phone,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.country_code.clone(), self.phone.clone())
    }
}

/// Result of a natural-key lookup: the user together with the stored hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// A user ready to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: Name,
    pub lastname: Name,
    pub natural_key: NaturalKey,
    pub password_hash: PasswordHash,
}

/// Store-level partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub firstname: Option<Name>,
    pub lastname: Option<Name>,
    pub password_hash: Option<PasswordHash>,
}

/// Validated input of a registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub firstname: Name,
    pub lastname: Name,
    pub natural_key: NaturalKey,
    pub password: Password,
}

impl Registration {
    pub fn parse(
        firstname: String,
        lastname: String,
        country_code: String,
        phone: String,
        password: Secret<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let firstname = errors.check("firstname", Name::parse(firstname, "Firstname"));
        let lastname = errors.check("lastname", Name::parse(lastname, "Lastname"));
        let country_code = errors.check("countryCode", CountryCode::try_from(country_code));
        let phone = errors.check("phone", Phone::try_from(phone));
        let password = errors.check("password", Password::try_from(password));

        match (firstname, lastname, country_code, phone, password) {
            (Some(firstname), Some(lastname), Some(country_code), Some(phone), Some(password)) => {
                Ok(Self {
                    firstname,
                    lastname,
                    natural_key: NaturalKey::new(country_code, phone),
                    password,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validated input of a profile update request.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub firstname: Option<Name>,
    pub lastname: Option<Name>,
    pub password: Option<Password>,
}

impl ProfileUpdate {
    pub fn parse(
        firstname: Option<String>,
        lastname: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let firstname = firstname.and_then(|v| errors.check("firstname", Name::parse(v, "Firstname")));
        let lastname = lastname.and_then(|v| errors.check("lastname", Name::parse(v, "Lastname")));
        let password = password.and_then(|v| errors.check("password", Password::try_from(v)));

        errors.into_result()?;

        Ok(Self {
            firstname,
            lastname,
            password,
        })
    }
}
