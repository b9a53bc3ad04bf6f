use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use kiosk_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

/// Same algorithm and cost as `argon2()`, so verifying against it takes as
/// long as verifying a real password.
const DECOY_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$a2lvc2stZGVjb3ktc2FsdA$SytAmMvT8pW6p9LD2i903daDkdQP+ws8Wmuf9Uye4kA";

/// Argon2id password hashing. Work runs on the blocking pool so a login does
/// not stall the runtime.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        compute_password_hash(password)
            .await
            .map(PasswordHash::new)
            .map_err(PasswordHasherError)
    }

    async fn verify(
        &self,
        password: Password,
        expected: PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        verify_password_hash(expected.as_ref().clone(), password)
            .await
            .map_err(PasswordHasherError)
    }

    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::new(Secret::from(DECOY_PASSWORD_HASH.to_owned()))
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<bool, String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash =
                password_hash::PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            match argon2()?.verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e.to_string()),
            }
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            argon2()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
