use async_trait::async_trait;

/// Trait for the request-boundary authentication check.
///
/// A validator extracts the credential from the request, verifies it and
/// produces the claims that protected handlers receive. The HTTP layer is
/// generic over this trait, so a route only states that it requires
/// authentication, not how authentication is done.
///
/// # Implementation Note
///
/// The validator receives `RequestParts` (headers, method, URI, extensions)
/// rather than the full request, which keeps non-`Sync` bodies out of the
/// future and is all a credential check needs.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// Identity attached to the request once validation succeeds.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Send + Sync;

    /// Errors that can occur during validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate authentication from the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential is present or it is malformed
    /// - The credential is unknown, expired or revoked
    /// - The identity it belongs to no longer exists
    /// - The backing store failed
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
