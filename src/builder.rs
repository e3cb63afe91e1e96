//! Token building and signing
//!
//! [`Builder`] collects header and payload claims through a fluent
//! interface, then [`sign`](Builder::sign) serializes both maps, stamps the
//! `alg` header claim and produces the compact
//! `base64url(header).base64url(payload).base64url(signature)` form.

use crate::algorithm::Algorithm;
use crate::claims::{names, Claim, ClaimMap};
use crate::error::Result;
use crate::utils::base64url;

/// Fluent builder for signed tokens.
///
/// # Example
/// ```
/// use jwtmint::{Builder, HS256};
///
/// let token = Builder::new()
///     .issuer("https://issuer.example.com")
///     .subject("user-1")
///     .expires_at(1_300_819_380)
///     .sign(&HS256::new("secret"))
///     .unwrap();
///
/// assert_eq!(token.split('.').count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    header: ClaimMap,
    payload: ClaimMap,
}

impl Builder {
    /// Create a builder with empty header and payload.
    pub fn new() -> Self {
        Self::default()
    }

    // ==== Payload claims ====

    /// Set the `iss` payload claim.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.payload.insert(names::ISSUER, issuer.into().into());
        self
    }

    /// Set the `sub` payload claim.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.payload.insert(names::SUBJECT, subject.into().into());
        self
    }

    /// Set the `aud` payload claim from one or more audience names.
    ///
    /// The claim is always written in the array form; duplicates collapse.
    pub fn audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payload
            .insert(names::AUDIENCE, Claim::from_set(audience));
        self
    }

    /// Set the `exp` payload claim in seconds since the Unix epoch.
    pub fn expires_at(mut self, seconds: i64) -> Self {
        self.payload
            .insert(names::EXPIRATION, Claim::from_date(seconds));
        self
    }

    /// Set the `nbf` payload claim in seconds since the Unix epoch.
    pub fn not_before(mut self, seconds: i64) -> Self {
        self.payload
            .insert(names::NOT_BEFORE, Claim::from_date(seconds));
        self
    }

    /// Set the `iat` payload claim in seconds since the Unix epoch.
    pub fn issued_at(mut self, seconds: i64) -> Self {
        self.payload
            .insert(names::ISSUED_AT, Claim::from_date(seconds));
        self
    }

    /// Set the `jti` payload claim.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.payload.insert(names::TOKEN_ID, id.into().into());
        self
    }

    /// Set an arbitrary payload claim.
    pub fn payload_claim(mut self, name: impl Into<String>, claim: impl Into<Claim>) -> Self {
        self.payload.insert(name, claim.into());
        self
    }

    // ==== Header claims ====

    /// Set the `typ` header claim.
    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.header
            .insert(names::TOKEN_TYPE, token_type.into().into());
        self
    }

    /// Set the `cty` header claim.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.header
            .insert(names::CONTENT_TYPE, content_type.into().into());
        self
    }

    /// Set the `kid` header claim.
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.header.insert(names::KEY_ID, key_id.into().into());
        self
    }

    /// Set an arbitrary header claim.
    pub fn header_claim(mut self, name: impl Into<String>, claim: impl Into<Claim>) -> Self {
        self.header.insert(name, claim.into());
        self
    }

    // ==== Signing ====

    /// Serialize, sign and assemble the compact token.
    ///
    /// The `alg` header claim is set to `algorithm.name()`, replacing any
    /// value put there earlier, so the emitted header always names the
    /// algorithm that produced the signature.
    pub fn sign(mut self, algorithm: &dyn Algorithm) -> Result<String> {
        self.header
            .insert(names::ALGORITHM, algorithm.name().into());

        let signing_input = format!(
            "{}.{}",
            base64url::encode(&self.header.to_json()),
            base64url::encode(&self.payload.to_json())
        );
        let signature = algorithm.sign(signing_input.as_bytes())?;

        Ok(format!(
            "{}.{}",
            signing_input,
            base64url::encode_bytes(&signature)
        ))
    }
}
