//! Token decoding
//!
//! [`DecodedToken`] splits a compact token into its three dot-separated
//! segments, restores the stripped base64url padding, and parses header and
//! payload into [`ClaimMap`]s. Decoding performs no signature or claim
//! checks; pass the decoded token to a [`Verifier`](crate::Verifier) before
//! trusting anything in it.

use std::collections::BTreeSet;

use crate::claims::{names, Claim, ClaimMap};
use crate::error::{Error, Result};
use crate::utils::base64url;

/// A compact token that has been decoded but not verified.
///
/// The original base64url segments are kept alongside the decoded JSON, so
/// verification can recompute the signature over the exact bytes that were
/// signed even when the embedded JSON would re-serialize differently.
pub struct DecodedToken {
    token: String,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    raw_header: String,
    raw_payload: String,
    signature: Vec<u8>,
    header: ClaimMap,
    payload: ClaimMap,
}

impl DecodedToken {
    /// Decode a token in `header.payload.signature` form.
    ///
    /// # Example
    /// ```
    /// use jwtmint::DecodedToken;
    ///
    /// let token = DecodedToken::from_string(
    ///     "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
    ///      eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
    ///      SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c",
    /// ).unwrap();
    ///
    /// assert_eq!(token.algorithm().unwrap(), "HS256");
    /// assert_eq!(token.subject().unwrap(), "1234567890");
    /// ```
    pub fn from_string(token: &str) -> Result<Self> {
        let mut parts = token.splitn(3, '.');
        let header_b64 = parts.next().ok_or(Error::FormatInvalid)?.to_string();
        let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?.to_string();
        let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?.to_string();

        let raw_header = base64url::decode(&header_b64)?;
        let raw_payload = base64url::decode(&payload_b64)?;
        let signature = base64url::decode_bytes(&signature_b64)?;

        let header = ClaimMap::from_json(&raw_header)?;
        let payload = ClaimMap::from_json(&raw_payload)?;

        Ok(Self {
            token: token.to_string(),
            header_b64,
            payload_b64,
            signature_b64,
            raw_header,
            raw_payload,
            signature,
            header,
            payload,
        })
    }

    // ==== Raw segments ====

    /// The complete token as it was decoded.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The header segment, still base64url-encoded.
    pub fn header_base64(&self) -> &str {
        &self.header_b64
    }

    /// The payload segment, still base64url-encoded.
    pub fn payload_base64(&self) -> &str {
        &self.payload_b64
    }

    /// The signature segment, still base64url-encoded.
    pub fn signature_base64(&self) -> &str {
        &self.signature_b64
    }

    /// The decoded header JSON.
    pub fn raw_header(&self) -> &str {
        &self.raw_header
    }

    /// The decoded payload JSON.
    ///
    /// Do not trust this data before signature verification.
    pub fn raw_payload(&self) -> &str {
        &self.raw_payload
    }

    /// The decoded signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The exact bytes the signature covers: the original header and
    /// payload segments joined by a dot.
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    // ==== Claim maps ====

    /// All header claims.
    pub fn header(&self) -> &ClaimMap {
        &self.header
    }

    /// All payload claims.
    pub fn payload(&self) -> &ClaimMap {
        &self.payload
    }

    /// Look up a header claim by name.
    pub fn header_claim(&self, name: &str) -> Result<&Claim> {
        self.header.get(name)
    }

    /// Look up a payload claim by name.
    pub fn payload_claim(&self, name: &str) -> Result<&Claim> {
        self.payload.get(name)
    }

    /// Whether a header claim is present.
    pub fn has_header_claim(&self, name: &str) -> bool {
        self.header.has(name)
    }

    /// Whether a payload claim is present.
    pub fn has_payload_claim(&self, name: &str) -> bool {
        self.payload.has(name)
    }

    // ==== Header claims ====

    /// The `alg` header claim.
    pub fn algorithm(&self) -> Result<&str> {
        self.header_claim(names::ALGORITHM)?.as_string()
    }

    /// The `typ` header claim.
    pub fn token_type(&self) -> Result<&str> {
        self.header_claim(names::TOKEN_TYPE)?.as_string()
    }

    /// The `cty` header claim.
    pub fn content_type(&self) -> Result<&str> {
        self.header_claim(names::CONTENT_TYPE)?.as_string()
    }

    /// The `kid` header claim.
    pub fn key_id(&self) -> Result<&str> {
        self.header_claim(names::KEY_ID)?.as_string()
    }

    /// Whether the `alg` header claim is present.
    pub fn has_algorithm(&self) -> bool {
        self.has_header_claim(names::ALGORITHM)
    }

    /// Whether the `typ` header claim is present.
    pub fn has_token_type(&self) -> bool {
        self.has_header_claim(names::TOKEN_TYPE)
    }

    /// Whether the `cty` header claim is present.
    pub fn has_content_type(&self) -> bool {
        self.has_header_claim(names::CONTENT_TYPE)
    }

    /// Whether the `kid` header claim is present.
    pub fn has_key_id(&self) -> bool {
        self.has_header_claim(names::KEY_ID)
    }

    // ==== Payload claims ====

    /// The `iss` payload claim.
    pub fn issuer(&self) -> Result<&str> {
        self.payload_claim(names::ISSUER)?.as_string()
    }

    /// The `sub` payload claim.
    pub fn subject(&self) -> Result<&str> {
        self.payload_claim(names::SUBJECT)?.as_string()
    }

    /// The `jti` payload claim.
    pub fn id(&self) -> Result<&str> {
        self.payload_claim(names::TOKEN_ID)?.as_string()
    }

    /// The `aud` payload claim as a set of audience names.
    ///
    /// A single string audience yields a one-element set (RFC 7519
    /// Section 4.1.3 allows both forms).
    pub fn audience(&self) -> Result<BTreeSet<String>> {
        let claim = self.payload_claim(names::AUDIENCE)?;

        match claim.as_string() {
            Ok(single) => Ok(BTreeSet::from([single.to_string()])),
            Err(_) => claim.as_set(),
        }
    }

    /// The `exp` payload claim as seconds since the Unix epoch.
    pub fn expires_at(&self) -> Result<i64> {
        self.payload_claim(names::EXPIRATION)?.as_date()
    }

    /// The `nbf` payload claim as seconds since the Unix epoch.
    pub fn not_before(&self) -> Result<i64> {
        self.payload_claim(names::NOT_BEFORE)?.as_date()
    }

    /// The `iat` payload claim as seconds since the Unix epoch.
    pub fn issued_at(&self) -> Result<i64> {
        self.payload_claim(names::ISSUED_AT)?.as_date()
    }

    /// Whether the `iss` payload claim is present.
    pub fn has_issuer(&self) -> bool {
        self.has_payload_claim(names::ISSUER)
    }

    /// Whether the `sub` payload claim is present.
    pub fn has_subject(&self) -> bool {
        self.has_payload_claim(names::SUBJECT)
    }

    /// Whether the `jti` payload claim is present.
    pub fn has_id(&self) -> bool {
        self.has_payload_claim(names::TOKEN_ID)
    }

    /// Whether the `aud` payload claim is present.
    pub fn has_audience(&self) -> bool {
        self.has_payload_claim(names::AUDIENCE)
    }

    /// Whether the `exp` payload claim is present.
    pub fn has_expires_at(&self) -> bool {
        self.has_payload_claim(names::EXPIRATION)
    }

    /// Whether the `nbf` payload claim is present.
    pub fn has_not_before(&self) -> bool {
        self.has_payload_claim(names::NOT_BEFORE)
    }

    /// Whether the `iat` payload claim is present.
    pub fn has_issued_at(&self) -> bool {
        self.has_payload_claim(names::ISSUED_AT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ClaimType;

    fn make_token(header: &str, payload: &str, signature: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            base64url::encode(header),
            base64url::encode(payload),
            base64url::encode_bytes(signature)
        )
    }

    #[test]
    fn test_decode_valid_token() {
        let token_str = make_token(
            r#"{"alg":"HS256","typ":"JWT"}"#,
            r#"{"iss":"auth0","sub":"user-1","exp":1700000000}"#,
            b"signature",
        );

        let token = DecodedToken::from_string(&token_str).unwrap();
        assert_eq!(token.algorithm().unwrap(), "HS256");
        assert_eq!(token.token_type().unwrap(), "JWT");
        assert_eq!(token.issuer().unwrap(), "auth0");
        assert_eq!(token.subject().unwrap(), "user-1");
        assert_eq!(token.expires_at().unwrap(), 1_700_000_000);
        assert_eq!(token.signature(), b"signature");
        assert_eq!(token.token(), token_str);
    }

    #[test]
    fn test_decode_preserves_original_segments() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{"sub":"user-1"}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        let expected = format!("{}.{}", token.header_base64(), token.payload_base64());
        assert_eq!(token.signing_input(), expected);
        assert!(token_str.starts_with(&expected));
    }

    #[test]
    fn test_decode_too_few_parts() {
        assert!(matches!(
            DecodedToken::from_string("only.two"),
            Err(Error::FormatInvalid)
        ));
        assert!(matches!(
            DecodedToken::from_string("nodots"),
            Err(Error::FormatInvalid)
        ));
        assert!(matches!(
            DecodedToken::from_string(""),
            Err(Error::FormatInvalid)
        ));
    }

    #[test]
    fn test_decode_extra_dot_lands_in_signature() {
        // The third split keeps the rest of the string, so an extra dot
        // corrupts the signature segment rather than panicking.
        let token_str = format!("{}.extra", make_token(r#"{"alg":"none"}"#, r#"{}"#, b""));

        let result = DecodedToken::from_string(&token_str);
        assert!(matches!(result, Err(Error::FormatInvalidBase64(_))));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = DecodedToken::from_string("!!!.e30.e30");
        assert!(matches!(result, Err(Error::FormatInvalidBase64(_))));
    }

    #[test]
    fn test_decode_invalid_json() {
        let token_str = format!(
            "{}.{}.{}",
            base64url::encode("not json"),
            base64url::encode("{}"),
            base64url::encode("sig")
        );

        let result = DecodedToken::from_string(&token_str);
        assert!(matches!(result, Err(Error::FormatInvalidJson(_))));
    }

    #[test]
    fn test_decode_non_object_payload() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"[1,2,3]"#, b"");

        let result = DecodedToken::from_string(&token_str);
        assert!(matches!(result, Err(Error::FormatInvalidJson(_))));
    }

    #[test]
    fn test_empty_signature_segment() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        assert!(token.signature().is_empty());
        assert_eq!(token.signature_base64(), "");
    }

    #[test]
    fn test_audience_single_string() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{"aud":"api"}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        let audience = token.audience().unwrap();
        assert_eq!(audience, BTreeSet::from(["api".to_string()]));
    }

    #[test]
    fn test_audience_array() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{"aud":["api","web"]}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        let audience = token.audience().unwrap();
        assert_eq!(
            audience,
            BTreeSet::from(["api".to_string(), "web".to_string()])
        );
    }

    #[test]
    fn test_missing_claim_accessors() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{"sub":"user-1"}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        assert!(!token.has_issuer());
        assert!(!token.has_expires_at());
        assert!(matches!(token.issuer(), Err(Error::ClaimNotFound(_))));
        assert!(matches!(token.key_id(), Err(Error::ClaimNotFound(_))));
    }

    #[test]
    fn test_wrong_claim_type_accessor() {
        let token_str = make_token(r#"{"alg":"none"}"#, r#"{"sub":42}"#, b"");
        let token = DecodedToken::from_string(&token_str).unwrap();

        assert!(matches!(
            token.subject(),
            Err(Error::TypeMismatch {
                expected: ClaimType::String,
                actual: ClaimType::Integer,
            })
        ));
    }

    #[test]
    fn test_custom_claims_accessible() {
        let token_str = make_token(
            r#"{"alg":"none","kid":"key-1"}"#,
            r#"{"role":"admin","level":3}"#,
            b"",
        );
        let token = DecodedToken::from_string(&token_str).unwrap();

        assert_eq!(token.key_id().unwrap(), "key-1");
        assert_eq!(
            token.payload_claim("role").unwrap().as_string().unwrap(),
            "admin"
        );
        assert_eq!(token.payload_claim("level").unwrap().as_int().unwrap(), 3);
        assert!(token.has_payload_claim("role"));
        assert!(!token.has_payload_claim("missing"));
    }
}
