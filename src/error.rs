//! Errors for jwtmint
//!
//! Every failure in decoding, signing, and verification is a distinct
//! variant so callers can branch on the exact contract violation. Nothing
//! is recovered silently and nothing is retried; the first violated gate
//! is the one reported.

use crate::claims::ClaimType;
use thiserror::Error;

/// Errors that can occur while decoding, signing, or verifying a token.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    // ============================================================================
    // Claim Access Errors
    // ============================================================================
    /// A non-optional claim accessor was used and the claim is absent.
    #[error("Claim '{0}' not found")]
    ClaimNotFound(String),

    /// A claim value was accessed under a tag it does not carry.
    #[error("Claim has type {actual}, expected {expected}")]
    TypeMismatch {
        expected: ClaimType,
        actual: ClaimType,
    },

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not registered with this verifier")]
    AlgorithmUnsupported(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Signature generation failed: {0}")]
    SignatureGenerationFailed(String),

    // ============================================================================
    // Time Window Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    TokenIssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    // ============================================================================
    // Expected Claim Errors
    // ============================================================================
    /// The verifier expects a claim the token does not carry.
    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    /// The token carries the expected claim under a different tag.
    #[error("Token claim '{claim}' has type {actual}, expected {expected}")]
    TokenClaimTypeMismatch {
        claim: String,
        expected: ClaimType,
        actual: ClaimType,
    },

    #[error("Token claim '{claim}' does not match the expected value")]
    TokenClaimMismatch { claim: String },

    /// Expected-claim comparison is only defined for dates, string sets,
    /// and strings; anything else fails closed.
    #[error("Token claim '{claim}' has type {claim_type} which cannot be compared")]
    TokenClaimUncomparable {
        claim: String,
        claim_type: ClaimType,
    },
}

/// Result type alias for jwtmint operations
pub type Result<T> = std::result::Result<T, Error>;
