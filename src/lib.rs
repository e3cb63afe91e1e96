//! # jwtmint - Compact Signed Tokens
//!
//! > Minimal minting and verification of JWT-style compact tokens for Rust.
//!
//! **jwtmint** creates and checks tokens in the familiar three-segment form
//! `base64url(header).base64url(payload).base64url(signature)`. A fluent
//! [`Builder`] collects claims and signs them, [`DecodedToken`] splits and
//! decodes the wire form without trusting it, and a configurable
//! [`Verifier`] checks the signature, the time windows and any expected
//! claim values in one pass.
//!
//! ## Overview
//!
//! Tokens encode claims as JSON objects secured by a message authentication
//! code or a digital signature. Handling them correctly means restoring the
//! stripped base64url padding, recomputing signatures over the exact bytes
//! that were signed (never a re-serialization), comparing MACs in constant
//! time, and treating every claim as untrusted until the signature checks
//! out. **jwtmint** keeps those rules in the library so callers don't
//! reimplement them.
//!
//! Claims are dynamically typed: a [`Claim`] wraps a JSON value and exposes
//! typed accessors (`as_string`, `as_int`, `as_date`, `as_set`, ...) that
//! fail with a typed error instead of coercing. Integer and floating-point
//! values are distinct, and date claims are integer seconds since the Unix
//! epoch (RFC 7519 NumericDate).
//!
//! ## Quick Start
//!
//! ```
//! use jwtmint::{Builder, DecodedToken, Verifier, HS256};
//!
//! let token_str = Builder::new()
//!     .issuer("https://issuer.example.com")
//!     .subject("user-1")
//!     .expires_at(4_102_444_800) // 2100-01-01
//!     .sign(&HS256::new("your-256-bit-secret"))?;
//!
//! let token = DecodedToken::from_string(&token_str)?;
//!
//! let verifier = Verifier::new()
//!     .allow_algorithm(HS256::new("your-256-bit-secret"))
//!     .with_issuer("https://issuer.example.com");
//! verifier.verify(&token)?;
//!
//! assert_eq!(token.subject()?, "user-1");
//! # Ok::<(), jwtmint::Error>(())
//! ```
//!
//! ## Algorithm Support
//!
//! All algorithms implement a common [`Algorithm`] trait:
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **ECDSA** (with `ecdsa` feature, on by default): ES256, ES384, ES512
//! - **Unsecured**: the `none` algorithm, accepted only when registered
//!
//! ECDSA signatures use the raw fixed-width `r || s` encoding from RFC 7518
//! (64, 96 or 132 bytes), not ASN.1 DER.
//!
//! ## Security
//!
//! ### Algorithm Allow-List
//!
//! A [`Verifier`] only accepts algorithms registered through
//! [`allow_algorithm`](Verifier::allow_algorithm). The token's `alg` header
//! selects among the registered instances and can never introduce one,
//! which closes the classic algorithm confusion attacks.
//!
//! ### Unsigned Tokens
//!
//! The `none` algorithm is never part of a default configuration. Accepting
//! unsigned tokens requires registering [`Unsecured`] explicitly, and even
//! then tokens carrying a non-empty signature are rejected.
//!
//! ### Timing Attack Protection
//!
//! HMAC verification recomputes the MAC and compares it with the
//! [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate,
//! examining the full overlapping length before the length check.
//!
//! ### Signing Randomness
//!
//! ECDSA signing draws fresh randomness from the operating system on every
//! call. There is no shared RNG state, so algorithm instances can sign
//! concurrently from multiple threads.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) — JSON Web Signature (JWS)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518) — JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) — JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) — JSON Web Signature Best Practices

// Core modules
pub mod error;
pub mod utils;

// Claim model
pub mod claims;

// Algorithm system
pub mod algorithm;

// Token codec and builder
pub mod builder;
pub mod token;

// Verifier (main public API)
pub mod verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

// Main flow types
pub use builder::Builder;
pub use token::DecodedToken;
pub use verifier::{Clock, SystemClock, Verifier};

// Claim model
pub use claims::{names, Claim, ClaimMap, ClaimType};

// Algorithms
pub use algorithm::{Algorithm, BoxedAlgorithm, Unsecured, HS256, HS384, HS512};

#[cfg(feature = "ecdsa")]
pub use algorithm::{
    ES256, ES384, ES512, P256SigningKey, P256VerifyingKey, P384SigningKey, P384VerifyingKey,
    P521SigningKey, P521VerifyingKey,
};

// Errors
pub use error::{Error, Result};
