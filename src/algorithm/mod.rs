//! Signature algorithms
//!
//! Three families are available: the unsecured `none` algorithm
//! ([`Unsecured`]), HMAC over SHA-2 ([`HS256`], [`HS384`], [`HS512`]) and,
//! behind the `ecdsa` feature, ECDSA over the NIST curves ([`ES256`],
//! [`ES384`], [`ES512`]). All of them implement [`Algorithm`], so a signer
//! takes any of them by reference and a verifier stores them boxed.

mod traits;

pub mod hmac;
pub mod none;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

pub use hmac::{HS256, HS384, HS512};
pub use none::Unsecured;
pub use traits::{Algorithm, BoxedAlgorithm};

#[cfg(feature = "ecdsa")]
pub use ecdsa::{
    ES256, ES384, ES512, P256SigningKey, P256VerifyingKey, P384SigningKey, P384VerifyingKey,
    P521SigningKey, P521VerifyingKey,
};
