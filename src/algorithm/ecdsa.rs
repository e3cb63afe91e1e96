//! ECDSA algorithms over the NIST curves (ES256, ES384, ES512)
//!
//! Signatures travel in the raw fixed-width `r || s` form (RFC 7518
//! Section 3.4), not ASN.1 DER. Signing draws fresh randomness from the
//! operating system on every call, so one instance can sign from multiple
//! threads without shared RNG state.

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::utils::sig;

use p256::ecdsa::signature::{RandomizedSigner, Verifier};
use rand_core::OsRng;

pub use p256::ecdsa::{SigningKey as P256SigningKey, VerifyingKey as P256VerifyingKey};
pub use p384::ecdsa::{SigningKey as P384SigningKey, VerifyingKey as P384VerifyingKey};
pub use p521::ecdsa::{SigningKey as P521SigningKey, VerifyingKey as P521VerifyingKey};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
#[derive(Clone)]
pub struct ES256 {
    signing_key: Option<P256SigningKey>,
    verifying_key: P256VerifyingKey,
}

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
#[derive(Clone)]
pub struct ES384 {
    signing_key: Option<P384SigningKey>,
    verifying_key: P384VerifyingKey,
}

/// ES512 algorithm (ECDSA with P-521 and SHA-512)
#[derive(Clone)]
pub struct ES512 {
    signing_key: Option<P521SigningKey>,
    verifying_key: P521VerifyingKey,
}

impl ES256 {
    /// Width of each signature component: the P-256 field size in bytes.
    const COMPONENT_WIDTH: usize = 32;

    /// Create a signing-and-verifying algorithm from a private key.
    pub fn new(signing_key: P256SigningKey) -> Self {
        let verifying_key = *signing_key.verifying_key();
        Self {
            signing_key: Some(signing_key),
            verifying_key,
        }
    }

    /// Create a verify-only algorithm from a public key.
    pub fn public_only(verifying_key: P256VerifyingKey) -> Self {
        Self {
            signing_key: None,
            verifying_key,
        }
    }
}

impl ES384 {
    /// Width of each signature component: the P-384 field size in bytes.
    const COMPONENT_WIDTH: usize = 48;

    /// Create a signing-and-verifying algorithm from a private key.
    pub fn new(signing_key: P384SigningKey) -> Self {
        let verifying_key = *signing_key.verifying_key();
        Self {
            signing_key: Some(signing_key),
            verifying_key,
        }
    }

    /// Create a verify-only algorithm from a public key.
    pub fn public_only(verifying_key: P384VerifyingKey) -> Self {
        Self {
            signing_key: None,
            verifying_key,
        }
    }
}

impl ES512 {
    /// Width of each signature component: the P-521 field size in bytes.
    const COMPONENT_WIDTH: usize = 66;

    /// Create a signing-and-verifying algorithm from a private key.
    pub fn new(signing_key: P521SigningKey) -> Self {
        // p521 0.13 gates `SigningKey::verifying_key` behind a feature the
        // crate never defines; `From<&SigningKey>` is the same derivation.
        let verifying_key = P521VerifyingKey::from(&signing_key);
        Self {
            signing_key: Some(signing_key),
            verifying_key,
        }
    }

    /// Create a verify-only algorithm from a public key.
    pub fn public_only(verifying_key: P521VerifyingKey) -> Self {
        Self {
            signing_key: None,
            verifying_key,
        }
    }
}

impl Algorithm for ES256 {
    fn name(&self) -> &'static str {
        "ES256"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key = self.signing_key.as_ref().ok_or_else(missing_signing_key)?;

        let signature: p256::ecdsa::Signature = signing_key
            .try_sign_with_rng(&mut OsRng, data)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        let (r, s) = signature.split_bytes();

        sig::join_components(
            &sig::component_to_bignum(&r),
            &sig::component_to_bignum(&s),
            Self::COMPONENT_WIDTH,
        )
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let (r, s) = sig::split_components(signature, Self::COMPONENT_WIDTH)?;

        let signature = p256::ecdsa::Signature::from_scalars(
            p256::FieldBytes::clone_from_slice(r),
            p256::FieldBytes::clone_from_slice(s),
        )
        .map_err(|_| Error::SignatureInvalid)?;

        self.verifying_key
            .verify(data, &signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

impl Algorithm for ES384 {
    fn name(&self) -> &'static str {
        "ES384"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key = self.signing_key.as_ref().ok_or_else(missing_signing_key)?;

        let signature: p384::ecdsa::Signature = signing_key
            .try_sign_with_rng(&mut OsRng, data)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        let (r, s) = signature.split_bytes();

        sig::join_components(
            &sig::component_to_bignum(&r),
            &sig::component_to_bignum(&s),
            Self::COMPONENT_WIDTH,
        )
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let (r, s) = sig::split_components(signature, Self::COMPONENT_WIDTH)?;

        let signature = p384::ecdsa::Signature::from_scalars(
            p384::FieldBytes::clone_from_slice(r),
            p384::FieldBytes::clone_from_slice(s),
        )
        .map_err(|_| Error::SignatureInvalid)?;

        self.verifying_key
            .verify(data, &signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

impl Algorithm for ES512 {
    fn name(&self) -> &'static str {
        "ES512"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key = self.signing_key.as_ref().ok_or_else(missing_signing_key)?;

        let signature: p521::ecdsa::Signature = signing_key
            .try_sign_with_rng(&mut OsRng, data)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        let (r, s) = signature.split_bytes();

        sig::join_components(
            &sig::component_to_bignum(&r),
            &sig::component_to_bignum(&s),
            Self::COMPONENT_WIDTH,
        )
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let (r, s) = sig::split_components(signature, Self::COMPONENT_WIDTH)?;

        let signature = p521::ecdsa::Signature::from_scalars(
            p521::FieldBytes::clone_from_slice(r),
            p521::FieldBytes::clone_from_slice(s),
        )
        .map_err(|_| Error::SignatureInvalid)?;

        self.verifying_key
            .verify(data, &signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

fn missing_signing_key() -> Error {
    Error::SignatureGenerationFailed("No signing key available".to_string())
}
