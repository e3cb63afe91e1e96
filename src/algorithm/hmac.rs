//! HMAC algorithms (HS256, HS384, HS512)

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// HS256 algorithm (HMAC with SHA-256)
#[derive(Clone)]
pub struct HS256 {
    secret: Vec<u8>,
}

/// HS384 algorithm (HMAC with SHA-384)
#[derive(Clone)]
pub struct HS384 {
    secret: Vec<u8>,
}

/// HS512 algorithm (HMAC with SHA-512)
#[derive(Clone)]
pub struct HS512 {
    secret: Vec<u8>,
}

impl HS256 {
    /// Create an HS256 algorithm from a shared secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl HS384 {
    /// Create an HS384 algorithm from a shared secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl HS512 {
    /// Create an HS512 algorithm from a shared secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        verify_keyed_hash(&self.sign(data)?, signature)
    }
}

impl Algorithm for HS384 {
    fn name(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha384::new_from_slice(&self.secret)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        verify_keyed_hash(&self.sign(data)?, signature)
    }
}

impl Algorithm for HS512 {
    fn name(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha512::new_from_slice(&self.secret)
            .map_err(|e| Error::SignatureGenerationFailed(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        verify_keyed_hash(&self.sign(data)?, signature)
    }
}

/// Compare a recomputed MAC against the supplied signature.
///
/// The full overlapping length is examined in constant time before the
/// lengths are compared, so a mismatched byte and a truncated signature
/// take the same path.
fn verify_keyed_hash(expected: &[u8], signature: &[u8]) -> Result<()> {
    let overlap = expected.len().min(signature.len());
    let content_matches = constant_time_eq(&expected[..overlap], &signature[..overlap]);

    if !content_matches || signature.len() != expected.len() {
        return Err(Error::SignatureInvalid);
    }

    Ok(())
}
