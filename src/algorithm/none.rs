//! The unsecured `none` algorithm

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};

/// The `none` algorithm: tokens carry an empty signature (RFC 7519
/// Section 6, "Unsecured JWTs").
///
/// Nothing is authenticated. A [`Verifier`](crate::Verifier) only accepts
/// unsigned tokens when this algorithm is registered explicitly; it is
/// never part of any default configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsecured;

impl Algorithm for Unsecured {
    fn name(&self) -> &'static str {
        "none"
    }

    fn sign(&self, _data: &[u8]) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn verify(&self, _data: &[u8], signature: &[u8]) -> Result<()> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_signs_to_empty() {
        let signature = Unsecured.sign(b"header.payload").unwrap();
        assert!(signature.is_empty());
    }

    #[test]
    fn test_none_accepts_empty_signature() {
        assert!(Unsecured.verify(b"header.payload", b"").is_ok());
    }

    #[test]
    fn test_none_rejects_nonempty_signature() {
        let result = Unsecured.verify(b"header.payload", b"\x00");
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_none_name() {
        assert_eq!(Unsecured.name(), "none");
    }
}
