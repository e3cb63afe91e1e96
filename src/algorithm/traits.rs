use crate::error::Result;

/// Capability implemented by every signing algorithm.
///
/// An instance owns whatever key material it needs: a shared secret for the
/// HMAC family, a key pair (or just the public half) for ECDSA, nothing at
/// all for [`Unsecured`](crate::algorithm::Unsecured). Both `sign` and
/// `verify` operate on the raw signing input, i.e. the bytes of
/// `base64url(header).base64url(payload)`.
pub trait Algorithm {
    /// Identifier carried in the header `alg` claim (e.g. `"HS256"`).
    ///
    /// The verifier uses this string as its registry key, so it must match
    /// what signers of the same family emit.
    fn name(&self) -> &'static str;

    /// Produce a raw signature over `data`.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Check that `signature` authenticates `data` under this instance's
    /// key material.
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()>;
}

/// Type alias for boxed algorithm trait objects, as stored in a verifier.
pub type BoxedAlgorithm = Box<dyn Algorithm + Send + Sync>;
