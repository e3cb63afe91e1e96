pub mod base64url;

#[cfg(feature = "ecdsa")]
pub(crate) mod sig;

pub use base64url::{decode, decode_bytes, encode, encode_bytes};
