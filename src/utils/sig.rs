//! Raw ECDSA signature encoding
//!
//! The compact serialization carries an ECDSA signature as `r || s`, each
//! component a fixed-width big-endian unsigned integer sized to the curve
//! order (32 bytes for P-256, 48 for P-384, 66 for P-521) — not a
//! self-describing structure. Bignum-facing code instead deals in
//! signed-magnitude buffers, where a set top bit needs a zero prefix to
//! keep the value positive. These helpers translate between the two
//! shapes.

use crate::error::{Error, Result};

/// Split a raw signature into `(r, s)` halves of exactly `width` bytes each.
pub(crate) fn split_components(signature: &[u8], width: usize) -> Result<(&[u8], &[u8])> {
    if signature.len() != width * 2 {
        return Err(Error::SignatureInvalid);
    }
    Ok(signature.split_at(width))
}

/// Lift a fixed-width component into signed-magnitude bignum bytes.
///
/// If the top bit is set, the value would read as negative; prepend 0x00.
pub(crate) fn component_to_bignum(component: &[u8]) -> Vec<u8> {
    if component.first().is_some_and(|b| b & 0x80 != 0) {
        let mut prefixed = Vec::with_capacity(component.len() + 1);
        prefixed.push(0x00);
        prefixed.extend_from_slice(component);
        prefixed
    } else {
        component.to_vec()
    }
}

/// Lower bignum bytes onto the wire as exactly `width` bytes.
///
/// A component one byte over the width is accepted only when the extra
/// byte is the sign-disambiguation zero, which is stripped; shorter
/// components are left-padded with zeros. Anything wider is an error.
pub(crate) fn component_to_wire(component: &[u8], width: usize) -> Result<Vec<u8>> {
    let component = if component.len() == width + 1 && component[0] == 0x00 {
        &component[1..]
    } else {
        component
    };
    if component.len() > width {
        return Err(Error::SignatureGenerationFailed(format!(
            "signature component is {} bytes, curve width is {}",
            component.len(),
            width
        )));
    }
    let mut wire = vec![0u8; width - component.len()];
    wire.extend_from_slice(component);
    Ok(wire)
}

/// Join bignum-form `r` and `s` into the raw wire signature
/// `pad(r, width) || pad(s, width)`.
pub(crate) fn join_components(r: &[u8], s: &[u8], width: usize) -> Result<Vec<u8>> {
    let mut signature = component_to_wire(r, width)?;
    signature.extend_from_slice(&component_to_wire(s, width)?);
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_requires_exact_length() {
        let sig = vec![0xaa; 64];
        let (r, s) = split_components(&sig, 32).unwrap();
        assert_eq!(r.len(), 32);
        assert_eq!(s.len(), 32);

        assert!(matches!(
            split_components(&vec![0xaa; 63], 32),
            Err(Error::SignatureInvalid)
        ));
        assert!(matches!(
            split_components(&vec![0xaa; 65], 32),
            Err(Error::SignatureInvalid)
        ));
        assert!(matches!(
            split_components(&[], 32),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_bignum_lift_prepends_zero_for_high_bit() {
        let mut component = vec![0x80u8];
        component.extend_from_slice(&[0x11; 31]);
        let bignum = component_to_bignum(&component);
        assert_eq!(bignum.len(), 33);
        assert_eq!(bignum[0], 0x00);
        assert_eq!(&bignum[1..], &component[..]);
    }

    #[test]
    fn test_bignum_lift_keeps_low_values() {
        let component = [0x7f; 32];
        assert_eq!(component_to_bignum(&component), component.to_vec());
        assert_eq!(component_to_bignum(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_wire_pads_short_components() {
        // 31-byte natural encoding must come out as 32 bytes on the wire.
        let wire = component_to_wire(&[0x01; 31], 32).unwrap();
        assert_eq!(wire.len(), 32);
        assert_eq!(wire[0], 0x00);
        assert_eq!(&wire[1..], &[0x01; 31]);
    }

    #[test]
    fn test_wire_strips_sign_zero() {
        let mut bignum = vec![0x00u8];
        bignum.extend_from_slice(&[0xffu8; 32]);
        let wire = component_to_wire(&bignum, 32).unwrap();
        assert_eq!(wire, vec![0xff; 32]);
    }

    #[test]
    fn test_wire_rejects_oversized_components() {
        // One byte over width without a leading zero is not a sign prefix.
        let mut bignum = vec![0x01u8];
        bignum.extend_from_slice(&[0xffu8; 32]);
        assert!(matches!(
            component_to_wire(&bignum, 32),
            Err(Error::SignatureGenerationFailed(_))
        ));
        assert!(component_to_wire(&[0x00; 34], 32).is_err());
    }

    #[test]
    fn test_high_bit_round_trip_keeps_width() {
        // Lift then lower must not widen a component whose top byte is >= 0x80.
        let component = [0xc3u8; 32];
        let bignum = component_to_bignum(&component);
        assert_eq!(bignum.len(), 33);
        let wire = component_to_wire(&bignum, 32).unwrap();
        assert_eq!(wire, component.to_vec());
    }

    #[test]
    fn test_join_components_widths() {
        for width in [32usize, 48, 66] {
            let r = vec![0x85; width];
            let s = vec![0x03; width - 1];
            let sig = join_components(&component_to_bignum(&r), &component_to_bignum(&s), width)
                .unwrap();
            assert_eq!(sig.len(), width * 2);
            assert_eq!(&sig[..width], &r[..]);
            assert_eq!(sig[width], 0x00);
            assert_eq!(&sig[width + 1..], &s[..]);
        }
    }
}
