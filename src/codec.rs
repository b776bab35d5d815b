//! `I2OSP`/`OS2IP` — the octet-string/integer conversions from
//! [RFC 8017 §4](https://datatracker.ietf.org/doc/html/rfc8017#section-4).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{Error, Result};

/// Converts a nonnegative integer `x` to an `x_len`-octet big-endian
/// representation.
///
/// # Errors
///
/// Returns [`Error::IntegerTooLarge`] if `x >= 256^x_len`.
pub fn i2osp(x: &BigUint, x_len: usize) -> Result<Vec<u8>> {
    if x.is_zero() {
        return if x_len == 0 {
            Ok(Vec::new())
        } else {
            Ok(vec![0u8; x_len])
        };
    }

    let bytes = x.to_bytes_be();

    if bytes.len() > x_len {
        return Err(Error::IntegerTooLarge(x_len));
    }

    let mut out = vec![0u8; x_len];
    let start = x_len - bytes.len();
    out[start..].copy_from_slice(&bytes);

    Ok(out)
}

/// Interprets an octet string `x` as a big-endian nonnegative integer.
///
/// Total: this never fails, including on an empty slice (which maps to
/// zero) and on slices with leading zero octets.
#[must_use]
pub fn os2ip(x: &[u8]) -> BigUint {
    if x.is_empty() {
        return BigUint::zero();
    }

    BigUint::from_bytes_be(x)
}

#[cfg(test)]
mod tests {
    use super::{i2osp, os2ip};
    use num_bigint::BigUint;

    #[test]
    fn i2osp_pads_to_length() {
        let x = BigUint::from(0x1234u32);
        assert_eq!(i2osp(&x, 4).unwrap(), vec![0x00, 0x00, 0x12, 0x34]);
    }

    #[test]
    fn i2osp_zero_is_all_zero_octets() {
        assert_eq!(i2osp(&BigUint::from(0u32), 3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn i2osp_rejects_integer_too_large() {
        let x = BigUint::from(256u32); // needs 2 octets
        assert!(i2osp(&x, 1).is_err());
    }

    #[test]
    fn os2ip_reads_big_endian() {
        assert_eq!(os2ip(&[0x01, 0x00]), BigUint::from(256u32));
    }

    #[test]
    fn os2ip_of_empty_is_zero() {
        assert_eq!(os2ip(&[]), BigUint::from(0u32));
    }

    #[test]
    fn round_trip_i2osp_os2ip() {
        let x = BigUint::from(0xdead_beefu32);
        let encoded = i2osp(&x, 8).unwrap();
        assert_eq!(os2ip(&encoded), x);
    }

    #[test]
    fn i2osp_of_zero_length_zero_is_empty() {
        assert_eq!(i2osp(&BigUint::from(0u32), 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn i2osp_of_zero_length_nonzero_fails() {
        assert!(i2osp(&BigUint::from(1u32), 0).is_err());
    }

    #[test]
    fn round_trip_os2ip_i2osp_preserves_length() {
        let bytes = [0x00, 0x00, 0xab, 0xcd];
        let x = os2ip(&bytes);
        assert_eq!(i2osp(&x, bytes.len()).unwrap(), bytes);
    }
}
