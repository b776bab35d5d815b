//! EME-PKCS1-v1_5 encryption padding
//! ([RFC 8017 §7.2](https://datatracker.ietf.org/doc/html/rfc8017#section-7.2)).
//!
//! This is the *encryption* padding scheme (type `0x02`), not the
//! signature padding scheme (type `0x01`) — the two share a name in
//! PKCS#1 but have distinct framing and are not interchangeable.

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Minimum octets of padding (`PS`) mandated by RFC 8017 §7.2.1.
const MIN_PADDING_LEN: usize = 8;

/// Minimum encoded-message length: `0x00 || 0x02 || PS(>=8) || 0x00 || M(>=1)`.
const MIN_BLOCK_LEN: usize = 11;

/// Encodes `message` into a `block_len`-octet `EM`, consuming fresh
/// randomness from `rng` for the padding string on every call.
///
/// # Errors
///
/// [`Error::MessageTooLong`] if `message.len() > block_len - 11`.
pub fn encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    message: &[u8],
    block_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if block_len < MIN_BLOCK_LEN || message.len() > block_len - MIN_BLOCK_LEN {
        return Err(Error::MessageTooLong);
    }

    let ps_len = block_len - message.len() - 3;
    debug_assert!(ps_len >= MIN_PADDING_LEN);

    let mut ps = Zeroizing::new(vec![0u8; ps_len]);
    fill_nonzero(rng, &mut ps);

    let mut em = Zeroizing::new(Vec::with_capacity(block_len));
    em.push(0x00);
    em.push(0x02);
    em.extend_from_slice(&ps);
    em.push(0x00);
    em.extend_from_slice(message);

    Ok(em)
}

/// Fills `buf` with uniformly random *nonzero* octets, resampling any
/// byte that comes up zero.
fn fill_nonzero<R: CryptoRngCore + ?Sized>(rng: &mut R, buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        loop {
            let candidate: u8 = rng.next_u32() as u8;
            if candidate != 0 {
                *byte = candidate;
                break;
            }
        }
    }
}

/// Decodes a `block_len`-octet `EM` back to the original message.
///
/// Validates, in order: the leading `0x00 0x02` marker, the existence
/// of a `0x00` separator at an index `>= 10`, and that every octet
/// between the marker and the separator is nonzero. Every failure
/// collapses to the same [`Error::Decryption`] — see spec.md §7 and
/// §4.5: a single opaque error is the Bleichenbacher countermeasure,
/// and this function must not let its caller distinguish *which* check
/// failed from its return value.
///
/// # Errors
///
/// [`Error::Decryption`] if `em.len() != block_len` or any structural
/// check fails.
pub fn decode(em: &[u8], block_len: usize) -> Result<Vec<u8>> {
    if em.len() != block_len || block_len < MIN_BLOCK_LEN {
        return Err(Error::Decryption);
    }

    let mut ok = em[0] == 0x00 && em[1] == 0x02;

    let mut separator = None;
    for (i, &byte) in em.iter().enumerate().skip(2) {
        if byte == 0x00 {
            separator = Some(i);
            break;
        }
    }

    let separator = match separator {
        Some(i) if i >= 10 => i,
        _ => {
            ok = false;
            em.len() // dummy index; `ok` already false, never read
        }
    };

    if !ok {
        return Err(Error::Decryption);
    }

    Ok(em[separator + 1..].to_vec())
}
