//! Whole-file RSAES-PKCS1-v1_5 encryption: turns the fixed-size RSA
//! primitive and padding scheme into a codec over arbitrary-length
//! plaintext files.
//!
//! There is no outer length header — the final block's plaintext
//! length is recovered entirely from PKCS#1 unpadding (spec.md §4.6).
//! This means every non-final block's plaintext *must* be exactly
//! `k - 11` octets; only the last block may be shorter.

use zeroize::Zeroizing;

use crate::codec::{i2osp, os2ip};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey, SecretUint};
use crate::padding;
use rand_core::CryptoRngCore;

/// Octets of PKCS#1 v1.5 overhead per block (`0x00 || 0x02 || PS(>=8) || 0x00`).
const OVERHEAD: usize = 11;

/// Encrypts `plaintext` under `public_key`, returning the concatenation
/// of one ciphertext block per `k - 11`-octet chunk of `plaintext`.
///
/// # Errors
///
/// [`Error::EmptyPlaintext`] if `plaintext` is empty (spec.md §9 open
/// question 1: this implementation takes the recommended position and
/// rejects the zero-byte case rather than guessing reference intent).
pub fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    plaintext: &[u8],
    public_key: &RsaPublicKey,
) -> Result<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(Error::EmptyPlaintext);
    }

    let k = public_key.modulus_octets();
    let chunk_len = k - OVERHEAD;

    let mut ciphertext = Vec::with_capacity(plaintext.len().div_ceil_by(chunk_len) * k);

    for chunk in plaintext.chunks(chunk_len) {
        let em = padding::encode(rng, chunk, k)?;
        let m = os2ip(&em);
        let c = public_key.encrypt_primitive(&m)?;
        let block = i2osp(&c, k)?;

        ciphertext.extend_from_slice(&block);
    }

    log::debug!(
        "encrypted {} plaintext bytes into {} ciphertext blocks of {k} octets",
        plaintext.len(),
        ciphertext.len() / k
    );

    Ok(ciphertext)
}

/// Decrypts `ciphertext` (a concatenation of `k`-octet blocks) under
/// `private_key`, returning the concatenated plaintext.
///
/// # Errors
///
/// [`Error::InvalidCiphertextLength`] if `ciphertext` is empty or its
/// length isn't a multiple of `k`. [`Error::Decryption`] if any block
/// fails RSADP's range check or PKCS#1 unpadding.
pub fn decrypt(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let k = private_key.modulus_octets();

    if ciphertext.is_empty() || ciphertext.len() % k != 0 {
        return Err(Error::InvalidCiphertextLength);
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());

    for block in ciphertext.chunks(k) {
        let c = os2ip(block);
        let m = private_key.decrypt_primitive(&c).map_err(|_| Error::Decryption)?;
        let m = SecretUint::new(m);
        let em = Zeroizing::new(i2osp(m.get(), k).map_err(|_| Error::Decryption)?);
        let message = padding::decode(&em, k)?;

        plaintext.extend_from_slice(&message);
    }

    log::debug!(
        "decrypted {} ciphertext blocks into {} plaintext bytes",
        ciphertext.len() / k,
        plaintext.len()
    );

    Ok(plaintext)
}

/// Tiny helper so block-count logging above reads naturally; not a
/// public API, just `ceil(a / b)` without pulling in an extra crate.
trait DivCeil {
    fn div_ceil_by(self, rhs: usize) -> usize;
}

impl DivCeil for usize {
    fn div_ceil_by(self, rhs: usize) -> usize {
        (self + rhs - 1) / rhs
    }
}
