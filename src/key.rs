//! RSA key material: [`RsaPublicKey`], [`RsaPrivateKey`], key-pair
//! generation, and the RSAEP/RSADP primitives.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::math::inv_mod;
use crate::primes::generate_prime;

/// Fixed public exponent, per spec.md §4.3.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Minimum modulus octet length: 11 octets of padding overhead plus one
/// octet of message, per spec.md §3.
pub const MIN_MODULUS_OCTETS: usize = 12;

/// A `BigUint` that is best-effort zeroized when dropped.
///
/// `num_bigint::BigUint` doesn't expose its digit buffer, so this can't
/// give the exact guarantee `zeroize::Zeroizing<Vec<u8>>` gives for
/// plain byte buffers — see `SPEC_FULL.md`'s "Secret hygiene" section.
/// It still bounds how long the secret value is reachable and wipes
/// the byte-serialized copy used to produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SecretUint(BigUint);

impl SecretUint {
    pub(crate) fn new(value: BigUint) -> Self {
        SecretUint(value)
    }

    pub(crate) fn get(&self) -> &BigUint {
        &self.0
    }
}

impl Drop for SecretUint {
    fn drop(&mut self) {
        let mut bytes = std::mem::replace(&mut self.0, BigUint::zero()).to_bytes_be();
        bytes.zeroize();
    }
}

/// An RSA public key: the modulus `n` and the fixed exponent `e`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

impl RsaPublicKey {
    pub fn new(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }

    #[must_use]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[must_use]
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Octet length `k` of the modulus, `ceil(bitlen(n) / 8)`.
    #[must_use]
    pub fn modulus_octets(&self) -> usize {
        modulus_octets(&self.n)
    }

    /// RSAEP: `c = m^e mod n`.
    ///
    /// # Errors
    ///
    /// [`Error::MessageOutOfRange`] if `m` is not in `[0, n)`.
    pub fn encrypt_primitive(&self, m: &BigUint) -> Result<BigUint> {
        if m >= &self.n {
            return Err(Error::MessageOutOfRange);
        }

        Ok(m.modpow(&self.e, &self.n))
    }
}

/// An RSA private key: the modulus `n` and the private exponent `d`.
///
/// `d` is held in a [`SecretUint`] and wiped on drop (best effort, see
/// its docs).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPrivateKey {
    n: BigUint,
    d: SecretUint,
}

impl RsaPrivateKey {
    pub fn new(n: BigUint, d: BigUint) -> Self {
        RsaPrivateKey {
            n,
            d: SecretUint::new(d),
        }
    }

    #[must_use]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[must_use]
    pub fn d(&self) -> &BigUint {
        self.d.get()
    }

    #[must_use]
    pub fn modulus_octets(&self) -> usize {
        modulus_octets(&self.n)
    }

    /// RSADP: `m = c^d mod n`.
    ///
    /// # Errors
    ///
    /// [`Error::CiphertextOutOfRange`] if `c` is not in `[0, n)`.
    pub fn decrypt_primitive(&self, c: &BigUint) -> Result<BigUint> {
        if c >= &self.n {
            return Err(Error::CiphertextOutOfRange);
        }

        Ok(c.modpow(self.d.get(), &self.n))
    }
}

fn modulus_octets(n: &BigUint) -> usize {
    ((n.bits() as usize) + 7) / 8
}

/// FIPS 186-4's minimum `|p - q|` guard against Fermat factoring: the
/// primes must differ in at least their top 100 bits.
const MIN_PRIME_DISTANCE_SLACK_BITS: u64 = 100;

/// Generates an RSA key pair with modulus bit length `k_bits` (must be
/// even) and the fixed exponent [`PUBLIC_EXPONENT`].
///
/// Implements spec.md §4.3 verbatim: independent probable primes of
/// bit length `k_bits / 2`, rejected and resampled until they differ
/// by at least `2^(k_bits/2 - 100)`, `n` lands at exactly `k_bits`
/// bits, `gcd(e, lambda) == 1`, and `d > 2^(k_bits/2)`.
///
/// # Errors
///
/// [`Error::KeyGeneration`] if `k_bits` is too small to satisfy
/// [`MIN_MODULUS_OCTETS`], or if an unreasonable number of candidate
/// pairs are rejected in a row (practically unreachable; guards
/// against a broken RNG rather than ordinary bad luck).
pub fn generate_keypair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    k_bits: u64,
) -> Result<(RsaPublicKey, RsaPrivateKey)> {
    if k_bits % 2 != 0 || (k_bits / 8) < MIN_MODULUS_OCTETS as u64 {
        return Err(Error::KeyGeneration(
            "modulus bit length must be even and yield at least 12 octets",
        ));
    }

    let prime_bits = k_bits / 2;
    let e = BigUint::from(PUBLIC_EXPONENT);
    let min_distance = BigUint::one() << (prime_bits.saturating_sub(MIN_PRIME_DISTANCE_SLACK_BITS));

    const MAX_ATTEMPTS: usize = 10_000;

    for _ in 0..MAX_ATTEMPTS {
        let p = SecretUint::new(generate_prime(rng, prime_bits));
        let q = SecretUint::new(generate_prime(rng, prime_bits));

        if p.get() == q.get() {
            continue;
        }

        let distance = if p.get() > q.get() {
            p.get() - q.get()
        } else {
            q.get() - p.get()
        };
        if distance < min_distance {
            continue;
        }

        let n = p.get() * q.get();
        if n.bits() != k_bits {
            continue;
        }

        let p_minus_one = SecretUint::new(p.get() - BigUint::one());
        let q_minus_one = SecretUint::new(q.get() - BigUint::one());
        let lambda = SecretUint::new(p_minus_one.get().lcm(q_minus_one.get()));

        if e.gcd(lambda.get()) != BigUint::one() {
            continue;
        }

        let d = match inv_mod(e.clone() % lambda.get(), lambda.get()) {
            Some(d) => d,
            None => continue,
        };

        if d <= (BigUint::one() << prime_bits) {
            continue; // FIPS 186-4 guard
        }

        log::debug!("generated {k_bits}-bit RSA key pair");

        return Ok((
            RsaPublicKey::new(n.clone(), e),
            RsaPrivateKey::new(n, d),
        ));
    }

    Err(Error::KeyGeneration(
        "exceeded maximum candidate attempts; RNG may be degenerate",
    ))
}
