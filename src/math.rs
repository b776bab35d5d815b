//! Modular arithmetic helpers used by key generation.

use num_bigint::{BigInt, BigUint, ToBigInt};
use num_traits::{One, Zero};

/// Does mathematical modulo (similar to remainder `%`).
///
/// The difference is that `-1 % 5 = -1`, but `-1 mod 5 = 4`.
fn math_mod(x: &BigInt, n: &BigUint) -> BigUint {
    let n_bigint = n.to_bigint().unwrap();

    (((x % &n_bigint) + &n_bigint) % &n_bigint)
        .to_biguint()
        .unwrap()
}

/// [Extended Euclidean algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm).
///
/// Naive recursive implementation; `a` and `b` are small enough
/// relative to the RSA moduli involved (a few thousand bits) that this
/// never comes close to stack exhaustion in practice.
#[allow(clippy::many_single_char_names)]
pub fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b, BigInt::from(0), BigInt::from(1));
    }

    let (g, y, x) = egcd(&b % &a, a.clone());

    (g, x - (b / a) * &y, y)
}

/// [Modular multiplicative inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse)
/// of `a` modulo `n`, or `None` if `gcd(a, n) != 1`.
///
/// # Panics
///
/// If `a >= n`.
pub fn inv_mod(a: BigUint, n: &BigUint) -> Option<BigUint> {
    assert!(&a < n);

    let (g, x, _) = egcd(BigInt::from(a), n.to_bigint().unwrap());

    if !g.is_one() {
        return None;
    }

    Some(math_mod(&x, n))
}
