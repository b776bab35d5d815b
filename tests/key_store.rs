//! `KeyStore` round-trip through the public API: generate a key pair,
//! save it, reload it from a fresh directory handle, and confirm both
//! halves still agree on the same modulus and that RSAEP/RSADP still
//! compose to the identity (spec.md §6).

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rsa_vault::{generate_keypair, key_store};

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(13)
}

#[test]
fn saved_and_reloaded_keys_still_encrypt_and_decrypt_together() {
    let mut r = rng();
    let (public, private) = generate_keypair(&mut r, 512).unwrap();

    let dir = tempfile::tempdir().unwrap();
    key_store::save_keypair(dir.path(), public.n(), public.e(), private.d()).unwrap();

    let reloaded_public = key_store::load_public(dir.path()).unwrap();
    let reloaded_private = key_store::load_private(dir.path()).unwrap();

    assert_eq!(reloaded_public.n(), public.n());
    assert_eq!(reloaded_public.e(), public.e());
    assert_eq!(reloaded_private.n(), private.n());
    assert_eq!(reloaded_private.d(), private.d());

    let message = num_bigint::BigUint::from(1234u32);
    let ciphertext = reloaded_public.encrypt_primitive(&message).unwrap();
    let recovered = reloaded_private.decrypt_primitive(&ciphertext).unwrap();
    assert_eq!(recovered, message);
}

#[test]
fn loading_from_a_directory_with_no_keys_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(key_store::load_public(dir.path()).is_err());
    assert!(key_store::load_private(dir.path()).is_err());
}

#[test]
fn exists_is_false_until_a_key_pair_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let subdir = dir.path().join(".rsa");

    assert!(!key_store::exists(&subdir));

    let mut r = rng();
    let (public, private) = generate_keypair(&mut r, 512).unwrap();
    key_store::save_keypair(&subdir, public.n(), public.e(), private.d()).unwrap();

    assert!(key_store::exists(&subdir));
}
