//! End-to-end scenarios S1-S6 from spec.md §8: key generation, whole-file
//! encryption/decryption, and the tamper/cross-key failure modes, driven
//! entirely through `rsa_vault`'s public API.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rsa_vault::{block_codec, generate_keypair};

fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

#[test]
fn s1_short_message_round_trips_through_a_single_block() {
    let mut r = rng(1);
    let (public, private) = generate_keypair(&mut r, 512).unwrap();

    let plaintext = b"hello\n";
    let ciphertext = block_codec::encrypt(&mut r, plaintext, &public).unwrap();

    assert_eq!(ciphertext.len(), 64); // k = 512 / 8
    assert_eq!(block_codec::decrypt(&ciphertext, &private).unwrap(), plaintext);
}

#[test]
fn s2_all_zero_plaintext_round_trips() {
    let mut r = rng(2);
    let (public, private) = generate_keypair(&mut r, 1024).unwrap();

    let plaintext = vec![0x00u8; 117]; // k - 11 for k = 128
    let ciphertext = block_codec::encrypt(&mut r, &plaintext, &public).unwrap();

    assert_eq!(ciphertext.len(), 128);
    assert_eq!(block_codec::decrypt(&ciphertext, &private).unwrap(), plaintext);
}

#[test]
fn s3_plaintext_one_octet_past_a_chunk_boundary_spills_into_a_second_block() {
    let mut r = rng(3);
    let (public, private) = generate_keypair(&mut r, 1024).unwrap();

    let plaintext = vec![0xFFu8; 118]; // one chunk (117) plus a one-byte final block
    let ciphertext = block_codec::encrypt(&mut r, &plaintext, &public).unwrap();

    assert_eq!(ciphertext.len(), 256); // two 128-octet blocks
    assert_eq!(block_codec::decrypt(&ciphertext, &private).unwrap(), plaintext);
}

#[test]
fn s4_large_file_spans_many_blocks() {
    let mut r = rng(4);
    let (public, private) = generate_keypair(&mut r, 2048).unwrap();

    let plaintext = vec![0x5Au8; 10 * 1024]; // 10 KiB, k = 256, chunk = 245
    let ciphertext = block_codec::encrypt(&mut r, &plaintext, &public).unwrap();

    let k = 256;
    let expected_blocks = (plaintext.len() + (k - 11) - 1) / (k - 11);
    assert_eq!(expected_blocks, 42);
    assert_eq!(ciphertext.len(), expected_blocks * k);
    assert_eq!(block_codec::decrypt(&ciphertext, &private).unwrap(), plaintext);
}

#[test]
fn s5_a_single_flipped_ciphertext_bit_is_detected_as_a_decryption_failure() {
    let mut r = rng(5);
    let (public, private) = generate_keypair(&mut r, 512).unwrap();

    let mut ciphertext = block_codec::encrypt(&mut r, b"attack at dawn", &public).unwrap();
    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0x01;

    assert!(block_codec::decrypt(&ciphertext, &private).is_err());
}

#[test]
fn s6_ciphertext_cannot_be_decrypted_under_an_unrelated_private_key() {
    let mut r = rng(6);
    let (public_a, _) = generate_keypair(&mut r, 512).unwrap();
    let (_, private_b) = generate_keypair(&mut r, 512).unwrap();

    let ciphertext = block_codec::encrypt(&mut r, b"attack at dawn", &public_a).unwrap();

    assert!(block_codec::decrypt(&ciphertext, &private_b).is_err());
}
