//! RSAES-PKCS1-v1_5 ([RFC 8017](https://datatracker.ietf.org/doc/html/rfc8017)
//! §7.2) key generation and whole-file encryption/decryption.
//!
//! This crate is the cryptographic core behind the `rsa-vault` binary:
//! arbitrary-precision RSA primitives, PKCS#1 v1.5 padding, a
//! block-framing codec for files larger than one RSA block, and a
//! key-file format for persisting generated key pairs.
//!
//! Out of scope (see `SPEC_FULL.md`): authenticated encryption, OAEP,
//! signing, ASN.1/DER key encoding, hardware-backed key storage, and
//! streaming — one invocation handles one whole file in memory.

#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod block_codec;
pub mod codec;
pub mod errors;
pub mod key;
pub mod key_store;
mod math;
pub mod padding;
pub mod primes;
pub mod rng;

pub use errors::{Error, Result};
pub use key::{generate_keypair, RsaPrivateKey, RsaPublicKey};
