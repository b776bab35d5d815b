//! Crate-wide error taxonomy.
//!
//! Variants mirror the failure modes named in the scheme: every
//! PKCS#1 structural check and every out-of-range check collapses into
//! the single opaque [`Error::Decryption`] variant so that callers (and
//! timing) cannot distinguish *why* a ciphertext was rejected.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `I2OSP` was asked to encode an integer that doesn't fit in the
    /// requested number of octets.
    #[error("integer too large for a {0}-octet representation")]
    IntegerTooLarge(usize),

    /// `RSAEP` was given a message representative outside `[0, n)`.
    #[error("message representative out of range")]
    MessageOutOfRange,

    /// `RSADP` was given a ciphertext representative outside `[0, n)`.
    #[error("ciphertext representative out of range")]
    CiphertextOutOfRange,

    /// A plaintext block exceeds `k - 11` octets.
    #[error("message too long for this key size")]
    MessageTooLong,

    /// A PKCS#1 v1.5 structural check failed, or a block-level integer
    /// fell outside `[0, n)`. Deliberately carries no detail: see
    /// module docs.
    #[error("decryption error")]
    Decryption,

    /// Ciphertext length is zero or not a multiple of `k`.
    #[error("invalid ciphertext length")]
    InvalidCiphertextLength,

    /// The input file to encrypt was empty.
    #[error("cannot encrypt an empty file")]
    EmptyPlaintext,

    /// Key-pair generation could not produce a key satisfying every
    /// invariant after a bounded number of attempts.
    #[error("key generation failed: {0}")]
    KeyGeneration(&'static str),

    /// A key file's banner, separator, or digits didn't parse.
    #[error("malformed key file: {0}")]
    MalformedKeyFile(&'static str),

    /// Filesystem I/O failed, with the offending path for context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
