//! On-disk key persistence: the base-61 banner format described in
//! spec.md §6.
//!
//! This is the "opaque" `KeyStore` collaborator spec.md §1 carves out
//! of the cryptographic core — callers only depend on
//! [`save_keypair`]/[`load_public`]/[`load_private`] and the round-trip
//! law they satisfy, not on the wire format itself.

use std::fs;
use std::path::{Path, PathBuf};

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};

/// Default per-user key directory, relative to the working directory.
pub const DEFAULT_DIR: &str = ".rsa";

const PUBLIC_FILE: &str = "rsa.pub";
const PRIVATE_FILE: &str = "rsa.priv";

const PUBLIC_BEGIN: &str = "--- BEGIN PUBLIC KEY ---\n";
const PUBLIC_END: &str = "--- END PUBLIC KEY ---\n";
const PRIVATE_BEGIN: &str = "--- BEGIN PRIVATE KEY ---\n";
const PRIVATE_END: &str = "--- END PRIVATE KEY ---\n";

const LINE_WIDTH: usize = 50;

/// Base-61 alphabet: `0-9`, `A-Z`, `a-y` (spec.md glossary).
const ALPHABET: &[u8; 61] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxy";

fn to_base61(value: &BigUint) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let base = BigUint::from(61u32);
    let mut digits = Vec::new();
    let mut n = value.clone();

    while !n.is_zero() {
        let (q, r) = (&n / &base, &n % &base);
        let r = r.to_u32().expect("remainder mod 61 fits in u32");
        digits.push(ALPHABET[r as usize]);
        n = q;
    }

    digits.reverse();
    String::from_utf8(digits).expect("alphabet is ASCII")
}

fn from_base61(s: &str) -> Result<BigUint> {
    if s.is_empty() {
        return Err(Error::MalformedKeyFile("empty base-61 digit string"));
    }

    let base = BigUint::from(61u32);
    let mut value = BigUint::zero();

    for ch in s.bytes() {
        let digit = ALPHABET
            .iter()
            .position(|&c| c == ch)
            .ok_or(Error::MalformedKeyFile("invalid base-61 digit"))?;

        value = value * &base + BigUint::from(digit as u32);
    }

    Ok(value)
}

/// Wraps `digits` at [`LINE_WIDTH`] characters, matching spec.md §6's
/// "line-wrapped at 50 characters" requirement.
fn wrapped(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / LINE_WIDTH + 1);

    for chunk in digits.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).expect("ASCII"));
        out.push('\n');
    }

    out
}

/// Parses a banner-delimited body and returns its content with all
/// newlines stripped, so line-wrapping is transparent to the caller.
fn extract_body<'a>(contents: &'a str, begin: &str, end: &str) -> Result<&'a str> {
    let after_begin = contents
        .strip_prefix(begin)
        .ok_or(Error::MalformedKeyFile("missing BEGIN banner"))?;

    let body_end = after_begin
        .find(end)
        .ok_or(Error::MalformedKeyFile("missing END banner"))?;

    Ok(&after_begin[..body_end])
}

fn strip_newlines(s: &str) -> String {
    s.chars().filter(|&c| c != '\n').collect()
}

/// Saves `(n, e, d)` as a public and a private key file under `dir`,
/// creating `dir` if it doesn't exist.
///
/// # Errors
///
/// [`Error::Io`] if the directory can't be created or either file
/// can't be written.
pub fn save_keypair(dir: &Path, n: &BigUint, e: &BigUint, d: &BigUint) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))?;

    let n_digits = to_base61(n);

    let public_path = dir.join(PUBLIC_FILE);
    let public_body = format!("{}/{}", to_base61(e), n_digits);
    let public_contents = format!("{PUBLIC_BEGIN}{}{PUBLIC_END}", wrapped(&public_body));
    fs::write(&public_path, public_contents).map_err(|err| Error::io(&public_path, err))?;

    let private_path = dir.join(PRIVATE_FILE);
    let private_body = format!("{}/{}", to_base61(d), n_digits);
    let private_contents = format!("{PRIVATE_BEGIN}{}{PRIVATE_END}", wrapped(&private_body));
    fs::write(&private_path, private_contents).map_err(|err| Error::io(&private_path, err))?;

    log::info!("saved key pair to {}", dir.display());

    Ok(())
}

/// Loads the public key from `dir`.
///
/// # Errors
///
/// [`Error::Io`] if the file is missing or unreadable.
/// [`Error::MalformedKeyFile`] if the banners, separator, or digits
/// don't parse.
pub fn load_public(dir: &Path) -> Result<RsaPublicKey> {
    let path = public_path(dir);
    let contents = fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;

    let body = extract_body(&contents, PUBLIC_BEGIN, PUBLIC_END)?;
    let body = strip_newlines(body);

    let (e_str, n_str) = split_once_slash(&body)?;

    Ok(RsaPublicKey::new(from_base61(n_str)?, from_base61(e_str)?))
}

/// Loads the private key from `dir`.
///
/// # Errors
///
/// Same as [`load_public`].
pub fn load_private(dir: &Path) -> Result<RsaPrivateKey> {
    let path = private_path(dir);
    let contents = fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;

    let body = extract_body(&contents, PRIVATE_BEGIN, PRIVATE_END)?;
    let body = strip_newlines(body);

    let (d_str, n_str) = split_once_slash(&body)?;

    Ok(RsaPrivateKey::new(from_base61(n_str)?, from_base61(d_str)?))
}

fn split_once_slash(body: &str) -> Result<(&str, &str)> {
    body.split_once('/')
        .ok_or(Error::MalformedKeyFile("missing '/' separator"))
}

/// Whether a key directory already exists at `dir` (used by the driver
/// to decide whether to prompt before overwriting).
#[must_use]
pub fn exists(dir: &Path) -> bool {
    dir.is_dir()
}

fn public_path(dir: &Path) -> PathBuf {
    dir.join(PUBLIC_FILE)
}

fn private_path(dir: &Path) -> PathBuf {
    dir.join(PRIVATE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn base61_round_trip_zero() {
        assert_eq!(from_base61(&to_base61(&BigUint::zero())).unwrap(), BigUint::zero());
    }

    #[test]
    fn base61_round_trip_large() {
        let n = BigUint::from(123456789012345678901234567890u128);
        assert_eq!(from_base61(&to_base61(&n)).unwrap(), n);
    }

    #[test]
    fn from_base61_rejects_invalid_digit() {
        assert!(from_base61("!!!").is_err());
    }

    #[test]
    fn from_base61_rejects_empty() {
        assert!(from_base61("").is_err());
    }

    #[test]
    fn wrapped_breaks_every_50_chars() {
        let digits = "a".repeat(120);
        let w = wrapped(&digits);
        let lines: Vec<&str> = w.lines().collect();
        assert_eq!(lines[0].len(), 50);
        assert_eq!(lines[1].len(), 50);
        assert_eq!(lines[2].len(), 20);
    }

    #[test]
    fn save_then_load_round_trips_bit_exact() {
        let dir = tempfile::tempdir().unwrap();
        let n = BigUint::from(3233u32);
        let e = BigUint::from(17u32);
        let d = BigUint::from(2753u32);

        save_keypair(dir.path(), &n, &e, &d).unwrap();

        let public = load_public(dir.path()).unwrap();
        let private = load_private(dir.path()).unwrap();

        assert_eq!(public.n(), &n);
        assert_eq!(public.e(), &e);
        assert_eq!(private.n(), &n);
        assert_eq!(private.d(), &d);
    }

    #[test]
    fn load_public_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_public(dir.path()), Err(Error::Io { .. })));
    }

    #[test]
    fn load_public_malformed_banner_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(public_path(dir.path()), "garbage, no banners here").unwrap();
        assert!(matches!(
            load_public(dir.path()),
            Err(Error::MalformedKeyFile(_))
        ));
    }

    #[test]
    fn exists_reflects_directory_presence() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nope");
        assert!(!exists(&sub));

        fs::create_dir(&sub).unwrap();
        assert!(exists(&sub));
    }
}
