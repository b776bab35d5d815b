//! Command-line surface: the `--generate-key-pair` / `--encrypt` /
//! `--decrypt` driver described in spec.md §6, via `clap`'s derive API.

use std::path::PathBuf;

use clap::Parser;

/// RSAES-PKCS1-v1_5 key generation and whole-file encryption.
#[derive(Debug, Parser)]
#[command(name = "rsa-vault", version, about)]
#[command(group(clap::ArgGroup::new("mode").required(true).args(["generate_key_pair", "encrypt", "decrypt"])))]
pub struct Cli {
    /// Generate a new RSA key pair under `./.rsa/`.
    #[arg(long = "generate-key-pair")]
    pub generate_key_pair: bool,

    /// Modulus bit length, used only with `--generate-key-pair`.
    #[arg(long, default_value_t = 2048)]
    pub bits: u64,

    /// Encrypt the file at this path with the stored public key.
    #[arg(long = "encrypt", value_name = "FILE")]
    pub encrypt: Option<PathBuf>,

    /// Decrypt the file at this path with the stored private key.
    #[arg(long = "decrypt", value_name = "FILE")]
    pub decrypt: Option<PathBuf>,
}
