//! `rsa-vault` — the CLI driver described in spec.md §6.
//!
//! Sequencing only: each mode loads or generates key material, calls
//! into `rsa_vault`'s cryptographic core, and writes the result. All
//! of the engineering weight lives in the library crate.

mod cli;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use rsa_vault::rng::OsRng;
use rsa_vault::{block_codec, key_store, Error, Result};

const ENCRYPTED_PATH: &str = "encrypted";
const DECRYPTED_PATH: &str = "decrypted";

fn main() -> ExitCode {
    env_logger::init();

    let cli = cli::Cli::parse();

    let outcome = if cli.generate_key_pair {
        generate_key_pair(cli.bits)
    } else if let Some(path) = cli.encrypt {
        encrypt_file(&path)
    } else if let Some(path) = cli.decrypt {
        decrypt_file(&path)
    } else {
        unreachable!("clap's mode ArgGroup guarantees exactly one branch is taken")
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn generate_key_pair(bits: u64) -> Result<()> {
    let dir = Path::new(key_store::DEFAULT_DIR);

    if key_store::exists(dir) {
        if !prompt_overwrite()? {
            return Ok(());
        }
    }

    log::info!("generating {bits}-bit RSA key pair");
    println!("Generating key pair...");

    let mut rng = OsRng;
    let (public, private) = rsa_vault::generate_keypair(&mut rng, bits)?;

    key_store::save_keypair(dir, public.n(), public.e(), private.d())?;
    println!(" Done.");
    log::info!("key pair saved to {}", dir.display());

    Ok(())
}

/// Prompts `Directory exists. Generate new key pair? [y|n] ` on stdin,
/// per spec.md §6. Returns `Ok(true)` on `y`, `Ok(false)` on `n`, and
/// an error on anything else.
fn prompt_overwrite() -> Result<bool> {
    print!("Directory exists. Generate new key pair? [y|n] ");
    io::stdout()
        .flush()
        .map_err(|err| Error::io(key_store::DEFAULT_DIR, err))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| Error::io(key_store::DEFAULT_DIR, err))?;

    match line.trim() {
        "y" => Ok(true),
        "n" => Ok(false),
        other => Err(Error::KeyGeneration(match other.is_empty() {
            true => "no answer given to the overwrite prompt",
            false => "answer to the overwrite prompt must be 'y' or 'n'",
        })),
    }
}

fn encrypt_file(path: &PathBuf) -> Result<()> {
    let dir = Path::new(key_store::DEFAULT_DIR);
    let public = key_store::load_public(dir)?;

    let plaintext = std::fs::read(path).map_err(|err| Error::io(path, err))?;
    log::info!("encrypting {} ({} bytes)", path.display(), plaintext.len());

    let mut rng = OsRng;
    let ciphertext = block_codec::encrypt(&mut rng, &plaintext, &public)?;

    write_atomic(Path::new(ENCRYPTED_PATH), &ciphertext)?;
    log::info!("wrote {} ({} bytes)", ENCRYPTED_PATH, ciphertext.len());

    Ok(())
}

fn decrypt_file(path: &PathBuf) -> Result<()> {
    let dir = Path::new(key_store::DEFAULT_DIR);
    let private = key_store::load_private(dir)?;

    let ciphertext = std::fs::read(path).map_err(|err| Error::io(path, err))?;
    log::info!("decrypting {} ({} bytes)", path.display(), ciphertext.len());

    let plaintext = block_codec::decrypt(&ciphertext, &private)?;

    write_atomic(Path::new(DECRYPTED_PATH), &plaintext)?;
    log::info!("wrote {} ({} bytes)", DECRYPTED_PATH, plaintext.len());

    Ok(())
}

/// Writes `contents` to `path` by writing a sibling temp file and
/// renaming it over the destination, per spec.md §9 open question 4 —
/// a cancelled or crashed invocation must never leave a partially
/// written `./encrypted` or `./decrypted` in place.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    std::fs::write(&tmp_path, contents).map_err(|err| Error::io(&tmp_path, err))?;
    std::fs::rename(&tmp_path, path).map_err(|err| Error::io(path, err))?;

    Ok(())
}
