use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gost_eds::{
    decode_signature, decode_signing_key, decode_verifying_key, digest_to_scalar,
    encode_signature, encode_signing_key, encode_verifying_key, reference_signing_key,
    reference_verifying_key, sign_prehashed, verify_prehashed, Digest, DomainParams, Hasher,
    SigningKey, VerifyingKey, SIGNATURE_FILE_EXT,
};
use rand_core::OsRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const READ_CHUNK: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "gost-eds",
    version,
    about = "Create or verify an electronic digital signature (GOST R 34.10-2001) for a file",
    long_about = "Create or verify an electronic digital signature (GOST R 34.10-2001) for a file.\n\
                  Signatures are stored next to the file as <FILE>.sg; verification expects it there."
)]
struct Args {
    /// Private key as 64 hex digits (defaults to the reference key)
    #[arg(long, value_name = "HEX", env = "GOST_EDS_PRIVATE_KEY", global = true, hide_env_values = true)]
    private_key: Option<String>,

    /// Public key as 128 hex digits x || y (derived from the private key when omitted)
    #[arg(long, value_name = "HEX", env = "GOST_EDS_PUBLIC_KEY", global = true)]
    public_key: Option<String>,

    #[arg(short, long, action = clap::ArgAction::SetTrue, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign FILE and write FILE.sg
    Sign {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check FILE against FILE.sg
    Verify {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the sponge digest of FILE
    Hash {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Generate a fresh key pair
    Keygen,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gost_eds=debug" } else { "gost_eds=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn signature_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".");
    name.push(SIGNATURE_FILE_EXT);
    PathBuf::from(name)
}

fn digest_file(path: &Path) -> Result<Digest> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; READ_CHUNK];
    let mut total = 0u64;
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        total += n as u64;
    }
    debug!(bytes = total, file = %path.display(), "file hashed");
    Ok(hasher.finalize())
}

fn load_signing_key(args: &Args, params: &DomainParams) -> Result<SigningKey> {
    match &args.private_key {
        Some(hex) => decode_signing_key(hex, &params.curve).context("Invalid --private-key"),
        None => Ok(reference_signing_key()),
    }
}

fn load_verifying_key(args: &Args, params: &DomainParams) -> Result<VerifyingKey> {
    if let Some(hex) = &args.public_key {
        return decode_verifying_key(hex, &params.curve).context("Invalid --public-key");
    }
    if args.private_key.is_some() {
        let sk = load_signing_key(args, params)?;
        return sk.verifying_key(params).context("Failed to derive public key");
    }
    Ok(reference_verifying_key())
}

fn cmd_sign(args: &Args, params: &DomainParams, file: &Path) -> Result<ExitCode> {
    let key = load_signing_key(args, params)?;
    let digest = digest_file(file)?;
    let e = digest_to_scalar(&digest.to_biguint(), &params.curve.q);
    let sig = sign_prehashed(&mut OsRng, params, &key, &e).context("Signing failed")?;

    let out = signature_path(file);
    fs::write(&out, encode_signature(&sig))
        .with_context(|| format!("Failed to write signature: {}", out.display()))?;
    info!(signature = %out.display(), "signature written");
    println!("The signature is successfully created: {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(args: &Args, params: &DomainParams, file: &Path) -> Result<ExitCode> {
    let key = load_verifying_key(args, params)?;
    let sig_path = signature_path(file);
    let text = fs::read_to_string(&sig_path)
        .with_context(|| format!("Failed to read signature: {}", sig_path.display()))?;
    let sig = decode_signature(&text, &params.curve.q)
        .with_context(|| format!("The signature file is invalid: {}", sig_path.display()))?;

    let digest = digest_file(file)?;
    let e = digest_to_scalar(&digest.to_biguint(), &params.curve.q);
    if verify_prehashed(params, &key, &e, &sig)? {
        println!("The signature is valid!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("The signature is NOT valid!");
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_hash(file: &Path) -> Result<ExitCode> {
    let digest = digest_file(file)?;
    println!("{}  {}", digest.to_hex(), file.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_keygen(params: &DomainParams) -> Result<ExitCode> {
    let sk = SigningKey::generate(&mut OsRng, params);
    let vk = sk.verifying_key(params)?;
    let vk_hex = encode_verifying_key(&vk)?;
    println!("private-key: {}", encode_signing_key(&sk));
    println!("public-key:  {vk_hex}");
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let params = DomainParams::gost_r3410_2001_test();
    match &args.command {
        Command::Sign { file } => cmd_sign(&args, &params, file),
        Command::Verify { file } => cmd_verify(&args, &params, file),
        Command::Hash { file } => cmd_hash(file),
        Command::Keygen => cmd_keygen(&params),
    }
}
