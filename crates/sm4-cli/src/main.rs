//! Command-line interface for the SM4 workspace.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sm4_core::{decrypt_block, encrypt_block, expand_key, Block, Sm4, Sm4Key};
use sm4_xts::{Sm4Xts, TweakConfig};

/// GB/T 32907-2016 example 1: key and plaintext are the same bytes.
const KAT_KEY: Block = [
    0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32, 0x10,
];
const KAT_CIPHER: Block = [
    0x68, 0x1e, 0xdf, 0x34, 0xd2, 0x06, 0x96, 0x5e, 0x86, 0xb3, 0xe9, 0x4f, 0x53, 0x6e, 0x42, 0x46,
];
/// GB/T 32907-2016 example 2: after 1,000,000 chained encryptions.
const KAT_CIPHER_1M: Block = [
    0x59, 0x52, 0x98, 0xc7, 0xc6, 0xfd, 0x27, 0x1f, 0x04, 0x02, 0xf8, 0x04, 0xc3, 0x3d, 0x3f, 0x66,
];
const KAT_ITERATIONS: u64 = 1_000_000;

/// SM4 CLI.
#[derive(Parser)]
#[command(name = "sm4", version, author, about = "SM4 block cipher and SM4-XTS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// XTS tweak convention selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Standard {
    /// Little-endian doubling, stealing reuses the last full block's tweak.
    Reuse,
    /// IEEE Std 1619-2007.
    Ieee,
    /// GB/T 17964-2021.
    Gb,
}

impl From<Standard> for TweakConfig {
    fn from(value: Standard) -> Self {
        match value {
            Standard::Reuse => TweakConfig::default(),
            Standard::Ieee => TweakConfig::ieee1619(),
            Standard::Gb => TweakConfig::gbt17964(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GB/T 32907-2016 known-answer checks.
    Check {
        /// Number of chained encryptions for the iterated check.
        #[arg(long, default_value_t = KAT_ITERATIONS)]
        iterations: u64,
    },
    /// Encrypt or decrypt a single 16-byte block.
    Ecb {
        /// SM4 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// Decrypt instead of encrypt.
        #[arg(long, default_value_t = false)]
        decrypt: bool,
    },
    /// Encrypt a file sector by sector with SM4-XTS.
    XtsEnc(XtsArgs),
    /// Decrypt a file sector by sector with SM4-XTS.
    XtsDec(XtsArgs),
    /// Run a local demo: random keys, XTS encrypt a ragged buffer, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct XtsArgs {
    /// Data key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    data_key_hex: String,
    /// Tweak key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    tweak_key_hex: String,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Data-unit size in bytes.
    #[arg(long, default_value_t = 512)]
    sector_size: usize,
    /// Sector number of the first data unit.
    #[arg(long, default_value_t = 0)]
    first_sector: u64,
    /// Tweak convention.
    #[arg(long, value_enum, default_value_t = Standard::Reuse)]
    standard: Standard,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { iterations } => cmd_check(iterations),
        Commands::Ecb {
            key_hex,
            block_hex,
            decrypt,
        } => cmd_ecb(&key_hex, &block_hex, decrypt),
        Commands::XtsEnc(args) => cmd_xts(&args, true),
        Commands::XtsDec(args) => cmd_xts(&args, false),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_check(iterations: u64) -> Result<()> {
    let round_keys = expand_key(&Sm4Key::from(KAT_KEY));

    let single = encrypt_block(&KAT_KEY, &round_keys);
    if single != KAT_CIPHER {
        bail!("single-block vector mismatch: got {}", hex::encode(single));
    }
    info!("single-block vector ok");

    let start = Instant::now();
    let mut block = KAT_KEY;
    for _ in 0..iterations {
        block = encrypt_block(&block, &round_keys);
    }
    let elapsed = start.elapsed();
    info!(
        "{iterations} chained encryptions in {:.3?} ({:.1} MiB/s)",
        elapsed,
        (iterations as f64 * 16.0) / elapsed.as_secs_f64().max(f64::EPSILON) / (1024.0 * 1024.0)
    );
    if iterations == KAT_ITERATIONS && block != KAT_CIPHER_1M {
        bail!("iterated vector mismatch: got {}", hex::encode(block));
    }

    for _ in 0..iterations {
        block = decrypt_block(&block, &round_keys);
    }
    if block != KAT_KEY {
        bail!("chained decryption did not return the plaintext");
    }
    info!("iterated round trip ok");
    println!("ok");
    Ok(())
}

fn cmd_ecb(key_hex: &str, block_hex: &str, decrypt: bool) -> Result<()> {
    let cipher = Sm4::from_key(&parse_key_hex(key_hex)?);
    let block = parse_block_hex(block_hex)?;
    let out = if decrypt {
        cipher.decrypt_block(&block)
    } else {
        cipher.encrypt_block(&block)
    };
    println!("{}", hex::encode(out));
    Ok(())
}

fn cmd_xts(args: &XtsArgs, encrypt: bool) -> Result<()> {
    let data_key = parse_key_hex(&args.data_key_hex).context("data key")?;
    let tweak_key = parse_key_hex(&args.tweak_key_hex).context("tweak key")?;
    if data_key.as_bytes() == tweak_key.as_bytes() {
        bail!("data key and tweak key must differ");
    }
    let xts = Sm4Xts::from_ciphers(Sm4::from_key(&data_key), Sm4::from_key(&tweak_key))
        .with_tweak_config(args.standard.into());

    let mut data = read_file(&args.input)?;
    debug!(
        "{} bytes, sector size {}, first sector {}, {:?}",
        data.len(),
        args.sector_size,
        args.first_sector,
        args.standard
    );
    let processed = if encrypt {
        xts.encrypt_sectors(args.first_sector, args.sector_size, &mut data)
    } else {
        xts.decrypt_sectors(args.first_sector, args.sector_size, &mut data)
    };
    processed.with_context(|| format!("process {}", args.input.display()))?;

    fs::write(&args.output, &data)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        "{} {} bytes to {}",
        if encrypt { "encrypted" } else { "decrypted" },
        data.len(),
        args.output.display()
    );
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut data_key = [0u8; 16];
    let mut tweak_key = [0u8; 16];
    rng.fill_bytes(&mut data_key);
    rng.fill_bytes(&mut tweak_key);
    let xts = Sm4Xts::new(&data_key, &tweak_key)?;

    let len = 16 + (rng.next_u32() as usize % 48);
    let mut plaintext = vec![0u8; len];
    rng.fill_bytes(&mut plaintext);
    let mut tweak = [0u8; 16];
    rng.fill_bytes(&mut tweak);

    let ciphertext = xts.encrypt(&tweak, &plaintext)?;
    let decrypted = xts.decrypt(&tweak, &ciphertext)?;

    println!("data key: {}", hex::encode(data_key));
    println!("tweak key: {}", hex::encode(tweak_key));
    println!("tweak: {}", hex::encode(tweak));
    println!("plaintext ({len} bytes): {}", hex::encode(&plaintext));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Sm4Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    let key = Sm4Key::try_from(bytes.as_slice()).context("SM4 key must be 32 hex characters")?;
    Ok(key)
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    if bytes.len() != 16 {
        bail!("block must be 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
