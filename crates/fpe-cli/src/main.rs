//! Command-line interface for format-preserving encryption of bounded integers.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use fpe_core::{numeral, Base, CipherId, KeyMaterial};
use fpe_runtime::{FpeConfig, FpeContext};
use num_bigint::RandBigInt;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Format-preserving encryption CLI.
#[derive(Parser)]
#[command(
    name = "fpe",
    version,
    author,
    about = "Format-preserving encryption of integers in [min, max] (Feistel + cycle walking)"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a numeral.
    Enc {
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        value: ValueArgs,
        #[command(flatten)]
        keys: KeyArgs,
    },
    /// Decrypt a numeral.
    Dec {
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        value: ValueArgs,
        #[command(flatten)]
        keys: KeyArgs,
    },
    /// Verify round trips and domain closure on random samples.
    Check {
        #[command(flatten)]
        engine: EngineArgs,
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the block widths derived from the domain.
    Sizing {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Run a local demo: random key material, encrypt a random value, decrypt back.
    Demo {
        #[command(flatten)]
        engine: EngineArgs,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Domain, cipher and round settings; flags override the config file.
#[derive(Args)]
struct EngineArgs {
    /// JSON file with `min`, `max`, `cipher`, `rounds`, `walk_limit`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Domain lower bound (decimal).
    #[arg(long)]
    min: Option<String>,
    /// Domain upper bound (decimal).
    #[arg(long)]
    max: Option<String>,
    /// Cipher, e.g. aes-128-cbc or aes-256-ecb.
    #[arg(long)]
    cipher: Option<CipherId>,
    /// Number of Feistel rounds (at least 3).
    #[arg(long)]
    rounds: Option<u32>,
    /// Maximum cycle-walk iterations per call.
    #[arg(long)]
    walk_limit: Option<u32>,
}

#[derive(Args)]
struct ValueArgs {
    /// Numeral to transform.
    #[arg(long)]
    value: String,
    /// Numeral base: 2, 10, 16 (or bin, dec, hex).
    #[arg(long, default_value = "10")]
    base: Base,
    /// Left-pad the output to the domain's width for the base.
    #[arg(long, default_value_t = false)]
    pad: bool,
}

/// Secrets; each may be given as text or as hex. A hex flag wins over the
/// text form, including one taken from the environment.
#[derive(Args)]
struct KeyArgs {
    /// Master key (at least 16 bytes).
    #[arg(long, env = "FPE_KEY", hide_env_values = true)]
    key: Option<String>,
    /// Master key as hex.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
    /// Password (at least 16 bytes).
    #[arg(long, env = "FPE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Password as hex.
    #[arg(long, value_name = "HEX")]
    password_hex: Option<String>,
    /// Initialization vector (required by CBC ciphers).
    #[arg(long, env = "FPE_IV", hide_env_values = true)]
    iv: Option<String>,
    /// Initialization vector as hex.
    #[arg(long, value_name = "HEX")]
    iv_hex: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    match cli.command {
        Commands::Enc {
            engine,
            value,
            keys,
        } => cmd_transform(&engine, &value, &keys, true),
        Commands::Dec {
            engine,
            value,
            keys,
        } => cmd_transform(&engine, &value, &keys, false),
        Commands::Check {
            engine,
            samples,
            seed,
        } => cmd_check(&engine, samples, seed),
        Commands::Sizing { engine } => cmd_sizing(&engine),
        Commands::Demo { engine, seed } => cmd_demo(&engine, seed),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("initialise tracing subscriber")
}

fn cmd_transform(
    engine: &EngineArgs,
    value: &ValueArgs,
    keys: &KeyArgs,
    forward: bool,
) -> Result<()> {
    let ctx = build_context(engine)?;
    let material = keys.material()?;
    let output = if forward {
        ctx.encrypt(&value.value, value.base, &material, value.pad)
            .context("encrypt")?
    } else {
        ctx.decrypt(&value.value, value.base, &material, value.pad)
            .context("decrypt")?
    };
    println!("{output}");
    Ok(())
}

fn cmd_check(engine: &EngineArgs, samples: usize, seed: Option<u64>) -> Result<()> {
    let ctx = build_context(engine)?;
    let mut rng = seeded_rng(seed);
    let material = random_material(&mut rng, ctx.cipher())?;
    let domain = ctx.domain();
    let upper = domain.max() + 1u8;

    for _ in 0..samples {
        let value = rng.gen_biguint_range(domain.min(), &upper);
        let base = Base::ALL[rng.gen_range(0..Base::ALL.len())];
        let input = numeral::render(&value, base.radix(), 0);

        let encrypted = ctx.encrypt(&input, base, &material, false)?;
        let encrypted_value = numeral::parse(&encrypted, base.radix())?;
        if !domain.contains(&encrypted_value) {
            bail!("{input} (base {base}) encrypted to {encrypted}, outside the domain");
        }
        let decrypted = ctx.decrypt(&encrypted, base, &material, false)?;
        if decrypted != input {
            bail!("round trip mismatch for {input} (base {base}): got {decrypted}");
        }
    }
    info!(samples, "check passed");
    println!("ok: {samples} samples");
    Ok(())
}

fn cmd_sizing(engine: &EngineArgs) -> Result<()> {
    let ctx = build_context(engine)?;
    let sizing = ctx.sizing();
    println!("bin_size: {}", sizing.bin_size);
    println!("side_size: {}", sizing.side_size);
    println!("dec_size: {}", sizing.dec_size);
    println!("hex_size: {}", sizing.hex_size);
    Ok(())
}

fn cmd_demo(engine: &EngineArgs, seed: Option<u64>) -> Result<()> {
    let ctx = build_context(engine)?;
    let mut rng = seeded_rng(seed);
    let material = random_material(&mut rng, ctx.cipher())?;
    let upper = ctx.domain().max() + 1u8;
    let plaintext = rng
        .gen_biguint_range(ctx.domain().min(), &upper)
        .to_string();

    let ciphertext = ctx.encrypt(&plaintext, Base::Decimal, &material, true)?;
    let decrypted = ctx.decrypt(&ciphertext, Base::Decimal, &material, false)?;

    println!("demo key: {}", hex::encode(material.master_key()));
    println!("demo password: {}", hex::encode(material.password()));
    if let Some(iv) = material.iv() {
        println!("demo iv: {}", hex::encode(iv));
    }
    println!("plaintext: {plaintext}");
    println!("ciphertext: {ciphertext}");
    println!("decrypted: {decrypted}");
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_context(args: &EngineArgs) -> Result<FpeContext> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FpeConfig::default(),
    };
    if let Some(min) = &args.min {
        config.min = min.clone();
    }
    if let Some(max) = &args.max {
        config.max = max.clone();
    }
    if let Some(cipher) = args.cipher {
        config.cipher = cipher;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(walk_limit) = args.walk_limit {
        config.walk_limit = walk_limit;
    }
    config.build().context("invalid engine configuration")
}

fn load_config(path: &PathBuf) -> Result<FpeConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

impl KeyArgs {
    fn material(&self) -> Result<KeyMaterial> {
        let key = secret(&self.key, &self.key_hex, "key")?
            .context("a master key is required (--key, --key-hex or FPE_KEY)")?;
        let password = secret(&self.password, &self.password_hex, "password")?
            .context("a password is required (--password, --password-hex or FPE_PASSWORD)")?;
        let iv = secret(&self.iv, &self.iv_hex, "iv")?;
        Ok(KeyMaterial::new(key, password, iv)?)
    }
}

fn secret(text: &Option<String>, hex_text: &Option<String>, what: &str) -> Result<Option<Vec<u8>>> {
    match (text, hex_text) {
        (_, Some(h)) => hex::decode(h.trim())
            .map(Some)
            .with_context(|| format!("decode {what} hex")),
        (Some(t), None) => Ok(Some(t.as_bytes().to_vec())),
        (None, None) => Ok(None),
    }
}

fn random_material(rng: &mut impl RngCore, cipher: CipherId) -> Result<KeyMaterial> {
    let mut key = [0u8; 32];
    let mut password = [0u8; 32];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut password);
    let iv = cipher.iv_bytes().map(|len| {
        let mut iv = vec![0u8; len];
        rng.fill_bytes(&mut iv);
        iv
    });
    Ok(KeyMaterial::new(key.to_vec(), password.to_vec(), iv)?)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
