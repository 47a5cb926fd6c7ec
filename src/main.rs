//! md5fold CLI
//!
//! Command-line front end for the MD5 engine.
//!
//! # Commands
//!
//! - `digest` - 128-bit MD5 of an argument
//! - `digest64` - folded 64-bit MD5 of an argument
//! - `selftest` - check the RFC 1321 known answers
//! - `benchmark` - measure throughput

use clap::{Parser, Subcommand};
use std::hint::black_box;
use std::time::Instant;
use tracing::{debug, info};

use md5fold::input::decode_input;
use md5fold::report::{render_digest, render_digest64, Digest64Format, DigestFormat};
use md5fold::{selftest, DigestEngine, LengthField};

#[derive(Parser)]
#[command(name = "md5fold")]
#[command(version)]
#[command(about = "MD5 digests and folded 64-bit checksums")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Store only the low 32 bits of the bit length (legacy digests)
    #[arg(long, global = true)]
    legacy_length: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 128-bit MD5 of INPUT
    Digest {
        /// Bytes to digest (UTF-8 text, or hex with --hex)
        input: String,

        /// Interpret INPUT as hex-encoded bytes
        #[arg(long)]
        hex: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DigestFormat::Rfc)]
        format: DigestFormat,
    },

    /// Compute the folded 64-bit MD5 of INPUT
    Digest64 {
        /// Bytes to digest (UTF-8 text, or hex with --hex)
        input: String,

        /// Interpret INPUT as hex-encoded bytes
        #[arg(long)]
        hex: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Digest64Format::Packed)]
        format: Digest64Format,
    },

    /// Verify the RFC 1321 test suite
    Selftest,

    /// Run performance benchmark
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "10000")]
        count: u32,

        /// Input size in bytes
        #[arg(short, long, default_value = "1024")]
        size: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let engine = if cli.legacy_length {
        DigestEngine::with_length_field(LengthField::Truncated32)
    } else {
        DigestEngine::new()
    };
    debug!(length_field = ?engine.length_field(), "engine configured");

    let result = match cli.command {
        Commands::Digest { input, hex, format } => cmd_digest(&engine, &input, hex, format),
        Commands::Digest64 { input, hex, format } => cmd_digest64(&engine, &input, hex, format),
        Commands::Selftest => cmd_selftest(&engine),
        Commands::Benchmark { count, size } => cmd_benchmark(&engine, count, size),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by RUST_LOG or the -v count
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn cmd_digest(
    engine: &DigestEngine,
    raw: &str,
    hex: bool,
    format: DigestFormat,
) -> anyhow::Result<()> {
    let input = decode_input(raw, hex)?;
    debug!(bytes = input.len(), hex, "digesting input");

    let digest = engine.try_digest(&input)?;
    println!(
        "{}",
        render_digest(digest, input.len(), engine.length_field(), format)?
    );

    Ok(())
}

fn cmd_digest64(
    engine: &DigestEngine,
    raw: &str,
    hex: bool,
    format: Digest64Format,
) -> anyhow::Result<()> {
    let input = decode_input(raw, hex)?;
    debug!(bytes = input.len(), hex, "digesting input");

    let digest64 = engine.try_digest(&input)?.fold();
    println!(
        "{}",
        render_digest64(digest64, input.len(), engine.length_field(), format)?
    );

    Ok(())
}

fn cmd_selftest(engine: &DigestEngine) -> anyhow::Result<()> {
    let report = selftest::run(engine);

    for failure in &report.failures {
        println!(
            "FAIL {}: expected {}, got {}",
            failure.name, failure.expected, failure.actual
        );
    }
    println!("{}/{} cases passed", report.passed, report.total());

    if !report.is_success() {
        anyhow::bail!("{} self-test case(s) failed", report.failures.len());
    }

    Ok(())
}

fn cmd_benchmark(engine: &DigestEngine, count: u32, size: usize) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("Benchmark count must be at least 1");
    }

    println!(
        "Running benchmark with {} digests of {} bytes...",
        count, size
    );
    info!(count, size, "benchmark started");

    let mut data = vec![0x5Au8; size];

    let start = Instant::now();
    for i in 0..count {
        if data.len() >= 4 {
            data[..4].copy_from_slice(&i.to_le_bytes());
        }
        black_box(engine.digest(black_box(&data)));
    }
    let elapsed = start.elapsed();

    let total_bytes = size as f64 * count as f64;
    let secs = elapsed.as_secs_f64();
    let blocks = md5fold::algorithm::padded_len(size) / md5fold::algorithm::BLOCK_SIZE;

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed: {:.3}s", secs);
    println!("  Digests/s: {:.0}", count as f64 / secs);
    println!("  Throughput: {:.2} MB/s", total_bytes / secs / 1_000_000.0);
    println!("  Blocks per digest: {}", blocks);
    info!(elapsed_ms = elapsed.as_millis() as u64, "benchmark finished");

    Ok(())
}
