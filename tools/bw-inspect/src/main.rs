//! bw-inspect: look inside BOSSWAVE frames, URIs and keys from the shell.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use tokio::io::{AsyncBufRead, BufReader};

use bw_crypto::{BlsKeyPair, CurveKeyPair, Ed25519KeyPair};
use bw_telemetry::{init_logging, TelemetryConfig};
use bw_uri::{analyze, restrict_by, Uri};
use bw_wire::{Frame, FrameReader, ObjectRegistry, PoNum, WireConfig};

/// Inspect BOSSWAVE frames, URIs and keys
#[derive(Parser, Debug)]
#[command(name = "bw-inspect")]
#[command(about = "Inspect BOSSWAVE frames, URIs and keys")]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode every frame in a captured byte stream
    Decode {
        /// Capture file, or `-` for stdin
        input: PathBuf,

        /// Print object bodies as hex
        #[arg(long)]
        bodies: bool,
    },

    /// Validate a URI and report its wildcards
    Analyze { uri: String },

    /// Intersect a topic pattern with a permission pattern
    Restrict { from: String, by: String },

    /// Convert a payload number between integer and dotted form
    Ponum {
        /// `a.b.c.d`, decimal, or `0x`-prefixed hex
        value: String,
    },

    /// Generate a fresh entity keypair
    Keygen {
        /// Also generate a BLS keypair
        #[arg(long)]
        bls: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TelemetryConfig::from_env().for_service("bw-inspect");
    init_logging(&config).context("initialising logging")?;

    match args.command {
        Cmd::Decode { input, bodies } => decode(&input, bodies).await,
        Cmd::Analyze { uri } => analyze_uri(&uri),
        Cmd::Restrict { from, by } => restrict(&from, &by),
        Cmd::Ponum { value } => ponum(&value),
        Cmd::Keygen { bls } => keygen(bls),
    }
}

// =============================================================================
// DECODE
// =============================================================================

async fn decode(input: &Path, bodies: bool) -> Result<()> {
    let wire_config = WireConfig::from_env();
    wire_config.validate()?;
    let registry = ObjectRegistry::with_defaults();

    if input.as_os_str() == "-" {
        decode_stream(BufReader::new(tokio::io::stdin()), &registry, wire_config, bodies).await
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("opening {}", input.display()))?;
        decode_stream(BufReader::new(file), &registry, wire_config, bodies).await
    }
}

async fn decode_stream<R>(
    stream: R,
    registry: &ObjectRegistry,
    config: WireConfig,
    bodies: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = FrameReader::with_config(stream, registry, config);
    let mut count = 0usize;
    while let Some(frame) = reader
        .next_frame()
        .await
        .with_context(|| format!("decoding frame #{}", count + 1))?
    {
        count += 1;
        print_frame(count, &frame, bodies);
    }
    tracing::info!(frames = count, "Decode finished");
    Ok(())
}

fn print_frame(index: usize, frame: &Frame, bodies: bool) {
    println!(
        "frame #{index}: cmd={} seqno={} length={}",
        frame.command(),
        frame.seqno(),
        frame.encoded_length()
    );
    for header in frame.headers() {
        println!("  kv {} = {}", header.key, render_value(&header.value));
    }
    for ro in frame.routing_objects() {
        println!("  ro 0x{:02x} ({} bytes)", ro.ro_num(), ro.content().len());
        if bodies {
            println!("     {}", hex::encode(ro.content()));
        }
    }
    for po in frame.payload_objects() {
        println!("  po {} ({} bytes)", po.po_num(), po.content().len());
        if bodies {
            println!("     {}", hex::encode(po.content()));
        }
    }
}

/// Printable ASCII as-is, anything else as hex.
fn render_value(value: &[u8]) -> String {
    if value.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        format!("{:?}", String::from_utf8_lossy(value))
    } else {
        format!("0x{}", hex::encode(value))
    }
}

// =============================================================================
// URIS AND PO NUMBERS
// =============================================================================

fn analyze_uri(uri: &str) -> Result<()> {
    let analysis = analyze(uri);
    println!("valid:    {}", analysis.valid);
    println!("has_star: {}", analysis.has_star);
    println!("has_plus: {}", analysis.has_plus);
    println!("has_bang: {}", analysis.has_bang);
    if !analysis.valid {
        Uri::parse(uri)?;
    }
    Ok(())
}

fn restrict(from: &str, by: &str) -> Result<()> {
    let result = restrict_by(from, by)?;
    println!("{result}");
    Ok(())
}

fn ponum(value: &str) -> Result<()> {
    let po_num = if value.contains('.') {
        PoNum::from_dot(value)?
    } else if let Some(hex_digits) = value.strip_prefix("0x") {
        PoNum(u32::from_str_radix(hex_digits, 16).with_context(|| format!("parsing {value:?}"))?)
    } else {
        PoNum(value.parse().with_context(|| format!("parsing {value:?}"))?)
    };
    println!("{} = {} = 0x{:08x}", po_num.to_dot(), po_num.value(), po_num.value());
    Ok(())
}

// =============================================================================
// KEYS
// =============================================================================

fn keygen(bls: bool) -> Result<()> {
    let keypair = Ed25519KeyPair::generate(&mut OsRng);
    let curve = CurveKeyPair::from_ed25519(&keypair);

    println!("ed25519 sk: {}", hex::encode(keypair.to_seed()));
    println!("ed25519 vk: {}", hex::encode(keypair.public_key().as_bytes()));
    println!("x25519 sk:  {}", hex::encode(curve.secret.as_bytes()));
    println!("x25519 pk:  {}", hex::encode(curve.public));

    if bls {
        let bls_keypair = BlsKeyPair::generate(&mut OsRng)?;
        println!("bls sk:     {}", hex::encode(bls_keypair.secret_bytes()));
        println!("bls pk:     {}", hex::encode(bls_keypair.public_key().to_bytes()));
    }
    if !keypair.public_key().verify(b"bw-inspect", &keypair.sign(b"bw-inspect")) {
        bail!("generated keypair failed its self-check");
    }
    Ok(())
}
