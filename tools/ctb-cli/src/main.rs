extern crate core;
extern crate libctb;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

/// Size of one transform chunk fed to the progress bar (in bytes)
const TRANSFORM_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "CTB CLI")]
#[command(about, author, version, long_about = None)]
struct Cli {
    /// Print keystream derivation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Variant {
    /// "86" keystream (CTB v2/v3 family)
    #[value(name = "86")]
    Cipher86,
    /// "FDG" keystream
    #[value(name = "fdg")]
    Fdg,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decrypt or encrypt a layer payload with a derived keystream
    #[command(arg_required_else_help = true)]
    Cipher {
        /// Layer payload file
        file: String,
        /// Keystream variant
        #[arg(long, value_enum, default_value_t = Variant::Cipher86)]
        variant: Variant,
        /// File seed (decimal or 0x-prefixed hex); 0 leaves data unchanged
        #[arg(long, value_parser = parse_u32)]
        seed: u32,
        /// Slice index of the layer
        #[arg(long, value_parser = parse_u32)]
        slice: u32,
        /// Overwrite files
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
        /// Outbound file
        #[arg(short, long, value_name = "FILE")]
        out: String,
    },
    /// Compute or check the SHA-256 checksum of a payload
    #[command(arg_required_else_help = true)]
    Digest {
        /// Payload file
        file: String,
        /// Expected checksum in hex
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,
    },
    /// Translate a printer byte counter into a layer number
    #[command(arg_required_else_help = true)]
    Layer {
        /// JSON manifest with the per-layer end offsets
        offsets: String,
        /// Byte counter reported by the printer
        #[arg(long)]
        byte: u64,
    },
    /// Decrypt or encrypt a header region with a repeating key
    #[command(arg_required_else_help = true)]
    Unmask {
        /// Header or preview region file
        file: String,
        /// Repeating key in hex
        #[arg(long, value_name = "HEX")]
        key: String,
        /// Overwrite files
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
        /// Outbound file
        #[arg(short, long, value_name = "FILE")]
        out: String,
    },
}

#[derive(Deserialize, Debug)]
struct OffsetsManifest {
    offsets: Vec<u64>,
}

enum Keystream {
    Cipher86(libctb::cipher::Keyring86),
    Fdg(libctb::cipher::KeyringFdg),
}

impl Keystream {
    fn new(variant: Variant, seed: u32, slice_index: u32) -> Self {
        match variant {
            Variant::Cipher86 => Self::Cipher86(libctb::cipher::Keyring86::new(seed, slice_index)),
            Variant::Fdg => Self::Fdg(libctb::cipher::KeyringFdg::new(seed, slice_index)),
        }
    }

    fn apply(&mut self, data: &mut [u8]) {
        match self {
            Self::Cipher86(keyring) => keyring.apply(data),
            Self::Fdg(keyring) => keyring.apply(data),
        }
    }
}

pub fn main() -> Result<()> {
    let stdout = console::Term::stdout();
    let cli = Cli::parse();

    libctb::set_debug(cli.verbose);

    match cli.command {
        Commands::Cipher {
            file,
            variant,
            seed,
            slice,
            force,
            out,
        } => command_cipher(stdout, file, variant, seed, slice, out, force)?,
        Commands::Digest { file, expect } => command_digest(stdout, file, expect)?,
        Commands::Layer { offsets, byte } => command_layer(stdout, offsets, byte)?,
        Commands::Unmask {
            file,
            key,
            force,
            out,
        } => command_unmask(stdout, file, key, out, force)?,
    }

    Ok(())
}

fn command_cipher(
    stdout: console::Term,
    file: String,
    variant: Variant,
    seed: u32,
    slice: u32,
    out: String,
    force: bool,
) -> Result<()> {
    let mut buffer = std::fs::read(&file).into_diagnostic()?;

    if !confirm_overwrite(&out, force)? {
        return Ok(());
    }

    if seed == 0 {
        stdout
            .write_line("Seed is 0, payload is not encrypted")
            .into_diagnostic()?;
        std::fs::write(&out, &buffer).into_diagnostic()?;
        return Ok(());
    }

    if libctb::get_debug() {
        stdout
            .write_line(&format!(
                "Deriving {:?} keystream for seed {}, slice {}",
                variant, seed, slice
            ))
            .into_diagnostic()?;
    }

    let bar = indicatif::ProgressBar::new(buffer.len() as u64);
    bar.set_style(get_bar_style()?);
    bar.set_message(file);

    let mut keystream = Keystream::new(variant, seed, slice);
    for chunk in buffer.chunks_mut(TRANSFORM_CHUNK_SIZE) {
        keystream.apply(chunk);
        bar.inc(chunk.len() as u64);
    }

    bar.finish();

    std::fs::write(&out, &buffer).into_diagnostic()?;

    Ok(())
}

fn command_digest(stdout: console::Term, file: String, expect: Option<String>) -> Result<()> {
    let buffer = std::fs::read(&file).into_diagnostic()?;
    let digest = libctb::digest::compute_sha256(&buffer);

    stdout.write_line(&hex::encode(digest)).into_diagnostic()?;

    if let Some(expect) = expect {
        let expected = decode_digest(&expect)?;
        libctb::digest::verify_sha256(&buffer, &expected).into_diagnostic()?;
        stdout.write_line("Checksum matches").into_diagnostic()?;
    }

    Ok(())
}

fn command_layer(stdout: console::Term, offsets: String, byte: u64) -> Result<()> {
    let manifest = std::fs::read_to_string(offsets).into_diagnostic()?;
    let manifest: OffsetsManifest = serde_json::from_str(&manifest).into_diagnostic()?;

    let index = libctb::progress::LayerOffsetIndex::new(manifest.offsets).into_diagnostic()?;
    let layer = index.layer_for_byte_offset(byte).into_diagnostic()?;
    let percent = libctb::progress::progress_percent(byte, index.total_bytes());

    stdout
        .write_line(&format!(
            "Layer {} of {} ({:.1}%)",
            layer,
            index.layer_count(),
            percent
        ))
        .into_diagnostic()?;

    Ok(())
}

fn command_unmask(
    stdout: console::Term,
    file: String,
    key: String,
    out: String,
    force: bool,
) -> Result<()> {
    let buffer = std::fs::read(&file).into_diagnostic()?;
    let key = hex::decode(key.trim_start_matches("0x")).into_diagnostic()?;

    if !confirm_overwrite(&out, force)? {
        return Ok(());
    }

    if libctb::get_debug() {
        stdout
            .write_line(&format!("Unmasking {} bytes with a {}-byte key", buffer.len(), key.len()))
            .into_diagnostic()?;
    }

    let output = libctb::cipher::xor_cipher(&buffer, &key).into_diagnostic()?;
    std::fs::write(&out, output).into_diagnostic()?;

    Ok(())
}

fn confirm_overwrite(path: &String, force: bool) -> Result<bool> {
    if force || !is_exist_file(path) {
        return Ok(true);
    }

    let message = format!("File \"{}\" exists. Overwrite it?", path);

    dialoguer::Confirm::new()
        .with_prompt(message)
        .interact()
        .into_diagnostic()
}

fn decode_digest(text: &str) -> Result<[u8; libctb::DIGEST_LENGTH]> {
    let bytes = hex::decode(text.trim()).into_diagnostic()?;
    <[u8; libctb::DIGEST_LENGTH]>::try_from(bytes).map_err(|bytes| {
        miette::miette!(
            "expected a {}-byte checksum, received {} bytes",
            libctb::DIGEST_LENGTH,
            bytes.len()
        )
    })
}

fn parse_u32(text: &str) -> Result<u32, std::num::ParseIntError> {
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

fn get_bar_style() -> Result<indicatif::ProgressStyle> {
    Ok(
        indicatif::ProgressStyle::with_template("[{bar:32}] {pos:>7}/{len:7} {msg}")
            .into_diagnostic()?
            .progress_chars("=>-"),
    )
}

fn is_exist_file(path: &String) -> bool {
    let metadata = std::path::Path::new(path);
    metadata.exists()
}
