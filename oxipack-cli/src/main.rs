//! OxiPack CLI - The Oxidized Packer
//!
//! Pack and unpack bit-level binary blobs described by directive strings.

mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use oxipack_blob::{ByteOrder, Directive, FieldType, Fill, Format, SourceKind};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use utils::{format_value, parse_hex, parse_value, to_hex};

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(
    author,
    version,
    about = "The Oxidized Packer - bit-level blob pack/unpack"
)]
#[command(long_about = "
OxiPack packs and unpacks binary blobs at bit granularity, driven by a
directive string:

  %[p][n][a][l|b]{i,y,w,d,q,s}[0|1|r]

Examples:
  oxipack pack '%2i%ay%bw' 0b10 0x7f 0x1234
  oxipack pack '%4s%d0' HELO --output header.bin
  oxipack unpack '%2i%ay%bw' --hex 807f1234
  oxipack unpack '%p4lw' --file words.bin --json
  oxipack inspect '%p4alw%16y0'
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack values into a binary blob
    #[command(alias = "p")]
    Pack {
        /// Directive format string, e.g. "%2i%ay%bw"
        format: String,

        /// One value per value-consuming directive, in directive order
        values: Vec<String>,

        /// Write raw bytes to this file instead of hex to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Unpack a binary blob into values
    #[command(alias = "x")]
    Unpack {
        /// Directive format string the blob was packed with
        format: String,

        /// Read the blob from this file
        #[arg(short, long, conflicts_with = "hex")]
        file: Option<PathBuf>,

        /// Blob as a hex string
        #[arg(short = 'H', long)]
        hex: Option<String>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show the compiled directive sequence of a format string
    #[command(alias = "i")]
    Inspect {
        /// Directive format string
        format: String,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack {
            format,
            values,
            output,
        } => cmd_pack(&format, &values, output.as_deref()),
        Commands::Unpack {
            format,
            file,
            hex,
            json,
        } => cmd_unpack(&format, file.as_deref(), hex.as_deref(), json),
        Commands::Inspect { format, json } => cmd_inspect(&format, json),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "oxipack", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_pack(
    format_text: &str,
    raw_values: &[String],
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = Format::compile(format_text)?;

    let specs: Vec<_> = format
        .directives()
        .iter()
        .filter_map(|d| match d {
            Directive::Field(spec) if spec.consumes_value() => Some(*spec),
            _ => None,
        })
        .collect();
    if raw_values.len() != specs.len() {
        return Err(format!(
            "format consumes {} values, {} supplied",
            specs.len(),
            raw_values.len()
        )
        .into());
    }

    let mut values = Vec::with_capacity(specs.len());
    for (spec, raw) in specs.iter().zip(raw_values) {
        values.push(parse_value(spec, raw)?);
    }

    let blob = format.pack(&values)?;

    match output {
        Some(path) => {
            fs::write(path, blob.bytes())?;
            println!(
                "Wrote {} bytes ({} bits) to {}",
                blob.byte_len(),
                blob.bit_len(),
                path.display()
            );
        }
        None => {
            println!("{}", to_hex(blob.bytes()));
            if std::io::stdout().is_terminal() {
                eprintln!("{} bytes, {} bits", blob.byte_len(), blob.bit_len());
            }
        }
    }
    Ok(())
}

fn cmd_unpack(
    format_text: &str,
    file: Option<&Path>,
    hex: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = Format::compile(format_text)?;

    let data = match (file, hex) {
        (Some(path), _) => fs::read(path)?,
        (None, Some(text)) => parse_hex(text)?,
        (None, None) => return Err("one of --file or --hex is required".into()),
    };

    let values = format.unpack(&data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for (index, value) in values.iter().enumerate() {
            println!("[{index}] {}", format_value(value));
        }
    }
    Ok(())
}

fn cmd_inspect(format_text: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = Format::compile(format_text)?;

    if json {
        let payload = serde_json::json!({
            "format": format_text,
            "bit_len": format.bit_len(),
            "byte_len": format.byte_len(),
            "value_count": format.value_count(),
            "directives": format.directives(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Format: {:?} ({} bytes, {} bits, {} values)",
        format_text,
        format.byte_len(),
        format.bit_len(),
        format.value_count()
    );
    println!();
    for (index, directive) in format.directives().iter().enumerate() {
        println!("[{index}] {}", describe(directive));
    }
    Ok(())
}

fn describe(directive: &Directive) -> String {
    match directive {
        Directive::Literal(bytes) => format!(
            "literal {} ({} bytes)",
            String::from_utf8_lossy(bytes).escape_debug(),
            bytes.len()
        ),
        Directive::Field(spec) => {
            let ty = match spec.ty {
                FieldType::Bit => "bit",
                FieldType::Byte => "byte",
                FieldType::Word16 => "word16",
                FieldType::Word32 => "word32",
                FieldType::Word64 => "word64",
                FieldType::Str => "string",
            };
            let mut parts = vec![format!("{ty} x{}", spec.quantity)];
            match spec.order {
                ByteOrder::Native => {}
                ByteOrder::Little => parts.push("little endian".into()),
                ByteOrder::Big => parts.push("big endian".into()),
            }
            if spec.aligned {
                parts.push("aligned".into());
            }
            match spec.fill {
                Fill::None => {}
                Fill::Zeros => parts.push("fill zeros".into()),
                Fill::Ones => parts.push("fill ones".into()),
                Fill::Random => parts.push("fill random".into()),
            }
            if spec.source == SourceKind::Array {
                parts.push("array".into());
            }
            format!("{} - {} bits", parts.join(", "), spec.total_bits())
        }
    }
}
