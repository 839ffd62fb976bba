//! dczip CLI - distance-coding compressor
//!
//! Compresses or restores a single byte stream between files or standard
//! streams.

use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dczip")]
#[command(author, version, about = "Distance-coding compressor")]
#[command(long_about = "
dczip compresses a single byte stream with a Burrows-Wheeler transform,
distance coding, and adaptive Huffman entropy coding. The output is
self-delimiting; decompression restores the input exactly.

The byte 0x00 is reserved as the transform sentinel and must not occur
in compressor input.

Examples:
  dczip notes.txt -o notes.dcz
  dczip -d notes.dcz -o notes.txt
  dczip notes.txt > notes.dcz
  dczip -d notes.dcz
")]
struct Cli {
    /// Input file (standard input if omitted)
    input: Option<PathBuf>,

    /// Output file (standard output if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// Report sizes on standard error
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(cli.input.as_deref())?;

    let output = if cli.decompress {
        dczip::decompress(&input)?
    } else {
        dczip::compress(&input)?
    };

    if cli.verbose {
        if cli.decompress {
            eprintln!("Decompressed {} bytes -> {} bytes", input.len(), output.len());
        } else {
            eprintln!("Compressed {} bytes -> {} bytes", input.len(), output.len());
            if !input.is_empty() {
                eprintln!(
                    "Ratio: {:.1}%",
                    output.len() as f64 / input.len() as f64 * 100.0
                );
            }
        }
    }

    write_output(cli.output.as_deref(), &output)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(path) => std::fs::write(path, data)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
