use std::{fs, fs::File, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use aslink::{emit_trace, Assembler6502};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(version, about = "Two-pass 6502 assembler", long_about = None)]
struct Args {
    /// Assembly source file
    source: PathBuf,

    /// Output file (default: source with a `.bin` extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Load address of the first byte, in any literal syntax (`$C000`, `49152`, ...)
    #[arg(long, default_value = "$0600", value_parser = parse_origin)]
    origin: u16,

    /// Print the linked records to stdout
    #[arg(long)]
    trace: bool,

    /// Write an assembly listing to this file
    #[arg(long, value_name = "FILE")]
    listing: Option<String>,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(short, long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn parse_origin(s: &str) -> Result<u16, String> {
    aslink::is_16bit_number(s).ok_or_else(|| format!("`{s}` is not a 16-bit literal"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = main_real(args) {
        tracing::error!("{e:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main_real(args: Args) -> Result<()> {
    let file = File::open(&args.source)
        .with_context(|| format!("cant open {}", args.source.display()))?;

    let mut asm = Assembler6502::new();
    asm.set_origin(args.origin);
    let (bytes, records) = asm
        .assemble_reader(file)
        .with_context(|| format!("{}", args.source.display()))?;

    tracing::debug!("symbols: {}", asm.symbols().len());
    for (name, addr) in asm.symbols().iter() {
        if let Some(addr) = addr {
            tracing::trace!("{name} = ${addr:04X}");
        }
    }

    if args.trace {
        print!("{}", emit_trace(&records));
    }
    if let Some(listing) = &args.listing {
        asm.save_listing(&records, listing)
            .with_context(|| format!("cant write listing {listing}"))?;
    }

    let output = args
        .output
        .unwrap_or_else(|| args.source.with_extension("bin"));
    tracing::trace!("writing");
    fs::write(&output, &bytes).with_context(|| format!("cant write {}", output.display()))?;
    tracing::info!(
        "{} bytes at ${:04X} -> {}",
        bytes.len(),
        args.origin,
        output.display()
    );
    Ok(())
}
