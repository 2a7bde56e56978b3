//! gNMI to RDF converter
//!
//! Reads a gNMI telemetry dump and writes interface counters as N-Triples.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use gnmi_rdf::{Converter, ConverterConfig, CounterSelection, InputFormat, read_envelope};
use gnmi_rdf_common::init_tracing;

/// gNMI counters to RDF N-Triples converter
#[derive(Parser, Debug)]
#[command(name = "gnmi-rdf")]
#[command(about = "Convert gNMI interface counters to RDF N-Triples")]
struct Args {
    /// Telemetry dump to convert ("-" or omitted for stdin)
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write triples to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input encoding
    #[arg(long, value_parser = ["auto", "json", "cbor"])]
    format: Option<String>,

    /// Emit every counter, not only inOctets and inBroadcastPkts
    #[arg(long)]
    all_counters: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => ConverterConfig::load_from_file(path)?,
        None => ConverterConfig::default(),
    };

    apply_overrides(&args, &mut config)?;

    // Initialize logging
    init_tracing(&config.logging)?;
    debug!("Configuration: {:?}", config);

    let responses = match input_path(&args) {
        Some(path) => {
            info!("Reading telemetry from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input '{}'", path.display()))?;
            read_envelope(file, config.input.format)?
        }
        None => {
            info!("Reading telemetry from stdin");
            read_envelope(io::stdin().lock(), config.input.format)?
        }
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output '{}'", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let converter = Converter::new(config.rdf.counters);
    converter.convert(&responses, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Apply command-line flags on top of the loaded configuration.
fn apply_overrides(args: &Args, config: &mut ConverterConfig) -> anyhow::Result<()> {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.format {
        config.input.format = format
            .parse::<InputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if args.all_counters {
        config.rdf.counters = CounterSelection::All;
    }
    Ok(())
}

/// Input file to read, or `None` for stdin.
fn input_path(args: &Args) -> Option<&Path> {
    args.input
        .as_deref()
        .filter(|path| *path != Path::new("-"))
}
