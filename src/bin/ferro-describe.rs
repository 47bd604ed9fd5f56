// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-describe CLI
//!
//! Command-line interface for describing the difference between a reference
//! and an observed sequence.

use clap::{Parser, Subcommand};
use ferro_describe::cli::{
    describe_reader, output_candidates, output_description, output_error, output_frameshift_match,
    OutputFormat, DEFAULT_CANDIDATE_LIMIT,
};
use ferro_describe::config::DescribeConfig;
use ferro_describe::extractor::{Describer, DescriberConfig, Molecule};
use ferro_describe::frameshift::{self, frame_shift_tables, Frame};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-describe")]
#[command(author, version, about = "Describe sequence differences as HGVS variants")]
#[command(
    long_about = "Describe the difference between a reference and an observed sequence.

Examples:
  ferro-describe describe --reference ATGCATGCAT --observed CTGCATGCAG
  ferro-describe describe --protein --reference MKVLAT --observed MKLAT
  ferro-describe describe -i pairs.tsv -f json
  ferro-describe frameshift MWM --frame 1
  ferro-describe find-frameshift MWM CG"
)]
struct Cli {
    /// Log filter directive (e.g. warn, debug, ferro_describe=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file (default: .ferro-describe.toml or ~/.config/ferro/describe.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a reference/observed pair, or every pair in a file
    Describe {
        /// Reference sequence
        #[arg(long, required_unless_present = "input")]
        reference: Option<String>,

        /// Observed sequence
        #[arg(long, required_unless_present = "input")]
        observed: Option<String>,

        /// Input file with tab-separated reference and observed sequences (use - for stdin)
        #[arg(short, long, conflicts_with_all = ["reference", "observed"])]
        input: Option<PathBuf>,

        /// Treat the sequences as protein
        #[arg(long)]
        protein: bool,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Maximum length of either sequence
        #[arg(long)]
        max_length: Option<usize>,

        /// NCBI genetic code used for protein frame-shift detection
        #[arg(long)]
        genetic_code: Option<u8>,
    },

    /// List the peptides readable from a peptide in an alternative frame
    Frameshift {
        /// Peptide in one-letter codes
        peptide: String,

        /// Frame offset (1 or 2)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
        frame: u8,

        /// NCBI genetic code
        #[arg(long)]
        genetic_code: Option<u8>,

        /// Stop after this many candidates
        #[arg(long, default_value_t = DEFAULT_CANDIDATE_LIMIT)]
        limit: usize,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Find the longest frame-shifted suffix of an observed peptide
    FindFrameshift {
        /// Reference peptide in one-letter codes
        peptide: String,

        /// Observed peptide in one-letter codes
        observed: String,

        /// NCBI genetic code
        #[arg(long)]
        genetic_code: Option<u8>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Some(DescribeConfig::load_from_path(path)?),
        None => DescribeConfig::load(),
    };
    let base = file_config.unwrap_or_default();

    let level = cli
        .log_level
        .as_deref()
        .or(base.log_level.as_deref())
        .unwrap_or("warn")
        .to_string();
    init_tracing(&level)?;

    match cli.command {
        Commands::Describe {
            reference,
            observed,
            input,
            protein,
            format,
            max_length,
            genetic_code,
        } => {
            let config = base.merge_with_cli(max_length, genetic_code, None);
            run_describe(
                reference.as_deref(),
                observed.as_deref(),
                input.as_deref(),
                Molecule::from_is_dna(!protein),
                &format,
                &config,
            )
        }
        Commands::Frameshift {
            peptide,
            frame,
            genetic_code,
            limit,
            format,
        } => run_frameshift(
            &peptide,
            frame,
            genetic_code.unwrap_or(base.genetic_code),
            limit,
            &format,
        ),
        Commands::FindFrameshift {
            peptide,
            observed,
            genetic_code,
            format,
        } => run_find_frameshift(
            &peptide,
            &observed,
            genetic_code.unwrap_or(base.genetic_code),
            &format,
        ),
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    debug!("Tracing initialized with level: {}", level);

    Ok(())
}

fn run_describe(
    reference: Option<&str>,
    observed: Option<&str>,
    input: Option<&Path>,
    molecule: Molecule,
    format: &str,
    config: &DescribeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_str(format)?;
    let describer = Describer::new(DescriberConfig::from(config));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let (Some(reference), Some(observed)) = (reference, observed) {
        match describer.describe(reference, observed, molecule) {
            Ok(allele) => {
                output_description(&mut out, None, reference, observed, &allele, format)?
            }
            Err(e) => {
                output_error(&mut io::stderr(), reference, &e, format)?;
                std::process::exit(1);
            }
        }
        out.flush()?;
        return Ok(());
    }

    let reader: Box<dyn BufRead> = match input {
        Some(path) if path != Path::new("-") => Box::new(BufReader::new(File::open(path)?)),
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let summary = describe_reader(
        reader,
        &mut out,
        &mut io::stderr(),
        &describer,
        molecule,
        format,
    )?;
    out.flush()?;

    info!(
        "Described {} pair(s), {} error(s)",
        summary.described, summary.errors
    );
    if summary.errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_frameshift(
    peptide: &str,
    frame: u8,
    genetic_code: u8,
    limit: usize,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_str(format)?;
    let frame = if frame == 2 {
        Frame::PlusTwo
    } else {
        Frame::PlusOne
    };
    let tables = frame_shift_tables(genetic_code)?;

    let candidates = frameshift::enumerate(peptide, tables.get(frame)).take(limit);

    let mut out = io::stdout().lock();
    let written = output_candidates(&mut out, peptide, frame, candidates, format)?;
    debug!("{} candidate(s) for {}", written, peptide);
    Ok(())
}

fn run_find_frameshift(
    peptide: &str,
    observed: &str,
    genetic_code: u8,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from_str(format)?;
    let tables = frame_shift_tables(genetic_code)?;

    let mut out = io::stdout().lock();
    for frame in Frame::ALL {
        let found = frameshift::find(peptide, observed, tables.get(frame));
        output_frameshift_match(&mut out, frame, found, format)?;
    }
    Ok(())
}
