//! extracto - extract structured party data from notarial act text
//!
//! A command line tool that runs the extraction pipeline over one or more
//! already-extracted text files and prints each resulting act as JSON.
//! Optional JSON side files supply external section hints and page
//! geometry for the tabular fallback.

use clap::{ArgAction, Parser};
use extracto_core::{
    extract_act, DocumentText, ExtractOptions, Extraction, PageGeometry, SectionHints,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extract structured party data from notarial act text files.
#[derive(Parser, Debug)]
#[command(name = "extracto")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to plain text files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to a JSON file with role offset hints from an external
    /// recognizer: {"grantors": [s, e], "beneficiaries": [s, e], ...}
    #[arg(long = "hints")]
    hints: Option<PathBuf>,

    /// Path to a JSON file with per-page text span geometry for the
    /// tabular fallback
    #[arg(long = "geometry")]
    geometry: Option<PathBuf>,

    /// Number of pages the upstream extractor read
    #[arg(long = "pages", default_value = "1")]
    pages: usize,

    /// Output file path. Use "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Attach the diagnostic bundle to each record
    #[arg(long = "debug-bundle", action = ArgAction::SetTrue)]
    debug_bundle: bool,
}

#[derive(Serialize)]
struct Record {
    file: String,
    #[serde(flatten)]
    extraction: ExtractionOut,
}

#[derive(Serialize)]
struct ExtractionOut {
    #[serde(flatten)]
    act: extracto_core::Act,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<extracto_core::DebugBundle>,
}

fn load_options(args: &Args) -> std::result::Result<ExtractOptions, Box<dyn std::error::Error>> {
    let hints: SectionHints = match &args.hints {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SectionHints::default(),
    };
    let geometry: Vec<PageGeometry> = match &args.geometry {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    Ok(ExtractOptions {
        hints,
        geometry,
        params: Default::default(),
        collect_debug: args.debug_bundle,
    })
}

fn process_file(
    path: &Path,
    output: &mut dyn Write,
    args: &Args,
    opts: &ExtractOptions,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut doc = DocumentText::new(fs::read_to_string(path)?);
    doc.pages_read = args.pages;
    doc.method = "text-file".to_string();

    let Extraction { act, debug } = extract_act(&doc, opts)?;
    let record = Record {
        file: path.display().to_string(),
        extraction: ExtractionOut { act, debug },
    };
    serde_json::to_writer_pretty(&mut *output, &record)?;
    writeln!(output)?;
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    let opts = match load_options(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error reading options: {}", e);
            std::process::exit(1);
        }
    };

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }
        if let Err(e) = process_file(path, &mut output, &args, &opts) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;
    Ok(())
}
