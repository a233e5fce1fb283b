use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, warn};

use crate::cli::{MatchArgs, ReferenceArgs};
use crate::matching::engine::ResolutionEngine;
use crate::parsing::tsv::ColumnLayout;
use crate::pipeline::RowPipeline;
use crate::utils::validation::{is_stdin, parse_input_path};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Tab-separated input file with a header row. Use '-' for stdin
    #[arg(short, long, value_name = "FILE", value_parser = parse_input_path)]
    pub input: PathBuf,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Zero-indexed column holding the scientific names
    #[arg(short, long, default_value = "0")]
    pub column: usize,

    /// Keep the original names and add the corrected ones after them
    #[arg(short, long)]
    pub original: bool,

    /// Add a column describing how each name was resolved
    #[arg(short, long)]
    pub verbose: bool,

    /// Write corrected rows to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ResolveArgs {
    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout {
            column: self.column,
            keep_original: self.original,
            verbose: self.verbose,
        }
    }
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    debug!("input file: {}", args.input.display());
    debug!("WCVP file: {}", args.reference.wcvp.display());
    debug!("approximate matching: {:?}", args.matching.approximate);
    debug!("name column: {}", args.column);
    debug!("lowercase checklist: {}", args.reference.lower);
    debug!("keep original names: {}", args.original);
    debug!("show algorithm: {}", args.verbose);

    let index = args.reference.load()?;
    if index.is_empty() {
        warn!(
            "No usable names in WCVP checklist {}",
            args.reference.wcvp.display()
        );
    }

    let engine = ResolutionEngine::with_matcher(&index, args.matching.matcher());
    let pipeline = RowPipeline::new(engine, args.layout());

    let reader = open_input(&args.input)?;
    let writer = open_output(args.output.as_deref())?;
    pipeline.run(reader, writer)?;

    Ok(())
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    if is_stdin(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
