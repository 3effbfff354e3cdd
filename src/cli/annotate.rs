use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::annotation::{AnnotationRun, Annotator};
use crate::cli::{annotate_config, OutputFormat, StoreArgs};
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};

#[derive(Args)]
pub struct AnnotateArgs {
    /// Protein FASTA file: .fa, .fasta, .faa or .fas, optionally gzipped
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub stores: StoreArgs,

    /// Directory for reports and the domain table (created if missing)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Worker threads (0 = all available cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the input lacks a FASTA extension, if the catalog or
/// the input cannot be read, or if the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    anyhow::ensure!(
        is_fasta_file(&args.input),
        "Input is not a FASTA file (expected .fa, .fasta, .faa or .fas, optionally gzipped): {}",
        args.input.display()
    );

    // The catalog is loaded before any output so a bad store writes nothing
    let catalog = args.stores.load(verbose)?;

    let sequences = parse_fasta_file(&args.input)
        .with_context(|| format!("Failed to read sequences from {}", args.input.display()))?;
    if verbose {
        eprintln!("Read {} sequences from {}", sequences.len(), args.input.display());
    }

    let run = Annotator::with_config(&catalog, annotate_config(args.threads))
        .annotate(&sequences, &args.output)?;

    print_run(&run, format)
}

/// Print a run summary in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_run(run: &AnnotationRun, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!(
                "Annotated {} sequences: {} domains found",
                run.sequences, run.hits
            );
            println!("Table:   {}", run.table_path.display());
            println!("Reports: {}", run.reports.len());
            if !run.issues.is_empty() {
                println!("\nIssues ({}):", run.issues.len());
                for issue in &run.issues {
                    println!("  {issue}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(run)?);
        }
        OutputFormat::Tsv => print!("{}", run.table.to_tsv_string()),
    }
    Ok(())
}
