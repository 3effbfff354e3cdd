use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::annotation::{AnnotationRun, Annotator};
use crate::cli::annotate::print_run;
use crate::cli::{annotate_config, OutputFormat, StoreArgs};
use crate::parsing::blast::{parse_blast_file, QueryGroup};
use crate::parsing::fasta::write_fasta;
use crate::utils::validation::sanitize_file_stem;

/// Subject sequences of one query, written before annotation
pub const UNALIGNED_FASTA_NAME: &str = "unaligned.fasta";

/// Per-query annotation subdirectory
pub const DOMAINS_DIR_NAME: &str = "domains";

#[derive(Args)]
pub struct BlastArgs {
    /// Tab-delimited BLAST output with a header naming qseqid, sseqid and sseq
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub stores: StoreArgs,

    /// Directory that receives one subdirectory per query
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Worker threads (0 = all available cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

#[derive(Serialize)]
struct QueryRun {
    query_id: String,
    directory: PathBuf,
    subjects: usize,
    #[serde(flatten)]
    run: AnnotationRun,
}

/// Execute blast subcommand
///
/// # Errors
///
/// Returns an error if the catalog or the BLAST table cannot be read, or if
/// any query's output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BlastArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = args.stores.load(verbose)?;

    let groups = parse_blast_file(&args.input)
        .with_context(|| format!("Failed to read BLAST table {}", args.input.display()))?;
    if verbose {
        eprintln!("Read {} queries from {}", groups.len(), args.input.display());
    }

    let annotator = Annotator::with_config(&catalog, annotate_config(args.threads));
    let mut used_dirs = HashSet::new();
    let mut runs = Vec::with_capacity(groups.len());

    for (index, group) in groups.into_iter().enumerate() {
        let directory = args.output.join(query_dir_name(&group.query_id, index, &mut used_dirs));
        write_unaligned(&group, &directory)?;

        let run = annotator.annotate(&group.subjects, &directory.join(DOMAINS_DIR_NAME))?;
        if verbose {
            eprintln!(
                "{}: {} subjects, {} domains",
                group.query_id,
                group.subjects.len(),
                run.hits
            );
        }
        runs.push(QueryRun {
            query_id: group.query_id,
            directory,
            subjects: group.subjects.len(),
            run,
        });
    }

    match format {
        OutputFormat::Text => {
            println!("Annotated {} queries\n", runs.len());
            for query in &runs {
                println!("Query: {} ({})", query.query_id, query.directory.display());
                print_run(&query.run, format)?;
                println!();
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&runs)?),
        OutputFormat::Tsv => {
            println!("query_id\tsubjects\thits\tissues\ttable");
            for query in &runs {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    query.query_id,
                    query.subjects,
                    query.run.hits,
                    query.run.issues.len(),
                    query.run.table_path.display()
                );
            }
        }
    }

    Ok(())
}

fn query_dir_name(query_id: &str, index: usize, used: &mut HashSet<String>) -> String {
    let stem = sanitize_file_stem(query_id).unwrap_or_else(|_| format!("query_{}", index + 1));
    let mut name = stem.clone();
    let mut n = 2;
    while !used.insert(name.to_ascii_lowercase()) {
        name = format!("{stem}_{n}");
        n += 1;
    }
    name
}

fn write_unaligned(group: &QueryGroup, directory: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create {}", directory.display()))?;
    let path = directory.join(UNALIGNED_FASTA_NAME);
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_fasta(&mut writer, &group.subjects)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}
