use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::{CatalogEntry, DomainCatalog};
use crate::cli::{OutputFormat, StoreArgs};
use crate::matching::compiler::CompiledMatcher;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all patterns in the catalog
    List {
        #[command(flatten)]
        stores: StoreArgs,

        /// Only list patterns that failed to compile
        #[arg(long)]
        failed_only: bool,
    },

    /// Show one pattern with its documentation
    Show {
        /// Pattern name or accession (e.g., "PS00001")
        #[arg(required = true)]
        key: String,

        #[command(flatten)]
        stores: StoreArgs,
    },

    /// Export the catalog to a JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        #[command(flatten)]
        stores: StoreArgs,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the pattern is unknown,
/// or the export cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            stores,
            failed_only,
        } => run_list(&stores.load(verbose)?, failed_only, format),
        CatalogCommands::Show { key, stores } => run_show(&stores.load(verbose)?, &key, format),
        CatalogCommands::Export { output, stores } => run_export(&stores.load(verbose)?, &output),
    }
}

fn status(entry: &CatalogEntry) -> String {
    match entry.compile_error() {
        Some(err) => format!("failed: {err}"),
        None => "ok".to_string(),
    }
}

fn run_list(catalog: &DomainCatalog, failed_only: bool, format: OutputFormat) -> anyhow::Result<()> {
    let filtered: Vec<&CatalogEntry> = catalog
        .entries()
        .iter()
        .filter(|e| !failed_only || e.compile_error().is_some())
        .collect();

    match format {
        OutputFormat::Text => {
            println!(
                "Motif Catalog ({} patterns, {} usable, {} documentation records)\n",
                catalog.len(),
                catalog.usable_count(),
                catalog.doc_count()
            );
            println!("{:<10} {:<30} STATUS", "ACCESSION", "NAME");
            println!("{}", "-".repeat(80));
            for entry in &filtered {
                println!(
                    "{:<10} {:<30} {}",
                    entry.definition.accession,
                    entry.definition.name,
                    status(entry)
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = filtered
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "name": e.definition.name,
                        "accession": e.definition.accession,
                        "description": e.definition.description,
                        "pattern": e.definition.raw_pattern,
                        "expression": e.matcher().map(CompiledMatcher::expression),
                        "compile_error": e.compile_error().map(ToString::to_string),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("accession\tname\tdescription\tpattern\tstatus");
            for entry in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.definition.accession,
                    entry.definition.name,
                    entry.definition.description,
                    entry.definition.raw_pattern,
                    status(entry)
                );
            }
        }
    }

    Ok(())
}

fn run_show(catalog: &DomainCatalog, key: &str, format: OutputFormat) -> anyhow::Result<()> {
    let entry = catalog
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("Pattern not found: {key}"))?;
    let definition = &entry.definition;
    let doc = catalog.lookup_doc(definition);

    match format {
        OutputFormat::Text => {
            println!("Pattern: {}\n", definition.name);
            println!("Accession:   {}", definition.accession);
            println!("Description: {}", definition.description);
            println!("Pattern:     {}", definition.raw_pattern);
            match entry.matcher() {
                Some(matcher) => println!("Expression:  {}", matcher.expression()),
                None => println!("Status:      {}", status(entry)),
            }
            match &doc {
                Ok(record) => println!("\nDocumentation ({}):\n{}", record.accession, record.text),
                Err(err) => println!("\n{err}"),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "definition": definition,
                "expression": entry.matcher().map(CompiledMatcher::expression),
                "compile_error": entry.compile_error().map(ToString::to_string),
                "documentation": doc.as_ref().ok(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("accession\tname\tpattern\texpression\tdocumentation");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                definition.accession,
                definition.name,
                definition.raw_pattern,
                entry.matcher().map_or("", CompiledMatcher::expression),
                doc.as_ref().map_or("", |d| d.accession.as_str())
            );
        }
    }

    Ok(())
}

fn run_export(catalog: &DomainCatalog, output: &Path) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} patterns to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
