use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::compiler::compile;

#[derive(Args)]
pub struct CompileArgs {
    /// Pattern in PROSITE syntax (e.g., 'N-{P}-[ST]-{P}.')
    #[arg(required = true, allow_hyphen_values = true)]
    pub pattern: String,
}

/// Execute compile subcommand
///
/// # Errors
///
/// Returns an error if the pattern does not compile.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompileArgs, format: OutputFormat) -> anyhow::Result<()> {
    let matcher = compile(&args.pattern)
        .map_err(|e| anyhow::anyhow!("Failed to compile '{}': {e}", args.pattern))?;

    match format {
        OutputFormat::Text => {
            println!("Pattern:    {}", args.pattern);
            println!("Expression: {}", matcher.expression());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "pattern": args.pattern,
                "expression": matcher.expression(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("pattern\texpression");
            println!("{}\t{}", args.pattern, matcher.expression());
        }
    }

    Ok(())
}
