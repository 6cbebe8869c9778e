use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use tally_import::ProcessConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Split ledger credits into settlement channels and write a summary report"
)]
struct Cli {
    /// Input ledger CSV
    input: PathBuf,

    /// Report path (default: <input stem>_summary.csv next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file overriding keywords, column names, and report labels
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ProcessConfig::from_toml(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ProcessConfig::default(),
    };

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
    let outcome = tally_import::process(&cli.input, &output, &config)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    println!(
        "Wrote {} ({} rows, {} unmatched, {} non-positive)",
        output.display(),
        outcome.rows,
        outcome.dropped,
        outcome.excluded
    );
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ledger");
    input.with_file_name(format!("{stem}_summary.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_the_input() {
        assert_eq!(
            default_output(Path::new("/tmp/statements/april.csv")),
            PathBuf::from("/tmp/statements/april_summary.csv")
        );
        assert_eq!(
            default_output(Path::new("ledger.csv")),
            PathBuf::from("ledger_summary.csv")
        );
    }
}
