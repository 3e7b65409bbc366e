use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rusty_reconciler::{run, ImportConfig, ParserConfig};

/// Imports transaction CSV files and prints the resulting balance.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Files to import, in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Lines to skip at the top of each file
    #[arg(long, default_value_t = 1)]
    header_lines: usize,

    /// Field delimiter, a single ASCII character
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Remove each file once its transactions are saved
    #[arg(long)]
    remove_source: bool,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("expected a single ASCII character, got {value:?}")),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ImportConfig::default()
        .parser(
            ParserConfig::default()
                .header_lines(cli.header_lines)
                .delimiter(cli.delimiter),
        )
        .remove_source(cli.remove_source);

    if let Err(err) = run(cli.files.as_slice(), std::io::stdout(), config).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
