//! UnitFlow CLI - ask unit conversion questions in plain words

use anyhow::Result;
use clap::Parser;
use console::style;

#[derive(Parser)]
#[command(name = "unitflow")]
#[command(version)]
#[command(about = "Convert quantities written in plain words", long_about = None)]
struct Cli {
    /// The phrase to convert, e.g. `20 inches in ft`
    #[arg(required = true)]
    words: Vec<String>,

    /// Verbose output (trace every pipeline decision)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let phrase = cli.words.join(" ");
    match unitflow_core::convert(&phrase) {
        Some(answer) => println!("{answer}"),
        None => println!("{}", style("sorry, no idea what that means").dim()),
    }
    Ok(())
}
