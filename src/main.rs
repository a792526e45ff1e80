//! Snippet Builder CLI
//!
//! Usage:
//!   snippet-builder [--clean]
//!
//! Reads `snippets.yaml` from the current directory and writes the Obsidian
//! snippet file, its variable map and the HyperSnips file. Output locations
//! come from `OBSIDIAN_SNIPPETS_PATH`, `OBSIDIAN_VARIABLES_PATH` and
//! `LATEX_SNIPPETS_PATH`, which may also be set in a local `.env` file.

use clap::Parser;

use snippet_builder::{build, clean, BuildConfig};

#[derive(Parser)]
#[command(name = "snippet-builder")]
#[command(about = "Build or clean snippet files.")]
struct Cli {
    /// Remove generated snippet files
    #[arg(long)]
    clean: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match BuildConfig::from_environment() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.clean {
        // Per-file failures are already logged and never change the exit code
        clean(&config);
        return;
    }

    if let Err(e) = build(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
