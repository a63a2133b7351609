//! line-a2ui CLI: apply A2UI message batches and compile a surface to a LINE
//! Messaging API payload. Settings come from flags, the environment and `.env`.

mod config;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use line_kit::a2ui::SurfaceStore;
use line_kit::line::summarize;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "line-a2ui")]
#[command(about = "Render A2UI surfaces as LINE Messaging API payloads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the batches in order and print the compiled payload as JSON.
    Compile {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        config: Config,
        /// Pretty-print the payload.
        #[arg(long)]
        pretty: bool,
    },
    /// Apply the batches and list surface ids with their root and component count.
    Surfaces {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// A2UI batch file (a JSON array of messages); `-` or none reads stdin.
    #[arg(short, long = "input", value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

impl InputArgs {
    /// Read every batch and apply it to a fresh store.
    fn load_store(&self) -> Result<SurfaceStore> {
        let stdin = [PathBuf::from("-")];
        let inputs = if self.inputs.is_empty() {
            &stdin[..]
        } else {
            &self.inputs[..]
        };

        let mut store = SurfaceStore::new();
        for path in inputs {
            let text = read_input(path)?;
            let events = store
                .process_json(&text)
                .with_context(|| format!("{} is not JSON", path.display()))?;
            ::log::info!("[A2UI] Applied {}: {} events", path.display(), events.len());
        }
        Ok(store)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { input, config, pretty } => {
            let store = input.load_store()?;
            let message = store.compile(&config.surface, &config.compile_options());
            ::log::info!("[LINE] Compiled {}: {}", config.surface, summarize(&message));

            let json = if pretty {
                serde_json::to_string_pretty(&message)
            } else {
                serde_json::to_string(&message)
            }
            .context("Failed to serialize payload")?;
            println!("{json}");
            Ok(())
        }
        Commands::Surfaces { input } => {
            let store = input.load_store()?;
            for id in store.surface_ids() {
                let Some(surface) = store.surface(id) else {
                    continue;
                };
                println!(
                    "{id}\troot={}\tcomponents={}",
                    surface.root.as_deref().unwrap_or("-"),
                    surface.components.len()
                );
            }
            Ok(())
        }
    }
}
