use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use novapage_core::PageConfig;
use novapage_tui::simulate::SimulationOptions;

mod commands;

#[derive(Parser)]
#[command(name = "novapage")]
#[command(author, version, about = "Preview and exercise interactive landing pages in the terminal")]
struct Cli {
    /// Config file (defaults to ~/.config/novapage/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a page manifest in the interactive preview
    Preview {
        /// Page manifest (TOML)
        manifest: PathBuf,
    },
    /// Scroll through a page headlessly and print what happens
    Simulate {
        /// Page manifest (TOML)
        manifest: PathBuf,
        /// Rows scrolled per step
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
        step: u16,
        /// Terminal width in columns
        #[arg(long, default_value_t = 120)]
        width: u16,
        /// Terminal height in rows
        #[arg(long, default_value_t = 40)]
        height: u16,
        /// Seed for particle placement
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Validate and send the contact form once
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Overrides form.endpoint from the config
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => PageConfig::load_from(path)?,
        None => PageConfig::load()?,
    };

    // The preview owns the terminal, so its logs go to a file
    let log_to_file = matches!(cli.command, Commands::Preview { .. });
    init_tracing(&config, log_to_file);

    match cli.command {
        Commands::Preview { manifest } => commands::preview::run(config, &manifest).await,
        Commands::Simulate {
            manifest,
            step,
            width,
            height,
            seed,
        } => {
            let options = SimulationOptions {
                step_rows: step,
                width,
                height,
                seed,
            };
            commands::simulate::run(config, &manifest, &options)
        }
        Commands::Submit {
            name,
            email,
            message,
            endpoint,
        } => commands::submit::run(&config, name, email, message, endpoint).await,
    }
}

/// RUST_LOG wins over `general.log_level`
fn init_tracing(config: &PageConfig, to_file: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.general.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if !to_file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
        return;
    }

    match open_log_file(&config.log_path()) {
        Ok(file) => tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init(),
        // Nowhere to write; stay quiet rather than draw over the preview
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
