mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dispatch",
    version,
    about = "Turn pasted job listings into work orders and sequence a rep's stops"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse pasted job listings (text or XLSX) into structured jobs
    Parse {
        /// Path to a text or XLSX file, or "-" for stdin
        input_file: PathBuf,

        /// Predefined city registry: phoenix (default), tucson
        #[arg(short, long, value_name = "NAME", conflicts_with = "registry")]
        preset: Option<String>,

        /// Custom JSON registry file
        #[arg(short, long, value_name = "FILE")]
        registry: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed jobs to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Sequence a rep's jobs into a visiting order and fetch a driving route
    Route {
        /// JSON array of jobs, as written by `dispatch parse -O`
        jobs_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also write the route as GPX
        #[arg(long, value_name = "FILE")]
        gpx: Option<PathBuf>,
    },
    /// Inspect and validate city registries
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
}

#[derive(Subcommand)]
enum RegistryAction {
    /// List predefined registries
    List,
    /// Show the cities and tag keywords of a registry
    Show {
        /// Preset name (e.g., "phoenix")
        preset: String,
    },
    /// Validate a custom registry file
    Validate {
        /// Path to JSON registry file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            preset,
            registry,
            output,
            out,
        } => commands::parse::run(input_file, preset, registry, &output, out),
        Commands::Route {
            jobs_file,
            output,
            gpx,
        } => commands::route::run(jobs_file, &output, gpx).await,
        Commands::Registry { action } => match action {
            RegistryAction::List => commands::registry::list(),
            RegistryAction::Show { preset } => commands::registry::show(&preset),
            RegistryAction::Validate { file } => commands::registry::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
