//! CLI entry point for docweave.
//!
//! Encodes documentation ids for analyzed .NET types and resolves
//! `inheritdoc` against a compiled XML documentation file.

use anyhow::{Context, Result};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use docweave::pipeline::{self, AnalysisRun, export_json, load_declarations};
use docweave::{DocError, Registry, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// XML documentation id encoder and inheritdoc resolver
#[derive(Parser)]
#[command(
    name = "docweave",
    version = env!("CARGO_PKG_VERSION"),
    about = "XML documentation id encoder and inheritdoc resolver",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up .docweave directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Resolve inheritdoc for every element of an analysis run
    Resolve {
        /// JSON array of type declarations
        #[arg(short, long)]
        descriptors: PathBuf,

        /// Compiled XML documentation file
        #[arg(long)]
        docs: PathBuf,

        /// Only print this element (qualified id without prefix)
        #[arg(long)]
        id: Option<String>,

        /// Output JSON instead of XML
        #[arg(long)]
        json: bool,
    },

    /// Print the documentation id of every element in a descriptor file
    Id {
        /// JSON array of type declarations
        #[arg(short, long)]
        descriptors: PathBuf,
    },
}

fn init_logging(settings: &Settings) {
    let fallback = if settings.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(error: &DocError) {
    eprintln!("Error: {error}");

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        eprintln!("\nSuggestions:");
        for suggestion in suggestions {
            eprintln!("  • {suggestion}");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Init { .. }) && cli.config.is_none() {
        if let Err(warning) = Settings::check_init() {
            eprintln!("Warning: {warning}");
            eprintln!("Using default configuration for now.");
        }
    }

    let settings = match &cli.config {
        Some(path) => match Settings::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                report_error(&DocError::from(e));
                std::process::exit(1);
            }
        },
        None => Settings::load().unwrap_or_else(|e| {
            report_error(&DocError::from(e));
            eprintln!("Using default configuration for now.");
            Settings::default()
        }),
    };
    init_logging(&settings);

    match cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(force)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("Failed to create configuration file")?;
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(&settings)?);
        }

        Commands::Resolve {
            descriptors,
            docs,
            id,
            json,
        } => {
            let analysis = AnalysisRun::from_files(&descriptors, &docs)?;
            let resolved = pipeline::run(analysis, &settings)?;

            if json {
                println!(
                    "{}",
                    export_json(&resolved, id.as_deref(), settings.output.pretty)?
                );
                return Ok(());
            }

            if let Some(id) = id {
                let tree = resolved
                    .resolved_doc(&id)
                    .with_context(|| format!("No element with id '{id}'"))?;
                println!("{}", tree.to_xml());
                return Ok(());
            }

            for (id, tree) in resolved.iter() {
                if tree.is_empty() {
                    continue;
                }
                println!("{id}");
                println!("  {}", tree.to_xml());
            }
        }

        Commands::Id { descriptors } => {
            let registry = Registry::build(load_declarations(&descriptors)?)?;
            let types = registry
                .ids()
                .into_iter()
                .filter_map(|id| registry.lookup(id))
                .filter(|entry| entry.is_type());
            for entry in types {
                println!("{}:{}", entry.descriptor.kind.id_prefix(), entry.id);
                let members = registry
                    .members_of(&entry.id)
                    .into_iter()
                    .filter_map(|id| registry.lookup(id));
                for member in members {
                    println!("  {}:{}", member.descriptor.kind.id_prefix(), member.id);
                }
            }
        }
    }

    Ok(())
}
