//! Scenario generation tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate a scenario from the built-in catalog
//! cargo run -p scengen_tools -- generate --bv 5000 --units 4 --faction Pirates --era ClanInvasion
//!
//! # Reproducible scenario with modifiers, using custom content
//! cargo run -p scengen_tools -- --content data/content.ron generate \
//!     --bv 12000 --units 8 --faction "Federated Suns" --era SuccessionWars \
//!     --max-modifiers 3 --allow-negative --seed 42
//!
//! # Validate a content file
//! cargo run -p scengen_tools -- validate data/content.ron
//! ```
//!
//! Output (stdout): JSON
//! Logs (stderr): progress and debug information

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scengen_core::config::GeneratorSettings;
use scengen_core::data::{Biome, ContentTables, Era, ObjectiveType};
use scengen_core::scenario::{ScenarioGenerator, ScenarioGeneratorConfig};
use scengen_tools::error::{Result, ToolError};
use scengen_tools::validate::{validate_content_file, Severity};

#[derive(Parser)]
#[command(name = "scengen-tools")]
#[command(about = "Scenario and OpFor generation tools")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// RON content file (built-in catalog when omitted)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// RON generator settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a scenario and print it as JSON
    Generate {
        /// Player force BV
        #[arg(long)]
        bv: i64,

        /// Player force unit count
        #[arg(short, long)]
        units: u32,

        /// OpFor faction
        #[arg(short, long)]
        faction: String,

        /// OpFor era (e.g. ClanInvasion)
        #[arg(short, long)]
        era: Era,

        /// Desired objective (e.g. Capture)
        #[arg(long)]
        objective: Option<ObjectiveType>,

        /// Use a specific template id
        #[arg(long, conflicts_with = "objective")]
        template: Option<String>,

        /// Battle biome
        #[arg(short, long)]
        biome: Option<Biome>,

        /// Difficulty multiplier
        #[arg(short, long, default_value = "1.0")]
        difficulty: f64,

        /// Maximum number of battle modifiers
        #[arg(short, long, default_value = "0")]
        max_modifiers: i32,

        /// Allow modifiers that favor the OpFor
        #[arg(long)]
        allow_negative: bool,

        /// Seed for a reproducible scenario
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate a RON content file
    Validate {
        /// Path to the content file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON output
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            bv,
            units,
            faction,
            era,
            objective,
            template,
            biome,
            difficulty,
            max_modifiers,
            allow_negative,
            seed,
            compact,
        } => {
            let content = load_content(cli.content.as_deref())?;
            let settings = load_settings(cli.settings.as_deref())?;

            let mut config = ScenarioGeneratorConfig::new(bv, units, faction, era)
                .with_difficulty(difficulty)
                .with_modifiers(max_modifiers, allow_negative);
            config.scenario_type = objective;
            config.template_id = template;
            config.biome = biome;
            config.seed = seed;

            let scenario = ScenarioGenerator::new(&content)
                .with_settings(settings)
                .generate(&config)?;
            tracing::info!(
                "OpFor: {} units in {} lance(s), {} BV ({} skill-adjusted)",
                scenario.op_for.units.len(),
                scenario.op_for.metadata.lance_count,
                scenario.op_for.total_bv,
                scenario.op_for.adjusted_total_bv()
            );

            let json = if compact {
                serde_json::to_string(&scenario)?
            } else {
                serde_json::to_string_pretty(&scenario)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Validate { path } => {
            tracing::info!("Validating content file: {}", path.display());
            let report = validate_content_file(&path)?;
            for issue in &report.issues {
                match issue.severity {
                    Severity::Error => tracing::error!("{}: {}", issue.context, issue.message),
                    Severity::Warning => tracing::warn!("{}: {}", issue.context, issue.message),
                }
            }
            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.has_errors() {
                return Err(ToolError::ValidationFailed(report.error_count()));
            }
            tracing::info!("Validation passed with {} warning(s)", report.warning_count());
            Ok(())
        }
    }
}

fn load_content(path: Option<&Path>) -> Result<ContentTables> {
    match path {
        Some(path) => {
            tracing::debug!("Loading content from {}", path.display());
            Ok(ContentTables::load(path)?)
        }
        None => Ok(ContentTables::builtin()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<GeneratorSettings> {
    match path {
        Some(path) => Ok(GeneratorSettings::load(path)?),
        None => Ok(GeneratorSettings::default()),
    }
}
