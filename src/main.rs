//! design-check - run the validation engine over exported design files
//!
//! Usage:
//!   design-check rules --rules rules.toml --context context.json
//!   design-check placement --design room.json --item p3

use av_design_core::core::config::EngineConfig;
use av_design_core::core::error::Result;
use av_design_core::core::types::Context;
use av_design_core::rules::{RuleEngine, RuleSet};
use av_design_core::spatial::{PlacementValidator, RoomLayout};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Validate AV room designs against rules and placement constraints
#[derive(Parser, Debug)]
#[command(name = "design-check")]
#[command(about = "Validate AV room designs against rules and placement constraints")]
struct Args {
    /// Engine configuration (TOML); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a rule file against a design context
    Rules {
        /// Rule file (.toml or .json)
        #[arg(long)]
        rules: PathBuf,

        /// Design context (JSON object)
        #[arg(long)]
        context: PathBuf,

        /// Only evaluate rules tagged with this aspect
        #[arg(long)]
        aspect: Option<String>,
    },
    /// Check equipment placements in a room layout
    Placement {
        /// Room layout export (JSON)
        #[arg(long)]
        design: PathBuf,

        /// Check a single placement against the rest; all placements otherwise
        #[arg(long)]
        item: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        "av_design_core=debug"
    } else {
        "av_design_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the checked design is valid
fn run(args: Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Rules {
            rules,
            context,
            aspect,
        } => {
            let mut rule_set = RuleSet::load(&rules)?.active();
            if let Some(aspect) = aspect {
                rule_set = rule_set.by_aspect(&aspect);
            }
            let context: Context = serde_json::from_str(&fs::read_to_string(&context)?)?;

            let result = RuleEngine::new(config).validate_design(rule_set.rules(), &context);
            tracing::info!(
                "{} rules evaluated: {} errors, {} warnings, {} suggestions",
                rule_set.len(),
                result.errors.len(),
                result.warnings.len(),
                result.suggestions.len()
            );
            print_json(&result)?;
            Ok(result.is_valid)
        }
        Command::Placement { design, item } => {
            let layout = RoomLayout::load(&design)?;
            let validator = PlacementValidator::new(config);

            match item {
                Some(id) => {
                    let placement = layout.placement(&id)?;
                    let result = validator.validate_placement(
                        placement,
                        &layout.room,
                        &layout.placements,
                        &layout.catalog,
                    );
                    print_json(&result)?;
                    Ok(result.is_valid)
                }
                None => {
                    let report = validator.validate_layout(
                        &layout.room,
                        &layout.placements,
                        &layout.catalog,
                    );
                    tracing::info!(
                        "{} placements checked, {} invalid",
                        report.placements.len(),
                        report.invalid_ids().count()
                    );
                    print_json(&report)?;
                    Ok(report.is_valid)
                }
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
