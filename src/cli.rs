use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::planner::constants::{
    DEFAULT_CARB_CAP, DEFAULT_EXPORT_FILE, DEFAULT_FAT_CAP, DEFAULT_PROTEIN_CAP,
};

/// Macro Meal Planner: pick meals into a daily plan without exceeding protein, carb and fat caps.
#[derive(Parser, Debug)]
#[command(name = "macro_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a meal catalog CSV (columns: Meal name, Meal type, Protein, Carb, Fat).
    /// Uses the bundled catalog when omitted.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Daily protein cap in grams.
    #[arg(long, default_value_t = DEFAULT_PROTEIN_CAP)]
    pub protein: f64,

    /// Daily carb cap in grams.
    #[arg(long, default_value_t = DEFAULT_CARB_CAP)]
    pub carb: f64,

    /// Daily fat cap in grams.
    #[arg(long, default_value_t = DEFAULT_FAT_CAP)]
    pub fat: f64,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a plan interactively.
    Plan {
        /// Default export path offered when saving the plan.
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// List the meals that fit under the configured caps.
    List {
        /// Only include these meal types (repeatable).
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<String>,
    },

    /// Add meals by name, in order, and print the resulting plan.
    Build {
        /// Meal names (case-insensitive).
        #[arg(required = true)]
        meals: Vec<String>,

        /// Write the plan to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export as JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            output: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}
