use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use macro_meal_planner_rs::cli::{Cli, Command};
use macro_meal_planner_rs::error::Result;
use macro_meal_planner_rs::interface::{
    display_meals, display_plan, run_interactive, sort_for_display,
};
use macro_meal_planner_rs::logging::init_tracing;
use macro_meal_planner_rs::models::{MacroCaps, Meal};
use macro_meal_planner_rs::state::{
    PlannerSession, bundled_catalog, load_catalog, write_plan, write_plan_json,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let caps = MacroCaps::new(cli.protein, cli.carb, cli.fat)?;
    let catalog = load_source(cli.file.as_deref())?;
    let session = PlannerSession::new(catalog, caps);

    match cli.command.unwrap_or_default() {
        Command::Plan { output } => cmd_plan(session, &output),
        Command::List { types } => cmd_list(session, types),
        Command::Build { meals, output, json } => cmd_build(session, &meals, output, json),
    }
}

/// Load the user's catalog, or the bundled one when no path is given.
fn load_source(path: Option<&Path>) -> Result<Vec<Meal>> {
    let meals = match path {
        Some(path) => load_catalog(path)?,
        None => bundled_catalog()?,
    };
    info!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled".into()),
        meals = meals.len(),
        "catalog ready"
    );
    Ok(meals)
}

/// Run the interactive planner.
fn cmd_plan(mut session: PlannerSession, output: &Path) -> Result<()> {
    println!("Loaded {} meals", session.catalog().len());
    run_interactive(&mut session, output)
}

/// Print meals that fit under the caps with an empty plan.
fn cmd_list(mut session: PlannerSession, types: Vec<String>) -> Result<()> {
    session.set_type_filter(types);

    let mut available = session.available_meals();
    sort_for_display(&mut available);
    display_meals(&available, "Available meals");

    Ok(())
}

/// Add meals by name, stopping at the first one that is unknown or over a cap.
fn cmd_build(
    mut session: PlannerSession,
    meals: &[String],
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    for name in meals {
        session.add_by_name(name)?;
    }

    display_plan(&session);

    if let Some(path) = output {
        if json {
            write_plan_json(&path, session.selection())?;
        } else {
            write_plan(&path, session.selection())?;
        }
        println!("Plan saved to {}", path.display());
    }

    Ok(())
}
