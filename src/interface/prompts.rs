use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::interface::render::{display_meals, display_plan, sort_for_display};
use crate::models::{Macro, MacroCaps, Meal};
use crate::planner::constants::FUZZY_MATCH_THRESHOLD;
use crate::state::{PlannerSession, write_plan, write_plan_json};

/// Top-level menu entries of the interactive planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddMeal,
    RemoveMeal,
    ShowPlan,
    SetCaps,
    FilterTypes,
    Export,
    LoadCatalog,
    Reset,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 9] = [
        MenuAction::AddMeal,
        MenuAction::RemoveMeal,
        MenuAction::ShowPlan,
        MenuAction::SetCaps,
        MenuAction::FilterTypes,
        MenuAction::Export,
        MenuAction::LoadCatalog,
        MenuAction::Reset,
        MenuAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::AddMeal => "Add a meal",
            MenuAction::RemoveMeal => "Remove a meal",
            MenuAction::ShowPlan => "Show plan",
            MenuAction::SetCaps => "Change daily macro caps",
            MenuAction::FilterTypes => "Filter meal types",
            MenuAction::Export => "Export plan",
            MenuAction::LoadCatalog => "Load another catalog",
            MenuAction::Reset => "Reset plan",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Prompt for the next menu action.
pub fn prompt_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MenuAction::ALL[selection])
}

/// Prompt for a single non-negative cap value.
pub fn prompt_cap(kind: Macro, current: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("Max {} (g)", kind.label()))
        .default(format!("{}", current))
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("'{}' is not a number", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidCap {
            macro_kind: kind,
            value,
        });
    }
    Ok(value)
}

/// Prompt for all three caps, defaulting to the current ones.
pub fn prompt_caps(current: &MacroCaps) -> Result<MacroCaps> {
    let protein = prompt_cap(Macro::Protein, current.get(Macro::Protein))?;
    let carb = prompt_cap(Macro::Carb, current.get(Macro::Carb))?;
    let fat = prompt_cap(Macro::Fat, current.get(Macro::Fat))?;
    MacroCaps::new(protein, carb, fat)
}

/// Prompt for included meal types. Returns the chosen subset.
pub fn prompt_meal_types(all_types: &[String], session: &PlannerSession) -> Result<Vec<String>> {
    let defaults: Vec<bool> = all_types
        .iter()
        .map(|t| session.type_filter().is_none_or(|f| f.contains(t)))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("Meal types to include (space to toggle, enter to confirm)")
        .items(all_types)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| all_types[i].clone()).collect())
}

/// Narrow a list of meals by a free-text query.
///
/// Substring matches come first, then fuzzy matches above the threshold.
pub fn search_meals<'a>(meals: &[&'a Meal], query: &str) -> Vec<&'a Meal> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return meals.to_vec();
    }

    let (mut hits, rest): (Vec<&Meal>, Vec<&Meal>) = meals
        .iter()
        .copied()
        .partition(|m| m.name.to_lowercase().contains(&query));

    let mut fuzzy: Vec<(&Meal, f64)> = rest
        .into_iter()
        .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();
    fuzzy.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    hits.extend(fuzzy.into_iter().map(|(m, _)| m));
    hits
}

/// Let the user pick one of the meals that currently fit.
pub fn prompt_pick_meal(session: &PlannerSession) -> Result<Option<Meal>> {
    let mut available = session.available_meals();
    if available.is_empty() {
        display_meals(&available, "Available meals");
        return Ok(None);
    }
    sort_for_display(&mut available);

    let query: String = Input::new()
        .with_prompt("Search meals (press Enter to list all)")
        .allow_empty(true)
        .interact_text()?;

    let matches = search_meals(&available, &query);
    if matches.is_empty() {
        println!("No fitting meal matches '{}'", query.trim());
        return Ok(None);
    }

    let mut options: Vec<String> = matches
        .iter()
        .map(|m| {
            format!(
                "{} ({}) - P {:.1} / C {:.1} / F {:.1}",
                m.name, m.meal_type, m.protein, m.carb, m.fat
            )
        })
        .collect();
    options.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt("Add which meal?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(matches.get(selection).map(|m| (*m).clone()))
}

/// Let the user pick a plan position to remove.
pub fn prompt_remove_position(session: &PlannerSession) -> Result<Option<usize>> {
    let selection = session.selection();
    if selection.is_empty() {
        println!("No meals selected yet.");
        return Ok(None);
    }

    let mut options: Vec<String> = selection
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {} ({})", i + 1, m.name, m.meal_type))
        .collect();
    options.push("Cancel".to_string());

    let choice = Select::new()
        .with_prompt("Remove which entry?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok((choice < selection.len()).then_some(choice))
}

/// Prompt for a file path with a default.
pub fn prompt_path(prompt: &str, default: &Path) -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(input.trim()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Print a non-fatal session error and keep going; anything else propagates.
fn report(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e @ (PlannerError::Prompt(_) | PlannerError::Logging(_))) => Err(e),
        Err(e) => {
            println!("{}", e);
            Ok(())
        }
    }
}

fn export_plan(session: &PlannerSession, default_path: &Path) -> Result<()> {
    let path = prompt_path("Export plan to", default_path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        write_plan_json(&path, session.selection())?;
    } else {
        write_plan(&path, session.selection())?;
    }
    println!("Plan saved to {}", path.display());
    Ok(())
}

/// Run the interactive planning loop until the user quits.
pub fn run_interactive(session: &mut PlannerSession, export_path: &Path) -> Result<()> {
    println!("Pick your daily macro caps, filter by meal type, and add meals.");
    println!("Meals that would push you over a cap are hidden.");
    display_plan(session);

    loop {
        let action = prompt_action()?;
        debug!(?action, "menu action");

        let outcome = match action {
            MenuAction::AddMeal => prompt_pick_meal(session).and_then(|picked| match picked {
                Some(meal) => {
                    let name = meal.name.clone();
                    session.add(meal)?;
                    println!("Added: {}", name);
                    Ok(())
                }
                None => Ok(()),
            }),
            MenuAction::RemoveMeal => {
                prompt_remove_position(session).and_then(|picked| match picked {
                    Some(position) => {
                        let removed = session.remove_at(position)?;
                        println!("Removed: {}", removed.name);
                        Ok(())
                    }
                    None => Ok(()),
                })
            }
            MenuAction::ShowPlan => {
                display_plan(session);
                Ok(())
            }
            MenuAction::SetCaps => prompt_caps(session.caps()).map(|caps| {
                session.set_caps(caps);
                display_plan(session);
            }),
            MenuAction::FilterTypes => {
                let all_types = session.meal_types();
                if all_types.is_empty() {
                    println!("The catalog has no meal types to filter by.");
                    Ok(())
                } else {
                    prompt_meal_types(&all_types, session).map(|types| {
                        session.set_type_filter(types);
                    })
                }
            }
            MenuAction::Export => export_plan(session, export_path),
            MenuAction::LoadCatalog => {
                prompt_path("Catalog CSV path", Path::new("Macro_Meals.csv")).and_then(|path| {
                    let discard = session.selection().is_empty()
                        || prompt_yes_no("Loading a catalog clears the current plan. Continue?", false)?;
                    if discard {
                        session.reload_from_path(&path)?;
                        println!("Loaded {} meals", session.catalog().len());
                    }
                    Ok(())
                })
            }
            MenuAction::Reset => {
                session.reset();
                println!("Plan cleared.");
                Ok(())
            }
            MenuAction::Quit => break,
        };

        report(outcome)?;
    }

    if !session.selection().is_empty() && prompt_yes_no("Export plan before quitting?", false)? {
        report(export_plan(session, export_path))?;
    }

    Ok(())
}
