use crate::models::{Macro, Meal};
use crate::state::PlannerSession;

/// Width of the text progress bar in the plan summary.
const PROGRESS_WIDTH: usize = 20;

/// Sort meals by (type, name) for listing. Presentation only.
pub fn sort_for_display(meals: &mut [&Meal]) {
    meals.sort_by(|a, b| {
        a.meal_type
            .cmp(&b.meal_type)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Format a "used / cap (pct%)" summary for one macro.
///
/// A zero cap shows only the used amount.
pub fn macro_badge(label: &str, used: f64, cap: f64) -> String {
    if cap > 0.0 {
        let pct = ((used / cap) * 100.0).round().clamp(0.0, 100.0) as u32;
        format!("{}: {:.1} / {:.0} ({}%)", label, used, cap, pct)
    } else {
        format!("{}: {:.1}", label, used)
    }
}

/// Text progress bar for `used` out of `cap`, saturating at full.
pub fn progress_bar(used: f64, cap: f64, width: usize) -> String {
    let ratio = if cap > 0.0 {
        (used / cap).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn meal_line(meal: &Meal, name_width: usize, type_width: usize) -> String {
    format!(
        "{:<nw$}  {:<tw$}  P {:>6.1} g | C {:>6.1} g | F {:>6.1} g",
        meal.name,
        meal.meal_type,
        meal.protein,
        meal.carb,
        meal.fat,
        nw = name_width,
        tw = type_width
    )
}

/// Display a numbered list of meals.
pub fn display_meals(meals: &[&Meal], title: &str) {
    if meals.is_empty() {
        println!("{}: (none)", title);
        println!("No meals fit under the remaining caps. Remove a meal or increase your caps.");
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", title, meals.len());
    println!();

    let name_width = meals.iter().map(|m| m.name.len()).max().unwrap_or(10);
    let type_width = meals.iter().map(|m| m.meal_type.len()).max().unwrap_or(5);

    for (i, meal) in meals.iter().enumerate() {
        println!("{:>3}. {}", i + 1, meal_line(meal, name_width, type_width));
    }

    println!();
}

/// Display the current plan with totals against caps.
pub fn display_plan(session: &PlannerSession) {
    let selection = session.selection();

    println!();
    println!("=== Your Plan ===");
    println!();

    if selection.is_empty() {
        println!("No meals selected yet.");
        println!();
        return;
    }

    let name_width = selection.iter().map(|m| m.name.len()).max().unwrap_or(10);
    let type_width = selection.iter().map(|m| m.meal_type.len()).max().unwrap_or(5);

    for (i, meal) in selection.iter().enumerate() {
        println!("{:>3}. {}", i + 1, meal_line(meal, name_width, type_width));
    }

    let totals = session.totals();
    let caps = session.caps();

    println!();
    println!("--- Totals vs caps ---");
    for kind in Macro::ALL {
        let used = totals.get(kind);
        let cap = caps.get(kind);
        println!(
            "{} {}",
            progress_bar(used, cap, PROGRESS_WIDTH),
            macro_badge(kind.label(), used, cap)
        );
    }

    let remaining = session.remaining();
    println!(
        "Remaining: P {:.1} g | C {:.1} g | F {:.1} g",
        remaining.protein, remaining.carb, remaining.fat
    );
    if let Some(kind) = totals.first_exceeding(caps.as_macros()) {
        println!("Note: {} total is above its cap (caps were lowered).", kind);
    }
    println!();
}
