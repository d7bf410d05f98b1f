use std::collections::BTreeSet;
use std::path::Path;

use strsim::jaro_winkler;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::{MacroCaps, Macros, Meal};
use crate::planner::constants::FUZZY_MATCH_THRESHOLD;
use crate::planner::{BudgetTracker, SelectionStore};
use crate::state::catalog;

/// All state belonging to one planning session: the loaded catalog, the
/// budget tracker (caps + selection) and the optional meal-type filter.
///
/// Each session owns its state outright; nothing is shared between sessions.
pub struct PlannerSession {
    catalog: Vec<Meal>,
    tracker: BudgetTracker,
    /// Included meal types. `None` means every type.
    type_filter: Option<BTreeSet<String>>,
}

impl PlannerSession {
    pub fn new(catalog: Vec<Meal>, caps: MacroCaps) -> Self {
        Self {
            catalog,
            tracker: BudgetTracker::new(caps),
            type_filter: None,
        }
    }

    // ── Catalog ────────────────────────────────────────────────────────────

    /// Replace the catalog. Clears the selection and the type filter.
    pub fn replace_catalog(&mut self, catalog: Vec<Meal>) {
        info!(meals = catalog.len(), "catalog replaced; plan cleared");
        self.catalog = catalog;
        self.tracker.clear();
        self.type_filter = None;
    }

    /// Load a catalog file into the session.
    ///
    /// A failed load leaves the previous catalog and selection intact.
    pub fn reload_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let catalog = catalog::load_catalog(path)?;
        self.replace_catalog(catalog);
        Ok(())
    }

    pub fn catalog(&self) -> &[Meal] {
        &self.catalog
    }

    /// Distinct non-empty meal types, sorted.
    pub fn meal_types(&self) -> Vec<String> {
        self.catalog
            .iter()
            .map(|m| m.meal_type.as_str())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ── Filtering ──────────────────────────────────────────────────────────

    /// Restrict offered meals to the given types. An empty list means all types.
    pub fn set_type_filter<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types: BTreeSet<String> = types
            .into_iter()
            .map(|t| t.into().trim().to_string())
            .collect();
        self.type_filter = (!types.is_empty()).then_some(types);
    }

    pub fn clear_type_filter(&mut self) {
        self.type_filter = None;
    }

    pub fn type_filter(&self) -> Option<&BTreeSet<String>> {
        self.type_filter.as_ref()
    }

    /// Catalog meals passing the type filter, in catalog order.
    pub fn visible_meals(&self) -> impl Iterator<Item = &Meal> {
        self.catalog.iter().filter(|m| {
            self.type_filter
                .as_ref()
                .is_none_or(|types| types.contains(&m.meal_type))
        })
    }

    /// Meals that pass the type filter and fit the remaining budget, in
    /// catalog order. Recomputed from live state on every call.
    pub fn available_meals(&self) -> Vec<&Meal> {
        self.tracker.filter_admissible(self.visible_meals()).collect()
    }

    // ── Budget ─────────────────────────────────────────────────────────────

    pub fn set_caps(&mut self, caps: MacroCaps) {
        self.tracker.set_caps(caps);
    }

    pub fn caps(&self) -> &MacroCaps {
        self.tracker.caps()
    }

    pub fn remaining(&self) -> Macros {
        self.tracker.remaining()
    }

    pub fn totals(&self) -> Macros {
        self.tracker.totals()
    }

    pub fn is_admissible(&self, meal: &Meal) -> bool {
        self.tracker.is_admissible(meal)
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionStore {
        self.tracker.selection()
    }

    /// Add a meal, rejecting it if it would push any macro over its cap.
    pub fn add(&mut self, meal: Meal) -> Result<()> {
        self.tracker.add(meal)
    }

    /// Add the first catalog meal whose name matches (case-insensitive).
    ///
    /// When nothing matches exactly, the error names the closest catalog meal.
    pub fn add_by_name(&mut self, name: &str) -> Result<()> {
        match self.find_meal(name) {
            Some(meal) => {
                let meal = meal.clone();
                self.add(meal)
            }
            None => {
                let hint = match self.suggest(name).first() {
                    Some(best) => format!("{} (did you mean '{}'?)", name, best.name),
                    None => name.to_string(),
                };
                Err(PlannerError::MealNotFound(hint))
            }
        }
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Meal> {
        self.tracker.remove_at(position)
    }

    /// Empty the plan. Caps, catalog and filter are kept.
    pub fn reset(&mut self) {
        info!("plan reset");
        self.tracker.clear();
    }

    // ── Lookup ─────────────────────────────────────────────────────────────

    /// First catalog meal with a case-insensitive name match.
    pub fn find_meal(&self, name: &str) -> Option<&Meal> {
        self.catalog.iter().find(|m| m.name_matches(name))
    }

    /// Catalog meals fuzzily matching `query`, best first, duplicates by name removed.
    pub fn suggest(&self, query: &str) -> Vec<&Meal> {
        let query = query.trim().to_lowercase();
        let mut seen = BTreeSet::new();
        let mut candidates: Vec<(&Meal, f64)> = self
            .catalog
            .iter()
            .filter(|m| seen.insert(m.name.to_lowercase()))
            .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().map(|(m, _)| m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_catalog() -> Vec<Meal> {
        vec![
            Meal::new("Oats", "Breakfast", 15.0, 55.0, 8.0),
            Meal::new("Tuna Salad", "Lunch", 35.0, 8.0, 12.0),
            Meal::new("Steak", "Dinner", 60.0, 0.0, 30.0),
            Meal::new("Shake", "Snack", 25.0, 5.0, 2.0),
        ]
    }

    fn session() -> PlannerSession {
        PlannerSession::new(sample_catalog(), MacroCaps::new(100.0, 100.0, 40.0).unwrap())
    }

    #[test]
    fn test_meal_types_sorted_unique() {
        let mut catalog = sample_catalog();
        catalog.push(Meal::new("Toast", "Breakfast", 5.0, 20.0, 2.0));
        catalog.push(Meal::new("Untyped", "", 1.0, 1.0, 1.0));
        let session = PlannerSession::new(catalog, MacroCaps::new(1.0, 1.0, 1.0).unwrap());
        assert_eq!(
            session.meal_types(),
            vec!["Breakfast", "Dinner", "Lunch", "Snack"]
        );
    }

    #[test]
    fn test_available_meals_applies_type_then_budget() {
        let mut session = session();
        session.set_type_filter(["Lunch", "Dinner"]);
        let names: Vec<&str> = session
            .available_meals()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Tuna Salad", "Steak"]);

        session.add_by_name("steak").unwrap();
        let names: Vec<&str> = session
            .available_meals()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        // Fat remaining is 10, tuna needs 12.
        assert!(names.is_empty());

        session.clear_type_filter();
        let names: Vec<&str> = session
            .available_meals()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Oats", "Shake"]);
    }

    #[test]
    fn test_empty_type_filter_means_all() {
        let mut session = session();
        session.set_type_filter(Vec::<String>::new());
        assert!(session.type_filter().is_none());
        assert_eq!(session.visible_meals().count(), 4);
    }

    #[test]
    fn test_add_by_name_rejects_over_cap() {
        let mut session = session();
        session.add_by_name("Steak").unwrap();
        let err = session.add_by_name("Steak").unwrap_err();
        assert!(matches!(err, PlannerError::CapViolation { .. }));
        assert_eq!(session.selection().len(), 1);
    }

    #[test]
    fn test_add_by_name_suggests_close_match() {
        let mut session = session();
        match session.add_by_name("tuna salat") {
            Err(PlannerError::MealNotFound(msg)) => assert!(msg.contains("Tuna Salad")),
            other => panic!("expected MealNotFound, got {:?}", other.err()),
        }
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_reset_keeps_caps_and_catalog() {
        let mut session = session();
        session.add_by_name("Oats").unwrap();
        session.reset();
        assert!(session.selection().is_empty());
        assert_eq!(session.catalog().len(), 4);
        assert_eq!(session.caps().as_macros(), &Macros::new(100.0, 100.0, 40.0));
    }

    #[test]
    fn test_reload_clears_selection() {
        let mut session = session();
        session.add_by_name("Oats").unwrap();
        session.set_type_filter(["Breakfast"]);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Meal name,Meal type,Protein,Carb,Fat\nEggs,Breakfast,12,1,10\n")
            .unwrap();
        session.reload_from_path(file.path()).unwrap();

        assert_eq!(session.catalog().len(), 1);
        assert!(session.selection().is_empty());
        assert!(session.type_filter().is_none());
    }

    #[test]
    fn test_failed_reload_keeps_prior_state() {
        let mut session = session();
        session.add_by_name("Oats").unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Dish,Kcal\nEggs,150\n").unwrap();
        let err = session.reload_from_path(file.path()).unwrap_err();

        assert!(matches!(err, PlannerError::MalformedCatalog { .. }));
        assert_eq!(session.catalog().len(), 4);
        assert_eq!(session.selection().len(), 1);
    }
}
