use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{Macro, MacroCaps, Macros, Meal};
use crate::planner::selection::SelectionStore;

/// Holds the caps and the current selection; sole authority on admissibility.
///
/// Remaining budget is derived from the live selection on every query.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    caps: MacroCaps,
    selection: SelectionStore,
}

impl BudgetTracker {
    pub fn new(caps: MacroCaps) -> Self {
        Self {
            caps,
            selection: SelectionStore::new(),
        }
    }

    /// Replace the caps. Already-selected meals are kept even if they now
    /// exceed the new caps.
    pub fn set_caps(&mut self, caps: MacroCaps) {
        let totals = self.selection.totals();
        if let Some(kind) = totals.first_exceeding(caps.as_macros()) {
            warn!(
                %kind,
                total = totals.get(kind),
                cap = caps.get(kind),
                "caps lowered below current totals; selection kept"
            );
        }
        info!(
            protein = caps.get(Macro::Protein),
            carb = caps.get(Macro::Carb),
            fat = caps.get(Macro::Fat),
            "caps updated"
        );
        self.caps = caps;
    }

    pub fn caps(&self) -> &MacroCaps {
        &self.caps
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn totals(&self) -> Macros {
        self.selection.totals()
    }

    /// `caps - totals` per macro. Negative after a cap reduction.
    pub fn remaining(&self) -> Macros {
        *self.caps.as_macros() - self.selection.totals()
    }

    /// True iff every macro of `meal` is `<=` the remaining budget.
    ///
    /// The boundary is inclusive: a meal that brings a macro to exactly zero
    /// remaining is admissible.
    pub fn is_admissible(&self, meal: &Meal) -> bool {
        meal.macros().fits_within(&self.remaining())
    }

    /// Lazily yield the admissible meals in input order.
    ///
    /// The remaining budget is captured when this is called; call again after
    /// any change to caps or selection.
    pub fn filter_admissible<'m, I>(&self, meals: I) -> impl Iterator<Item = &'m Meal> + use<'m, I>
    where
        I: IntoIterator<Item = &'m Meal>,
    {
        let remaining = self.remaining();
        meals
            .into_iter()
            .filter(move |meal| meal.macros().fits_within(&remaining))
    }

    /// Append a meal after re-checking admissibility against live totals.
    pub fn add(&mut self, meal: Meal) -> Result<()> {
        let remaining = self.remaining();
        if let Some(kind) = meal.macros().first_exceeding(&remaining) {
            warn!(meal = %meal.name, %kind, "rejected meal over cap");
            let amount = meal.macros().get(kind);
            return Err(PlannerError::CapViolation {
                meal: meal.name,
                macro_kind: kind,
                amount,
                remaining: remaining.get(kind),
            });
        }

        debug!(meal = %meal.debug_string(), "adding meal");
        self.selection.add(meal);
        Ok(())
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Meal> {
        let removed = self.selection.remove_at(position)?;
        debug!(position, meal = %removed.name, "removed meal");
        Ok(removed)
    }

    /// Empty the selection; caps are untouched.
    pub fn clear(&mut self) {
        self.selection.clear();
    }
}
