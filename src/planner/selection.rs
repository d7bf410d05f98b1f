use crate::error::{PlannerError, Result};
use crate::models::{Macros, Meal};

/// Ordered list of meals chosen for the current plan.
///
/// Duplicates are allowed and each occupies its own position. The store
/// enforces no caps; admissibility is the [`BudgetTracker`]'s job.
///
/// [`BudgetTracker`]: crate::planner::BudgetTracker
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: Vec<Meal>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a meal at the end.
    pub fn add(&mut self, meal: Meal) {
        self.entries.push(meal);
    }

    /// Remove the entry at a zero-based position, shifting later entries down.
    ///
    /// An invalid position leaves the store untouched.
    pub fn remove_at(&mut self, position: usize) -> Result<Meal> {
        if position >= self.entries.len() {
            return Err(PlannerError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    /// Per-macro sum over every entry, recomputed from the current contents.
    pub fn totals(&self) -> Macros {
        self.entries.iter().map(Meal::macros).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Meal] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Meal> {
        self.entries.iter()
    }

    pub fn get(&self, position: usize) -> Option<&Meal> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SelectionStore {
    type Item = &'a Meal;
    type IntoIter = std::slice::Iter<'a, Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
