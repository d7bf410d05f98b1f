use serde::{Deserialize, Serialize};

use crate::models::Macros;

/// A catalog entry.
///
/// Names are display identifiers only; two meals may share one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,

    #[serde(rename = "type")]
    pub meal_type: String,

    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl Meal {
    pub fn new(
        name: impl Into<String>,
        meal_type: impl Into<String>,
        protein: f64,
        carb: f64,
        fat: f64,
    ) -> Self {
        Self {
            name: name.into(),
            meal_type: meal_type.into(),
            protein,
            carb,
            fat,
        }
    }

    /// The meal's macro values as a triple.
    #[inline]
    pub fn macros(&self) -> Macros {
        Macros::new(self.protein, self.carb, self.fat)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: P:{} C:{} F:{}",
            self.name, self.meal_type, self.protein, self.carb, self.fat
        )
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.trim().to_lowercase() == query.trim().to_lowercase()
    }
}
