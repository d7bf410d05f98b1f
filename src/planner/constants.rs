/// Default daily protein cap in grams.
pub const DEFAULT_PROTEIN_CAP: f64 = 190.0;

/// Default daily carb cap in grams.
pub const DEFAULT_CARB_CAP: f64 = 253.0;

/// Default daily fat cap in grams.
pub const DEFAULT_FAT_CAP: f64 = 57.0;

// ─────────────────────────────────────────────────────────────────────────────
// Tabular column contract
// ─────────────────────────────────────────────────────────────────────────────

pub const COL_NAME: &str = "Meal name";
pub const COL_TYPE: &str = "Meal type";
pub const COL_PROTEIN: &str = "Protein";
pub const COL_CARB: &str = "Carb";
pub const COL_FAT: &str = "Fat";
pub const COL_COUNT: &str = "Count";

/// Accepted header spellings per semantic field, compared after trim + lowercase.
pub const NAME_ALIASES: &[&str] = &["meal name", "name", "meal"];
pub const TYPE_ALIASES: &[&str] = &["meal type", "type", "category"];
pub const PROTEIN_ALIASES: &[&str] = &["protein"];
pub const CARB_ALIASES: &[&str] = &["carb", "carbs", "carbohydrates"];
pub const FAT_ALIASES: &[&str] = &["fat", "fats"];

/// Name cell of the summary row appended to an exported plan.
pub const TOTALS_LABEL: &str = "TOTALS";

/// Suggested filename for an exported plan.
pub const DEFAULT_EXPORT_FILE: &str = "meal_plan.csv";

/// Minimum Jaro-Winkler similarity for a fuzzy meal-name suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
