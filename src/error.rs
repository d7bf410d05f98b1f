use thiserror::Error;

use crate::models::Macro;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Malformed catalog: missing required column(s): {}", .missing.join(", "))]
    MalformedCatalog { missing: Vec<String> },

    #[error("Position {position} is out of range for a plan with {len} entries")]
    OutOfRange { position: usize, len: usize },

    #[error(
        "'{meal}' does not fit: {macro_kind} {amount:.1} g exceeds remaining {remaining:.1} g"
    )]
    CapViolation {
        meal: String,
        macro_kind: Macro,
        amount: f64,
        remaining: f64,
    },

    #[error("Invalid {macro_kind} cap: {value} (caps must be finite and non-negative)")]
    InvalidCap { macro_kind: Macro, value: f64 },

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
