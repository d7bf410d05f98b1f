use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Slack allowed when comparing a macro against a limit, absorbing float
/// rounding in sums of decimal gram values.
pub const MACRO_EPSILON: f64 = 1e-9;

/// True when `value` is over `limit` by more than [`MACRO_EPSILON`].
#[inline]
pub fn exceeds(value: f64, limit: f64) -> bool {
    value > limit + MACRO_EPSILON
}

/// One of the three tracked macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Macro {
    Protein,
    Carb,
    Fat,
}

impl Macro {
    /// All macros in display order.
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Carb, Macro::Fat];

    /// Human-readable label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Macro::Protein => "Protein",
            Macro::Carb => "Carbs",
            Macro::Fat => "Fat",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Macro::Protein => "protein",
            Macro::Carb => "carb",
            Macro::Fat => "fat",
        })
    }
}

/// A protein/carb/fat triple in grams.
///
/// Used for a meal's values, selection totals and remaining budget alike.
/// Remaining budget may go negative after a cap reduction, so no sign
/// constraint is enforced here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        protein: 0.0,
        carb: 0.0,
        fat: 0.0,
    };

    pub fn new(protein: f64, carb: f64, fat: f64) -> Self {
        Self { protein, carb, fat }
    }

    /// Value for a single macro.
    #[inline]
    pub fn get(&self, kind: Macro) -> f64 {
        match kind {
            Macro::Protein => self.protein,
            Macro::Carb => self.carb,
            Macro::Fat => self.fat,
        }
    }

    /// First macro (in display order) where `self` exceeds `limit`.
    pub fn first_exceeding(&self, limit: &Macros) -> Option<Macro> {
        Macro::ALL
            .into_iter()
            .find(|&m| exceeds(self.get(m), limit.get(m)))
    }

    /// True when every macro is `<=` the matching macro in `limit`, within
    /// [`MACRO_EPSILON`].
    #[inline]
    pub fn fits_within(&self, limit: &Macros) -> bool {
        self.first_exceeding(limit).is_none()
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein + rhs.protein,
            carb: self.carb + rhs.carb,
            fat: self.fat + rhs.fat,
        }
    }
}

impl Sub for Macros {
    type Output = Macros;

    fn sub(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein - rhs.protein,
            carb: self.carb - rhs.carb,
            fat: self.fat - rhs.fat,
        }
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::ZERO, Add::add)
    }
}

/// Daily upper bounds, one per macro.
///
/// Construction rejects negative, NaN and infinite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroCaps(Macros);

impl MacroCaps {
    pub fn new(protein: f64, carb: f64, fat: f64) -> Result<Self> {
        let caps = Macros::new(protein, carb, fat);
        for kind in Macro::ALL {
            let value = caps.get(kind);
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidCap {
                    macro_kind: kind,
                    value,
                });
            }
        }
        Ok(Self(caps))
    }

    pub fn get(&self, kind: Macro) -> f64 {
        self.0.get(kind)
    }

    pub fn as_macros(&self) -> &Macros {
        &self.0
    }
}
