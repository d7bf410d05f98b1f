mod macros;
mod meal;

pub use macros::{Macro, MacroCaps, Macros, MACRO_EPSILON};
pub use meal::Meal;
