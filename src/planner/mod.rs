pub mod budget;
pub mod constants;
pub mod selection;

pub use budget::BudgetTracker;
pub use constants::*;
pub use selection::SelectionStore;
