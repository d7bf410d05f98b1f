pub mod catalog;
pub mod export;
mod session;

pub use catalog::{bundled_catalog, load_catalog, load_catalog_from_reader, parse_macro_or_zero};
pub use export::{to_json, to_table, write_plan, write_plan_json};
pub use session::PlannerSession;
