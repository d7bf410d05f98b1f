use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::models::Meal;
use crate::planner::constants::{
    CARB_ALIASES, COL_CARB, COL_FAT, COL_NAME, COL_PROTEIN, COL_TYPE, FAT_ALIASES,
    NAME_ALIASES, PROTEIN_ALIASES, TYPE_ALIASES,
};

/// Catalog shipped with the binary, used when no file is supplied.
const BUNDLED_CATALOG: &str = include_str!("../../data/Macro_Meals.csv");

/// Parse a macro cell, defaulting to 0.
///
/// Blank, non-numeric, negative, NaN and infinite values all become 0.
pub fn parse_macro_or_zero(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Column positions of the five semantic fields.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    name: usize,
    meal_type: usize,
    protein: usize,
    carb: usize,
    fat: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };

        let name = find(NAME_ALIASES);
        let meal_type = find(TYPE_ALIASES);
        let protein = find(PROTEIN_ALIASES);
        let carb = find(CARB_ALIASES);
        let fat = find(FAT_ALIASES);

        match (name, meal_type, protein, carb, fat) {
            (Some(name), Some(meal_type), Some(protein), Some(carb), Some(fat)) => Ok(Self {
                name,
                meal_type,
                protein,
                carb,
                fat,
            }),
            _ => {
                let missing = [
                    (name, COL_NAME),
                    (meal_type, COL_TYPE),
                    (protein, COL_PROTEIN),
                    (carb, COL_CARB),
                    (fat, COL_FAT),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, col)| col.to_string())
                .collect();
                Err(PlannerError::MalformedCatalog { missing })
            }
        }
    }
}

/// Parse a delimited catalog into meals, keeping source row order.
///
/// Extra columns are ignored. Fails only when a required column is absent.
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<Vec<Meal>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;

    let mut meals = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;

        let name = record.get(columns.name).unwrap_or("").trim();
        if name.is_empty() {
            warn!(row = row + 1, "skipping catalog row with blank meal name");
            continue;
        }

        let cell = |idx: usize| parse_macro_or_zero(record.get(idx));

        let protein = cell(columns.protein);
        let carb = cell(columns.carb);
        let fat = cell(columns.fat);
        let meal_type = record.get(columns.meal_type).unwrap_or("").trim();

        meals.push(Meal::new(name, meal_type, protein, carb, fat));
    }

    info!(meals = meals.len(), "catalog loaded");
    Ok(meals)
}

/// Load a catalog from a CSV file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Meal>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading catalog");
    let file = File::open(path)?;
    load_catalog_from_reader(file)
}

/// The catalog embedded in the binary.
pub fn bundled_catalog() -> Result<Vec<Meal>> {
    load_catalog_from_reader(BUNDLED_CATALOG.as_bytes())
}
