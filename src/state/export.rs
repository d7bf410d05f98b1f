use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::{Macros, Meal};
use crate::planner::constants::{
    COL_CARB, COL_COUNT, COL_FAT, COL_NAME, COL_PROTEIN, COL_TYPE, TOTALS_LABEL,
};
use crate::planner::SelectionStore;

/// Render the selection as CSV: one row per entry plus a trailing totals row.
///
/// The first five columns match the catalog loader's expected shape, so an
/// exported plan reads back as a catalog (with the totals row as one more meal).
pub fn to_table(selection: &SelectionStore) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record([COL_NAME, COL_TYPE, COL_PROTEIN, COL_CARB, COL_FAT, COL_COUNT])?;

        for meal in selection {
            wtr.write_record([
                meal.name.clone(),
                meal.meal_type.clone(),
                meal.protein.to_string(),
                meal.carb.to_string(),
                meal.fat.to_string(),
                "1".to_string(),
            ])?;
        }

        let totals = selection.totals();
        wtr.write_record([
            TOTALS_LABEL.to_string(),
            String::new(),
            totals.protein.to_string(),
            totals.carb.to_string(),
            totals.fat.to_string(),
            selection.len().to_string(),
        ])?;
        wtr.flush()?;
    }

    String::from_utf8(buf).map_err(|e| PlannerError::InvalidInput(e.to_string()))
}

/// Write the CSV rendition of the selection to a file.
pub fn write_plan<P: AsRef<Path>>(path: P, selection: &SelectionStore) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_table(selection)?)?;
    info!(path = %path.display(), entries = selection.len(), "plan exported");
    Ok(())
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    meals: &'a [Meal],
    totals: Macros,
    count: usize,
}

/// Render the selection as pretty-printed JSON with totals and entry count.
pub fn to_json(selection: &SelectionStore) -> Result<String> {
    let doc = PlanDocument {
        meals: selection.entries(),
        totals: selection.totals(),
        count: selection.len(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Write the JSON rendition of the selection to a file.
pub fn write_plan_json<P: AsRef<Path>>(path: P, selection: &SelectionStore) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(selection)?)?;
    info!(path = %path.display(), entries = selection.len(), "plan exported as JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::load_catalog_from_reader;

    fn sample_selection() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.add(Meal::new("X", "Lunch", 20.0, 10.0, 5.0));
        store.add(Meal::new("Z", "Dinner", 30.0, 0.0, 0.0));
        store
    }

    #[test]
    fn test_table_has_rows_and_totals() {
        let table = to_table(&sample_selection()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Meal name,Meal type,Protein,Carb,Fat,Count",
                "X,Lunch,20,10,5,1",
                "Z,Dinner,30,0,0,1",
                "TOTALS,,50,10,5,2",
            ]
        );
    }

    #[test]
    fn test_empty_selection_exports_zero_totals() {
        let table = to_table(&SelectionStore::new()).unwrap();
        assert_eq!(table.lines().last(), Some("TOTALS,,0,0,0,0"));
    }

    #[test]
    fn test_exported_table_reads_back_as_catalog() {
        let table = to_table(&sample_selection()).unwrap();
        let meals = load_catalog_from_reader(table.as_bytes()).unwrap();
        assert_eq!(meals.len(), 3);
        assert_eq!(meals[0], Meal::new("X", "Lunch", 20.0, 10.0, 5.0));
        assert_eq!(meals[2].name, TOTALS_LABEL);
        assert_eq!(meals[2].macros(), Macros::new(50.0, 10.0, 5.0));
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let mut store = SelectionStore::new();
        store.add(Meal::new("Rice, beans", "Lunch", 10.0, 40.0, 2.0));
        let table = to_table(&store).unwrap();
        assert!(table.contains("\"Rice, beans\",Lunch,10,40,2,1"));
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&sample_selection()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["totals"]["protein"], 50.0);
        assert_eq!(value["meals"][1]["name"], "Z");
        assert_eq!(value["meals"][1]["type"], "Dinner");
    }
}
