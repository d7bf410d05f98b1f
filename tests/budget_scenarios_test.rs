#[macro_use]
extern crate assert_float_eq;

use macro_meal_planner_rs::models::{Macro, MacroCaps, Macros, Meal};
use macro_meal_planner_rs::planner::BudgetTracker;
use macro_meal_planner_rs::state::{load_catalog_from_reader, to_table};
use macro_meal_planner_rs::PlannerError;

fn meal(name: &str, p: f64, c: f64, f: f64) -> Meal {
    Meal::new(name, "Any", p, c, f)
}

fn tracker_50() -> BudgetTracker {
    BudgetTracker::new(MacroCaps::new(50.0, 50.0, 50.0).unwrap())
}

#[test]
fn test_scenario_a_inclusive_boundary() {
    let mut tracker = tracker_50();
    tracker.add(meal("X", 20.0, 10.0, 5.0)).unwrap();

    assert_eq!(tracker.remaining(), Macros::new(30.0, 40.0, 45.0));
    assert!(!tracker.is_admissible(&meal("Y", 35.0, 0.0, 0.0)));
    assert!(tracker.is_admissible(&meal("Z", 30.0, 0.0, 0.0)));
}

#[test]
fn test_scenario_b_blank_protein_is_zero() {
    let csv = "Meal name,Meal type,Protein,Carb,Fat\nPlain Rice,Side,,45,1\n";
    let meals = load_catalog_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(meals[0].protein, 0.0);
    assert_eq!(meals[0].carb, 45.0);
}

#[test]
fn test_scenario_c_duplicates_then_remove_first() {
    let original = meal("Shake", 25.0, 5.0, 2.0);
    let mut tracker = BudgetTracker::new(MacroCaps::new(100.0, 100.0, 100.0).unwrap());

    tracker.add(original.clone()).unwrap();
    let single = tracker.totals();
    tracker.add(original.clone()).unwrap();
    assert_eq!(tracker.totals(), single + single);

    tracker.remove_at(0).unwrap();
    assert_eq!(tracker.selection().entries(), &[original]);
}

#[test]
fn test_export_scenario() {
    let mut tracker = tracker_50();
    tracker.add(meal("X", 20.0, 10.0, 5.0)).unwrap();
    tracker.add(meal("Z", 30.0, 0.0, 0.0)).unwrap();

    let table = to_table(tracker.selection()).unwrap();
    let mut rdr = csv::Reader::from_reader(table.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

    assert_eq!(rows.len(), 3);
    let data_rows = &rows[..2];
    assert_eq!(&data_rows[0][0], "X");
    assert_eq!(&data_rows[1][0], "Z");

    let totals = &rows[2];
    assert_eq!(&totals[0], "TOTALS");
    assert_eq!(totals[2].parse::<f64>().unwrap(), 50.0);
    assert_eq!(totals[3].parse::<f64>().unwrap(), 10.0);
    assert_eq!(totals[4].parse::<f64>().unwrap(), 5.0);
}

#[test]
fn test_totals_match_sum_after_mixed_operations() {
    let catalog = [
        meal("A", 0.1, 1.5, 2.25),
        meal("B", 0.2, 3.0, 0.75),
        meal("C", 7.0, 0.0, 1.0),
    ];
    let mut tracker = BudgetTracker::new(MacroCaps::new(1000.0, 1000.0, 1000.0).unwrap());

    let ops: [(bool, usize); 8] = [
        (true, 0),
        (true, 1),
        (true, 2),
        (false, 1),
        (true, 1),
        (true, 0),
        (false, 0),
        (true, 2),
    ];
    for (is_add, idx) in ops {
        if is_add {
            tracker.add(catalog[idx].clone()).unwrap();
        } else {
            tracker.remove_at(idx).unwrap();
        }

        let expected: Macros = tracker.selection().iter().map(Meal::macros).sum();
        let totals = tracker.totals();
        for kind in Macro::ALL {
            assert_float_absolute_eq!(totals.get(kind), expected.get(kind), 1e-9);
            assert_float_absolute_eq!(
                tracker.remaining().get(kind),
                tracker.caps().get(kind) - totals.get(kind),
                1e-9
            );
        }
    }
}

#[test]
fn test_remaining_goes_negative_after_cap_reduction() {
    let mut tracker = tracker_50();
    tracker.add(meal("X", 20.0, 10.0, 5.0)).unwrap();
    tracker.set_caps(MacroCaps::new(10.0, 50.0, 50.0).unwrap());

    assert_eq!(tracker.remaining().protein, -10.0);
    assert_eq!(tracker.selection().len(), 1);
}

#[test]
fn test_filter_membership_matches_predicate() {
    let mut tracker = tracker_50();
    tracker.add(meal("X", 20.0, 10.0, 5.0)).unwrap();

    let catalog = vec![
        meal("Exact", 30.0, 40.0, 45.0),
        meal("Over carb", 1.0, 40.5, 0.0),
        meal("Small", 1.0, 1.0, 1.0),
        meal("Over fat", 0.0, 0.0, 45.1),
    ];

    let filtered: Vec<&Meal> = tracker.filter_admissible(&catalog).collect();
    for m in &catalog {
        assert_eq!(filtered.contains(&m), tracker.is_admissible(m), "{}", m.name);
    }
    let names: Vec<&str> = filtered.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Exact", "Small"]);

    let again: Vec<&Meal> = tracker.filter_admissible(&catalog).collect();
    assert_eq!(filtered, again);
}

#[test]
fn test_out_of_range_removal_leaves_selection() {
    let mut tracker = tracker_50();
    assert!(matches!(
        tracker.remove_at(0),
        Err(PlannerError::OutOfRange { .. })
    ));

    tracker.add(meal("X", 1.0, 1.0, 1.0)).unwrap();
    let before = tracker.selection().entries().to_vec();
    assert!(matches!(
        tracker.remove_at(5),
        Err(PlannerError::OutOfRange { position: 5, len: 1 })
    ));
    assert_eq!(tracker.selection().entries(), before.as_slice());
}
