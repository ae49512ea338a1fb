//! Tests for the correction merges and the dimension split.

use survey_clean::{
    apply_final_names, apply_match_corrections, build_college_dimension, names_locations,
};
use survey_ingest::CsvTable;
use survey_model::{FinalNameCorrection, MatchCorrection, NameMatch};

fn record_table(rows: Vec<(&str, &str, &str, &str)>) -> CsvTable {
    let mut table = CsvTable::new(
        ["index", "name", "location", "college_type"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    );
    for (index, name, location, college_type) in rows {
        table.push_row(vec![
            index.to_string(),
            name.to_string(),
            location.to_string(),
            college_type.to_string(),
        ]);
    }
    table
}

fn name_match(index: usize, name: &str, matched: &str, score: f64) -> NameMatch {
    NameMatch {
        index,
        name: name.to_string(),
        location: None,
        matched: matched.to_string(),
        score,
    }
}

#[test]
fn revised_value_beats_match_candidate() {
    let table = record_table(vec![
        ("0", "DLSU Manila", "NCR", "local"),
        ("1", "UP Dilimann", "NCR", "local"),
    ]);
    let matches = vec![
        name_match(0, "DLSU Manila", "DLSU Manila", 0.0),
        name_match(1, "UP Dilimann", "UP Diliman", 0.93),
    ];
    let corrections = vec![MatchCorrection {
        index: 0,
        matched: "DLSU Manila".to_string(),
        name_revised: Some("De La Salle University".to_string()),
        location_revised: Some("NCR".to_string()),
    }];

    let merged = apply_match_corrections(&table, &matches, &corrections).expect("merge");
    // Reviewer override wins over the rejected candidate.
    assert_eq!(merged.cell(0, "name"), Some("De La Salle University"));
    // No correction row: this run's computed match stands.
    assert_eq!(merged.cell(1, "name"), Some("UP Diliman"));
    assert_eq!(merged.cell(1, "location"), Some("NCR"));
}

#[test]
fn duplicate_correction_index_is_rejected() {
    let table = record_table(vec![("0", "X", "NCR", "local")]);
    let matches = vec![name_match(0, "X", "X", 0.0)];
    let corrections = vec![
        MatchCorrection {
            index: 0,
            matched: "X".to_string(),
            name_revised: None,
            location_revised: None,
        },
        MatchCorrection {
            index: 0,
            matched: "Y".to_string(),
            name_revised: None,
            location_revised: None,
        },
    ];

    assert!(apply_match_corrections(&table, &matches, &corrections).is_err());
}

#[test]
fn names_locations_are_distinct_and_sorted() {
    let table = record_table(vec![
        ("0", "UST", "NCR", "local"),
        ("1", "Ateneo de Manila University", "NCR", "local"),
        ("2", "UST", "NCR", "local"),
    ]);

    let pairs = names_locations(&table).expect("pairs");
    assert_eq!(
        pairs,
        vec![
            ("Ateneo de Manila University".to_string(), "NCR".to_string()),
            ("UST".to_string(), "NCR".to_string()),
        ]
    );
}

#[test]
fn final_names_rewrite_and_strip_location_boilerplate() {
    let table = record_table(vec![
        ("0", "UST", "Campus is located in NCR", "local"),
        ("1", "Ateneo de Manila University", "NCR", "local"),
    ]);
    let corrections = vec![FinalNameCorrection {
        name: "UST".to_string(),
        final_name: "University of Santo Tomas".to_string(),
    }];
    let prefixes = vec!["Campus is located in ".to_string()];

    let (cleaned, changed) = apply_final_names(&table, &corrections, &prefixes).expect("apply");
    assert_eq!(cleaned.cell(0, "name"), Some("University of Santo Tomas"));
    assert_eq!(cleaned.cell(0, "location"), Some("NCR"));
    assert_eq!(cleaned.cell(1, "name"), Some("Ateneo de Manila University"));
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].orig_name, "UST");
    assert_eq!(changed[0].name, "University of Santo Tomas");
}

#[test]
fn dimension_split_drops_projected_columns() {
    let table = record_table(vec![
        ("0", "UST", "NCR", "local"),
        ("1", "UST", "NCR", "local"),
        ("2", "NUS", "Singapore", "international"),
    ]);

    let split = build_college_dimension(&table).expect("split");
    assert_eq!(split.colleges.len(), 2);
    assert_eq!(split.colleges[0].name, "UST");
    assert_eq!(split.fact.headers, vec!["index", "name"]);
    assert_eq!(split.fact.row_count(), 3);
}

#[test]
fn contradictory_college_rows_halt_the_run() {
    let table = record_table(vec![
        ("0", "Xavier School", "NCR", "local"),
        ("1", "Xavier School", "Luzon", "local"),
    ]);

    let error = build_college_dimension(&table).expect_err("conflict must halt");
    assert!(error.to_string().contains("Xavier School"));
}
