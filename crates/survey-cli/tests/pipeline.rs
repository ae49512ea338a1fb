//! End-to-end pipeline test over a fixture data folder, including both
//! human-in-the-loop correction rounds.

use std::fs;
use std::path::Path;

use survey_cli::cli::RunArgs;
use survey_cli::commands::run_pipeline;
use survey_cli::types::StopReason;
use survey_ingest::read_csv_table;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn write_data_folder(dir: &Path) {
    write(
        dir,
        "survey.csv",
        "Respondent,Q1,Q2,Q3,Q4,Q5,Q6,Q7,Q8\n\
         A,De La Salle Univ.,Campus is located in NCR,\
         \"STEM-oriented, Arts and Design-oriented, Robotics club\",\
         \"Prestigious, Cheap\",,,,\n\
         B,De La Salle University,NCR,,,NUS,Singapore,STEM-oriented,\n",
    );
    write(
        dir,
        "data_dictionary.csv",
        "new_col_name,col_group\n\
         respondent_code,\n\
         loc_1_name,loc_1\n\
         loc_1_location,loc_1\n\
         loc_1_interests,loc_1\n\
         loc_1_characteristics,loc_1\n\
         int_1_name,int_1\n\
         int_1_location,int_1\n\
         int_1_interests,int_1\n\
         int_1_characteristics,int_1\n",
    );
    write(
        dir,
        "options.csv",
        "info_type,option,shortcut,unique_starting_substring\n\
         interests,STEM-oriented,stem,STEM\n\
         interests,ABM-oriented,abm,ABM\n\
         interests,Arts and Design-oriented,arts,Arts\n\
         characteristics,Prestigious,prestigious,Pres\n\
         location,NCR,ncr,NCR\n\
         location,Luzon,luzon,Lu\n",
    );
    write(
        dir,
        "options_with_others.csv",
        "option,shortcut,is_other\n\
         Prestigious,prestigious,false\n\
         Affordable tuition,affordable,true\n",
    );
    write(
        dir,
        "characteristics_other_answers.csv",
        "orig_text,category\nCheap,Affordable tuition\n",
    );
    write(
        dir,
        "common_names.csv",
        "name\n\
         De La Salle University\n\
         National University of Singapore\n\
         Xavier School\n",
    );
}

fn run_args(dir: &Path) -> RunArgs {
    RunArgs {
        data_folder: dir.to_path_buf(),
        output_dir: None,
        min_score: None,
        strict_sequences: false,
        dry_run: false,
    }
}

#[test]
fn pipeline_pauses_for_each_review_round_then_completes() {
    let dir = TempDir::new().expect("temp dir");
    write_data_folder(dir.path());
    let output = dir.path().join("output");

    // Round one: no corrections yet, so the run stops after the
    // name-match review file.
    let result = run_pipeline(&run_args(dir.path())).expect("first run");
    assert!(matches!(
        result.stopped,
        Some(StopReason::AwaitingMatchReview { .. })
    ));
    assert_eq!(result.low_confidence, 1);
    assert_eq!(result.sequence_violations, 0);

    let melted = read_csv_table(&output.join("melted.csv")).expect("melted");
    // Respondent A left the international slot blank.
    assert_eq!(melted.row_count(), 3);

    let expanded = read_csv_table(&output.join("expanded.csv")).expect("expanded");
    assert_eq!(expanded.cell(0, "stem"), Some("true"));
    assert_eq!(expanded.cell(0, "abm"), Some("false"));
    assert_eq!(expanded.cell(0, "arts"), Some("true"));
    assert_eq!(expanded.cell(0, "interests_other"), Some("Robotics club"));
    assert_eq!(expanded.cell(0, "characteristics_other"), Some("Cheap"));

    let categorized = read_csv_table(&output.join("categorized.csv")).expect("categorized");
    assert!(categorized.column_index("characteristics_other").is_none());
    assert_eq!(categorized.cell(0, "affordable"), Some("true"));
    assert_eq!(categorized.cell(1, "affordable"), Some("false"));

    // The review file leads with the row that needs attention.
    let matches = read_csv_table(&output.join("name_matches.csv")).expect("matches");
    assert_eq!(matches.cell(0, "index"), Some("2"));
    assert_eq!(matches.cell(0, "score"), Some("0.0000"));
    assert_eq!(matches.cell(0, "match"), Some("NUS"));

    let leftovers =
        read_csv_table(&output.join("characteristics_other.csv")).expect("leftovers");
    assert_eq!(leftovers.rows, vec![vec!["Cheap".to_string()]]);

    // Curate round one: accept the candidates, fix the NUS abbreviation.
    write(
        dir.path(),
        "match_revised.csv",
        "index,name,location,score,match,name_revised,location_revised\n\
         2,NUS,Singapore,0.0000,NUS,National University of Singapore,\n",
    );

    // Round two: the run now stops after the college review file.
    let result = run_pipeline(&run_args(dir.path())).expect("second run");
    assert!(matches!(
        result.stopped,
        Some(StopReason::AwaitingCollegeReview { .. })
    ));

    let named = read_csv_table(&output.join("named.csv")).expect("named");
    assert_eq!(named.cell(0, "name"), Some("De La Salle University"));
    assert_eq!(named.cell(2, "name"), Some("National University of Singapore"));

    let pairs = read_csv_table(&output.join("names_locations.csv")).expect("pairs");
    assert_eq!(pairs.row_count(), 3);
    assert_eq!(pairs.headers[0], "name_choice");

    // Curate round two: no renames needed.
    write(
        dir.path(),
        "names_locations_revised.csv",
        "name_choice,location_choice,final_name\n",
    );

    // Final run completes and writes the two dashboard tables.
    let result = run_pipeline(&run_args(dir.path())).expect("final run");
    assert!(result.stopped.is_none());

    let colleges = read_csv_table(&output.join("colleges.csv")).expect("colleges");
    assert_eq!(colleges.row_count(), 2);
    assert_eq!(colleges.cell(0, "name"), Some("De La Salle University"));
    // Location boilerplate was stripped before the dimension was built.
    assert_eq!(colleges.cell(0, "location"), Some("NCR"));
    assert_eq!(colleges.cell(0, "college_type"), Some("local"));
    assert_eq!(
        colleges.cell(1, "name"),
        Some("National University of Singapore")
    );
    assert_eq!(colleges.cell(1, "college_type"), Some("international"));

    let fact = read_csv_table(&output.join("main.csv")).expect("fact");
    assert_eq!(
        fact.headers,
        vec![
            "index",
            "name",
            "respondent_code",
            "stem",
            "abm",
            "arts",
            "interests_other",
            "prestigious",
            "affordable"
        ]
    );
    assert_eq!(fact.row_count(), 3);
    assert_eq!(fact.cell(2, "stem"), Some("true"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_data_folder(dir.path());

    let mut args = run_args(dir.path());
    args.dry_run = true;
    let result = run_pipeline(&args).expect("dry run");
    assert!(result.stages.iter().all(|stage| stage.output.is_none()));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn strict_sequences_fail_on_malformed_text() {
    let dir = TempDir::new().expect("temp dir");
    write_data_folder(dir.path());
    // The USS matches but the text diverges from the full label.
    write(
        dir.path(),
        "survey.csv",
        "Respondent,Q1,Q2,Q3,Q4,Q5,Q6,Q7,Q8\n\
         A,UST,NCR,STEM club,,,,,\n",
    );

    let mut args = run_args(dir.path());
    args.strict_sequences = true;
    let error = run_pipeline(&args).expect_err("strict run must fail");
    assert!(format!("{error:#}").contains("malformed multi-select"));
}
