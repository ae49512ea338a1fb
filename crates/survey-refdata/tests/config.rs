//! Tests for run configuration loading.

use std::fs;

use survey_refdata::RunConfig;
use tempfile::TempDir;

#[test]
fn missing_config_falls_back_to_conventions() {
    let dir = TempDir::new().expect("temp dir");

    let config = RunConfig::load(dir.path()).expect("load defaults");
    assert_eq!(config.inputs.survey, "survey.csv");
    assert_eq!(config.matching.min_score, 0.8);
    assert_eq!(
        config.classify.get("characteristics_other").map(String::as_str),
        Some("characteristics_other_answers.csv")
    );
    assert_eq!(
        config.location.strip_prefixes,
        vec!["Campus is located in ".to_string()]
    );
}

#[test]
fn config_file_overrides_selected_fields() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("pipeline.toml"),
        r#"
[inputs]
survey = "survey_data_edited.csv"

[matching]
min_score = 0.85

[classify]
characteristics_other = "char_answers.csv"
interests_other = "interest_answers.csv"
"#,
    )
    .expect("write config");

    let config = RunConfig::load(dir.path()).expect("load config");
    assert_eq!(config.inputs.survey, "survey_data_edited.csv");
    // Unset fields keep their conventional defaults.
    assert_eq!(config.inputs.options, "options.csv");
    assert_eq!(config.matching.min_score, 0.85);
    assert_eq!(config.classify.len(), 2);
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("pipeline.toml"), "[outputs]\ndir = \"x\"\n")
        .expect("write config");

    assert!(RunConfig::load(dir.path()).is_err());
}
