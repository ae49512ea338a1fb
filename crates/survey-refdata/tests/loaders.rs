//! Tests for the curated reference table loaders.

use std::fs;
use std::path::Path;

use survey_model::{CollegeType, InfoType};
use survey_refdata::{
    RefDataError, load_canonical_names, load_column_group_map, load_final_name_corrections,
    load_match_corrections, load_other_categories, load_validated_option_sets,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const DICTIONARY: &str = "\
orig_col_name,new_col_name,col_group
Respondent,respondent_code,
Q1,loc_1_name,loc_1
Q2,loc_1_location,loc_1
Q3,loc_1_interests,loc_1
Q4,loc_1_characteristics,loc_1
Q5,int_1_name,int_1
Q6,int_1_location,int_1
Q7,int_1_interests,int_1
Q8,int_1_characteristics,int_1
";

#[test]
fn dictionary_builds_groups_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "data_dictionary.csv", DICTIONARY);

    let map = load_column_group_map(&path).expect("load dictionary");
    assert_eq!(map.column_names.len(), 9);
    assert_eq!(map.groups.len(), 2);
    assert_eq!(map.groups[0].id, "loc_1");
    assert_eq!(map.groups[0].college_type, CollegeType::Local);
    assert_eq!(map.groups[1].id, "int_1");
    assert_eq!(map.groups[1].college_type, CollegeType::International);
    assert_eq!(map.groups[0].column_for("interests"), Some("loc_1_interests"));
}

#[test]
fn dictionary_rejects_short_column_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "bad_dict.csv",
        "new_col_name,col_group\nrespondent_code,\nloc_name,loc_1\n",
    );

    let error = load_column_group_map(&path).expect_err("short name must fail");
    assert!(matches!(error, RefDataError::Dictionary { .. }));
}

#[test]
fn dictionary_rejects_unknown_group_tag() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "bad_tag.csv",
        "new_col_name,col_group\nrespondent_code,\nabr_1_name,abr_1\n",
    );

    let error = load_column_group_map(&path).expect_err("unknown tag must fail");
    assert!(error.to_string().contains("abr_1"));
}

#[test]
fn dictionary_rejects_incomplete_group() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "partial.csv",
        "new_col_name,col_group\nrespondent_code,\nloc_1_name,loc_1\nloc_1_location,loc_1\n",
    );

    let error = load_column_group_map(&path).expect_err("incomplete group must fail");
    assert!(error.to_string().contains("loc_1"));
}

const OPTIONS: &str = "\
info_type,option,shortcut,unique_starting_substring
interests,STEM-oriented,stem,STEM
interests,ABM-oriented,abm,ABM
interests,Arts and Design-oriented,arts,Arts
characteristics,Prestigious,prestigious,Pres
location,NCR,ncr,NCR
location,Luzon,luzon,Lu
";

#[test]
fn options_load_and_preserve_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "options.csv", OPTIONS);

    let sets = load_validated_option_sets(&path).expect("load options");
    let interests = sets.get(&InfoType::Interests).expect("interests set");
    let labels: Vec<&str> = interests.labels().collect();
    assert_eq!(
        labels,
        vec!["STEM-oriented", "ABM-oriented", "Arts and Design-oriented"]
    );
    assert_eq!(sets.get(&InfoType::Location).expect("location set").len(), 2);
}

#[test]
fn options_with_ambiguous_uss_fail_validation() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "ambiguous.csv",
        "info_type,option,shortcut,unique_starting_substring\n\
         interests,Science track,sci,S\n\
         interests,Sports track,sports,S\n",
    );

    let error = load_validated_option_sets(&path).expect_err("ambiguous USS must fail");
    assert!(matches!(error, RefDataError::OptionInvariant { .. }));
}

#[test]
fn categories_keep_only_other_rows() {
    let dir = TempDir::new().expect("temp dir");
    let options_path = write(
        dir.path(),
        "options_with_others.csv",
        "option,shortcut,is_other\n\
         Prestigious,prestigious,false\n\
         Affordable tuition,affordable,true\n\
         Family ties,family,true\n",
    );
    let answers_path = write(
        dir.path(),
        "answers.csv",
        "orig_text,category\n\
         Cheap,Affordable tuition\n\
         My parents studied there,Family ties\n\
         Scholarship offered,Affordable tuition\n",
    );

    let map = load_other_categories(&options_path, &answers_path).expect("load categories");
    assert_eq!(map.categories.len(), 2);
    assert!(map.contains("Affordable tuition", "Cheap"));
    assert!(map.contains("Affordable tuition", "Scholarship offered"));
    assert!(!map.contains("Family ties", "Cheap"));
}

#[test]
fn canonical_names_use_first_column() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "common_names.csv",
        "name\nDe La Salle University\nAteneo de Manila University\n\nXavier School\n",
    );

    let names = load_canonical_names(&path).expect("load names");
    assert_eq!(
        names,
        vec![
            "De La Salle University",
            "Ateneo de Manila University",
            "Xavier School"
        ]
    );
}

#[test]
fn match_corrections_parse_optional_revisions() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "match_revised.csv",
        "index,name,location,score,match,name_revised,location_revised\n\
         4,DLSU Manila,NCR,0.62,DLSU Manila,De La Salle University,\n\
         0,UP Diliman,NCR,0.91,University of the Philippines Diliman,,\n",
    );

    let corrections = load_match_corrections(&path).expect("load corrections");
    assert_eq!(corrections.len(), 2);
    assert_eq!(corrections[0].index, 4);
    assert_eq!(
        corrections[0].name_revised.as_deref(),
        Some("De La Salle University")
    );
    assert_eq!(corrections[1].name_revised, None);
    assert_eq!(
        corrections[1].matched,
        "University of the Philippines Diliman"
    );
}

#[test]
fn final_name_corrections_skip_rows_without_final_name() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "names_locations_revised.csv",
        "name_choice,location_choice,final_name\n\
         UP Diliman,NCR,University of the Philippines Diliman\n\
         Ateneo de Manila University,NCR,\n",
    );

    let corrections = load_final_name_corrections(&path).expect("load final names");
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].name, "UP Diliman");
    assert_eq!(
        corrections[0].final_name,
        "University of the Philippines Diliman"
    );
}
