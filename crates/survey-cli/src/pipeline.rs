//! Pipeline stages with explicit spans and timing.
//!
//! The stages run in order, each consuming the previous stage's table:
//! 1. **Ingest**: read the wide survey export, apply dictionary renames
//! 2. **Melt**: one record per (respondent, college slot)
//! 3. **Expand**: multi-select text to boolean flags plus leftovers
//! 4. **Categorize**: curated category flags for leftover answers
//! 5. **Match**: fuzzy-match names against the canonical list
//! 6. **Merge**: fold the reviewed corrections back in (two rounds)
//! 7. **Split**: college dimension out, projected columns dropped
//!
//! Stages 6 and 7 only run once their curated correction files exist.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use survey_clean::{
    ChangedName, CollegeSplit, Expansion, SequenceMode, apply_final_names,
    apply_match_corrections, apply_other_categories, build_college_dimension, column_is_empty,
    expand_records, match_names, melt_survey,
};
use survey_ingest::{CsvTable, read_survey_export};
use survey_model::{ApplicationRecord, InfoType, NameMatch};
use survey_refdata::{
    RefData, RunConfig, load_final_name_corrections, load_match_corrections,
};

/// Read the wide export and rename its columns from the dictionary.
pub fn ingest_survey(folder: &Path, config: &RunConfig, refdata: &RefData) -> Result<CsvTable> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();
    let path = config.survey_path(folder);
    let survey = read_survey_export(&path, &refdata.column_map)?;
    info!(
        source_file = %path.display(),
        respondent_count = survey.row_count(),
        column_count = survey.headers.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(survey)
}

/// Melt the wide export into application records.
pub fn melt(survey: &CsvTable, refdata: &RefData) -> Result<Vec<ApplicationRecord>> {
    let span = info_span!("melt");
    let _guard = span.enter();
    let start = Instant::now();
    let records = melt_survey(survey, &refdata.column_map).context("melt survey")?;
    let slot_count = survey.row_count() * refdata.column_map.group_count();
    info!(
        respondent_count = survey.row_count(),
        slot_count,
        record_count = records.len(),
        dropped_blank = slot_count - records.len(),
        duration_ms = start.elapsed().as_millis(),
        "melt complete"
    );
    Ok(records)
}

/// Expand multi-select answers into the boolean-flag table.
pub fn expand(
    records: &[ApplicationRecord],
    refdata: &RefData,
    mode: SequenceMode,
) -> Result<Expansion> {
    let span = info_span!("expand");
    let _guard = span.enter();
    let start = Instant::now();
    let expansion = expand_records(records, &refdata.option_sets, mode).context("expand records")?;
    info!(
        record_count = expansion.table.row_count(),
        column_count = expansion.table.headers.len(),
        violation_count = expansion.violations.len(),
        duration_ms = start.elapsed().as_millis(),
        "expand complete"
    );
    Ok(expansion)
}

/// Classify leftover answers into curated categories.
///
/// Leftover columns named in the classify config are consumed into
/// category flags; unclassified leftover columns are dropped when empty
/// and kept (with a warning) when they still hold uncurated answers.
pub fn categorize(table: CsvTable, refdata: &RefData, config: &RunConfig) -> Result<CsvTable> {
    let span = info_span!("categorize");
    let _guard = span.enter();
    let start = Instant::now();

    let mut table = table;
    for column in config.classify.keys() {
        table = apply_other_categories(&table, &refdata.categories, column)
            .with_context(|| format!("classify '{column}'"))?;
    }
    for info_type in InfoType::sequence_types() {
        let column = format!("{info_type}_other");
        if config.classify.contains_key(&column) || table.column_index(&column).is_none() {
            continue;
        }
        if column_is_empty(&table, &column)? {
            info!(column = %column, "dropping empty leftover column");
            table = table.drop_columns(&[column.as_str()]);
        } else {
            warn!(column = %column, "leftover column has uncurated answers; keeping it");
        }
    }

    info!(
        record_count = table.row_count(),
        category_count = refdata.categories.categories.len(),
        duration_ms = start.elapsed().as_millis(),
        "categorize complete"
    );
    Ok(table)
}

/// Fuzzy-match every record's college name against the canonical list.
pub fn match_college_names(
    table: &CsvTable,
    refdata: &RefData,
    min_score: f64,
) -> Result<Vec<NameMatch>> {
    let span = info_span!("match");
    let _guard = span.enter();
    let start = Instant::now();
    let matches =
        match_names(table, &refdata.canonical_names, min_score).context("match names")?;
    let needs_review = matches
        .iter()
        .filter(|entry| !entry.is_confident(min_score))
        .count();
    info!(
        record_count = matches.len(),
        canonical_count = refdata.canonical_names.len(),
        needs_review,
        min_score,
        duration_ms = start.elapsed().as_millis(),
        "match complete"
    );
    Ok(matches)
}

/// Merge the reviewed match corrections (round one).
pub fn merge_match_corrections(
    table: &CsvTable,
    matches: &[NameMatch],
    corrections_path: &Path,
) -> Result<CsvTable> {
    let span = info_span!("merge");
    let _guard = span.enter();
    let start = Instant::now();
    let corrections = load_match_corrections(corrections_path)
        .with_context(|| format!("load {}", corrections_path.display()))?;
    let merged = apply_match_corrections(table, matches, &corrections)
        .context("apply match corrections")?;
    info!(
        correction_count = corrections.len(),
        record_count = merged.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "merge complete"
    );
    Ok(merged)
}

/// Apply the final-name corrections (round two) and location cleanup.
pub fn finalize_names(
    table: &CsvTable,
    corrections_path: &Path,
    config: &RunConfig,
) -> Result<(CsvTable, Vec<ChangedName>)> {
    let span = info_span!("finalize");
    let _guard = span.enter();
    let start = Instant::now();
    let corrections = load_final_name_corrections(corrections_path)
        .with_context(|| format!("load {}", corrections_path.display()))?;
    let (cleaned, changed) =
        apply_final_names(table, &corrections, &config.location.strip_prefixes)
            .context("apply final names")?;
    info!(
        correction_count = corrections.len(),
        changed_count = changed.len(),
        duration_ms = start.elapsed().as_millis(),
        "finalize complete"
    );
    Ok((cleaned, changed))
}

/// Split the college dimension out of the cleaned table.
pub fn split_dimension(table: &CsvTable) -> Result<CollegeSplit> {
    let span = info_span!("split");
    let _guard = span.enter();
    let start = Instant::now();
    let split = build_college_dimension(table).context("build college dimension")?;
    info!(
        college_count = split.colleges.len(),
        fact_rows = split.fact.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "split complete"
    );
    Ok(split)
}
