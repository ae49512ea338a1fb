use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use survey_clean::{
    SequenceMode, changed_names_table, colleges_table, distinct_names, distinct_names_table,
    leftover_table, leftover_values, matches_table, melted_table, names_locations,
    names_locations_table, other_counts, other_counts_table, sort_for_review,
};
use survey_ingest::{CsvTable, write_csv_table};
use survey_model::InfoType;
use survey_refdata::{RunConfig, check_reference_data, load_reference_data};

use crate::cli::{FolderArgs, RunArgs};
use crate::pipeline::{
    categorize, expand, finalize_names, ingest_survey, match_college_names,
    merge_match_corrections, melt, split_dimension,
};
use crate::summary::apply_table_style;
use crate::types::{RunResult, StageSummary, StopReason};

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let folder = &args.data_folder;
    let run_span = info_span!("run", data_folder = %folder.display());
    let _run_guard = run_span.enter();

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| folder.join("output"));
    let config = RunConfig::load(folder).context("load run configuration")?;
    let min_score = args.min_score.unwrap_or(config.matching.min_score);
    let mode = if args.strict_sequences {
        SequenceMode::Strict
    } else {
        SequenceMode::Lenient
    };

    let refdata = load_reference_data(folder, &config).context("load reference data")?;
    info!(
        column_groups = refdata.column_map.group_count(),
        option_sets = refdata.option_sets.len(),
        categories = refdata.categories.categories.len(),
        canonical_names = refdata.canonical_names.len(),
        "reference data loaded"
    );

    let mut result = RunResult::new(folder.clone(), output_dir.clone());
    let writer = OutputWriter {
        output_dir: &output_dir,
        dry_run: args.dry_run,
    };

    // Stages 1-2: ingest and melt.
    let survey = ingest_survey(folder, &config, &refdata)?;
    let records = melt(&survey, &refdata)?;
    let melted = melted_table(&records);
    let melted_path = writer.write("melted.csv", &melted)?;
    result.stages.push(StageSummary {
        name: "melt",
        rows_in: survey.row_count(),
        rows_out: records.len(),
        output: melted_path,
    });

    // Stage 3: expand multi-select answers.
    let expansion = expand(&records, &refdata, mode)?;
    result.sequence_violations = expansion.violations.len();
    let expanded_path = writer.write("expanded.csv", &expansion.table)?;
    result.stages.push(StageSummary {
        name: "expand",
        rows_in: records.len(),
        rows_out: expansion.table.row_count(),
        output: expanded_path,
    });

    // Curation exports derived from the expanded table.
    if let Some(location_options) = refdata.option_set(InfoType::Location) {
        let counts = other_counts(&expansion.table, location_options)?;
        writer.write("other_counts.csv", &other_counts_table(counts))?;
    }
    for column in config.classify.keys() {
        let values = leftover_values(&expansion.table, column)
            .with_context(|| format!("collect leftover column '{column}'"))?;
        writer.write(&format!("{column}.csv"), &leftover_table(&values))?;
    }

    // Stage 4: categorize leftover answers.
    let categorized = categorize(expansion.table, &refdata, &config)?;
    let categorized_path = writer.write("categorized.csv", &categorized)?;
    result.stages.push(StageSummary {
        name: "categorize",
        rows_in: records.len(),
        rows_out: categorized.row_count(),
        output: categorized_path,
    });

    // Stage 5: fuzzy name matching; review file is always written.
    let mut matches = match_college_names(&categorized, &refdata, min_score)?;
    result.low_confidence = matches
        .iter()
        .filter(|entry| !entry.is_confident(min_score))
        .count();
    sort_for_review(&mut matches);
    let matches_path = writer.write("name_matches.csv", &matches_table(&matches))?;
    result.stages.push(StageSummary {
        name: "match",
        rows_in: categorized.row_count(),
        rows_out: matches.len(),
        output: matches_path,
    });

    // Round one of the human-in-the-loop correction merge.
    let match_corrections = config.match_corrections_path(folder);
    if !match_corrections.exists() {
        info!(
            correction_file = %match_corrections.display(),
            "name-match review pending; stopping before the merge"
        );
        result.stopped = Some(StopReason::AwaitingMatchReview {
            correction_file: match_corrections,
        });
        return Ok(result);
    }
    let named = merge_match_corrections(&categorized, &matches, &match_corrections)?;
    let named_path = writer.write("named.csv", &named)?;
    let pairs = names_locations(&named)?;
    writer.write("names_locations.csv", &names_locations_table(&pairs))?;
    result.stages.push(StageSummary {
        name: "merge",
        rows_in: categorized.row_count(),
        rows_out: named.row_count(),
        output: named_path,
    });

    // Round two: final names and location cleanup.
    let college_corrections = config.college_corrections_path(folder);
    if !college_corrections.exists() {
        info!(
            correction_file = %college_corrections.display(),
            "college review pending; stopping before the final tables"
        );
        result.stopped = Some(StopReason::AwaitingCollegeReview {
            correction_file: college_corrections,
        });
        return Ok(result);
    }
    let (cleaned, changed) = finalize_names(&named, &college_corrections, &config)?;
    let cleaned_path = writer.write("cleaned.csv", &cleaned)?;
    writer.write("changed_names.csv", &changed_names_table(&changed))?;
    writer.write(
        "names_last_check.csv",
        &distinct_names_table(&distinct_names(&cleaned)?),
    )?;
    result.stages.push(StageSummary {
        name: "finalize",
        rows_in: named.row_count(),
        rows_out: cleaned.row_count(),
        output: cleaned_path,
    });

    // Stage 6: dimension split and the two dashboard tables.
    let split = split_dimension(&cleaned)?;
    writer.write("colleges.csv", &colleges_table(&split.colleges))?;
    let fact_path = writer.write("main.csv", &split.fact)?;
    result.stages.push(StageSummary {
        name: "split",
        rows_in: cleaned.row_count(),
        rows_out: split.colleges.len(),
        output: fact_path,
    });

    Ok(result)
}

pub fn run_check(args: &FolderArgs) -> Result<bool> {
    let config = RunConfig::load(&args.data_folder).context("load run configuration")?;
    let report = check_reference_data(&args.data_folder, &config).context("check reference data")?;

    let mut table = Table::new();
    table.set_header(vec!["Reference", "Count"]);
    apply_table_style(&mut table);
    table.add_row(vec![
        "Survey columns".to_string(),
        report.counts.survey_columns.to_string(),
    ]);
    table.add_row(vec![
        "Column groups".to_string(),
        report.counts.column_groups.to_string(),
    ]);
    table.add_row(vec![
        "Option sets".to_string(),
        report.counts.option_sets.to_string(),
    ]);
    table.add_row(vec!["Options".to_string(), report.counts.options.to_string()]);
    table.add_row(vec![
        "Other categories".to_string(),
        report.counts.other_categories.to_string(),
    ]);
    table.add_row(vec![
        "Curated answers".to_string(),
        report.counts.curated_answers.to_string(),
    ]);
    table.add_row(vec![
        "Canonical names".to_string(),
        report.counts.canonical_names.to_string(),
    ]);
    println!("{table}");

    if report.is_healthy() {
        println!("Reference data is ready.");
    } else {
        eprintln!("Violations:");
        for violation in &report.violations {
            eprintln!("- {violation}");
        }
    }
    Ok(report.is_healthy())
}

pub fn run_options(args: &FolderArgs) -> Result<()> {
    let config = RunConfig::load(&args.data_folder).context("load run configuration")?;
    let sets = survey_refdata::load_option_sets(&config.options_path(&args.data_folder))
        .context("load option reference")?;

    let mut table = Table::new();
    table.set_header(vec!["Info type", "Option", "Shortcut", "Starting substring"]);
    apply_table_style(&mut table);
    for set in sets.values() {
        for entry in &set.entries {
            table.add_row(vec![
                set.info_type.to_string(),
                entry.label.clone(),
                entry.shortcut.clone(),
                entry.uss.clone(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

/// Writes stage outputs under the output directory, or skips them all on
/// a dry run.
struct OutputWriter<'a> {
    output_dir: &'a Path,
    dry_run: bool,
}

impl OutputWriter<'_> {
    fn write(&self, file: &str, table: &CsvTable) -> Result<Option<PathBuf>> {
        if self.dry_run {
            return Ok(None);
        }
        let path = self.output_dir.join(file);
        write_csv_table(&path, table).with_context(|| format!("write {file}"))?;
        Ok(Some(path))
    }
}
