use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{RunResult, StopReason};

pub fn print_summary(result: &RunResult) {
    println!("Data folder: {}", result.data_folder.display());
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for stage in &result.stages {
        let output = stage
            .output
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned());
        table.add_row(vec![
            Cell::new(stage.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows_in),
            Cell::new(stage.rows_out),
            match output {
                Some(name) => Cell::new(name),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");

    print_count_line("Low-confidence name matches", result.low_confidence);
    print_count_line("Sequence contract violations", result.sequence_violations);

    match &result.stopped {
        Some(StopReason::AwaitingMatchReview { correction_file }) => {
            println!();
            println!(
                "Run paused: review name_matches.csv, then save the curated table as\n{}",
                correction_file.display()
            );
        }
        Some(StopReason::AwaitingCollegeReview { correction_file }) => {
            println!();
            println!(
                "Run paused: review names_locations.csv, then save the curated table as\n{}",
                correction_file.display()
            );
        }
        None => {
            println!();
            println!("Final tables written: main.csv + colleges.csv");
        }
    }
}

fn print_count_line(label: &str, count: usize) {
    if count > 0 {
        println!("{label}: {count}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
