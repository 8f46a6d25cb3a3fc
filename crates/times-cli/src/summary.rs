use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use times_core::DatasetReport;

use crate::types::{RunResult, SummaryOverview};

pub fn print_summary(result: &RunResult) {
    println!("Results: {}", result.input_dir.display());
    match &result.output_dir {
        Some(dir) => println!("Output: {} ({} layout)", dir.display(), result.layout),
        None => println!("Output: dry run, nothing written"),
    }
    println!("{}", summary_table(&result.summaries));
    println!("{}", dataset_table(result));
    if !result.unresolved.is_empty() {
        eprintln!("Unresolved categories:");
        for warning in &result.unresolved {
            eprintln!("- {warning}");
        }
    }
    let errors: Vec<&DatasetReport> = result
        .datasets
        .iter()
        .filter(|report| !report.is_ok())
        .collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for report in errors {
            if let Some(error) = &report.error {
                eprintln!("- {}: {error}", report.kind);
            }
        }
    }
}

fn summary_table(summaries: &[SummaryOverview]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Summary"),
        header_cell("Rows"),
        header_cell("Years"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    let mut total_rows = 0usize;
    for summary in summaries {
        total_rows += summary.rows;
        let years = match summary.year_span {
            Some((first, last)) => Cell::new(format!("{first}-{last}")),
            None => dim_cell("-"),
        };
        let file = match &summary.path {
            Some(path) => Cell::new(path.display()).fg(Color::Green),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(summary.kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.rows),
            years,
            file,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn dataset_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Read"),
        header_cell("Classified"),
        header_cell("Dropped"),
        header_cell("Warnings"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);
    for report in &result.datasets {
        table.add_row(vec![
            Cell::new(report.kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(report.read),
            Cell::new(report.classified),
            count_cell(report.dropped, Color::DarkYellow),
            count_cell(report.warnings, Color::Yellow),
            status_cell(report),
        ]);
    }
    for kind in &result.missing {
        table.add_row(vec![
            dim_cell(kind.as_str()),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("not found"),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(report: &DatasetReport) -> Cell {
    if report.is_ok() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
