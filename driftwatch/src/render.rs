// driftwatch/src/render.rs
//
// Terminal rendering for tables, schemas and checkpoint outcomes.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table as DisplayTable};

use driftwatch_core::domain::checkpoint::CheckpointResult;
use driftwatch_core::domain::expectation::suite::ExpectationSuite;
use driftwatch_core::domain::table::Table;
use driftwatch_core::ports::connector::ColumnSchema;

fn base_table() -> DisplayTable {
    let mut display = DisplayTable::new();
    display
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    display
}

pub fn render_table(table: &Table) -> DisplayTable {
    let mut display = base_table();
    display.set_header(table.column_names());

    for idx in 0..table.num_rows() {
        display.add_row(table.row(idx).iter().map(|v| v.to_string()));
    }
    display
}

pub fn render_schema(columns: &[ColumnSchema]) -> DisplayTable {
    let mut display = base_table();
    display.set_header(vec!["column", "type", "nullable"]);
    for col in columns {
        display.add_row(vec![
            col.name.clone(),
            col.data_type.clone(),
            col.is_nullable.to_string(),
        ]);
    }
    display
}

pub fn render_suite(suite: &ExpectationSuite) -> DisplayTable {
    let mut display = base_table();
    display.set_header(vec!["column", "expectation"]);
    for expectation in &suite.expectations {
        display.add_row(vec![
            expectation.column.clone(),
            expectation.predicate.to_string(),
        ]);
    }
    display
}

pub fn render_checkpoint_result(result: &CheckpointResult) -> DisplayTable {
    let mut display = base_table();
    display.set_header(vec![
        "column",
        "expectation",
        "status",
        "unexpected",
        "sample",
    ]);

    for r in &result.report.results {
        let status = if r.success {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        let sample = r
            .unexpected_sample
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        display.add_row(vec![
            Cell::new(&r.expectation.column),
            Cell::new(r.expectation.predicate.to_string()),
            status,
            Cell::new(format!("{}/{}", r.unexpected_count, r.element_count)),
            Cell::new(sample),
        ]);
    }
    display
}
