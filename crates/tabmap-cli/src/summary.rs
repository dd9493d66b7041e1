use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabmap_core::ImportSession;
use tabmap_ingest::SourceTable;
use tabmap_map::{ConfidenceLevel, FieldRank, Suggestion};
use tabmap_model::{FieldDefinition, MappingReport, SchemaDefinition, SchemaSummary};

use crate::types::ProcessResult;

/// Rejected rows listed in the process summary.
const MAX_REJECTED_SHOWN: usize = 20;

pub fn print_schemas(schemas: &[SchemaSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Schema"),
        header_cell("Label"),
        header_cell("Fields"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for schema in schemas {
        table.add_row(vec![
            name_cell(&schema.name),
            optional_cell(schema.label.as_deref()),
            Cell::new(schema.field_count),
            Cell::new(schema.required_count),
            optional_cell(schema.description.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_schema(schema: &SchemaDefinition) {
    println!("Schema: {}", schema.name);
    if let Some(description) = &schema.description {
        println!("{description}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Max length"),
        header_cell("Allowed values"),
        header_cell("Related"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for field in schema.fields() {
        table.add_row(vec![
            name_cell(&field.name),
            optional_cell(field.label.as_deref()),
            Cell::new(field.kind),
            required_cell(field.required),
            optional_cell(field.max_length.map(|n| n.to_string()).as_deref()),
            optional_cell(allowed_values(field).as_deref()),
            optional_cell(field.related_schema.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_preview(source: &SourceTable) {
    let mut table = Table::new();
    table.set_header(source.headers.iter().map(|h| header_cell(h)));
    apply_table_style(&mut table);
    for row in &source.rows {
        table.add_row(source.headers.iter().map(|h| Cell::new(row.value(h))));
    }
    println!("{table}");
    println!(
        "{} columns, {} rows shown",
        source.column_count(),
        source.row_count()
    );
}

pub fn print_suggestions(
    suggestions: &[Suggestion],
    alternatives: Option<&[(String, Vec<FieldRank>)]>,
) {
    let mut table = Table::new();
    let mut header = vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
    ];
    if alternatives.is_some() {
        header.push(header_cell("Closest fields"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for (idx, suggestion) in suggestions.iter().enumerate() {
        let mut row = vec![
            Cell::new(&suggestion.column),
            match &suggestion.target {
                Some(target) => name_cell(target),
                None => dim_cell("-"),
            },
            confidence_cell(suggestion),
        ];
        if let Some(ranks) = alternatives.and_then(|alts| alts.get(idx)) {
            row.push(Cell::new(format_ranks(&ranks.1)));
        }
        table.add_row(row);
    }
    println!("{table}");

    let mapped = suggestions.iter().filter(|s| s.target.is_some()).count();
    println!("{mapped} of {} columns mapped", suggestions.len());
}

pub fn print_report(report: &MappingReport) {
    let status = if report.is_valid() {
        Cell::new("valid").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("invalid").fg(Color::Red).add_attribute(Attribute::Bold)
    };
    let mut overview = Table::new();
    apply_table_style(&mut overview);
    overview.add_row(vec![header_cell("Mapping"), status]);
    overview.add_row(vec![
        header_cell("Score"),
        Cell::new(format!("{:.2}%", report.score)),
    ]);
    overview.add_row(vec![
        header_cell("Missing required"),
        list_cell(&report.missing_required_fields, Color::Red),
    ]);
    overview.add_row(vec![
        header_cell("Unmapped columns"),
        list_cell(&report.unmapped_columns, Color::Yellow),
    ]);
    println!("{overview}");

    if !report.mapping_errors.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Column"),
            header_cell("Target"),
            header_cell("Error"),
        ]);
        apply_issue_table_style(&mut table);
        for issue in &report.mapping_errors {
            table.add_row(vec![
                Cell::new(&issue.source_column),
                Cell::new(&issue.target_field),
                Cell::new(&issue.error).fg(Color::Red),
            ]);
        }
        println!();
        println!("Mapping errors:");
        println!("{table}");
    }

    if !report.sample_row_errors.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Row"),
            header_cell("Column"),
            header_cell("Field"),
            header_cell("Value"),
            header_cell("Error"),
        ]);
        apply_issue_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for row in &report.sample_row_errors {
            for error in &row.errors {
                table.add_row(vec![
                    Cell::new(row.row_index + 1),
                    Cell::new(&error.source_column),
                    Cell::new(&error.field),
                    Cell::new(&error.value),
                    Cell::new(&error.error).fg(Color::Red),
                ]);
            }
        }
        println!();
        println!("Sample row errors:");
        println!("{table}");
    }
}

pub fn print_process_summary(result: &ProcessResult) {
    println!("File: {}", result.file.display());
    println!("Schema: {}", result.schema);
    match &result.outputs {
        Some(paths) => {
            println!("Processed: {}", paths.processed.display());
            if let Some(errors) = &paths.errors {
                println!("Errors: {}", errors.display());
            }
        }
        None => println!("Dry run: no files written"),
    }

    let outcome = &result.outcome;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 0..3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.total_rows()).add_attribute(Attribute::Bold),
        count_cell(outcome.valid_count(), Color::Green),
        count_cell(outcome.invalid_count(), Color::Red),
    ]);
    println!("{table}");

    if outcome.rejected.is_empty() {
        return;
    }
    let mut issues = Table::new();
    issues.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Error"),
    ]);
    apply_issue_table_style(&mut issues);
    align_column(&mut issues, 0, CellAlignment::Right);
    for rejected in outcome.rejected.iter().take(MAX_REJECTED_SHOWN) {
        for error in &rejected.errors {
            issues.add_row(vec![
                Cell::new(rejected.row_number()),
                Cell::new(&error.field),
                Cell::new(&error.value),
                Cell::new(&error.error).fg(Color::Red),
            ]);
        }
    }
    println!();
    println!("Rejected rows:");
    println!("{issues}");
    if outcome.rejected.len() > MAX_REJECTED_SHOWN {
        println!(
            "... and {} more rejected rows",
            outcome.rejected.len() - MAX_REJECTED_SHOWN
        );
    }
}

pub fn print_session(session: &ImportSession) {
    let mut overview = Table::new();
    apply_table_style(&mut overview);
    overview.add_row(vec![header_cell("Id"), Cell::new(session.id)]);
    overview.add_row(vec![
        header_cell("File"),
        Cell::new(&session.original_filename),
    ]);
    overview.add_row(vec![header_cell("Type"), Cell::new(session.file_type)]);
    overview.add_row(vec![
        header_cell("Schema"),
        optional_cell(session.target_schema.as_deref()),
    ]);
    overview.add_row(vec![
        header_cell("Updated"),
        Cell::new(session.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ]);
    println!("{overview}");

    if session.mapping.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Field")]);
    apply_table_style(&mut table);
    for (column, target) in session.mapping.iter() {
        table.add_row(vec![
            Cell::new(column),
            match target {
                Some(target) => name_cell(target),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

pub fn print_sessions(sessions: &[ImportSession]) {
    if sessions.is_empty() {
        println!("No sessions");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("File"),
        header_cell("Schema"),
        header_cell("Mapped"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for session in sessions {
        table.add_row(vec![
            Cell::new(session.id),
            Cell::new(&session.original_filename),
            optional_cell(session.target_schema.as_deref()),
            Cell::new(format!(
                "{}/{}",
                session.mapping.mapped_count(),
                session.mapping.len()
            )),
            Cell::new(session.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
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

fn name_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) if !value.is_empty() => Cell::new(value),
        _ => dim_cell("-"),
    }
}

fn list_cell(values: &[String], color: Color) -> Cell {
    if values.is_empty() {
        dim_cell("none")
    } else {
        Cell::new(values.join(", ")).fg(color)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn confidence_cell(suggestion: &Suggestion) -> Cell {
    match (suggestion.confidence, suggestion.level()) {
        (Some(score), Some(level)) => {
            let color = match level {
                ConfidenceLevel::High => Color::Green,
                ConfidenceLevel::Medium => Color::Yellow,
                ConfidenceLevel::Low => Color::Red,
            };
            Cell::new(format!("{score}%")).fg(color)
        }
        _ => dim_cell("-"),
    }
}

fn allowed_values(field: &FieldDefinition) -> Option<String> {
    field
        .allowed_values
        .as_ref()
        .filter(|values| !values.is_empty())
        .map(|values| values.iter().cloned().collect::<Vec<_>>().join(", "))
}

fn format_ranks(ranks: &[FieldRank]) -> String {
    ranks
        .iter()
        .map(|rank| format!("{} ({:.2})", rank.field, rank.score))
        .collect::<Vec<_>>()
        .join(", ")
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
