//! Terminal tables for reports and catalogs.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use inv_model::{CatalogKind, Report};

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One row per report, newest first.
pub fn reports_table(reports: &[Report]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Boat"),
        header_cell("Created (UTC)"),
        header_cell("Sections"),
        header_cell("Items"),
        header_cell("Quantity"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for report in reports {
        table.add_row(vec![
            dim_cell(report.id.as_str()),
            Cell::new(&report.boat_name).add_attribute(Attribute::Bold),
            Cell::new(report.created_at.format(CREATED_FORMAT)),
            Cell::new(report.sections.len()),
            Cell::new(report.item_count()),
            quantity_cell(report.total_quantity()),
        ]);
    }
    table
}

/// Items of a report grouped by section, with the 1-based positions used by
/// `edit` and `remove`.
pub fn report_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("#"),
        header_cell("Item"),
        header_cell("Quantity"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for section in &report.sections {
        for (index, item) in section.items.iter().enumerate() {
            let label = if index == 0 {
                Cell::new(&section.label)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                label,
                dim_cell(index + 1),
                Cell::new(&item.name),
                quantity_cell(item.quantity),
            ]);
        }
    }
    table
}

/// Catalog entries in insertion order.
pub fn catalog_table<'a>(kind: CatalogKind, entries: impl IntoIterator<Item = &'a str>) -> Table {
    let mut table = Table::new();
    let heading = match kind {
        CatalogKind::Boat => "Boat",
        CatalogKind::Section => "Section",
        CatalogKind::Item => "Item",
    };
    table.set_header(vec![header_cell(heading)]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![Cell::new(entry)]);
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn quantity_cell(quantity: i64) -> Cell {
    if quantity > 0 {
        Cell::new(quantity).add_attribute(Attribute::Bold)
    } else {
        Cell::new(quantity).fg(Color::Yellow)
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
