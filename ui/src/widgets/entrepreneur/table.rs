//! Grid rendering for a loaded entrepreneur table.

use cbo_business::{ColumnDescriptor, Row};
use egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const MIN_COLUMN_WIDTH: f32 = 80.0;

/// Renders one column per descriptor (titled by `label`, keyed by `name`)
/// and one line per row.
pub fn render_grid(ui: &mut Ui, headers: &[ColumnDescriptor], rows: &[Row]) {
    if headers.is_empty() {
        ui.label("No columns available");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .id_salt("entrepreneur_grid")
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(
                Column::auto().at_least(MIN_COLUMN_WIDTH).clip(true),
                headers.len(),
            )
            .header(HEADER_HEIGHT, |mut header| {
                for column in headers {
                    header.col(|ui| {
                        ui.strong(column.label.as_str())
                            .on_hover_text(column.name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                    let row = &rows[table_row.index()];
                    for column in headers {
                        table_row.col(|ui| {
                            ui.label(row.cell_text(&column.name));
                        });
                    }
                });
            });
    });

    if rows.is_empty() {
        ui.label("No records");
    }
}
