//! Entrepreneur table widget.

use cbo_business::{LoadStatus, TableState};
use egui::{Frame, Margin, Response, Stroke, Ui};

use super::table::render_grid;
use crate::TITLE;
use crate::state::State;
use crate::utils::colors::{COLOR_BORDER, COLOR_RED};

/// Shows the entrepreneur table, starting its load on first display.
pub fn entrepreneur_table(state: &mut State, ui: &mut Ui) -> Response {
    state.table.start_once(
        state.source.clone(),
        state.survey_year,
        &state.runtime,
        ui.ctx().clone(),
    );
    state.table.poll();

    table_view(ui, state.table.table())
}

/// Renders the title and the view matching the table's load status.
pub fn table_view(ui: &mut Ui, table: &TableState) -> Response {
    ui.vertical(|ui| {
        ui.heading(TITLE);
        ui.add_space(8.0);

        Frame::NONE
            .stroke(Stroke::new(1.0, COLOR_BORDER))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| match table.status() {
                LoadStatus::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                LoadStatus::Failed(message) => {
                    ui.colored_label(COLOR_RED, format!("Error: {message}"));
                }
                LoadStatus::Loaded => render_grid(ui, table.headers(), table.rows()),
            });
    })
    .response
}
