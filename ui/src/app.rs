use crate::{state::State, widgets};

/// Application shell: a static page holding the entrepreneur table.
pub struct CboApp {
    pub state: State,
}

impl CboApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for CboApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::entrepreneur_table(&mut self.state, ui);
        });
    }
}
