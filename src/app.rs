use eframe::egui;

use crate::data::model::LoanTable;
use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LoanDeskApp {
    pub state: AppState,
}

impl LoanDeskApp {
    pub fn new(table: LoanTable, theme: Theme) -> Self {
        Self {
            state: AppState::new(table, theme),
        }
    }
}

impl eframe::App for LoanDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Criteria published by last frame's widgets.
        self.state.apply_pending();

        // ---- Top panel: title and branch selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: cards and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard_body(ui, &self.state);
        });
    }
}
