use eframe::egui::{self, Align, Layout, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::present::PreviewTable;

/// Render the styled loan preview table.
pub fn loan_table(ui: &mut Ui, table: &PreviewTable, height: f32) {
    let style = table.style;

    egui::Frame::default()
        .fill(style.background)
        .stroke(Stroke::new(1.0, style.border))
        .inner_margin(6.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_height(height);
            ui.visuals_mut().override_text_color = Some(style.text);
            ui.visuals_mut().widgets.noninteractive.bg_stroke = Stroke::new(1.0, style.border);

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(height)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), table.headers.len())
                .header(22.0, |mut header| {
                    for title in table.headers {
                        header.col(|ui: &mut Ui| {
                            ui.label(RichText::new(title).strong());
                        });
                    }
                })
                .body(|mut body| {
                    for row in &table.rows {
                        body.row(20.0, |mut cells| {
                            for value in row {
                                cells.col(|ui: &mut Ui| {
                                    ui.label(value);
                                });
                            }
                        });
                    }
                });

            if table.rows.is_empty() {
                ui.add_space(8.0);
                ui.label("No loans match the current filters");
            }
        });
}
