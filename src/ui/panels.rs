use eframe::egui::{self, Align, Layout, RichText, ScrollArea, SelectableLabel, Stroke, Ui};

use crate::data::filter::{ALL, FilterCriteria, Selection};
use crate::data::model::KNOWN_STATUSES;
use crate::state::AppState;
use crate::theme::Theme;
use crate::ui::{plot, table};

pub const TITLE: &str = "BANK LOAN ANALYSIS - FINANCIAL INSTITUTION";

// ---------------------------------------------------------------------------
// Top bar – title and branch selector
// ---------------------------------------------------------------------------

/// Render the title row.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    let theme = &state.theme;
    let current = &state.view.criteria;

    ui.add_space(6.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new(TITLE).size(26.0).strong().color(theme.text.0));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            ui.label(format!(
                "{} records loaded, {} visible",
                state.table.len(),
                state.view.visible_rows
            ));
            ui.separator();

            if let Some(branch) = selector(
                ui,
                "branch",
                "Bank Branches",
                &state.table.branches,
                &current.branch,
            ) {
                publish(ui, state, FilterCriteria {
                    branch,
                    ..current.clone()
                });
            }
        });
    });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Left side panel – cards and filter widgets
// ---------------------------------------------------------------------------

/// Render the metric cards, the borrower selector and the status tiles.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    let theme = &state.theme;
    let view = &state.view;
    let current = &view.criteria;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add_space(8.0);
            card(ui, theme, &view.total_loan, "Total Loan Amount");
            ui.add_space(12.0);
            card(ui, theme, &view.total_customers, "Number of Borrowers");
            ui.add_space(20.0);

            if let Some(borrower) = selector(
                ui,
                "borrower",
                "List of Borrowers",
                &state.table.borrowers,
                &current.borrower,
            ) {
                publish(ui, state, FilterCriteria {
                    borrower,
                    ..current.clone()
                });
            }
            ui.add_space(20.0);

            if let Some(loan_status) = status_tiles(ui, theme, &current.loan_status) {
                publish(ui, state, FilterCriteria {
                    loan_status,
                    ..current.clone()
                });
            }
        });
}

fn card(ui: &mut Ui, theme: &Theme, value: &str, caption: &str) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(2.0, theme.visual_border.0))
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(value).size(26.0).strong().color(theme.text.0));
            ui.label(RichText::new(caption).size(16.0).color(theme.accent.0));
        });
}

/// Drop-down with "All" followed by `options`. Returns the new selection
/// when the user picked a different one.
fn selector(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    current: &Selection,
) -> Option<Selection> {
    let mut picked = current.as_input().to_string();

    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).strong());
        egui::ComboBox::from_id_salt(id)
            .selected_text(&picked)
            .width(200.0)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut picked, ALL.to_string(), ALL);
                for opt in options {
                    ui.selectable_value(&mut picked, opt.clone(), opt);
                }
            });
    });

    let next = Selection::from_input(&picked);
    (next != *current).then_some(next)
}

/// Vertical "Loan Status" tiles: All plus the known statuses.
fn status_tiles(ui: &mut Ui, theme: &Theme, current: &Selection) -> Option<Selection> {
    let mut changed = None;

    ui.label(RichText::new("Loan Status").strong());
    ui.add_space(6.0);
    for choice in std::iter::once(ALL).chain(KNOWN_STATUSES) {
        let selected = current.as_input() == choice;
        let text = if selected {
            RichText::new(choice).color(egui::Color32::BLACK)
        } else {
            RichText::new(choice)
        };
        let tile = ui.add_sized([theme.tile_width, 36.0], SelectableLabel::new(selected, text));
        if tile.clicked() && !selected {
            changed = Some(Selection::from_input(choice));
        }
        ui.add_space(4.0);
    }
    changed
}

fn publish(ui: &Ui, state: &AppState, criteria: FilterCriteria) {
    state.publish(criteria);
    ui.ctx().request_repaint();
}

// ---------------------------------------------------------------------------
// Central panel – charts and table
// ---------------------------------------------------------------------------

/// Two rows of two visuals each.
pub fn dashboard_body(ui: &mut Ui, state: &AppState) {
    let theme = &state.theme;
    let view = &state.view;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                visual(&mut cols[0], theme, "Loan Status Distribution", |ui: &mut Ui| {
                    plot::status_pie(ui, &view.loan_status_pie, theme, theme.chart_height);
                });
                visual(&mut cols[1], theme, "Loan Amount Over Time", |ui: &mut Ui| {
                    plot::trend_line(ui, &view.loan_trend_line, theme.chart_height);
                });
            });
            ui.add_space(16.0);
            ui.columns(2, |cols: &mut [Ui]| {
                visual(&mut cols[0], theme, "Loan Amount by Branch and Status", |ui: &mut Ui| {
                    ui.label(RichText::new("Loan Status").small().strong());
                    plot::branch_bars(ui, &view.branches_loan_status, theme.large_chart_height);
                });
                visual(&mut cols[1], theme, "Loans", |ui: &mut Ui| {
                    table::loan_table(ui, &view.loan_table, theme.large_chart_height);
                });
            });
        });
}

/// Bordered box with a title in the accent colour.
fn visual(ui: &mut Ui, theme: &Theme, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(2.0, theme.visual_border.0))
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(18.0).color(theme.accent.0));
            ui.add_space(4.0);
            add_contents(ui);
        });
}
