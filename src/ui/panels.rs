use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use sa3_radar::data::model::{SCORE_MAX, SCORE_MIN};
use sa3_radar::state::StatusMessage;
use sa3_radar::view::DashboardView;

use super::{plot, table, Action, Download};

// ---------------------------------------------------------------------------
// Left side panel – score range sliders
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, view: &DashboardView, actions: &mut Vec<Action>) {
    ui.heading("Filter Regions by Score");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for slider in &view.sliders {
                let mut lo = slider.range.min();
                let mut hi = slider.range.max();

                ui.label(RichText::new(slider.column.header()).strong());
                let lo_changed = ui
                    .add(egui::Slider::new(&mut lo, SCORE_MIN..=SCORE_MAX).text("min"))
                    .changed();
                let hi_changed = ui
                    .add(egui::Slider::new(&mut hi, SCORE_MIN..=SCORE_MAX).text("max"))
                    .changed();

                // Crossing bounds drag the other one along.
                if lo_changed {
                    actions.push(Action::SetRange(slider.column, slider.range.with_min(lo)));
                } else if hi_changed {
                    actions.push(Action::SetRange(slider.column, slider.range.with_max(hi)));
                }
                ui.add_space(6.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status line and filter reset.
pub fn top_bar(ui: &mut Ui, view: &DashboardView, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} regions loaded, {} match filters",
            view.total,
            view.matching()
        ));

        ui.separator();

        if ui
            .add_enabled(view.filters_active, egui::Button::new("Reset filters"))
            .clicked()
        {
            actions.push(Action::ResetFilters);
        }

        match view.status {
            Some(StatusMessage::Info(msg)) => {
                ui.separator();
                ui.label(msg);
            }
            Some(StatusMessage::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – selection, chart, downloads
// ---------------------------------------------------------------------------

pub fn main_panel(
    ui: &mut Ui,
    view: &DashboardView,
    search: &mut String,
    actions: &mut Vec<Action>,
) {
    ScrollArea::vertical()
        .id_salt("main_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(view.title);
            ui.add_space(8.0);

            region_picker(ui, view, search, actions);
            ui.separator();

            match &view.chart {
                Some(chart) => {
                    plot::radar_plot(ui, chart);

                    ui.horizontal(|ui: &mut Ui| {
                        for kind in [Download::Csv, Download::Pdf] {
                            if ui.button(kind.button_label()).clicked() {
                                actions.push(Action::Save(kind));
                            }
                        }
                    });
                    ui.add_space(8.0);
                    table::selection_table(ui, &view.export_rows);
                }
                None => {
                    if let Some(prompt) = view.prompt {
                        ui.label(RichText::new(prompt).italics());
                    }
                }
            }
        });
}

/// Multi-select over the filtered regions.
fn region_picker(
    ui: &mut Ui,
    view: &DashboardView,
    search: &mut String,
    actions: &mut Vec<Action>,
) {
    ui.label("Select SA3 Regions to Compare:");

    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::TextEdit::singleline(search).hint_text("Search regions…"));
        if ui
            .add_enabled(!view.selection.is_empty(), egui::Button::new("Clear selection"))
            .clicked()
        {
            actions.push(Action::ClearSelection);
        }
    });

    // Chips for the current selection, in pick order.
    if !view.selection.is_empty() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for id in view.selection {
                let hidden = view.hidden.contains(&id.as_str());
                let mut text = RichText::new(format!("{id}  ✕"));
                if hidden {
                    text = text.weak().strikethrough();
                }
                if ui.small_button(text).on_hover_text("Remove").clicked() {
                    actions.push(Action::Toggle(id.clone()));
                }
            }
        });
    }

    if !view.hidden.is_empty() {
        ui.label(
            RichText::new(format!(
                "{} selected region(s) hidden by the current filters",
                view.hidden.len()
            ))
            .weak(),
        );
    }

    if let Some(note) = view.empty_filter_note() {
        ui.label(RichText::new(note).weak());
        return;
    }

    let needle = search.trim().to_lowercase();
    ScrollArea::vertical()
        .id_salt("region_list")
        .max_height(180.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for id in view
                .options
                .iter()
                .filter(|id| needle.is_empty() || id.to_lowercase().contains(&needle))
            {
                let mut checked = view.is_selected(id);
                if ui.checkbox(&mut checked, *id).changed() {
                    actions.push(Action::Toggle(id.to_string()));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Load failure
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the data could not be loaded.
pub fn load_failure(ui: &mut Ui, title: &str, message: &str) {
    ui.heading(title);
    ui.add_space(12.0);
    ui.label(RichText::new(message).color(Color32::RED));
}
