use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use sa3_radar::data::model::{RegionRecord, ScoreColumn, ID_COLUMN};

/// The rows that the CSV download will contain.
pub fn selection_table(ui: &mut Ui, rows: &[&RegionRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(70.0), ScoreColumn::COUNT)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(ID_COLUMN);
            });
            for column in ScoreColumn::ALL {
                header.col(|ui| {
                    ui.strong(column.header());
                });
            }
        })
        .body(|mut body| {
            for rec in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&rec.id);
                    });
                    for value in rec.scores.values() {
                        row.col(|ui| {
                            ui.label(value.to_string());
                        });
                    }
                });
            }
        });
}
