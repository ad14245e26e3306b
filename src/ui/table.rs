use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use data_studio::data::shaper::ShapedView;

// ---------------------------------------------------------------------------
// Preview table
// ---------------------------------------------------------------------------

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Render the first rows of the dataset under a header of every column.
pub fn preview_table(ui: &mut Ui, view: &ShapedView) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Data Preview");
        if !view.is_empty() {
            ui.label(RichText::new(plural(view.total_rows, "row")).weak());
            ui.label(RichText::new(plural(view.columns.len(), "column")).weak());
        }
    });

    if view.is_empty() {
        ui.label("No data to display. Upload a file to get started.");
        return;
    }

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        // Column count changes between files, so keep one table state per layout.
        ui.push_id(("preview_table", &view.columns), |ui: &mut Ui| {
            egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(380.0)
                    .columns(Column::auto().at_least(60.0).clip(true), view.columns.len())
                    .header(22.0, |mut header| {
                        for col in &view.columns {
                            header.col(|ui: &mut Ui| {
                                ui.strong(col);
                            });
                        }
                    })
                    .body(|mut body| {
                        for record in &view.preview.records {
                            body.row(20.0, |mut row| {
                                for col in &view.columns {
                                    row.col(|ui: &mut Ui| {
                                        ui.monospace(record.display(col));
                                    });
                                }
                            });
                        }
                    });
            });
        });
    });

    if view.is_truncated() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.small(format!(
                "Showing first {} rows of {} total rows",
                view.preview.len(),
                view.total_rows
            ));
        });
    }
}
