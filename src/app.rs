use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, Context, FontId, Id, LayerId, Order, Ui};

use data_studio::state::AppState;

use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DataStudioApp {
    pub state: AppState,
}

impl DataStudioApp {
    /// Load the first file dropped onto the window, if any.
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            log::info!("File dropped: {}", path.display());
            let repaint_ctx = ctx.clone();
            self.state
                .begin_load(path, move || repaint_ctx.request_repaint());
        }
    }
}

/// Dim the window and show a hint while files hover over it.
fn drop_overlay(ctx: &Context) {
    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("drop_overlay")));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, 0.0, Color32::from_black_alpha(180));
    painter.text(
        screen.center(),
        Align2::CENTER_CENTER,
        "Drop your file here",
        FontId::proportional(28.0),
        Color32::WHITE,
    );
}

impl eframe::App for DataStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        self.handle_dropped_files(ctx);
        self.state.prune_toasts(Instant::now());

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, &mut self.state, ctx);
        });

        // ---- Central panel: upload, stats, table, charts ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::upload_panel(ui, &mut self.state, ctx);
                    ui.add_space(12.0);

                    if self.state.is_loading() {
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.spinner();
                            ui.label("Processing your file...");
                        });
                        return;
                    }
                    if self.state.dataset.is_empty() {
                        return;
                    }

                    panels::stats_cards(ui, &self.state);
                    ui.add_space(12.0);
                    table::preview_table(ui, &self.state.view);
                    ui.add_space(12.0);
                    plot::charts_section(ui, &mut self.state);
                });
        });

        panels::toasts(ctx, &self.state);
        drop_overlay(ctx);

        if !self.state.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}
