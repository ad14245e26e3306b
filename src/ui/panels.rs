use eframe::egui::{self, Align2, Color32, Context, RichText, Ui};

use data_studio::state::{AppState, ToastKind};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, ctx: &Context) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, ctx);
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.dataset.is_empty(), egui::Button::new("Clear Data"))
                .clicked()
            {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Data Analysis Studio");

        if state.is_loading() {
            ui.separator();
            ui.spinner();
            ui.label("Processing your file...");
        }
    });
}

// ---------------------------------------------------------------------------
// Upload section
// ---------------------------------------------------------------------------

/// Drop-zone hint and file picker, or the loaded file's summary.
pub fn upload_panel(ui: &mut Ui, state: &mut AppState, ctx: &Context) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Upload Data");
        if !state.dataset.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                if ui.button("Clear Data").clicked() {
                    state.clear();
                }
            });
        }
    });

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());

        match state.file.clone() {
            None => {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.add_space(16.0);
                    ui.label(RichText::new("Upload your data file").size(18.0).strong());
                    ui.label("Drag & drop your CSV or JSON file, or click to browse");
                    ui.small("Supported formats: .csv, .json");
                    ui.add_space(8.0);
                    if ui.button("Choose File…").clicked() {
                        open_file_dialog(state, ctx);
                    }
                    ui.add_space(16.0);
                });
            }
            Some(file) => {
                ui.horizontal(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        ui.strong(&file.name);
                        ui.small(format!("{:.1} KB", file.size_kb()));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                        if ui.small_button("✖").on_hover_text("Remove file").clicked() {
                            state.clear();
                        }
                        if ui.small_button("Open…").clicked() {
                            open_file_dialog(state, ctx);
                        }
                    });
                });
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Stats cards
// ---------------------------------------------------------------------------

/// Total rows, column count and file name, side by side.
pub fn stats_cards(ui: &mut Ui, state: &AppState) {
    let file_name = state.file.as_ref().map(|f| f.name.as_str()).unwrap_or("");
    let cards = [
        ("Total Rows", state.view.total_rows.to_string()),
        ("Columns", state.view.columns.len().to_string()),
        ("File Name", file_name.to_string()),
    ];

    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (ui, (title, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.small(title);
                ui.add(egui::Label::new(RichText::new(value).size(22.0).strong()).truncate());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Toasts
// ---------------------------------------------------------------------------

fn toast_color(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Info => Color32::LIGHT_BLUE,
        ToastKind::Success => Color32::LIGHT_GREEN,
        ToastKind::Warning => Color32::from_rgb(255, 200, 80),
        ToastKind::Error => Color32::from_rgb(255, 110, 110),
    }
}

/// Stack pending notifications in the bottom-right corner.
pub fn toasts(ctx: &Context, state: &AppState) {
    if state.toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            for toast in &state.toasts {
                egui::Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(&toast.message).color(toast_color(toast.kind)));
                });
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, ctx: &Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Loading {}", path.display());
        let ctx = ctx.clone();
        state.begin_load(path, move || ctx.request_repaint());
    }
}
