mod app;
mod ui;

use app::DataStudioApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Data Studio",
        options,
        Box::new(|_cc| Ok(Box::new(DataStudioApp::default()))),
    )
}
