//! Desktop shell: renders the controller state with egui and turns clicks
//! into controller actions.

mod app;
mod convert;
mod dialogs;
mod panels;

pub use app::QrPadApp;

use crate::config::AppConfig;

pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([520.0, 380.0])
            .with_title("QR Pad"),
        ..Default::default()
    };

    eframe::run_native(
        "qrpad",
        options,
        Box::new(|_cc| Ok(Box::new(QrPadApp::new(config)))),
    )
}
