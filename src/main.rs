mod app;
mod config;
mod dialogs;
mod error;
mod logging;
mod runner;
mod state;
mod types;
mod utils;

use app::ConverterApp;
use config::AppConfig;
use eframe::egui;
use error::AppError;
use tracing::info;

fn main() -> Result<(), AppError> {
    logging::init_logging()?;

    let config = AppConfig::load_or_default();
    info!(ffmpeg = %config.ffmpeg_path.display(), mode = ?config.default_mode, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_io()
        .thread_name("ffmpeg-runner")
        .build()
        .map_err(AppError::Runtime)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FFmpeg Converter")
            .with_inner_size([420.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "FFmpeg Converter",
        native_options,
        Box::new(|cc| Ok(Box::new(ConverterApp::new(&cc.egui_ctx, config, runtime)))),
    )?;
    Ok(())
}
