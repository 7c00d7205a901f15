#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use cbo_business::Config;
use cbo_ui::TITLE;
use cbo_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        log::info!("Loaded environment from {}", path.display());
    }

    let config = Config::init()?;

    // Loads run here; it must outlive the event loop.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let state = State::new(&config, runtime.handle().clone())?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(cbo_ui::CboApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the viewer: {e}"))
}
