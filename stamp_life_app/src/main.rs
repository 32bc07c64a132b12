// main.rs - Stamp Life: Game of Life with brushes, on eframe/egui
// Board logic lives in the stamp_life crate; ui.rs only paints and forwards input

use eframe::egui;
use stamp_life::{Board, BoardConfig};

mod ui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => BoardConfig::load(&path).unwrap_or_else(|e| {
            log::error!("Config {path}: {e}, using defaults");
            BoardConfig::default()
        }),
        None => BoardConfig::default(),
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Error starting step timer runtime: {}", e);
        std::process::exit(1);
    });

    let side = config.canvas_pixels as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side + 40.0, side + 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stamp Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, config, runtime))),
    )
}

pub struct LifeApp {
    pub board: Board,
    /// Last rejected command, shown under the controls.
    pub status: Option<String>,

    // Drives the board's step timer; must outlive it
    _runtime: tokio::runtime::Runtime,
}

impl LifeApp {
    fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig, runtime: tokio::runtime::Runtime) -> Self {
        let mut board = Board::new(config, runtime.handle().clone());

        // Timer ticks arrive off the UI thread; wake egui so update() pumps them
        let ctx = cc.egui_ctx.clone();
        board.set_notify(move || ctx.request_repaint());

        Self {
            board,
            status: None,
            _runtime: runtime,
        }
    }
}
