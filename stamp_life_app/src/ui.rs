// ui.rs - Panel layout, board painting and input forwarding

use eframe::egui;
use egui::{Color32, Key, Painter, Rect, Sense, Vec2};
use stamp_life::{CellStyle, Command, GridSize, Renderer, Tile, Viewport};

use crate::LifeApp;

const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::Tab, Command::NextPattern),
    (Key::N, Command::NextPattern),
    (Key::P, Command::PrevPattern),
    (Key::R, Command::Rotate),
    (Key::F, Command::Reflect),
    (Key::Space, Command::ToggleRunning),
    (Key::S, Command::Step),
    (Key::C, Command::CapturePattern),
    (Key::Delete, Command::DeletePattern),
];

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Paints board cells as filled squares.
struct BoardPainter<'a> {
    painter: &'a Painter,
    viewport: Viewport,
    live: Color32,
    highlight: Color32,
    background: Color32,
    style: CellStyle,
}

impl Renderer for BoardPainter<'_> {
    fn clear(&mut self) {
        let (x, y) = self.viewport.origin;
        let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(self.viewport.extent()));
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn set_style(&mut self, style: CellStyle) {
        self.style = style;
    }

    fn fill_tile(&mut self, tile: Tile) {
        let (x, y) = self.viewport.cell_origin(tile.cell);
        let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(tile.size));
        let color = match self.style {
            CellStyle::Live => self.live,
            CellStyle::Highlight => self.highlight,
        };
        self.painter.rect_filled(rect, 0.0, color);
    }
}

impl LifeApp {
    fn run(&mut self, command: Command) {
        self.status = self.board.dispatch(command).err().map(|e| e.to_string());
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One step if the timer ticked since the last frame
        self.board.pump();

        let pressed: Vec<Command> = ctx.input(|i| {
            KEY_BINDINGS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|&(_, command)| command)
                .collect()
        });
        for command in pressed {
            self.run(command);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Stamp Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.board.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.run(Command::ToggleRunning);
                }
                if ui.button("⏭ Step").clicked() {
                    self.run(Command::Step);
                }
                if ui.button("⏹ Reset").clicked() {
                    self.run(Command::Reset);
                }
                if ui.button("Gun").clicked() {
                    self.run(Command::PlaceGun);
                }
                if ui.button("Log cells").clicked() {
                    self.run(Command::ExportLive);
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.board.generation()));
            });

            ui.separator();

            // Speed and grid size
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let max = self.board.config().max_steps_per_second;
                let mut speed = self.board.config().steps_per_second;
                if ui.add(egui::Slider::new(&mut speed, 1.0..=max).suffix(" steps/sec")).changed() {
                    self.board.set_speed(speed);
                }

                ui.separator();

                ui.label("Grid:");
                let current = self.board.config().grid_size;
                let mut size = current;
                for option in GridSize::ALL {
                    ui.radio_value(&mut size, option, option.cells().to_string());
                }
                if size != current {
                    self.board.set_grid_size(size);
                }
            });

            // Brushes
            ui.horizontal(|ui| {
                ui.label("Brush:");
                let selected = self.board.library().selected_index();
                let mut pick = None;
                egui::ComboBox::from_id_source("brush_selector")
                    .selected_text(self.board.library().current().name.clone())
                    .show_ui(ui, |ui| {
                        for (i, pattern) in self.board.library().patterns().iter().enumerate() {
                            if ui.selectable_label(i == selected, pattern.name.as_str()).clicked() {
                                pick = Some(i);
                            }
                        }
                    });
                if let Some(i) = pick {
                    self.board.select_pattern(i);
                }

                if ui.button("⟳ Rotate").clicked() {
                    self.run(Command::Rotate);
                }
                if ui.button("⇋ Reflect").clicked() {
                    self.run(Command::Reflect);
                }
                if ui.button("Capture").clicked() {
                    self.run(Command::CapturePattern);
                }
                if ui.button("Delete").clicked() {
                    self.run(Command::DeletePattern);
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::from_rgb(200, 60, 60), status.as_str());
            }

            ui.separator();

            // Board
            let side = self.board.viewport((0.0, 0.0)).extent();
            let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
            let viewport = self.board.viewport((response.rect.min.x, response.rect.min.y));

            match response.hover_pos() {
                Some(pos) => {
                    let cell = viewport.cell_at((pos.x, pos.y));
                    self.board.hover(cell);
                    if response.clicked() {
                        self.board.click(cell);
                    }
                }
                None if self.board.cursor().is_some() => self.board.leave(),
                None => {}
            }

            let config = self.board.config();
            let mut renderer = BoardPainter {
                painter: &painter,
                viewport,
                live: rgb(config.live_color),
                highlight: rgb(config.highlight_color),
                background: rgb(config.background_color),
                style: CellStyle::Live,
            };
            self.board.draw(&mut renderer);

            ui.separator();

            // Statistics
            ui.horizontal(|ui| {
                let size = self.board.grid().size();
                let live_cells = self.board.grid().len();
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / (size * size) as f32 * 100.0));
                ui.label("Keys: Tab/N/P brush, R rotate, F reflect, Space run, S step, C capture, Del delete");
            });
        });
    }
}
