// board.rs - One board instance: grid, brushes, timer and pointer state

use tokio::runtime::Handle;

use crate::config::{BoardConfig, GridSize, speed_to_period};
use crate::error::BoardError;
use crate::evolve::{Evolver, StepSummary};
use crate::grid::{Cell, GridState, Tile};
use crate::patterns::{self, Direction, Offset, PatternLibrary, GOSPER_GUN};
use crate::render::{CellStyle, Renderer, Viewport};
use crate::timer::StepTimer;

/// Where the "gun" action drops the Gosper glider gun.
const GUN_ORIGIN: Cell = Cell::new(1, 1);

/// Actions a UI can bind to keys or buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPattern,
    PrevPattern,
    Rotate,
    Reflect,
    /// Turn the live cells into a new brush.
    CapturePattern,
    DeletePattern,
    ToggleRunning,
    Step,
    Reset,
    PlaceGun,
    /// Log the live cells in brush offset format.
    ExportLive,
}

pub struct Board {
    config: BoardConfig,
    grid: GridState,
    evolver: Evolver,
    library: PatternLibrary,
    timer: StepTimer,
    cursor: Option<Cell>,
    highlight: Vec<Cell>,
    generation: u64,
}

impl Board {
    /// Creates an empty, stopped board. The step timer runs on `handle`.
    pub fn new(config: BoardConfig, handle: Handle) -> Self {
        let timer = StepTimer::new(handle, config.period());
        Self {
            grid: GridState::new(config.grid_size.cells()),
            evolver: Evolver::new(),
            library: PatternLibrary::builtin(),
            timer,
            cursor: None,
            highlight: Vec::new(),
            generation: 0,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut PatternLibrary {
        &mut self.library
    }

    pub fn cursor(&self) -> Option<Cell> {
        self.cursor
    }

    /// Cells the active brush would toggle at the cursor.
    pub fn highlighted(&self) -> &[Cell] {
        &self.highlight
    }

    /// Steps run since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Viewport for a board drawn with its top-left corner at `origin`.
    pub fn viewport(&self, origin: (f32, f32)) -> Viewport {
        Viewport {
            origin,
            cell_px: self.config.cell_pixels() as f32,
            grid_size: self.grid.size(),
        }
    }

    /// Runs `notify` on the timer task after every tick.
    pub fn set_notify(&mut self, notify: impl Fn() + Send + Sync + 'static) {
        self.timer.set_notify(notify);
    }

    /// Stamps the active brush at `anchor`, toggling every covered cell.
    /// Returns how many cells were toggled.
    pub fn click(&mut self, anchor: Cell) -> usize {
        let targets: Vec<Cell> =
            patterns::project(anchor, self.library.current_offsets(), self.grid.size()).collect();
        for &cell in &targets {
            // project() only yields cells on the board
            if let Err(err) = self.grid.toggle(cell) {
                log::error!("Brush target rejected: {err}");
            }
        }
        log::debug!(
            "Stamped {:?} at ({}, {}): {} cells",
            self.library.current().name,
            anchor.col,
            anchor.row,
            targets.len()
        );
        targets.len()
    }

    /// Picks brush `index` from the catalog, wrapping past the end.
    pub fn select_pattern(&mut self, index: usize) {
        self.library.select(index);
        self.refresh_highlight();
    }

    /// Moves the brush preview to `anchor`.
    pub fn hover(&mut self, anchor: Cell) {
        if self.cursor == Some(anchor) {
            return;
        }
        self.cursor = Some(anchor);
        self.refresh_highlight();
    }

    /// Pointer left the board.
    pub fn leave(&mut self) {
        self.cursor = None;
        self.highlight.clear();
    }

    pub fn dispatch(&mut self, command: Command) -> Result<(), BoardError> {
        let result = match command {
            Command::NextPattern => {
                self.library.advance(Direction::Next);
                Ok(())
            }
            Command::PrevPattern => {
                self.library.advance(Direction::Prev);
                Ok(())
            }
            Command::Rotate => {
                self.library.rotate();
                Ok(())
            }
            Command::Reflect => {
                self.library.reflect();
                Ok(())
            }
            Command::CapturePattern => self.capture_pattern(),
            Command::DeletePattern => self.library.delete_pattern().map(drop),
            Command::ToggleRunning => {
                self.toggle_running();
                Ok(())
            }
            Command::Step => {
                self.step();
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::PlaceGun => self.place_gun(),
            Command::ExportLive => {
                self.export_live();
                Ok(())
            }
        };

        match &result {
            Ok(()) => log::debug!("{command:?}"),
            Err(err) => log::warn!("{command:?} rejected: {err}"),
        }
        // The brush may have changed shape under the cursor
        self.refresh_highlight();
        result
    }

    /// Runs one generation.
    pub fn step(&mut self) -> StepSummary {
        let summary = self.evolver.step(&mut self.grid);
        self.generation += 1;
        log::trace!(
            "Generation {}: {} live ({} born, {} died)",
            self.generation,
            self.grid.len(),
            summary.births,
            summary.deaths
        );
        summary
    }

    /// Runs one generation if the timer ticked since the last call.
    ///
    /// Ticks missed while the caller was busy or idle are not made up.
    pub fn pump(&mut self) -> bool {
        let ticked = self.timer.take_tick();
        if ticked {
            self.step();
        }
        ticked
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn toggle_running(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
        } else {
            self.timer.start();
        }
    }

    /// Stops the timer and empties the board.
    pub fn reset(&mut self) {
        self.timer.stop();
        self.grid.clear();
        self.generation = 0;
    }

    /// Sets the simulation speed in steps per second.
    pub fn set_speed(&mut self, steps_per_second: f32) {
        if !steps_per_second.is_finite() || steps_per_second <= 0.0 {
            log::warn!("Ignoring speed {steps_per_second}");
            return;
        }
        self.config.steps_per_second = steps_per_second;
        self.timer.set_period(speed_to_period(steps_per_second));
    }

    /// Switches to another grid size, which always resets the board.
    pub fn set_grid_size(&mut self, size: GridSize) {
        self.reset();
        self.config.grid_size = size;
        self.grid.resize(size.cells());
        self.leave();
        log::debug!("Grid resized to {0}x{0}", size.cells());
    }

    /// Adds the Gosper glider gun near the top-left corner. Cells that are
    /// already alive stay alive.
    pub fn place_gun(&mut self) -> Result<(), BoardError> {
        let cells = GOSPER_GUN
            .iter()
            .map(|&(dx, dy)| Cell::new(GUN_ORIGIN.col + dx, GUN_ORIGIN.row + dy))
            .filter(|&cell| self.grid.contains(cell))
            .collect::<Vec<_>>();
        for cell in cells {
            self.grid.set_alive(cell)?;
        }
        Ok(())
    }

    /// Adds the current live cells to the library as a new brush.
    ///
    /// Brush offsets are stamped up and to the left of the anchor, so the
    /// captured shape is stored turned by half a revolution; stamping the new
    /// brush then reproduces the board as it was.
    pub fn capture_pattern(&mut self) -> Result<(), BoardError> {
        let cells = self.grid.normalized_live_cells();
        let width = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        let offsets: Vec<Offset> = cells
            .iter()
            .map(|&(x, y)| (width - 1 - x, height - 1 - y))
            .collect();
        let pattern = self.library.add_pattern(&offsets)?;
        log::info!("Captured {} cells as {:?}", offsets.len(), pattern.name);
        Ok(())
    }

    /// Live cells normalized to their top-left corner, as a JSON array of
    /// `[dx, dy]` pairs.
    pub fn export_live(&self) -> String {
        let offsets = self.grid.normalized_live_cells();
        let json = serde_json::to_string(&offsets).unwrap_or_else(|_| String::from("[]"));
        log::info!("{json}");
        json
    }

    /// Paints live cells, then the brush preview on top.
    pub fn draw(&self, renderer: &mut impl Renderer) {
        let size = self.config.cell_pixels() as f32;
        renderer.clear();
        for tile in self.grid.tiles(size) {
            renderer.fill_tile(tile);
        }
        renderer.set_style(CellStyle::Highlight);
        for &cell in &self.highlight {
            renderer.fill_tile(Tile { cell, size });
        }
        renderer.set_style(CellStyle::Live);
    }

    fn refresh_highlight(&mut self) {
        self.highlight.clear();
        if let Some(anchor) = self.cursor {
            self.highlight
                .extend(patterns::project(anchor, self.library.current_offsets(), self.grid.size()));
        }
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("grid_size", &self.grid.size())
            .field("live", &self.grid.len())
            .field("pattern", &self.library.current().name)
            .field("generation", &self.generation)
            .field("timer", &self.timer)
            .finish()
    }
}
