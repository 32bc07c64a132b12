//! Conway's Game of Life with stampable brushes.
//!
//! The crate holds everything a board needs apart from the window it is shown
//! in:
//!
//! - `grid`: live cells, kept both as a dense map and a sparse list
//! - `evolve`: the sparse B3/S23 step
//! - `patterns`: the brush catalog with rotate, reflect, add and delete
//! - `timer`: a cancellable periodic step timer on tokio
//! - `board`: one board instance tying the above to pointer and key input
//! - `render`: the drawing and pointer contracts a UI implements
//!
//! # Example
//!
//! ```rust,no_run
//! use stamp_life::{Board, BoardConfig, Cell, Command};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let mut board = Board::new(BoardConfig::default(), runtime.handle().clone());
//!
//! // Stamp a glider and let it fly for a few generations
//! board.dispatch(Command::NextPattern).unwrap();
//! board.click(Cell::new(10, 10));
//! for _ in 0..4 {
//!     board.step();
//! }
//! println!("{}", board.export_live());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod evolve;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod timer;

pub use board::{Board, Command};
pub use config::{BoardConfig, GridSize};
pub use error::{BoardError, ConfigError};
pub use evolve::{Evolver, StepSummary};
pub use grid::{Cell, GridState, Tile};
pub use patterns::{Direction, Offset, Pattern, PatternLibrary};
pub use render::{CellStyle, Renderer, Viewport};
pub use timer::StepTimer;
