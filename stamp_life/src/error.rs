// error.rs - Error types for board edits and configuration

use crate::grid::Cell;

/// Errors raised by grid edits and pattern library operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Cell ({}, {}) is outside the {size}x{size} grid", .cell.col, .cell.row)]
    OutOfBounds { cell: Cell, size: usize },
    #[error("The last pattern in the catalog cannot be deleted")]
    LastPattern,
    #[error("A pattern needs at least one cell")]
    EmptyPattern,
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Speed must be positive, got {0} steps/sec")]
    InvalidSpeed(f32),
    #[error("Canvas of {0} px is too small for the largest grid size")]
    InvalidCanvas(u32),
}
