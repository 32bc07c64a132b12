// config.rs - Board configuration: canvas size, grid size choices, speed and colors

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Grid sizes offered by the size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridSize {
    #[serde(rename = "50")]
    S50,
    #[default]
    #[serde(rename = "100")]
    S100,
    #[serde(rename = "150")]
    S150,
    #[serde(rename = "200")]
    S200,
    #[serde(rename = "300")]
    S300,
}

impl GridSize {
    pub const ALL: [GridSize; 5] = [
        GridSize::S50,
        GridSize::S100,
        GridSize::S150,
        GridSize::S200,
        GridSize::S300,
    ];

    /// Cells per side.
    pub fn cells(self) -> usize {
        match self {
            GridSize::S50 => 50,
            GridSize::S100 => 100,
            GridSize::S150 => 150,
            GridSize::S200 => 200,
            GridSize::S300 => 300,
        }
    }

    /// Pixel size of one cell on a square canvas of `canvas_pixels`.
    pub fn cell_pixels(self, canvas_pixels: u32) -> u32 {
        (canvas_pixels as f32 / self.cells() as f32).round() as u32
    }
}

/// Tick period for a speed in steps per second.
pub fn speed_to_period(steps_per_second: f32) -> Duration {
    let ms = (1000.0 / steps_per_second).round().max(1.0);
    Duration::from_millis(ms as u64)
}

/// Top-level board configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Side length of the square drawing surface in pixels.
    pub canvas_pixels: u32,
    pub grid_size: GridSize,
    /// Initial simulation speed.
    pub steps_per_second: f32,
    /// Upper end of the speed slider.
    pub max_steps_per_second: f32,
    pub live_color: [u8; 3],
    pub highlight_color: [u8; 3],
    pub background_color: [u8; 3],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_pixels: 600,
            grid_size: GridSize::default(),
            steps_per_second: 100.0,
            max_steps_per_second: 100.0,
            live_color: [0x44, 0x44, 0x44],
            highlight_color: [0x33, 0x66, 0x99],
            background_color: [0xff, 0xff, 0xff],
        }
    }
}

impl BoardConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Every selectable grid size must get cells of at least one pixel
        if GridSize::ALL.iter().any(|size| size.cell_pixels(self.canvas_pixels) == 0) {
            return Err(ConfigError::InvalidCanvas(self.canvas_pixels));
        }
        for speed in [self.steps_per_second, self.max_steps_per_second] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::InvalidSpeed(speed));
            }
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        speed_to_period(self.steps_per_second)
    }

    pub fn cell_pixels(&self) -> u32 {
        self.grid_size.cell_pixels(self.canvas_pixels)
    }
}
