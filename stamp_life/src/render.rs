// render.rs - Drawing and pointer contracts between the board and a UI

use crate::grid::{Cell, Tile};

/// Visual treatment for filled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Live,
    Highlight,
}

/// Drawing surface the board paints onto.
///
/// The board calls `clear` once per frame, then `fill_tile` for each cell in
/// whatever style was last set. It always leaves `CellStyle::Live` active.
pub trait Renderer {
    fn clear(&mut self);
    fn set_style(&mut self, style: CellStyle);
    fn fill_tile(&mut self, tile: Tile);
}

/// Maps pointer positions in surface space to board cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: (f32, f32),
    pub cell_px: f32,
    pub grid_size: usize,
}

impl Viewport {
    /// Cell under `pos`, clamped onto the board.
    pub fn cell_at(&self, pos: (f32, f32)) -> Cell {
        let max = self.grid_size.saturating_sub(1) as f32;
        let axis = |p: f32, o: f32| ((p - o) / self.cell_px).clamp(0.0, max).floor() as usize;
        Cell::new(axis(pos.0, self.origin.0), axis(pos.1, self.origin.1))
    }

    /// Top-left corner of `cell` in surface space.
    pub fn cell_origin(&self, cell: Cell) -> (f32, f32) {
        (
            self.origin.0 + cell.col as f32 * self.cell_px,
            self.origin.1 + cell.row as f32 * self.cell_px,
        )
    }

    /// Side length of the whole board in pixels.
    pub fn extent(&self) -> f32 {
        self.cell_px * self.grid_size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            origin: (10.0, 20.0),
            cell_px: 6.0,
            grid_size: 100,
        }
    }

    #[test]
    fn test_cell_at_floors() {
        let vp = viewport();
        assert_eq!(vp.cell_at((10.0, 20.0)), Cell::new(0, 0));
        assert_eq!(vp.cell_at((15.9, 25.9)), Cell::new(0, 0));
        assert_eq!(vp.cell_at((16.0, 32.5)), Cell::new(1, 2));
    }

    #[test]
    fn test_cell_at_clamps_outside() {
        let vp = viewport();
        assert_eq!(vp.cell_at((-50.0, 0.0)), Cell::new(0, 0));
        assert_eq!(vp.cell_at((10_000.0, 619.9)), Cell::new(99, 99));
        assert_eq!(vp.cell_at((609.0, 30.0)), Cell::new(99, 1));
    }

    #[test]
    fn test_cell_origin_and_extent() {
        let vp = viewport();
        assert_eq!(vp.cell_origin(Cell::new(2, 3)), (22.0, 38.0));
        assert_eq!(vp.extent(), 600.0);
    }
}
