// grid.rs - Grid state for Conway's Game of Life
//
// The board keeps two views of the same set of live cells: a dense occupancy
// map for O(1) lookups and a sparse list for O(live) iteration. Every mutation
// goes through this module so the two views cannot drift apart.

use crate::error::BoardError;
use crate::patterns::Offset;

/// Default board size used before any grid-size selection.
pub const DEFAULT_GRID_SIZE: usize = 100;

/// A board coordinate, `col` grows right and `row` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((col, row): (usize, usize)) -> Self {
        Self { col, row }
    }
}

/// A live cell paired with the pixel size it is drawn at.
///
/// Two tiles are equal when they cover the same cell, whatever their size.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub cell: Cell,
    pub size: f32,
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }
}

impl Eq for Tile {}

/// Square grid of cells with a companion list of the live ones.
#[derive(Debug, Clone)]
pub struct GridState {
    size: usize,
    // 0 = dead, k = alive and stored at live[k - 1]
    slots: Vec<u32>,
    live: Vec<Cell>,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl GridState {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            slots: vec![0; size * size],
            live: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// True when `cell` lies on the board.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col < self.size && cell.row < self.size
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.contains(cell) && self.slots[self.index(cell)] != 0
    }

    /// Live cells in list order.
    pub fn live_cells(&self) -> &[Cell] {
        &self.live
    }

    /// Live cells as drawable tiles of `size` pixels.
    pub fn tiles(&self, size: f32) -> impl Iterator<Item = Tile> + '_ {
        self.live.iter().map(move |&cell| Tile { cell, size })
    }

    /// Flips `cell` and returns whether it is alive afterwards.
    pub fn toggle(&mut self, cell: Cell) -> Result<bool, BoardError> {
        self.check(cell)?;
        let alive = if self.slots[self.index(cell)] == 0 {
            self.insert(cell);
            true
        } else {
            self.remove(cell);
            false
        };
        self.debug_check_cell(cell);
        Ok(alive)
    }

    /// Brings `cell` to life, leaving it alone if it already is.
    pub fn set_alive(&mut self, cell: Cell) -> Result<(), BoardError> {
        self.check(cell)?;
        if self.slots[self.index(cell)] == 0 {
            self.insert(cell);
        }
        self.debug_check_cell(cell);
        Ok(())
    }

    pub fn clear(&mut self) {
        for cell in self.live.drain(..) {
            let idx = cell.col * self.size + cell.row;
            self.slots[idx] = 0;
        }
    }

    /// Replaces the board with an empty one of `size` x `size` cells.
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.slots = vec![0; size * size];
        self.live.clear();
    }

    /// Live cells shifted so the bounding box starts at (0, 0).
    ///
    /// The output is the format `PatternLibrary::add_pattern` accepts.
    pub fn normalized_live_cells(&self) -> Vec<Offset> {
        let left = self.live.iter().map(|c| c.col).min().unwrap_or(0);
        let top = self.live.iter().map(|c| c.row).min().unwrap_or(0);
        self.live
            .iter()
            .map(|c| (c.col - left, c.row - top))
            .collect()
    }

    /// Swaps in the next generation.
    ///
    /// Every cell in `next` must be in bounds and listed once.
    pub(crate) fn commit_generation(&mut self, next: Vec<Cell>) {
        for cell in std::mem::replace(&mut self.live, next) {
            let idx = self.index(cell);
            self.slots[idx] = 0;
        }
        for (slot, &cell) in self.live.iter().enumerate() {
            let idx = cell.col * self.size + cell.row;
            debug_assert_eq!(self.slots[idx], 0, "duplicate cell {cell:?} in generation");
            self.slots[idx] = slot as u32 + 1;
        }
    }

    #[inline]
    pub(crate) fn index(&self, cell: Cell) -> usize {
        cell.col * self.size + cell.row
    }

    fn check(&self, cell: Cell) -> Result<(), BoardError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    fn insert(&mut self, cell: Cell) {
        let idx = self.index(cell);
        self.live.push(cell);
        self.slots[idx] = self.live.len() as u32;
    }

    fn remove(&mut self, cell: Cell) {
        let idx = self.index(cell);
        let slot = self.slots[idx] as usize - 1;
        debug_assert_eq!(self.live[slot], cell, "live list out of sync at {cell:?}");
        self.live.swap_remove(slot);
        self.slots[idx] = 0;
        // The former last entry now sits in `slot`
        if let Some(&moved) = self.live.get(slot) {
            let moved_idx = self.index(moved);
            self.slots[moved_idx] = slot as u32 + 1;
        }
    }

    // O(1) so it can run on every edit; the full scan is test-only
    fn debug_check_cell(&self, cell: Cell) {
        if cfg!(debug_assertions) {
            let slot = self.slots[self.index(cell)] as usize;
            let listed = slot.checked_sub(1).and_then(|i| self.live.get(i));
            assert!(
                slot == 0 || listed == Some(&cell),
                "occupancy disagrees with live list at {cell:?}"
            );
            assert!(self.live.len() <= self.slots.len(), "live list longer than the board");
        }
    }

    /// Checks the whole occupancy map against the live list.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (slot, &cell) in self.live.iter().enumerate() {
            assert_eq!(
                self.slots[self.index(cell)] as usize,
                slot + 1,
                "occupancy disagrees with live list at {cell:?}"
            );
        }
        let occupied = self.slots.iter().filter(|&&s| s != 0).count();
        assert_eq!(occupied, self.live.len(), "occupancy has stray live cells");
    }
}
