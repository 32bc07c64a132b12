// evolve.rs - Sparse Game of Life step
//
// Only live cells and their neighbors are visited, so a step costs
// O(live cells) no matter how large the board is. The board has hard edges:
// cells past the border are neither counted nor born.

use crate::grid::{Cell, GridState};

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Conway's B3/S23 rule.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// What one generation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub survivors: usize,
    pub births: usize,
    pub deaths: usize,
}

/// Steps a grid forward, reusing its neighbor-count buffers between calls.
#[derive(Debug, Default)]
pub struct Evolver {
    counts: Vec<u8>,
    // Indices of `counts` that are non-zero during a step
    touched: Vec<usize>,
}

impl Evolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances `grid` by one generation.
    pub fn step(&mut self, grid: &mut GridState) -> StepSummary {
        let size = grid.size();
        if self.counts.len() != size * size {
            self.counts = vec![0; size * size];
        }
        self.touched.clear();

        for &cell in grid.live_cells() {
            for (dc, dr) in NEIGHBORS {
                let (Some(col), Some(row)) =
                    (cell.col.checked_add_signed(dc), cell.row.checked_add_signed(dr))
                else {
                    continue;
                };
                if col >= size || row >= size {
                    continue;
                }
                let idx = col * size + row;
                if self.counts[idx] == 0 {
                    self.touched.push(idx);
                }
                self.counts[idx] += 1;
            }
        }

        let mut next: Vec<Cell> = grid
            .live_cells()
            .iter()
            .copied()
            .filter(|&cell| next_state(true, self.counts[grid.index(cell)]))
            .collect();
        let survivors = next.len();

        for &idx in &self.touched {
            let cell = Cell::new(idx / size, idx % size);
            if !grid.is_alive(cell) && next_state(false, self.counts[idx]) {
                next.push(cell);
            }
            self.counts[idx] = 0;
        }

        let summary = StepSummary {
            survivors,
            births: next.len() - survivors,
            deaths: grid.len() - survivors,
        };
        grid.commit_generation(next);
        summary
    }
}

/// One-off step without keeping the scratch buffers around.
pub fn step(grid: &mut GridState) -> StepSummary {
    Evolver::new().step(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn grid_with(size: usize, cells: &[(usize, usize)]) -> GridState {
        let mut grid = GridState::new(size);
        for &c in cells {
            grid.toggle(c.into()).unwrap();
        }
        grid
    }

    fn live_set(grid: &GridState) -> BTreeSet<(usize, usize)> {
        grid.live_cells().iter().map(|c| (c.col, c.row)).collect()
    }

    fn set(cells: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
        cells.iter().copied().collect()
    }

    // Full-board recount used as a reference for the sparse step
    fn dense_step(grid: &GridState) -> BTreeSet<(usize, usize)> {
        let n = grid.size() as isize;
        let mut out = BTreeSet::new();
        for col in 0..n {
            for row in 0..n {
                let count = NEIGHBORS
                    .iter()
                    .filter(|(dc, dr)| {
                        let (c, r) = (col + dc, row + dr);
                        c >= 0 && r >= 0 && c < n && r < n
                            && grid.is_alive(Cell::new(c as usize, r as usize))
                    })
                    .count() as u8;
                let alive = grid.is_alive(Cell::new(col as usize, row as usize));
                if next_state(alive, count) {
                    out.insert((col as usize, row as usize));
                }
            }
        }
        out
    }

    #[test]
    fn test_block_is_still_life() {
        let block = [(5, 5), (5, 6), (6, 5), (6, 6)];
        let mut grid = grid_with(20, &block);
        let summary = step(&mut grid);
        assert_eq!(live_set(&grid), set(&block));
        assert_eq!(summary, StepSummary { survivors: 4, births: 0, deaths: 0 });
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = [(4, 5), (5, 5), (6, 5)];
        let vertical = [(5, 4), (5, 5), (5, 6)];
        let mut grid = grid_with(20, &horizontal);
        let mut evolver = Evolver::new();

        evolver.step(&mut grid);
        assert_eq!(live_set(&grid), set(&vertical));
        evolver.step(&mut grid);
        assert_eq!(live_set(&grid), set(&horizontal));
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = grid_with(10, &[(0, 0)]);
        let summary = step(&mut grid);
        assert!(grid.is_empty());
        assert!(!grid.is_alive(Cell::new(0, 0)));
        assert_eq!(summary.deaths, 1);
    }

    #[test]
    fn test_no_wraparound_at_edges() {
        // A blinker lying on the top edge loses the cell that would sit above
        let mut grid = grid_with(10, &[(4, 0), (5, 0), (6, 0)]);
        step(&mut grid);
        assert_eq!(live_set(&grid), set(&[(5, 0), (5, 1)]));

        // Vertical blinker on the left edge of a 3-wide board
        let mut grid = grid_with(3, &[(0, 0), (0, 1), (0, 2)]);
        step(&mut grid);
        assert_eq!(live_set(&grid), set(&[(0, 1), (1, 1)]));
    }

    #[test]
    fn test_corner_block_is_stable() {
        let corner = [(8, 8), (8, 9), (9, 8), (9, 9)];
        let mut grid = grid_with(10, &corner);
        step(&mut grid);
        assert_eq!(live_set(&grid), set(&corner));
    }

    #[test]
    fn test_glider_moves_diagonally() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = grid_with(20, &glider);
        let mut evolver = Evolver::new();
        for _ in 0..4 {
            evolver.step(&mut grid);
        }
        let shifted: Vec<_> = glider.iter().map(|&(c, r)| (c + 1, r + 1)).collect();
        assert_eq!(live_set(&grid), set(&shifted));
    }

    #[test]
    fn test_evolver_follows_resize() {
        let mut evolver = Evolver::new();
        let mut grid = grid_with(10, &[(4, 5), (5, 5), (6, 5)]);
        evolver.step(&mut grid);

        grid.resize(40);
        for c in [(30, 31), (31, 31), (32, 31)] {
            grid.toggle(c.into()).unwrap();
        }
        evolver.step(&mut grid);
        assert_eq!(live_set(&grid), set(&[(31, 30), (31, 31), (31, 32)]));
    }

    proptest! {
        #[test]
        fn prop_sparse_matches_dense(cells in prop::collection::vec((0usize..12, 0usize..12), 0..60)) {
            let mut grid = GridState::new(12);
            for (c, r) in cells {
                grid.set_alive(Cell::new(c, r)).unwrap();
            }
            let expected = dense_step(&grid);
            step(&mut grid);
            grid.assert_consistent();
            prop_assert_eq!(live_set(&grid), expected);
        }

        #[test]
        fn prop_step_is_deterministic(cells in prop::collection::vec((0usize..16, 0usize..16), 0..80)) {
            let mut a = GridState::new(16);
            for (c, r) in cells {
                a.set_alive(Cell::new(c, r)).unwrap();
            }
            let mut b = a.clone();
            step(&mut a);
            step(&mut b);
            prop_assert_eq!(live_set(&a), live_set(&b));
        }
    }
}
