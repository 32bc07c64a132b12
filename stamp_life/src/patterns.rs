// patterns.rs - Brush catalog: stampable cell patterns and their transforms

use std::collections::HashSet;

use crate::error::BoardError;
use crate::grid::Cell;

/// Cell position relative to a pattern's top-left corner, as (dx, dy).
pub type Offset = (usize, usize);

/// Built-in brush as written in the table below.
struct Builtin {
    name: &'static str,
    cells: &'static [Offset],
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "Cell",
        cells: &[(0, 0)],
    },
    Builtin {
        name: "Glider",
        cells: &[(2, 0), (2, 1), (2, 2), (1, 2), (0, 1)],
    },
    Builtin {
        name: "Square",
        cells: &[
            (0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0), (2, 0), (2, 1),
            (2, 2), (3, 0), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (0, 3),
        ],
    },
    Builtin {
        name: "Gosper glider gun",
        cells: GOSPER_GUN,
    },
    Builtin {
        name: "Spark",
        cells: &[
            (2, 3), (1, 4), (2, 2), (0, 4), (2, 0), (2, 1), (2, 4), (0, 3),
            (1, 0), (1, 1), (1, 2), (1, 5), (3, 1), (3, 2), (3, 3),
        ],
    },
];

/// Gosper glider gun, also placed directly by the "gun" action.
pub const GOSPER_GUN: &[Offset] = &[
    // Left block
    (0, 4), (0, 5), (1, 5), (1, 4),
    // Left ship
    (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8), (13, 2),
    (13, 8), (14, 5), (15, 3), (15, 7), (16, 6), (16, 5), (16, 4), (17, 5),
    // Right ship
    (20, 4), (21, 4), (20, 3), (21, 3), (20, 2), (21, 2), (22, 1), (22, 5),
    (24, 5), (24, 6), (24, 0), (24, 1),
    // Right block
    (34, 2), (35, 2), (35, 3), (34, 3),
];

/// A named set of cell offsets inside a `width` x `height` box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    width: usize,
    height: usize,
    offsets: Vec<Offset>,
}

impl Pattern {
    /// Builds a pattern from arbitrary coordinates, shifting them so the
    /// tight bounding box starts at (0, 0).
    pub fn from_cells(name: impl Into<String>, cells: &[Offset]) -> Result<Self, BoardError> {
        let left = cells.iter().map(|&(x, _)| x).min().ok_or(BoardError::EmptyPattern)?;
        let top = cells.iter().map(|&(_, y)| y).min().ok_or(BoardError::EmptyPattern)?;
        let right = cells.iter().map(|&(x, _)| x).max().ok_or(BoardError::EmptyPattern)?;
        let bottom = cells.iter().map(|&(_, y)| y).max().ok_or(BoardError::EmptyPattern)?;

        // Repeated cells would toggle twice when stamped
        let mut seen = HashSet::new();
        let offsets = cells
            .iter()
            .map(|&(x, y)| (x - left, y - top))
            .filter(|o| seen.insert(*o))
            .collect();

        Ok(Self {
            name: name.into(),
            width: right - left + 1,
            height: bottom - top + 1,
            offsets,
        })
    }

    /// Bounding box as (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Quarter turn inside the bounding box.
    pub fn rotate(&mut self) {
        let h = self.height;
        for o in &mut self.offsets {
            *o = (h - 1 - o.1, o.0);
        }
        std::mem::swap(&mut self.width, &mut self.height);
    }

    /// Left-right mirror inside the bounding box.
    pub fn reflect(&mut self) {
        let w = self.width;
        for o in &mut self.offsets {
            o.0 = w - 1 - o.0;
        }
    }
}

/// Board cells covered when `offsets` is stamped with its reference corner at
/// `anchor`. Each offset lands at `anchor - offset`, so the shape extends up
/// and to the left of the anchor. Targets that fall off the board are skipped.
pub fn project<'a>(
    anchor: Cell,
    offsets: &'a [Offset],
    grid_size: usize,
) -> impl Iterator<Item = Cell> + 'a {
    offsets.iter().filter_map(move |&(dx, dy)| {
        let col = anchor.col.checked_sub(dx)?;
        let row = anchor.row.checked_sub(dy)?;
        (col < grid_size && row < grid_size).then_some(Cell { col, row })
    })
}

/// Direction for cycling through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Ordered brush catalog with a wrapping selection.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    catalog: Vec<Pattern>,
    selected: usize,
    added: usize,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternLibrary {
    /// The catalog every board starts with.
    pub fn builtin() -> Self {
        let catalog = BUILTINS
            .iter()
            .filter_map(|b| Pattern::from_cells(b.name, b.cells).ok())
            .collect();
        Self {
            catalog,
            selected: 0,
            added: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.catalog
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &Pattern {
        &self.catalog[self.selected]
    }

    pub fn current_offsets(&self) -> &[Offset] {
        self.current().offsets()
    }

    pub fn advance(&mut self, direction: Direction) {
        let n = self.catalog.len();
        self.selected = match direction {
            Direction::Next => (self.selected + 1) % n,
            Direction::Prev => (self.selected + n - 1) % n,
        };
    }

    /// Selects `index`, wrapping past the end of the catalog.
    pub fn select(&mut self, index: usize) {
        self.selected = index % self.catalog.len();
    }

    pub fn rotate(&mut self) {
        self.catalog[self.selected].rotate();
    }

    pub fn reflect(&mut self) {
        self.catalog[self.selected].reflect();
    }

    /// Appends a pattern captured from `cells` and selects it.
    pub fn add_pattern(&mut self, cells: &[Offset]) -> Result<&Pattern, BoardError> {
        self.added += 1;
        let name = format!("Custom {}", self.added);
        self.add_named(name, cells)
    }

    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        cells: &[Offset],
    ) -> Result<&Pattern, BoardError> {
        let pattern = Pattern::from_cells(name, cells)?;
        log::debug!(
            "Added pattern {:?} ({}x{}, {} cells)",
            pattern.name,
            pattern.width,
            pattern.height,
            pattern.offsets.len()
        );
        self.catalog.push(pattern);
        self.selected = self.catalog.len() - 1;
        Ok(&self.catalog[self.selected])
    }

    /// Removes the selected pattern. The catalog always keeps at least one.
    pub fn delete_pattern(&mut self) -> Result<Pattern, BoardError> {
        if self.catalog.len() <= 1 {
            return Err(BoardError::LastPattern);
        }
        let removed = self.catalog.remove(self.selected);
        self.selected %= self.catalog.len();
        log::debug!("Deleted pattern {:?}", removed.name);
        Ok(removed)
    }
}
