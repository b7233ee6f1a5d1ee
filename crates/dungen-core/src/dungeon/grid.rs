//! Fixed-size 2D grids
//!
//! Stored column-major (`cells[x][y]`) like the level cell arrays, and used
//! for every per-cell layer of a dungeon.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A `columns × rows` array of copyable cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<T>>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(columns: usize, rows: usize, fill: T) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![fill; rows]; columns],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check if a signed coordinate falls inside the grid
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }

    /// Get a cell, or None outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.cells.get(x).and_then(|column| column.get(y)).copied()
    }

    /// Iterate over `(x, y, value)` in scan order: ascending x, then y
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, column)| column.iter().enumerate().map(move |(y, &v)| (x, y, v)))
    }

    /// Build a same-sized grid by mapping every cell
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            columns: self.columns,
            rows: self.rows,
            cells: self
                .cells
                .iter()
                .map(|column| column.iter().map(|&v| f(v)).collect())
                .collect(),
        }
    }

    /// Count cells matching a predicate
    pub fn count(&self, f: impl Fn(T) -> bool) -> usize {
        self.iter().filter(|&(_, _, v)| f(v)).count()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.cells[x][y]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.cells[x][y]
    }
}
