// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Uniform bucket grid over atom positions, for neighbor searches within a
//! cutoff.

use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// Divides space into cubic cells of side `cell_size` and stores the atom
/// indices falling in each of them.
#[derive(Debug)]
pub struct SpatialGrid {
    inv_cell_size: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

impl SpatialGrid {
    /// # Panics
    ///
    /// Panics if `cell_size` is not a finite positive number.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive"
        );
        SpatialGrid {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Grid over `positions`, skipping non-finite ones. Atom indices are
    /// positions in the slice.
    pub fn from_positions(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.iter().enumerate() {
            if pos.iter().all(|c| c.is_finite()) {
                grid.insert(idx, *pos);
            }
        }
        grid
    }

    fn cell_of(&self, pos: [f64; 3]) -> Cell {
        (
            (pos[0] * self.inv_cell_size).floor() as i64,
            (pos[1] * self.inv_cell_size).floor() as i64,
            (pos[2] * self.inv_cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        let cell = self.cell_of(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Indices stored in the cell of `pos` and its 26 neighbors, sorted.
    ///
    /// Every point closer than one cell size to `pos` is included, farther
    /// points may be.
    pub fn neighborhood(&self, pos: [f64; 3]) -> Vec<usize> {
        let (cx, cy, cz) = self.cell_of(pos);
        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    if let Some(indices) = self.cells.get(&cell) {
                        found.extend_from_slice(indices);
                    }
                }
            }
        }
        // cells are visited in a fixed order, but a sorted output does not
        // depend on the bucketing at all
        found.sort_unstable();
        found.dedup();
        found
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_covers_the_cutoff() {
        let positions = [
            [0.0, 0.0, 0.0],
            [2.9, 0.0, 0.0],
            [-2.9, -2.9, 0.0],
            [9.0, 0.0, 0.0],
            [f64::NAN, 0.0, 0.0],
        ];
        let grid = SpatialGrid::from_positions(&positions, 3.0);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.neighborhood([0.0, 0.0, 0.0]), [0, 1, 2]);
        assert_eq!(grid.neighborhood([9.5, 0.5, 0.5]), [3]);
        assert!(grid.neighborhood([-50.0, 0.0, 0.0]).is_empty());
    }

    #[test]
    fn neighborhood_matches_brute_force() {
        // points on a skewed lattice, compared against all pairs
        let positions: Vec<[f64; 3]> = (0..125)
            .map(|i| {
                let (a, b, c) = ((i % 5) as f64, ((i / 5) % 5) as f64, (i / 25) as f64);
                [1.7 * a + 0.3 * b, 1.9 * b - 0.2 * c, 2.1 * c + 0.1 * a]
            })
            .collect();
        let cutoff = 2.5;
        let grid = SpatialGrid::from_positions(&positions, cutoff);

        for (i, p) in positions.iter().enumerate() {
            let candidates = grid.neighborhood(*p);
            for (j, q) in positions.iter().enumerate() {
                let d2: f64 = (0..3).map(|k| (p[k] - q[k]).powi(2)).sum();
                if d2 <= cutoff * cutoff {
                    assert!(candidates.contains(&j), "{i} misses {j}");
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "cell size must be positive")]
    fn zero_cell_size() {
        let _ = SpatialGrid::new(0.0);
    }
}
