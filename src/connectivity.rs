// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::BTreeSet;

use crate::bond::{Bond, BondPair};

/// Which atom is bonded to which one, rebuilt from a bond list whenever it
/// is needed.
#[derive(Debug, Default)]
pub struct Adjacency {
    bonded_to: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Bonds referencing atoms outside `0..natoms`, or an atom and itself,
    /// are left out.
    pub fn new(natoms: usize, bonds: &[Bond]) -> Self {
        let mut bonded_to = vec![Vec::new(); natoms];
        for bond in bonds.iter().filter(|b| b.is_valid(natoms)) {
            bonded_to[bond.begin].push(bond.end);
            bonded_to[bond.end].push(bond.begin);
        }
        for neighbors in &mut bonded_to {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Adjacency { bonded_to }
    }

    /// Sorted, distinct neighbors of atom `i`.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.bonded_to.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, i: usize) -> usize {
        self.neighbors(i).len()
    }
}

/// Set of already connected atom pairs, shared by the inference engines so
/// that no pair is ever bonded twice.
#[derive(Debug, Default, Clone)]
pub struct PairSet(BTreeSet<BondPair>);

impl PairSet {
    pub fn from_bonds(bonds: &[Bond]) -> Self {
        PairSet(bonds.iter().map(Bond::pair).collect())
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.0.contains(&BondPair::new(i, j))
    }

    /// Record the pair, returning `false` if it was already there.
    pub fn insert(&mut self, i: usize, j: usize) -> bool {
        self.0.insert(BondPair::new(i, j))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_skips_invalid_bonds() {
        let bonds = [
            Bond::new(0, 1, 1),
            Bond::new(2, 1, 1),
            Bond::new(1, 0, 2),
            Bond::new(1, 9, 1),
            Bond::new(2, 2, 1),
        ];
        let adjacency = Adjacency::new(3, &bonds);
        assert_eq!(adjacency.neighbors(1), [0, 2]);
        assert_eq!(adjacency.neighbors(0), [1]);
        assert_eq!(adjacency.degree(2), 1);
        assert!(adjacency.neighbors(9).is_empty());
    }

    #[test]
    fn pairs_are_canonical() {
        let mut pairs = PairSet::from_bonds(&[Bond::new(3, 1, 1)]);
        assert!(pairs.contains(1, 3));
        assert!(!pairs.insert(1, 3));
        assert!(pairs.insert(4, 2));
        assert!(pairs.contains(2, 4));
        assert_eq!(pairs.len(), 2);
    }
}
