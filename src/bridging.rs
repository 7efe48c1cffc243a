// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Three-center bonds through hidden atoms.
//!
//! When an atom that is not rendered (a hydrogen, usually) is bonded to two
//! or more rendered atoms, those atoms get a direct bond so that the bridge
//! stays visible, as in the B-H-B bridges of diborane.

use std::collections::BTreeSet;

use log::trace;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::connectivity::{Adjacency, PairSet};

/// Is `atom` in the hidden set (uppercase symbols)? Deuterium and tritium
/// are hidden along with hydrogen.
pub fn is_hidden(atom: &Atom, hidden: &BTreeSet<String>) -> bool {
    hidden.contains(&atom.element_key()) || (atom.is_hydrogen() && hidden.contains("H"))
}

/// Bridge bonds between every pair of visible neighbors of each hidden
/// atom, skipping pairs already in `known` and recording the new ones.
pub fn infer(
    atoms: &[Atom],
    bonds: &[Bond],
    known: &mut PairSet,
    hidden: &BTreeSet<String>,
) -> Vec<Bond> {
    if hidden.is_empty() {
        return Vec::new();
    }
    let hidden_atoms: Vec<bool> = atoms.iter().map(|a| is_hidden(a, hidden)).collect();
    let adjacency = Adjacency::new(atoms.len(), bonds);

    let mut bridges = Vec::new();
    for center in (0..atoms.len()).filter(|&i| hidden_atoms[i]) {
        let heavy: Vec<usize> = adjacency
            .neighbors(center)
            .iter()
            .copied()
            .filter(|&n| !hidden_atoms[n])
            .collect();
        if heavy.len() < 2 {
            continue;
        }

        for (k, &a) in heavy.iter().enumerate() {
            for &b in &heavy[k + 1..] {
                if known.insert(a, b) {
                    trace!(
                        "bridge bond {}{}-{}{} through {}{}",
                        atoms[a].symbol,
                        a + 1,
                        atoms[b].symbol,
                        b + 1,
                        atoms[center].symbol,
                        center + 1
                    );
                    bridges.push(Bond::bridge(a, b));
                }
            }
        }
    }
    bridges
}
