// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Metal to ligand bonds that structure files often leave out.
//!
//! Around every metal center the ligands are searched in a uniform grid
//! with cells as large as the cutoff. A ligand is bonded when it is closer
//! than `max(cutoff, closest * rel_factor)`, where `closest` is the distance
//! of the nearest ligand candidate: flat depictions squeeze real distances,
//! so the threshold follows the local scale of the drawing.

use log::trace;

use crate::atom::Atom;
use crate::bond::{Bond, BondSource};
use crate::connectivity::PairSet;
use crate::layout::{classify, Layout};
use crate::options::{CoordinationMode, InferenceOptions};
use crate::spatial::SpatialGrid;

/// Candidates closer than this are overlapping atoms, not ligands.
const MIN_DISTANCE: f64 = 1e-6;

fn is_metal(atom: &Atom, options: &InferenceOptions) -> bool {
    options.metal_set.contains(&atom.element_key())
}

/// Whether the coordination engine should run on this structure.
///
/// In [`CoordinationMode::Auto`] it runs for 3D structures, and for flat
/// ones when some metal has no bond at all in the file.
pub fn should_run(atoms: &[Atom], bonds: &[Bond], options: &InferenceOptions) -> bool {
    match options.coordination {
        CoordinationMode::Disabled => false,
        CoordinationMode::Always => true,
        CoordinationMode::Auto => {
            if classify(atoms) == Layout::ThreeD {
                return true;
            }
            let natoms = atoms.len();
            let mut degree = vec![0usize; natoms];
            for bond in bonds
                .iter()
                .filter(|b| b.source == BondSource::FromFile && b.is_valid(natoms))
            {
                degree[bond.begin] += 1;
                degree[bond.end] += 1;
            }
            atoms
                .iter()
                .zip(&degree)
                .any(|(atom, &d)| d == 0 && is_metal(atom, options))
        }
    }
}

/// Coordination bonds for every metal of `atoms`, in metal then ligand
/// index order. Pairs in `known` are skipped and new pairs are added to it.
///
/// `options.cutoff` must be positive, see [`InferenceOptions::validate`].
pub fn infer(atoms: &[Atom], known: &mut PairSet, options: &InferenceOptions) -> Vec<Bond> {
    let positions: Vec<[f64; 3]> = atoms.iter().map(Atom::position).collect();
    let grid = SpatialGrid::from_positions(&positions, options.cutoff);

    let mut bonds = Vec::new();
    for (i, metal) in atoms.iter().enumerate() {
        if !metal.has_finite_position() || !is_metal(metal, options) {
            continue;
        }

        let center = metal.point();
        let candidates: Vec<(usize, f64)> = grid
            .neighborhood(metal.position())
            .into_iter()
            .filter(|&j| j != i && !atoms[j].is_hydrogen())
            .map(|j| (j, (atoms[j].point() - center).norm()))
            .filter(|&(_, d)| d > MIN_DISTANCE)
            .collect();

        let Some(closest) = candidates.iter().map(|&(_, d)| d).reduce(f64::min) else {
            continue;
        };
        let threshold = options.cutoff.max(closest * options.rel_factor);

        for (j, distance) in candidates {
            if distance > threshold || known.contains(i, j) {
                continue;
            }
            let ligand = &atoms[j];
            if options.suppress_opposite_charge_coordination
                && metal.charge.signum() * ligand.charge.signum() < 0
            {
                trace!(
                    "not bonding {}{} to {}{}: opposite charges",
                    metal.symbol,
                    i + 1,
                    ligand.symbol,
                    j + 1
                );
                continue;
            }
            known.insert(i, j);
            trace!(
                "coordination bond {}{}-{}{} at {distance:.3}",
                metal.symbol,
                i + 1,
                ligand.symbol,
                j + 1
            );
            bonds.push(Bond::coordination(i, j));
        }
    }
    bonds
}
