// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use log::debug;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::connectivity::PairSet;
use crate::error::CError;
use crate::options::InferenceOptions;
use crate::{bridging, coordination};

/// Bonds to add to `bonds`: coordination bonds first, then bridge bonds.
///
/// Nothing is mutated; the caller appends the result. Bridges are searched
/// over the file bonds and the coordination bonds just inferred, and no atom
/// pair is bonded twice across `bonds` and the result. Invalid entries of
/// `bonds` are ignored.
///
/// # Errors
///
/// Returns [`CError::InvalidOption`] if the options do not validate.
pub fn infer_bonds(
    atoms: &[Atom],
    bonds: &[Bond],
    options: &InferenceOptions,
) -> Result<Vec<Bond>, CError> {
    options.validate()?;

    let natoms = atoms.len();
    let valid: Vec<Bond> = bonds.iter().filter(|b| b.is_valid(natoms)).cloned().collect();
    let mut known = PairSet::from_bonds(&valid);
    let mut additions = Vec::new();

    if coordination::should_run(atoms, &valid, options) {
        additions.extend(coordination::infer(atoms, &mut known, options));
    }

    if options.bridging {
        let mut all = valid;
        all.extend(additions.iter().cloned());
        let hidden = options.hidden_set();
        additions.extend(bridging::infer(atoms, &all, &mut known, &hidden));
    }

    if !additions.is_empty() {
        debug!("inferred {} bond(s)", additions.len());
    }
    Ok(additions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondSource;
    use crate::options::CoordinationMode;

    #[test]
    fn bridges_see_coordination_bonds() {
        // a chloride bridging two metals, only one Ru-Cl bond is in the file
        let atoms = vec![
            Atom::new("Ru", [-2.2, 0.0, 0.0]),
            Atom::new("Ru", [2.2, 0.0, 0.5]),
            Atom::new("Cl", [0.0, 0.5, 0.0]),
        ];
        let bonds = vec![Bond::new(0, 2, 1)];
        let options = InferenceOptions::default().with_hidden_elements(&["Cl"]);
        let additions = infer_bonds(&atoms, &bonds, &options).unwrap();

        let kinds: Vec<_> = additions
            .iter()
            .map(|b| (b.begin, b.end, b.source))
            .collect();
        assert_eq!(
            kinds,
            [
                (1, 2, BondSource::InferredCoordination),
                (0, 1, BondSource::InferredBridge),
            ]
        );

        let options = options.with_coordination(CoordinationMode::Disabled);
        assert!(infer_bonds(&atoms, &bonds, &options).unwrap().is_empty());
    }

    #[test]
    fn no_duplicates_between_engines() {
        // running again on the output adds nothing
        let atoms = vec![
            Atom::new("B", [-0.9, 0.0, 0.0]),
            Atom::new("B", [0.9, 0.0, 0.0]),
            Atom::new("H", [0.0, 1.0, 0.0]),
        ];
        let mut bonds = vec![Bond::new(0, 2, 1), Bond::new(1, 2, 1), Bond::new(0, 7, 1)];
        let options = InferenceOptions::default();

        let additions = infer_bonds(&atoms, &bonds, &options).unwrap();
        assert_eq!(additions.len(), 1);
        assert!(additions[0].is_bridge);

        bonds.extend(additions);
        assert!(infer_bonds(&atoms, &bonds, &options).unwrap().is_empty());
    }

    #[test]
    fn visible_hydrogens_disable_bridges() {
        let atoms = vec![
            Atom::new("B", [-0.9, 0.0, 0.0]),
            Atom::new("B", [0.9, 0.0, 0.0]),
            Atom::new("H", [0.0, 1.0, 0.0]),
        ];
        let bonds = vec![Bond::new(0, 2, 1), Bond::new(1, 2, 1)];
        let options = InferenceOptions::default().with_hydrogens_visible(true);
        assert!(infer_bonds(&atoms, &bonds, &options).unwrap().is_empty());
    }

    #[test]
    fn invalid_options() {
        let options = InferenceOptions::default().with_cutoff(-1.0);
        assert!(infer_bonds(&[], &[], &options).is_err());
    }
}
