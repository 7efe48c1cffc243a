// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::atom::Atom;
use crate::bond::{Bond, BondPair};
use crate::error::CError;
use crate::inference::infer_bonds;
use crate::layout::{classify, Layout};
use crate::options::InferenceOptions;
use crate::property::Properties;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    #[default]
    V2000,
    V3000,
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatVersion::V2000 => write!(f, "V2000"),
            FormatVersion::V3000 => write!(f, "V3000"),
        }
    }
}

/// One record of an SDF/MOL file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub properties: Properties,
    pub title: Option<String>,
    pub format_version: FormatVersion,
}

impl Molecule {
    pub fn new(format_version: FormatVersion) -> Self {
        Molecule {
            format_version,
            ..Default::default()
        }
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.atoms.iter().map(Atom::position).collect()
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom)
    }

    /// Add `bond` if both of its ends are distinct atoms of this molecule.
    ///
    /// # Errors
    ///
    /// Returns [`CError::InvalidBond`] and leaves the molecule untouched
    /// otherwise.
    pub fn add_bond(&mut self, bond: Bond) -> Result<(), CError> {
        let natoms = self.size();
        if !bond.is_valid(natoms) {
            return Err(CError::InvalidBond {
                begin: bond.begin,
                end: bond.end,
                natoms,
            });
        }
        self.bonds.push(bond);
        Ok(())
    }

    /// Drop every bond that does not reference two distinct atoms, returning
    /// how many were removed.
    pub fn retain_valid_bonds(&mut self) -> usize {
        let natoms = self.size();
        let before = self.bonds.len();
        self.bonds.retain(|bond| bond.is_valid(natoms));
        before - self.bonds.len()
    }

    /// Canonical pairs of all the bonds currently present.
    pub fn bond_pairs(&self) -> BTreeSet<BondPair> {
        self.bonds.iter().map(Bond::pair).collect()
    }

    /// Number of bonds read from the file that touch atom `index`.
    pub fn explicit_degree(&self, index: usize) -> usize {
        self.bonds
            .iter()
            .filter(|b| !b.is_inferred() && (b.begin == index || b.end == index))
            .count()
    }

    pub fn layout(&self) -> Layout {
        classify(&self.atoms)
    }

    /// Append the coordination and bridge bonds inferred from the current
    /// bonds, returning how many were added.
    pub fn apply_inference(&mut self, options: &InferenceOptions) -> Result<usize, CError> {
        let additions = infer_bonds(&self.atoms, &self.bonds, options)?;
        let count = additions.len();
        self.bonds.extend(additions);
        Ok(count)
    }

    /// Drop the previously inferred bonds and infer them again, for example
    /// after the hidden elements changed.
    pub fn reinfer(&mut self, options: &InferenceOptions) -> Result<usize, CError> {
        options.validate()?;
        self.bonds.retain(|bond| !bond.is_inferred());
        self.apply_inference(options)
    }
}

impl Index<usize> for Molecule {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

impl IndexMut<usize> for Molecule {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.atoms[index]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::bond::BondSource;

    fn water() -> Molecule {
        let mut molecule = Molecule::new(FormatVersion::V2000);
        molecule.add_atom(Atom::new("O", [0.0, 0.0, 0.0]));
        molecule.add_atom(Atom::new("H", [0.96, 0.0, 0.0]));
        molecule.add_atom(Atom::new("H", [-0.24, 0.93, 0.0]));
        molecule.add_bond(Bond::new(0, 1, 1)).unwrap();
        molecule.add_bond(Bond::new(0, 2, 1)).unwrap();
        molecule
    }

    #[test]
    fn test_molecule_indexing() {
        let mut molecule = water();

        assert_eq!(molecule[0].symbol, "O");
        assert_eq!(molecule[1].symbol, "H");
        assert_approx_eq!(molecule[1].x, 0.96);

        molecule[1].x = 10.0;
        assert_approx_eq!(molecule.positions()[1][0], 10.0);
    }

    #[test]
    #[should_panic]
    fn test_molecule_indexing_out_of_bounds() {
        let molecule = Molecule::default();
        let _ = &molecule[0];
    }

    #[test]
    fn invalid_bonds_are_rejected() {
        let mut molecule = water();
        assert!(matches!(
            molecule.add_bond(Bond::new(0, 99, 1)),
            Err(CError::InvalidBond { natoms: 3, .. })
        ));
        assert!(molecule.add_bond(Bond::new(2, 2, 1)).is_err());
        assert_eq!(molecule.bonds.len(), 2);

        molecule.bonds.push(Bond::new(1, 7, 1));
        assert_eq!(molecule.retain_valid_bonds(), 1);
        assert_eq!(molecule.bonds.len(), 2);
    }

    #[test]
    fn degree_ignores_inferred_bonds() {
        let mut molecule = water();
        molecule.bonds.push(Bond {
            source: BondSource::InferredBridge,
            ..Bond::new(1, 2, 0)
        });
        assert_eq!(molecule.explicit_degree(0), 2);
        assert_eq!(molecule.explicit_degree(1), 1);
        assert_eq!(molecule.bond_pairs().len(), 3);
    }

    #[test]
    fn reinfer_replaces_inferred_bonds() {
        let mut molecule = Molecule::default();
        molecule.add_atom(Atom::new("B", [-0.9, 0.0, 0.0]));
        molecule.add_atom(Atom::new("B", [0.9, 0.0, 0.0]));
        molecule.add_atom(Atom::new("H", [0.0, 1.0, 0.0]));
        molecule.add_bond(Bond::new(0, 2, 1)).unwrap();
        molecule.add_bond(Bond::new(1, 2, 1)).unwrap();

        let options = InferenceOptions::default();
        assert_eq!(molecule.apply_inference(&options).unwrap(), 1);
        assert_eq!(molecule.bonds.len(), 3);
        assert_eq!(molecule.apply_inference(&options).unwrap(), 0);

        let visible = InferenceOptions::default().with_hydrogens_visible(true);
        assert_eq!(molecule.reinfer(&visible).unwrap(), 0);
        assert_eq!(molecule.bonds.len(), 2);

        assert_eq!(molecule.reinfer(&options).unwrap(), 1);
        assert!(molecule.bonds[2].is_bridge);
    }
}
