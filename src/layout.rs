// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::atom::Atom;

/// Largest |z| still considered flat.
pub const FLAT_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Every atom lies in the z = 0 plane (a 2D depiction)
    TwoD,
    ThreeD,
}

/// Classify a set of coordinates as a flat depiction or a 3D structure.
///
/// Non-finite z values are ignored. An empty molecule is flat.
pub fn classify(atoms: &[Atom]) -> Layout {
    let max_z = atoms
        .iter()
        .map(|a| a.z.abs())
        .filter(|z| z.is_finite())
        .fold(0.0_f64, f64::max);

    if max_z < FLAT_EPSILON {
        Layout::TwoD
    } else {
        Layout::ThreeD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_and_spatial() {
        let flat = vec![
            Atom::new("C", [0.0, 0.0, 0.0]),
            Atom::new("C", [1.5, 0.0, 0.00005]),
        ];
        assert_eq!(classify(&flat), Layout::TwoD);

        let spatial = vec![
            Atom::new("C", [0.0, 0.0, 0.0]),
            Atom::new("C", [1.5, 0.0, -0.2]),
        ];
        assert_eq!(classify(&spatial), Layout::ThreeD);
        assert_eq!(classify(&[]), Layout::TwoD);
    }

    #[test]
    fn nan_does_not_make_a_molecule_3d() {
        let atoms = vec![Atom::new("C", [0.0, 0.0, f64::NAN])];
        assert_eq!(classify(&atoms), Layout::TwoD);
    }
}
