// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use nalgebra::Point3;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Element symbol as written in the file, capitalized (`Cl`, `Fe`).
    pub symbol: String,
    /// Formal charge
    pub charge: i32,
    pub isotope: Option<i32>,
}

impl Atom {
    pub fn new(symbol: &str, position: [f64; 3]) -> Self {
        Self {
            x: position[0],
            y: position[1],
            z: position[2],
            symbol: canonical_symbol(symbol),
            charge: 0,
            isotope: None,
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Uppercased symbol, the key used by every element lookup.
    pub fn element_key(&self) -> String {
        self.symbol.to_ascii_uppercase()
    }

    pub fn is_hydrogen(&self) -> bool {
        // deuterium and tritium are usually written as their own symbol
        matches!(self.element_key().as_str(), "H" | "D" | "T")
    }

    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// `CL` / `cl` / `Cl` all become `Cl`.
pub(crate) fn canonical_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
