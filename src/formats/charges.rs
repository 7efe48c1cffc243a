// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Reconciliation of atom-line charge codes with explicit charge and
//! isotope directives (`M  CHG`, `M  ISO`, `M  V30 CHG`).

use log::warn;

use crate::atom::Atom;

/// Decode the V2000 atom block charge column.
///
/// `4` (doublet radical) and unknown codes carry no charge.
pub fn decode_charge_code(code: i32) -> Option<i32> {
    match code {
        1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        5 => Some(-1),
        6 => Some(-2),
        7 => Some(-3),
        _ => None,
    }
}

/// Parse the `count idx value idx value ...` tail of a directive line, after
/// the `skip` leading tokens (`M CHG` is two tokens, `M V30 CHG` three).
///
/// Pairs past the end of the line, or that do not parse, are skipped.
pub fn parse_pairs(line: &str, skip: usize) -> Vec<(usize, i32)> {
    let mut tokens = line.split_whitespace().skip(skip);
    let Some(count) = tokens.next().and_then(|t| t.parse::<usize>().ok()) else {
        warn!("ignoring directive without an entry count: '{}'", line.trim());
        return Vec::new();
    };

    let rest: Vec<&str> = tokens.collect();
    let mut pairs = Vec::with_capacity(count.min(rest.len() / 2));
    for chunk in rest.chunks_exact(2).take(count) {
        match (chunk[0].parse::<usize>(), chunk[1].parse::<i32>()) {
            (Ok(index), Ok(value)) => pairs.push((index, value)),
            _ => warn!("ignoring malformed directive entry '{} {}'", chunk[0], chunk[1]),
        }
    }
    if pairs.len() < count {
        warn!(
            "directive announces {count} entries but only {} could be read: '{}'",
            pairs.len(),
            line.trim()
        );
    }
    pairs
}

/// Per-atom values staged while scanning a record and applied once the
/// whole record has been read, so the position of a directive relative to
/// the atom block does not matter.
///
/// Indices are the file's atom references (1-based in V2000, atom ids in
/// V3000); `resolve` maps them to positions in the atom list.
#[derive(Debug, Default)]
pub struct Directives {
    charges: Vec<(usize, i32)>,
    isotopes: Vec<(usize, i32)>,
}

impl Directives {
    pub fn new() -> Self {
        Directives::default()
    }

    pub fn stage_charges(&mut self, pairs: Vec<(usize, i32)>) {
        self.charges.extend(pairs);
    }

    pub fn stage_isotopes(&mut self, pairs: Vec<(usize, i32)>) {
        self.isotopes.extend(pairs);
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty() && self.isotopes.is_empty()
    }

    /// Apply every staged directive in file order, so the last one wins.
    pub fn apply<F>(&self, atoms: &mut [Atom], resolve: F)
    where
        F: Fn(usize) -> Option<usize>,
    {
        for &(reference, charge) in &self.charges {
            match resolve(reference).and_then(|i| atoms.get_mut(i)) {
                Some(atom) => atom.charge = charge,
                None => warn!("charge directive references unknown atom {reference}"),
            }
        }
        for &(reference, isotope) in &self.isotopes {
            match resolve(reference).and_then(|i| atoms.get_mut(i)) {
                Some(atom) => atom.isotope = Some(isotope),
                None => warn!("isotope directive references unknown atom {reference}"),
            }
        }
    }
}

/// Resolver for 1-based references.
pub fn one_based(reference: usize) -> Option<usize> {
    reference.checked_sub(1)
}
