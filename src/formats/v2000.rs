// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! MDL V2000 connection tables.
//!
//! Two readers share the same block layout. [`read_strict`] follows the
//! fixed-column MDL convention to the letter and fails on the first
//! malformed line. [`read_resilient`] locates the counts line by pattern,
//! prefers whitespace tokens for atoms and fixed columns for bonds, and
//! falls back to the other strategy whenever one of them fails.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::atom::Atom;
use crate::bond::{Bond, BondStereo};
use crate::error::CError;
use crate::formats::charges::{decode_charge_code, one_based, Directives};
use crate::formats::sdf::read_trailer;
use crate::molecule::{FormatVersion, Molecule};

static COUNTS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?\d+\s+-?\d+").expect("counts line pattern is valid")
});

/// Fixed-width field `[start, end)` of `line`, empty when the line is
/// shorter than `start` or the range does not fall on char boundaries.
pub(crate) fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn parse_field<T: std::str::FromStr>(line: &str, start: usize, end: usize) -> Option<T> {
    field(line, start, end).trim().parse::<T>().ok()
}

fn parse_finite(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lines of the properties block and beyond can never be atom or bond lines.
fn is_block_terminator(line: &str) -> bool {
    line.starts_with("M  ") || line.starts_with('>')
}

/// The record title, the third line above the counts line.
fn title(lines: &[&str], counts_index: usize) -> Option<String> {
    let title = lines.get(counts_index.checked_sub(3)?)?.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Read a record following the MDL fixed-column layout: three header
/// lines, the counts line, then the atom and bond blocks.
///
/// Bonds that do not reference two distinct atoms are dropped.
///
/// # Errors
///
/// Returns [`CError::Parse`] for a missing header, unreadable counts, a
/// truncated or malformed atom or bond block.
pub fn read_strict(text: &str) -> Result<Molecule, CError> {
    let lines: Vec<&str> = text.lines().collect();
    let counts_line = lines
        .get(3)
        .ok_or_else(|| CError::parse("V2000", lines.len(), "missing counts line"))?;
    if counts_line.contains("V3000") {
        return Err(CError::parse("V2000", 4, "this is a V3000 record"));
    }

    let natoms: usize = parse_field(counts_line, 0, 3)
        .ok_or_else(|| CError::parse("V2000", 4, "could not parse atom count"))?;
    let nbonds: usize = parse_field(counts_line, 3, 6)
        .ok_or_else(|| CError::parse("V2000", 4, "could not parse bond count"))?;

    let atom_start = 4;
    let bond_start = atom_start + natoms;
    let trailer_start = bond_start + nbonds;
    if lines.len() < trailer_start {
        return Err(CError::parse(
            "V2000",
            lines.len(),
            format!("expected {natoms} atoms and {nbonds} bonds, the record is too short"),
        ));
    }

    let mut molecule = Molecule::new(FormatVersion::V2000);
    molecule.title = title(&lines, 3);

    for (i, line) in lines[atom_start..bond_start].iter().enumerate() {
        let line_no = atom_start + i + 1;
        let (atom, code) = parse_atom_fixed(line)
            .ok_or_else(|| CError::parse("V2000", line_no, format!("invalid atom line '{line}'")))?;
        molecule.add_atom(with_charge_code(atom, code));
    }

    for (i, line) in lines[bond_start..trailer_start].iter().enumerate() {
        let line_no = bond_start + i + 1;
        let raw = parse_bond_fixed(line)
            .ok_or_else(|| CError::parse("V2000", line_no, format!("invalid bond line '{line}'")))?;
        add_raw_bond(&mut molecule, raw, line_no);
    }

    finish(&mut molecule, &lines[trailer_start..]);
    Ok(molecule)
}

/// Read a record as permissively as possible.
///
/// The counts line is the first line starting with two integers, and the
/// blocks stop early at a properties line. This never fails: without a
/// usable counts line the result is an empty molecule.
pub fn read_resilient(text: &str) -> Molecule {
    let lines: Vec<&str> = text.lines().collect();
    let mut molecule = Molecule::new(FormatVersion::V2000);

    let Some(counts_index) = lines.iter().position(|l| COUNTS_LINE.is_match(l)) else {
        debug!("no counts line found, returning an empty molecule");
        return molecule;
    };
    let Some((natoms, nbonds)) = parse_counts(lines[counts_index]) else {
        warn!("could not read atom and bond counts from '{}'", lines[counts_index]);
        return molecule;
    };
    molecule.title = title(&lines, counts_index);

    let mut cursor = counts_index + 1;
    while molecule.size() < natoms {
        match lines.get(cursor) {
            Some(line) if !is_block_terminator(line) => {
                let (atom, code) = parse_atom_resilient(line);
                molecule.add_atom(with_charge_code(atom, code));
                cursor += 1;
            }
            _ => {
                warn!("atom block ended after {} of {natoms} atoms", molecule.size());
                break;
            }
        }
    }

    for _ in 0..nbonds {
        match lines.get(cursor) {
            Some(line) if !is_block_terminator(line) => {
                match parse_bond_resilient(line, molecule.size()) {
                    Some(raw) => add_raw_bond(&mut molecule, raw, cursor + 1),
                    None => warn!("skipping unreadable bond line '{line}'"),
                }
                cursor += 1;
            }
            _ => {
                warn!("bond block ended before the {nbonds} announced bonds");
                break;
            }
        }
    }

    finish(&mut molecule, &lines[cursor.min(lines.len())..]);
    molecule
}

/// Atom and bond counts, fixed columns first, then whitespace tokens.
pub(crate) fn parse_counts(line: &str) -> Option<(usize, usize)> {
    let natoms = parse_field::<usize>(line, 0, 3);
    let nbonds = parse_field::<usize>(line, 3, 6);
    if let (Some(natoms), Some(nbonds)) = (natoms, nbonds) {
        return Some((natoms, nbonds));
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = tokens.first()?;
    if first.len() == 6 && first.bytes().all(|b| b.is_ascii_digit()) {
        debug!("splitting concatenated counts '{first}'");
        return Some((first[..3].parse().ok()?, first[3..].parse().ok()?));
    }
    Some((first.parse().ok()?, tokens.get(1)?.parse().ok()?))
}

/// Atom line by columns: x (0-10), y (10-20), z (20-30), symbol (31-34) and
/// the charge code (36-39).
pub(crate) fn parse_atom_fixed(line: &str) -> Option<(Atom, Option<i32>)> {
    let x = parse_finite(field(line, 0, 10))?;
    let y = parse_finite(field(line, 10, 20))?;
    let z = parse_finite(field(line, 20, 30))?;
    let symbol = field(line, 31, 34).trim();
    if symbol.is_empty() {
        return None;
    }
    let code = parse_field::<i32>(line, 36, 39);
    Some((Atom::new(symbol, [x, y, z]), code))
}

/// Atom line by whitespace tokens (`x y z symbol massdiff charge ...`).
fn parse_atom_whitespace(line: &str) -> Option<(Atom, Option<i32>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }
    let x = parse_finite(tokens[0])?;
    let y = parse_finite(tokens[1])?;
    let z = parse_finite(tokens[2])?;
    let code = tokens.get(5).and_then(|t| t.parse::<i32>().ok());
    Some((Atom::new(tokens[3], [x, y, z]), code))
}

/// Whitespace first, columns second. A line neither strategy can read
/// still produces an atom, with non-finite coordinates, so that the
/// indices of the following atoms stay aligned with the bond block.
fn parse_atom_resilient(line: &str) -> (Atom, Option<i32>) {
    if let Some(parsed) = parse_atom_whitespace(line) {
        return parsed;
    }
    if let Some(parsed) = parse_atom_fixed(line) {
        debug!("read atom line '{line}' by columns");
        return parsed;
    }
    warn!("unreadable atom line '{line}'");
    let symbol = field(line, 31, 34).trim();
    (Atom::new(symbol, [f64::NAN; 3]), None)
}

fn with_charge_code(atom: Atom, code: Option<i32>) -> Atom {
    match code.and_then(decode_charge_code) {
        Some(charge) => atom.with_charge(charge),
        None => atom,
    }
}

/// A bond as written in the file: 1-based atom references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawBond {
    pub begin: i64,
    pub end: i64,
    pub order: i32,
    pub stereo: i32,
}

/// Bond line by 3-character columns. Atom references may run together
/// (` 54100` is atoms 54 and 100), which whitespace splitting cannot
/// read.
pub(crate) fn parse_bond_fixed(line: &str) -> Option<RawBond> {
    Some(RawBond {
        begin: parse_field(line, 0, 3)?,
        end: parse_field(line, 3, 6)?,
        order: parse_field(line, 6, 9)?,
        stereo: parse_field(line, 9, 12).unwrap_or(0),
    })
}

fn parse_bond_whitespace(line: &str) -> Option<RawBond> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    Some(RawBond {
        begin: tokens[0].parse().ok()?,
        end: tokens[1].parse().ok()?,
        order: tokens[2].parse().ok()?,
        stereo: tokens.get(3).and_then(|t| t.parse().ok()).unwrap_or(0),
    })
}

/// Columns first. The column reading is only trusted when it lands on
/// existing atoms, otherwise the whitespace reading is used when it
/// exists (misaligned files with wide indices).
fn parse_bond_resilient(line: &str, natoms: usize) -> Option<RawBond> {
    let in_range = |raw: &RawBond| {
        let natoms = natoms as i64;
        (1..=natoms).contains(&raw.begin) && (1..=natoms).contains(&raw.end)
    };

    match (parse_bond_fixed(line), parse_bond_whitespace(line)) {
        (Some(fixed), _) if in_range(&fixed) => Some(fixed),
        (Some(fixed), Some(tokens)) => {
            if in_range(&tokens) {
                debug!("read bond line '{line}' by whitespace tokens");
                Some(tokens)
            } else {
                Some(fixed)
            }
        }
        (fixed, tokens) => fixed.or(tokens),
    }
}

fn add_raw_bond(molecule: &mut Molecule, raw: RawBond, line_no: usize) {
    let zero_based = |reference: i64| {
        reference
            .checked_sub(1)
            .and_then(|r| usize::try_from(r).ok())
    };
    let (Some(begin), Some(end)) = (zero_based(raw.begin), zero_based(raw.end)) else {
        warn!(
            "dropping bond {}-{} on line {line_no}: atom references start at 1",
            raw.begin, raw.end
        );
        return;
    };
    let bond = Bond::new(begin, end, raw.order).with_stereo(BondStereo::from_v2000(raw.stereo));
    if let Err(e) = molecule.add_bond(bond) {
        warn!("dropping bond on line {line_no}: {e}");
    }
}

fn finish(molecule: &mut Molecule, trailer: &[&str]) {
    let mut directives = Directives::new();
    molecule.properties = read_trailer(trailer, &mut directives);
    directives.apply(&mut molecule.atoms, one_based);
}
