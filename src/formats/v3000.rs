// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! MDL V3000 connection tables (`M  V30` tagged lines).

use std::collections::HashMap;

use log::{debug, warn};

use crate::atom::Atom;
use crate::bond::{Bond, BondStereo};
use crate::formats::charges::{parse_pairs, Directives};
use crate::formats::sdf::read_data_items;
use crate::molecule::{FormatVersion, Molecule};

const PREFIX: &str = "M  V30";

/// Join `M  V30` lines continued with a trailing `-` into logical lines.
/// `M  V30` lines lose their indentation, other lines are returned
/// untouched.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for line in text.lines() {
        let line = line.trim_end();
        let line = if line.trim_start().starts_with(PREFIX) {
            line.trim_start()
        } else {
            line
        };
        let content = match pending.take() {
            Some(mut head) => match line.strip_prefix(PREFIX) {
                Some(rest) => {
                    head.push_str(rest.trim_start());
                    head
                }
                None => {
                    // continuation marker without a continuation
                    lines.push(head);
                    line.to_string()
                }
            },
            None => line.to_string(),
        };

        if content.starts_with(PREFIX) && content.ends_with('-') {
            let mut head = content;
            head.pop();
            pending = Some(head);
        } else {
            lines.push(content);
        }
    }
    lines.extend(pending);
    lines
}

/// Read a V3000 record.
///
/// Atom lines are `M  V30 index symbol x y z aamap [KEY=VALUE ...]` and bond
/// lines `M  V30 index order begin end [KEY=VALUE ...]`. Bond ends refer to
/// atom indices, which usually but not always match positions. Malformed
/// or short lines are skipped.
pub fn read(text: &str) -> Molecule {
    let lines = logical_lines(text);
    let mut molecule = Molecule::new(FormatVersion::V3000);
    molecule.title = title(&lines);

    let mut in_atom_block = false;
    let mut in_bond_block = false;
    let mut ids: HashMap<i64, usize> = HashMap::new();
    let mut directives = Directives::new();
    let mut raw_bonds = Vec::new();
    let mut end_of_ctab = lines.len();

    for (line_no, line) in lines.iter().enumerate() {
        let line = line.trim_start();
        if line.starts_with("M  END") {
            end_of_ctab = line_no + 1;
            break;
        }
        if !line.starts_with(PREFIX) {
            continue;
        }

        if line.contains("BEGIN ATOM") {
            in_atom_block = true;
        } else if line.contains("END ATOM") {
            in_atom_block = false;
        } else if line.contains("BEGIN BOND") {
            in_bond_block = true;
        } else if line.contains("END BOND") {
            in_bond_block = false;
        } else if line.starts_with("M  V30 CHG") {
            directives.stage_charges(parse_pairs(line, 3));
        } else if in_atom_block {
            match parse_atom(line) {
                Some((id, atom)) => {
                    if ids.insert(id, molecule.size()).is_some() {
                        warn!("duplicated V3000 atom index {id}, the last one is used for bonds");
                    }
                    molecule.add_atom(atom);
                }
                None => warn!("skipping malformed V3000 atom line '{line}'"),
            }
        } else if in_bond_block {
            match parse_bond(line) {
                Some(raw) => raw_bonds.push((line_no + 1, raw)),
                None => warn!("skipping malformed V3000 bond line '{line}'"),
            }
        }
    }

    for (line_no, raw) in raw_bonds {
        let (Some(&begin), Some(&end)) = (ids.get(&raw.begin), ids.get(&raw.end)) else {
            warn!(
                "dropping V3000 bond {}-{} on line {line_no}: unknown atom index",
                raw.begin, raw.end
            );
            continue;
        };
        let bond = Bond::new(begin, end, raw.order).with_stereo(BondStereo::from_v3000_cfg(raw.cfg));
        if let Err(e) = molecule.add_bond(bond) {
            warn!("dropping V3000 bond on line {line_no}: {e}");
        }
    }

    directives.apply(&mut molecule.atoms, |id| {
        i64::try_from(id).ok().and_then(|id| ids.get(&id).copied())
    });

    let trailer: Vec<&str> = lines[end_of_ctab..].iter().map(String::as_str).collect();
    molecule.properties = read_data_items(&trailer);

    debug!(
        "read V3000 record with {} atoms and {} bonds",
        molecule.size(),
        molecule.bonds.len()
    );
    molecule
}

/// The title is the third line above the `V3000` counts line.
fn title(lines: &[String]) -> Option<String> {
    let counts = lines
        .iter()
        .position(|l| !l.starts_with("M  ") && l.contains("V3000"))?;
    let title = lines.get(counts.checked_sub(3)?)?.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// `KEY=VALUE` tokens trailing an atom or bond line.
fn keyword<'a>(tokens: &[&'a str], key: &str) -> Option<&'a str> {
    tokens.iter().find_map(|t| {
        t.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

fn parse_atom(line: &str) -> Option<(i64, Atom)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 7 {
        return None;
    }
    let id = tokens[2].parse::<i64>().ok()?;
    let symbol = tokens[3];
    let x = tokens[4].parse::<f64>().ok()?;
    let y = tokens[5].parse::<f64>().ok()?;
    let z = tokens[6].parse::<f64>().ok()?;

    let mut atom = Atom::new(symbol, [x, y, z]);
    let options = &tokens[7..];
    if let Some(charge) = keyword(options, "CHG").and_then(|v| v.parse::<i32>().ok()) {
        atom.charge = charge;
    }
    if let Some(mass) = keyword(options, "MASS").and_then(|v| v.parse::<i32>().ok()) {
        atom.isotope = Some(mass);
    }
    Some((id, atom))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawBond {
    order: i32,
    begin: i64,
    end: i64,
    cfg: i32,
}

fn parse_bond(line: &str) -> Option<RawBond> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return None;
    }
    Some(RawBond {
        order: tokens[3].parse().ok()?,
        begin: tokens[4].parse().ok()?,
        end: tokens[5].parse().ok()?,
        cfg: keyword(&tokens[6..], "CFG")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const ACETATE: &str = "\
acetate
  Mrv2014 03012512002D

  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 4 3 0 0 0
M  V30 BEGIN ATOM
M  V30 1 C 0.0 0.0 0.0 0
M  V30 2 C 1.54 0.0 0.0 0
M  V30 3 O 2.31 1.33 0.0 0
M  V30 4 O 2.31 -1.33 0.0 0 CHG=-1 MASS=18
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 1 2
M  V30 2 2 2 3 CFG=2
M  V30 3 1 2 4
M  V30 END BOND
M  V30 END CTAB
M  END
>  <NAME>
acetate anion

$$$$
";

    #[test]
    fn read_atoms_and_bonds() {
        let molecule = read(ACETATE);
        assert_eq!(molecule.format_version, FormatVersion::V3000);
        assert_eq!(molecule.title.as_deref(), Some("acetate"));
        assert_eq!(molecule.size(), 4);
        assert_eq!(molecule.bonds.len(), 3);
        assert_eq!(molecule[3].charge, -1);
        assert_eq!(molecule[3].isotope, Some(18));
        assert_approx_eq!(molecule[2].y, 1.33);
        assert_eq!(molecule.bonds[1].order, 2);
        assert_eq!(molecule.bonds[1].stereo, BondStereo::Wavy);
        assert_eq!((molecule.bonds[2].begin, molecule.bonds[2].end), (1, 3));
        assert_eq!(molecule.properties["NAME"], "acetate anion");
    }

    #[test]
    fn charge_directives_override_inline_charges() {
        let text = "\
M  V30 BEGIN CTAB
M  V30 CHG 2 1 1 2 -2
M  V30 BEGIN ATOM
M  V30 1 N 0 0 0 0 CHG=-1
M  V30 2 O 1 0 0 0
M  V30 END ATOM
M  V30 END CTAB
M  END
";
        let molecule = read(text);
        assert_eq!(molecule.size(), 2);
        assert_eq!(molecule[0].charge, 1);
        assert_eq!(molecule[1].charge, -2);
        assert_eq!(molecule.title, None);
    }

    #[test]
    fn bonds_follow_atom_indices() {
        let text = "\
M  V30 BEGIN ATOM
M  V30 10 C 0 0 0 0
M  V30 bad line
M  V30 20 N 1 0 0 0
M  V30 END ATOM
M  V30 BEGIN BOND
M  V30 1 1 10 20
M  V30 2 1 10 99
M  V30 3 1 20 20
M  V30 4 1
M  V30 END BOND
M  END
";
        let molecule = read(text);
        assert_eq!(molecule.size(), 2);
        assert_eq!(molecule.bonds.len(), 1);
        assert_eq!((molecule.bonds[0].begin, molecule.bonds[0].end), (0, 1));
    }

    #[test]
    fn continuation_lines() {
        let text = "\
M  V30 BEGIN ATOM
M  V30 1 Fe 0 0 0 0 -
M  V30 CHG=2
M  V30 END ATOM
M  END
";
        let lines = logical_lines(text);
        assert_eq!(lines[1], "M  V30 1 Fe 0 0 0 0 CHG=2");

        let molecule = read(text);
        assert_eq!(molecule[0].symbol, "Fe");
        assert_eq!(molecule[0].charge, 2);
    }

    #[test]
    fn indented_record() {
        let text = "\
indented
  program

  0  0  0     0  0            999 V3000
  M  V30 BEGIN CTAB
  M  V30 BEGIN ATOM
  M  V30 1 C 0.0 0.0 0.0 0
  M  V30 2 O 1.2 0.0 0.0 0 -
  M  V30 CHG=-1
  M  V30 END ATOM
  M  V30 BEGIN BOND
  M  V30 1 2 1 2
  M  V30 END BOND
  M  V30 END CTAB
  M  END
";
        let molecule = read(text);
        assert_eq!(molecule.title.as_deref(), Some("indented"));
        assert_eq!(molecule.size(), 2);
        assert_eq!(molecule[1].charge, -1);
        assert_eq!(molecule.bonds.len(), 1);
        assert_eq!(molecule.bonds[0].order, 2);
    }
}
