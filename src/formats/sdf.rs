// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use log::debug;

use crate::formats::charges::{parse_pairs, Directives};
use crate::property::Properties;

/// Is this line a `$$$$` record separator?
pub fn is_record_separator(line: &str) -> bool {
    line.trim() == "$$$$"
}

/// Split a normalized SD file into its records.
///
/// Records are separated by `$$$$` lines, optionally followed by
/// whitespace. Empty or whitespace-only records are dropped. The lines of a
/// record are kept verbatim (including a blank title line).
pub fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if is_record_separator(line) {
            push_record(&mut records, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_record(&mut records, &current);

    debug!("found {} record(s)", records.len());
    records
}

fn push_record(records: &mut Vec<String>, lines: &[&str]) {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return;
    }
    records.push(lines.join("\n"));
}

/// Scan the lines following the connection table: `M  CHG` and `M  ISO`
/// directives are staged into `directives` until `M  END`, then data
/// items are collected.
pub fn read_trailer(lines: &[&str], directives: &mut Directives) -> Properties {
    let mut in_properties_block = true;
    for line in lines {
        if !in_properties_block || line.starts_with('>') {
            break;
        }
        if line.starts_with("M  END") {
            in_properties_block = false;
        } else if line.starts_with("M  CHG") {
            directives.stage_charges(parse_pairs(line, 2));
        } else if line.starts_with("M  ISO") {
            directives.stage_isotopes(parse_pairs(line, 2));
        }
    }

    read_data_items(lines)
}

/// Collect `>  <NAME>` data items. The value runs until the next blank line,
/// the next item header or a record separator; multi-line values are joined
/// with `\n`.
pub fn read_data_items(lines: &[&str]) -> Properties {
    let mut properties = Properties::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(name) = data_item_name(lines[i]) else {
            i += 1;
            continue;
        };
        i += 1;

        let mut value: Vec<&str> = Vec::new();
        while i < lines.len() {
            let line = lines[i];
            if line.trim().is_empty() || line.starts_with('>') || is_record_separator(line) {
                break;
            }
            value.push(line.trim_end());
            i += 1;
        }
        properties.insert(name.to_string(), value.join("\n"));
    }
    properties
}

/// `>  <NAME>  (MD-1234)` gives `NAME`.
fn data_item_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    let start = rest.find('<')? + 1;
    let len = rest[start..].find('>')?;
    let name = rest[start..start + len].trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::formats::charges::one_based;

    #[test]
    fn split() {
        let text = "a\n  1  0\n$$$$\n\nb\n  2  1\n$$$$   \n   \n$$$$\n";
        let records = split_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], "a\n  1  0");
        // the blank title line of the second record is preserved
        assert_eq!(records[1], "\nb\n  2  1");
    }

    #[test]
    fn split_without_trailing_separator() {
        assert_eq!(split_records("only\n").len(), 1);
        assert!(split_records("").is_empty());
        assert!(split_records("$$$$\n$$$$").is_empty());
    }

    #[test]
    fn data_items() {
        let lines = [
            "M  END",
            ">  <PUBCHEM_COMPOUND_CID>",
            "2244",
            "",
            "> 25 <SYNONYMS> (MD-0001)",
            "aspirin",
            "acetylsalicylic acid",
            "",
            ">  <EMPTY>",
            "",
            "> no name here",
            "ignored",
        ];
        let properties = read_data_items(&lines);
        assert_eq!(properties.len(), 3);
        assert_eq!(properties["PUBCHEM_COMPOUND_CID"], "2244");
        assert_eq!(properties["SYNONYMS"], "aspirin\nacetylsalicylic acid");
        assert_eq!(properties["EMPTY"], "");
    }

    #[test]
    fn directives_stop_at_end() {
        let lines = [
            "M  CHG  1   1  -1",
            "M  ISO  1   2  13",
            "M  END",
            "M  CHG  1   2   1",
            ">  <NOTE>",
            "M  CHG  1   1   3",
        ];
        let mut directives = Directives::new();
        let properties = read_trailer(&lines, &mut directives);
        let mut atoms = vec![Atom::new("O", [0.0; 3]), Atom::new("C", [0.0; 3])];
        directives.apply(&mut atoms, one_based);

        assert_eq!(atoms[0].charge, -1);
        assert_eq!(atoms[1].charge, 0);
        assert_eq!(atoms[1].isotope, Some(13));
        assert_eq!(properties["NOTE"], "M  CHG  1   1   3");
    }
}
