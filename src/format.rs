// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::CError;
use crate::formats::{v2000, v3000};
use crate::molecule::{FormatVersion, Molecule};

static V3000_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*M  V30").expect("V3000 marker pattern is valid"));

/// Dialect of the connection tables to read.
///
/// - `V2000`: fixed-column MDL molfile.
/// - `V3000`: tagged `M  V30` molfile.
/// - `Guess`: look for `M  V30` lines in the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextFormat {
    #[default]
    Guess,
    V2000,
    V3000,
}

impl TextFormat {
    /// Check that `path` has an SD/MOL file extension. The dialect itself
    /// is always guessed from the content.
    ///
    /// # Errors
    ///
    /// Returns [`CError::UnsupportedFileFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match ext.to_lowercase().as_str() {
            "sdf" | "sd" | "mol" | "mdl" => Ok(TextFormat::Guess),
            _ => Err(CError::UnsupportedFileFormat(path.display().to_string())),
        }
    }
}

/// Does `text` contain a line starting with `M  V30`?
pub fn detect(text: &str) -> FormatVersion {
    if V3000_MARKER.is_match(text) {
        FormatVersion::V3000
    } else {
        FormatVersion::V2000
    }
}

/// Read a single record with the reader matching `format`.
///
/// V2000 records go through the strict reader first and the resilient one
/// when it fails or finds no atom. A V3000 record without atoms gets a
/// second chance with the resilient V2000 reader. The result may be empty
/// but reading never fails.
pub fn read_record(text: &str, format: TextFormat) -> Molecule {
    let version = match format {
        TextFormat::Guess => detect(text),
        TextFormat::V2000 => FormatVersion::V2000,
        TextFormat::V3000 => FormatVersion::V3000,
    };

    match version {
        FormatVersion::V3000 => {
            let molecule = v3000::read(text);
            if !molecule.is_empty() {
                return molecule;
            }
            debug!("V3000 reader found no atom, trying the V2000 reader");
            let fallback = v2000::read_resilient(text);
            if fallback.is_empty() {
                molecule
            } else {
                fallback
            }
        }
        FormatVersion::V2000 => match v2000::read_strict(text) {
            Ok(molecule) if !molecule.is_empty() => molecule,
            Ok(_) => {
                debug!("strict V2000 reader found no atom, trying the resilient reader");
                v2000::read_resilient(text)
            }
            Err(e) => {
                debug!("strict V2000 reader failed ({e}), trying the resilient reader");
                v2000::read_resilient(text)
            }
        },
    }
}
