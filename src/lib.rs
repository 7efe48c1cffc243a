// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Reading of SDF/MOL files (V2000 and V3000) into atoms and bonds ready
//! to be drawn, with inference of the coordination and bridge bonds that
//! such files usually leave out.

pub mod atom;
pub mod bond;
pub mod bridging;
pub mod bvh;
pub mod connectivity;
pub mod coordination;
pub mod elements;
pub mod error;
pub mod file;
pub mod format;
pub mod formats;
pub mod geometry;
pub mod inference;
pub mod layout;
pub mod molecule;
pub mod normalize;
pub mod options;
pub mod property;
pub mod spatial;

pub use atom::Atom;
pub use bond::{Bond, BondOrder, BondSource, BondStereo};
pub use error::CError;
pub use file::SdfFile;
pub use format::TextFormat;
pub use inference::infer_bonds;
pub use molecule::{FormatVersion, Molecule};
pub use options::{CoordinationMode, InferenceOptions, MetalSet, ParseOptions};

use format::read_record;
use formats::sdf::split_records;
use normalize::normalize;

/// Parse one record of `text`, the first one unless `options.record` is
/// set. The index is clamped to the last record, and text without any
/// record gives an empty molecule.
///
/// # Errors
///
/// Only invalid inference options are rejected, malformed content never
/// is.
pub fn parse_one(text: &str, options: &ParseOptions) -> Result<Molecule, CError> {
    options.inference.validate()?;
    let records = split_records(&normalize(text));
    let Some(last) = records.len().checked_sub(1) else {
        return Ok(Molecule::default());
    };
    let index = options.record.unwrap_or(0).min(last);
    parse_record(&records[index], options.format, &options.inference)
}

/// Parse every record of `text`, in order.
///
/// # Errors
///
/// Only invalid inference options are rejected, malformed content never
/// is.
pub fn parse_all(text: &str, options: &ParseOptions) -> Result<Vec<Molecule>, CError> {
    options.inference.validate()?;
    split_records(&normalize(text))
        .iter()
        .map(|record| parse_record(record, options.format, &options.inference))
        .collect()
}

pub(crate) fn parse_record(
    record: &str,
    format: TextFormat,
    inference: &InferenceOptions,
) -> Result<Molecule, CError> {
    let mut molecule = read_record(record, format);
    molecule.apply_inference(inference)?;
    Ok(molecule)
}
