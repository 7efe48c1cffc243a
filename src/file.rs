// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::CError;
use crate::format::TextFormat;
use crate::formats::sdf::split_records;
use crate::molecule::Molecule;
use crate::normalize::normalize;
use crate::options::ParseOptions;
use crate::parse_record;

/// An SD or MOL file, loaded and split into records up front.
#[derive(Debug, Clone)]
pub struct SdfFile {
    pub size: usize,

    path: PathBuf,
    format: TextFormat,
    records: Vec<String>,
}

impl SdfFile {
    /// Opens `path`, guessing the dialect of every record.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CError> {
        Self::with_format(path, TextFormat::Guess)
    }

    /// Opens `path` and reads all its records as `format`.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, and with [`CError::UnsupportedFileFormat`] when
    /// `path` does not have an SD/MOL extension.
    pub fn with_format(path: impl AsRef<Path>, format: TextFormat) -> Result<Self, CError> {
        let path = path.as_ref();
        TextFormat::from_path(path)?;

        let bytes = std::fs::read(path)?;
        let text = normalize(&String::from_utf8_lossy(&bytes));
        let records = split_records(&text);
        debug!("{}: {} record(s)", path.display(), records.len());

        Ok(SdfFile {
            size: records.len(),
            path: path.to_path_buf(),
            format,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads record `index`, with `options.record` ignored and the format
    /// given at opening time taking precedence over `options.format`.
    ///
    /// # Errors
    ///
    /// Returns [`CError::RecordOutOfRange`] when `index >= size`, or
    /// [`CError::InvalidOption`] for invalid inference options.
    pub fn read_at(&self, index: usize, options: &ParseOptions) -> Result<Molecule, CError> {
        let record = self.records.get(index).ok_or(CError::RecordOutOfRange {
            index,
            count: self.size,
        })?;
        parse_record(record, self.effective_format(options), &options.inference)
    }

    /// Reads every record in file order.
    pub fn read_all(&self, options: &ParseOptions) -> Result<Vec<Molecule>, CError> {
        let format = self.effective_format(options);
        self.records
            .iter()
            .map(|record| parse_record(record, format, &options.inference))
            .collect()
    }

    fn effective_format(&self, options: &ParseOptions) -> TextFormat {
        match self.format {
            TextFormat::Guess => options.format,
            format => format,
        }
    }
}
