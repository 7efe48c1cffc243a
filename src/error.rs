// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CError {
    #[error("Unsupported file format: `{0}`")]
    UnsupportedFileFormat(String),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("{format} format: {reason} (line {line})")]
    Parse {
        format: &'static str,
        line: usize,
        reason: String,
    },
    #[error("invalid bond {begin}-{end}: the molecule has {natoms} atoms")]
    InvalidBond {
        begin: usize,
        end: usize,
        natoms: usize,
    },
    #[error("record index {index} is out of range ({count} records)")]
    RecordOutOfRange { index: usize, count: usize },
}

impl CError {
    pub(crate) fn parse(format: &'static str, line: usize, reason: impl Into<String>) -> Self {
        CError::Parse {
            format,
            line,
            reason: reason.into(),
        }
    }
}
