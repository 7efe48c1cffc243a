// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::process::ExitCode;

use molview::{CError, ParseOptions, SdfFile};

fn run(path: &str) -> Result<(), CError> {
    let file = SdfFile::open(path)?;
    let options = ParseOptions::default();
    for (index, molecule) in file.read_all(&options)?.iter().enumerate() {
        let inferred = molecule.bonds.iter().filter(|b| b.is_inferred()).count();
        println!(
            "{index}: {} ({}, {:?}) {} atoms, {} bonds ({inferred} inferred), {} properties",
            molecule.title.as_deref().unwrap_or("<untitled>"),
            molecule.format_version,
            molecule.layout(),
            molecule.size(),
            molecule.bonds.len(),
            molecule.properties.len(),
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: molview <file.sdf>");
        return ExitCode::FAILURE;
    };
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}
