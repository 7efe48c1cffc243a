// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

/// Canonicalize raw input before any parsing happens.
///
/// Line endings become `\n`, a leading byte-order mark is stripped and
/// leading blank lines are removed. Nothing else is touched, so
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut rest = text.as_str();
    loop {
        let stripped = skip_blank_lines(rest.trim_start_matches('\u{feff}'));
        if stripped.len() == rest.len() {
            break;
        }
        rest = stripped;
    }

    rest.to_string()
}

fn skip_blank_lines(text: &str) -> &str {
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        // an unterminated whitespace-only tail is still a blank line
        start += line.len();
    }
    &text[start..]
}
