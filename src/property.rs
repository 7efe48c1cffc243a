// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// SD data items (`>  <NAME>` followed by value lines) of one record.
///
/// Keys are kept sorted so that iteration order never depends on hashing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Properties(BTreeMap::new())
    }

    /// Value parsed as a float, `None` if missing or not a number.
    pub fn get_double(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(|v| v.trim().parse::<f64>().ok())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl Deref for Properties {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Properties {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for Properties {
    type Item = (String, String);
    type IntoIter = <BTreeMap<String, String> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = <&'a BTreeMap<String, String> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn typed_access() {
        let mut properties = Properties::new();
        properties.insert("ENERGY".to_string(), " -12.5 ".to_string());
        properties.insert("NAME".to_string(), "aspirin".to_string());

        assert_approx_eq!(properties.get_double("ENERGY").unwrap(), -12.5);
        assert_eq!(properties.get_double("NAME"), None);
        assert_eq!(properties.get_str("NAME"), Some("aspirin"));
        assert_eq!(properties.get_str("MISSING"), None);

        let keys: Vec<_> = properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["ENERGY", "NAME"]);
    }
}
