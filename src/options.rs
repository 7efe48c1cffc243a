// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::BTreeSet;

use crate::elements::{IUPAC_METALS, TRANSITION_METALS};
use crate::error::CError;
use crate::format::TextFormat;

/// Default coordination cutoff, in the length unit of the file.
pub const DEFAULT_CUTOFF: f64 = 3.0;
/// Default multiplier applied to the closest ligand distance of a metal.
pub const DEFAULT_REL_FACTOR: f64 = 1.4;

/// When the coordination engine runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CoordinationMode {
    /// Run for 3D structures, or when some metal has no explicit bond.
    #[default]
    Auto,
    /// Always run.
    Always,
    Disabled,
}

/// Which elements count as metal centers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MetalSet {
    #[default]
    Iupac,
    TransitionMetals,
}

impl MetalSet {
    /// `key` is an uppercase element symbol.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            MetalSet::Iupac => IUPAC_METALS.contains(key),
            MetalSet::TransitionMetals => TRANSITION_METALS.contains(key),
        }
    }
}

/// Knobs of the two bond inference engines.
///
/// Hydrogen visibility has two spellings. `show_hydrogen` is the legacy
/// one and wins when set, then `include_hydrogens`, and hydrogens are
/// hidden when neither is set.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOptions {
    pub coordination: CoordinationMode,
    pub metal_set: MetalSet,
    pub cutoff: f64,
    pub rel_factor: f64,
    pub suppress_opposite_charge_coordination: bool,
    /// Run the bridging engine
    pub bridging: bool,
    /// Replaces the default `{H}` hidden set when given
    pub hidden_elements: Option<Vec<String>>,
    pub show_hydrogen: Option<bool>,
    pub include_hydrogens: Option<bool>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        InferenceOptions {
            coordination: CoordinationMode::Auto,
            metal_set: MetalSet::Iupac,
            cutoff: DEFAULT_CUTOFF,
            rel_factor: DEFAULT_REL_FACTOR,
            suppress_opposite_charge_coordination: true,
            bridging: true,
            hidden_elements: None,
            show_hydrogen: None,
            include_hydrogens: None,
        }
    }
}

impl InferenceOptions {
    pub fn with_coordination(mut self, mode: CoordinationMode) -> Self {
        self.coordination = mode;
        self
    }

    pub fn with_metal_set(mut self, metal_set: MetalSet) -> Self {
        self.metal_set = metal_set;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_rel_factor(mut self, rel_factor: f64) -> Self {
        self.rel_factor = rel_factor;
        self
    }

    pub fn with_charge_suppression(mut self, suppress: bool) -> Self {
        self.suppress_opposite_charge_coordination = suppress;
        self
    }

    pub fn with_bridging(mut self, bridging: bool) -> Self {
        self.bridging = bridging;
        self
    }

    pub fn with_hidden_elements<S: AsRef<str>>(mut self, symbols: &[S]) -> Self {
        self.hidden_elements = Some(symbols.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    pub fn with_hydrogens_visible(mut self, visible: bool) -> Self {
        self.include_hydrogens = Some(visible);
        self
    }

    /// Resolved hydrogen visibility, see the type level documentation.
    pub fn hydrogens_visible(&self) -> bool {
        self.show_hydrogen
            .or(self.include_hydrogens)
            .unwrap_or(false)
    }

    /// Uppercase symbols of the elements hidden from rendering, which is
    /// what the bridging engine looks for.
    pub fn hidden_set(&self) -> BTreeSet<String> {
        let mut hidden: BTreeSet<String> = match &self.hidden_elements {
            Some(symbols) => symbols
                .iter()
                .map(|s| s.trim().to_ascii_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => BTreeSet::from(["H".to_string()]),
        };
        if self.hydrogens_visible() {
            hidden.remove("H");
        }
        hidden
    }

    /// # Errors
    ///
    /// Returns [`CError::InvalidOption`] if `cutoff` or `rel_factor` is not
    /// a finite positive number.
    pub fn validate(&self) -> Result<(), CError> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(CError::InvalidOption {
                name: "cutoff",
                reason: format!("expected a finite positive distance, got {}", self.cutoff),
            });
        }
        if !(self.rel_factor.is_finite() && self.rel_factor > 0.0) {
            return Err(CError::InvalidOption {
                name: "rel_factor",
                reason: format!(
                    "expected a finite positive factor, got {}",
                    self.rel_factor
                ),
            });
        }
        Ok(())
    }
}

/// Options of [`crate::parse_one`] and [`crate::parse_all`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseOptions {
    /// Dialect override, [`TextFormat::Guess`] sniffs the text
    pub format: TextFormat,
    /// Record picked by `parse_one`, clamped into the available range
    pub record: Option<usize>,
    pub inference: InferenceOptions,
}

impl ParseOptions {
    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_inference(mut self, inference: InferenceOptions) -> Self {
        self.inference = inference;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = InferenceOptions::default();
        assert_eq!(options.cutoff, 3.0);
        assert_eq!(options.rel_factor, 1.4);
        assert!(options.suppress_opposite_charge_coordination);
        assert_eq!(options.hidden_set(), BTreeSet::from(["H".to_string()]));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn legacy_hydrogen_flag_wins() {
        let options = InferenceOptions {
            show_hydrogen: Some(false),
            include_hydrogens: Some(true),
            ..Default::default()
        };
        assert!(!options.hydrogens_visible());
        assert!(options.hidden_set().contains("H"));

        let options = InferenceOptions::default().with_hydrogens_visible(true);
        assert!(options.hydrogens_visible());
        assert!(options.hidden_set().is_empty());
    }

    #[test]
    fn custom_hidden_set() {
        let options = InferenceOptions::default().with_hidden_elements(&["h", " Cl "]);
        assert_eq!(
            options.hidden_set(),
            BTreeSet::from(["CL".to_string(), "H".to_string()])
        );

        let options = options.with_hydrogens_visible(true);
        assert_eq!(options.hidden_set(), BTreeSet::from(["CL".to_string()]));
    }

    #[test]
    fn metal_sets() {
        assert!(MetalSet::Iupac.contains("NA"));
        assert!(!MetalSet::TransitionMetals.contains("NA"));
        assert!(MetalSet::TransitionMetals.contains("FE"));
    }

    #[test]
    fn invalid_values() {
        let options = InferenceOptions::default().with_cutoff(0.0);
        assert!(matches!(
            options.validate(),
            Err(CError::InvalidOption { name: "cutoff", .. })
        ));
        let options = InferenceOptions::default().with_rel_factor(f64::NAN);
        assert!(matches!(
            options.validate(),
            Err(CError::InvalidOption {
                name: "rel_factor",
                ..
            })
        ));
    }
}
