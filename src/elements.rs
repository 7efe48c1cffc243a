// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Element tables used by bond inference. Keys are uppercase symbols.

use phf::{phf_set, Set};

/// Groups 3 to 12, lanthanides and actinides included.
pub static TRANSITION_METALS: Set<&'static str> = phf_set! {
    "SC", "TI", "V", "CR", "MN", "FE", "CO", "NI", "CU", "ZN",
    "Y", "ZR", "NB", "MO", "TC", "RU", "RH", "PD", "AG", "CD",
    "LA", "HF", "TA", "W", "RE", "OS", "IR", "PT", "AU", "HG",
    "AC", "RF", "DB", "SG", "BH", "HS", "MT", "DS", "RG", "CN",
    "CE", "PR", "ND", "PM", "SM", "EU", "GD", "TB", "DY", "HO", "ER", "TM", "YB", "LU",
    "TH", "PA", "U", "NP", "PU", "AM", "CM", "BK", "CF", "ES", "FM", "MD", "NO", "LR",
};

/// Every IUPAC metal: alkali and alkaline earth, transition metals,
/// lanthanides, actinides and the post-transition metals.
pub static IUPAC_METALS: Set<&'static str> = phf_set! {
    "LI", "NA", "K", "RB", "CS", "FR",
    "BE", "MG", "CA", "SR", "BA", "RA",
    "SC", "TI", "V", "CR", "MN", "FE", "CO", "NI", "CU", "ZN",
    "Y", "ZR", "NB", "MO", "TC", "RU", "RH", "PD", "AG", "CD",
    "LA", "HF", "TA", "W", "RE", "OS", "IR", "PT", "AU", "HG",
    "AC", "RF", "DB", "SG", "BH", "HS", "MT", "DS", "RG", "CN",
    "CE", "PR", "ND", "PM", "SM", "EU", "GD", "TB", "DY", "HO", "ER", "TM", "YB", "LU",
    "TH", "PA", "U", "NP", "PU", "AM", "CM", "BK", "CF", "ES", "FM", "MD", "NO", "LR",
    "AL", "GA", "IN", "SN", "TL", "PB", "BI", "PO", "NH", "FL", "MC", "LV",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_metals_are_iupac_metals() {
        for symbol in TRANSITION_METALS.iter() {
            assert!(IUPAC_METALS.contains(symbol), "{symbol}");
        }
        assert!(IUPAC_METALS.contains("NA"));
        assert!(!TRANSITION_METALS.contains("NA"));
        assert!(!IUPAC_METALS.contains("C"));
        assert!(!IUPAC_METALS.contains("B"));
    }
}
