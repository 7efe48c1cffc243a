// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    /// Bond order is unknown or unspecified (query bonds, 8 = any, ...)
    Unknown,

    /// Single bond
    Single,

    /// Double bond
    Double,

    /// Triple bond
    Triple,

    /// Aromatic bond (for example the ring bonds in benzene)
    Aromatic,

    /// Coordination or otherwise unspecified zero-order bond
    Coordination,
}

impl BondOrder {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => BondOrder::Coordination,
            1 => BondOrder::Single,
            2 => BondOrder::Double,
            3 => BondOrder::Triple,
            4 => BondOrder::Aromatic,
            _ => BondOrder::Unknown,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BondStereo {
    #[default]
    None,
    /// Wedge, pointing toward the viewer
    Up,
    /// Hash, pointing away from the viewer
    Down,
    /// Either / unknown configuration
    Wavy,
}

impl BondStereo {
    /// V2000 bond block stereo column.
    pub fn from_v2000(code: i32) -> Self {
        match code {
            1 => BondStereo::Up,
            4 => BondStereo::Wavy,
            6 => BondStereo::Down,
            _ => BondStereo::None,
        }
    }

    /// V3000 `CFG=` value.
    pub fn from_v3000_cfg(cfg: i32) -> Self {
        match cfg {
            1 => BondStereo::Up,
            2 => BondStereo::Wavy,
            3 => BondStereo::Down,
            _ => BondStereo::None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BondSource {
    #[default]
    FromFile,
    InferredCoordination,
    InferredBridge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// 0-based index of the first atom
    pub begin: usize,
    /// 0-based index of the second atom
    pub end: usize,
    /// Raw order value as found in the file
    pub order: i32,
    pub stereo: BondStereo,
    pub is_bridge: bool,
    pub source: BondSource,
}

impl Bond {
    pub fn new(begin: usize, end: usize, order: i32) -> Self {
        Bond {
            begin,
            end,
            order,
            stereo: BondStereo::None,
            is_bridge: false,
            source: BondSource::FromFile,
        }
    }

    pub fn coordination(begin: usize, end: usize) -> Self {
        Bond {
            source: BondSource::InferredCoordination,
            ..Bond::new(begin, end, 0)
        }
    }

    pub fn bridge(begin: usize, end: usize) -> Self {
        Bond {
            is_bridge: true,
            source: BondSource::InferredBridge,
            ..Bond::new(begin, end, 0)
        }
    }

    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }

    pub fn kind(&self) -> BondOrder {
        BondOrder::from_raw(self.order)
    }

    /// Number of parallel lines a renderer should draw. Anything outside
    /// 1..=3 is drawn as a single line, the raw value stays in `order`.
    pub fn rendered_order(&self) -> u8 {
        match self.order {
            2 => 2,
            3 => 3,
            _ => 1,
        }
    }

    pub fn is_aromatic(&self) -> bool {
        self.kind() == BondOrder::Aromatic
    }

    pub fn is_inferred(&self) -> bool {
        self.source != BondSource::FromFile
    }

    /// A bond is valid when both ends are distinct indices below `natoms`.
    pub fn is_valid(&self, natoms: usize) -> bool {
        self.begin != self.end && self.begin < natoms && self.end < natoms
    }

    pub fn pair(&self) -> BondPair {
        BondPair::new(self.begin, self.end)
    }
}

/// Canonical, order-independent identity of a bond: `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondPair(usize, usize);

impl BondPair {
    pub fn new(i: usize, j: usize) -> Self {
        if i < j {
            BondPair(i, j)
        } else {
            BondPair(j, i)
        }
    }

    pub fn first(&self) -> usize {
        self.0
    }

    pub fn second(&self) -> usize {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_order_collapses_unusual_values() {
        for (raw, rendered) in [(1, 1), (2, 2), (3, 3), (4, 1), (0, 1), (8, 1), (9, 1)] {
            let bond = Bond::new(0, 1, raw);
            assert_eq!(bond.rendered_order(), rendered);
            assert_eq!(bond.order, raw);
        }
        assert!(Bond::new(0, 1, 4).is_aromatic());
        assert_eq!(Bond::new(0, 1, 8).kind(), BondOrder::Unknown);
    }

    #[test]
    fn pair_is_order_independent() {
        assert_eq!(BondPair::new(5, 2), BondPair::new(2, 5));
        assert_eq!(BondPair::new(5, 2).first(), 2);
        assert_eq!(Bond::new(7, 3, 1).pair().second(), 7);
    }

    #[test]
    fn validity() {
        assert!(Bond::new(0, 1, 1).is_valid(2));
        assert!(!Bond::new(0, 2, 1).is_valid(2));
        assert!(!Bond::new(1, 1, 1).is_valid(2));
    }

    #[test]
    fn inferred_constructors() {
        let bond = Bond::bridge(0, 1);
        assert!(bond.is_bridge);
        assert_eq!(bond.order, 0);
        assert_eq!(bond.source, BondSource::InferredBridge);
        assert!(Bond::coordination(0, 1).is_inferred());
        assert!(!Bond::coordination(0, 1).is_bridge);
    }
}
