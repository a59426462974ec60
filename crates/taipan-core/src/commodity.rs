//! Tradeable goods, their base-price table and a fixed per-commodity store.

use crate::error::ValidationError;
use crate::port::Port;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Goods that can be bought, sold, carried and warehoused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Commodity {
    /// Opium
    Opium,
    /// Silk
    Silk,
    /// Arms
    Arms,
    /// General Cargo
    General,
}

/// Base price per commodity, indexed by port position. Column 0 is the
/// "At Sea" slot and never priced.
const BASE_PRICES: [[u64; Port::COUNT]; Commodity::COUNT] = [
    [1000, 11, 16, 15, 14, 12, 10, 13],
    [100, 11, 14, 15, 16, 10, 13, 12],
    [10, 12, 16, 10, 11, 13, 14, 15],
    [1, 10, 11, 12, 13, 14, 15, 16],
];

impl Commodity {
    /// Number of commodities.
    pub const COUNT: usize = 4;

    /// All commodities in table order.
    pub const ALL: [Commodity; Commodity::COUNT] = [
        Commodity::Opium,
        Commodity::Silk,
        Commodity::Arms,
        Commodity::General,
    ];

    /// Row of this commodity in the price table and in [`Cargo`].
    pub fn index(self) -> usize {
        match self {
            Commodity::Opium => 0,
            Commodity::Silk => 1,
            Commodity::Arms => 2,
            Commodity::General => 3,
        }
    }

    /// Base price at `port` before any market movement.
    pub fn base_price(self, port: Port) -> u64 {
        BASE_PRICES[self.index()][port.index()]
    }

    /// Name used in compact menus.
    pub fn short_name(self) -> &'static str {
        match self {
            Commodity::Opium => "Opium",
            Commodity::Silk => "Silk",
            Commodity::Arms => "Arms",
            Commodity::General => "General",
        }
    }

    /// Key used to select the commodity in menus.
    pub fn letter(self) -> char {
        match self {
            Commodity::Opium => 'O',
            Commodity::Silk => 'S',
            Commodity::Arms => 'A',
            Commodity::General => 'G',
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commodity::General => f.write_str("General Cargo"),
            other => f.write_str(other.short_name()),
        }
    }
}

impl FromStr for Commodity {
    type Err = ValidationError;

    /// Accepts display names, short names, underscores for spaces and the
    /// single menu letter, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', " ");
        match key.as_str() {
            "opium" | "o" => Ok(Commodity::Opium),
            "silk" | "s" => Ok(Commodity::Silk),
            "arms" | "a" => Ok(Commodity::Arms),
            "general" | "general cargo" | "g" => Ok(Commodity::General),
            _ => Err(ValidationError::UnknownCommodity(s.to_string())),
        }
    }
}

/// Quantity of every commodity, all four slots always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo([u32; Commodity::COUNT]);

impl Cargo {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum over all commodities.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&q| u64::from(q)).sum()
    }

    /// Iterate `(commodity, quantity)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Commodity, u32)> + '_ {
        Commodity::ALL.iter().map(move |&c| (c, self[c]))
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&q| q == 0)
    }
}

impl Index<Commodity> for Cargo {
    type Output = u32;

    fn index(&self, c: Commodity) -> &u32 {
        &self.0[c.index()]
    }
}

impl IndexMut<Commodity> for Cargo {
    fn index_mut(&mut self, c: Commodity) -> &mut u32 {
        &mut self.0[c.index()]
    }
}
