//! The eight fixed locations of the map.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A location the ship can be at. `AtSea` is a placeholder with no market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    /// Between ports; not a destination.
    AtSea,
    /// Home port: bank, creditor, warehouse and Li Yuen live here.
    HongKong,
    /// Shanghai
    Shanghai,
    /// Nagasaki
    Nagasaki,
    /// Saigon
    Saigon,
    /// Manila
    Manila,
    /// Singapore
    Singapore,
    /// Batavia
    Batavia,
}

impl Port {
    /// Number of locations, including `AtSea`.
    pub const COUNT: usize = 8;

    /// Every location in price-table order.
    pub const ALL: [Port; Port::COUNT] = [
        Port::AtSea,
        Port::HongKong,
        Port::Shanghai,
        Port::Nagasaki,
        Port::Saigon,
        Port::Manila,
        Port::Singapore,
        Port::Batavia,
    ];

    /// The home port.
    pub const HOME: Port = Port::HongKong;

    /// Column of this port in the base-price table.
    pub fn index(self) -> usize {
        match self {
            Port::AtSea => 0,
            Port::HongKong => 1,
            Port::Shanghai => 2,
            Port::Nagasaki => 3,
            Port::Saigon => 4,
            Port::Manila => 5,
            Port::Singapore => 6,
            Port::Batavia => 7,
        }
    }

    /// Inverse of [`Port::index`].
    pub fn from_index(index: usize) -> Option<Port> {
        Port::ALL.get(index).copied()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Port::AtSea => "At Sea",
            Port::HongKong => "Hong Kong",
            Port::Shanghai => "Shanghai",
            Port::Nagasaki => "Nagasaki",
            Port::Saigon => "Saigon",
            Port::Manila => "Manila",
            Port::Singapore => "Singapore",
            Port::Batavia => "Batavia",
        }
    }

    /// Whether goods can be traded here.
    pub fn is_market(self) -> bool {
        self != Port::AtSea
    }

    /// Ports a voyage can end at.
    pub fn destinations() -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(|p| p.is_market())
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Port::ALL
            .into_iter()
            .find(|p| {
                p.name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(key.chars())
            })
            .ok_or_else(|| ValidationError::UnknownPort(s.to_string()))
    }
}
