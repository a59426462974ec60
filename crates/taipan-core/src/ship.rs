//! The player's vessel: cargo hold, armament and hull condition.

use crate::commodity::{Cargo, Commodity};
use crate::error::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cargo capacity of an unarmed ship.
pub const BASE_CAPACITY: u32 = 60;

/// Cargo units each mounted gun displaces.
pub const GUN_SPACE: u32 = 10;

/// Descriptive hull state derived from damage relative to capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipCondition {
    /// 0% or less remaining.
    Critical,
    /// Up to 20% remaining.
    Poor,
    /// Up to 40% remaining.
    Fair,
    /// Up to 60% remaining.
    Good,
    /// Up to 80% remaining.
    Prime,
    /// Over 80% remaining.
    Perfect,
}

impl fmt::Display for ShipCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShipCondition::Critical => "Critical",
            ShipCondition::Poor => "Poor",
            ShipCondition::Fair => "Fair",
            ShipCondition::Good => "Good",
            ShipCondition::Prime => "Prime",
            ShipCondition::Perfect => "Perfect",
        };
        f.write_str(s)
    }
}

/// Ship status. Hold total never exceeds capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Cargo units available for goods (shrinks as guns are mounted).
    pub capacity: u32,
    /// Accumulated hull damage; 0 is undamaged.
    pub damage: u32,
    /// Mounted guns.
    pub guns: u32,
    /// Goods aboard.
    pub hold: Cargo,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            capacity: BASE_CAPACITY,
            damage: 0,
            guns: 0,
            hold: Cargo::new(),
        }
    }
}

impl Ship {
    /// Total units of all goods aboard.
    pub fn total_cargo(&self) -> u64 {
        self.hold.total()
    }

    /// Free cargo space.
    pub fn available_space(&self) -> u64 {
        u64::from(self.capacity).saturating_sub(self.total_cargo())
    }

    /// Whether `amount` more units fit.
    pub fn can_load(&self, amount: u32) -> bool {
        self.available_space() >= u64::from(amount)
    }

    /// Add goods to the hold.
    pub fn load(&mut self, commodity: Commodity, amount: u32) -> Result<(), ActionError> {
        if !self.can_load(amount) {
            return Err(ActionError::InsufficientSpace {
                requested: u64::from(amount),
                available: self.available_space(),
            });
        }
        self.hold[commodity] += amount;
        Ok(())
    }

    /// Remove goods from the hold.
    pub fn unload(&mut self, commodity: Commodity, amount: u32) -> Result<(), ActionError> {
        let held = self.hold[commodity];
        if held < amount {
            return Err(ActionError::InsufficientCargo {
                commodity,
                requested: amount,
                held,
            });
        }
        self.hold[commodity] = held - amount;
        Ok(())
    }

    /// Checks that one more gun can be mounted without overloading the hold.
    pub fn check_add_gun(&self) -> Result<(), ActionError> {
        let cargo = self.total_cargo();
        match self.capacity.checked_sub(GUN_SPACE) {
            Some(reduced) if u64::from(reduced) >= cargo => Ok(()),
            _ => Err(ActionError::CapacityBelowCargo {
                capacity: u64::from(self.capacity.saturating_sub(GUN_SPACE)),
                cargo,
            }),
        }
    }

    /// Mount a gun, giving up [`GUN_SPACE`] units of capacity.
    pub fn add_gun(&mut self) -> Result<(), ActionError> {
        self.check_add_gun()?;
        self.guns += 1;
        self.capacity -= GUN_SPACE;
        Ok(())
    }

    /// Dismount a gun, recovering [`GUN_SPACE`] units of capacity.
    pub fn remove_gun(&mut self) -> Result<(), ActionError> {
        if self.guns == 0 {
            return Err(ActionError::NoGuns);
        }
        self.guns -= 1;
        self.capacity += GUN_SPACE;
        Ok(())
    }

    /// Hull remaining as a percentage: `100 - damage / capacity * 100`.
    /// Unclamped; goes negative once damage exceeds capacity.
    pub fn remaining(&self) -> f64 {
        if self.capacity == 0 {
            return if self.damage == 0 { 100.0 } else { 0.0 };
        }
        100.0 - f64::from(self.damage) * 100.0 / f64::from(self.capacity)
    }

    /// Remaining hull percentage clamped to `0..=100`.
    pub fn condition_percent(&self) -> u32 {
        self.remaining().clamp(0.0, 100.0).floor() as u32
    }

    /// Descriptive tier of the hull.
    pub fn condition(&self) -> ShipCondition {
        let status = self.remaining();
        if status <= 0.0 {
            ShipCondition::Critical
        } else if status <= 20.0 {
            ShipCondition::Poor
        } else if status <= 40.0 {
            ShipCondition::Fair
        } else if status <= 60.0 {
            ShipCondition::Good
        } else if status <= 80.0 {
            ShipCondition::Prime
        } else {
            ShipCondition::Perfect
        }
    }

    /// Take hull damage.
    pub fn take_damage(&mut self, amount: u32) {
        self.damage = self.damage.saturating_add(amount);
    }

    /// Reduce damage by `amount`, never below zero.
    pub fn repair(&mut self, amount: u32) {
        self.damage = self.damage.saturating_sub(amount);
    }
}
