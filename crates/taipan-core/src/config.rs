//! Tunable rule parameters.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Longest voyage a configuration may ask for: one game year.
pub const MAX_TRAVEL_DAYS: u32 = 360;

/// Rule parameters for a game session. Defaults give the classic rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
    /// Days a voyage takes.
    pub travel_days: u32,
    /// Cash cost of mounting one gun.
    pub gun_price: u64,
    /// Prices move by up to this much either side of the base price.
    pub price_jitter: i64,
    /// Smallest hull damage a voyage can inflict.
    pub hazard_min: u32,
    /// Largest hull damage a voyage can inflict.
    pub hazard_max: u32,
    /// Multiplier applied to enemy strength after every voyage.
    pub enemy_strength_growth: f64,
    /// Multiplier applied to enemy damage after every voyage.
    pub enemy_damage_growth: f64,
    /// Cash per percentage point of hull restored at the shipyard.
    pub repair_rate: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            travel_days: 1,
            gun_price: 1000,
            price_jitter: 2,
            hazard_min: 1,
            hazard_max: 5,
            enemy_strength_growth: 1.05,
            enemy_damage_growth: 1.02,
            repair_rate: 10,
        }
    }
}

/// Validate configuration fields.
pub fn validate_config(cfg: &GameConfig) -> Result<(), ValidationError> {
    if cfg.travel_days == 0 {
        return Err(ValidationError::InvalidConfig("travel_days must be > 0"));
    }
    if cfg.travel_days > MAX_TRAVEL_DAYS {
        return Err(ValidationError::InvalidConfig(
            "travel_days must not exceed one year",
        ));
    }
    if cfg.price_jitter < 0 {
        return Err(ValidationError::InvalidConfig("price_jitter must be >= 0"));
    }
    if cfg.hazard_min > cfg.hazard_max {
        return Err(ValidationError::InvalidConfig(
            "hazard_min must not exceed hazard_max",
        ));
    }
    for growth in [cfg.enemy_strength_growth, cfg.enemy_damage_growth] {
        if !growth.is_finite() || growth < 1.0 {
            return Err(ValidationError::InvalidConfig(
                "enemy growth factors must be finite and >= 1",
            ));
        }
    }
    Ok(())
}
