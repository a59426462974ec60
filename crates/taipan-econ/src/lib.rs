#![deny(warnings)]

//! Market pricing for Taipan.
//!
//! Prices are the base-table price nudged by a small uniform jitter and are
//! drawn fresh on every quote; no market snapshot is stored between calls.
//! This module provides:
//! - Single quotes and full price lists for a port
//! - Checked trade totals
//! - Shipyard repair costs
//! - Seeded RNG construction for reproducible sessions

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use taipan_core::{Commodity, Port, Ship};
use thiserror::Error;
use tracing::debug;

/// Errors produced by pricing helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// The location has no market.
    #[error("no market at {0}")]
    NoMarket(Port),
    /// Jitter must be non-negative.
    #[error("invalid price jitter: {0}")]
    InvalidJitter(i64),
}

/// Deterministic RNG for a session seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Current price of `commodity` at `port`.
///
/// price = max(1, base + U{-jitter..=jitter}). Each call draws again.
///
/// Example:
/// let mut rng = seeded_rng(7);
/// let p = quote(Commodity::Opium, Port::Shanghai, 0, &mut rng).unwrap();
/// assert_eq!(p, 16);
pub fn quote<R: Rng + ?Sized>(
    commodity: Commodity,
    port: Port,
    jitter: i64,
    rng: &mut R,
) -> Result<u64, EconError> {
    if !port.is_market() {
        return Err(EconError::NoMarket(port));
    }
    if jitter < 0 {
        return Err(EconError::InvalidJitter(jitter));
    }
    let base = i64::try_from(commodity.base_price(port)).unwrap_or(i64::MAX);
    let delta: i64 = rng.gen_range(-jitter..=jitter);
    let price = base.saturating_add(delta).max(1) as u64;
    debug!(%commodity, %port, price, "quoted");
    Ok(price)
}

/// Prices for all four commodities at one port, freshly drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    /// Where the prices were quoted.
    pub port: Port,
    prices: [u64; Commodity::COUNT],
}

impl PriceList {
    /// Iterate `(commodity, price)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Commodity, u64)> + '_ {
        Commodity::ALL.iter().map(move |&c| (c, self[c]))
    }

    /// Commodity with the lowest price; ties go to the earlier table row.
    pub fn cheapest(&self) -> (Commodity, u64) {
        let mut best = (Commodity::Opium, self[Commodity::Opium]);
        for (c, p) in self.iter() {
            if p < best.1 {
                best = (c, p);
            }
        }
        best
    }
}

impl Index<Commodity> for PriceList {
    type Output = u64;

    fn index(&self, c: Commodity) -> &u64 {
        &self.prices[c.index()]
    }
}

/// Quote every commodity at `port`.
pub fn price_list<R: Rng + ?Sized>(
    port: Port,
    jitter: i64,
    rng: &mut R,
) -> Result<PriceList, EconError> {
    let mut prices = [0u64; Commodity::COUNT];
    for c in Commodity::ALL {
        prices[c.index()] = quote(c, port, jitter, rng)?;
    }
    Ok(PriceList { port, prices })
}

/// `unit_price * amount`, or `None` on overflow.
pub fn trade_value(unit_price: u64, amount: u32) -> Option<u64> {
    unit_price.checked_mul(u64::from(amount))
}

/// Cash to restore the hull to full: `(100 - condition%) * rate`.
///
/// Example:
/// let mut ship = Ship::default();
/// ship.take_damage(6); // 90% remaining
/// assert_eq!(repair_cost(&ship, 10), 100);
pub fn repair_cost(ship: &Ship, rate: u64) -> u64 {
    let missing = 100u64.saturating_sub(u64::from(ship.condition_percent()));
    missing.saturating_mul(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_jitter_gives_base_price() {
        let mut rng = seeded_rng(1);
        for port in Port::destinations() {
            for c in Commodity::ALL {
                assert_eq!(quote(c, port, 0, &mut rng).unwrap(), c.base_price(port));
            }
        }
    }

    #[test]
    fn at_sea_has_no_market() {
        let mut rng = seeded_rng(1);
        assert_eq!(
            quote(Commodity::Silk, Port::AtSea, 2, &mut rng),
            Err(EconError::NoMarket(Port::AtSea))
        );
        assert!(price_list(Port::AtSea, 2, &mut rng).is_err());
    }

    #[test]
    fn negative_jitter_rejected() {
        let mut rng = seeded_rng(1);
        assert_eq!(
            quote(Commodity::Arms, Port::Saigon, -1, &mut rng),
            Err(EconError::InvalidJitter(-1))
        );
    }

    #[test]
    fn quotes_are_seeded() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);
        let la = price_list(Port::Manila, 2, &mut a).unwrap();
        let lb = price_list(Port::Manila, 2, &mut b).unwrap();
        assert_eq!(la, lb);
    }

    #[test]
    fn cheapest_prefers_lowest() {
        let mut rng = seeded_rng(3);
        // Hong Kong base: opium 11, silk 11, arms 12, general 10
        let list = price_list(Port::HongKong, 0, &mut rng).unwrap();
        assert_eq!(list.cheapest(), (Commodity::General, 10));
        assert_eq!(list.iter().count(), 4);
    }

    #[test]
    fn trade_value_checks_overflow() {
        assert_eq!(trade_value(16, 5), Some(80));
        assert_eq!(trade_value(u64::MAX, 2), None);
    }

    #[test]
    fn repair_cost_scales_with_damage() {
        let mut ship = Ship::default();
        assert_eq!(repair_cost(&ship, 10), 0);
        ship.take_damage(6);
        assert_eq!(repair_cost(&ship, 10), 100);
        ship.take_damage(200);
        assert_eq!(repair_cost(&ship, 10), 1000);
    }

    proptest! {
        #[test]
        fn price_stays_in_band_and_positive(seed in any::<u64>(), jitter in 0i64..20, c in 0usize..4, p in 1usize..8) {
            let commodity = Commodity::ALL[c];
            let port = Port::from_index(p).unwrap();
            let mut rng = seeded_rng(seed);
            let price = quote(commodity, port, jitter, &mut rng).unwrap();
            let base = commodity.base_price(port) as i64;
            prop_assert!(price >= 1);
            prop_assert!(price as i64 <= base + jitter);
            prop_assert!(price as i64 >= (base - jitter).max(1));
        }
    }
}
