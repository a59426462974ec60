//! Armament and hull repairs.

use crate::GameEngine;
use rand::Rng;
use taipan_core::ActionError;
use taipan_econ::repair_cost;
use tracing::info;

impl<R: Rng> GameEngine<R> {
    /// Buy and mount a gun. Affordability and hold space are both checked
    /// before any cash moves.
    pub fn add_gun(&mut self) -> Result<(), ActionError> {
        let price = self.config.gun_price;
        let player = &mut self.state.player;
        if !player.can_afford(price) {
            return Err(ActionError::InsufficientCash {
                needed: price,
                available: player.cash,
            });
        }
        player.ship.check_add_gun()?;
        player.pay(price)?;
        player.ship.add_gun()?;
        info!(guns = player.ship.guns, capacity = player.ship.capacity, "gun mounted");
        Ok(())
    }

    /// Dismount a gun. The purchase price is not refunded.
    pub fn remove_gun(&mut self) -> Result<(), ActionError> {
        let ship = &mut self.state.player.ship;
        ship.remove_gun()?;
        info!(guns = ship.guns, capacity = ship.capacity, "gun removed");
        Ok(())
    }

    /// Price of a full repair here and now.
    pub fn repair_quote(&self) -> u64 {
        repair_cost(&self.state.player.ship, self.config.repair_rate)
    }

    /// Repair the hull completely. Returns the amount paid.
    pub fn repair_ship(&mut self) -> Result<u64, ActionError> {
        if self.state.player.ship.damage == 0 {
            return Err(ActionError::NothingToRepair);
        }
        let cost = self.repair_quote();
        let player = &mut self.state.player;
        player.pay(cost)?;
        let damage = player.ship.damage;
        player.ship.repair(damage);
        info!(cost, "ship repaired");
        Ok(cost)
    }
}
