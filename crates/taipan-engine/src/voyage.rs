//! Travel between ports and the passage of time.

use crate::GameEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use taipan_core::{ActionError, GameDate, Port};
use tracing::info;

/// What happened on a voyage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageReport {
    /// Departure port.
    pub from: Port,
    /// Arrival port.
    pub to: Port,
    /// Date on arrival.
    pub arrived: GameDate,
    /// Hull damage taken at sea.
    pub hazard_damage: u32,
}

impl<R: Rng> GameEngine<R> {
    /// Sail to `port`. The only operation that advances the calendar.
    pub fn travel_to(&mut self, port: Port) -> Result<VoyageReport, ActionError> {
        let from = self.state.current_port;
        if port == from {
            return Err(ActionError::AlreadyThere(port));
        }
        if !port.is_market() {
            return Err(ActionError::NoMarket(port));
        }
        let hazard_damage = self
            .rng
            .gen_range(self.config.hazard_min..=self.config.hazard_max);

        let state = &mut self.state;
        state.current_port = port;
        state.date.advance_days(self.config.travel_days);
        state.enemy_strength *= self.config.enemy_strength_growth;
        state.enemy_damage *= self.config.enemy_damage_growth;
        state.player.ship.take_damage(hazard_damage);

        info!(%from, to = %port, date = %state.date, hazard_damage, "arrived");
        Ok(VoyageReport {
            from,
            to: port,
            arrived: state.date,
            hazard_damage,
        })
    }
}
