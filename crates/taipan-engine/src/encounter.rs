//! Gating for the Li Yuen protection offer in Hong Kong.
//!
//! The engine decides *whether* the encounter may fire. What Li Yuen asks
//! for is decided by an [`EncounterResolver`] supplied by the caller; the
//! engine only applies the outcome it is handed.

use crate::GameEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use taipan_core::{ActionError, GameDate};
use tracing::info;

/// Read-only facts an encounter resolver may base its decision on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterContext {
    /// Cash on hand.
    pub cash: u64,
    /// Guns mounted.
    pub guns: u32,
    /// Today's date.
    pub date: GameDate,
    /// Current enemy strength.
    pub enemy_strength: f64,
    /// Current enemy damage.
    pub enemy_damage: f64,
}

/// Result of the protection offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiYuenOutcome {
    /// No tribute changes hands.
    Declined,
    /// Tribute paid for protection.
    Tribute(u64),
}

/// Decides the outcome of encounters the engine has cleared to happen.
pub trait EncounterResolver {
    /// Called at most once per session, in Hong Kong, with cash on hand.
    fn li_yuen(&mut self, ctx: &EncounterContext) -> LiYuenOutcome;
}

/// Resolver that never demands anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEncounters;

impl EncounterResolver for NoEncounters {
    fn li_yuen(&mut self, _ctx: &EncounterContext) -> LiYuenOutcome {
        LiYuenOutcome::Declined
    }
}

impl<R: Rng> GameEngine<R> {
    /// Facts handed to encounter resolvers.
    pub fn encounter_context(&self) -> EncounterContext {
        let s = &self.state;
        EncounterContext {
            cash: s.player.cash,
            guns: s.player.ship.guns,
            date: s.date,
            enemy_strength: s.enemy_strength,
            enemy_damage: s.enemy_damage,
        }
    }

    /// Offer Li Yuen's protection. Fires once per session, only in the home
    /// port and only while the firm holds cash. The tribute actually paid is
    /// capped at cash on hand and returned.
    pub fn handle_li_yuen(
        &mut self,
        resolver: &mut dyn EncounterResolver,
    ) -> Result<LiYuenOutcome, ActionError> {
        self.require_home()?;
        if self.state.li_yuen_visited {
            return Err(ActionError::AlreadyResolved);
        }
        if self.state.player.cash == 0 {
            return Err(ActionError::NoCash);
        }
        let ctx = self.encounter_context();
        let outcome = match resolver.li_yuen(&ctx) {
            LiYuenOutcome::Tribute(0) | LiYuenOutcome::Declined => LiYuenOutcome::Declined,
            LiYuenOutcome::Tribute(asked) => {
                let paid = asked.min(self.state.player.cash);
                self.state.player.pay(paid)?;
                LiYuenOutcome::Tribute(paid)
            }
        };
        self.state.li_yuen_visited = true;
        info!(?outcome, "Li Yuen encounter resolved");
        Ok(outcome)
    }
}
