//! Single entry point for player actions, for front ends that queue input.

use crate::{BankAction, GameEngine, TradeReceipt, VoyageReport};
use rand::Rng;
use serde::{Deserialize, Serialize};
use taipan_core::{ActionError, Commodity, Port};
use tracing::debug;

/// A player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Buy goods at the current port.
    Buy(Commodity, u32),
    /// Sell goods at the current port.
    Sell(Commodity, u32),
    /// Sail to another port.
    Travel(Port),
    /// Bank or moneylender transaction (Hong Kong only).
    Bank(BankAction),
    /// Pay off as much debt as possible (Hong Kong only).
    SettleDebt,
    /// Hold into warehouse (Hong Kong only).
    Store(Commodity, u32),
    /// Warehouse into hold (Hong Kong only).
    Retrieve(Commodity, u32),
    /// Buy and mount a gun.
    AddGun,
    /// Dismount a gun.
    RemoveGun,
    /// Full hull repair.
    Repair,
}

/// Result of an accepted command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A trade went through.
    Traded(TradeReceipt),
    /// The ship arrived somewhere.
    Arrived(VoyageReport),
    /// Cash was paid (debt settled or repair bought).
    Paid(u64),
    /// Accepted with nothing further to report.
    Done,
}

impl<R: Rng> GameEngine<R> {
    /// Run one command. Rejections are logged and returned; state is only
    /// changed when the command is accepted.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, ActionError> {
        let result = match command {
            Command::Buy(c, amount) => self.buy(c, amount).map(Outcome::Traded),
            Command::Sell(c, amount) => self.sell(c, amount).map(Outcome::Traded),
            Command::Travel(port) => self.travel_to(port).map(Outcome::Arrived),
            Command::Bank(action) => self.bank(action).map(|_| Outcome::Done),
            Command::SettleDebt => self.settle_debt().map(Outcome::Paid),
            Command::Store(c, amount) => self.store_cargo(c, amount).map(|_| Outcome::Done),
            Command::Retrieve(c, amount) => self.retrieve_cargo(c, amount).map(|_| Outcome::Done),
            Command::AddGun => self.add_gun().map(|_| Outcome::Done),
            Command::RemoveGun => self.remove_gun().map(|_| Outcome::Done),
            Command::Repair => self.repair_ship().map(Outcome::Paid),
        };
        if let Err(err) = &result {
            debug!(?command, reason = err.code(), "rejected: {err}");
        }
        result
    }
}
