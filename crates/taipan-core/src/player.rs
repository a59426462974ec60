//! The trading firm: money, creditor debt, warehouse and ship.

use crate::commodity::Cargo;
use crate::error::ActionError;
use crate::ship::Ship;
use serde::{Deserialize, Serialize};

/// Units the home-port warehouse can hold across all commodities.
pub const WAREHOUSE_CAPACITY: u64 = 10_000;

/// Player's status including finances and firm name.
///
/// Money fields are unsigned; every spending operation checks its balance
/// first and leaves the player untouched when the check fails.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Name of the trading firm.
    pub firm_name: String,
    /// Cash on hand.
    pub cash: u64,
    /// Bank balance in Hong Kong.
    pub bank: u64,
    /// Owed to the moneylender.
    pub debt: u64,
    /// Goods stored at the home port.
    pub warehouse: Cargo,
    /// The firm's ship.
    pub ship: Ship,
}

impl Player {
    /// New firm with the given name and starting cash.
    pub fn new(firm_name: impl Into<String>, cash: u64, ship: Ship) -> Self {
        Self {
            firm_name: firm_name.into(),
            cash,
            ship,
            ..Self::default()
        }
    }

    /// Whether `amount` cash is on hand.
    pub fn can_afford(&self, amount: u64) -> bool {
        self.cash >= amount
    }

    fn check_cash(&self, amount: u64) -> Result<(), ActionError> {
        if self.can_afford(amount) {
            Ok(())
        } else {
            Err(ActionError::InsufficientCash {
                needed: amount,
                available: self.cash,
            })
        }
    }

    /// Spend cash.
    pub fn pay(&mut self, amount: u64) -> Result<(), ActionError> {
        self.check_cash(amount)?;
        self.cash -= amount;
        Ok(())
    }

    /// Receive cash.
    pub fn earn(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Move cash into the bank.
    pub fn deposit(&mut self, amount: u64) -> Result<(), ActionError> {
        self.check_cash(amount)?;
        self.cash -= amount;
        self.bank = self.bank.saturating_add(amount);
        Ok(())
    }

    /// Move money from the bank to cash.
    pub fn withdraw(&mut self, amount: u64) -> Result<(), ActionError> {
        if self.bank < amount {
            return Err(ActionError::InsufficientBank {
                requested: amount,
                available: self.bank,
            });
        }
        self.bank -= amount;
        self.cash = self.cash.saturating_add(amount);
        Ok(())
    }

    /// Borrow from the moneylender. Credit is never refused.
    pub fn borrow(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
        self.debt = self.debt.saturating_add(amount);
    }

    /// Pay `amount` toward debt. Paying more than is owed clears the debt
    /// and the excess is lost.
    pub fn repay(&mut self, amount: u64) -> Result<(), ActionError> {
        self.check_cash(amount)?;
        self.cash -= amount;
        self.debt = self.debt.saturating_sub(amount);
        Ok(())
    }

    /// `cash + bank - debt`; negative when debt outweighs assets.
    pub fn net_worth(&self) -> i64 {
        let signed = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        signed(self.cash)
            .saturating_add(signed(self.bank))
            .saturating_sub(signed(self.debt))
    }

    /// Units stored in the warehouse.
    pub fn warehouse_used(&self) -> u64 {
        self.warehouse.total()
    }

    /// Free warehouse space.
    pub fn warehouse_available(&self) -> u64 {
        WAREHOUSE_CAPACITY.saturating_sub(self.warehouse_used())
    }
}
