//! Hong Kong services: the bank, the moneylender and the warehouse.

use crate::GameEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use taipan_core::{ActionError, Commodity};
use tracing::info;

/// A money movement at the Hong Kong bank or moneylender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankAction {
    /// Cash into the bank.
    Deposit(u64),
    /// Bank into cash.
    Withdraw(u64),
    /// Take a loan; never refused.
    Borrow(u64),
    /// Pay toward the loan; any excess over the debt is lost.
    Repay(u64),
}

impl<R: Rng> GameEngine<R> {
    /// Whether banking is possible here. Only in the home port.
    pub fn visit_bank(&self) -> Result<(), ActionError> {
        self.require_home()
    }

    /// Perform a bank or moneylender transaction.
    pub fn bank(&mut self, action: BankAction) -> Result<(), ActionError> {
        self.visit_bank()?;
        let player = &mut self.state.player;
        match action {
            BankAction::Deposit(0)
            | BankAction::Withdraw(0)
            | BankAction::Borrow(0)
            | BankAction::Repay(0) => return Err(ActionError::InvalidAmount),
            BankAction::Deposit(amount) => player.deposit(amount)?,
            BankAction::Withdraw(amount) => player.withdraw(amount)?,
            BankAction::Borrow(amount) => player.borrow(amount),
            BankAction::Repay(amount) => player.repay(amount)?,
        }
        info!(?action, cash = player.cash, bank = player.bank, debt = player.debt, "bank");
        Ok(())
    }

    /// Move cash into the bank.
    pub fn deposit(&mut self, amount: u64) -> Result<(), ActionError> {
        self.bank(BankAction::Deposit(amount))
    }

    /// Move money out of the bank.
    pub fn withdraw(&mut self, amount: u64) -> Result<(), ActionError> {
        self.bank(BankAction::Withdraw(amount))
    }

    /// Borrow from the moneylender.
    pub fn borrow(&mut self, amount: u64) -> Result<(), ActionError> {
        self.bank(BankAction::Borrow(amount))
    }

    /// Repay the moneylender.
    pub fn repay(&mut self, amount: u64) -> Result<(), ActionError> {
        self.bank(BankAction::Repay(amount))
    }

    /// Pay as much of the debt as cash allows. Returns the amount paid.
    pub fn settle_debt(&mut self) -> Result<u64, ActionError> {
        self.visit_bank()?;
        let player = &self.state.player;
        if player.debt == 0 {
            return Err(ActionError::NoDebt);
        }
        if player.cash == 0 {
            return Err(ActionError::NoCash);
        }
        let amount = player.cash.min(player.debt);
        self.bank(BankAction::Repay(amount))?;
        Ok(amount)
    }

    /// Move goods from the hold into the warehouse.
    pub fn store_cargo(&mut self, commodity: Commodity, amount: u32) -> Result<(), ActionError> {
        self.require_home()?;
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        let player = &mut self.state.player;
        let free = player.warehouse_available();
        if u64::from(amount) > free {
            return Err(ActionError::WarehouseFull {
                requested: u64::from(amount),
                available: free,
            });
        }
        player.ship.unload(commodity, amount)?;
        player.warehouse[commodity] += amount;
        info!(%commodity, amount, "stored in warehouse");
        Ok(())
    }

    /// Move goods from the warehouse back aboard.
    pub fn retrieve_cargo(&mut self, commodity: Commodity, amount: u32) -> Result<(), ActionError> {
        self.require_home()?;
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        let player = &mut self.state.player;
        let held = player.warehouse[commodity];
        if held < amount {
            return Err(ActionError::InsufficientCargo {
                commodity,
                requested: amount,
                held,
            });
        }
        player.ship.load(commodity, amount)?;
        player.warehouse[commodity] = held - amount;
        info!(%commodity, amount, "retrieved from warehouse");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::*;
    use crate::*;

    #[test]
    fn bank_only_in_hong_kong() {
        let mut e = flat_engine(StartingOption::Cash);
        assert!(e.visit_bank().is_ok());
        place(&mut e, Port::Manila);
        let before = e.state().clone();
        let err = e.deposit(100).unwrap_err();
        assert_eq!(
            err,
            ActionError::WrongLocation {
                required: Port::HongKong,
                actual: Port::Manila
            }
        );
        assert_eq!(err.code(), "wrong_location");
        assert!(e.borrow(100).is_err());
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn deposit_withdraw_borrow_repay() {
        let mut e = flat_engine(StartingOption::Cash);
        e.deposit(600).unwrap();
        assert_eq!((e.player().cash, e.player().bank), (400, 600));
        e.withdraw(100).unwrap();
        assert_eq!((e.player().cash, e.player().bank), (500, 500));
        e.borrow(2000).unwrap();
        assert_eq!((e.player().cash, e.player().debt), (2500, 2000));
        e.repay(500).unwrap();
        assert_eq!((e.player().cash, e.player().debt), (2000, 1500));
        assert_eq!(e.net_worth(), 2000 + 500 - 1500);
        assert!(e.withdraw(501).is_err());
        assert_eq!(e.deposit(0), Err(ActionError::InvalidAmount));
    }

    #[test]
    fn settle_debt_pays_what_it_can() {
        let mut e = flat_engine(StartingOption::Cash);
        assert_eq!(e.settle_debt(), Err(ActionError::NoDebt));
        e.borrow(3000).unwrap();
        e.deposit(4000).unwrap();
        assert_eq!(e.settle_debt(), Err(ActionError::NoCash));

        e.withdraw(1000).unwrap();
        assert_eq!(e.settle_debt().unwrap(), 1000);
        assert_eq!((e.player().cash, e.player().debt), (0, 2000));

        e.withdraw(3000).unwrap();
        assert_eq!(e.settle_debt().unwrap(), 2000);
        assert_eq!((e.player().cash, e.player().debt), (1000, 0));
    }

    #[test]
    fn warehouse_round_trip() {
        let mut e = flat_engine(StartingOption::Cash);
        e.buy(Commodity::Silk, 40).unwrap();
        e.store_cargo(Commodity::Silk, 30).unwrap();
        assert_eq!(e.ship().hold[Commodity::Silk], 10);
        assert_eq!(e.player().warehouse[Commodity::Silk], 30);
        assert_eq!(e.ship().available_space(), 50);

        assert!(matches!(
            e.retrieve_cargo(Commodity::Silk, 31),
            Err(ActionError::InsufficientCargo { held: 30, .. })
        ));
        e.retrieve_cargo(Commodity::Silk, 30).unwrap();
        assert_eq!(e.ship().hold[Commodity::Silk], 40);
        assert_eq!(e.player().warehouse_used(), 0);
    }

    #[test]
    fn retrieve_respects_hold_space() {
        let mut e = flat_engine(StartingOption::Cash);
        state_mut(&mut e).player.warehouse[Commodity::General] = 100;
        let before = e.state().clone();
        assert_eq!(
            e.retrieve_cargo(Commodity::General, 61).unwrap_err().code(),
            "insufficient_space"
        );
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn store_respects_warehouse_limit() {
        let mut e = flat_engine(StartingOption::Cash);
        e.buy(Commodity::General, 20).unwrap();
        state_mut(&mut e).player.warehouse[Commodity::Opium] = 9_990;
        let before = e.state().clone();
        assert_eq!(
            e.store_cargo(Commodity::General, 11),
            Err(ActionError::WarehouseFull {
                requested: 11,
                available: 10
            })
        );
        assert_eq!(e.state(), &before);
        e.store_cargo(Commodity::General, 10).unwrap();
        assert_eq!(e.player().warehouse_available(), 0);
    }

    #[test]
    fn warehouse_only_at_home() {
        let mut e = flat_engine(StartingOption::Cash);
        e.buy(Commodity::Arms, 5).unwrap();
        place(&mut e, Port::Singapore);
        assert_eq!(
            e.store_cargo(Commodity::Arms, 5).unwrap_err().code(),
            "wrong_location"
        );
    }
}
