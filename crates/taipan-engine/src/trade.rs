//! Buying and selling at the current port.

use crate::GameEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use taipan_core::{ActionError, Commodity};
use taipan_econ::trade_value;
use tracing::info;

/// A completed trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// Goods traded.
    pub commodity: Commodity,
    /// Units traded.
    pub amount: u32,
    /// Price per unit at the moment of the trade.
    pub unit_price: u64,
    /// Cash that changed hands.
    pub total: u64,
}

impl<R: Rng> GameEngine<R> {
    /// Check a purchase at `unit_price` without performing it. Hold space
    /// is checked before cash, so a purchase that fits neither reports space.
    pub fn check_buy(&self, amount: u32, unit_price: u64) -> Result<u64, ActionError> {
        self.check_buy_volume(amount)?;
        let player = &self.state.player;
        let total = trade_value(unit_price, amount).ok_or(ActionError::InsufficientCash {
            needed: u64::MAX,
            available: player.cash,
        })?;
        if !player.can_afford(total) {
            return Err(ActionError::InsufficientCash {
                needed: total,
                available: player.cash,
            });
        }
        Ok(total)
    }

    fn check_buy_volume(&self, amount: u32) -> Result<(), ActionError> {
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        let ship = &self.state.player.ship;
        if !ship.can_load(amount) {
            return Err(ActionError::InsufficientSpace {
                requested: u64::from(amount),
                available: ship.available_space(),
            });
        }
        Ok(())
    }

    /// Check a sale without performing it.
    pub fn check_sell(&self, commodity: Commodity, amount: u32) -> Result<(), ActionError> {
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        let held = self.state.player.ship.hold[commodity];
        if held < amount {
            return Err(ActionError::InsufficientCargo {
                commodity,
                requested: amount,
                held,
            });
        }
        Ok(())
    }

    /// Buy at the price quoted now. Amount and space are checked before a
    /// price is drawn.
    pub fn buy(&mut self, commodity: Commodity, amount: u32) -> Result<TradeReceipt, ActionError> {
        self.check_buy_volume(amount)?;
        let unit_price = self.quote(commodity)?;
        let total = self.check_buy(amount, unit_price)?;
        let player = &mut self.state.player;
        player.pay(total)?;
        player.ship.load(commodity, amount)?;
        info!(%commodity, amount, unit_price, total, "bought");
        Ok(TradeReceipt {
            commodity,
            amount,
            unit_price,
            total,
        })
    }

    /// Sell at the price quoted now.
    pub fn sell(&mut self, commodity: Commodity, amount: u32) -> Result<TradeReceipt, ActionError> {
        self.check_sell(commodity, amount)?;
        let unit_price = self.quote(commodity)?;
        let total = trade_value(unit_price, amount).unwrap_or(u64::MAX);
        let player = &mut self.state.player;
        player.ship.unload(commodity, amount)?;
        player.earn(total);
        info!(%commodity, amount, unit_price, total, "sold");
        Ok(TradeReceipt {
            commodity,
            amount,
            unit_price,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::*;
    use crate::*;

    #[test]
    fn buy_opium_in_shanghai() {
        let mut e = flat_engine(StartingOption::Cash);
        place(&mut e, Port::Shanghai);
        let receipt = e.buy(Commodity::Opium, 5).unwrap();
        assert_eq!(receipt.unit_price, 16);
        assert_eq!(receipt.total, 80);
        assert_eq!(e.player().cash, 920);
        assert_eq!(e.ship().hold[Commodity::Opium], 5);

        let before = e.state().clone();
        let err = e.buy(Commodity::Opium, 100).unwrap_err();
        assert_eq!(err.code(), "insufficient_space");
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn cash_shortfall_is_reported_separately() {
        let mut e = flat_engine(StartingOption::Cash);
        place(&mut e, Port::Shanghai);
        state_mut(&mut e).player.cash = 100;
        let before = e.state().clone();
        let err = e.buy(Commodity::Opium, 10).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientCash {
                needed: 160,
                available: 100
            }
        );
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn space_shortfall_wins_over_cash() {
        let mut e = flat_engine(StartingOption::Cash);
        place(&mut e, Port::Shanghai);
        state_mut(&mut e).player.cash = 10;
        assert_eq!(
            e.buy(Commodity::Opium, 61),
            Err(ActionError::InsufficientSpace {
                requested: 61,
                available: 60
            })
        );
        assert_eq!(e.check_buy(61, 100).unwrap_err().code(), "insufficient_space");
    }

    #[test]
    fn rejected_buy_leaves_price_sequence_alone() {
        let mut a = GameEngine::new_game("A", StartingOption::Cash, GameConfig::default()).unwrap();
        let mut b = a.clone();
        assert_eq!(a.buy(Commodity::Silk, 0), Err(ActionError::InvalidAmount));
        assert!(a.buy(Commodity::Silk, 61).is_err());
        let ra = a.buy(Commodity::Silk, 1).unwrap();
        let rb = b.buy(Commodity::Silk, 1).unwrap();
        assert_eq!(ra.unit_price, rb.unit_price);
    }

    #[test]
    fn buy_then_sell_is_zero_sum_at_flat_prices() {
        let mut e = flat_engine(StartingOption::Cash);
        let cash = e.player().cash;
        e.buy(Commodity::Arms, 20).unwrap();
        e.sell(Commodity::Arms, 20).unwrap();
        assert_eq!(e.player().cash, cash);
        assert!(e.ship().hold.is_empty());
    }

    #[test]
    fn cannot_sell_what_is_not_aboard() {
        let mut e = flat_engine(StartingOption::Cash);
        e.buy(Commodity::Silk, 3).unwrap();
        let before = e.state().clone();
        assert!(matches!(
            e.sell(Commodity::Silk, 4),
            Err(ActionError::InsufficientCargo {
                requested: 4,
                held: 3,
                ..
            })
        ));
        assert_eq!(e.sell(Commodity::Silk, 0), Err(ActionError::InvalidAmount));
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn no_trading_at_sea() {
        let mut e = flat_engine(StartingOption::Cash);
        place(&mut e, Port::AtSea);
        assert_eq!(
            e.buy(Commodity::General, 1),
            Err(ActionError::NoMarket(Port::AtSea))
        );
    }

    #[test]
    fn jittered_price_stays_close_to_base() {
        let mut e = GameEngine::new_game("J", StartingOption::Cash, GameConfig::default()).unwrap();
        for _ in 0..50 {
            let p = e.quote(Commodity::General).unwrap();
            assert!((8..=12).contains(&p), "price {p}");
        }
    }
}
