//! Session-wide game state and its validation.

use crate::calendar::GameDate;
use crate::error::ValidationError;
use crate::player::{Player, WAREHOUSE_CAPACITY};
use crate::port::Port;
use crate::ship::{Ship, BASE_CAPACITY, GUN_SPACE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Starting enemy hit points.
pub const INITIAL_ENEMY_STRENGTH: f64 = 20.0;
/// Starting damage dealt by enemies.
pub const INITIAL_ENEMY_DAMAGE: f64 = 0.5;

/// The player's opening choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingOption {
    /// 1000 cash, unarmed ship.
    Cash,
    /// 400 cash, five guns.
    Guns,
}

impl StartingOption {
    /// Opening cash.
    pub fn cash(self) -> u64 {
        match self {
            StartingOption::Cash => 1000,
            StartingOption::Guns => 400,
        }
    }

    /// Opening gun count.
    pub fn guns(self) -> u32 {
        match self {
            StartingOption::Cash => 0,
            StartingOption::Guns => 5,
        }
    }

    /// Opening ship for this choice.
    pub fn ship(self) -> Ship {
        let guns = self.guns();
        Ship {
            capacity: BASE_CAPACITY - guns * GUN_SPACE,
            guns,
            ..Ship::default()
        }
    }
}

impl fmt::Display for StartingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartingOption::Cash => f.write_str("cash"),
            StartingOption::Guns => f.write_str("guns"),
        }
    }
}

impl FromStr for StartingOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(StartingOption::Cash),
            "guns" => Ok(StartingOption::Guns),
            _ => Err(ValidationError::UnknownStart(s.to_string())),
        }
    }
}

/// Everything that changes during a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The trading firm.
    pub player: Player,
    /// Fixed list of every location, in table order.
    pub ports: Vec<Port>,
    /// Where the ship is; always a member of `ports`.
    pub current_port: Port,
    /// Current calendar date.
    pub date: GameDate,
    /// Li Yuen's protection offer has been dealt with this session.
    pub li_yuen_visited: bool,
    /// The moneylender has issued a warning.
    pub wu_warning: bool,
    /// Bailouts received from the moneylender.
    pub wu_bailout: u32,
    /// Enemy hit points; grows with every voyage.
    pub enemy_strength: f64,
    /// Enemy damage per hit; grows with every voyage.
    pub enemy_damage: f64,
}

impl GameState {
    /// Fresh session in Hong Kong on 1 January 1860.
    pub fn new(firm_name: impl Into<String>, start: StartingOption) -> Self {
        Self {
            player: Player::new(firm_name, start.cash(), start.ship()),
            ports: Port::ALL.to_vec(),
            current_port: Port::HOME,
            date: GameDate::default(),
            li_yuen_visited: false,
            wu_warning: false,
            wu_bailout: 0,
            enemy_strength: INITIAL_ENEMY_STRENGTH,
            enemy_damage: INITIAL_ENEMY_DAMAGE,
        }
    }

    /// Whether the ship is at the home port.
    pub fn at_home(&self) -> bool {
        self.current_port == Port::HOME
    }
}

/// Validate every structural invariant of a state, e.g. after loading a snapshot.
pub fn validate_state(state: &GameState) -> Result<(), ValidationError> {
    if state.ports.as_slice() != Port::ALL.as_slice() {
        return Err(ValidationError::PortListCorrupted);
    }
    state.date.validate()?;

    let ship = &state.player.ship;
    let expected = u64::from(BASE_CAPACITY);
    let actual = u64::from(ship.capacity) + u64::from(ship.guns) * u64::from(GUN_SPACE);
    if actual != expected {
        return Err(ValidationError::ArmamentMismatch {
            capacity: u64::from(ship.capacity),
            guns: ship.guns,
        });
    }
    if ship.total_cargo() > u64::from(ship.capacity) {
        return Err(ValidationError::HoldOverCapacity {
            cargo: ship.total_cargo(),
            capacity: u64::from(ship.capacity),
        });
    }
    if state.player.warehouse_used() > WAREHOUSE_CAPACITY {
        return Err(ValidationError::WarehouseOverCapacity(
            state.player.warehouse_used(),
        ));
    }
    if !(state.enemy_strength.is_finite() && state.enemy_damage.is_finite()) {
        return Err(ValidationError::InvalidConfig("enemy scalars must be finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Commodity;

    #[test]
    fn cash_start() {
        let s = GameState::new("Dent & Co", StartingOption::Cash);
        assert_eq!(s.player.cash, 1000);
        assert_eq!(s.player.ship.guns, 0);
        assert_eq!(s.player.ship.capacity, 60);
        assert_eq!(s.current_port, Port::HongKong);
        assert_eq!(s.ports.len(), 8);
        validate_state(&s).unwrap();
    }

    #[test]
    fn guns_start() {
        let s = GameState::new("Dent & Co", StartingOption::Guns);
        assert_eq!(s.player.cash, 400);
        assert_eq!(s.player.ship.guns, 5);
        assert_eq!(s.player.ship.capacity, 10);
        validate_state(&s).unwrap();
    }

    #[test]
    fn parse_starting_option() {
        assert_eq!("Cash".parse::<StartingOption>().unwrap(), StartingOption::Cash);
        assert_eq!("guns".parse::<StartingOption>().unwrap(), StartingOption::Guns);
        assert!("ships".parse::<StartingOption>().is_err());
    }

    #[test]
    fn snapshot_roundtrip_is_lossless() {
        let mut s = GameState::new("Butterfield", StartingOption::Guns);
        s.player.ship.hold[Commodity::Silk] = 4;
        s.player.warehouse[Commodity::Opium] = 120;
        s.player.borrow(700);
        s.current_port = Port::Nagasaki;
        s.date.advance_days(45);
        s.li_yuen_visited = true;
        s.wu_bailout = 2;
        s.enemy_strength = 25.5;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        validate_state(&back).unwrap();
    }

    #[test]
    fn detects_corrupted_snapshots() {
        let mut s = GameState::new("Russell", StartingOption::Cash);
        s.ports.pop();
        assert_eq!(validate_state(&s), Err(ValidationError::PortListCorrupted));

        let mut s = GameState::new("Russell", StartingOption::Cash);
        s.player.ship.hold[Commodity::Arms] = 61;
        assert!(matches!(
            validate_state(&s),
            Err(ValidationError::HoldOverCapacity { .. })
        ));

        let mut s = GameState::new("Russell", StartingOption::Cash);
        s.date.day = 31;
        assert!(matches!(
            validate_state(&s),
            Err(ValidationError::DateOutOfRange { .. })
        ));

        let mut s = GameState::new("Russell", StartingOption::Cash);
        s.player.ship.guns = 1;
        assert!(matches!(
            validate_state(&s),
            Err(ValidationError::ArmamentMismatch { .. })
        ));
    }
}
