#![deny(warnings)]

//! Core domain models and invariants for Taipan.
//!
//! Commodities, ports, the ship, the trading firm and the session state,
//! with the capacity and money rules each of them enforces. Every type is
//! serializable so a full session can be snapshotted losslessly.

pub mod calendar;
pub mod commodity;
pub mod config;
pub mod error;
pub mod player;
pub mod port;
pub mod ship;
pub mod state;

pub use calendar::GameDate;
pub use commodity::{Cargo, Commodity};
pub use config::{validate_config, GameConfig, MAX_TRAVEL_DAYS};
pub use error::{ActionError, ValidationError};
pub use player::{Player, WAREHOUSE_CAPACITY};
pub use port::Port;
pub use ship::{Ship, ShipCondition, BASE_CAPACITY, GUN_SPACE};
pub use state::{validate_state, GameState, StartingOption};
