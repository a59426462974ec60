//! Error types for rejected commands and broken invariants.

use crate::commodity::Commodity;
use crate::port::Port;
use thiserror::Error;

/// A command was refused. State is untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Amount must be strictly positive.
    #[error("amount must be greater than zero")]
    InvalidAmount,
    /// Not enough cash on hand.
    #[error("not enough cash: need {needed}, have {available}")]
    InsufficientCash { needed: u64, available: u64 },
    /// Not enough free cargo space in the hold.
    #[error("not enough cargo space: requested {requested}, free {available}")]
    InsufficientSpace { requested: u64, available: u64 },
    /// Not enough of a commodity to sell or move.
    #[error("not enough {commodity}: requested {requested}, held {held}")]
    InsufficientCargo {
        commodity: Commodity,
        requested: u32,
        held: u32,
    },
    /// Not enough money in the bank.
    #[error("not enough in the bank: requested {requested}, balance {available}")]
    InsufficientBank { requested: u64, available: u64 },
    /// Cannot remove a gun from an unarmed ship.
    #[error("ship has no guns")]
    NoGuns,
    /// Mounting a gun would leave less capacity than the cargo aboard.
    #[error("no room for a gun: capacity {capacity}, cargo {cargo}")]
    CapacityBelowCargo { capacity: u64, cargo: u64 },
    /// The action is only available at another port.
    #[error("only available in {required}, currently in {actual}")]
    WrongLocation { required: Port, actual: Port },
    /// Travel to the port the ship is already in.
    #[error("already in {0}")]
    AlreadyThere(Port),
    /// No market at this location.
    #[error("no market at {0}")]
    NoMarket(Port),
    /// Warehouse cannot take that much.
    #[error("warehouse full: requested {requested}, free {available}")]
    WarehouseFull { requested: u64, available: u64 },
    /// Nothing is owed.
    #[error("no debt outstanding")]
    NoDebt,
    /// Ship is undamaged.
    #[error("ship needs no repair")]
    NothingToRepair,
    /// One-time encounter already happened this session.
    #[error("encounter already resolved")]
    AlreadyResolved,
    /// Action needs cash on hand.
    #[error("no cash on hand")]
    NoCash,
}

impl ActionError {
    /// Stable reason code for presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::InvalidAmount => "invalid_amount",
            ActionError::InsufficientCash { .. } => "insufficient_cash",
            ActionError::InsufficientSpace { .. } => "insufficient_space",
            ActionError::InsufficientCargo { .. } => "insufficient_cargo",
            ActionError::InsufficientBank { .. } => "insufficient_bank",
            ActionError::NoGuns => "no_guns",
            ActionError::CapacityBelowCargo { .. } => "capacity_below_cargo",
            ActionError::WrongLocation { .. } => "wrong_location",
            ActionError::AlreadyThere(_) => "already_there",
            ActionError::NoMarket(_) => "no_market",
            ActionError::WarehouseFull { .. } => "warehouse_full",
            ActionError::NoDebt => "no_debt",
            ActionError::NothingToRepair => "nothing_to_repair",
            ActionError::AlreadyResolved => "already_resolved",
            ActionError::NoCash => "no_cash",
        }
    }
}

/// Validation errors for state and configuration invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Calendar field outside its rollover range.
    #[error("date {day}/{month}/{year} is out of range")]
    DateOutOfRange { day: u32, month: u32, year: u32 },
    /// Hold carries more than the ship's capacity.
    #[error("hold carries {cargo} units but capacity is {capacity}")]
    HoldOverCapacity { cargo: u64, capacity: u64 },
    /// Warehouse exceeds its fixed size.
    #[error("warehouse stores {0} units, over the limit")]
    WarehouseOverCapacity(u64),
    /// Capacity does not match the gun count.
    #[error("capacity {capacity} inconsistent with {guns} guns")]
    ArmamentMismatch { capacity: u64, guns: u32 },
    /// Port list is not the fixed eight locations in order.
    #[error("port list is corrupted")]
    PortListCorrupted,
    /// Numeric field must be finite and sensible.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Unrecognised commodity name.
    #[error("unknown commodity: {0}")]
    UnknownCommodity(String),
    /// Unrecognised port name.
    #[error("unknown port: {0}")]
    UnknownPort(String),
    /// Unrecognised starting option.
    #[error("unknown starting option: {0} (expected \"cash\" or \"guns\")")]
    UnknownStart(String),
}
