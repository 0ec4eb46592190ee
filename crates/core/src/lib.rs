#![warn(clippy::all, missing_docs)]

//! Landing-resource allocation for the control tower.
//!
//! Given an arriving carrier, the tower picks a runway from its descent speed,
//! a terminal from its operator, and a gate from that terminal's pool. Gate
//! pools are the only mutable state and live in a [`GatePoolManager`] handle
//! passed to the [`ControlTower`] at construction.

pub mod config;
pub mod gates;
pub mod models;
pub mod runway;
pub mod terminal;
pub mod tower;

pub use crate::config::AppConfig;
pub use gates::{GateError, GateNumber, GatePool, GatePoolManager, GateSeed, GateStatus};
pub use models::{Carrier, CarrierCategory, DomesticOperator, InternationalOperator, Knots};
pub use runway::{select_runway, Runway};
pub use terminal::{resolve_terminal, Terminal};
pub use tower::{ControlTower, LandingInstructions};
