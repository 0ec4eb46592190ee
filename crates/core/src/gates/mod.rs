//! Gate occupancy pools.

/// Shared handle over every terminal's pool.
pub mod manager;
/// Occupancy state of a single terminal.
pub mod pool;
/// Startup gate layouts.
pub mod seed;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::terminal::Terminal;

pub use manager::GatePoolManager;
pub use pool::GatePool;
pub use seed::{GateSeed, PoolSeed, SeedError};

/// Gate identifier, unique within a terminal.
pub type GateNumber = u32;

/// Occupancy of a single gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    /// An aircraft is parked at the gate.
    Occupied,
    /// The gate can take an arrival.
    Vacant,
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied => f.write_str("occupied"),
            Self::Vacant => f.write_str("vacant"),
        }
    }
}

/// Failures reported by the validating pool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// No pool was seeded for the terminal.
    #[error("terminal {0} has no gate pool")]
    UnknownTerminal(Terminal),
    /// The gate is not part of the terminal's pool.
    #[error("gate {gate} does not exist at terminal {terminal}")]
    UnknownGate {
        /// Terminal that was searched.
        terminal: Terminal,
        /// Requested gate.
        gate: GateNumber,
    },
    /// The gate was released while already vacant.
    #[error("gate {gate} at terminal {terminal} is already vacant")]
    AlreadyVacant {
        /// Terminal owning the gate.
        terminal: Terminal,
        /// Requested gate.
        gate: GateNumber,
    },
}
