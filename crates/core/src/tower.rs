//! Landing clearance: runway, terminal and gate for an arriving carrier.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    gates::{GateNumber, GatePoolManager},
    models::Carrier,
    runway::{select_runway, Runway},
    terminal::{resolve_terminal, Terminal},
};

/// Everything a carrier needs to land and taxi in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingInstructions {
    /// Runway to land on.
    pub runway: Runway,
    /// Terminal to taxi to.
    pub terminal: Terminal,
    /// Gate at the terminal, if one is free.
    pub gate: Option<GateNumber>,
}

impl fmt::Display for LandingInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runway: {}, Terminal: {}, Gate: ", self.runway, self.terminal)?;
        match self.gate {
            Some(gate) => write!(f, "{gate}"),
            None => f.write_str("none"),
        }
    }
}

/// Issues landing instructions against a shared set of gate pools.
#[derive(Debug, Clone, Default)]
pub struct ControlTower {
    gates: GatePoolManager,
}

impl ControlTower {
    /// Create a tower that allocates from `gates`.
    pub fn new(gates: GatePoolManager) -> Self {
        Self { gates }
    }

    /// Gate pools the tower allocates from.
    pub fn gates(&self) -> &GatePoolManager {
        &self.gates
    }

    /// Instructions for `carrier`. The suggested gate is only peeked, not
    /// committed; two carriers asking back to back get the same gate.
    pub fn land(&self, carrier: &Carrier) -> LandingInstructions {
        let (runway, terminal) = self.route(carrier);
        let instructions = LandingInstructions {
            runway,
            terminal,
            gate: self.gates.available_gate(terminal),
        };
        info!(callsign = carrier.callsign(), %instructions, "landing instructions issued");
        instructions
    }

    /// Like [`land`](Self::land), but the gate is reserved for the carrier.
    pub fn land_and_reserve(&self, carrier: &Carrier) -> LandingInstructions {
        let (runway, terminal) = self.route(carrier);
        let instructions = LandingInstructions {
            runway,
            terminal,
            gate: self.gates.reserve(terminal),
        };
        info!(callsign = carrier.callsign(), %instructions, "landing cleared with reserved gate");
        instructions
    }

    fn route(&self, carrier: &Carrier) -> (Runway, Terminal) {
        (
            select_runway(carrier.descend_speed()),
            resolve_terminal(carrier.category()),
        )
    }
}
