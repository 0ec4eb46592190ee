//! Terminal assignment by carrier category.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CarrierCategory, DomesticOperator};

/// Passenger terminals and the private apron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terminal {
    /// American Airlines.
    A,
    /// Delta Air Lines.
    B,
    /// United Airlines.
    C,
    /// Every international operator.
    International,
    /// Everyone else.
    Private,
}

impl Terminal {
    /// Every terminal.
    pub const ALL: [Terminal; 5] = [
        Self::A,
        Self::B,
        Self::C,
        Self::International,
        Self::Private,
    ];

    /// Short label used in configuration keys and output.
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::International => "International",
            Self::Private => "Private",
        }
    }
}

/// Terminal that serves carriers of the given category.
pub fn resolve_terminal(category: CarrierCategory) -> Terminal {
    match category {
        CarrierCategory::Domestic(DomesticOperator::American) => Terminal::A,
        CarrierCategory::Domestic(DomesticOperator::Delta) => Terminal::B,
        CarrierCategory::Domestic(DomesticOperator::United) => Terminal::C,
        CarrierCategory::International(_) => Terminal::International,
        CarrierCategory::Other => Terminal::Private,
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string does not name a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown terminal '{0}'")]
pub struct ParseTerminalError(String);

impl FromStr for Terminal {
    type Err = ParseTerminalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|terminal| terminal.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseTerminalError(value.to_string()))
    }
}
