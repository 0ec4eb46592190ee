//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tower::{ControlTower, LandingInstructions};

/// Speed in knots.
pub type Knots = u32;

/// Domestic operators, each of which owns a dedicated terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomesticOperator {
    /// Delta Air Lines.
    Delta,
    /// American Airlines.
    American,
    /// United Airlines.
    United,
}

impl DomesticOperator {
    /// Every domestic operator, in declaration order.
    pub const ALL: [DomesticOperator; 3] = [Self::Delta, Self::American, Self::United];

    fn name(self) -> &'static str {
        match self {
            Self::Delta => "Delta",
            Self::American => "American",
            Self::United => "United",
        }
    }
}

/// International operators, all of which share the international terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternationalOperator {
    /// Aeroflot.
    Aeroflot,
    /// Small Planet Airlines.
    SmallPlanet,
    /// Lufthansa.
    Lufthansa,
    /// KLM Royal Dutch Airlines.
    Klm,
}

impl InternationalOperator {
    /// Every international operator, in declaration order.
    pub const ALL: [InternationalOperator; 4] = [
        Self::Aeroflot,
        Self::SmallPlanet,
        Self::Lufthansa,
        Self::Klm,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Aeroflot => "Aeroflot",
            Self::SmallPlanet => "Small Planet",
            Self::Lufthansa => "Lufthansa",
            Self::Klm => "KLM",
        }
    }
}

/// Closed classification of carriers used for terminal dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierCategory {
    /// One of the domestic operators.
    Domestic(DomesticOperator),
    /// One of the international operators.
    International(InternationalOperator),
    /// Anything else (private, charter, cargo...).
    Other,
}

impl CarrierCategory {
    /// Classify an operator by name. Matching ignores case, spaces, dashes and
    /// underscores; unrecognised names classify as [`CarrierCategory::Other`].
    pub fn from_operator_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "delta" => Self::Domestic(DomesticOperator::Delta),
            "american" => Self::Domestic(DomesticOperator::American),
            "united" => Self::Domestic(DomesticOperator::United),
            "aeroflot" => Self::International(InternationalOperator::Aeroflot),
            "smallplanet" => Self::International(InternationalOperator::SmallPlanet),
            "lufthansa" => Self::International(InternationalOperator::Lufthansa),
            "klm" => Self::International(InternationalOperator::Klm),
            _ => Self::Other,
        }
    }

    /// Descent speed assumed when the carrier does not declare one.
    ///
    /// Carriers outside the scheduled operators have no nominal speed.
    pub fn nominal_descent_speed(&self) -> Option<Knots> {
        match self {
            Self::Domestic(_) => Some(100),
            Self::International(_) => Some(130),
            Self::Other => None,
        }
    }

    /// Whether the carrier belongs to the domestic operators.
    pub fn is_domestic(&self) -> bool {
        matches!(self, Self::Domestic(_))
    }

    /// Whether the carrier belongs to the international operators.
    pub fn is_international(&self) -> bool {
        matches!(self, Self::International(_))
    }
}

impl fmt::Display for CarrierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domestic(operator) => write!(f, "{} (domestic)", operator.name()),
            Self::International(operator) => write!(f, "{} (international)", operator.name()),
            Self::Other => f.write_str("other"),
        }
    }
}

/// An aircraft requesting landing. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    callsign: String,
    category: CarrierCategory,
    descend_speed: Knots,
}

impl Carrier {
    /// Build a carrier with an explicitly declared descent speed.
    pub fn new(
        callsign: impl Into<String>,
        category: CarrierCategory,
        descend_speed: Knots,
    ) -> Self {
        Self {
            callsign: callsign.into(),
            category,
            descend_speed,
        }
    }

    /// Build a carrier descending at its category's nominal speed, if it has one.
    pub fn nominal(callsign: impl Into<String>, category: CarrierCategory) -> Option<Self> {
        category
            .nominal_descent_speed()
            .map(|speed| Self::new(callsign, category, speed))
    }

    /// Identity of the flight.
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Operator classification.
    pub fn category(&self) -> CarrierCategory {
        self.category
    }

    /// Declared descent speed.
    pub fn descend_speed(&self) -> Knots {
        self.descend_speed
    }

    /// Ask the given tower for landing instructions.
    pub fn request_landing(&self, tower: &ControlTower) -> LandingInstructions {
        tower.land(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_names_are_normalised() {
        assert_eq!(
            CarrierCategory::from_operator_name("American"),
            CarrierCategory::Domestic(DomesticOperator::American)
        );
        assert_eq!(
            CarrierCategory::from_operator_name("small-planet"),
            CarrierCategory::International(InternationalOperator::SmallPlanet)
        );
        assert_eq!(
            CarrierCategory::from_operator_name(" K L M "),
            CarrierCategory::International(InternationalOperator::Klm)
        );
        assert_eq!(
            CarrierCategory::from_operator_name("Cessna"),
            CarrierCategory::Other
        );
    }

    #[test]
    fn nominal_speed_follows_category() {
        let delta = Carrier::nominal("DL1", CarrierCategory::Domestic(DomesticOperator::Delta))
            .expect("domestic carriers have a nominal speed");
        assert_eq!(delta.descend_speed(), 100);

        let klm = Carrier::nominal("KL2", CarrierCategory::International(InternationalOperator::Klm))
            .expect("international carriers have a nominal speed");
        assert_eq!(klm.descend_speed(), 130);

        assert!(Carrier::nominal("N123", CarrierCategory::Other).is_none());
    }

    #[test]
    fn category_labels() {
        let united = CarrierCategory::Domestic(DomesticOperator::United);
        assert!(united.is_domestic());
        assert!(!united.is_international());
        assert_eq!(united.to_string(), "United (domestic)");
        assert_eq!(CarrierCategory::Other.to_string(), "other");
    }
}
