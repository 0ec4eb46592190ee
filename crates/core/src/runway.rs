//! Runway selection by descent speed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Knots;

/// Runways available to arriving traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runway {
    /// Slow arrivals.
    R22L,
    /// Moderate arrivals.
    L31R,
    /// Fast arrivals.
    M52J,
    /// Very fast arrivals and everything above the charted bands.
    B19E,
}

/// Inclusive lower bound, optional inclusive upper bound, runway.
///
/// Bands are checked in order. The last band has no upper bound and catches
/// every remaining speed.
const SPEED_BANDS: [(Knots, Option<Knots>, Runway); 4] = [
    (0, Some(90), Runway::R22L),
    (91, Some(120), Runway::L31R),
    (121, Some(140), Runway::M52J),
    (141, None, Runway::B19E),
];

impl Runway {
    /// Every runway, in band order.
    pub const ALL: [Runway; 4] = [Self::R22L, Self::L31R, Self::M52J, Self::B19E];

    /// Runway designator as painted on the threshold.
    pub fn designator(self) -> &'static str {
        match self {
            Self::R22L => "R22L",
            Self::L31R => "L31R",
            Self::M52J => "M52J",
            Self::B19E => "B19E",
        }
    }
}

/// Pick the runway for a carrier descending at `speed`.
pub fn select_runway(speed: Knots) -> Runway {
    let runway = SPEED_BANDS
        .iter()
        .find(|(low, high, _)| speed >= *low && high.map_or(true, |high| speed <= high))
        .map(|(_, _, runway)| *runway)
        .unwrap_or(Runway::B19E);
    debug!(speed, runway = runway.designator(), "selected runway");
    runway
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designator())
    }
}

/// Returned when a string does not name a runway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown runway '{0}'")]
pub struct ParseRunwayError(String);

impl FromStr for Runway {
    type Err = ParseRunwayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|runway| runway.designator().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseRunwayError(value.to_string()))
    }
}
