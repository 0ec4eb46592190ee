use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::{GateNumber, GatePool};
use crate::terminal::{ParseTerminalError, Terminal};

/// Raw per-terminal gate lists as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSeed {
    /// Gates occupied at startup.
    #[serde(default, deserialize_with = "gate_list")]
    pub occupied: Vec<GateNumber>,
    /// Gates vacant at startup.
    #[serde(default, deserialize_with = "gate_list")]
    pub vacant: Vec<GateNumber>,
}

/// Accepts a list of gates or a single gate. Environment overrides without a
/// list separator arrive as a bare number.
fn gate_list<'de, D>(deserializer: D) -> Result<Vec<GateNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GateListVisitor;

    impl<'de> de::Visitor<'de> for GateListVisitor {
        type Value = Vec<GateNumber>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a gate number or a list of gate numbers")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            GateNumber::try_from(value)
                .map(|gate| vec![gate])
                .map_err(|_| E::custom(format!("gate number {value} out of range")))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            GateNumber::try_from(value)
                .map(|gate| vec![gate])
                .map_err(|_| E::custom(format!("gate number {value} out of range")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<GateNumber>()
                        .map_err(|_| E::custom(format!("invalid gate number '{part}'")))
                })
                .collect()
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut gates = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(gate) = seq.next_element::<GateNumber>()? {
                gates.push(gate);
            }
            Ok(gates)
        }
    }

    deserializer.deserialize_any(GateListVisitor)
}

/// Problems found while validating a gate layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// A layout key does not name a terminal.
    #[error(transparent)]
    UnknownTerminal(#[from] ParseTerminalError),
    /// A gate was listed as both occupied and vacant.
    #[error("gate {gate} at terminal {terminal} is listed as both occupied and vacant")]
    OverlappingGate {
        /// Terminal with the conflicting lists.
        terminal: Terminal,
        /// Conflicting gate.
        gate: GateNumber,
    },
    /// The same terminal appeared twice under different spellings.
    #[error("terminal {0} is configured more than once")]
    DuplicateTerminal(Terminal),
}

/// Validated startup layout for every seeded terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateSeed {
    pools: BTreeMap<Terminal, GatePool>,
}

impl GateSeed {
    /// The airport's standard layout.
    pub fn standard() -> Self {
        let mut seed = Self::default();
        for (terminal, occupied, vacant) in [
            (Terminal::A, 1..=8, 9..=12),
            (Terminal::B, 1..=1, 2..=8),
            (Terminal::C, 1..=4, 5..=10),
            (Terminal::International, 1..=3, 4..=6),
            (Terminal::Private, 1..=1, 2..=3),
        ] {
            seed.pools.insert(
                terminal,
                GatePool::from_sets(occupied.collect(), vacant.collect()),
            );
        }
        seed
    }

    /// Add (or replace) the pool for `terminal`.
    pub fn with_pool(
        mut self,
        terminal: Terminal,
        occupied: impl IntoIterator<Item = GateNumber>,
        vacant: impl IntoIterator<Item = GateNumber>,
    ) -> Result<Self, SeedError> {
        let occupied: BTreeSet<_> = occupied.into_iter().collect();
        let vacant: BTreeSet<_> = vacant.into_iter().collect();
        if let Some(&gate) = occupied.intersection(&vacant).next() {
            return Err(SeedError::OverlappingGate { terminal, gate });
        }
        self.pools
            .insert(terminal, GatePool::from_sets(occupied, vacant));
        Ok(self)
    }

    /// Build a seed from configuration keyed by terminal label.
    pub fn from_layout(layout: &BTreeMap<String, PoolSeed>) -> Result<Self, SeedError> {
        let mut seed = Self::default();
        for (key, pool) in layout {
            let terminal: Terminal = key.parse()?;
            if seed.pools.contains_key(&terminal) {
                return Err(SeedError::DuplicateTerminal(terminal));
            }
            seed = seed.with_pool(
                terminal,
                pool.occupied.iter().copied(),
                pool.vacant.iter().copied(),
            )?;
        }
        Ok(seed)
    }

    pub(crate) fn into_pools(self) -> BTreeMap<Terminal, GatePool> {
        self.pools
    }
}
