use std::{collections::BTreeMap, sync::Arc};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::{GateError, GateNumber, GatePool, GateSeed, GateStatus};
use crate::terminal::Terminal;

/// Thread-safe owner of every terminal's gate pool.
///
/// Clones share the same pools. Every operation takes the single lock once,
/// so individual calls are atomic. A peek with [`available_gate`] followed by
/// [`set_status`] is two calls and can race with other callers; use
/// [`reserve`] to allocate and commit in one step.
///
/// [`available_gate`]: GatePoolManager::available_gate
/// [`set_status`]: GatePoolManager::set_status
/// [`reserve`]: GatePoolManager::reserve
#[derive(Debug, Clone)]
pub struct GatePoolManager {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    pools: BTreeMap<Terminal, GatePool>,
}

impl GatePoolManager {
    /// Build a manager from a validated startup layout.
    pub fn new(seed: GateSeed) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                pools: seed.into_pools(),
            })),
        }
    }

    /// Lowest vacant gate at `terminal`, without committing it.
    pub fn available_gate(&self, terminal: Terminal) -> Option<GateNumber> {
        let gate = self
            .inner
            .read()
            .pools
            .get(&terminal)
            .and_then(GatePool::first_vacant);
        debug!(%terminal, ?gate, "peeked available gate");
        gate
    }

    /// Move `gate` at `terminal` into the `target` set.
    ///
    /// The gate is removed from whichever set held it before being added to
    /// `target`, so it never ends up in both. A gate the pool did not know is
    /// simply added. Returns the previous status; unknown terminals are left
    /// untouched and yield `None`.
    pub fn set_status(
        &self,
        terminal: Terminal,
        gate: GateNumber,
        target: GateStatus,
    ) -> Option<GateStatus> {
        let mut inner = self.inner.write();
        let Some(pool) = inner.pools.get_mut(&terminal) else {
            warn!(%terminal, gate, "ignoring status change for terminal without gate pool");
            return None;
        };

        let previous = pool.move_to(gate, target);
        match previous {
            Some(status) => debug!(%terminal, gate, from = %status, to = %target, "gate status updated"),
            None => warn!(%terminal, gate, to = %target, "gate was not in pool; added"),
        }
        previous
    }

    /// Atomically take the lowest vacant gate at `terminal` and mark it occupied.
    pub fn reserve(&self, terminal: Terminal) -> Option<GateNumber> {
        let gate = self
            .inner
            .write()
            .pools
            .get_mut(&terminal)
            .and_then(GatePool::take_first_vacant);
        match gate {
            Some(gate) => info!(%terminal, gate, "gate reserved"),
            None => info!(%terminal, "no vacant gate to reserve"),
        }
        gate
    }

    /// Mark an occupied gate vacant, rejecting unknown or already vacant gates.
    pub fn release(&self, terminal: Terminal, gate: GateNumber) -> Result<(), GateError> {
        let mut inner = self.inner.write();
        let pool = inner
            .pools
            .get_mut(&terminal)
            .ok_or(GateError::UnknownTerminal(terminal))?;

        match pool.status_of(gate) {
            None => Err(GateError::UnknownGate { terminal, gate }),
            Some(GateStatus::Vacant) => Err(GateError::AlreadyVacant { terminal, gate }),
            Some(GateStatus::Occupied) => {
                pool.move_to(gate, GateStatus::Vacant);
                info!(%terminal, gate, "gate released");
                Ok(())
            }
        }
    }

    /// Status of a single gate.
    pub fn status_of(&self, terminal: Terminal, gate: GateNumber) -> Option<GateStatus> {
        self.inner
            .read()
            .pools
            .get(&terminal)
            .and_then(|pool| pool.status_of(gate))
    }

    /// Snapshot of the pool for `terminal`.
    pub fn pool(&self, terminal: Terminal) -> Option<GatePool> {
        self.inner.read().pools.get(&terminal).cloned()
    }

    /// Terminals that have a pool, in declaration order.
    pub fn terminals(&self) -> Vec<Terminal> {
        self.inner.read().pools.keys().copied().collect()
    }
}

impl Default for GatePoolManager {
    fn default() -> Self {
        Self::new(GateSeed::standard())
    }
}
