use std::collections::BTreeSet;

use serde::Serialize;

use super::{GateNumber, GateStatus};

/// Partition of a terminal's gates into occupied and vacant sets.
///
/// A gate number is held by at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GatePool {
    occupied: BTreeSet<GateNumber>,
    vacant: BTreeSet<GateNumber>,
}

impl GatePool {
    pub(crate) fn from_sets(occupied: BTreeSet<GateNumber>, vacant: BTreeSet<GateNumber>) -> Self {
        debug_assert!(occupied.is_disjoint(&vacant));
        Self { occupied, vacant }
    }

    /// Occupied gates in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = GateNumber> + '_ {
        self.occupied.iter().copied()
    }

    /// Vacant gates in ascending order.
    pub fn vacant(&self) -> impl Iterator<Item = GateNumber> + '_ {
        self.vacant.iter().copied()
    }

    /// Lowest-numbered vacant gate.
    pub fn first_vacant(&self) -> Option<GateNumber> {
        self.vacant.first().copied()
    }

    /// Current status of `gate`, or `None` if the pool does not know it.
    pub fn status_of(&self, gate: GateNumber) -> Option<GateStatus> {
        if self.occupied.contains(&gate) {
            Some(GateStatus::Occupied)
        } else if self.vacant.contains(&gate) {
            Some(GateStatus::Vacant)
        } else {
            None
        }
    }

    /// Total number of gates in the pool.
    pub fn len(&self) -> usize {
        self.occupied.len() + self.vacant.len()
    }

    /// Whether the pool holds no gates at all.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty() && self.vacant.is_empty()
    }

    /// Move `gate` into the `target` set, dropping it from the other one.
    ///
    /// Unknown gates are added to `target`. Returns the previous status.
    pub(crate) fn move_to(&mut self, gate: GateNumber, target: GateStatus) -> Option<GateStatus> {
        let previous = self.status_of(gate);
        self.occupied.remove(&gate);
        self.vacant.remove(&gate);
        self.set_mut(target).insert(gate);
        previous
    }

    /// Take the lowest vacant gate and mark it occupied.
    pub(crate) fn take_first_vacant(&mut self) -> Option<GateNumber> {
        let gate = self.vacant.pop_first()?;
        self.occupied.insert(gate);
        Some(gate)
    }

    fn set_mut(&mut self, status: GateStatus) -> &mut BTreeSet<GateNumber> {
        match status {
            GateStatus::Occupied => &mut self.occupied,
            GateStatus::Vacant => &mut self.vacant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(occupied: &[GateNumber], vacant: &[GateNumber]) -> GatePool {
        GatePool::from_sets(
            occupied.iter().copied().collect(),
            vacant.iter().copied().collect(),
        )
    }

    #[test]
    fn move_to_keeps_sets_disjoint() {
        let mut pool = pool(&[1], &[2, 3]);

        assert_eq!(pool.move_to(2, GateStatus::Occupied), Some(GateStatus::Vacant));
        assert_eq!(pool.occupied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(pool.vacant().collect::<Vec<_>>(), vec![3]);

        // Moving into the set it already belongs to changes nothing.
        assert_eq!(pool.move_to(2, GateStatus::Occupied), Some(GateStatus::Occupied));
        assert_eq!(pool.len(), 3);

        assert_eq!(pool.move_to(9, GateStatus::Vacant), None);
        assert_eq!(pool.status_of(9), Some(GateStatus::Vacant));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn take_first_vacant_drains_in_order() {
        let mut pool = pool(&[], &[5, 4]);
        assert_eq!(pool.take_first_vacant(), Some(4));
        assert_eq!(pool.take_first_vacant(), Some(5));
        assert_eq!(pool.take_first_vacant(), None);
        assert_eq!(pool.occupied().collect::<Vec<_>>(), vec![4, 5]);
        assert!(!pool.is_empty());
    }

    #[test]
    fn serializes_both_sets() -> anyhow::Result<()> {
        let value = serde_json::to_value(pool(&[1], &[3, 2]))?;
        assert_eq!(value, serde_json::json!({"occupied": [1], "vacant": [2, 3]}));
        Ok(())
    }
}
