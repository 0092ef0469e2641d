//! State identifiers and state sets.

use fixedbitset::FixedBitSet;
use std::collections::BTreeSet;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A set of NFA states.
///
/// NFA state ids are arbitrary, so NFA sets are ordered sets whose size follows
/// the number of members. The ordering makes a set its own canonical key in the
/// subset table.
pub type Subset = BTreeSet<StateId>;

/// A set of DFA states implemented using a growable bit set.
///
/// DFA ids are allocated densely from 0, which keeps the bit set small.
/// Equality only looks at the members, so two sets holding the same states
/// compare equal whatever their capacity.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::with_capacity(state as usize + 1);
        set.insert(state);
        set
    }

    /// Insert a state into the set. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        // FixedBitSet::contains is false past the end
        self.bits.contains(state as usize)
    }

    /// Remove a state from the set.
    pub fn remove(&mut self, state: StateId) {
        let idx = state as usize;
        if idx < self.bits.len() {
            self.bits.set(idx, false);
        }
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Create a new set with states not in other.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// Check whether every state of this set is in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|s| other.contains(s))
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(1000));

        set.remove(3);
        set.remove(1000);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_state_set_from_iter() {
        let mut set: StateSet = [40, 1, 3].into_iter().collect();
        set.extend([3, 2]);

        assert_eq!(set.len(), 4);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3, 40]);
    }

    #[test]
    fn test_state_set_intersects_and_difference() {
        let set1: StateSet = [1, 3, 5].into_iter().collect();
        let set2: StateSet = [2, 3].into_iter().collect();
        let set3: StateSet = [0, 2, 4].into_iter().collect();

        assert!(set1.intersects(&set2));
        assert!(!set1.intersects(&set3));
        assert_eq!(set1.difference(&set2), StateSet::from_iter([1, 5]));
        assert!(StateSet::singleton(3).is_subset(&set1));
        assert!(!set2.is_subset(&set1));
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut small = StateSet::with_capacity(2);
        small.insert(1);
        let mut large = StateSet::with_capacity(500);
        large.insert(1);

        assert_eq!(small, large);
        assert_eq!(StateSet::new(), StateSet::with_capacity(64));
    }

    #[test]
    fn test_debug_lists_members() {
        let set: StateSet = [4, 2].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{2, 4}");
    }
}
