//! ProbeTable: open-addressed string set with double hashing and tombstones.

use crate::probe::{first_empty, probe, Probe};
use crate::slot::{DumpEntry, Slot};
use core::fmt;
use tracing::{debug, trace};

/// Capacity of a freshly created table and the floor for `with_capacity`.
pub const INITIAL_CAPACITY: usize = 8;

/// Maximum load factor as the exact ratio `NUMERATOR / DENOMINATOR` (0.75).
pub const MAX_LOAD_NUMERATOR: usize = 3;
pub const MAX_LOAD_DENOMINATOR: usize = 4;

/// A set of `String` keys stored inline in a power-of-two slot array.
///
/// Deletion leaves a tombstone so that probe chains running through the
/// slot stay intact; inserts reclaim the first tombstone on their probe
/// path. The array doubles before an insert would bring the live count to
/// three quarters of capacity, and doubling drops every tombstone.
pub struct ProbeTable {
    slots: Vec<Slot>,
    live: usize,
}

impl ProbeTable {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Table with at least `capacity` slots, rounded up to a power of two and
    /// never below [`INITIAL_CAPACITY`].
    ///
    /// This is a slot count, not a key count: the table still grows once
    /// three quarters of the slots are live.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity does not fit in `usize`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity
            .max(INITIAL_CAPACITY)
            .checked_next_power_of_two()
            .unwrap_or_else(|| panic!("capacity {capacity} overflows the next power of two"));
        Self {
            slots: empty_slots(capacity),
            live: 0,
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of tombstoned slots awaiting reuse or the next growth.
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstone()).count()
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(probe(&self.slots, key), Probe::Hit(_))
    }

    /// Add `key`; returns `false` and leaves the table untouched if it is
    /// already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        // Growth is decided on the count the pending insert would produce,
        // before probing, so the probe below always runs in the final array.
        if self.would_overload(self.live + 1) {
            self.grow();
        }

        match probe(&self.slots, &key) {
            Probe::Hit(_) => false,
            Probe::Miss {
                vacancy: Some(index),
            } => {
                let slot = &mut self.slots[index];
                if slot.is_tombstone() {
                    trace!(index, key = %key, "reusing tombstone");
                }
                *slot = Slot::Occupied(key);
                self.live += 1;
                true
            }
            Probe::Miss { vacancy: None } => unreachable!(
                "probe over {} slots found no vacancy with {} live keys",
                self.slots.len(),
                self.live
            ),
        }
    }

    /// Remove `key`; returns `false` if it was not present.
    pub fn delete(&mut self, key: &str) -> bool {
        let Probe::Hit(index) = probe(&self.slots, key) else {
            return false;
        };
        let removed = self.slots[index].bury();
        debug_assert!(removed.is_some(), "probe hit on a non-occupied slot");
        trace!(index, key, "tombstoned");
        self.live -= 1;
        true
    }

    /// Every non-empty slot in array order.
    pub fn dump(&self) -> impl Iterator<Item = DumpEntry<'_>> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.dump_entry(index))
    }

    #[inline]
    fn would_overload(&self, live: usize) -> bool {
        live * MAX_LOAD_DENOMINATOR >= self.slots.len() * MAX_LOAD_NUMERATOR
    }

    /// Rebuild into an array twice as large, moving live keys and discarding
    /// tombstones. The new array is fully populated before it replaces the
    /// old one.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity * 2;
        let mut fresh = empty_slots(new_capacity);
        let mut dropped = 0usize;

        for slot in core::mem::take(&mut self.slots) {
            match slot {
                Slot::Occupied(key) => {
                    let Some(index) = first_empty(&fresh, &key) else {
                        unreachable!(
                            "rehash into {new_capacity} slots found no empty slot for {key:?}"
                        );
                    };
                    fresh[index] = Slot::Occupied(key);
                }
                Slot::Tombstone => dropped += 1,
                Slot::Empty => {}
            }
        }

        self.slots = fresh;
        debug!(
            old_capacity,
            new_capacity,
            live = self.live,
            tombstones_dropped = dropped,
            "grew probe table"
        );
        debug_assert_eq!(
            self.slots.iter().filter(|s| s.is_occupied()).count(),
            self.live
        );
    }
}

fn empty_slots(n: usize) -> Vec<Slot> {
    (0..n).map(|_| Slot::Empty).collect()
}

impl Default for ProbeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProbeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Line<'a>(DumpEntry<'a>);
        impl fmt::Debug for Line<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        struct Entries<'a>(&'a ProbeTable);
        impl fmt::Debug for Entries<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.dump().map(Line)).finish()
            }
        }

        f.debug_struct("ProbeTable")
            .field("capacity", &self.capacity())
            .field("len", &self.live)
            .field("slots", &Entries(self))
            .finish()
    }
}

#[cfg(test)]
impl ProbeTable {
    /// Recount live keys and check structural invariants.
    pub(crate) fn check_invariants(&self) {
        let cap = self.slots.len();
        assert!(cap.is_power_of_two(), "capacity {cap} not a power of two");
        assert!(cap >= INITIAL_CAPACITY, "capacity {cap} below initial");
        let occupied = self.slots.iter().filter(|s| s.is_occupied()).count();
        assert_eq!(occupied, self.live, "live count drifted from slots");
        assert!(
            !self.would_overload(self.live),
            "load {}/{} at or above the bound",
            self.live,
            cap
        );
        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(k) = slot {
                assert_eq!(probe(&self.slots, k), Probe::Hit(i), "{k:?} unreachable");
            }
        }
    }
}
