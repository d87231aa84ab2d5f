//! Bounded double-hashing probe sequence and the shared search routine.

use crate::hashing::{home_hash, step_hash};
use crate::slot::Slot;

/// Positions `(h1 + i * h2) mod m` for `i in 0..m`.
///
/// The iterator yields at most `m` positions even if the stride were ever to
/// share a factor with `m`; with an odd stride and a power-of-two `m` those
/// positions are a permutation of `0..m`.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSeq {
    pos: usize,
    step: usize,
    modulus: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub(crate) fn new(key: &str, modulus: usize) -> Self {
        assert!(
            modulus.is_power_of_two() && modulus >= 2,
            "probe modulus {modulus} is not a power of two >= 2"
        );
        let step = step_hash(key, modulus);
        assert!(
            step % 2 == 1,
            "probe step {step} for modulus {modulus} is not coprime with it"
        );
        Self {
            pos: home_hash(key, modulus),
            step,
            modulus,
            remaining: modulus,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = self.pos;
        self.pos = (self.pos + self.step) % self.modulus;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

/// Outcome of walking a key's probe sequence over a slot array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// Slot index holding the key.
    Hit(usize),
    /// Key absent. `vacancy` is where an insert would place it: the first
    /// tombstone seen, else the terminating empty slot. `None` only when a
    /// full cycle found neither.
    Miss { vacancy: Option<usize> },
}

/// Walk `key`'s probe sequence until a hit, an empty slot, or the bound.
pub(crate) fn probe(slots: &[Slot], key: &str) -> Probe {
    let mut first_tombstone = None;
    for index in ProbeSeq::new(key, slots.len()) {
        match &slots[index] {
            Slot::Empty => {
                return Probe::Miss {
                    vacancy: Some(first_tombstone.unwrap_or(index)),
                }
            }
            Slot::Occupied(k) if k == key => return Probe::Hit(index),
            Slot::Occupied(_) => {}
            Slot::Tombstone => {
                first_tombstone.get_or_insert(index);
            }
        }
    }
    Probe::Miss {
        vacancy: first_tombstone,
    }
}

/// First empty slot on `key`'s probe sequence. Used while rebuilding, where
/// the array holds no tombstones and no duplicates.
pub(crate) fn first_empty(slots: &[Slot], key: &str) -> Option<usize> {
    ProbeSeq::new(key, slots.len()).find(|&i| matches!(slots[i], Slot::Empty))
}
