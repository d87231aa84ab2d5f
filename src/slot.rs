//! Slot states and the diagnostic view over them.

use core::fmt;

/// One position of the backing array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Never written since the array was allocated. Terminates probing.
    Empty,
    /// Holds a live key.
    Occupied(String),
    /// Logically deleted. Keeps probe chains that pass through it intact and
    /// may be reclaimed by a later insert.
    Tombstone,
}

impl Slot {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Turn an occupied slot into a tombstone, handing back the key.
    pub(crate) fn bury(&mut self) -> Option<String> {
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(key) => Some(key),
            other => {
                *self = other;
                None
            }
        }
    }

    pub(crate) fn dump_entry(&self, index: usize) -> Option<DumpEntry<'_>> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(key) => Some(DumpEntry {
                index,
                key: Some(key),
                tombstone: false,
            }),
            Slot::Tombstone => Some(DumpEntry {
                index,
                key: None,
                tombstone: true,
            }),
        }
    }
}

/// A non-empty slot as reported by [`ProbeTable::dump`](crate::ProbeTable::dump).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpEntry<'a> {
    /// Position of the slot in the backing array.
    pub index: usize,
    /// `None` for tombstones; the deleted key is not retained.
    pub key: Option<&'a str>,
    /// Whether the slot is a tombstone rather than a live key.
    pub tombstone: bool,
}

impl fmt::Display for DumpEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.index,
            self.key.unwrap_or("-"),
            u8::from(self.tombstone)
        )
    }
}
