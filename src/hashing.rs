//! Hash functions driving the double-hashing probe sequence.
//!
//! Both functions are pure in `(key, modulus)` and are recomputed on every
//! probe. Growth changes the modulus, so memoizing either value would send
//! lookups down a stale probe sequence.

/// Multiplier for the home position. Must stay coprime with the modulus.
const HOME_MULTIPLIER: usize = 11;
/// Multiplier for the probe step. Must stay coprime with the modulus.
const STEP_MULTIPLIER: usize = 131;

#[inline]
fn fold(key: &str, multiplier: usize, modulus: usize) -> usize {
    key.bytes()
        .fold(0, |hash, byte| (hash * multiplier + byte as usize) % modulus)
}

/// First probe position for `key` in a table of `modulus` slots.
///
/// Always in `0..modulus`.
#[inline]
pub fn home_hash(key: &str, modulus: usize) -> usize {
    debug_assert!(modulus > 0, "modulus must be non-zero");
    fold(key, HOME_MULTIPLIER, modulus)
}

/// Stride between successive probe positions for `key`.
///
/// The result is forced odd, so for any power-of-two `modulus >= 2` it is
/// coprime with the modulus and the probe sequence visits every slot exactly
/// once per cycle.
#[inline]
pub fn step_hash(key: &str, modulus: usize) -> usize {
    debug_assert!(modulus > 0, "modulus must be non-zero");
    (2 * fold(key, STEP_MULTIPLIER, modulus) + 1) % modulus
}
