// ProbeTable integration tests over the public API.
//
// Core invariants exercised:
// - Membership: insert/contains/delete agree with each other across growth.
// - Growth timing: the table doubles before an insert would reach 3/4 load.
// - Tombstones: deleted slots are reclaimed by later inserts and never leak
//   capacity.
// - Dump: lists non-empty slots in array order with a tombstone flag.
use probe_table::hashing::{home_hash, step_hash};
use probe_table::{ProbeTable, INITIAL_CAPACITY};

// Test: seven single-letter inserts into a fresh table.
// Assumes: growth is checked on the count the pending insert would produce.
// Verifies: capacity is 16 no later than the 7th insert and all keys are present.
#[test]
fn seven_inserts_trigger_growth() {
    let mut t = ProbeTable::new();
    let keys = ["a", "b", "c", "d", "e", "f", "g"];
    let mut grew_at = None;
    for (n, k) in keys.iter().enumerate() {
        assert!(t.insert(*k), "fresh key {k} must insert");
        if grew_at.is_none() && t.capacity() > INITIAL_CAPACITY {
            grew_at = Some(n + 1);
        }
    }
    assert_eq!(t.len(), 7);
    assert_eq!(t.capacity(), 16);
    assert_eq!(grew_at, Some(6), "6/8 reaches the bound, so the 6th insert grows");
    for k in keys {
        assert!(t.contains(k));
    }
}

// Test: a key with the same home and step lands on the tombstone of a
// deleted key.
// Assumes: h1("x",8) == h1("p",8) and h2("x",8) == h2("p",8).
// Verifies: no slot beyond the original probe run is consumed.
#[test]
fn colliding_key_reuses_tombstone() {
    assert_eq!(home_hash("x", 8), home_hash("p", 8));
    assert_eq!(step_hash("x", 8), step_hash("p", 8));

    let mut t = ProbeTable::new();
    assert!(t.insert("x"));
    let slot_of_x = t.dump().next().unwrap().index;
    assert!(t.delete("x"));
    assert!(t.insert("p"));

    let dump: Vec<_> = t.dump().collect();
    assert_eq!(dump.len(), 1, "only the original slot is in use");
    assert_eq!(dump[0].index, slot_of_x);
    assert_eq!(dump[0].key, Some("p"));
    assert!(!dump[0].tombstone);
    assert!(!t.contains("x"));
    assert!(t.contains("p"));
}

// Test: deleting twice.
// Verifies: the second delete reports false and leaves the count alone.
#[test]
fn delete_is_idempotent() {
    let mut t = ProbeTable::new();
    t.insert("k");
    assert!(t.delete("k"));
    assert!(!t.delete("k"));
    assert!(!t.delete("never-inserted"));
    assert_eq!(t.len(), 0);
}

// Test: duplicate insert.
// Verifies: returns false and the original key stays present.
#[test]
fn duplicate_insert_keeps_key() {
    let mut t = ProbeTable::new();
    assert!(t.insert(String::from("dup")));
    assert!(!t.insert("dup"));
    assert!(t.contains("dup"));
    assert_eq!(t.len(), 1);
}

// Test: delete then reinsert.
// Verifies: absent between delete and reinsert, present afterwards.
#[test]
fn delete_then_reinsert() {
    let mut t = ProbeTable::new();
    t.insert("k");
    t.delete("k");
    assert!(!t.contains("k"));
    assert!(t.insert("k"));
    assert!(t.contains("k"));
    assert_eq!(t.len(), 1);
}

// Test: fill, empty, refill with different keys.
// Assumes: tombstones are not counted towards load.
// Verifies: the refill costs no growth beyond what N keys alone require,
// and every refilled key is present while none of the originals are.
#[test]
fn tombstone_reuse_does_not_leak_capacity() {
    const N: usize = 100;
    let mut t = ProbeTable::new();
    for i in 0..N {
        assert!(t.insert(format!("first-{i}")));
    }
    let after_fill = t.capacity();

    for i in 0..N {
        assert!(t.delete(&format!("first-{i}")));
    }
    assert!(t.is_empty());
    assert_eq!(t.capacity(), after_fill);

    for i in 0..N {
        assert!(t.insert(format!("second-{i}")));
    }
    assert!(t.capacity() <= 2 * after_fill);
    assert_eq!(t.capacity(), after_fill);
    for i in 0..N {
        assert!(t.contains(&format!("second-{i}")));
        assert!(!t.contains(&format!("first-{i}")));
    }
}

// Test: many growth steps with interleaved deletes.
// Verifies: right after every doubling, each surviving key is present and
// each deleted key is absent; load stays below 3/4 after every insert.
#[test]
fn growth_preserves_membership() {
    let mut t = ProbeTable::new();
    let mut capacity = t.capacity();
    for i in 0..2_000u32 {
        assert!(t.insert(format!("k{i}")));
        assert!(4 * t.len() < 3 * t.capacity());
        if i % 3 == 0 {
            assert!(t.delete(&format!("k{i}")));
        }
        if t.capacity() != capacity {
            assert_eq!(t.capacity(), capacity * 2);
            capacity = t.capacity();
            for j in 0..=i {
                assert_eq!(t.contains(&format!("k{j}")), j % 3 != 0, "k{j} at {capacity}");
            }
        }
    }
    assert_eq!(t.len(), 2_000 - 667);
}

// Test: dump contents and formatting.
// Verifies: only non-empty slots appear, in ascending index order, and
// tombstones carry no key.
#[test]
fn dump_reports_non_empty_slots_in_order() {
    let mut t = ProbeTable::new();
    for k in ["a", "b", "c"] {
        t.insert(k);
    }
    t.delete("b");
    let entries: Vec<_> = t.dump().collect();
    assert_eq!(entries.len(), 3);
    assert!(entries.windows(2).all(|w| w[0].index < w[1].index));
    let tomb: Vec<_> = entries.iter().filter(|e| e.tombstone).collect();
    assert_eq!(tomb.len(), 1);
    assert_eq!(tomb[0].key, None);
    assert!(tomb[0].to_string().ends_with(" - 1"));
    let live: Vec<_> = entries.iter().filter_map(|e| e.key).collect();
    assert_eq!(live.len(), 2);
    assert!(live.contains(&"a") && live.contains(&"c"));
}

// Test: the table can move across threads behind a lock.
// Verifies: ProbeTable is Send + Sync for external synchronization.
#[test]
fn usable_behind_a_mutex() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProbeTable>();

    let shared = std::sync::Arc::new(std::sync::Mutex::new(ProbeTable::new()));
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    shared.lock().unwrap().insert(format!("t{n}-{i}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let t = shared.lock().unwrap();
    assert_eq!(t.len(), 200);
}
