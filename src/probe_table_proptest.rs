#![cfg(test)]

// Property tests for ProbeTable kept inside the crate so they can check
// slot-level invariants through `check_invariants`.

use crate::probe_table::ProbeTable;
use hashbrown::HashSet;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Delete(usize),
    Contains(usize),
    ContainsFree(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Contains),
            1 => "[a-z]{0,5}".prop_map(OpI::ContainsFree),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against a reference set.
// Invariants exercised across random operation sequences:
// - insert/delete report exactly whether membership changed.
// - contains agrees with the model for pool keys and arbitrary strings.
// - live count equals occupied slots; every occupied key is reachable by probing.
// - capacity stays a power of two >= 8 and load stays below 3/4.
// - capacity never shrinks.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = ProbeTable::new();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                OpI::Insert(i) => {
                    let k = &pool[i];
                    let expected = !model.contains(k);
                    prop_assert_eq!(sut.insert(k.as_str()), expected);
                    model.insert(k.clone());
                    prop_assert!(sut.contains(k), "inserted key must be present");
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let expected = model.remove(k);
                    prop_assert_eq!(sut.delete(k), expected);
                    prop_assert!(!sut.contains(k), "deleted key must be absent");
                    prop_assert!(!sut.delete(k), "second delete must fail");
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains(k), model.contains(k));
                }
                OpI::ContainsFree(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains(&s));
                }
            }

            sut.check_invariants();
            prop_assert!(sut.capacity() >= cap_before, "capacity must not shrink");
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        for k in &model {
            prop_assert!(sut.contains(k));
        }
    }
}

// Property: growth preserves membership for any insert order, and a table
// filled from a set of N distinct keys ends with the smallest power-of-two
// capacity that keeps N below 3/4 load.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_membership(keys in proptest::collection::hash_set("[a-z0-9]{1,8}", 0..300)) {
        let mut sut = ProbeTable::new();
        for k in &keys {
            prop_assert!(sut.insert(k.as_str()));
        }
        sut.check_invariants();
        for k in &keys {
            prop_assert!(sut.contains(k));
        }
        let mut expected = 8;
        while 4 * keys.len() >= 3 * expected {
            expected *= 2;
        }
        prop_assert_eq!(sut.capacity(), expected);
    }
}
