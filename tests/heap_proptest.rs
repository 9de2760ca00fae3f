use chromatic::collections::{AddressableHeap, FibonacciHeap, IndexedBinaryHeap};
use proptest::prelude::*;
use std::collections::HashMap;

const IDS: usize = 32;

#[derive(Debug, Clone)]
enum Operation {
    Push(usize, u16),
    Pop,
    Raise(usize, u16),
    Change(usize, u16),
    Remove(usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (0..IDS, any::<u16>()).prop_map(|(id, k)| Operation::Push(id, k)),
        2 => Just(Operation::Pop),
        2 => (0..IDS, any::<u16>()).prop_map(|(id, d)| Operation::Raise(id, d)),
        2 => (0..IDS, any::<u16>()).prop_map(|(id, k)| Operation::Change(id, k)),
        1 => (0..IDS).prop_map(Operation::Remove),
    ]
}

/// Replays `ops` against `heap` and a hash map, skipping operations whose
/// preconditions do not hold.
fn check_against_model<H: AddressableHeap<u32>>(mut heap: H, ops: &[Operation]) {
    let mut model: HashMap<usize, u32> = HashMap::new();
    for op in ops {
        match *op {
            Operation::Push(id, key) => {
                if !model.contains_key(&id) {
                    heap.push(id, u32::from(key));
                    model.insert(id, u32::from(key));
                }
            }
            Operation::Pop => {
                let expected = model.values().max().copied();
                match heap.pop() {
                    Some((id, key)) => {
                        assert_eq!(Some(key), expected);
                        assert_eq!(model.remove(&id), Some(key));
                    }
                    None => assert!(expected.is_none()),
                }
            }
            Operation::Raise(id, delta) => {
                if let Some(key) = model.get_mut(&id) {
                    *key += u32::from(delta);
                    heap.increase_key(id, *key);
                }
            }
            Operation::Change(id, key) => {
                if let Some(slot) = model.get_mut(&id) {
                    *slot = u32::from(key);
                    heap.change_key(id, u32::from(key));
                }
            }
            Operation::Remove(id) => {
                assert_eq!(heap.remove(id), model.remove(&id));
            }
        }
        assert_eq!(heap.len(), model.len());
        assert_eq!(heap.peek().map(|(_, &k)| k), model.values().max().copied());
        for id in 0..IDS {
            assert_eq!(heap.key(id).copied(), model.get(&id).copied());
        }
    }

    // drain: keys come out non-increasing
    let mut last = u32::MAX;
    while let Some((id, key)) = heap.pop() {
        assert!(key <= last);
        assert_eq!(model.remove(&id), Some(key));
        last = key;
    }
    assert!(model.is_empty());
}

proptest! {
    #[test]
    fn test_binary_heap_matches_model(ops in proptest::collection::vec(operation(), 1..200)) {
        check_against_model(IndexedBinaryHeap::with_ids(IDS), &ops);
    }

    #[test]
    fn test_fibonacci_heap_matches_model(ops in proptest::collection::vec(operation(), 1..200)) {
        check_against_model(FibonacciHeap::with_ids(IDS), &ops);
    }

    #[test]
    fn test_parallel_build_pops_in_order(keys in proptest::collection::vec(any::<u32>(), 0..500), chunk in 1usize..64) {
        let mut heap = FibonacciHeap::par_from_fn(keys.len(), chunk, |v| keys[v]);
        prop_assert_eq!(heap.len(), keys.len());
        let popped: Vec<u32> = std::iter::from_fn(|| heap.pop().map(|(_, k)| k)).collect();
        let mut expected = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn test_meld_keeps_every_entry(left in proptest::collection::vec(any::<u16>(), 0..40), right in proptest::collection::vec(any::<u16>(), 0..40)) {
        let ids = left.len() + right.len();
        let mut a = FibonacciHeap::with_ids(ids);
        let mut b = FibonacciHeap::with_ids(ids);
        for (id, &k) in left.iter().enumerate() {
            a.push(id, k);
        }
        for (offset, &k) in right.iter().enumerate() {
            b.push(left.len() + offset, k);
        }
        a.meld(b);
        prop_assert_eq!(a.len(), ids);
        let mut expected: Vec<u16> = left.iter().chain(&right).copied().collect();
        expected.sort_unstable_by(|x, y| y.cmp(x));
        let popped: Vec<u16> = std::iter::from_fn(|| a.pop().map(|(_, k)| k)).collect();
        prop_assert_eq!(popped, expected);
    }
}
