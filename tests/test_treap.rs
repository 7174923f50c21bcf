use persistent_treap::Treap;
use rand::Rng;
use std::cmp::Ordering;
use std::thread;

const NUM_OF_OPERATIONS: usize = 10_000;

type Pair = (u32, u32);

fn by_key(a: &Pair, b: &Pair) -> Ordering {
    a.0.cmp(&b.0)
}

fn items<T: Clone, C>(treap: &Treap<T, C>) -> Vec<T> {
    treap.iter().cloned().collect()
}

#[test]
fn int_test_treap() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut treap = Treap::with_comparator(by_key as fn(&Pair, &Pair) -> Ordering);
    let mut expected = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, NUM_OF_OPERATIONS as u32 * 4);
        let val = rng.gen::<u32>();

        treap = treap.upsert((key, val), rng.next_u32());
        expected.push((key, val));
    }

    expected.reverse();
    expected.sort_by(|l, r| l.0.cmp(&r.0));
    expected.dedup_by_key(|pair| pair.0);

    assert_eq!(treap.len(), expected.len());
    assert!(treap.check_invariants().is_ok());

    assert_eq!(treap.min(), Some(&expected[0]));
    assert_eq!(treap.max(), Some(&expected[expected.len() - 1]));
    assert_eq!(items(&treap), expected);

    for (index, entry) in expected.iter().enumerate() {
        assert!(treap.contains(entry));
        assert_eq!(treap.get(&(entry.0, 0)), Some(entry));
        assert_eq!(treap.ceil(&(entry.0, 0)), Some(entry));
        assert_eq!(treap.floor(&(entry.0, 0)), Some(entry));
        assert_eq!(treap.rank(entry), index);
        assert_eq!(treap.select(index), Some(entry));
    }
    assert_eq!(treap.select(expected.len()), None);

    let mut expected_len = expected.len();
    rng.shuffle(&mut expected);
    for entry in &expected {
        let next = treap.delete(entry);
        expected_len -= 1;
        assert_eq!(next.len(), expected_len);
        assert_eq!(next.get(entry), None);
        assert_eq!(treap.get(entry), Some(entry));

        let unchanged = next.delete(entry);
        assert_eq!(unchanged.len(), expected_len);
        treap = next;
    }
    assert!(treap.is_empty());
}

#[test]
fn int_test_persistence() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut versions = vec![Treap::new()];
    let mut snapshots: Vec<Vec<u32>> = vec![Vec::new()];

    for _ in 0..1_000 {
        let key = rng.gen_range(0, 200u32);
        let latest = versions[versions.len() - 1].clone();
        let next = if rng.gen::<bool>() {
            latest.upsert(key, rng.next_u32())
        } else {
            latest.delete(&key)
        };
        snapshots.push(items(&next));
        versions.push(next);
    }

    for (version, snapshot) in versions.iter().zip(snapshots.iter()) {
        assert_eq!(&items(version), snapshot);
        assert_eq!(version.len(), snapshot.len());
        assert_eq!(version.min(), snapshot.first());
        assert_eq!(version.max(), snapshot.last());
        assert!(version.check_invariants().is_ok());
    }
}

#[test]
fn int_test_split() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut keys: Vec<u32> = (0..1_000).map(|key| key * 2).collect();
    rng.shuffle(&mut keys);
    let treap = keys
        .iter()
        .fold(Treap::new(), |treap, key| treap.upsert(*key, rng.next_u32()));
    keys.sort();

    for _ in 0..keys.len() {
        let index = rng.gen_range(0, keys.len());
        let (left, middle, right) = treap.split(&keys[index]);
        assert_eq!(left.len(), index);
        assert_eq!(middle.as_ref().map(|middle| middle.len()), Some(1));
        assert_eq!(right.len(), keys.len() - index - 1);
        assert!(left.iter().all(|key| *key < keys[index]));
        assert!(right.iter().all(|key| *key > keys[index]));
        assert!(left.check_invariants().is_ok());
        assert!(right.check_invariants().is_ok());

        let rebuilt = match middle {
            Some(middle) => left.union(&middle).union(&right),
            None => left.union(&right),
        };
        assert_eq!(rebuilt, treap);
    }

    for _ in 0..50 {
        let pivot = rng.gen_range(0, 1_000u32) * 2 + 1;
        let (left, middle, right) = treap.split(&pivot);
        let index = treap.rank(&pivot);
        assert!(middle.is_none());
        assert_eq!(left.len(), index);
        assert_eq!(right.len(), keys.len() - index);
    }
    assert_eq!(treap.len(), keys.len());
}

#[test]
fn int_test_visit() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let treap = (0..500u32).fold(Treap::new(), |treap, key| treap.upsert(key * 3, rng.next_u32()));

    for _ in 0..100 {
        let pivot = rng.gen_range(0, 1_600u32);
        let limit = rng.gen_range(0, 50usize);

        let mut ascending = Vec::new();
        treap.visit_ascend(Some(&pivot), |key| {
            ascending.push(*key);
            ascending.len() < limit
        });
        let expected = (0..500u32)
            .map(|key| key * 3)
            .filter(|key| *key >= pivot)
            .take(limit.max(1))
            .collect::<Vec<u32>>();
        assert_eq!(ascending, expected);

        let mut descending = Vec::new();
        treap.visit_descend(Some(&pivot), |key| {
            descending.push(*key);
            descending.len() < limit
        });
        let expected = (0..500u32)
            .rev()
            .map(|key| key * 3)
            .filter(|key| *key <= pivot)
            .take(limit.max(1))
            .collect::<Vec<u32>>();
        assert_eq!(descending, expected);
    }
}

#[test]
fn int_test_shared_versions_across_threads() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let base = (0..1_000u32).fold(Treap::new(), |treap, key| treap.upsert(key, rng.next_u32()));

    let handles = (0..4u32)
        .map(|offset| {
            let version = base.clone();
            thread::spawn(move || {
                let mut version = version;
                for key in (offset..1_000).step_by(4) {
                    version = version.delete(&key);
                }
                version
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let version = handle.join().unwrap();
        assert_eq!(version.len(), 750);
        assert!(version.check_invariants().is_ok());
    }
    assert_eq!(base.len(), 1_000);
    assert_eq!(items(&base), (0..1_000).collect::<Vec<u32>>());
}

#[test]
fn int_test_degenerate_drop() {
    let treap = (0..100_000u32).fold(Treap::new(), |treap, key| treap.upsert(key, key));
    assert_eq!(treap.len(), 100_000);
    assert_eq!(treap.min(), Some(&0));
    assert_eq!(treap.max(), Some(&99_999));
    assert!(treap.check_invariants().is_ok());

    let deleted = treap.delete(&0);
    assert_eq!(deleted.len(), 99_999);
    assert_eq!(deleted.min(), Some(&1));

    let (left, middle, right) = treap.split(&5);
    assert_eq!(left.len(), 5);
    assert_eq!(middle.and_then(|middle| middle.min().cloned()), Some(5));
    assert_eq!(right.len(), 99_994);
    assert_eq!(right.min(), Some(&6));

    let mut count = 0;
    let mut last = None;
    treap.visit_ascend(None, |key| {
        count += 1;
        last = Some(*key);
        true
    });
    assert_eq!(count, 100_000);
    assert_eq!(last, Some(99_999));

    let mut count = 0;
    let mut last = None;
    treap.visit_descend(None, |key| {
        count += 1;
        last = Some(*key);
        true
    });
    assert_eq!(count, 100_000);
    assert_eq!(last, Some(0));

    let merged = treap.union(&treap);
    assert_eq!(merged.len(), 100_000);
    assert!(merged.check_invariants().is_ok());

    drop(treap);
}
