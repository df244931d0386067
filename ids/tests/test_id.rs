#![allow(missing_docs)] // test only
use aigsat_ids::*;

use rand::{rngs::SmallRng, Rng, SeedableRng};

#[cfg(miri)]
const N: usize = 32;
#[cfg(not(miri))]
const N: usize = 1024;

fn scale<T: Id>(i: usize, n: usize) -> usize {
    (((i as u128) * (T::MAX_ID_INDEX as u128)) / (n as u128)) as usize
}

fn basic_tests<T: Id>() {
    for i in 0..=N {
        let index = scale::<usize>(i, N);
        let id = T::try_from_id_index(index);
        assert_eq!(id.is_some(), index <= T::MAX_ID_INDEX);
        if let Some(value) = id {
            assert_eq!(value.id_index(), index);
        }
    }

    for index in T::MAX_ID_INDEX.saturating_sub(N)..=T::MAX_ID_INDEX.saturating_add(N) {
        let id = T::try_from_id_index(index);
        assert_eq!(id.is_some(), index <= T::MAX_ID_INDEX);
    }

    let scale = scale::<T>;
    let mut seen = zwohash::HashSet::default();
    for i in 0..N {
        let a = T::from_id_index(scale(i, N));
        let b = T::from_id_index(scale(i + 1, N));
        assert!(a <= b);
        assert_eq!(a == b, a.id_index() == b.id_index());
        seen.insert(a);
    }
    assert!(seen.contains(&T::MIN_ID) || scale(0, N) != 0);
}

#[test]
fn primitive_ids() {
    basic_tests::<u8>();
    basic_tests::<u16>();
    basic_tests::<u32>();
    basic_tests::<u64>();
    basic_tests::<usize>();
}

#[test]
fn id_vec_matches_plain_vec() {
    let mut rng = SmallRng::seed_from_u64(0x1d5);
    let mut ids: IdVec<u32, u64> = IdVec::default();
    let mut plain = vec![];

    for _ in 0..N {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let value = rng.gen();
                let (key, _) = ids.push(value);
                assert_eq!(key as usize, plain.len());
                plain.push(value);
            }
            2 => {
                assert_eq!(ids.pop().map(|(_, value)| value), plain.pop());
            }
            _ => {
                if !plain.is_empty() {
                    let index = rng.gen_range(0..plain.len());
                    ids[index as u32] ^= 1;
                    plain[index] ^= 1;
                }
            }
        }
        assert_eq!(ids.values(), &plain[..]);
    }

    let keys: Vec<u32> = ids.keys().into_iter().collect();
    assert_eq!(keys.len(), plain.len());
    assert!(ids.iter().all(|(key, value)| plain[key as usize] == *value));
}

#[test]
fn id_range_iteration() {
    let range = IdRange::<u16>::from_index_range(3..7);
    assert_eq!(range.len(), 4);
    assert!(range.contains(5));
    assert!(!range.contains(7));
    assert_eq!(range.iter().rev().collect::<Vec<_>>(), [6, 5, 4, 3]);
    assert!(IdRange::<u16>::from(2..2).is_empty());
}
