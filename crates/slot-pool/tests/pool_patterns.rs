//! Integration tests for slot-pool
//!
//! Organised by the property under test:
//! - Key codec round-trips (property based)
//! - Exhaustion and recycling
//! - Stale-handle tolerance (ABA prevention)

use proptest::prelude::*;
use slot_pool::*;
use std::collections::HashMap;

// =============================================================================
// KEY CODEC
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn codec_round_trip(index in 0u32..=0xFFFF, generation in 0u32..=0xFFFF) {
        let key = SlotKey::encode(index, generation);
        prop_assert_eq!(key.decode(), (index as u16, generation as u16));
        prop_assert_eq!(SlotKey::from_raw(key.to_raw()), key);
    }

    #[test]
    fn increment_touches_only_generation(index in 0u32..=0xFFFF, generation in 0u32..0xFFFF) {
        let next = SlotKey::encode(index, generation).increment_generation();
        prop_assert_eq!(next.index() as u32, index);
        prop_assert_eq!(next.generation() as u32, generation + 1);
    }
}

// =============================================================================
// EXHAUSTION AND RECYCLING
// =============================================================================

mod recycling {
    use super::*;

    #[test]
    fn exactly_capacity_allocations_succeed() {
        for capacity in [1usize, 2, 7, 128] {
            let mut pool: SlotPool<()> = SlotPool::new(capacity).unwrap();
            let mut seen = std::collections::HashSet::new();
            for _ in 0..capacity {
                assert!(seen.insert(pool.allocate().unwrap()));
            }
            assert_eq!(
                pool.allocate(),
                Err(PoolError::PoolExhausted { capacity })
            );
        }
    }

    #[test]
    fn recycled_slot_gets_newer_generation() {
        let mut pool: SlotPool<i32> = SlotPool::new(4).unwrap();
        let old = pool.insert(1).unwrap();
        pool.release(old);
        let new = pool.insert(2).unwrap();

        assert_eq!(new.index(), old.index());
        assert!(new.generation() > old.generation());
        assert_ne!(new, old);
    }

    #[test]
    fn repeated_fill_and_drain() {
        let mut pool: SlotPool<i32> = SlotPool::new(100).unwrap();

        for round in 0..10 {
            let keys: Vec<_> = (0..100).map(|i| pool.insert(round * 100 + i).unwrap()).collect();
            assert!(pool.is_full());

            for (i, key) in keys.iter().enumerate() {
                assert_eq!(pool.get(key), Some(&(round * 100 + i as i32)));
            }
            for key in keys {
                pool.release(key);
            }
            assert!(pool.is_empty());
        }
    }

    #[test]
    fn zero_capacity_pool_is_always_full() {
        let mut pool: SlotPool<u8> = SlotPool::new(0).unwrap();
        assert!(pool.is_full());
        assert!(pool.allocate().is_err());
    }
}

// =============================================================================
// STALE HANDLES
// =============================================================================

mod stale_handles {
    use super::*;

    #[test]
    fn aba_problem_prevention() {
        let mut pool: SlotPool<String> = SlotPool::new(1).unwrap();

        let key_a = pool.insert("A".to_string()).unwrap();
        pool.release(key_a);
        let key_b = pool.insert("B".to_string()).unwrap();

        assert_eq!(pool.get(&key_a), None);
        assert_eq!(pool.get(&key_b), Some(&"B".to_string()));
    }

    #[test]
    fn stale_release_leaves_new_occupant_alone() {
        let mut pool: SlotPool<&str> = SlotPool::new(2).unwrap();
        let stale = pool.insert("old").unwrap();
        pool.release(stale);
        let current = pool.insert("new").unwrap();

        assert_eq!(pool.release(stale), None);
        assert_eq!(pool.get(&current), Some(&"new"));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn stale_lookup_reports_generations() {
        let mut pool: SlotPool<u8> = SlotPool::new(1).unwrap();
        let h = pool.insert(1).unwrap();
        pool.release(h);
        let _ = pool.insert(2).unwrap();

        let err = pool.try_get(&h).unwrap_err();
        assert_eq!(
            err,
            PoolError::StaleHandle {
                index: 0,
                presented: 1,
                current: 2
            }
        );
    }

    #[test]
    fn many_stale_keys_stay_invalid() {
        let mut pool: SlotPool<i32> = SlotPool::new(8).unwrap();
        let mut old_keys = Vec::new();
        for i in 0..100 {
            let key = pool.insert(i).unwrap();
            old_keys.push(key);
            pool.release(key);
        }

        let new_keys: Vec<_> = (100..108).map(|i| pool.insert(i).unwrap()).collect();

        for key in &old_keys {
            assert_eq!(pool.get(key), None, "stale key should return None");
        }
        for (i, key) in new_keys.iter().enumerate() {
            assert_eq!(pool.get(key), Some(&(100 + i as i32)));
        }
    }

    #[test]
    fn handles_as_hashmap_keys() {
        let mut pool: SlotPool<&str> = SlotPool::new(4).unwrap();
        let mut metadata: HashMap<Handle<&str>, i32> = HashMap::new();

        let one = pool.insert("one").unwrap();
        let two = pool.insert("two").unwrap();
        metadata.insert(one, 1);
        metadata.insert(two, 2);

        assert_eq!(metadata.get(&one), Some(&1));
        assert_eq!(metadata.get(&Handle::from_raw(two.to_raw())), Some(&2));
    }
}
