#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCore;
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences on LruCore
//
// First byte picks the capacity, then (op, key) byte pairs drive insert,
// get, peek, remove, touch, pop_lru and clear. The index/list bijection is
// audited after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32);
    let mut cache: LruCore<u8, u32> = LruCore::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let key = pair[1] % 64;
        let value = step as u32;

        match pair[0] % 7 {
            0 => {
                let was_present = cache.contains(&key);
                let old_len = cache.len();
                cache.insert(key, value);
                if capacity > 0 {
                    assert_eq!(cache.peek(&key), Some(&value));
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
                if was_present {
                    assert_eq!(cache.len(), old_len);
                }
            },
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            2 => {
                let keys_before: Vec<u8> = cache.keys().copied().collect();
                let _ = cache.peek(&key);
                let keys_after: Vec<u8> = cache.keys().copied().collect();
                assert_eq!(keys_before, keys_after);
            },
            3 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), was_present);
                assert!(!cache.contains(&key));
            },
            4 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.touch(&key), was_present);
            },
            5 => {
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            },
            6 => {
                cache.clear();
                assert!(cache.is_empty());
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated after step {step}: {err}");
        }
    }
});
