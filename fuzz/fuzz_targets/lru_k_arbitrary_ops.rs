#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru_k::LruKCache;

// Fuzz arbitrary get/put/remove sequences on LruKCache
//
// Header bytes: capacity, history capacity, k. Both stores must stay within
// their bounds and a put that admits a key must leave it readable.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let capacity = usize::from(data[0] % 16);
    let history_capacity = usize::from(data[1] % 32);
    let k = usize::from(data[2] % 5);
    let cache: LruKCache<u8, u16> = LruKCache::new(capacity, history_capacity, k);
    assert!(cache.k() >= 1);

    for (step, pair) in data[3..].chunks_exact(2).enumerate() {
        let key = pair[1] % 48;
        match pair[0] % 4 {
            0 | 1 => {
                let value = step as u16;
                let was_admitted = cache.contains(&key);
                cache.put(key, value);
                if !was_admitted && cache.contains(&key) {
                    assert_eq!(cache.history_count(&key), None);
                }
            },
            2 => {
                let admitted = cache.contains(&key);
                assert_eq!(cache.get(&key).is_some(), admitted);
            },
            3 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.history_len() <= history_capacity);
    }
});
