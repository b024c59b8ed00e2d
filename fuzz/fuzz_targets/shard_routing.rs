#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::ShardSelector;
use lrukit::policy::sharded::ShardedLruCache;

// Fuzz shard routing
//
// - shard index is in range and stable across calls and instances
// - a stored key is found in exactly the shard its index names
// - no shard grows past its rounded-up capacity
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let shard_count = usize::from(data[0] % 32) + 1;
    let capacity = usize::from(data[1]) * 2;
    let seed = u64::from(data[2]);

    let selector = ShardSelector::new(shard_count, seed);
    let twin = ShardSelector::new(shard_count, seed);
    let cache: ShardedLruCache<u32, u32> =
        ShardedLruCache::with_selector(capacity, ShardSelector::new(shard_count, seed));

    for chunk in data[3..].chunks(4) {
        let mut bytes = [0u8; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        let key = u32::from_le_bytes(bytes);

        let shard = selector.shard_for_key(&key);
        assert!(shard < shard_count);
        assert_eq!(twin.shard_for_key(&key), shard);
        assert_eq!(cache.shard_index(&key), shard);

        cache.put(key, key);
        if capacity > 0 {
            assert_eq!(cache.get(&key), Some(key));
            assert!(cache.shard_len(shard).unwrap_or(0) >= 1);
        }
        for index in 0..shard_count {
            assert!(cache.shard_len(index).unwrap_or(0) <= cache.shard_capacity());
        }
    }
});
