// ==============================================
// CONCURRENCY TESTS (integration)
// ==============================================
//
// Many threads hammering one cache instance. These need real threads and
// cannot live inline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::policy::lru::LruCache;
use lrukit::policy::lru_k::LruKCache;
use lrukit::policy::sharded::ShardedLruCache;
use lrukit::traits::{CachePolicy, ConcurrentCache};

const THREADS: usize = 8;
const OPS_PER_THREAD: u64 = 2_000;

fn hammer<C>(cache: Arc<C>, key_space: u64) -> usize
where
    C: CachePolicy<u64, u64> + ConcurrentCache + 'static,
{
    let barrier = Arc::new(Barrier::new(THREADS));
    let hits = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..OPS_PER_THREAD {
                    let key = (t * 7_919 + i * 31) % key_space;
                    match cache.get(&key) {
                        Some(value) => {
                            assert_eq!(value, key * 2, "value belongs to another key");
                            hits.fetch_add(1, Ordering::Relaxed);
                        },
                        None => cache.put(key, key * 2),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    hits.load(Ordering::Relaxed)
}

// ==============================================
// Sharded cache
// ==============================================

mod sharded {
    use super::*;

    #[test]
    fn shards_stay_bounded_under_contention() {
        let cache = Arc::new(ShardedLruCache::new(256, 8));
        hammer(Arc::clone(&cache), 4_096);

        assert!(cache.len() <= cache.capacity());
        for index in 0..cache.shard_count() {
            assert!(cache.shard_len(index).unwrap_or(0) <= cache.shard_capacity());
        }
    }

    #[test]
    fn small_key_space_mostly_hits() {
        let cache = Arc::new(ShardedLruCache::new(1_024, 8));
        let hits = hammer(Arc::clone(&cache), 64);
        let total = THREADS * OPS_PER_THREAD as usize;
        assert!(hits * 2 > total, "{hits}/{total} hits");
    }

    #[test]
    fn routing_is_stable_while_other_threads_write() {
        let cache = Arc::new(ShardedLruCache::new(512, 4));
        let expected: Vec<usize> = (0..256u64).map(|k| cache.shard_index(&k)).collect();

        let writer = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for key in 0..10_000u64 {
                    cache.put(key, key);
                }
            })
        };
        for _ in 0..20 {
            let now: Vec<usize> = (0..256u64).map(|k| cache.shard_index(&k)).collect();
            assert_eq!(now, expected);
        }
        writer.join().unwrap();
    }
}

// ==============================================
// Single-lock engines
// ==============================================

mod single_lock {
    use super::*;

    #[test]
    fn lru_invariants_hold_after_contention() {
        let cache = Arc::new(LruCache::new(128));
        hammer(Arc::clone(&cache), 1_000);

        assert!(cache.len() <= 128);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_k_stores_stay_bounded() {
        let cache = Arc::new(LruKCache::new(64, 256, 2));
        hammer(Arc::clone(&cache), 1_000);

        assert!(cache.len() <= 64);
        assert!(cache.history_len() <= 256);
    }

    #[test]
    fn concurrent_remove_and_put() {
        let cache = Arc::new(LruCache::new(32));
        let barrier = Arc::new(Barrier::new(2));

        let remover = {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for key in 0..5_000u64 {
                    cache.remove(&(key % 64));
                }
            })
        };
        barrier.wait();
        for key in 0..5_000u64 {
            cache.put(key % 64, key);
        }
        remover.join().unwrap();

        cache.check_invariants().unwrap();
        assert!(cache.len() <= 32);
    }
}
