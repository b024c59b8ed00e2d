// ==============================================
// LRU PERFORMANCE TESTS (integration)
// ==============================================
//
// Coarse latency checks. Bounds are loose enough for unoptimised builds;
// what matters is that operations stay O(1) as the cache grows.

use std::time::{Duration, Instant};

use lrukit::policy::lru::{LruCache, LruCore};
use lrukit::policy::sharded::ShardedLruCache;
use lrukit::traits::{CoreCache, LruCacheTrait};

/// Helper function to measure execution time of a closure
fn measure_time<F, R>(operation: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = operation();
    (result, start.elapsed())
}

fn filled(size: u64) -> LruCore<u64, u64> {
    let mut cache = LruCore::new(size as usize);
    for i in 0..size {
        cache.insert(i, i * 10);
    }
    cache
}

fn avg_get_latency(size: u64, iterations: u64) -> Duration {
    let mut cache = filled(size);
    let (_, duration) = measure_time(|| {
        for i in 0..iterations {
            std::hint::black_box(cache.get(&(i * 7 % size)));
        }
    });
    duration / iterations as u32
}

mod lookup_performance {
    use super::*;

    #[test]
    fn test_get_operation_latency() {
        let avg = avg_get_latency(1_000, 10_000);
        assert!(avg < Duration::from_micros(20), "avg get latency {avg:?}");
    }

    #[test]
    fn test_lookup_does_not_scale_with_size() {
        let small = avg_get_latency(1_000, 20_000);
        let large = avg_get_latency(100_000, 20_000);
        // Allow for cache-miss effects; a linear scan would be ~100x.
        assert!(
            large < small * 20 + Duration::from_micros(1),
            "small={small:?} large={large:?}"
        );
    }

    #[test]
    fn test_cache_miss_performance() {
        let mut cache = filled(1_000);
        let (_, duration) = measure_time(|| {
            for i in 0..10_000u64 {
                assert!(cache.get(&(i + 1_000_000)).is_none());
            }
        });
        assert!(duration / 10_000 < Duration::from_micros(10));
    }
}

mod eviction_performance {
    use super::*;

    #[test]
    fn test_insertion_into_full_cache() {
        let mut cache = filled(10_000);
        let (_, duration) = measure_time(|| {
            for i in 0..10_000u64 {
                cache.insert(i + 1_000_000, i);
            }
        });
        assert_eq!(cache.len(), 10_000);
        assert!(duration / 10_000 < Duration::from_micros(20));
    }

    #[test]
    fn test_pop_lru_operation_latency() {
        let mut cache = filled(10_000);
        let (popped, duration) = measure_time(|| {
            let mut n = 0;
            while cache.pop_lru().is_some() {
                n += 1;
            }
            n
        });
        assert_eq!(popped, 10_000);
        assert!(duration / 10_000 < Duration::from_micros(20));
    }
}

mod locked_performance {
    use super::*;

    #[test]
    fn test_uncontended_lock_overhead() {
        let cache = LruCache::new(1_000);
        for i in 0..1_000u64 {
            cache.put(i, i);
        }
        let (_, duration) = measure_time(|| {
            for i in 0..10_000u64 {
                std::hint::black_box(cache.get(&(i % 1_000)));
            }
        });
        assert!(duration / 10_000 < Duration::from_micros(20));
    }

    #[test]
    fn test_sharded_routing_overhead() {
        let cache = ShardedLruCache::new(1_000, 8);
        for i in 0..1_000u64 {
            cache.put(i, i);
        }
        let (_, duration) = measure_time(|| {
            for i in 0..10_000u64 {
                std::hint::black_box(cache.get(&(i % 1_000)));
            }
        });
        assert!(duration / 10_000 < Duration::from_micros(30));
    }
}
