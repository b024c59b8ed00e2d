use std::ops::AddAssign;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub clears: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of gets that hit, or 0.0 before the first get.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Sums counters and gauges; used to fold shard snapshots together.
impl AddAssign for LruMetricsSnapshot {
    fn add_assign(&mut self, rhs: Self) {
        self.get_calls += rhs.get_calls;
        self.get_hits += rhs.get_hits;
        self.get_misses += rhs.get_misses;
        self.insert_calls += rhs.insert_calls;
        self.insert_updates += rhs.insert_updates;
        self.insert_new += rhs.insert_new;
        self.evicted_entries += rhs.evicted_entries;
        self.clears += rhs.clears;
        self.pop_lru_calls += rhs.pop_lru_calls;
        self.pop_lru_found += rhs.pop_lru_found;
        self.touch_calls += rhs.touch_calls;
        self.touch_found += rhs.touch_found;
        self.remove_calls += rhs.remove_calls;
        self.remove_found += rhs.remove_found;
        self.cache_len += rhs.cache_len;
        self.capacity += rhs.capacity;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruKMetricsSnapshot {
    pub history_bumps: u64,
    pub promotions: u64,
    pub gated_puts: u64,
    pub main_overwrites: u64,

    pub k: usize,
    pub main: LruMetricsSnapshot,
    pub history: LruMetricsSnapshot,
}

impl LruKMetricsSnapshot {
    /// Hit rate of user-facing gets (served by the main store).
    pub fn hit_rate(&self) -> f64 {
        self.main.hit_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_gets() {
        assert_eq!(LruMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn add_assign_folds_shards() {
        let mut total = LruMetricsSnapshot {
            get_calls: 4,
            get_hits: 1,
            cache_len: 2,
            capacity: 8,
            ..Default::default()
        };
        total += LruMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            cache_len: 1,
            capacity: 8,
            ..Default::default()
        };
        assert_eq!(total.get_calls, 8);
        assert_eq!(total.cache_len, 3);
        assert_eq!(total.capacity, 16);
        assert!((total.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
