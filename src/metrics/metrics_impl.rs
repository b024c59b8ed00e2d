use crate::metrics::traits::{CoreMetricsRecorder, LruKMetricsRecorder, LruMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct LruMetrics {
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
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

#[derive(Debug, Default, Clone)]
pub struct LruKMetrics {
    pub history_bumps: u64,
    pub promotions: u64,
    pub gated_puts: u64,
    pub main_overwrites: u64,
}

impl LruKMetricsRecorder for LruKMetrics {
    fn record_history_bump(&mut self) {
        self.history_bumps += 1;
    }

    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_gated_put(&mut self) {
        self.gated_puts += 1;
    }

    fn record_main_overwrite(&mut self) {
        self.main_overwrites += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_hit_and_miss_both_count_as_calls() {
        let mut metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();
        assert_eq!(metrics.get_calls, 3);
        assert_eq!(metrics.get_hits, 1);
        assert_eq!(metrics.get_misses, 2);
    }

    #[test]
    fn lru_k_counters_are_independent() {
        let mut metrics = LruKMetrics::default();
        metrics.record_history_bump();
        metrics.record_history_bump();
        metrics.record_promotion();
        metrics.record_gated_put();
        assert_eq!(metrics.history_bumps, 2);
        assert_eq!(metrics.promotions, 1);
        assert_eq!(metrics.gated_puts, 1);
        assert_eq!(metrics.main_overwrites, 0);
    }
}
