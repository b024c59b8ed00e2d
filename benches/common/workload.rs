//! Workload generators for hit-rate benchmarks.
//!
//! Key streams are seeded so every policy sees the same sequence.

use lrukit::traits::CachePolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// Hot/cold split with a configurable hot fraction and hot access probability.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
    /// Zipfian distribution. `theta` controls skew: 0.0 = uniform, 0.99 = highly skewed.
    Zipfian { theta: f64 },
    /// Zipfian hot set interleaved with a long one-shot scan every `period` keys.
    ZipfianWithScans { theta: f64, period: u64, scan_len: u64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self.universe, self.workload, self.seed)
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: StdRng,
    position: u64,
    scan_next: u64,
    zipfian: Option<ZipfianState>,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipfian = match workload {
            Workload::Zipfian { theta } | Workload::ZipfianWithScans { theta, .. } => {
                Some(ZipfianState::new(universe, theta))
            },
            _ => None,
        };
        Self {
            universe,
            workload,
            rng: StdRng::seed_from_u64(seed),
            position: 0,
            scan_next: universe,
            zipfian,
        }
    }

    fn zipf_key(&mut self) -> u64 {
        let u = self.rng.random::<f64>();
        match &self.zipfian {
            Some(zipf) => zipf.sample(u),
            None => self.rng.random_range(0..self.universe),
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.random_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_fraction = hot_fraction.clamp(0.0, 1.0);
                let hot_prob = hot_prob.clamp(0.0, 1.0);
                let hot_size = ((self.universe as f64) * hot_fraction).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe);
                if self.rng.random::<f64>() < hot_prob || hot_size == self.universe {
                    self.rng.random_range(0..hot_size)
                } else {
                    self.rng.random_range(hot_size..self.universe)
                }
            },
            Workload::Scan => {
                let key = self.position;
                self.position = (self.position + 1) % self.universe;
                key
            },
            Workload::Zipfian { .. } => self.zipf_key(),
            Workload::ZipfianWithScans {
                period, scan_len, ..
            } => {
                let offset = self.position % (period + scan_len);
                self.position += 1;
                if offset < period {
                    self.zipf_key()
                } else {
                    // Scan keys live above the universe and never repeat.
                    let key = self.scan_next;
                    self.scan_next += 1;
                    key
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HitRate {
    pub hits: u64,
    pub misses: u64,
}

impl HitRate {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Run a read-through workload: look up, and load the key on a miss.
pub fn run_hit_rate<C>(cache: &C, generator: &mut WorkloadGenerator, operations: usize) -> HitRate
where
    C: CachePolicy<u64, u64> + ?Sized,
{
    let mut hits = 0u64;
    let mut misses = 0u64;

    for _ in 0..operations {
        let key = generator.next_key();
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            misses += 1;
            cache.put(key, key);
        }
    }

    HitRate { hits, misses }
}

/// Zipfian sampling by inverse CDF, YCSB style.
#[derive(Debug, Clone)]
struct ZipfianState {
    n: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999);
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);

        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    fn zeta(n: u64, theta: f64) -> f64 {
        (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).sum()
    }

    fn sample(&self, u: f64) -> u64 {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.n - 1)
    }
}
