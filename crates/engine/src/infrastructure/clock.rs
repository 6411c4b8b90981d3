//! Clock and random implementations.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Seeded random - reproducible sequences for demos and tests.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..1000 {
            let n = random.gen_range(2, 6);
            assert!((2..=6).contains(&n));
        }
        assert_eq!(random.gen_range(3, 3), 3);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(99);
        let b = SeededRandom::new(99);
        let xs: Vec<_> = (0..20).map(|_| a.gen_range(0, 100)).collect();
        let ys: Vec<_> = (0..20).map(|_| b.gen_range(0, 100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn degenerate_range_returns_min() {
        assert_eq!(SeededRandom::new(1).gen_range(4, 2), 4);
    }
}
