//! Inclusive numeric ranges for random draws

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range sampled uniformly.
///
/// Used for dropout recovery draws and OTA phase durations. `min == max`
/// degenerates to a constant, which is handy for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Draw a uniform value from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }

    /// True when `min <= max`, i.e. the range can be sampled.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_bounds() {
        let bounds = Bounds::new(-85, -65);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v: i32 = bounds.sample(&mut rng);
            assert!((-85..=-65).contains(&v), "sample {} escaped bounds", v);
        }
    }

    #[test]
    fn degenerate_range_is_constant() {
        let bounds = Bounds::new(3.5, 3.5);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(bounds.sample(&mut rng), 3.5);
    }
}
