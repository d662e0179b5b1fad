use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// One member of the population. The natural frequency is fixed at
/// creation; only the phase evolves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub phase: Phase,
    natural_frequency: f64,
}

impl Oscillator {
    pub fn new(phase: Phase, natural_frequency: f64) -> Self {
        Self {
            phase,
            natural_frequency,
        }
    }

    /// Uniform phase in [0, 2π), natural frequency ~ N(0, std_dev²).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> Self {
        let z: f64 = StandardNormal.sample(rng);
        Self::new(Phase::new(rng.random_range(0.0..TAU)), z * std_dev)
    }

    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_random_phase_in_range() {
        let mut rng = rng();
        for _ in 0..1000 {
            let osc = Oscillator::random(&mut rng, 0.5);
            assert!(osc.phase.radians() >= 0.0 && osc.phase.radians() < TAU);
            assert!(osc.natural_frequency().is_finite());
        }
    }

    #[test]
    fn test_zero_std_dev_gives_zero_frequency() {
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(Oscillator::random(&mut rng, 0.0).natural_frequency(), 0.0);
        }
    }

    #[test]
    fn test_frequency_spread_matches_std_dev() {
        let mut rng = rng();
        let samples: Vec<f64> = (0..20_000)
            .map(|_| Oscillator::random(&mut rng, 0.5).natural_frequency())
            .collect();
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.02, "mean drifted: {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std dev off: {}", var.sqrt());
    }
}
