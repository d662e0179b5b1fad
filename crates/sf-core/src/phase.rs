use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Angular position of an oscillator on the ring, always held in [0, 2π).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phase(f64);

impl Phase {
    /// Create a phase from any finite angle, normalized to [0, 2π).
    ///
    /// Negative angles wrap forward. `rem_euclid` can round a tiny negative
    /// input up to exactly 2π, which is folded back to 0.
    pub fn new(theta: f64) -> Self {
        let wrapped = theta.rem_euclid(TAU);
        Self(if wrapped >= TAU { 0.0 } else { wrapped })
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// (cos θ, sin θ)
    pub fn unit(self) -> (f64, f64) {
        let (sin, cos) = self.0.sin_cos();
        (cos, sin)
    }

    /// Unit tangent to the ring in the direction of increasing phase.
    pub fn tangent(self) -> (f64, f64) {
        let (sin, cos) = self.0.sin_cos();
        (-sin, cos)
    }

    /// One Kuramoto coupling term: sin(other - self).
    /// Positive when `other` leads, pulling `self` forward.
    pub fn pull_from(self, other: Self) -> f64 {
        (other.0 - self.0).sin()
    }

    /// Shortest arc between two phases, in [0, π].
    pub fn distance(self, other: Self) -> f64 {
        let diff = (self.0 - other.0).abs();
        if diff > PI { TAU - diff } else { diff }
    }

    /// Forward-Euler step: θ + rate·dt, renormalized. A step that
    /// overflows to a non-finite angle leaves the phase where it was.
    pub fn advanced(self, rate: f64, dt: f64) -> Self {
        let next = self.0 + rate * dt;
        if next.is_finite() { Self::new(next) } else { self }
    }

    /// Phase mapped onto the colour wheel, in [0, 360).
    pub fn hue_degrees(self) -> f64 {
        self.0 / TAU * 360.0
    }
}

impl From<Phase> for f64 {
    fn from(phase: Phase) -> Self {
        phase.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_phase_normalization() {
        let p = Phase::new(-1.0);
        assert!(p.radians() >= 0.0 && p.radians() < TAU);
        assert_relative_eq!(p.radians(), TAU - 1.0, epsilon = 1e-12);

        let p2 = Phase::new(10.0);
        assert!(p2.radians() >= 0.0 && p2.radians() < TAU);
        assert_relative_eq!(p2.radians(), 10.0 - TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_tiny_negative_never_reaches_tau() {
        let p = Phase::new(-1e-18);
        assert!(p.radians() < TAU, "got {}", p.radians());
        assert!(p.radians() >= 0.0);
    }

    #[test]
    fn test_exact_multiples_wrap_to_zero() {
        assert_eq!(Phase::new(TAU).radians(), 0.0);
        assert_eq!(Phase::new(-TAU).radians(), 0.0);
    }

    #[test]
    fn test_pull_in_phase_is_zero() {
        let a = Phase::new(1.0);
        assert!(a.pull_from(a).abs() < 1e-12);
    }

    #[test]
    fn test_pull_quarter_turn_ahead() {
        let a = Phase::new(0.0);
        let b = Phase::new(FRAC_PI_2);
        assert_relative_eq!(a.pull_from(b), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.pull_from(a), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tangent_is_perpendicular_to_unit() {
        for i in 0..16 {
            let p = Phase::new(i as f64 * 0.41);
            let (ux, uy) = p.unit();
            let (tx, ty) = p.tangent();
            assert!((ux * tx + uy * ty).abs() < 1e-12);
            assert_relative_eq!(tx * tx + ty * ty, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_distance_takes_shortest_arc() {
        let a = Phase::new(0.1);
        let b = Phase::new(6.0);
        assert_relative_eq!(a.distance(b), TAU - 5.9, epsilon = 1e-12);
        assert_relative_eq!(b.distance(a), a.distance(b), epsilon = 1e-12);
        assert_relative_eq!(Phase::new(0.0).distance(Phase::new(PI)), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_advanced_with_negative_rate_stays_in_range() {
        let p = Phase::new(0.05).advanced(-1.0, 0.1);
        assert_relative_eq!(p.radians(), TAU - 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_advanced_overflow_keeps_phase() {
        let p = Phase::new(0.3);
        assert_eq!(p.advanced(2.0, 1e308), p);
        assert_eq!(p.advanced(f64::NAN, 1.0), p);
        let huge = p.advanced(1.0, 1e300);
        assert!(huge.radians() >= 0.0 && huge.radians() < TAU);
    }

    #[test]
    fn test_hue_degrees() {
        assert_relative_eq!(Phase::new(PI).hue_degrees(), 180.0, epsilon = 1e-9);
        assert_eq!(Phase::new(0.0).hue_degrees(), 0.0);
    }
}
