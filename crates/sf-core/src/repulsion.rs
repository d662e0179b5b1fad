//! Pointer repulsion, projected onto the ring.
//!
//! An oscillator can only move along the ring, so the radial push away from
//! the pointer is decomposed and only its tangential component changes the
//! phase rate.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REPULSION_GAIN, DEFAULT_REPULSION_RADIUS, REPULSION_EPSILON};
use crate::error::{ConfigError, Result, finite, non_negative, positive};
use crate::geometry::Point;
use crate::phase::Phase;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Repulsion {
    /// Reach R; the push falls linearly to zero at this distance.
    pub radius: f64,
    /// Push magnitude as distance approaches zero.
    pub gain: f64,
    /// Distances at or below this are ignored.
    pub epsilon: f64,
}

impl Default for Repulsion {
    fn default() -> Self {
        Self {
            radius: DEFAULT_REPULSION_RADIUS,
            gain: DEFAULT_REPULSION_GAIN,
            epsilon: REPULSION_EPSILON,
        }
    }
}

impl Repulsion {
    pub fn validate(&self) -> Result<()> {
        positive("repulsion.radius", self.radius)?;
        finite("repulsion.gain", self.gain)?;
        non_negative("repulsion.epsilon", self.epsilon)?;
        if self.epsilon >= self.radius {
            return Err(ConfigError::EpsilonOutsideRadius {
                epsilon: self.epsilon,
                radius: self.radius,
            });
        }
        Ok(())
    }

    /// Linear falloff (1 - dist/R) * gain inside the active annulus, 0 elsewhere.
    pub fn falloff(&self, dist: f64) -> f64 {
        if dist > self.epsilon && dist < self.radius {
            (1.0 - dist / self.radius) * self.gain
        } else {
            0.0
        }
    }

    /// Phase-rate contribution for an oscillator at `phase`, drawn at
    /// `position`, from a pointer at `pointer`.
    pub fn tangential_push(&self, phase: Phase, position: Point, pointer: Point) -> f64 {
        let vx = position.x - pointer.x;
        let vy = position.y - pointer.y;
        let dist = vx.hypot(vy);
        let strength = self.falloff(dist);
        if strength == 0.0 {
            return 0.0;
        }
        let (tx, ty) = phase.tangent();
        (vx / dist * tx + vy / dist * ty) * strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ring;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn ring() -> Ring {
        Ring::new(Point::new(200.0, 200.0), 100.0).unwrap()
    }

    /// Pointer placed on the tangent line through the oscillator at phase 0,
    /// `d` units "behind" it, so the radial direction equals the tangent.
    fn push_along_tangent(rep: &Repulsion, d: f64) -> f64 {
        let phase = Phase::new(0.0);
        let pos = ring().position(phase);
        rep.tangential_push(phase, pos, Point::new(pos.x, pos.y - d))
    }

    #[test]
    fn test_zero_at_radius_boundary() {
        let rep = Repulsion::default();
        assert_eq!(push_along_tangent(&rep, rep.radius), 0.0);
        assert_eq!(push_along_tangent(&rep, rep.radius + 1.0), 0.0);
    }

    #[test]
    fn test_zero_inside_epsilon() {
        let rep = Repulsion::default();
        assert_eq!(push_along_tangent(&rep, 0.5), 0.0);
        assert_eq!(push_along_tangent(&rep, 0.0), 0.0);
    }

    #[test]
    fn test_half_radius_between_zero_and_near_max() {
        let rep = Repulsion::default();
        let half = push_along_tangent(&rep, rep.radius / 2.0);
        let near_dist = rep.epsilon + 1e-6;
        let near = push_along_tangent(&rep, near_dist);
        assert!(half > 0.0);
        assert!(half < near, "half={half} near={near}");
        assert_relative_eq!(half, 0.5 * rep.gain, epsilon = 1e-12);
        assert_relative_eq!(near, (1.0 - near_dist / rep.radius) * rep.gain, epsilon = 1e-9);
    }

    #[test]
    fn test_falloff_is_monotonic() {
        let rep = Repulsion::default();
        let mut prev = f64::INFINITY;
        for i in 2..100 {
            let f = rep.falloff(i as f64);
            assert!(f < prev);
            prev = f;
        }
    }

    #[test]
    fn test_radial_pointer_has_no_tangential_component() {
        // Pointer at the ring centre pushes straight outward.
        let rep = Repulsion {
            radius: 150.0,
            ..Repulsion::default()
        };
        let phase = Phase::new(FRAC_PI_2);
        let r = ring();
        let push = rep.tangential_push(phase, r.position(phase), r.center);
        assert!(push.abs() < 1e-12, "got {push}");
    }

    #[test]
    fn test_pointer_ahead_pushes_backward() {
        let rep = Repulsion::default();
        let phase = Phase::new(0.0);
        let pos = ring().position(phase);
        // Tangent at phase 0 is +y; a pointer below pushes towards -y.
        let push = rep.tangential_push(phase, pos, Point::new(pos.x, pos.y + 20.0));
        assert!(push < 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Repulsion::default().validate().is_ok());
        let bad = Repulsion {
            epsilon: 200.0,
            ..Repulsion::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::EpsilonOutsideRadius { .. })
        ));
        let bad = Repulsion {
            radius: 0.0,
            ..Repulsion::default()
        };
        assert!(bad.validate().is_err());
    }
}
