//! The oscillator field: a Kuramoto population on a ring.
//!
//!   dθ_i/dt = ω_i + (K/N) Σ_j sin(θ_j − θ_i) + P_i(pointer)
//!
//! where P_i is the tangential component of a pointer repulsion. Each step
//! computes every rate from the pre-step phases, then integrates with
//! forward Euler and renormalizes into [0, 2π).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::error::{ConfigError, Result, finite};
use crate::geometry::{Point, PointerState, Ring, SurfaceSize};
use crate::oscillator::Oscillator;
use crate::phase::Phase;
use crate::repulsion::Repulsion;

/// Read-only view of one oscillator for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSnapshot {
    pub x: f64,
    pub y: f64,
    /// Normalized phase in [0, 2π).
    pub phase: f64,
}

/// Kuramoto order parameter r·e^{iψ} = (1/N) Σ_j e^{iθ_j}.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderParameter {
    /// r ∈ [0, 1]; 1 means fully synchronized.
    pub coherence: f64,
    /// ψ, the mean phase.
    pub mean_phase: Phase,
}

pub struct OscillatorField {
    oscillators: Vec<Oscillator>,
    coupling: f64,
    ring: Ring,
    bounds: Option<SurfaceSize>,
    repulsion: Repulsion,
    // Scratch for per-step rates, reused across steps.
    rates: Vec<f64>,
    steps: u64,
    elapsed: f64,
}

impl OscillatorField {
    /// Fresh population with uniform random phases and Gaussian natural
    /// frequencies. Pointer positions passed to [`advance`](Self::advance)
    /// are not bounds-checked; see [`for_surface`](Self::for_surface).
    pub fn initialize<R: Rng + ?Sized>(
        config: &FieldConfig,
        ring: Ring,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        ring.validate()?;
        let oscillators = (0..config.count)
            .map(|_| Oscillator::random(&mut *rng, config.frequency_std_dev))
            .collect();
        Ok(Self::assemble(
            oscillators,
            config.coupling,
            ring,
            config.repulsion,
        ))
    }

    /// Fresh population laid out on `size`. Pointers outside the surface
    /// are treated as absent.
    pub fn for_surface<R: Rng + ?Sized>(
        config: &FieldConfig,
        size: SurfaceSize,
        rng: &mut R,
    ) -> Result<Self> {
        let ring = Ring::for_surface(size, config.ring_scale)?;
        let field = Self::initialize(config, ring, rng)?;
        Ok(field.with_bounds(size))
    }

    /// Explicit construction from known phases and natural frequencies.
    pub fn from_parts(
        phases: &[f64],
        frequencies: &[f64],
        coupling: f64,
        ring: Ring,
        repulsion: Repulsion,
    ) -> Result<Self> {
        if phases.len() != frequencies.len() {
            return Err(ConfigError::LengthMismatch {
                phases: phases.len(),
                frequencies: frequencies.len(),
            });
        }
        if phases.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }
        finite("coupling", coupling)?;
        ring.validate()?;
        repulsion.validate()?;

        let oscillators = phases
            .iter()
            .zip(frequencies)
            .map(|(&theta, &omega)| {
                finite("phase", theta)?;
                finite("natural_frequency", omega)?;
                Ok(Oscillator::new(Phase::new(theta), omega))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(oscillators, coupling, ring, repulsion))
    }

    fn assemble(
        oscillators: Vec<Oscillator>,
        coupling: f64,
        ring: Ring,
        repulsion: Repulsion,
    ) -> Self {
        let n = oscillators.len();
        Self {
            oscillators,
            coupling,
            ring,
            bounds: None,
            repulsion,
            rates: vec![0.0; n],
            steps: 0,
            elapsed: 0.0,
        }
    }

    /// Restrict pointer influence to positions strictly inside `size`.
    pub fn with_bounds(mut self, size: SurfaceSize) -> Self {
        self.bounds = Some(size);
        self
    }

    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn bounds(&self) -> Option<SurfaceSize> {
        self.bounds
    }

    pub fn repulsion(&self) -> Repulsion {
        self.repulsion
    }

    pub fn oscillators(&self) -> &[Oscillator] {
        &self.oscillators
    }

    /// Number of completed `advance` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time accumulated over all steps.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn active_pointer(&self, pointer: PointerState) -> Option<Point> {
        match self.bounds {
            Some(size) => pointer.inside(size),
            None => pointer.point(),
        }
    }

    /// Fill `out[i]` with dθ_i/dt for the current phases.
    fn compute_rates(&self, pointer: PointerState, out: &mut [f64]) {
        let pointer = self.active_pointer(pointer);
        let scale = self.coupling / self.oscillators.len().max(1) as f64;

        for (rate, osc) in out.iter_mut().zip(&self.oscillators) {
            let pull: f64 = self
                .oscillators
                .iter()
                .map(|other| osc.phase.pull_from(other.phase))
                .sum();
            let mut d = osc.natural_frequency() + scale * pull;
            if let Some(p) = pointer {
                let position = self.ring.position(osc.phase);
                d += self.repulsion.tangential_push(osc.phase, position, p);
            }
            *rate = d;
        }
    }

    /// Instantaneous phase rates without integrating.
    pub fn derivatives(&self, pointer: PointerState) -> Vec<f64> {
        let mut out = vec![0.0; self.oscillators.len()];
        self.compute_rates(pointer, &mut out);
        out
    }

    /// Advance every oscillator by one Euler step of length `dt`.
    ///
    /// All rates are taken from the phases as they were on entry, so the
    /// result does not depend on population order. A non-finite `dt` is
    /// ignored; an oscillator whose step overflows keeps its phase.
    pub fn advance(&mut self, dt: f64, pointer: PointerState) {
        if !dt.is_finite() {
            return;
        }
        let mut rates = std::mem::take(&mut self.rates);
        rates.resize(self.oscillators.len(), 0.0);
        self.compute_rates(pointer, &mut rates);

        for (osc, &rate) in self.oscillators.iter_mut().zip(&rates) {
            osc.phase = osc.phase.advanced(rate, dt);
        }

        self.rates = rates;
        self.steps += 1;
        self.elapsed += dt;
    }

    pub fn snapshot(&self) -> Vec<OscillatorSnapshot> {
        self.oscillators
            .iter()
            .map(|osc| {
                let p = self.ring.position(osc.phase);
                OscillatorSnapshot {
                    x: p.x,
                    y: p.y,
                    phase: osc.phase.radians(),
                }
            })
            .collect()
    }

    /// Move or rescale the ring without touching phases.
    pub fn reconfigure(&mut self, center: Point, radius: f64) -> Result<()> {
        self.ring = Ring::new(center, radius)?;
        Ok(())
    }

    /// Re-derive the ring from a resized surface, keeping phases.
    pub fn resize(&mut self, size: SurfaceSize, ring_scale: f64) -> Result<()> {
        self.ring = Ring::for_surface(size, ring_scale)?;
        self.bounds = Some(size);
        Ok(())
    }

    pub fn order_parameter(&self) -> OrderParameter {
        let n = self.oscillators.len() as f64;
        if n < 1.0 {
            return OrderParameter {
                coherence: 0.0,
                mean_phase: Phase::default(),
            };
        }
        let (sum_cos, sum_sin) = self.oscillators.iter().fold((0.0, 0.0), |(c, s), osc| {
            let (cos, sin) = osc.phase.unit();
            (c + cos, s + sin)
        });
        let (mc, ms) = (sum_cos / n, sum_sin / n);
        OrderParameter {
            coherence: mc.hypot(ms).clamp(0.0, 1.0),
            mean_phase: Phase::new(ms.atan2(mc)),
        }
    }
}
