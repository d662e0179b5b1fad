//! Frame driver: advances the field once per frame and hands each frame to
//! a sink. Runs back-to-back, or paced on a tokio interval until the frame
//! budget is spent or the run is cancelled.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use sf_core::{OscillatorField, Point, PointerState, Ring};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Where the simulated pointer is on each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerScript {
    Absent,
    Fixed(Point),
    Orbit {
        center: Point,
        radius: f64,
        /// Radians of orbit per unit of simulated time.
        angular_speed: f64,
    },
}

impl PointerScript {
    /// A pointer circling just outside `ring`, slowly enough to drag
    /// oscillators along with it.
    pub fn orbit_around(ring: Ring) -> Self {
        PointerScript::Orbit {
            center: ring.center,
            radius: ring.radius * 1.15,
            angular_speed: 0.6,
        }
    }

    /// Pointer position at simulated time `time` (the field's elapsed time
    /// at the start of a frame).
    pub fn sample(&self, time: f64) -> PointerState {
        match *self {
            PointerScript::Absent => PointerState::Absent,
            PointerScript::Fixed(p) => PointerState::At(p),
            PointerScript::Orbit {
                center,
                radius,
                angular_speed,
            } => {
                let (sin, cos) = (time * angular_speed).sin_cos();
                PointerState::at(center.x + radius * cos, center.y + radius * sin)
            }
        }
    }
}

/// Interval between paced frames. Rates so high that the period rounds to
/// zero are clamped to 1ns; rates whose period overflows `Duration` fail.
pub fn frame_period(fps: f64) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        bail!("frame rate must be a positive number, got {fps}");
    }
    let period = Duration::try_from_secs_f64(1.0 / fps)
        .with_context(|| format!("frame rate {fps} is too low to pace"))?;
    Ok(period.max(Duration::from_nanos(1)))
}

pub struct FrameDriver {
    field: OscillatorField,
    time_step: f64,
    script: PointerScript,
}

impl FrameDriver {
    pub fn new(field: OscillatorField, time_step: f64, script: PointerScript) -> Self {
        Self {
            field,
            time_step,
            script,
        }
    }

    pub fn field(&self) -> &OscillatorField {
        &self.field
    }

    /// Advance one frame; returns the pointer state used for it.
    pub fn tick(&mut self) -> PointerState {
        let pointer = self.script.sample(self.field.elapsed());
        self.field.advance(self.time_step, pointer);
        pointer
    }

    /// Run `frames` frames back-to-back.
    pub fn run_for<F>(&mut self, frames: u64, mut sink: F) -> Result<u64>
    where
        F: FnMut(&OscillatorField, PointerState) -> Result<()>,
    {
        for _ in 0..frames {
            let pointer = self.tick();
            sink(&self.field, pointer)?;
        }
        Ok(frames)
    }

    /// Run up to `frames` frames at `fps`, stopping early on cancellation.
    /// Returns the number of frames completed.
    pub async fn run_paced<F>(
        &mut self,
        frames: u64,
        fps: f64,
        cancel: CancellationToken,
        mut sink: F,
    ) -> Result<u64>
    where
        F: FnMut(&OscillatorField, PointerState) -> Result<()>,
    {
        let mut interval = tokio::time::interval(frame_period(fps)?);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut done = 0;
        while done < frames {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(frames = done, "frame loop cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let pointer = self.tick();
                    sink(&self.field, pointer)?;
                    done += 1;
                }
            }
        }
        Ok(done)
    }
}
