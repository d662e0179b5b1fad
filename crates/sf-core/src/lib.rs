//! Coupled phase-oscillator field simulator.
//!
//! A population of Kuramoto oscillators laid out on a ring, mutually
//! coupled and nudged by an optional pointer. The field is advanced one
//! explicit step at a time by whoever owns it; the crate never schedules
//! frames itself.
//!
//! Zero I/O. Pure math, no opinions about rendering or timing.

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod oscillator;
pub mod phase;
pub mod repulsion;
pub mod wire;

pub use config::FieldConfig;
pub use constants::{
    DEFAULT_COUNT, DEFAULT_COUPLING, DEFAULT_FREQUENCY_STD_DEV, DEFAULT_REPULSION_GAIN,
    DEFAULT_REPULSION_RADIUS, DEFAULT_TIME_STEP, REPULSION_EPSILON, RING_SCALE,
};
pub use error::{ConfigError, Result};
pub use field::{OrderParameter, OscillatorField, OscillatorSnapshot};
pub use geometry::{Point, PointerState, Ring, SurfaceSize};
pub use oscillator::Oscillator;
pub use phase::Phase;
pub use repulsion::Repulsion;
pub use wire::{FrameRecord, WIRE_VERSION, encode_frame};
