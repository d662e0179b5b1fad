/// Default population size
pub const DEFAULT_COUNT: usize = 80;

/// Default global coupling strength K
pub const DEFAULT_COUPLING: f64 = 2.0;

/// Default standard deviation of natural frequencies (rad per unit time)
pub const DEFAULT_FREQUENCY_STD_DEV: f64 = 0.5;

/// Default integration step, tuned for a ~60Hz refresh
pub const DEFAULT_TIME_STEP: f64 = 0.02;

/// Pointer repulsion reach, in surface units
pub const DEFAULT_REPULSION_RADIUS: f64 = 100.0;

/// Peak tangential push at the pointer itself
pub const DEFAULT_REPULSION_GAIN: f64 = 0.5;

/// Pointer distances at or below this exert no push (avoids normalizing ~0 vectors)
pub const REPULSION_EPSILON: f64 = 1.0;

/// Ring radius as a fraction of the shorter half-extent of the surface
pub const RING_SCALE: f64 = 0.8;
