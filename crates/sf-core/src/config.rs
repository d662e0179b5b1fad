use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COUNT, DEFAULT_COUPLING, DEFAULT_FREQUENCY_STD_DEV, DEFAULT_TIME_STEP, RING_SCALE,
};
use crate::error::{ConfigError, Result, finite, non_negative, positive};
use crate::repulsion::Repulsion;

/// Tunable parameters for one simulation run. Every field has a default, so
/// a partial TOML table is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub count: usize,
    pub coupling: f64,
    pub frequency_std_dev: f64,
    pub time_step: f64,
    pub ring_scale: f64,
    pub repulsion: Repulsion,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            coupling: DEFAULT_COUPLING,
            frequency_std_dev: DEFAULT_FREQUENCY_STD_DEV,
            time_step: DEFAULT_TIME_STEP,
            ring_scale: RING_SCALE,
            repulsion: Repulsion::default(),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        finite("coupling", self.coupling)?;
        non_negative("frequency_std_dev", self.frequency_std_dev)?;
        positive("time_step", self.time_step)?;
        positive("ring_scale", self.ring_scale)?;
        self.repulsion.validate()
    }
}
