//! JSON frame records for external consumers.
//!
//! One record per frame, field names in camelCase, phases as bare f64
//! radians. Streamed as newline-delimited JSON by the CLI.

use serde::{Deserialize, Serialize};

use crate::field::{OscillatorField, OscillatorSnapshot};

pub const WIRE_VERSION: &str = "1";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub version: String,
    pub step: u64,
    pub elapsed: f64,
    pub coherence: f64,
    pub mean_phase: f64,
    pub oscillators: Vec<OscillatorSnapshot>,
}

impl FrameRecord {
    pub fn capture(field: &OscillatorField) -> Self {
        let order = field.order_parameter();
        Self {
            version: WIRE_VERSION.to_string(),
            step: field.steps(),
            elapsed: field.elapsed(),
            coherence: order.coherence,
            mean_phase: order.mean_phase.radians(),
            oscillators: field.snapshot(),
        }
    }
}

/// Single-line JSON for the field's current frame.
pub fn encode_frame(field: &OscillatorField) -> serde_json::Result<String> {
    serde_json::to_string(&FrameRecord::capture(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, PointerState, Ring};
    use crate::repulsion::Repulsion;

    fn field() -> OscillatorField {
        let ring = Ring::new(Point::new(50.0, 50.0), 40.0).unwrap();
        OscillatorField::from_parts(&[0.0, 1.0, 2.0], &[0.1, 0.0, -0.1], 1.0, ring, Repulsion::default())
            .unwrap()
    }

    #[test]
    fn test_encode_is_single_line() {
        let line = encode_frame(&field()).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"meanPhase\""));
        assert!(!line.contains("mean_phase"));
    }

    #[test]
    fn test_record_tracks_steps() {
        let mut f = field();
        f.advance(0.5, PointerState::Absent);
        f.advance(0.5, PointerState::Absent);
        let line = encode_frame(&f).unwrap();
        let rec: FrameRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(rec.version, WIRE_VERSION);
        assert_eq!(rec.step, 2);
        assert_eq!(rec.elapsed, 1.0);
        assert_eq!(rec.oscillators, f.snapshot());
        assert!(rec.coherence >= 0.0 && rec.coherence <= 1.0);
    }
}
