use serde::Serialize;

use super::Unit;
use super::format::{format_time, round_distance};

pub const KM_PER_MILE: f64 = 1.609344;

/// Shown in place of a finish time when no pace is known.
pub const PLACEHOLDER: &str = "—";

/// A standard race distance, expressed in one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub distance: f64,
}

const KM_PRESETS: [Preset; 5] = [
    Preset { label: "1 km", distance: 1.0 },
    Preset { label: "5 km", distance: 5.0 },
    Preset { label: "10 km", distance: 10.0 },
    Preset { label: "Half Marathon", distance: 21.0975 },
    Preset { label: "Marathon", distance: 42.195 },
];

const MI_PRESETS: [Preset; 5] = [
    Preset { label: "1 mi", distance: 1.0 },
    Preset { label: "5K (3.11 mi)", distance: 3.10686 },
    Preset { label: "10K (6.21 mi)", distance: 6.21371 },
    Preset { label: "Half Marathon (13.11 mi)", distance: 13.1094 },
    Preset { label: "Marathon (26.22 mi)", distance: 26.2188 },
];

impl Unit {
    pub fn presets(self) -> &'static [Preset] {
        match self {
            Unit::Km => &KM_PRESETS,
            Unit::Mi => &MI_PRESETS,
        }
    }

    /// Converts a distance expressed in `self` into `to`.
    pub fn convert_distance(self, to: Unit, distance: f64) -> f64 {
        match (self, to) {
            (Unit::Km, Unit::Mi) => distance / KM_PER_MILE,
            (Unit::Mi, Unit::Km) => distance * KM_PER_MILE,
            _ => distance,
        }
    }

    /// Converts seconds-per-`self` into seconds-per-`to`. Speed is unchanged.
    pub fn convert_pace(self, to: Unit, pace: f64) -> f64 {
        match (self, to) {
            (Unit::Km, Unit::Mi) => pace * KM_PER_MILE,
            (Unit::Mi, Unit::Km) => pace / KM_PER_MILE,
            _ => pace,
        }
    }
}

/// Converts distance and pace between units. Time never changes with units,
/// so it isn't an input.
pub fn convert_units(
    from: Unit,
    to: Unit,
    distance: Option<f64>,
    pace: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    (
        distance.map(|d| from.convert_distance(to, d)),
        pace.map(|p| from.convert_pace(to, p)),
    )
}

/// One row of the finish-time table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinishTime {
    pub label: &'static str,
    pub distance: f64,
    pub time: String,
}

/// Finish time for each preset at `pace` seconds per unit.
pub fn finish_time_table(pace: Option<f64>, presets: &[Preset]) -> Vec<FinishTime> {
    presets
        .iter()
        .map(|preset| FinishTime {
            label: preset.label,
            distance: round_distance(preset.distance),
            time: pace
                .map(|p| format_time(p * preset.distance))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        })
        .collect()
}
