//! Pace / distance / time calculator.
//!
//! Everything here is synchronous and free of shared state: give it any two
//! of pace, distance and time and it fills in the third.

mod calculator;
mod format;
mod solver;
mod units;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use calculator::{Calculator, CalculatorView, FieldState, FieldView};
pub use format::{
    format_distance, format_pace, format_time, parse_distance, parse_pace, parse_time,
    round_distance, round_seconds,
};
pub use solver::{Derivation, solve};
pub use units::{FinishTime, KM_PER_MILE, PLACEHOLDER, Preset, convert_units, finish_time_table};

/// One of the three calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Pace,
    Distance,
    Time,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Pace => "pace",
            Field::Distance => "distance",
            Field::Time => "time",
        };
        f.write_str(name)
    }
}

/// Distance unit the calculator is working in. Pace is seconds per this unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Km,
    Mi,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Km => f.write_str("km"),
            Unit::Mi => f.write_str("mi"),
        }
    }
}
