use serde::Serialize;

use crate::error::PaceError;

use super::Field;
use super::format::{format_distance, format_pace, format_time, round_distance};

/// The field filled in by [`solve`] and its new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Derivation {
    pub field: Field,
    pub value: f64,
}

impl Derivation {
    /// The value rendered the way its field displays it.
    pub fn text(&self) -> String {
        match self.field {
            Field::Pace => format_pace(self.value),
            Field::Distance => format_distance(self.value),
            Field::Time => format_time(self.value),
        }
    }
}

/// Derives one of pace, distance and time from the other two.
///
/// With exactly two values present the missing one is derived. With all three
/// present, `last_edited` decides: an edit to pace or distance recomputes time,
/// an edit to time recomputes pace. Distance is never overwritten once all three
/// are filled. Anything else derives nothing.
pub fn solve(
    pace: Option<f64>,
    distance: Option<f64>,
    time: Option<f64>,
    last_edited: Option<Field>,
) -> Result<Option<Derivation>, PaceError> {
    match (pace, distance, time) {
        (Some(p), Some(d), None) => Ok(Some(time_from(p, d))),
        (Some(p), None, Some(t)) => distance_from(p, t).map(Some),
        (None, Some(d), Some(t)) => pace_from(d, t).map(Some),
        (Some(p), Some(d), Some(t)) => match last_edited {
            Some(Field::Pace | Field::Distance) => Ok(Some(time_from(p, d))),
            Some(Field::Time) => pace_from(d, t).map(Some),
            None => Ok(None),
        },
        _ => Ok(None),
    }
}

fn time_from(pace: f64, distance: f64) -> Derivation {
    Derivation {
        field: Field::Time,
        value: pace * distance,
    }
}

fn distance_from(pace: f64, time: f64) -> Result<Derivation, PaceError> {
    if pace <= 0.0 {
        return Err(PaceError::InvalidInput {
            field: Field::Pace,
            reason: "must be > 0",
        });
    }
    Ok(Derivation {
        field: Field::Distance,
        value: round_distance(time / pace),
    })
}

fn pace_from(distance: f64, time: f64) -> Result<Derivation, PaceError> {
    if distance <= 0.0 {
        return Err(PaceError::InvalidInput {
            field: Field::Distance,
            reason: "must be > 0",
        });
    }
    Ok(Derivation {
        field: Field::Pace,
        value: time / distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_and_distance_give_time() {
        let derived = solve(Some(270.0), Some(10.0), None, None).unwrap().unwrap();
        assert_eq!(derived.field, Field::Time);
        assert_eq!(derived.text(), "45:00");
    }

    #[test]
    fn test_distance_and_time_give_pace() {
        let derived = solve(None, Some(10.0), Some(2700.0), None).unwrap().unwrap();
        assert_eq!(derived.field, Field::Pace);
        assert_eq!(derived.text(), "4:30");
    }

    #[test]
    fn test_pace_and_time_give_distance() {
        let derived = solve(Some(270.0), None, Some(2700.0), None).unwrap().unwrap();
        assert_eq!(derived.field, Field::Distance);
        assert_eq!(derived.value, 10.0);
        assert_eq!(derived.text(), "10");
    }

    #[test]
    fn test_derived_distance_rounds_to_three_places() {
        let derived = solve(Some(300.0), None, Some(1000.0), None).unwrap().unwrap();
        assert_eq!(derived.value, 3.333);
    }

    #[test]
    fn test_zero_pace_with_time_is_invalid_input() {
        let err = solve(Some(0.0), None, Some(1800.0), None).unwrap_err();
        assert_eq!(
            err,
            PaceError::InvalidInput {
                field: Field::Pace,
                reason: "must be > 0"
            }
        );
    }

    #[test]
    fn test_zero_distance_with_time_is_invalid_input() {
        let err = solve(None, Some(0.0), Some(1800.0), None).unwrap_err();
        assert_eq!(err.field(), Field::Distance);
    }

    #[test]
    fn test_fewer_than_two_values_derive_nothing() {
        assert_eq!(solve(None, None, None, Some(Field::Pace)), Ok(None));
        assert_eq!(solve(Some(270.0), None, None, Some(Field::Pace)), Ok(None));
        assert_eq!(solve(None, None, Some(2700.0), Some(Field::Time)), Ok(None));
    }

    #[test]
    fn test_all_three_follow_last_edited() {
        let by_pace = solve(Some(300.0), Some(10.0), Some(2700.0), Some(Field::Pace)).unwrap();
        assert_eq!(by_pace.map(|d| (d.field, d.value)), Some((Field::Time, 3000.0)));

        let by_distance = solve(Some(270.0), Some(5.0), Some(2700.0), Some(Field::Distance)).unwrap();
        assert_eq!(by_distance.map(|d| (d.field, d.value)), Some((Field::Time, 1350.0)));

        let by_time = solve(Some(270.0), Some(10.0), Some(3000.0), Some(Field::Time)).unwrap();
        assert_eq!(by_time.map(|d| (d.field, d.value)), Some((Field::Pace, 300.0)));
    }

    #[test]
    fn test_all_three_without_edit_derive_nothing() {
        assert_eq!(solve(Some(270.0), Some(10.0), Some(2700.0), None), Ok(None));
    }
}
