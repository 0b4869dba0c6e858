use crate::error::PaceError;

use super::Field;

/// Whole seconds, ties to even. Negative and NaN inputs clamp to zero.
pub fn round_seconds(seconds: f64) -> f64 {
    seconds.max(0.0).round_ties_even()
}

/// Three decimal places, ties to even.
pub fn round_distance(distance: f64) -> f64 {
    (distance * 1000.0).round_ties_even() / 1000.0
}

// One numeric component of a time or pace. Decimal commas count as points.
fn component(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() {
        return None;
    }
    part.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn is_clock_part(value: f64) -> bool {
    (0.0..=59.0).contains(&value)
}

/// Parses a finish time: plain seconds, `M:SS` or `H:MM:SS`.
///
/// Returns `Ok(None)` for blank input.
pub fn parse_time(text: &str) -> Result<Option<f64>, PaceError> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let invalid = || PaceError::InvalidFormat {
        field: Field::Time,
        input: s.to_string(),
    };

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<f64>().map(Some).map_err(|_| invalid());
    }

    let parts = s
        .split(':')
        .map(component)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, sec] => (0.0, *m, *sec),
        [h, m, sec] => (*h, *m, *sec),
        _ => return Err(invalid()),
    };
    if hours < 0.0 || !is_clock_part(minutes) || !is_clock_part(seconds) {
        return Err(invalid());
    }
    Ok(Some(hours * 3600.0 + minutes * 60.0 + seconds))
}

/// `M:SS` under an hour, `H:MM:SS` otherwise.
pub fn format_time(seconds: f64) -> String {
    let total = round_seconds(seconds) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Parses a pace, strictly `M:SS`. Minutes may exceed 59.
pub fn parse_pace(text: &str) -> Result<Option<f64>, PaceError> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let invalid = || PaceError::InvalidFormat {
        field: Field::Pace,
        input: s.to_string(),
    };

    let Some((min_part, sec_part)) = s.split_once(':') else {
        return Err(invalid());
    };
    if sec_part.contains(':') {
        return Err(invalid());
    }
    let minutes = component(min_part).ok_or_else(invalid)?;
    let seconds = component(sec_part).ok_or_else(invalid)?;
    if minutes < 0.0 || !is_clock_part(seconds) {
        return Err(invalid());
    }
    Ok(Some(minutes * 60.0 + seconds))
}

pub fn format_pace(seconds: f64) -> String {
    let total = round_seconds(seconds) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parses a distance in the active unit. Decimal commas are accepted.
pub fn parse_distance(text: &str) -> Result<Option<f64>, PaceError> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let value = component(s).ok_or_else(|| PaceError::InvalidFormat {
        field: Field::Distance,
        input: s.to_string(),
    })?;
    if value < 0.0 {
        return Err(PaceError::InvalidInput {
            field: Field::Distance,
            reason: "must not be negative",
        });
    }
    Ok(Some(value))
}

pub fn format_distance(distance: f64) -> String {
    // avoid rendering "-0"
    (round_distance(distance) + 0.0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_shapes() {
        assert_eq!(parse_time("2700"), Ok(Some(2700.0)));
        assert_eq!(parse_time("45:00"), Ok(Some(2700.0)));
        assert_eq!(parse_time("1:05:09"), Ok(Some(3909.0)));
        assert_eq!(parse_time("01:5:9"), Ok(Some(3909.0)));
        assert_eq!(parse_time(" 3:30:58 "), Ok(Some(12658.0)));
    }

    #[test]
    fn test_parse_time_blank_is_absent() {
        assert_eq!(parse_time(""), Ok(None));
        assert_eq!(parse_time("   "), Ok(None));
    }

    #[test]
    fn test_parse_time_rejects_bad_input() {
        for input in ["abc", "1:60", "60:00:00:00", "1::00", "1:2:60", "-1:00:00", "45:", ":30"] {
            let err = parse_time(input).unwrap_err();
            assert!(
                matches!(err, PaceError::InvalidFormat { field: Field::Time, .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(2700.0), "45:00");
        assert_eq!(format_time(3599.4), "59:59");
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(12658.5), "3:30:58");
        assert_eq!(format_time(-5.0), "0:00");
    }

    #[test]
    fn test_time_round_trip() {
        for s in (0..86_400u32).step_by(37).chain([3599, 3600, 3601, 86_399]) {
            let s = s as f64;
            assert_eq!(parse_time(&format_time(s)), Ok(Some(s)), "round trip of {s}");
        }
    }

    #[test]
    fn test_parse_pace() {
        assert_eq!(parse_pace("4:30"), Ok(Some(270.0)));
        assert_eq!(parse_pace("04:05"), Ok(Some(245.0)));
        assert_eq!(parse_pace("75:00"), Ok(Some(4500.0)));
        assert_eq!(parse_pace("0:00"), Ok(Some(0.0)));
        assert_eq!(parse_pace(""), Ok(None));
    }

    #[test]
    fn test_parse_pace_is_strictly_minutes_seconds() {
        for input in ["270", "1:04:30", "4:60", "4:", ":30", "x:30", "-1:30"] {
            assert!(parse_pace(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_pace_round_trip() {
        for s in 0..6000u32 {
            let s = s as f64;
            assert_eq!(parse_pace(&format_pace(s)), Ok(Some(s)));
        }
    }

    #[test]
    fn test_format_pace_rounds_ties_to_even() {
        assert_eq!(format_pace(270.0), "4:30");
        assert_eq!(format_pace(434.52288), "7:15");
        assert_eq!(format_pace(270.5), "4:30");
        assert_eq!(format_pace(271.5), "4:32");
    }

    #[test]
    fn test_parse_distance_accepts_decimal_comma() {
        assert_eq!(parse_distance("10"), Ok(Some(10.0)));
        assert_eq!(parse_distance("21,0975"), Ok(Some(21.0975)));
        assert_eq!(parse_distance(" "), Ok(None));
        assert!(matches!(
            parse_distance("ten"),
            Err(PaceError::InvalidFormat { field: Field::Distance, .. })
        ));
        assert!(matches!(
            parse_distance("-3"),
            Err(PaceError::InvalidInput { field: Field::Distance, .. })
        ));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(10.0), "10");
        assert_eq!(format_distance(6.213_711_922), "6.214");
        assert_eq!(format_distance(21.0975), "21.098");
    }
}
