use serde::Serialize;
use tracing::debug;

use crate::error::PaceError;

use super::format::{format_distance, format_pace, parse_distance, parse_pace, parse_time};
use super::solver::{Derivation, solve};
use super::units::{FinishTime, finish_time_table};
use super::{Field, Unit};

/// An editing session: the three text inputs, the unit toggle and which
/// field the user touched last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    pub unit: Unit,
    pub pace: String,
    pub distance: String,
    pub time: String,
    pub last_edited: Option<Field>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Absent,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub text: String,
    pub state: FieldState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a client needs to render the calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorView {
    pub unit: Unit,
    pub pace: FieldView,
    pub distance: FieldView,
    pub time: FieldView,
    pub derived: Option<Field>,
    pub error: Option<String>,
    pub current_pace: Option<String>,
    pub finish_times: Vec<FinishTime>,
}

impl CalculatorView {
    /// Folds the result of [`Calculator::recompute`] into the view.
    pub fn with_outcome(mut self, outcome: &Result<Option<Derivation>, PaceError>) -> Self {
        match outcome {
            Ok(derivation) => self.derived = derivation.map(|d| d.field),
            Err(err) => {
                let message = err.to_string();
                self.field_mut(err.field()).error = Some(message.clone());
                self.error = Some(message);
            }
        }
        self
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldView {
        match field {
            Field::Pace => &mut self.pace,
            Field::Distance => &mut self.distance,
            Field::Time => &mut self.time,
        }
    }
}

impl Calculator {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Pace => &self.pace,
            Field::Distance => &self.distance,
            Field::Time => &self.time,
        }
    }

    fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Pace => &mut self.pace,
            Field::Distance => &mut self.distance,
            Field::Time => &mut self.time,
        }
    }

    /// Parses one field. `Ok(None)` means the field is blank.
    pub fn parse(&self, field: Field) -> Result<Option<f64>, PaceError> {
        let text = self.text(field);
        match field {
            Field::Pace => parse_pace(text),
            Field::Distance => parse_distance(text),
            Field::Time => parse_time(text),
        }
    }

    fn valid(&self, field: Field) -> Option<f64> {
        self.parse(field).ok().flatten()
    }

    /// Replaces a field's text and marks it as the last edited.
    pub fn edit(&mut self, field: Field, text: impl Into<String>) {
        *self.text_mut(field) = text.into();
        self.last_edited = Some(field);
    }

    /// Derives the missing (or stale) field and writes it back as text.
    ///
    /// A field holding invalid text is never overwritten: it stays as typed
    /// until the user edits it again.
    pub fn recompute(&mut self) -> Result<Option<Derivation>, PaceError> {
        let derivation = solve(
            self.valid(Field::Pace),
            self.valid(Field::Distance),
            self.valid(Field::Time),
            self.last_edited,
        )?;
        let Some(derivation) = derivation else {
            return Ok(None);
        };
        if self.parse(derivation.field).is_err() {
            debug!(field = %derivation.field, "Skipping derivation into invalid field");
            return Ok(None);
        }
        *self.text_mut(derivation.field) = derivation.text();
        Ok(Some(derivation))
    }

    /// Switches units, converting distance and pace text. Time is untouched,
    /// and text that doesn't parse is left as typed.
    pub fn toggle_unit(&mut self, next: Unit) {
        if next == self.unit {
            return;
        }
        if let Ok(Some(distance)) = self.parse(Field::Distance) {
            self.distance = format_distance(self.unit.convert_distance(next, distance));
        }
        if let Ok(Some(pace)) = self.parse(Field::Pace) {
            self.pace = format_pace(self.unit.convert_pace(next, pace));
        }
        self.unit = next;
    }

    /// Clears all fields, keeping the unit.
    pub fn reset(&mut self) {
        *self = Self::new(self.unit);
    }

    /// Seconds per unit, from the pace field or else from time over distance.
    pub fn current_pace(&self) -> Option<f64> {
        if let Some(pace) = self.valid(Field::Pace) {
            return Some(pace);
        }
        match (self.valid(Field::Time), self.valid(Field::Distance)) {
            (Some(time), Some(distance)) if distance > 0.0 => Some(time / distance),
            _ => None,
        }
    }

    pub fn finish_times(&self) -> Vec<FinishTime> {
        finish_time_table(self.current_pace(), self.unit.presets())
    }

    fn field_view(&self, field: Field) -> FieldView {
        let (state, error) = match self.parse(field) {
            Ok(None) => (FieldState::Absent, None),
            Ok(Some(_)) => (FieldState::Valid, None),
            Err(err) => (FieldState::Invalid, Some(err.to_string())),
        };
        FieldView {
            text: self.text(field).to_string(),
            state,
            error,
        }
    }

    pub fn view(&self) -> CalculatorView {
        CalculatorView {
            unit: self.unit,
            pace: self.field_view(Field::Pace),
            distance: self.field_view(Field::Distance),
            time: self.field_view(Field::Time),
            derived: None,
            error: None,
            current_pace: self.current_pace().map(format_pace),
            finish_times: self.finish_times(),
        }
    }
}
