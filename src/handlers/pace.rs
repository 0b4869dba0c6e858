use axum::Json;
use tracing::debug;

use crate::metrics::PACE_REQUESTS;
use crate::models::{PaceRequest, UnitToggleRequest};
use crate::pace::{Calculator, CalculatorView};

// One calculator round trip: the client sends its fields and the field it
// just edited, and gets back the fields with the derived one filled in
pub async fn pace_handler(Json(req): Json<PaceRequest>) -> Json<CalculatorView> {
    PACE_REQUESTS.inc();

    let mut calculator = Calculator {
        unit: req.unit,
        pace: req.pace,
        distance: req.distance,
        time: req.time,
        last_edited: req.edited,
    };
    let outcome = calculator.recompute();
    if let Err(e) = &outcome {
        debug!(error = %e, "Pace derivation rejected");
    }

    Json(calculator.view().with_outcome(&outcome))
}

// Unit toggle: converts distance and pace, leaves time alone
pub async fn unit_handler(Json(req): Json<UnitToggleRequest>) -> Json<CalculatorView> {
    PACE_REQUESTS.inc();

    let mut calculator = Calculator {
        unit: req.unit,
        pace: req.pace,
        distance: req.distance,
        time: req.time,
        last_edited: None,
    };
    calculator.toggle_unit(req.to);

    Json(calculator.view())
}
