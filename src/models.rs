use serde::{Deserialize, Serialize};

use crate::pace::{Field, Unit};

// Waitlist signup request body
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeStatus {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SubscribeResponse {
    pub status: SubscribeStatus,
}

// Calculator state as the client currently shows it
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct PaceRequest {
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub pace: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub edited: Option<Field>,
}

// Unit toggle request - `to` is the unit being switched to
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct UnitToggleRequest {
    #[serde(default)]
    pub unit: Unit,
    pub to: Unit,
    #[serde(default)]
    pub pace: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub time: String,
}
