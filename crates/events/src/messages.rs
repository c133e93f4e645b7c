use crate::error::EventsError;
use core_types::{CalculatorInputs, DerivedMetrics, InputField};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The inputs and the metrics derived from them, always taken together so a
/// client never sees metrics that belong to other inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    pub inputs: CalculatorInputs,
    pub metrics: DerivedMetrics,
}

/// One displayed frame of the animated monthly revenue figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueFrame {
    pub value: i64,
}

/// A message from the browser: the user moved one or more sliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Replace all five inputs at once.
    SetInputs(CalculatorInputs),
    /// Move a single slider.
    SetField { field: InputField, value: Decimal },
}

impl ClientMessage {
    /// Parses a JSON text frame.
    pub fn decode(text: &str) -> Result<Self, EventsError> {
        serde_json::from_str(text).map_err(|e| EventsError::Deserialization(e.to_string()))
    }

    /// Applies the message to `current`, clamping into the slider domains.
    pub fn apply(&self, current: CalculatorInputs) -> CalculatorInputs {
        match self {
            ClientMessage::SetInputs(inputs) => inputs.clamped(),
            ClientMessage::SetField { field, value } => current.with_field(*field, *value),
        }
    }
}

/// The top-level WebSocket message enum.
/// All communication from the server to the client will be one of these variants.
///
/// `#[serde(tag = "type", content = "payload")]` serializes each variant into an
/// object the page script can switch on, e.g. a frame looks like
/// `{ "type": "RevenueFrame", "payload": { "value": 3041 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WsMessage {
    /// Sent once when the socket opens, with the starting inputs and metrics.
    Connected(CalculatorSnapshot),
    /// A fresh snapshot after an input change. Displayed immediately.
    Metrics(CalculatorSnapshot),
    /// The animated revenue value changed.
    RevenueFrame(RevenueFrame),
    /// The last client message could not be understood.
    Error { message: String },
}

impl WsMessage {
    pub fn encode(&self) -> Result<String, EventsError> {
        serde_json::to_string(self).map_err(|e| EventsError::Serialization(e.to_string()))
    }
}
