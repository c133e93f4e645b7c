use crate::live::LiveSession;
use crate::page::{LandingPageContext, render_landing_page};
use crate::{AppState, error::AppError, socket};
use axum::{
    Json,
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::{Html, IntoResponse},
};
use chrono::Datelike;
use core_types::{CalculatorInputs, InputField};
use events::CalculatorSnapshot;
use futures_util::StreamExt;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Reads slider positions from query parameters, starting from `defaults`.
///
/// Unknown keys are ignored. Known keys must parse as numbers; the parsed
/// value is then clamped into the slider's domain.
pub fn inputs_from_query(
    defaults: CalculatorInputs,
    params: &HashMap<String, String>,
) -> Result<CalculatorInputs, AppError> {
    let mut inputs = defaults;
    for field in InputField::ALL {
        let Some(raw) = params.get(field.as_str()) else {
            continue;
        };
        let value = Decimal::from_str(raw.trim()).map_err(|e| AppError::InvalidInput {
            field: field.to_string(),
            reason: format!("'{raw}' is not a number ({e})"),
        })?;
        inputs = inputs.with_field(field, value);
    }
    Ok(inputs)
}

/// # GET /
/// The landing page, with the calculator rendered for the queried inputs.
pub async fn landing_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let inputs = inputs_from_query(state.defaults, &params)?;
    let ctx = LandingPageContext {
        inputs,
        metrics: state.calculator.derive(&inputs),
        year: chrono::Local::now().year(),
    };
    Ok(Html(render_landing_page(&ctx)))
}

/// # GET /api/calculator
/// The derived metrics for the queried inputs, as JSON.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CalculatorSnapshot>, AppError> {
    let inputs = inputs_from_query(state.defaults, &params)?;
    Ok(Json(CalculatorSnapshot {
        inputs,
        metrics: state.calculator.derive(&inputs),
    }))
}

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /ws
/// Live calculator: slider moves in, metrics and animated revenue frames out.
///
/// Takes the same query as `GET /`, so the session starts on the inputs the
/// page was rendered with.
pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let session = start_session(&state, &params)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, session)))
}

/// Starts a live session on the queried inputs.
pub fn start_session(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<LiveSession, AppError> {
    let inputs = inputs_from_query(state.defaults, params)?;
    Ok(LiveSession::start(inputs, state.calculator, state.animation))
}

async fn handle_socket(socket: WebSocket, session: LiveSession) {
    tracing::info!("[WS] New client connected.");
    let (sender, receiver) = socket.split();
    socket::run_session(sender, receiver, session).await;
}
