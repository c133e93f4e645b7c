//! # Maalgah Web Server
//!
//! Serves the landing page and its calculator.
//!
//! - `GET /`: the server-rendered page. Slider positions come from the query string.
//! - `GET /api/calculator`: the same derivation as JSON.
//! - `GET /ws`: a live calculator session with animated revenue frames.

use axum::{Router, routing::get};
use calculator::RevenueCalculator;
use configuration::Settings;
use core_types::CalculatorInputs;
use presenter::PresenterSettings;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod format;
pub mod handlers;
pub mod live;
pub mod page;
pub mod socket;

/// The shared application state that all handlers can access.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Slider positions used when a request does not specify them.
    pub defaults: CalculatorInputs,
    pub calculator: RevenueCalculator,
    pub animation: PresenterSettings,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            defaults: CalculatorInputs::from(settings.calculator.clone()).clamped(),
            calculator: RevenueCalculator::new(),
            animation: settings.animation,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Builds the router with all routes and middleware attached.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::landing_page))
        .route("/api/health", get(handlers::health))
        .route("/api/calculator", get(handlers::calculate))
        .route("/ws", get(handlers::websocket_handler))
        .with_state(Arc::new(state))
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let app = app(AppState::from_settings(settings));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
