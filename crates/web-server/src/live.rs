use calculator::RevenueCalculator;
use core_types::{CalculatorInputs, DerivedMetrics};
use events::{CalculatorSnapshot, ClientMessage, RevenueFrame, WsMessage};
use presenter::{AnimatedValuePresenter, PresenterSettings};
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::watch;

/// One live calculator on one page.
///
/// Holds the current slider positions and the presenter that animates the
/// monthly revenue figure. Metrics are recomputed synchronously on every
/// input change; only the revenue display is animated. The session knows
/// nothing about the transport carrying its messages.
#[derive(Debug)]
pub struct LiveSession {
    inputs: CalculatorInputs,
    metrics: DerivedMetrics,
    calculator: RevenueCalculator,
    presenter: AnimatedValuePresenter,
}

impl LiveSession {
    /// Starts a session on `inputs`, with the revenue figure already settled.
    pub fn start(
        inputs: CalculatorInputs,
        calculator: RevenueCalculator,
        animation: PresenterSettings,
    ) -> Self {
        let inputs = inputs.clamped();
        let metrics = calculator.derive(&inputs);
        let presenter = AnimatedValuePresenter::spawn(revenue_target(&metrics), animation);

        Self {
            inputs,
            metrics,
            calculator,
            presenter,
        }
    }

    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            inputs: self.inputs,
            metrics: self.metrics,
        }
    }

    /// The greeting sent when the socket opens.
    pub fn connected(&self) -> WsMessage {
        WsMessage::Connected(self.snapshot())
    }

    /// Handles one text frame from the client and returns the reply.
    ///
    /// A message that cannot be decoded leaves the session untouched and
    /// yields [`WsMessage::Error`].
    pub fn handle_text(&mut self, text: &str) -> WsMessage {
        match ClientMessage::decode(text) {
            Ok(message) => WsMessage::Metrics(self.apply(&message)),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected client message.");
                WsMessage::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Applies a decoded client message and retargets the revenue animation.
    pub fn apply(&mut self, message: &ClientMessage) -> CalculatorSnapshot {
        self.inputs = message.apply(self.inputs);
        self.metrics = self.calculator.derive(&self.inputs);
        self.presenter.set_target(revenue_target(&self.metrics));
        self.snapshot()
    }

    /// Notified whenever the displayed revenue changes.
    pub fn frames(&self) -> watch::Receiver<i64> {
        self.presenter.subscribe()
    }

    /// The revenue frame currently on screen.
    pub fn frame(&self) -> WsMessage {
        WsMessage::RevenueFrame(RevenueFrame {
            value: self.presenter.displayed(),
        })
    }

    /// Ends the session, stopping the presenter's frame task.
    pub async fn shutdown(self) {
        self.presenter.shutdown().await;
    }
}

fn revenue_target(metrics: &DerivedMetrics) -> f64 {
    // Bounded by the slider domains, well inside f64 range.
    metrics.monthly_revenue_increase.to_f64().unwrap_or_default()
}
