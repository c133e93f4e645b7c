use calculator::RevenueCalculator;
use core_types::{CalculatorInputs, InputField};
use events::{ClientMessage, RevenueFrame, WsMessage};
use presenter::PresenterSettings;
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio::time;
use web_server::live::LiveSession;
use web_server::page::{LandingPageContext, render_landing_page};

/// Drives a live session through a sequence of slider moves the way the page
/// script does, and checks the revenue frames settle on the last result.
#[tokio::test(start_paused = true)]
async fn rapid_slider_moves_settle_on_the_last_revenue() {
    let mut session = LiveSession::start(
        CalculatorInputs::default(),
        RevenueCalculator::new(),
        PresenterSettings::default(),
    );
    let mut frames = session.frames();
    frames.borrow_and_update();

    for calls in [80, 120, 200] {
        let reply = session.handle_text(&format!(
            r#"{{"type":"SetField","payload":{{"field":"dailyCalls","value":{calls}}}}}"#
        ));
        assert!(matches!(reply, WsMessage::Metrics(s) if s.inputs.daily_calls == calls));
        time::sleep(Duration::from_millis(50)).await;
    }

    // 200 * 30% * 80% * 8% * 22 * 120
    let expected = session.snapshot().metrics.monthly_revenue_increase;
    assert_eq!(expected, dec!(10137.60));

    let mut seen = Vec::new();
    while time::timeout(Duration::from_millis(100), frames.changed()).await.is_ok() {
        seen.push(*frames.borrow_and_update());
    }
    assert_eq!(seen.last().copied(), Some(10138));
    assert_eq!(session.frame(), WsMessage::RevenueFrame(RevenueFrame { value: 10138 }));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn page_and_session_agree_on_the_metrics() {
    let inputs = CalculatorInputs::default()
        .with_field(InputField::ConversionRate, dec!(12))
        .with_field(InputField::AvgValue, dec!(200));

    let mut session = LiveSession::start(
        CalculatorInputs::default(),
        RevenueCalculator::new(),
        PresenterSettings::default(),
    );
    let snapshot = session.apply(&ClientMessage::SetInputs(inputs));

    let html = render_landing_page(&LandingPageContext {
        inputs,
        metrics: calculator::derive(&inputs),
        year: 2026,
    });

    assert_eq!(snapshot.metrics, calculator::derive(&inputs));
    // 60 * 30% * 80% * 12% * 22 * 200
    assert!(html.contains("$7,603.2<"));
    session.shutdown().await;
}
