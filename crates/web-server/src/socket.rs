use crate::live::LiveSession;
use axum::extract::ws::Message;
use events::WsMessage;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use thiserror::Error;

/// Why the socket loop stopped writing. Never leaves this module.
#[derive(Error, Debug)]
enum SendError {
    #[error("Event encoding error: {0}")]
    Encode(#[from] events::EventsError),
    #[error("client has gone")]
    Closed,
}

/// Runs one live calculator session over a message stream and sink.
///
/// Sends `Connected` first. Every text frame is answered with `Metrics` (or
/// `Error`) before any revenue frame it causes, and every change of the
/// displayed revenue is forwarded as a `RevenueFrame`. The session is shut
/// down when the client closes, the stream ends, or a send fails.
pub async fn run_session<S, R, E>(mut sender: S, mut receiver: R, mut session: LiveSession)
where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut frames = session.frames();
    frames.borrow_and_update();

    if send(&mut sender, &session.connected()).await.is_err() {
        session.shutdown().await;
        return;
    }

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let reply = match incoming {
                    Some(Ok(Message::Text(text))) => session.handle_text(&text),
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("[WS] Client disconnected.");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "[WS] Error.");
                        break;
                    }
                    Some(Ok(_)) => continue,
                };
                if send(&mut sender, &reply).await.is_err() {
                    break;
                }
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                frames.borrow_and_update();
                if send(&mut sender, &session.frame()).await.is_err() {
                    break;
                }
            }
        }
    }

    session.shutdown().await;
    tracing::info!("[WS] Connection closed.");
}

async fn send<S>(sender: &mut S, message: &WsMessage) -> Result<(), SendError>
where
    S: Sink<Message> + Unpin,
{
    let text = message.encode().inspect_err(|e| {
        tracing::error!(error = ?e, "[WS] Event encoding error.");
    })?;
    if sender.send(Message::Text(text)).await.is_err() {
        tracing::debug!("[WS] Send failed, client has gone.");
        return Err(SendError::Closed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculator::RevenueCalculator;
    use core_types::CalculatorInputs;
    use events::{CalculatorSnapshot, RevenueFrame};
    use futures::channel::mpsc;
    use presenter::PresenterSettings;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time;

    type Incoming = mpsc::UnboundedSender<Result<Message, axum::Error>>;
    type Outgoing = mpsc::UnboundedReceiver<Message>;

    struct Client {
        tx: Incoming,
        rx: Outgoing,
        task: JoinHandle<()>,
        frames: tokio::sync::watch::Receiver<i64>,
    }

    impl Client {
        fn connect(inputs: CalculatorInputs) -> Self {
            let session = LiveSession::start(
                inputs,
                RevenueCalculator::new(),
                PresenterSettings::default(),
            );
            let frames = session.frames();
            let (tx, server_rx) = mpsc::unbounded();
            let (server_tx, rx) = mpsc::unbounded();
            let task = tokio::spawn(run_session(server_tx, server_rx, session));
            Self {
                tx,
                rx,
                task,
                frames,
            }
        }

        fn send_text(&self, text: &str) {
            self.tx
                .unbounded_send(Ok(Message::Text(text.to_string())))
                .unwrap();
        }

        async fn next(&mut self) -> Option<WsMessage> {
            match self.rx.next().await? {
                Message::Text(text) => Some(serde_json::from_str(&text).unwrap()),
                other => panic!("unexpected frame {other:?}"),
            }
        }

        async fn expect_snapshot(&mut self) -> CalculatorSnapshot {
            match self.next().await {
                Some(WsMessage::Connected(s)) | Some(WsMessage::Metrics(s)) => s,
                other => panic!("expected a snapshot, got {other:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn greets_with_the_session_inputs() {
        let inputs = CalculatorInputs::default().with_field(
            core_types::InputField::AvgValue,
            dec!(240),
        );
        let mut client = Client::connect(inputs);

        let Some(WsMessage::Connected(snapshot)) = client.next().await else {
            panic!("expected Connected first");
        };
        assert_eq!(snapshot.inputs, inputs);
        assert_eq!(snapshot.metrics.monthly_revenue_increase, dec!(6082.56));
    }

    #[tokio::test(start_paused = true)]
    async fn resending_the_page_inputs_does_not_animate() {
        let inputs = CalculatorInputs::default().with_field(
            core_types::InputField::AvgValue,
            dec!(240),
        );
        let mut client = Client::connect(inputs);
        client.expect_snapshot().await;

        let payload = serde_json::to_string(&inputs).unwrap();
        client.send_text(&format!(r#"{{"type":"SetInputs","payload":{payload}}}"#));
        let snapshot = client.expect_snapshot().await;
        assert_eq!(snapshot.metrics.monthly_revenue_increase, dec!(6082.56));

        // Nothing moves: the revenue figure was already on the page value.
        let quiet = time::timeout(Duration::from_secs(1), client.next()).await;
        assert!(quiet.is_err(), "unexpected frame {quiet:?}");
        assert_eq!(*client.frames.borrow(), 6083);
    }

    #[tokio::test(start_paused = true)]
    async fn metrics_come_before_the_frames_they_cause() {
        let mut client = Client::connect(CalculatorInputs::default());
        client.expect_snapshot().await;

        client.send_text(r#"{"type":"SetField","payload":{"field":"avgValue","value":240}}"#);
        let Some(WsMessage::Metrics(snapshot)) = client.next().await else {
            panic!("expected Metrics before any frame");
        };
        assert_eq!(snapshot.inputs.avg_value, dec!(240));

        let mut last = None;
        while let Some(message) = client.next().await {
            let WsMessage::RevenueFrame(RevenueFrame { value }) = message else {
                panic!("expected only frames, got {message:?}");
            };
            assert!((3041..=6083).contains(&value));
            last = Some(value);
            if value == 6083 {
                break;
            }
        }
        assert_eq!(last, Some(6083));
    }

    #[tokio::test(start_paused = true)]
    async fn bad_text_is_answered_with_an_error_and_changes_nothing() {
        let mut client = Client::connect(CalculatorInputs::default());
        client.expect_snapshot().await;

        client.send_text("{\"type\":\"SetField\"");
        assert!(matches!(client.next().await, Some(WsMessage::Error { .. })));

        client.send_text(r#"{"type":"SetField","payload":{"field":"conversionRate","value":8}}"#);
        let snapshot = client.expect_snapshot().await;
        assert_eq!(snapshot.inputs, CalculatorInputs::default());
    }

    #[tokio::test(start_paused = true)]
    async fn close_shuts_the_presenter_down() {
        let mut client = Client::connect(CalculatorInputs::default());
        client.expect_snapshot().await;
        client.frames.borrow_and_update();

        client.tx.unbounded_send(Ok(Message::Close(None))).unwrap();
        (&mut client.task).await.unwrap();

        assert!(client.next().await.is_none());
        assert!(client.frames.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_stream_shuts_the_presenter_down() {
        let mut client = Client::connect(CalculatorInputs::default());
        client.expect_snapshot().await;
        client.frames.borrow_and_update();

        client.tx.close_channel();
        (&mut client.task).await.unwrap();

        assert!(client.frames.changed().await.is_err());
    }
}
