use crate::app_context::AppContext;
use crate::racers::events::TrackerEvent;
use crate::racers::message_types::ServerSentSocketMessage;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

pub async fn ws(ws: WebSocketUpgrade, State(app_context): State<AppContext>) -> Response {
    let events = app_context.events.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, events))
}

/// Forwards every tracker event to the socket until the client goes away.
async fn stream_events(socket: WebSocket, events: broadcast::Receiver<TrackerEvent>) {
    tracing::info!(task = "ws_connection", "Renderer connected.");
    let (mut socket_tx, mut socket_rx) = socket.split();
    let mut events = BroadcastStream::new(events);
    let forwarding = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let event = match event {
                Ok(event) => event,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(task = "ws_connection", skipped, "Renderer is lagging behind.");
                    continue;
                }
            };
            let message = match serde_json::to_string(&ServerSentSocketMessage::from(event)) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(task = "ws_connection", error = %e, "Failed to serialize an event.");
                    continue;
                }
            };
            if socket_tx.send(Message::Text(message)).await.is_err() {
                break;
            }
        }
    });
    // Renderers only listen; incoming messages are read to notice when the socket closes.
    while let Some(Ok(message)) = socket_rx.next().await {
        if let Message::Close(_) = message {
            break;
        }
    }
    forwarding.abort();
    tracing::info!(task = "ws_connection", "Renderer disconnected.");
}
