use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use parley_core::{ClientEvent, ConnectionId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Upgrades `GET /ws`. Every socket gets a fresh live connection id.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let conn = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, conn, service))
}

/// What to do with one inbound WebSocket frame.
#[derive(Debug)]
pub(crate) enum FrameAction {
    Forward(RelayCommand),
    Skip,
    Close,
}

/// Text frames become relay events; malformed ones are logged and skipped
/// without closing the socket. Binary and ping/pong frames are skipped.
pub(crate) fn frame_command(conn: ConnectionId, msg: Message) -> FrameAction {
    match msg {
        Message::Text(text) => match ClientEvent::decode(text.as_str()) {
            Ok(event) => FrameAction::Forward(RelayCommand::Event { conn, event }),
            Err(e) => {
                warn!("Ignoring frame from {}: {}", conn, e);
                FrameAction::Skip
            }
        },
        Message::Close(_) => FrameAction::Close,
        _ => FrameAction::Skip,
    }
}

async fn handle_socket(socket: WebSocket, conn: ConnectionId, service: SignalingService) {
    info!("New WebSocket connection: {}", conn);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(conn, tx);

    if let Err(e) = service.relay_tx.send(RelayCommand::Connected { conn }).await {
        error!("Relay died: {}", e);
        service.remove_connection(&conn);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match frame_command(conn, msg) {
                    FrameAction::Forward(cmd) => {
                        if let Err(e) = service.relay_tx.send(cmd).await {
                            error!("Relay died: {}", e);
                            break;
                        }
                    }
                    FrameAction::Skip => {}
                    FrameAction::Close => break,
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_connection(&conn);
    let _ = service.relay_tx.send(RelayCommand::Disconnected { conn }).await;
    info!(
        "WebSocket disconnected: {} ({} still open)",
        conn,
        service.connection_count()
    );
}
