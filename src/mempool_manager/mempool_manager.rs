use futures_util::{Sink, SinkExt, StreamExt};
use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::instrument;

use super::{DecodeError, MempoolMessage, MempoolRaw, SUBSCRIPTION_TOPICS};
use crate::{
    configuration::ApplicationSettings, display_state::SharedDisplayState,
    error_fmt::error_chain_fmt,
};

#[derive(thiserror::Error)]
pub enum StreamError {
    #[error("mempool websocket transport failed")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("mempool websocket was closed by the server")]
    Closed,
    #[error("failed to decode a mempool update")]
    Decode(#[from] DecodeError),
    #[error("failed to encode a mempool request")]
    Encode(#[from] serde_json::Error),
}

impl Debug for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Asks the streaming task to track a transaction id.
#[derive(Debug, Clone)]
pub struct TxTracker {
    send: mpsc::UnboundedSender<String>,
}

impl TxTracker {
    pub fn track(&self, tx_id: impl Into<String>) {
        let tx_id = tx_id.into();
        if self.send.send(tx_id.clone()).is_err() {
            tracing::warn!(%tx_id, "mempool stream is gone, dropping track request");
        }
    }
}

pub fn track_channel() -> (TxTracker, mpsc::UnboundedReceiver<String>) {
    let (send, listen) = mpsc::unbounded_channel();
    (TxTracker { send }, listen)
}

/// Owns the websocket to the mempool instance and feeds every update into
/// the shared display state.
#[derive(Clone, Debug)]
pub struct MempoolManager {
    connect_addr: String,
    ping_interval: Duration,
    display_state: SharedDisplayState,
    kill_signal: Arc<AtomicBool>,
}

impl MempoolManager {
    pub fn build(
        settings: &ApplicationSettings,
        display_state: SharedDisplayState,
        kill_signal: Arc<AtomicBool>,
    ) -> Self {
        Self::new(
            settings.websocket_url(),
            settings.ping_interval(),
            display_state,
            kill_signal,
        )
    }

    pub fn new(
        connect_addr: String,
        ping_interval: Duration,
        display_state: SharedDisplayState,
        kill_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            connect_addr,
            ping_interval,
            display_state,
            kill_signal,
        }
    }

    /// Streams updates until the kill signal is raised. Any transport or
    /// decode failure ends the stream with an error; nothing is retried.
    #[instrument(skip_all, fields(connect_addr = %self.connect_addr))]
    pub async fn run(
        self,
        mut track_requests: mpsc::UnboundedReceiver<String>,
    ) -> Result<(), StreamError> {
        let (ws_stream, _) = connect_async(self.connect_addr.as_str()).await?;
        tracing::info!("connected to mempool websocket");
        let (mut write, mut read) = ws_stream.split();

        send_request(&mut write, MempoolMessage::init()).await?;
        send_request(&mut write, MempoolMessage::want(SUBSCRIPTION_TOPICS)).await?;

        let mut interval = tokio::time::interval(self.ping_interval);
        // the first tick completes immediately
        interval.tick().await;
        let mut accepting_tracks = true;
        loop {
            if self.kill_signal.load(Ordering::Relaxed) {
                tracing::info!("stopping mempool stream");
                break;
            }
            tokio::select! {
                msg = read.next() => {
                    let msg = match msg {
                        Some(msg) => msg?,
                        None => return Err(StreamError::Closed),
                    };
                    match msg {
                        Message::Text(_) | Message::Binary(_) => {
                            let events = MempoolRaw::try_from(msg)?.into_events();
                            tracing::debug!(events = events.len(), "received mempool update");
                            self.display_state.apply_all(events);
                        }
                        Message::Close(frame) => {
                            tracing::info!(?frame, "mempool websocket sent close");
                            return Err(StreamError::Closed);
                        }
                        _ => {}
                    }
                }
                tx_id = track_requests.recv(), if accepting_tracks => {
                    match tx_id {
                        Some(tx_id) => {
                            tracing::info!(%tx_id, "requesting transaction tracking");
                            send_request(&mut write, MempoolMessage::track_tx(tx_id)).await?;
                        }
                        None => accepting_tracks = false,
                    }
                }
                _ = interval.tick() => {
                    tracing::debug!("pinging mempool websocket");
                    write.send(Message::Ping(vec![0; 124])).await?;
                }
            }
        }
        Ok(())
    }
}

async fn send_request<S>(write: &mut S, request: MempoolMessage) -> Result<(), StreamError>
where
    S: Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    write.send(Message::Text(request.to_json()?)).await?;
    Ok(())
}
