//! Live invalidation channel.
//!
//! Holds one WebSocket subscription to the server's book update feed. When
//! a book is added or deleted the catalog is invalidated and refetched.
//!
//! Lifecycle:
//! - `open` spawns the connection task in `Connecting`
//! - a completed handshake moves it to `Open`
//! - a server close, stream error, or failed handshake moves it to `Closed`
//! - `close` moves it to `Closed` from any state and may be called repeatedly
//!
//! There is exactly one connection attempt per `open`; nothing reconnects.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{oneshot, watch};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::error::Result;
use catalog_core::events::parse_live_event;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Receives invalidation signals from the live channel.
pub trait Invalidate: Send + Sync + 'static {
    /// Called once per event that makes the catalog stale.
    /// Implementations must not block; spawn the refetch instead.
    fn invalidate(&self);
}

/// Connection state of a [`LiveChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Connecting,
    Open,
}

/// Handle to the live connection task owned by one view.
#[derive(Debug)]
pub struct LiveChannel {
    state: Arc<watch::Sender<ChannelState>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl LiveChannel {
    /// Starts connecting to `url` and returns immediately in `Connecting`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open<S>(url: impl Into<String>, sink: Arc<S>) -> Self
    where
        S: Invalidate + ?Sized,
    {
        let url = url.into();
        let (state, _) = watch::channel(ChannelState::Connecting);
        let state = Arc::new(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::info!(url = %url, "Opening live channel");
        let task = tokio::spawn(run_connection(url, sink, state.clone(), shutdown_rx));

        Self {
            state,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Subscribes to connection state changes.
    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.state.subscribe()
    }

    /// Closes the connection and waits for the task to finish.
    ///
    /// Safe to call in any state and more than once.
    pub async fn close(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The task may already have exited on its own.
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "Live channel task ended abnormally");
            }
        }
        self.state.send_replace(ChannelState::Closed);
    }
}

impl Drop for LiveChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.state.send_replace(ChannelState::Closed);
        }
    }
}

/// Connection task: one handshake, then read until closed or shut down.
async fn run_connection<S>(
    url: String,
    sink: Arc<S>,
    state: Arc<watch::Sender<ChannelState>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) where
    S: Invalidate + ?Sized,
{
    let ws_stream = tokio::select! {
        _ = &mut shutdown_rx => {
            tracing::info!("Live channel closed before connecting");
            state.send_replace(ChannelState::Closed);
            return;
        }
        result = connect(&url) => {
            match result {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "Live channel connection failed");
                    state.send_replace(ChannelState::Closed);
                    return;
                }
            }
        }
    };

    state.send_replace(ChannelState::Open);
    tracing::info!("Live channel open");

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                if let Err(err) = write.close().await {
                    tracing::debug!(error = %err, "Error sending close frame");
                }
                tracing::info!("Live channel closed");
                break;
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text(text.as_str(), sink.as_ref());
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Live channel closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "Live channel error");
                        break;
                    }
                }
            }
        }
    }

    state.send_replace(ChannelState::Closed);
}

/// Performs the WebSocket handshake.
async fn connect(url: &str) -> Result<WsStream> {
    let (stream, _) = connect_async(url).await?;
    Ok(stream)
}

/// Handles one text frame. Returns true if the catalog was invalidated.
fn handle_text<S>(text: &str, sink: &S) -> bool
where
    S: Invalidate + ?Sized,
{
    match parse_live_event(text) {
        Ok(event) if event.invalidates_catalog() => {
            tracing::debug!(?event, "Catalog invalidated by live event");
            sink.invalidate();
            true
        }
        Ok(event) => {
            tracing::trace!(?event, "Ignoring live event");
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, "Dropping malformed live event");
            false
        }
    }
}
