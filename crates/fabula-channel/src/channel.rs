//! Connection lifecycle management.
//!
//! [`EventChannel`] owns at most one live transport at a time. `connect`
//! spawns a connection task that runs the connect → read → close →
//! fixed-delay backoff loop until the channel's cancellation token fires;
//! `disconnect` cancels that token, so a reconnect timer that was already
//! scheduled can never produce a new connection afterwards.

use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use fabula_core::Notifier;

use crate::config::ChannelConfig;
use crate::context::ChannelContext;
use crate::dispatch::dispatch_frame;
use crate::registry::{EventCallback, SubscriptionRegistry, TopicKey};

/// Lifecycle state of the underlying transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport, and none being established.
    Closed,
    /// A connection attempt is in flight.
    Connecting,
    /// The transport is up and frames are being read.
    Open,
}

struct LiveConnection {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// A resilient push-notification channel.
///
/// One instance per scope (global, or one per open project), constructed
/// explicitly by the composition root and shared by `Arc`.
pub struct EventChannel {
    context: ChannelContext,
    config: ChannelConfig,
    registry: Arc<SubscriptionRegistry>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<ConnectionState>>,
    live: Mutex<Option<LiveConnection>>,
}

impl EventChannel {
    /// Create a channel. No transport is opened until [`connect`] is called.
    ///
    /// [`connect`]: EventChannel::connect
    #[must_use]
    pub fn new(context: ChannelContext, config: ChannelConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            context,
            config,
            registry: Arc::new(SubscriptionRegistry::new()),
            notifier,
            state: Arc::new(Mutex::new(ConnectionState::Closed)),
            live: Mutex::new(None),
        }
    }

    /// The context this channel was created with. Reconnects reuse it
    /// unchanged.
    #[must_use]
    pub fn context(&self) -> &ChannelContext {
        &self.context
    }

    /// Current transport state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Whether a connection task is running (connecting, open, or waiting
    /// out the reconnect delay).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live
            .lock()
            .as_ref()
            .is_some_and(|conn| !conn.handle.is_finished())
    }

    /// The subscription registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Register a callback under a key.
    pub fn subscribe(&self, key: TopicKey, callback: EventCallback) {
        self.registry.subscribe(key, callback);
    }

    /// Unregister every callback under a key.
    pub fn unsubscribe(&self, key: &TopicKey) {
        self.registry.remove(key);
    }

    /// Open the channel. Idempotent: while a connection task is live
    /// (connecting, open, or between reconnect attempts) this is a no-op,
    /// so no duplicate transport can be created.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        let mut live = self.live.lock();
        if let Some(conn) = live.as_ref() {
            if !conn.handle.is_finished() {
                debug!(url = %self.context.url(), "connect ignored, channel already active");
                return;
            }
        }

        *self.state.lock() = ConnectionState::Connecting;
        let token = CancellationToken::new();
        let handle = tokio::spawn(run_connection(
            self.context.clone(),
            self.config,
            self.registry.clone(),
            self.notifier.clone(),
            self.state.clone(),
            token.clone(),
        ));
        *live = Some(LiveConnection { token, handle });
    }

    /// Close the channel and suppress the automatic reconnect for this
    /// explicit call. All registered subscriptions are cleared.
    pub fn disconnect(&self) {
        let mut live = self.live.lock();
        if let Some(conn) = live.take() {
            conn.token.cancel();
        }
        *self.state.lock() = ConnectionState::Closed;
        self.registry.clear();
        info!(url = %self.context.url(), "channel disconnected");
    }
}

impl Drop for EventChannel {
    fn drop(&mut self) {
        if let Some(conn) = self.live.get_mut().take() {
            conn.token.cancel();
        }
    }
}

/// Connection task: connect, read frames, and on any close wait out the
/// fixed delay before trying again with the same context. Exits only when
/// the token is cancelled.
async fn run_connection(
    context: ChannelContext,
    config: ChannelConfig,
    registry: Arc<SubscriptionRegistry>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<ConnectionState>>,
    token: CancellationToken,
) {
    let url = context.url();
    loop {
        let attempt = tokio::select! {
            biased;
            () = token.cancelled() => break,
            result = tokio_tungstenite::connect_async(url.as_str()) => result,
        };

        match attempt {
            Ok((mut ws, _response)) => {
                *state.lock() = ConnectionState::Open;
                info!(url = %url, "channel open");

                loop {
                    let frame = tokio::select! {
                        biased;
                        () = token.cancelled() => {
                            let _ = ws.close(None).await;
                            *state.lock() = ConnectionState::Closed;
                            return;
                        }
                        frame = ws.next() => frame,
                    };
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            dispatch_frame(&registry, notifier.as_ref(), text.as_str());
                        }
                        Some(Ok(Message::Close(_))) => break,
                        // Pings are answered by the transport layer.
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(url = %url, error = %e, "transport error");
                            break;
                        }
                        None => break,
                    }
                }
                info!(url = %url, "channel closed");
            }
            Err(e) => {
                warn!(url = %url, error = %e, "connect failed");
            }
        }

        *state.lock() = ConnectionState::Closed;
        tokio::select! {
            biased;
            () = token.cancelled() => return,
            () = tokio::time::sleep(config.reconnect_delay()) => {}
        }
        *state.lock() = ConnectionState::Connecting;
        debug!(url = %url, delay_ms = config.reconnect_delay_ms, "reconnecting");
    }
    *state.lock() = ConnectionState::Closed;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
