//! Server state and connection management.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, MemberRegistry, RoomDirectory},
    infrastructure::dto::websocket::ServerMessage,
    usecase::SessionLock,
};

/// One open WebSocket connection, addressable by the coordinator.
pub struct ConnectionHandle {
    /// Message sender channel feeding the connection's send task
    pub sender: mpsc::UnboundedSender<String>,
}

/// Shared application state
///
/// Constructed once at process start and passed by handle to all event
/// handlers; there are no module-level singletons, so tests get a fresh
/// state per instance.
pub struct AppState {
    /// Member Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn MemberRegistry>,
    /// Room Directory（データアクセス層の抽象化）
    pub directory: Arc<dyn RoomDirectory>,
    /// Serializes coordinator events so registry/directory transitions
    /// stay atomic per event
    pub session_lock: SessionLock,
    /// Open WebSocket connections keyed by connection id
    pub connections: Arc<Mutex<HashMap<ConnectionId, ConnectionHandle>>>,
}

impl AppState {
    /// Create the shared state from repository handles.
    pub fn new(registry: Arc<dyn MemberRegistry>, directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            registry,
            directory,
            session_lock: SessionLock::new(),
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Send one message to one connection. A closed or unknown connection is
    /// logged and skipped; its departure is handled by disconnect cleanup.
    pub async fn unicast(&self, target: &ConnectionId, message: &ServerMessage) {
        self.multicast(std::slice::from_ref(target), message).await;
    }

    /// Send one message to each of the given connections.
    pub async fn multicast(&self, targets: &[ConnectionId], message: &ServerMessage) {
        let json = serde_json::to_string(message).unwrap();
        let connections = self.connections.lock().await;
        for target in targets {
            match connections.get(target) {
                Some(handle) => {
                    if handle.sender.send(json.clone()).is_err() {
                        tracing::warn!("failed to send message to connection '{}'", target);
                    }
                }
                None => {
                    tracing::debug!("connection '{}' is already gone, skipping", target);
                }
            }
        }
    }
}
