//! Test fixtures for integration tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

use whiteboard_app_rs::{ServerConfig, run_server};

/// A whiteboard server running in a background task for one test.
///
/// Each test uses its own port so that servers (and their in-memory state)
/// never overlap between tests.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on the given port and wait until it accepts
    /// connections.
    pub async fn start(port: u16) -> Self {
        tokio::spawn(async move {
            let config = ServerConfig {
                host: "127.0.0.1".to_string(),
                port,
            };
            if let Err(e) = run_server(config).await {
                panic!("test server failed to run: {}", e);
            }
        });

        let addr = format!("127.0.0.1:{}", port);
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(&addr).await.is_ok() {
                return Self { port };
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("test server did not start listening on {}", addr);
    }

    /// Base URL for HTTP requests.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// URL for the WebSocket endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

/// A WebSocket client session against a [`TestServer`].
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        Self { stream }
    }

    /// Send a JSON message to the server.
    pub async fn send(&mut self, message: serde_json::Value) {
        self.stream
            .send(Message::text(message.to_string()))
            .await
            .expect("Failed to send WebSocket message");
    }

    /// Receive the next text message as JSON, with a timeout.
    pub async fn recv(&mut self) -> serde_json::Value {
        let deadline = Duration::from_secs(5);
        loop {
            let msg = tokio::time::timeout(deadline, self.stream.next())
                .await
                .expect("Timed out waiting for WebSocket message")
                .expect("WebSocket stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).expect("Failed to parse JSON message");
            }
        }
    }

    /// Receive messages until one with the given `type` arrives.
    ///
    /// Joining produces a burst (joined / member-list / member-joined), so
    /// tests usually care about one specific message in the stream.
    pub async fn recv_type(&mut self, message_type: &str) -> serde_json::Value {
        for _ in 0..20 {
            let msg = self.recv().await;
            if msg["type"] == message_type {
                return msg;
            }
        }
        panic!("Did not receive message of type '{}'", message_type);
    }

    /// Assert that no message arrives within a short window.
    pub async fn expect_silence(&mut self) {
        let result =
            tokio::time::timeout(Duration::from_millis(300), self.stream.next()).await;
        assert!(
            result.is_err(),
            "Expected no message, but received one: {:?}",
            result
        );
    }

    /// Close the connection and give the server a moment to process the
    /// departure.
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
