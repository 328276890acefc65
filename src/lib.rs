//! Collaborative whiteboard session server library.
//!
//! Clients join named rooms over WebSocket, the room creator becomes its
//! host, and drawing operations / chat messages are relayed to the other
//! room members. Room membership, permissions and board state live in
//! memory for the lifetime of each room.

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, run_server};
