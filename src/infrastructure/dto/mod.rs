//! Data transfer objects for the wire surfaces.

pub mod http;
pub mod websocket;
