//! Cross-layer utilities.

pub mod time;
