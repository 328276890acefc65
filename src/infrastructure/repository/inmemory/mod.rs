//! In-memory repository implementations backed by `HashMap`.

pub mod member;
pub mod room;

pub use member::InMemoryMemberRegistry;
pub use room::InMemoryRoomDirectory;
