//! Pulse2JACK Core - bridge list model, encoding and persistence rules.
//!
//! This crate holds the bridge entries that map PulseAudio sources and sinks
//! onto JACK ports, the pipe-delimited encoding they are stored in, and the
//! [`BridgeList`] manager that keeps them in sync with a settings store and
//! the `jack-connections` file.

pub mod bridge;
pub mod codec;
pub mod connections;
pub mod error;
pub mod events;
pub mod manager;
pub mod store;

pub use bridge::{Bridge, Direction, default_bridges};
pub use connections::ConnectionFile;
pub use error::{Error, Result};
pub use events::{BridgeEvent, ListenerId};
pub use manager::{BridgeList, is_valid, next_row};
pub use store::{MemoryStore, SETTINGS_KEY, SettingsStore};
