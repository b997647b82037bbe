//! The authoritative bridge list and its persistence rules.
//!
//! A presentation layer works on its own copy of the rows and hands them back
//! to [`BridgeList`] for validation, change detection and saving. Saving writes
//! the encoded list both to the settings store and to the connection file.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::bridge::{Bridge, Direction, default_bridges};
use crate::codec;
use crate::connections::ConnectionFile;
use crate::error::{Error, Result};
use crate::events::{BridgeEvent, ListenerId, Listeners};
use crate::store::{SETTINGS_KEY, SettingsStore};

/// Check whether `rows` may be saved.
///
/// A list is savable when it is not empty and every name is non-empty and
/// unique (case-sensitive).
///
/// Names containing the field delimiter or a line break, and bridges with zero
/// channels, are rejected as well. Such entries would encode to lines that do
/// not decode back to the same bridge, so saving them would break reloading
/// from settings and the connection file.
#[must_use]
pub fn is_valid(rows: &[Bridge]) -> bool {
    if rows.is_empty() {
        return false;
    }

    let mut used_names = HashSet::with_capacity(rows.len());
    rows.iter().all(|bridge| {
        !bridge.name.is_empty()
            && bridge.has_encodable_name()
            && bridge.channels >= 1
            && used_names.insert(bridge.name.as_str())
    })
}

/// Pick the row [`BridgeList::add_row`] appends to `rows`.
///
/// A missing sink is offered first, then a missing source, then a blank row.
#[must_use]
pub fn next_row(rows: &[Bridge]) -> Bridge {
    let has_source = rows.iter().any(|b| b.direction == Direction::Source);
    let has_sink = rows.iter().any(|b| b.direction == Direction::Sink);

    if !has_sink {
        Bridge::default_sink()
    } else if !has_source {
        Bridge::default_source()
    } else {
        Bridge::blank()
    }
}

/// Owner of the bridge list, its settings store and the connection file.
#[derive(Debug)]
pub struct BridgeList<S> {
    store: S,
    connections: ConnectionFile,
    bridges: Vec<Bridge>,
    listeners: Listeners,
}

impl<S: SettingsStore> BridgeList<S> {
    /// Create the manager and run [`initialise`](Self::initialise).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created, the store
    /// fails, or the stored list cannot be decoded.
    pub fn new(store: S, connections: ConnectionFile) -> Result<Self> {
        let mut list =
            Self { store, connections, bridges: Vec::new(), listeners: Listeners::default() };
        list.initialise()?;
        Ok(list)
    }

    /// Create the config directory, seed default settings if none exist yet
    /// and load the list.
    ///
    /// # Errors
    /// See [`new`](Self::new).
    pub fn initialise(&mut self) -> Result<()> {
        self.connections.ensure_dir()?;

        if !self.store.contains(SETTINGS_KEY)? {
            self.seed_defaults()?;
        }

        self.load_from_settings()
    }

    /// Replace the list with the one stored in settings.
    ///
    /// # Errors
    /// Returns an error if the store fails or an entry cannot be decoded.
    pub fn load_from_settings(&mut self) -> Result<()> {
        let lines = match self.store.value(SETTINGS_KEY)? {
            Some(lines) => lines,
            None => {
                self.seed_defaults()?;
                self.store.value(SETTINGS_KEY)?.unwrap_or_default()
            }
        };

        self.bridges = codec::decode(&lines)?;
        info!(count = self.bridges.len(), "Loaded bridges from settings");
        Ok(())
    }

    /// Replace the list with the built-in defaults. Settings are untouched
    /// until the next [`save`](Self::save).
    pub fn reset_to_defaults(&mut self) {
        self.bridges = default_bridges();
        debug!("Reset bridges to defaults");
        self.listeners.notify(&BridgeEvent::Reset);
    }

    /// Discard unsaved edits.
    ///
    /// # Errors
    /// See [`load_from_settings`](Self::load_from_settings).
    pub fn revert(&mut self) -> Result<()> {
        self.load_from_settings()?;
        self.listeners.notify(&BridgeEvent::Reverted);
        Ok(())
    }

    /// Compare `rows` positionally against the list currently in settings.
    ///
    /// Settings are re-read on every call. A missing setting compares as the
    /// defaults that would be seeded for it.
    ///
    /// # Errors
    /// Returns an error if the store fails or an entry cannot be decoded.
    pub fn has_pending_changes(&self, rows: &[Bridge]) -> Result<bool> {
        let saved = match self.store.value(SETTINGS_KEY)? {
            Some(lines) => codec::decode(&lines)?,
            None => default_bridges(),
        };

        if rows.len() != saved.len() {
            return Ok(true);
        }

        Ok(rows.iter().zip(&saved).any(|(row, orig)| {
            row.name != orig.name
                || row.direction != orig.direction
                || row.channels != orig.channels
                || row.auto_connect != orig.auto_connect
        }))
    }

    /// Append the most useful new row to `rows` and return it.
    ///
    /// The list becomes `rows` plus the new entry.
    pub fn add_row(&mut self, rows: &[Bridge]) -> Bridge {
        let bridge = next_row(rows);

        self.bridges = rows.to_vec();
        self.bridges.push(bridge.clone());

        let index = self.bridges.len() - 1;
        debug!(index, direction = %bridge.direction, "Added bridge row");
        self.listeners.notify(&BridgeEvent::RowAdded { index });
        bridge
    }

    /// Remove the row at `index` from `rows` and return it.
    ///
    /// # Errors
    /// Returns [`Error::RowOutOfRange`] if `index` is not a row of `rows`.
    pub fn remove_row(&mut self, rows: &[Bridge], index: usize) -> Result<Bridge> {
        if index >= rows.len() {
            return Err(Error::RowOutOfRange { index, len: rows.len() });
        }

        self.bridges = rows.to_vec();
        let removed = self.bridges.remove(index);
        debug!(index, name = %removed.name, "Removed bridge row");
        self.listeners.notify(&BridgeEvent::RowRemoved { index });
        Ok(removed)
    }

    /// Apply a single row edit made in the presentation layer.
    ///
    /// # Errors
    /// Returns [`Error::RowOutOfRange`] if there is no row at `index`.
    pub fn edit_row(&mut self, index: usize, bridge: Bridge) -> Result<()> {
        let len = self.bridges.len();
        let row = self.bridges.get_mut(index).ok_or(Error::RowOutOfRange { index, len })?;
        *row = bridge;
        self.listeners.notify(&BridgeEvent::RowEdited { index });
        Ok(())
    }

    /// Commit `rows` to settings and the connection file.
    ///
    /// Callers must check [`is_valid`] first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBridgeList`] if `rows` fails [`is_valid`], or
    /// the store or file error if writing fails.
    pub fn save(&mut self, rows: &[Bridge]) -> Result<()> {
        if !is_valid(rows) {
            warn!(count = rows.len(), "Refusing to save invalid bridge list");
            return Err(Error::InvalidBridgeList);
        }

        self.bridges = rows.to_vec();
        let lines = codec::encode(&self.bridges);
        self.store.set_value(SETTINGS_KEY, &lines)?;
        self.connections.write(&lines)?;

        info!(count = lines.len(), path = ?self.connections.path(), "Saved bridges");
        self.listeners.notify(&BridgeEvent::Saved { count: lines.len() });
        Ok(())
    }

    /// The current in-memory list.
    #[must_use]
    pub fn bridges(&self) -> &[Bridge] {
        &self.bridges
    }

    /// The connection file this list is written to.
    #[must_use]
    pub fn connection_file(&self) -> &ConnectionFile {
        &self.connections
    }

    /// The settings store backing this list.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, callback: impl FnMut(&BridgeEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Remove a change listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn seed_defaults(&mut self) -> Result<()> {
        info!(key = SETTINGS_KEY, "No bridges in settings, seeding defaults");
        self.store.set_value(SETTINGS_KEY, &codec::encode(&default_bridges()))
    }
}
