//! Bridge entry definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::DELIMITER;
use crate::error::Error;

/// Name of the bridge seeded as the default source.
pub const DEFAULT_SOURCE_NAME: &str = "PulseAudio JACK Source";

/// Name of the bridge seeded as the default sink.
pub const DEFAULT_SINK_NAME: &str = "PulseAudio JACK Sink";

/// Channel count used for defaults and new rows.
pub const DEFAULT_CHANNELS: u32 = 2;

/// Which way audio flows through a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Audio input exposed to JACK
    #[default]
    Source,
    /// Audio output exposed to JACK
    Sink,
}

impl Direction {
    /// Text used for this direction in the persisted encoding.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Sink => "sink",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Self::Source),
            "sink" => Ok(Self::Sink),
            _ => Err(Error::InvalidDirection { value: s.to_string() }),
        }
    }
}

/// A PulseAudio to JACK bridge entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    /// Port name shown in JACK
    pub name: String,
    /// Source or sink
    pub direction: Direction,
    /// Number of audio channels (at least 1)
    pub channels: u32,
    /// Connect automatically when the bridge starts
    pub auto_connect: bool,
}

impl Bridge {
    /// Create a new bridge entry.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        channels: u32,
        auto_connect: bool,
    ) -> Self {
        Self { name: name.into(), direction, channels, auto_connect }
    }

    /// The default source bridge.
    #[must_use]
    pub fn default_source() -> Self {
        Self::new(DEFAULT_SOURCE_NAME, Direction::Source, DEFAULT_CHANNELS, true)
    }

    /// The default sink bridge.
    #[must_use]
    pub fn default_sink() -> Self {
        Self::new(DEFAULT_SINK_NAME, Direction::Sink, DEFAULT_CHANNELS, true)
    }

    /// Unnamed row offered once both a source and a sink exist.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", Direction::Source, DEFAULT_CHANNELS, false)
    }

    /// Whether the name can be stored without breaking the encoding.
    ///
    /// The delimiter would split the record into extra fields, and a line
    /// break would split it across lines of the connection file.
    #[must_use]
    pub fn has_encodable_name(&self) -> bool {
        !self.name.contains([DELIMITER, '\n', '\r'])
    }
}

/// The two bridges a fresh installation starts with, source first.
#[must_use]
pub fn default_bridges() -> Vec<Bridge> {
    vec![Bridge::default_source(), Bridge::default_sink()]
}
