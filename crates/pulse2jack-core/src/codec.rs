//! Pipe-delimited encoding of bridge lists.
//!
//! Each bridge is stored as a single `name|direction|channels|autoconnect`
//! string so that readers which only know about plain string lists, and the
//! external bridging process reading `jack-connections`, keep working.

use crate::bridge::Bridge;
use crate::error::{Error, Result};

/// Field separator in an encoded bridge.
pub const DELIMITER: char = '|';

/// Encode a single bridge.
#[must_use]
pub fn encode_bridge(bridge: &Bridge) -> String {
    format!(
        "{name}{d}{direction}{d}{channels}{d}{auto}",
        name = bridge.name,
        direction = bridge.direction,
        channels = bridge.channels,
        auto = if bridge.auto_connect { "True" } else { "False" },
        d = DELIMITER,
    )
}

/// Encode a list of bridges, preserving order.
#[must_use]
pub fn encode(bridges: &[Bridge]) -> Vec<String> {
    bridges.iter().map(encode_bridge).collect()
}

/// Decode a single encoded bridge.
///
/// # Errors
/// Returns [`Error::MalformedRecord`] unless the line has exactly four fields,
/// [`Error::InvalidDirection`] for an unknown direction and
/// [`Error::InvalidChannelCount`] unless the channel field is a positive integer.
pub fn decode_bridge(line: &str) -> Result<Bridge> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [name, direction, channels, auto_connect] = fields.as_slice() else {
        return Err(Error::MalformedRecord { line: line.to_string(), fields: fields.len() });
    };

    let channels = match channels.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(Error::InvalidChannelCount { value: channels.to_string() }),
    };

    Ok(Bridge {
        name: name.to_string(),
        direction: direction.parse()?,
        channels,
        auto_connect: parse_flag(auto_connect),
    })
}

/// Decode a list of encoded bridges, failing on the first bad line.
///
/// # Errors
/// See [`decode_bridge`].
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Bridge>> {
    lines.iter().map(|line| decode_bridge(line.as_ref())).collect()
}

/// Any casing of `true` is set, everything else is unset.
fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{Direction, default_bridges};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_encode_defaults() {
        assert_eq!(
            encode(&default_bridges()),
            vec!["PulseAudio JACK Source|source|2|True", "PulseAudio JACK Sink|sink|2|True"]
        );
    }

    #[test]
    fn test_encode_unset_flag() {
        let bridge = Bridge::new("Mic", Direction::Source, 1, false);
        assert_eq!(encode_bridge(&bridge), "Mic|source|1|False");
    }

    #[test]
    fn test_decode_flag_spellings() {
        for line in ["A|sink|2|True", "A|sink|2|true", "A|sink|2|TRUE", "A|sink|2|tRuE"] {
            assert!(decode_bridge(line).unwrap().auto_connect, "{line}");
        }
        for line in ["A|sink|2|False", "A|sink|2|", "A|sink|2|1", "A|sink|2|yes"] {
            assert!(!decode_bridge(line).unwrap().auto_connect, "{line}");
        }
    }

    #[test]
    fn test_decode_too_few_fields() {
        assert_matches!(
            decode(&["A|source|2"]),
            Err(Error::MalformedRecord { fields: 3, .. })
        );
    }

    #[test]
    fn test_decode_extra_fields_rejected() {
        assert_matches!(
            decode(&["A|source|2|True|extra"]),
            Err(Error::MalformedRecord { fields: 5, .. })
        );
    }

    #[test]
    fn test_decode_bad_channels() {
        assert_matches!(
            decode(&["A|source|x|True"]),
            Err(Error::InvalidChannelCount { value }) if value == "x"
        );
        assert_matches!(decode(&["A|source|0|True"]), Err(Error::InvalidChannelCount { .. }));
        assert_matches!(decode(&["A|source|-2|True"]), Err(Error::InvalidChannelCount { .. }));
    }

    #[test]
    fn test_decode_bad_direction() {
        assert_matches!(decode(&["A|both|2|True"]), Err(Error::InvalidDirection { .. }));
    }

    #[test]
    fn test_decode_stops_at_first_bad_line() {
        let lines = vec!["A|source|2|True".to_string(), "broken".to_string()];
        assert_matches!(decode(&lines), Err(Error::MalformedRecord { fields: 1, .. }));
    }

    #[test]
    fn test_decode_empty_list() {
        let lines: Vec<String> = Vec::new();
        assert!(decode(&lines).unwrap().is_empty());
    }

    fn bridge_strategy() -> impl Strategy<Value = Bridge> {
        (
            "[^|]{0,24}",
            prop_oneof![Just(Direction::Source), Just(Direction::Sink)],
            1u32..=64,
            any::<bool>(),
        )
            .prop_map(|(name, direction, channels, auto_connect)| Bridge {
                name,
                direction,
                channels,
                auto_connect,
            })
    }

    proptest! {
        #[test]
        fn test_round_trip(bridges in prop::collection::vec(bridge_strategy(), 0..8)) {
            let decoded = decode(&encode(&bridges)).unwrap();
            prop_assert_eq!(decoded, bridges);
        }
    }
}
