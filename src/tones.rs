//! DTMF tone table: keypad keys and their frequency pairs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Low-group frequencies in Hz.
pub const LOW_FREQUENCIES: [f64; 4] = [697.0, 770.0, 852.0, 941.0];

/// High-group frequencies in Hz.
pub const HIGH_FREQUENCIES: [f64; 3] = [1209.0, 1336.0, 1477.0];

/// A DTMF keypad key. Invalid keys are unrepresentable; parsing from text is
/// the fallible boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "String")]
pub enum Key {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Star,
    Zero,
    Hash,
}

/// Canonical key ordering used for deterministic iteration and tie-breaking.
pub const KEY_ORDER: [Key; 12] = [
    Key::One,
    Key::Two,
    Key::Three,
    Key::Four,
    Key::Five,
    Key::Six,
    Key::Seven,
    Key::Eight,
    Key::Nine,
    Key::Star,
    Key::Zero,
    Key::Hash,
];

impl Key {
    /// The canonical (low, high) tone pair for this key.
    pub const fn frequencies(self) -> FrequencyPair {
        match self {
            Key::One => FrequencyPair { low: 697.0, high: 1209.0 },
            Key::Two => FrequencyPair { low: 697.0, high: 1336.0 },
            Key::Three => FrequencyPair { low: 697.0, high: 1477.0 },
            Key::Four => FrequencyPair { low: 770.0, high: 1209.0 },
            Key::Five => FrequencyPair { low: 770.0, high: 1336.0 },
            Key::Six => FrequencyPair { low: 770.0, high: 1477.0 },
            Key::Seven => FrequencyPair { low: 852.0, high: 1209.0 },
            Key::Eight => FrequencyPair { low: 852.0, high: 1336.0 },
            Key::Nine => FrequencyPair { low: 852.0, high: 1477.0 },
            Key::Star => FrequencyPair { low: 941.0, high: 1209.0 },
            Key::Zero => FrequencyPair { low: 941.0, high: 1336.0 },
            Key::Hash => FrequencyPair { low: 941.0, high: 1477.0 },
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Key::One),
            '2' => Some(Key::Two),
            '3' => Some(Key::Three),
            '4' => Some(Key::Four),
            '5' => Some(Key::Five),
            '6' => Some(Key::Six),
            '7' => Some(Key::Seven),
            '8' => Some(Key::Eight),
            '9' => Some(Key::Nine),
            '*' => Some(Key::Star),
            '0' => Some(Key::Zero),
            '#' => Some(Key::Hash),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Key::One => '1',
            Key::Two => '2',
            Key::Three => '3',
            Key::Four => '4',
            Key::Five => '5',
            Key::Six => '6',
            Key::Seven => '7',
            Key::Eight => '8',
            Key::Nine => '9',
            Key::Star => '*',
            Key::Zero => '0',
            Key::Hash => '#',
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    /// Accepts the single keypad characters plus the textual aliases
    /// `asterisk` and `hashtag`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asterisk" => return Ok(Key::Star),
            "hashtag" => return Ok(Key::Hash),
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c)
                .ok_or_else(|| Error::unknown_key(format!("'{}' is not a DTMF key", s))),
            _ => Err(Error::unknown_key(format!("'{}' is not a DTMF key", s))),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Key> for char {
    fn from(key: Key) -> char {
        key.to_char()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An ordered (low, high) frequency pair in Hz.
///
/// Table entries always satisfy `low < high`; detected pairs must go through
/// [`FrequencyPair::from_detected`] since detection order is not guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPair {
    pub low: f64,
    pub high: f64,
}

impl FrequencyPair {
    /// Build a pair from two detected frequencies, sorting them ascending.
    pub fn from_detected(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The same pair with components sorted ascending.
    pub fn sorted(self) -> Self {
        Self::from_detected(self.low, self.high)
    }

    /// Euclidean distance to another pair in frequency space.
    pub fn distance(&self, other: &FrequencyPair) -> f64 {
        let dl = self.low - other.low;
        let dh = self.high - other.high;
        (dl * dl + dh * dh).sqrt()
    }
}

/// Forward lookup: the table entry for `key`.
pub fn lookup(key: Key) -> FrequencyPair {
    key.frequencies()
}

/// Reverse lookup: all keys whose table entry equals `pair` exactly.
///
/// The input is sorted before comparison. Normally returns exactly one key;
/// empty when no entry matches bit-for-bit.
pub fn reverse_lookup(pair: FrequencyPair) -> Vec<Key> {
    let pair = pair.sorted();
    KEY_ORDER
        .iter()
        .copied()
        .filter(|key| key.frequencies() == pair)
        .collect()
}
