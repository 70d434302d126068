//! Exact and nearest-neighbor key classification

use tracing::trace;

use crate::tones::{self, FrequencyPair, Key, KEY_ORDER};
use crate::{Error, Result};

/// All keys whose table entry equals `pair` exactly.
///
/// Meaningful when the pair itself came from a table lookup, so the floats
/// are bit-identical to table values. The input is sorted before comparison.
pub fn exact_match(pair: FrequencyPair) -> Vec<Key> {
    tones::reverse_lookup(pair)
}

/// The key whose table entry is closest to `pair` by Euclidean distance.
///
/// The detected pair is sorted ascending first, since the table convention is
/// `low < high` and an unsorted pair produces meaningless distances. Ties
/// resolve to the earliest key in the canonical ordering 1..9, *, 0, #.
pub fn nearest_match(pair: FrequencyPair) -> Result<Key> {
    nearest_among(&KEY_ORDER, pair)
}

fn nearest_among(candidates: &[Key], pair: FrequencyPair) -> Result<Key> {
    let pair = pair.sorted();
    let mut best: Option<(Key, f64)> = None;

    for &key in candidates {
        let distance = key.frequencies().distance(&pair);
        trace!(%key, distance, "nearest-match candidate");
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((key, distance)),
        }
    }

    best.map(|(key, _)| key)
        .ok_or_else(|| Error::no_match("no candidate keys to match against"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_round_trip() {
        for key in KEY_ORDER {
            assert_eq!(exact_match(key.frequencies()), vec![key]);
        }
    }

    #[test]
    fn test_exact_match_unsorted_pair() {
        let detected = FrequencyPair::from_detected(1336.0, 770.0);
        assert_eq!(exact_match(detected), vec![Key::Five]);
    }

    #[test]
    fn test_nearest_is_idempotent_on_table_values() {
        for key in KEY_ORDER {
            assert_eq!(nearest_match(key.frequencies()).unwrap(), key);
        }
    }

    #[test]
    fn test_nearest_near_key_one() {
        // (700, 1210) sits near but not on key '1' (697/1209).
        let pair = FrequencyPair::from_detected(700.0, 1210.0);
        assert_eq!(nearest_match(pair).unwrap(), Key::One);
    }

    #[test]
    fn test_nearest_accepts_unsorted_input() {
        let pair = FrequencyPair { low: 1210.0, high: 700.0 };
        assert_eq!(nearest_match(pair).unwrap(), Key::One);
    }

    #[test]
    fn test_tie_breaks_to_canonical_order() {
        // (697, 1272.5) is exactly equidistant from '1' (697/1209) and
        // '2' (697/1336); the earlier canonical key must win.
        let pair = FrequencyPair::from_detected(697.0, 1272.5);
        assert_eq!(nearest_match(pair).unwrap(), Key::One);
    }

    #[test]
    fn test_pure_noise_still_matches_something() {
        let pair = FrequencyPair::from_detected(10.0, 4000.0);
        assert!(nearest_match(pair).is_ok());
    }

    #[test]
    fn test_empty_candidate_set_is_no_match() {
        let pair = FrequencyPair::from_detected(770.0, 1336.0);
        let err = nearest_among(&[], pair).unwrap_err();
        assert!(matches!(err, Error::NoMatch(_)));
    }
}
