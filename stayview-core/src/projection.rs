//! Lightbox state mirrored into the page query string.
//!
//! The key is `lightbox` and the value a zero-based decimal index. A missing
//! key means closed. Other query pairs are kept as they are, in order.

use url::form_urlencoded;

use crate::carousel::state::clamp_index;
use crate::lightbox::LightboxState;

pub const LIGHTBOX_KEY: &str = "lightbox";

fn pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned()))
}

/// Raw requested index, if the key is present and numeric.
///
/// Negative values parse so that clamping can pull them to zero. Values too
/// large for `i64` saturate instead of being rejected.
pub fn query_to_index(query: &str) -> Option<i64> {
    pairs(query)
        .find(|(key, _)| key == LIGHTBOX_KEY)
        .and_then(|(_, value)| parse_saturating(value.trim()))
}

fn parse_saturating(value: &str) -> Option<i64> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Lightbox state described by a query for a set of `photo_count` photos.
/// Invalid or absent values, or an empty set, yield a closed lightbox.
pub fn query_to_state(query: &str, photo_count: usize) -> LightboxState {
    match query_to_index(query) {
        Some(raw) if photo_count > 0 => LightboxState {
            is_open: true,
            active_index: clamp_index(raw, photo_count),
        },
        _ => LightboxState::default(),
    }
}

/// Rewrite `existing` so that it describes `state`.
///
/// The returned string has no leading `?` and is empty when nothing remains.
pub fn state_to_query(existing: &str, state: &LightboxState) -> String {
    write_index(existing, state.is_open.then_some(state.active_index))
}

pub(crate) fn write_index(existing: &str, index: Option<usize>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut written = false;
    for (key, value) in pairs(existing) {
        if key == LIGHTBOX_KEY {
            // first occurrence keeps its position, duplicates are dropped
            if let (Some(index), false) = (index, written) {
                serializer.append_pair(LIGHTBOX_KEY, &index.to_string());
            }
            written = true;
            continue;
        }
        serializer.append_pair(&key, &value);
    }
    if let (Some(index), false) = (index, written) {
        serializer.append_pair(LIGHTBOX_KEY, &index.to_string());
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(i: usize) -> LightboxState {
        LightboxState {
            is_open: true,
            active_index: i,
        }
    }

    #[test]
    fn reads_index_and_clamps() {
        assert_eq!(query_to_state("lightbox=2", 5), open_at(2));
        assert_eq!(query_to_state("?lightbox=99", 5), open_at(4));
        assert_eq!(query_to_state("lightbox=-3", 5), open_at(0));
    }

    #[test]
    fn oversized_values_saturate_then_clamp() {
        assert_eq!(query_to_state("lightbox=99999999999999999999", 4), open_at(3));
        assert_eq!(query_to_state("lightbox=-99999999999999999999", 4), open_at(0));
        assert_eq!(query_to_index("lightbox=99999999999999999999"), Some(i64::MAX));
        assert_eq!(query_to_index("lightbox=%2B7"), Some(7));
        assert_eq!(query_to_index("lightbox=-"), None);
        assert_eq!(query_to_index("lightbox=1e3"), None);
    }

    #[test]
    fn invalid_or_missing_means_closed() {
        assert_eq!(query_to_state("", 5), LightboxState::default());
        assert_eq!(query_to_state("lightbox=abc", 5), LightboxState::default());
        assert_eq!(query_to_state("lightbox=", 5), LightboxState::default());
        assert_eq!(query_to_state("lightbox=1", 0), LightboxState::default());
    }

    #[test]
    fn writing_preserves_other_pairs() {
        assert_eq!(
            state_to_query("ref=ig&lang=en", &open_at(3)),
            "ref=ig&lang=en&lightbox=3"
        );
        assert_eq!(
            state_to_query("ref=ig&lightbox=3&lang=en", &open_at(1)),
            "ref=ig&lightbox=1&lang=en"
        );
        assert_eq!(
            state_to_query("?ref=ig&lightbox=3", &LightboxState::default()),
            "ref=ig"
        );
        assert_eq!(state_to_query("lightbox=0", &LightboxState::default()), "");
    }

    #[test]
    fn round_trip_through_query() {
        for count in 1..6 {
            for i in 0..count {
                let query = state_to_query("tab=rooms", &open_at(i));
                assert_eq!(query_to_state(&query, count), open_at(i));
            }
        }
        let closed = state_to_query("tab=rooms&lightbox=2", &LightboxState::default());
        assert!(!query_to_state(&closed, 3).is_open);
    }
}
