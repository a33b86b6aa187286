//! Natural ("numeric aware") ordering for asset keys, so `room2.jpg` sorts
//! before `room10.jpg`.

use std::cmp::Ordering;

/// Compare two keys chunk by chunk: digit runs numerically, text runs
/// case-insensitively. Ties fall back to a plain byte comparison so the
/// order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Chunk::Digits(l), Chunk::Digits(r)) => cmp_digits(l, r),
                    (Chunk::Text(l), Chunk::Text(r)) => cmp_text(l, r),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_digits(l: &str, r: &str) -> Ordering {
    let l = l.trim_start_matches('0');
    let r = r.trim_start_matches('0');
    l.len().cmp(&r.len()).then_with(|| l.cmp(r))
}

fn cmp_text(l: &str, r: &str) -> Ordering {
    let l = l.chars().flat_map(char::to_lowercase);
    let r = r.chars().flat_map(char::to_lowercase);
    l.cmp(r)
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_compare_numerically() {
        assert_eq!(natural_cmp("img2.jpg", "img10.jpg"), Ordering::Less);
        assert_eq!(natural_cmp("img10.jpg", "img9.jpg"), Ordering::Greater);
        assert_eq!(natural_cmp("007", "7"), Ordering::Less);
    }

    #[test]
    fn text_is_case_insensitive_before_tiebreak() {
        assert_eq!(natural_cmp("Lobby1", "lobby2"), Ordering::Less);
        assert_eq!(natural_cmp("bath", "Lobby"), Ordering::Less);
        assert_ne!(natural_cmp("Room", "room"), Ordering::Equal);
    }

    #[test]
    fn sorting_a_gallery() {
        let mut keys = vec!["10.webp", "2.webp", "1.webp", "room-3.jpg", "Room-12.jpg"];
        keys.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            keys,
            vec!["1.webp", "2.webp", "10.webp", "room-3.jpg", "Room-12.jpg"]
        );
    }
}
