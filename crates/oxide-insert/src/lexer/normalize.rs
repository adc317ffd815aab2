//! Case normalization of SQL text.
//!
//! Keywords are matched against their upper-case spelling, so the lexer runs
//! over an upper-cased copy of the statement. String literals are copied
//! verbatim. A `'` always toggles the "inside literal" state; the doubled
//! quote escape (`''`) is not recognized.

/// Upper-cases every character outside single-quoted string literals.
#[must_use]
pub fn upper(text: &str) -> String {
    Normalized::new(text).text
}

/// An upper-cased copy of a source text that remembers where each of its
/// bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    text: String,
    /// For every byte of `text`, the `[start, end)` byte range of the source
    /// character it was produced from.
    origins: Vec<(usize, usize)>,
}

impl Normalized {
    /// Normalizes `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut origins = Vec::with_capacity(source.len());
        let mut in_string = false;

        let mut push = |c: char, origin: (usize, usize)| {
            text.push(c);
            origins.extend(core::iter::repeat(origin).take(c.len_utf8()));
        };

        for (start, c) in source.char_indices() {
            let origin = (start, start + c.len_utf8());
            if c == '\'' {
                in_string = !in_string;
                push(c, origin);
            } else if in_string {
                push(c, origin);
            } else {
                for u in c.to_uppercase() {
                    push(u, origin);
                }
            }
        }

        Self { text, origins }
    }

    /// Returns the normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Maps the normalized byte range `[start, end)` back to the inclusive
    /// `(start, stop)` byte range of the source.
    ///
    /// Returns `None` for an empty or out-of-range input.
    #[must_use]
    pub fn source_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end {
            return None;
        }
        let (first, _) = *self.origins.get(start)?;
        let (_, last) = *self.origins.get(end - 1)?;
        Some((first, last - 1))
    }

    /// Maps a normalized byte offset to the source offset it starts at.
    /// Offsets past the end map to `source_len`.
    #[must_use]
    pub fn source_offset(&self, offset: usize, source_len: usize) -> usize {
        self.origins.get(offset).map_or(source_len, |&(start, _)| start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_outside_literals() {
        assert_eq!(
            upper("insert into t values ('abc', x)"),
            "INSERT INTO T VALUES ('abc', X)"
        );
    }

    #[test]
    fn test_upper_is_idempotent_without_literals() {
        let once = upper("select a.b, c from d");
        assert_eq!(upper(&once), once);
    }

    #[test]
    fn test_quote_toggles_literal_state() {
        assert_eq!(upper("'a' b 'c'"), "'a' B 'c'");
        // Each quote of a doubled pair toggles on its own.
        assert_eq!(upper("'it''s' x"), "'it''s' X");
        assert_eq!(upper("'open x"), "'open x");
    }

    #[test]
    fn test_source_range_ascii() {
        let n = Normalized::new("select x");
        assert_eq!(n.source_range(0, 6), Some((0, 5)));
        assert_eq!(n.source_range(7, 8), Some((7, 7)));
        assert_eq!(n.source_range(3, 3), None);
    }

    #[test]
    fn test_source_range_length_changing_upper() {
        // 'ß' upper-cases to "SS": two normalized bytes from one two-byte char.
        let source = "aß b";
        let n = Normalized::new(source);
        assert_eq!(n.as_str(), "ASS B");
        assert_eq!(n.source_range(0, 3), Some((0, 2)));
        assert_eq!(&source[0..=2], "aß");
        assert_eq!(n.source_range(4, 5), Some((4, 4)));
        assert_eq!(n.source_offset(4, source.len()), 4);
        assert_eq!(n.source_offset(99, source.len()), source.len());
    }
}
