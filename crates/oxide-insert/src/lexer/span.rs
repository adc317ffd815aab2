//! Source location tracking for tokens and extracted fragments.

use core::fmt;

use serde::Serialize;

/// A fragment of the original source text together with its position.
///
/// `start` and `stop` are inclusive byte offsets into the original,
/// non-normalized source, so `text == source[start..=stop]` for every
/// non-empty span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// The exact source text covered by the span.
    pub text: String,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// Stop byte offset (inclusive).
    pub stop: usize,
}

impl Span {
    /// Creates a span covering `source[start..=stop]`.
    ///
    /// Out-of-range or misaligned offsets produce an empty text rather than
    /// panicking.
    #[must_use]
    pub fn from_source(source: &str, start: usize, stop: usize) -> Self {
        let text = source
            .get(start..=stop)
            .map(str::to_owned)
            .unwrap_or_default();
        Self { text, start, stop }
    }

    /// Creates an empty span anchored at `offset`.
    #[must_use]
    pub const fn empty(offset: usize) -> Self {
        Self {
            text: String::new(),
            start: offset,
            stop: offset,
        }
    }

    /// Returns the length of the covered text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the span covers no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.stop + 1
    }

    /// Merges two spans into one that covers both, re-reading the text from
    /// `source`.
    #[must_use]
    pub fn merge(&self, other: &Self, source: &str) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_source(
            source,
            self.start.min(other.start),
            self.stop.max(other.stop),
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
