//! Per-statement error aggregation.

use core::fmt;

use super::ParseError;

/// An append-only, ordered list of the problems found in one statement.
///
/// The parser keeps going after a structural error so that a caller sees
/// every issue of a statement at once. The owner may `clear` the list
/// between statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<ParseError>,
}

impl Diagnostics {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error.
    pub fn push(&mut self, error: ParseError) {
        tracing::debug!(%error, "diagnostic");
        self.errors.push(error);
    }

    /// Returns the number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the errors in the order they were found.
    pub fn iter(&self) -> core::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    /// Returns the errors as a slice.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Drops every collected error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Returns true if any collected error is the `Warning` marker.
    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.errors.iter().any(ParseError::is_warning)
    }

    /// Returns `Ok` when empty, the list itself otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one error was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Extend<ParseError> for Diagnostics {
    fn extend<I: IntoIterator<Item = ParseError>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ParseError;
    type IntoIter = core::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {error}")?;
        }
        Ok(())
    }
}
