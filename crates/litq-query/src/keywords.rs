//! Keyword validity.
//!
//! The grammars ask a [`KeywordValidator`] whether a keyword-shaped token may act as a
//! field. The answer is read from a snapshot built once by the caller, so parsing never
//! does I/O or touches shared mutable state.

use std::collections::BTreeSet;

/// What a validator knows about a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStatus {
    /// The keyword is known to exist.
    Known,
    /// The validator has no opinion; the grammar accepts the keyword.
    Unknown,
    /// The keyword is known not to exist; the grammar treats the prefix as text.
    Invalid,
}

impl KeywordStatus {
    /// Returns true unless the keyword is rejected.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Decides which keyword-shaped tokens are fields.
pub trait KeywordValidator: Send + Sync {
    /// Classifies `name`.
    fn status(&self, name: &str) -> KeywordStatus;
}

impl<F> KeywordValidator for F
where
    F: Fn(&str) -> KeywordStatus + Send + Sync,
{
    fn status(&self, name: &str) -> KeywordStatus {
        self(name)
    }
}

/// Accepts every keyword-shaped token.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyKeyword;

impl KeywordValidator for AnyKeyword {
    fn status(&self, _name: &str) -> KeywordStatus {
        KeywordStatus::Unknown
    }
}

/// A fixed set of valid keyword names. Names outside the set are rejected.
///
/// Matching is case-sensitive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    /// Valid names.
    names: BTreeSet<String>,
}

impl KeywordSet {
    /// Creates an empty set, which rejects every keyword.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for KeywordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl KeywordValidator for KeywordSet {
    fn status(&self, name: &str) -> KeywordStatus {
        if self.contains(name) {
            KeywordStatus::Known
        } else {
            KeywordStatus::Invalid
        }
    }
}
