//! Parser front-end.
//!
//! [`QueryParser`] holds the settings both grammars share: the keyword validator, the
//! nesting limit and the set of keywords whose value is itself a query. The free
//! functions at the bottom use a default parser.
//!
//! # Grammar selection
//!
//! ```text
//! parse        → EMPTY | introducer legacy_body | native_query
//! introducer   → ("find" | "fin" | "f") WS        (case-insensitive)
//! ```
//!
//! [`QueryParser::parse`] converts legacy results, so its output is always canonical.
//! [`QueryParser::parse_legacy`] returns the raw legacy tree.

use std::{
    collections::BTreeSet,
    fmt,
    sync::{Arc, LazyLock},
};

use log::debug;

use crate::{
    ast::Node,
    convert::convert,
    error::ParseError,
    keywords::{AnyKeyword, KeywordStatus, KeywordValidator},
    legacy::LegacyParser,
    lexer::{introducer_len, is_keyword_name},
    native::NativeParser,
};

/// Default limit for nested groups, negations and field queries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default limit for `and`/`or` operators open along one path of the tree.
pub const DEFAULT_MAX_OPERATORS: usize = 1024;

/// Keywords whose value is itself a query, unless configured otherwise.
pub const DEFAULT_NESTED_KEYWORDS: [&str; 4] = [
    "refersto",
    "citedby",
    "referstoexcludingselfcites",
    "citedbyexcludingselfcites",
];

/// Keywords that read `200+` and `200-` as bounds, unless configured otherwise.
pub const DEFAULT_BOUND_KEYWORDS: [&str; 3] = ["cited", "citedexcludingselfcites", "topcite"];

/// Words that join terms and so never act as keywords.
const CONNECTOR_WORDS: [&str; 3] = ["and", "or", "not"];

/// Parser settings shared by both grammars.
///
/// Cheap to clone and safe to share across threads; the keyword validator is held
/// behind an `Arc` and never mutated.
#[derive(Clone)]
pub struct QueryParser {
    /// Decides which keyword-shaped tokens are fields.
    validator: Arc<dyn KeywordValidator>,
    /// Maximum nesting depth.
    max_depth: usize,
    /// Maximum number of chained boolean operators.
    max_operators: usize,
    /// Keywords whose value may be a nested field query.
    nested_keywords: BTreeSet<String>,
    /// Keywords whose `200+`/`200-` values are bounds.
    bound_keywords: BTreeSet<String>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self {
            validator: Arc::new(AnyKeyword),
            max_depth: DEFAULT_MAX_DEPTH,
            max_operators: DEFAULT_MAX_OPERATORS,
            nested_keywords: DEFAULT_NESTED_KEYWORDS
                .into_iter()
                .map(String::from)
                .collect(),
            bound_keywords: DEFAULT_BOUND_KEYWORDS
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParser")
            .field("max_depth", &self.max_depth)
            .field("max_operators", &self.max_operators)
            .field("nested_keywords", &self.nested_keywords)
            .field("bound_keywords", &self.bound_keywords)
            .finish_non_exhaustive()
    }
}

impl QueryParser {
    /// Creates a parser with default settings: every keyword-shaped token is accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `validator` to decide which keyword-shaped tokens are fields.
    pub fn with_keywords(self, validator: impl KeywordValidator + 'static) -> Self {
        self.with_shared_keywords(Arc::new(validator))
    }

    /// Like [`with_keywords`](Self::with_keywords), for a validator that is already shared.
    pub fn with_shared_keywords(mut self, validator: Arc<dyn KeywordValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the limit on chained `and`/`or` operators.
    ///
    /// Chains build left-nested trees, one level per operator, so this bounds the height
    /// of every tree the parser returns.
    pub fn with_max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators;
        self
    }

    /// Replaces the set of keywords whose value may be a nested field query.
    pub fn with_nested_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the set of keywords that read a trailing `+` or `-` on a number as a bound.
    pub fn with_bound_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bound_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// The nesting limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The limit on chained boolean operators.
    pub fn max_operators(&self) -> usize {
        self.max_operators
    }

    /// Returns true if the value of `keyword` may be a nested field query.
    pub fn is_nested_keyword(&self, keyword: &str) -> bool {
        self.nested_keywords.contains(keyword)
    }

    /// Returns true if `200+` under `keyword` means `>= 200`.
    pub fn is_bound_keyword(&self, keyword: &str) -> bool {
        self.bound_keywords.contains(keyword)
    }

    /// Asks the validator about `name`.
    pub fn keyword_status(&self, name: &str) -> KeywordStatus {
        self.validator.status(name)
    }

    /// Returns true if `word` may act as a keyword: keyword-shaped, not a connector word
    /// and not rejected by the validator.
    pub(crate) fn accepts_keyword(&self, word: &str) -> bool {
        is_keyword_name(word)
            && !CONNECTOR_WORDS
                .iter()
                .any(|connector| word.eq_ignore_ascii_case(connector))
            && self.keyword_status(word).is_accepted()
    }

    /// Parses a query in either syntax and returns its canonical tree.
    ///
    /// Input starting with a legacy introducer (`find`, `fin`, `f`) goes through the
    /// legacy grammar and is converted; everything else goes through the native grammar.
    pub fn parse(&self, text: &str) -> Result<Node, ParseError> {
        if introducer_len(text).is_some() {
            self.parse_legacy(text).map(|tree| convert(&tree))
        } else {
            self.parse_native(text)
        }
    }

    /// Parses a query with the native grammar.
    pub fn parse_native(&self, text: &str) -> Result<Node, ParseError> {
        NativeParser::new(self, text).parse()
    }

    /// Parses a query with the legacy grammar, without converting the result.
    ///
    /// A leading introducer is optional.
    pub fn parse_legacy(&self, text: &str) -> Result<Node, ParseError> {
        LegacyParser::new(self, text).parse()
    }
}

/// What a [`Depth`] counter limits.
#[derive(Debug, Clone, Copy)]
enum Budget {
    /// Groups, negations and nested field queries.
    Nesting,
    /// Chained boolean operators.
    Operators,
}

/// Recursion counter shared by both grammars.
#[derive(Debug)]
pub(crate) struct Depth {
    /// Levels currently entered.
    current: usize,
    /// Maximum number of levels.
    limit: usize,
    /// Which limit this is, for the error.
    budget: Budget,
}

impl Depth {
    /// Creates a nesting counter at level zero.
    pub(crate) fn nesting(limit: usize) -> Self {
        Self {
            current: 0,
            limit,
            budget: Budget::Nesting,
        }
    }

    /// Creates a boolean operator counter at zero.
    pub(crate) fn operators(limit: usize) -> Self {
        Self {
            current: 0,
            limit,
            budget: Budget::Operators,
        }
    }

    /// Enters one level, failing if the limit is reached.
    pub(crate) fn enter(&mut self, position: usize) -> Result<(), ParseError> {
        if self.current < self.limit {
            self.current += 1;
            return Ok(());
        }

        let limit = self.limit;
        debug!("query {:?} limit of {limit} reached at byte {position}", self.budget);
        Err(match self.budget {
            Budget::Nesting => ParseError::DepthExceeded { limit, position },
            Budget::Operators => ParseError::ChainTooLong { limit, position },
        })
    }

    /// Leaves one level.
    pub(crate) fn leave(&mut self) {
        self.leave_by(1);
    }

    /// Leaves `levels` levels at once.
    pub(crate) fn leave_by(&mut self, levels: usize) {
        self.current = self.current.saturating_sub(levels);
    }
}

/// Parser used by the free functions.
static DEFAULT_PARSER: LazyLock<QueryParser> = LazyLock::new(QueryParser::default);

/// Parses a query in either syntax with default settings and returns its canonical tree.
///
/// # Example
///
/// ```
/// use litq_query::{Node, parse};
///
/// let tree = parse("find a ellis and t quark").unwrap();
/// assert_eq!(
///     tree,
///     Node::and(
///         Node::keyword("a", Node::value("ellis")),
///         Node::keyword("t", Node::value("quark")),
///     )
/// );
/// ```
pub fn parse(text: &str) -> Result<Node, ParseError> {
    DEFAULT_PARSER.parse(text)
}

/// Parses a query with the native grammar and default settings.
pub fn parse_native(text: &str) -> Result<Node, ParseError> {
    DEFAULT_PARSER.parse_native(text)
}

/// Parses a query with the legacy grammar and default settings, without converting.
pub fn parse_legacy(text: &str) -> Result<Node, ParseError> {
    DEFAULT_PARSER.parse_legacy(text)
}
