//! Query abstract syntax tree.
//!
//! Both grammars build the same closed set of node variants. Trees are built bottom-up
//! by the parsers and never mutated afterwards; walkers that transform a tree always
//! produce a new one.

use std::fmt;

use serde::Serialize;

use crate::{
    convert::LegacyConverter,
    printer::{NativeSyntaxPrinter, ReprPrinter, TreePrinter},
    walker::Walker,
};

/// A field identifier such as `author`, `999C5` or `999__u`.
///
/// The core never checks whether a keyword exists in any index; see
/// [`KeywordValidator`](crate::KeywordValidator) for the optional collaborator that does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Creates a keyword from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the keyword name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Keyword {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Keyword {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of the query tree.
///
/// Query-level and value-level variants share one type: the grammars put bare values
/// in query positions (an incomplete `keyword:` prefix) and queries in value positions
/// (nested field queries), so every child slot holds a `Node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "args")]
pub enum Node {
    /// The input was empty or whitespace-only. Holds the original text verbatim.
    EmptyQuery(String),

    /// A bare value used as a query on its own.
    ValueQuery(Box<Self>),

    /// Canonical field-qualified term.
    KeywordOp {
        /// Field the value targets.
        keyword: Keyword,
        /// Value expression (value, range, comparison or nested field query).
        value: Box<Self>,
    },

    /// Field-qualified term produced by the legacy grammar, before conversion.
    LegacyFieldOp {
        /// Field the value targets.
        keyword: Keyword,
        /// Value expression.
        value: Box<Self>,
    },

    /// Conjunction of exactly two operands.
    AndOp(Box<Self>, Box<Self>),

    /// Disjunction of exactly two operands.
    OrOp(Box<Self>, Box<Self>),

    /// Negation.
    NotOp(Box<Self>),

    /// Inclusive range between two values.
    RangeOp {
        /// Lower bound.
        lower: Box<Self>,
        /// Upper bound.
        upper: Box<Self>,
    },

    /// Strictly greater than the wrapped value.
    GreaterOp(Box<Self>),

    /// Greater than or equal to the wrapped value.
    GreaterEqualOp(Box<Self>),

    /// Strictly lower than the wrapped value.
    LowerOp(Box<Self>),

    /// Lower than or equal to the wrapped value.
    LowerEqualOp(Box<Self>),

    /// Bare literal. Wildcards (`*`) and stray quote characters are kept as-is.
    Value(String),

    /// Single-quoted literal, without the quotes.
    SingleQuotedValue(String),

    /// Double-quoted literal, without the quotes.
    DoubleQuotedValue(String),

    /// Slash-delimited pattern, without the slashes.
    RegexValue(String),
}

/// The variant of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// [`Node::EmptyQuery`]
    EmptyQuery,
    /// [`Node::ValueQuery`]
    ValueQuery,
    /// [`Node::KeywordOp`]
    KeywordOp,
    /// [`Node::LegacyFieldOp`]
    LegacyFieldOp,
    /// [`Node::AndOp`]
    AndOp,
    /// [`Node::OrOp`]
    OrOp,
    /// [`Node::NotOp`]
    NotOp,
    /// [`Node::RangeOp`]
    RangeOp,
    /// [`Node::GreaterOp`]
    GreaterOp,
    /// [`Node::GreaterEqualOp`]
    GreaterEqualOp,
    /// [`Node::LowerOp`]
    LowerOp,
    /// [`Node::LowerEqualOp`]
    LowerEqualOp,
    /// [`Node::Value`]
    Value,
    /// [`Node::SingleQuotedValue`]
    SingleQuotedValue,
    /// [`Node::DoubleQuotedValue`]
    DoubleQuotedValue,
    /// [`Node::RegexValue`]
    RegexValue,
}

impl NodeKind {
    /// Returns the variant name as printed by the repr printer.
    pub fn name(self) -> &'static str {
        match self {
            Self::EmptyQuery => "EmptyQuery",
            Self::ValueQuery => "ValueQuery",
            Self::KeywordOp => "KeywordOp",
            Self::LegacyFieldOp => "LegacyFieldOp",
            Self::AndOp => "AndOp",
            Self::OrOp => "OrOp",
            Self::NotOp => "NotOp",
            Self::RangeOp => "RangeOp",
            Self::GreaterOp => "GreaterOp",
            Self::GreaterEqualOp => "GreaterEqualOp",
            Self::LowerOp => "LowerOp",
            Self::LowerEqualOp => "LowerEqualOp",
            Self::Value => "Value",
            Self::SingleQuotedValue => "SingleQuotedValue",
            Self::DoubleQuotedValue => "DoubleQuotedValue",
            Self::RegexValue => "RegexValue",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    /// Creates an empty query holding the original input.
    pub fn empty(original: impl Into<String>) -> Self {
        Self::EmptyQuery(original.into())
    }

    /// Creates a bare value.
    pub fn value(text: impl Into<String>) -> Self {
        Self::Value(text.into())
    }

    /// Creates a single-quoted value.
    pub fn single_quoted(text: impl Into<String>) -> Self {
        Self::SingleQuotedValue(text.into())
    }

    /// Creates a double-quoted value.
    pub fn double_quoted(text: impl Into<String>) -> Self {
        Self::DoubleQuotedValue(text.into())
    }

    /// Creates a regex value.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::RegexValue(pattern.into())
    }

    /// Wraps a value so it can stand as a query.
    pub fn value_query(value: Self) -> Self {
        Self::ValueQuery(Box::new(value))
    }

    /// Creates a canonical field-qualified term.
    pub fn keyword(keyword: impl Into<Keyword>, value: Self) -> Self {
        Self::KeywordOp {
            keyword: keyword.into(),
            value: Box::new(value),
        }
    }

    /// Creates a legacy field-qualified term.
    pub fn legacy_field(keyword: impl Into<Keyword>, value: Self) -> Self {
        Self::LegacyFieldOp {
            keyword: keyword.into(),
            value: Box::new(value),
        }
    }

    /// Creates a conjunction.
    pub fn and(left: Self, right: Self) -> Self {
        Self::AndOp(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction.
    pub fn or(left: Self, right: Self) -> Self {
        Self::OrOp(Box::new(left), Box::new(right))
    }

    /// Creates a negation.
    pub fn not(operand: Self) -> Self {
        Self::NotOp(Box::new(operand))
    }

    /// Creates an inclusive range.
    pub fn range(lower: Self, upper: Self) -> Self {
        Self::RangeOp {
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    /// Creates a `>` comparison.
    pub fn greater(value: Self) -> Self {
        Self::GreaterOp(Box::new(value))
    }

    /// Creates a `>=` comparison.
    pub fn greater_equal(value: Self) -> Self {
        Self::GreaterEqualOp(Box::new(value))
    }

    /// Creates a `<` comparison.
    pub fn lower(value: Self) -> Self {
        Self::LowerOp(Box::new(value))
    }

    /// Creates a `<=` comparison.
    pub fn lower_equal(value: Self) -> Self {
        Self::LowerEqualOp(Box::new(value))
    }

    /// Returns the variant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::EmptyQuery(_) => NodeKind::EmptyQuery,
            Self::ValueQuery(_) => NodeKind::ValueQuery,
            Self::KeywordOp { .. } => NodeKind::KeywordOp,
            Self::LegacyFieldOp { .. } => NodeKind::LegacyFieldOp,
            Self::AndOp(..) => NodeKind::AndOp,
            Self::OrOp(..) => NodeKind::OrOp,
            Self::NotOp(_) => NodeKind::NotOp,
            Self::RangeOp { .. } => NodeKind::RangeOp,
            Self::GreaterOp(_) => NodeKind::GreaterOp,
            Self::GreaterEqualOp(_) => NodeKind::GreaterEqualOp,
            Self::LowerOp(_) => NodeKind::LowerOp,
            Self::LowerEqualOp(_) => NodeKind::LowerEqualOp,
            Self::Value(_) => NodeKind::Value,
            Self::SingleQuotedValue(_) => NodeKind::SingleQuotedValue,
            Self::DoubleQuotedValue(_) => NodeKind::DoubleQuotedValue,
            Self::RegexValue(_) => NodeKind::RegexValue,
        }
    }

    /// Dispatches to the walker method for this node's variant.
    pub fn accept<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            Self::EmptyQuery(original) => walker.empty_query(original),
            Self::ValueQuery(value) => walker.value_query(value),
            Self::KeywordOp { keyword, value } => walker.keyword_op(keyword, value),
            Self::LegacyFieldOp { keyword, value } => walker.legacy_field_op(keyword, value),
            Self::AndOp(left, right) => walker.and_op(left, right),
            Self::OrOp(left, right) => walker.or_op(left, right),
            Self::NotOp(operand) => walker.not_op(operand),
            Self::RangeOp { lower, upper } => walker.range_op(lower, upper),
            Self::GreaterOp(value) => walker.greater_op(value),
            Self::GreaterEqualOp(value) => walker.greater_equal_op(value),
            Self::LowerOp(value) => walker.lower_op(value),
            Self::LowerEqualOp(value) => walker.lower_equal_op(value),
            Self::Value(text) => walker.value(text),
            Self::SingleQuotedValue(text) => walker.single_quoted_value(text),
            Self::DoubleQuotedValue(text) => walker.double_quoted_value(text),
            Self::RegexValue(pattern) => walker.regex_value(pattern),
        }
    }

    /// Structural equality that treats `LegacyFieldOp` and `KeywordOp` as the same node.
    pub fn equivalent(&self, other: &Self) -> bool {
        let mut converter = LegacyConverter;
        self.accept(&mut converter) == other.accept(&mut converter)
    }

    /// Renders the tree with one node per line, children indented.
    pub fn to_tree_string(&self) -> String {
        let mut printer = TreePrinter::default();
        self.accept(&mut printer);
        printer.finish()
    }

    /// Renders the tree in native query syntax.
    ///
    /// Legacy field nodes render like keyword nodes, so a legacy tree comes out as its
    /// native counterpart. A bare value that is empty or holds whitespace, such as the
    /// legacy `richter, b`, is written in double quotes and so reparses as a
    /// [`Node::DoubleQuotedValue`] with the same text.
    pub fn to_native_syntax(&self) -> String {
        self.accept(&mut NativeSyntaxPrinter)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = ReprPrinter::default();
        self.accept(&mut printer);
        f.write_str(&printer.finish())
    }
}
