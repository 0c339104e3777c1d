//! Query parsing and AST for literature search.
//!
//! Two surface syntaxes parse into one tree:
//!
//! - **Native**: `author:ellis (title:quark or t:higgs) -year:2001`
//!   - **Values**: `bar`, `'bar'`, `"bar"`, `/regex/`, wildcards `bar*`
//!   - **Booleans**: `and`/`+`, `or`/`|`, `not`/`-`, implicit AND between terms
//!   - **Ranges**: `year:2000->2012`
//!   - **Comparisons**: `year:>=2000`
//!   - **Nested fields**: `refersto:author:ellis`
//! - **Legacy**: `find a ellis and t quark or higgs`
//!   - multi-word values, left-to-right chains, keyword inheritance
//!   - `date after 1984`, `topcite 200+`
//!
//! Legacy trees hold [`Node::LegacyFieldOp`] until [`convert`] turns them into
//! [`Node::KeywordOp`]. Operations over trees are [`Walker`] implementations.
//!
//! # Example
//!
//! ```
//! use litq_query::{KeywordCollector, parse};
//!
//! let tree = parse("find a ellis and refersto t quark").unwrap();
//! let keywords = KeywordCollector::collect(&tree);
//! assert_eq!(keywords.len(), 3);
//! assert_eq!(tree.to_native_syntax(), "a:ellis and refersto:t:quark");
//! ```

#![warn(missing_docs)]

mod ast;
mod collect;
mod convert;
mod error;
mod keywords;
mod legacy;
mod lexer;
mod native;
mod parser;
mod printer;
mod walker;

pub use ast::{Keyword, Node, NodeKind};
pub use collect::KeywordCollector;
pub use convert::{LegacyConverter, convert};
pub use error::{ParseError, WalkError};
pub use keywords::{AnyKeyword, KeywordSet, KeywordStatus, KeywordValidator};
pub use parser::{
    DEFAULT_BOUND_KEYWORDS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OPERATORS, DEFAULT_NESTED_KEYWORDS,
    QueryParser, parse, parse_legacy, parse_native,
};
pub use printer::{NativeSyntaxPrinter, ReprPrinter, TreePrinter};
pub use walker::{CanonicalCheck, Walker};
