//! Native grammar.
//!
//! Parses `keyword:value` queries with boolean operators by recursive descent over a
//! [`Cursor`].
//!
//! # Grammar
//!
//! ```text
//! query     → or_expr
//! or_expr   → and_expr (("or" | "|") and_expr)*
//! and_expr  → unary ("and"? unary)*
//! unary     → "-" unary | "not" unary | "+" unary | primary
//! primary   → "(" or_expr ")"? | QUOTED | keyword_term | BARE
//! keyword_term → WORD ":" value_expr
//! value_expr   → comparison VALUE | nested_term | VALUE "->" VALUE | VALUE
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Bare value
//! 2. Keyword term
//! 3. Grouping
//! 4. Negation and `+`
//! 5. AND (implicit or explicit)
//! 6. OR
//!
//! Anything that does not fit degrades to literal text: a keyword prefix without a
//! value, or one the validator rejects, becomes a plain `Value("prefix:")`.

use log::trace;

use crate::{
    ast::Node,
    error::ParseError,
    lexer::{Connector, Cursor},
    parser::{Depth, QueryParser},
};

/// Recursive descent parser for the native grammar.
pub(crate) struct NativeParser<'a> {
    /// Shared settings.
    settings: &'a QueryParser,
    /// Position in the input.
    cursor: Cursor<'a>,
    /// Number of open groups.
    groups: usize,
    /// Nesting counter.
    depth: Depth,
    /// Counter for operators in the open boolean chains.
    operators: Depth,
}

impl<'a> NativeParser<'a> {
    /// Creates a parser over `input`.
    pub(crate) fn new(settings: &'a QueryParser, input: &'a str) -> Self {
        Self {
            settings,
            cursor: Cursor::new(input),
            groups: 0,
            depth: Depth::nesting(settings.max_depth()),
            operators: Depth::operators(settings.max_operators()),
        }
    }

    /// Parses the whole input.
    pub(crate) fn parse(mut self) -> Result<Node, ParseError> {
        let input = self.cursor.rest();
        if input.trim().is_empty() {
            return Ok(Node::empty(input));
        }

        self.cursor.skip_whitespace();
        let mut query = self.parse_or_expr()?;

        // Only reachable through input the grammar cannot place; keep it as text.
        self.cursor.skip_whitespace();
        if !self.cursor.at_end() {
            let rest = self.cursor.rest().trim_end();
            trace!("keeping unparsed query tail {rest:?} as a value");
            query = Node::and(query, Node::value_query(Node::value(rest)));
        }
        Ok(query)
    }

    /// Returns true while a group is open.
    fn in_group(&self) -> bool {
        self.groups > 0
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.depth.enter(self.cursor.position())?;
        let result = f(self);
        self.depth.leave();
        result
    }

    /// Parses: or_expr → and_expr (("or" | "|") and_expr)*
    fn parse_or_expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and_expr()?;
        let mut operators = 0;

        loop {
            self.cursor.skip_whitespace();
            if !self.cursor.eat_connector(Connector::Or, self.in_group()) {
                break;
            }
            self.operators.enter(self.cursor.position())?;
            operators += 1;
            let right = self.parse_and_expr()?;
            left = Node::or(left, right);
        }

        self.operators.leave_by(operators);
        Ok(left)
    }

    /// Parses: and_expr → unary ("and"? unary)*
    fn parse_and_expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;
        let mut operators = 0;

        loop {
            self.cursor.skip_whitespace();
            if !self.cursor.at_term_start(self.in_group()) {
                break;
            }
            match self.cursor.connector(self.in_group()) {
                Some((Connector::Or, _)) => break,
                Some((Connector::And, len)) => {
                    self.cursor.advance_by(len);
                    self.cursor.skip_whitespace();
                }
                Some((Connector::Not, _)) | None => {}
            }
            self.operators.enter(self.cursor.position())?;
            operators += 1;
            let right = self.parse_unary()?;
            left = Node::and(left, right);
        }

        self.operators.leave_by(operators);
        Ok(left)
    }

    /// Parses: unary → "-" unary | "not" unary | "+" unary | primary
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let in_group = self.in_group();

        if self.cursor.peek() == Some('-') && self.cursor.glued_term_follows(in_group) {
            return self.nested(|p| {
                p.cursor.advance();
                Ok(Node::not(p.parse_unary()?))
            });
        }

        if matches!(self.cursor.connector(in_group), Some((Connector::Not, _))) {
            return self.nested(|p| {
                p.cursor.eat_connector(Connector::Not, in_group);
                Ok(Node::not(p.parse_unary()?))
            });
        }

        if self.cursor.peek() == Some('+') {
            let start = self.cursor.position();
            self.cursor.advance();
            self.cursor.skip_whitespace();
            if self.cursor.at_term_start(in_group) {
                // A required term is just another conjunct.
                return self.nested(Self::parse_unary);
            }
            self.cursor.reset(start);
        }

        self.parse_primary()
    }

    /// Parses: primary → group | QUOTED | keyword_term | BARE
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        if self.cursor.peek() == Some('(')
            && let Some(group) = self.parse_group()?
        {
            return Ok(group);
        }

        if let Some(value) = self.cursor.quoted_value() {
            return Ok(Node::value_query(value));
        }

        if let Some(term) = self.parse_keyword_term()? {
            return Ok(term);
        }

        let text = self.cursor.bare(self.in_group(), false);
        Ok(Node::value_query(Node::value(text)))
    }

    /// Parses a parenthesized group. The closing parenthesis may be missing at the end of
    /// input. Returns `None` for `()` or a trailing `(`, which are value text.
    fn parse_group(&mut self) -> Result<Option<Node>, ParseError> {
        let start = self.cursor.position();
        let mut probe = self.cursor;
        probe.advance();
        probe.skip_whitespace();
        if !probe.at_term_start(true) {
            trace!("empty group at byte {start} kept as a value");
            return Ok(None);
        }

        self.nested(|p| {
            p.cursor.advance();
            p.cursor.skip_whitespace();
            p.groups += 1;
            let inner = p.parse_or_expr();
            p.groups -= 1;
            let inner = inner?;
            p.cursor.skip_whitespace();
            p.cursor.eat(')');
            Ok(Some(inner))
        })
    }

    /// Parses: keyword_term → WORD ":" value_expr
    ///
    /// Returns `None` if the input does not start with a `word:` prefix. A prefix that
    /// cannot form a term comes back as a plain `Value("word:")`.
    fn parse_keyword_term(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(word) = self.cursor.colon_prefix(true) else {
            return Ok(None);
        };

        if self.settings.accepts_keyword(word)
            && let Some(value) = self.parse_value_expr(word)?
        {
            return Ok(Some(Node::keyword(word, value)));
        }

        trace!("prefix {word:?} is not a keyword here, keeping it as text");
        Ok(Some(Node::value(format!("{word}:"))))
    }

    /// Parses the value after `keyword:`. Returns `None` (without moving) if no value
    /// follows.
    fn parse_value_expr(&mut self, keyword: &str) -> Result<Option<Node>, ParseError> {
        let start = self.cursor.position();
        let in_group = self.in_group();
        self.cursor.skip_whitespace();
        if !self.cursor.at_term_start(in_group) {
            self.cursor.reset(start);
            return Ok(None);
        }

        let value_start = self.cursor.position();
        if let Some(comparison) = self.cursor.comparison() {
            self.cursor.skip_whitespace();
            if let Some(value) = self.cursor.simple_value(in_group) {
                return Ok(Some(comparison.wrap(value)));
            }
            self.cursor.reset(value_start);
        }

        if self.settings.is_nested_keyword(keyword)
            && let Some(term) = self.parse_nested_term()?
        {
            return Ok(Some(term));
        }

        if let Some(range) = self.cursor.range_value(in_group) {
            return Ok(Some(range));
        }

        Ok(self.cursor.simple_value(in_group))
    }

    /// Parses a field query in value position, e.g. `author:ellis` in
    /// `refersto:author:ellis`. Does not move unless a complete term is found.
    fn parse_nested_term(&mut self) -> Result<Option<Node>, ParseError> {
        let start = self.cursor.position();
        let term = self.nested(|p| {
            let Some(word) = p.cursor.colon_prefix(false) else {
                return Ok(None);
            };
            if !p.settings.accepts_keyword(word) {
                return Ok(None);
            }
            Ok(p
                .parse_value_expr(word)?
                .map(|value| Node::keyword(word, value)))
        })?;
        if term.is_none() {
            self.cursor.reset(start);
        }
        Ok(term)
    }
}
