//! Legacy grammar.
//!
//! Parses `find keyword value` queries. The grammar differs from the native one in
//! three ways:
//!
//! - a field value runs over several words (`find a richter, b`) until a connector, a
//!   closing group parenthesis or the end of input;
//! - connectors in a chain are applied left to right with equal precedence, so
//!   `a and b or c` groups as `(a and b) or c`;
//! - a term without a keyword inherits the last explicit keyword of its chain
//!   (`find a john and ellis` searches `a` for both). Groups start without a keyword
//!   and do not pass theirs on.
//!
//! # Grammar
//!
//! ```text
//! query   → introducer? chain
//! chain   → term (connector? term)*
//! term    → "(" chain ")"? | ("not" | "-") term | field | inherited | plain
//! field   → WORD ":" value | WORD WS value
//! value   → field                   (query-valued keywords only)
//!         | comparison words | range | QUOTED | words
//! ```
//!
//! Field terms come out as [`Node::LegacyFieldOp`]; see [`convert`](crate::convert).

use log::trace;

use crate::{
    ast::{Keyword, Node},
    error::ParseError,
    lexer::{Comparison, Connector, Cursor, introducer_len},
    parser::{Depth, QueryParser},
};

/// Comparison words accepted before a value.
const COMPARISON_WORDS: [(&str, Comparison); 2] =
    [("after", Comparison::Greater), ("before", Comparison::Lower)];

/// Recursive descent parser for the legacy grammar.
pub(crate) struct LegacyParser<'a> {
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

impl<'a> LegacyParser<'a> {
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

        if let Some(len) = introducer_len(input) {
            self.cursor.advance_by(len);
        }
        self.cursor.skip_whitespace();
        self.parse_chain()
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

    /// Parses: chain → term (connector? term)*
    ///
    /// Each chain tracks its own inherited keyword.
    fn parse_chain(&mut self) -> Result<Node, ParseError> {
        let mut inherited = None;
        let mut left = self.parse_term(&mut inherited)?;
        let mut operators = 0;

        loop {
            self.cursor.skip_whitespace();
            let in_group = self.in_group();
            if !self.cursor.at_term_start(in_group) {
                break;
            }
            let combine: fn(Node, Node) -> Node = match self.cursor.connector(in_group) {
                Some((Connector::And, len)) => {
                    self.cursor.advance_by(len);
                    self.cursor.skip_whitespace();
                    Node::and
                }
                Some((Connector::Or, len)) => {
                    self.cursor.advance_by(len);
                    self.cursor.skip_whitespace();
                    Node::or
                }
                Some((Connector::Not, _)) | None => Node::and,
            };
            self.operators.enter(self.cursor.position())?;
            operators += 1;
            let right = self.parse_term(&mut inherited)?;
            left = combine(left, right);
        }

        self.operators.leave_by(operators);
        Ok(left)
    }

    /// Parses one term of a chain, updating the chain's inherited keyword.
    fn parse_term(&mut self, inherited: &mut Option<Keyword>) -> Result<Node, ParseError> {
        let in_group = self.in_group();

        if self.cursor.peek() == Some('(')
            && let Some(group) = self.parse_group()?
        {
            return Ok(group);
        }

        if self.cursor.peek() == Some('-') && self.cursor.glued_term_follows(in_group) {
            return self.nested(|p| {
                p.cursor.advance();
                Ok(Node::not(p.parse_term(inherited)?))
            });
        }

        if matches!(self.cursor.connector(in_group), Some((Connector::Not, _))) {
            return self.nested(|p| {
                p.cursor.eat_connector(Connector::Not, in_group);
                Ok(Node::not(p.parse_term(inherited)?))
            });
        }

        if let Some((keyword, field)) = self.parse_field()? {
            *inherited = Some(keyword);
            return Ok(field);
        }

        if let Some(keyword) = inherited.clone()
            && let Some(value) = self.parse_value(&keyword)?
        {
            trace!("term at byte {} inherits keyword {keyword}", self.cursor.position());
            return Ok(Node::legacy_field(keyword, value));
        }

        // A term start always yields at least one word.
        let value = self
            .plain_value()
            .unwrap_or_else(|| Node::value(self.cursor.bare(in_group, false)));
        Ok(Node::value_query(value))
    }

    /// Parses a parenthesized group as a fresh chain. Returns `None` for `()` or a
    /// trailing `(`.
    fn parse_group(&mut self) -> Result<Option<Node>, ParseError> {
        let mut probe = self.cursor;
        probe.advance();
        probe.skip_whitespace();
        if !probe.at_term_start(true) {
            return Ok(None);
        }

        self.nested(|p| {
            p.cursor.advance();
            p.cursor.skip_whitespace();
            p.groups += 1;
            let inner = p.parse_chain();
            p.groups -= 1;
            let inner = inner?;
            p.cursor.skip_whitespace();
            p.cursor.eat(')');
            Ok(Some(inner))
        })
    }

    /// Parses: field → WORD ":" value | WORD WS value
    ///
    /// Does not move unless a complete field term is found.
    fn parse_field(&mut self) -> Result<Option<(Keyword, Node)>, ParseError> {
        let start = self.cursor.position();
        let in_group = self.in_group();

        if let Some(word) = self.cursor.colon_prefix(false) {
            if self.settings.accepts_keyword(word) {
                let keyword = Keyword::new(word);
                if let Some(value) = self.parse_value(&keyword)? {
                    return Ok(Some((keyword.clone(), Node::legacy_field(keyword, value))));
                }
            }
            self.cursor.reset(start);
            return Ok(None);
        }

        let word = self.cursor.word();
        if self.settings.accepts_keyword(word)
            && self.cursor.peek().is_some_and(char::is_whitespace)
        {
            self.cursor.skip_whitespace();
            if self.cursor.at_term_start(in_group) && self.cursor.connector(in_group).is_none() {
                let keyword = Keyword::new(word);
                if let Some(value) = self.parse_value(&keyword)? {
                    return Ok(Some((keyword.clone(), Node::legacy_field(keyword, value))));
                }
            }
        }

        self.cursor.reset(start);
        Ok(None)
    }

    /// Parses the value of a field term. Returns `None` (without moving) if no value
    /// follows.
    fn parse_value(&mut self, keyword: &Keyword) -> Result<Option<Node>, ParseError> {
        let start = self.cursor.position();
        let in_group = self.in_group();
        self.cursor.skip_whitespace();
        if !self.cursor.at_term_start(in_group) {
            self.cursor.reset(start);
            return Ok(None);
        }

        if self.settings.is_nested_keyword(keyword.as_str()) {
            let value_start = self.cursor.position();
            let nested = self.nested(Self::parse_field)?;
            if let Some((_, field)) = nested {
                return Ok(Some(field));
            }
            self.cursor.reset(value_start);
            return Ok(self.plain_value().map(Node::value_query));
        }

        if let Some(comparison) = self.comparison() {
            if let Some(value) = self.plain_value() {
                return Ok(Some(comparison.wrap(value)));
            }
            self.cursor.reset(start);
            self.cursor.skip_whitespace();
        }

        if let Some(range) = self.cursor.range_value(in_group) {
            return Ok(Some(range));
        }

        let bounds = self.settings.is_bound_keyword(keyword.as_str());
        Ok(self.plain_value().map(|value| {
            let bound = match &value {
                Node::Value(text) if bounds => signed_bound(text),
                _ => None,
            };
            bound.unwrap_or(value)
        }))
    }

    /// Recognizes a comparison (`>`, `>=`, `<`, `<=`, `after`, `before`) and the
    /// whitespace after it. Does not move if none is found.
    fn comparison(&mut self) -> Option<Comparison> {
        let start = self.cursor.position();
        if let Some(comparison) = self.cursor.comparison() {
            self.cursor.skip_whitespace();
            return Some(comparison);
        }

        let word = self.cursor.word();
        let found = COMPARISON_WORDS
            .iter()
            .find(|(name, _)| word.eq_ignore_ascii_case(name))
            .map(|&(_, comparison)| comparison);
        if let Some(comparison) = found
            && self.cursor.peek().is_some_and(char::is_whitespace)
        {
            self.cursor.skip_whitespace();
            if self.cursor.at_term_start(self.in_group()) {
                return Some(comparison);
            }
        }
        self.cursor.reset(start);
        None
    }

    /// Reads a quoted literal, or words joined by single spaces up to the next connector,
    /// closing group parenthesis or end of input.
    fn plain_value(&mut self) -> Option<Node> {
        if let Some(quoted) = self.cursor.quoted_value() {
            return Some(quoted);
        }

        let in_group = self.in_group();
        let mut words = Vec::new();
        loop {
            let word = self.cursor.bare(in_group, false);
            if word.is_empty() {
                break;
            }
            words.push(word);

            let end = self.cursor.position();
            self.cursor.skip_whitespace();
            if !self.cursor.at_term_start(in_group) || self.cursor.connector(in_group).is_some()
            {
                self.cursor.reset(end);
                break;
            }
        }

        (!words.is_empty()).then(|| Node::value(words.join(" ")))
    }
}

/// Reads `200+` as `>= 200` and `200-` as `<= 200`.
fn signed_bound(text: &str) -> Option<Node> {
    let is_number =
        |number: &&str| !number.is_empty() && number.bytes().all(|byte| byte.is_ascii_digit());
    if let Some(number) = text.strip_suffix('+').filter(is_number) {
        return Some(Node::greater_equal(Node::value(number)));
    }
    text.strip_suffix('-')
        .filter(is_number)
        .map(|number| Node::lower_equal(Node::value(number)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordSet;

    fn parser() -> QueryParser {
        QueryParser::new().with_keywords(KeywordSet::from_iter([
            "a", "t", "j", "author", "title", "date", "refersto", "topcite",
        ]))
    }

    fn parse(text: &str) -> Node {
        parser().parse_legacy(text).unwrap()
    }

    fn field(keyword: &str, value: &str) -> Node {
        Node::legacy_field(keyword, Node::value(value))
    }

    fn vq(text: &str) -> Node {
        Node::value_query(Node::value(text))
    }

    #[test]
    fn field_forms() {
        assert_eq!(parse("find t quark"), field("t", "quark"));
        assert_eq!(parse("find a:richter"), field("a", "richter"));
        assert_eq!(parse("   find t quark   "), field("t", "quark"));
        assert_eq!(parse("t quark"), field("t", "quark"));
    }

    #[test]
    fn values_span_words() {
        assert_eq!(parse("find a richter, b"), field("a", "richter, b"));
        assert_eq!(parse("find title bbb:ccc ddd:eee"), field("title", "bbb:ccc ddd:eee"));
        assert_eq!(parse("find date today  -  2"), field("date", "today - 2"));
        assert_eq!(parse("find t quark andorinword"), field("t", "quark andorinword"));
    }

    #[test]
    fn quoted_values() {
        assert_eq!(
            parse("find a:\"richter, b\""),
            Node::legacy_field("a", Node::double_quoted("richter, b"))
        );
        assert_eq!(
            parse("find t 'quark'"),
            Node::legacy_field("t", Node::single_quoted("quark"))
        );
    }

    #[test]
    fn chains_apply_left_to_right() {
        assert_eq!(
            parse("find a john and t quark or t higgs"),
            Node::or(
                Node::and(field("a", "john"), field("t", "quark")),
                field("t", "higgs")
            )
        );
        assert_eq!(
            parse("find a john or t quark and t higgs"),
            Node::and(
                Node::or(field("a", "john"), field("t", "quark")),
                field("t", "higgs")
            )
        );
    }

    #[test]
    fn inheritance() {
        assert_eq!(
            parse("find a john and ellis"),
            Node::and(field("a", "john"), field("a", "ellis"))
        );
        assert_eq!(
            parse("f a rodrigo,g and not rodrigo,j"),
            Node::and(field("a", "rodrigo,g"), Node::not(field("a", "rodrigo,j")))
        );
        assert_eq!(
            parse("find john and t quark or higgs"),
            Node::or(Node::and(vq("john"), field("t", "quark")), field("t", "higgs"))
        );
    }

    #[test]
    fn groups_do_not_share_inheritance() {
        assert_eq!(
            parse("find a john and (ellis or albert)"),
            Node::and(field("a", "john"), Node::or(vq("ellis"), vq("albert")))
        );
        assert_eq!(
            parse("find (t quark) and higgs"),
            Node::and(field("t", "quark"), vq("higgs"))
        );
    }

    #[test]
    fn comparisons() {
        assert_eq!(
            parse("find date > 1984"),
            Node::legacy_field("date", Node::greater(Node::value("1984")))
        );
        assert_eq!(
            parse("find date before 1984"),
            Node::legacy_field("date", Node::lower(Node::value("1984")))
        );
        assert_eq!(
            parse("find date <=2014-10-01"),
            Node::legacy_field("date", Node::lower_equal(Node::value("2014-10-01")))
        );
        assert_eq!(
            parse("find topcite 200+"),
            Node::legacy_field("topcite", Node::greater_equal(Node::value("200")))
        );
        assert_eq!(
            parse("find topcite 200-"),
            Node::legacy_field("topcite", Node::lower_equal(Node::value("200")))
        );
        assert_eq!(parse("find t after"), field("t", "after"));
    }

    #[test]
    fn ranges() {
        assert_eq!(
            parse("find date 2000->2012"),
            Node::legacy_field("date", Node::range(Node::value("2000"), Node::value("2012")))
        );
    }

    #[test]
    fn nested_fields() {
        assert_eq!(
            parse("find refersto a ellis"),
            Node::legacy_field("refersto", field("a", "ellis"))
        );
        assert_eq!(
            parse("find refersto:refersto:author:maldacena"),
            Node::legacy_field("refersto", Node::legacy_field("refersto", field("author", "maldacena")))
        );
        assert_eq!(
            parse("find refersto ellis, j"),
            Node::legacy_field("refersto", vq("ellis, j"))
        );
    }

    #[test]
    fn signed_bounds() {
        assert_eq!(
            signed_bound("200+"),
            Some(Node::greater_equal(Node::value("200")))
        );
        assert_eq!(signed_bound("200-"), Some(Node::lower_equal(Node::value("200"))));
        assert_eq!(signed_bound("+"), None);
        assert_eq!(signed_bound("a1-"), None);
        assert_eq!(signed_bound("200"), None);
        assert_eq!(signed_bound("пушкин"), None);
    }

    #[test]
    fn signed_bounds_need_a_bound_keyword() {
        assert_eq!(
            parse("find t 2-"),
            Node::legacy_field("t", Node::value("2-"))
        );
        assert_eq!(
            parse("find topcite 50+"),
            Node::legacy_field("topcite", Node::greater_equal(Node::value("50")))
        );

        let custom = parser().with_bound_keywords(["t"]);
        assert_eq!(
            custom.parse_legacy("find t 2-").unwrap(),
            Node::legacy_field("t", Node::lower_equal(Node::value("2")))
        );
        assert_eq!(
            custom.parse_legacy("find topcite 200+").unwrap(),
            Node::legacy_field("topcite", Node::value("200+"))
        );
    }

    #[test]
    fn unknown_words_are_plain_values() {
        assert_eq!(parse("find ellis smith"), vq("ellis smith"));
        assert_eq!(parse("find hep-th/9711200"), vq("hep-th/9711200"));
    }
}
