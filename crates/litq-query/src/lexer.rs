//! Lexical rules shared by both grammars.
//!
//! The grammars are context-sensitive (parentheses are grouping in one place and value
//! text in another, `:` separates a keyword or belongs to a value), so instead of a
//! separate token stream the parsers drive a [`Cursor`] directly and backtrack by
//! saving and restoring its position.

use crate::ast::Node;

/// Boolean connector recognized between terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Connector {
    /// `and` or `+`.
    And,
    /// `or` or `|`.
    Or,
    /// `not` (the `-` prefix is handled by the parsers).
    Not,
}

/// Comparison prefix in front of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    /// `>` or `after`.
    Greater,
    /// `>=`.
    GreaterEqual,
    /// `<` or `before`.
    Lower,
    /// `<=`.
    LowerEqual,
}

impl Comparison {
    /// Symbolic operators, longest first.
    const SYMBOLS: [(&'static str, Self); 4] = [
        (">=", Self::GreaterEqual),
        ("<=", Self::LowerEqual),
        (">", Self::Greater),
        ("<", Self::Lower),
    ];

    /// Wraps a value in the matching comparison node.
    pub(crate) fn wrap(self, value: Node) -> Node {
        match self {
            Self::Greater => Node::greater(value),
            Self::GreaterEqual => Node::greater_equal(value),
            Self::Lower => Node::lower(value),
            Self::LowerEqual => Node::lower_equal(value),
        }
    }
}

/// Returns true if `name` has the shape of a keyword: letters, digits, `_` and `.`.
///
/// This covers tag forms such as `999C5` and `999__u` and dotted paths such as
/// `authors.full_name`.
pub(crate) fn is_keyword_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '.')
}

/// Returns the byte length of a leading legacy introducer (`find`, `fin` or `f`,
/// case-insensitive, with surrounding whitespace), if the input starts with one and has
/// something after it.
pub(crate) fn introducer_len(input: &str) -> Option<usize> {
    let trimmed = input.trim_start();
    let leading = input.len() - trimmed.len();
    let word_len = trimmed
        .find(char::is_whitespace)
        .filter(|&end| matches!(trimmed[..end].to_ascii_lowercase().as_str(), "find" | "fin" | "f"))?;
    let body = &trimmed[word_len..];
    let body_trimmed = body.trim_start();
    if body_trimmed.is_empty() {
        return None;
    }
    Some(leading + word_len + (body.len() - body_trimmed.len()))
}

/// Position-based cursor over the query text.
///
/// Positions are byte offsets and always sit on a character boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    /// The full input.
    input: &'a str,
    /// Current byte position.
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte position.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Moves back (or forward) to a previously saved position.
    pub(crate) fn reset(&mut self, position: usize) {
        self.position = position;
    }

    /// The unconsumed input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns true if all input is consumed.
    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns true if the unconsumed input starts with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advances past the next character.
    pub(crate) fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }

    /// Advances by `len` bytes.
    pub(crate) fn advance_by(&mut self, len: usize) {
        self.position = (self.position + len).min(self.input.len());
    }

    /// Consumes `ch` if it is next.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the input continues with it.
    pub(crate) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.advance_by(prefix.len());
            true
        } else {
            false
        }
    }

    /// Skips a run of whitespace.
    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Returns true if a term can start here.
    ///
    /// Whitespace and end of input never start a term; a `)` does not either while a
    /// group is open, since it closes that group.
    pub(crate) fn at_term_start(&self, in_group: bool) -> bool {
        match self.peek() {
            None => false,
            Some(ch) if ch.is_whitespace() => false,
            Some(')') => !in_group,
            Some(_) => true,
        }
    }

    /// Returns true if, after optional whitespace at `offset` bytes ahead, a term starts.
    fn term_follows(&self, offset: usize, in_group: bool) -> bool {
        let mut probe = *self;
        probe.advance_by(offset);
        probe.skip_whitespace();
        probe.at_term_start(in_group)
    }

    /// Returns true if a term starts immediately after the next character.
    pub(crate) fn glued_term_follows(&self, in_group: bool) -> bool {
        let mut probe = *self;
        probe.advance();
        probe.at_term_start(in_group)
    }

    /// Recognizes a boolean connector at the current position.
    ///
    /// Words count only when they stand alone (followed by whitespace or `(`) and a term
    /// follows them; `andorinword` or a trailing `and` are plain text. Returns the
    /// connector and its byte length.
    pub(crate) fn connector(&self, in_group: bool) -> Option<(Connector, usize)> {
        let rest = self.rest();
        if rest.starts_with('|') {
            return self.term_follows(1, in_group).then_some((Connector::Or, 1));
        }
        let word_end = rest
            .find(|ch: char| ch.is_whitespace() || ch == '(')
            .unwrap_or(rest.len());
        if word_end == rest.len() {
            return None;
        }
        let connector = match rest[..word_end].to_ascii_lowercase().as_str() {
            "and" => Connector::And,
            "or" => Connector::Or,
            "not" => Connector::Not,
            _ => return None,
        };
        self.term_follows(word_end, in_group)
            .then_some((connector, word_end))
    }

    /// Consumes a connector of the given kind and the whitespace after it.
    pub(crate) fn eat_connector(&mut self, wanted: Connector, in_group: bool) -> bool {
        match self.connector(in_group) {
            Some((connector, len)) if connector == wanted => {
                self.advance_by(len);
                self.skip_whitespace();
                true
            }
            _ => false,
        }
    }

    /// Reads a `word:` prefix.
    ///
    /// The word is any run of characters other than whitespace, `:`, parentheses and
    /// quotes. With `padded`, spaces are allowed between the word and the colon. On
    /// success the cursor sits after the colon; otherwise it does not move.
    pub(crate) fn colon_prefix(&mut self, padded: bool) -> Option<&'a str> {
        let start = self.position;
        let rest = self.rest();
        let word_len = rest
            .find(|ch: char| {
                ch.is_whitespace() || matches!(ch, ':' | '(' | ')' | '"' | '\'')
            })
            .unwrap_or(rest.len());
        if word_len == 0 {
            return None;
        }
        let word = &rest[..word_len];
        self.advance_by(word_len);
        if padded {
            self.skip_whitespace();
        }
        if self.eat(':') {
            Some(word)
        } else {
            self.reset(start);
            None
        }
    }

    /// Reads a whitespace-delimited word, e.g. a keyword written before its value.
    pub(crate) fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|ch: char| ch.is_whitespace() || matches!(ch, ':' | '(' | ')' | '"' | '\''))
            .unwrap_or(rest.len());
        self.advance_by(len);
        &rest[..len]
    }

    /// Reads a bare value.
    ///
    /// Stops at whitespace, at a `)` that would close an open group, and with
    /// `stop_at_arrow` before `->`. Parentheses opened inside the value are balanced, so
    /// `e(+)e(-)` stays one value.
    pub(crate) fn bare(&mut self, in_group: bool, stop_at_arrow: bool) -> &'a str {
        let start = self.position;
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || (stop_at_arrow && self.starts_with("->")) {
                break;
            }
            match ch {
                '(' => depth += 1,
                ')' if depth > 0 => depth -= 1,
                ')' if in_group => break,
                _ => {}
            }
            self.advance();
        }
        &self.input[start..self.position]
    }

    /// Reads a delimited literal starting at `delim`, without the delimiters.
    ///
    /// A backslash escapes the next character and is kept in the content. Returns
    /// `None` (without moving) if the literal is never closed.
    fn delimited(&mut self, delim: char) -> Option<&'a str> {
        let rest = self.rest();
        let body = rest.strip_prefix(delim)?;
        let mut chars = body.char_indices();
        while let Some((idx, ch)) = chars.next() {
            if ch == '\\' {
                chars.next();
            } else if ch == delim {
                self.advance_by(delim.len_utf8() + idx + delim.len_utf8());
                return Some(&body[..idx]);
            }
        }
        None
    }

    /// Reads a quoted or regex literal.
    ///
    /// A regex's closing slash must end the term, so paths such as `/usr/lib` stay bare
    /// values. Unterminated literals return `None` and leave the cursor in place.
    pub(crate) fn quoted_value(&mut self) -> Option<Node> {
        match self.peek()? {
            '"' => self.delimited('"').map(Node::double_quoted),
            '\'' => self.delimited('\'').map(Node::single_quoted),
            '/' => {
                let start = self.position;
                let pattern = self.delimited('/')?;
                let ends_term = match self.peek() {
                    None | Some(')') => true,
                    Some(ch) => ch.is_whitespace() || self.starts_with("->"),
                };
                if ends_term {
                    Some(Node::regex(pattern))
                } else {
                    self.reset(start);
                    None
                }
            }
            _ => None,
        }
    }

    /// Reads a single value: a quoted literal, a regex or a bare value.
    ///
    /// An opening quote that is never closed is kept as text of a bare value.
    pub(crate) fn simple_value(&mut self, in_group: bool) -> Option<Node> {
        if !self.at_term_start(in_group) {
            return None;
        }
        if let Some(value) = self.quoted_value() {
            return Some(value);
        }
        Some(Node::value(self.bare(in_group, false)))
    }

    /// Reads `lower->upper`, each side quoted or bare. Does not move on failure.
    pub(crate) fn range_value(&mut self, in_group: bool) -> Option<Node> {
        let start = self.position;
        let lower = match self.quoted_value() {
            Some(lower) => Some(lower),
            None => {
                let text = self.bare(in_group, true);
                (!text.is_empty()).then(|| Node::value(text))
            }
        };
        if let Some(lower) = lower
            && self.eat_str("->")
            && let Some(upper) = self.simple_value(in_group)
        {
            return Some(Node::range(lower, upper));
        }
        self.reset(start);
        None
    }

    /// Recognizes a symbolic comparison prefix (`>=`, `<=`, `>`, `<`) and consumes it.
    pub(crate) fn comparison(&mut self) -> Option<Comparison> {
        let (symbol, comparison) = Comparison::SYMBOLS
            .into_iter()
            .find(|(symbol, _)| self.starts_with(symbol))?;
        self.advance_by(symbol.len());
        Some(comparison)
    }
}
