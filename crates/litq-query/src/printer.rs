//! Printing walkers.
//!
//! [`ReprPrinter`] renders the canonical one-line form used by `Display` and test
//! failure messages, [`TreePrinter`] an indented view, and [`NativeSyntaxPrinter`] a
//! query string in native syntax.

use crate::{
    ast::{Keyword, Node, NodeKind},
    walker::Walker,
};

/// Appends `text` as a single-quoted literal, escaping quotes and backslashes.
fn push_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
}

/// Renders a tree as constructor-style text, e.g.
/// `AndOp(KeywordOp(Keyword('author'), Value('bar')), ValueQuery(Value('x')))`.
///
/// The output is a pure function of the tree, so equal trees always print the same.
#[derive(Debug, Default)]
pub struct ReprPrinter {
    /// Accumulated output.
    out: String,
}

impl ReprPrinter {
    /// Returns the rendered text.
    pub fn finish(self) -> String {
        self.out
    }

    /// Prints `Kind(child)`.
    fn unary(&mut self, kind: NodeKind, child: &Node) {
        self.out.push_str(kind.name());
        self.out.push('(');
        child.accept(self);
        self.out.push(')');
    }

    /// Prints `Kind(left, right)`.
    fn binary(&mut self, kind: NodeKind, left: &Node, right: &Node) {
        self.out.push_str(kind.name());
        self.out.push('(');
        left.accept(self);
        self.out.push_str(", ");
        right.accept(self);
        self.out.push(')');
    }

    /// Prints `Kind(Keyword('name'), value)`.
    fn field(&mut self, kind: NodeKind, keyword: &Keyword, value: &Node) {
        self.out.push_str(kind.name());
        self.out.push_str("(Keyword(");
        push_quoted(&mut self.out, keyword.as_str());
        self.out.push_str("), ");
        value.accept(self);
        self.out.push(')');
    }

    /// Prints `Kind('text')`.
    fn leaf(&mut self, kind: NodeKind, text: &str) {
        self.out.push_str(kind.name());
        self.out.push('(');
        push_quoted(&mut self.out, text);
        self.out.push(')');
    }
}

impl Walker for ReprPrinter {
    type Output = ();

    fn empty_query(&mut self, original: &str) {
        self.leaf(NodeKind::EmptyQuery, original);
    }

    fn value_query(&mut self, value: &Node) {
        self.unary(NodeKind::ValueQuery, value);
    }

    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) {
        self.field(NodeKind::KeywordOp, keyword, value);
    }

    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) {
        self.field(NodeKind::LegacyFieldOp, keyword, value);
    }

    fn and_op(&mut self, left: &Node, right: &Node) {
        self.binary(NodeKind::AndOp, left, right);
    }

    fn or_op(&mut self, left: &Node, right: &Node) {
        self.binary(NodeKind::OrOp, left, right);
    }

    fn not_op(&mut self, operand: &Node) {
        self.unary(NodeKind::NotOp, operand);
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) {
        self.binary(NodeKind::RangeOp, lower, upper);
    }

    fn greater_op(&mut self, value: &Node) {
        self.unary(NodeKind::GreaterOp, value);
    }

    fn greater_equal_op(&mut self, value: &Node) {
        self.unary(NodeKind::GreaterEqualOp, value);
    }

    fn lower_op(&mut self, value: &Node) {
        self.unary(NodeKind::LowerOp, value);
    }

    fn lower_equal_op(&mut self, value: &Node) {
        self.unary(NodeKind::LowerEqualOp, value);
    }

    fn value(&mut self, text: &str) {
        self.leaf(NodeKind::Value, text);
    }

    fn single_quoted_value(&mut self, text: &str) {
        self.leaf(NodeKind::SingleQuotedValue, text);
    }

    fn double_quoted_value(&mut self, text: &str) {
        self.leaf(NodeKind::DoubleQuotedValue, text);
    }

    fn regex_value(&mut self, pattern: &str) {
        self.leaf(NodeKind::RegexValue, pattern);
    }
}

/// Renders a tree with one node per line and two spaces of indentation per level.
#[derive(Debug, Default)]
pub struct TreePrinter {
    /// Accumulated output.
    out: String,
    /// Current nesting level.
    indent: usize,
}

impl TreePrinter {
    /// Returns the rendered text.
    pub fn finish(self) -> String {
        self.out
    }

    /// Writes one line at the current indentation.
    fn line(&mut self, label: &str) {
        self.out.push_str(&"  ".repeat(self.indent));
        self.out.push_str(label);
        self.out.push('\n');
    }

    /// Writes a label line followed by its children one level deeper.
    fn branch(&mut self, label: &str, children: &[&Node]) {
        self.line(label);
        self.indent += 1;
        for child in children {
            child.accept(self);
        }
        self.indent -= 1;
    }

    /// Writes a leaf line such as `Value('bar')`.
    fn leaf(&mut self, kind: NodeKind, text: &str) {
        let mut label = format!("{kind}(");
        push_quoted(&mut label, text);
        label.push(')');
        self.line(&label);
    }
}

impl Walker for TreePrinter {
    type Output = ();

    fn empty_query(&mut self, original: &str) {
        self.leaf(NodeKind::EmptyQuery, original);
    }

    fn value_query(&mut self, value: &Node) {
        self.branch("ValueQuery", &[value]);
    }

    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) {
        self.branch(&format!("KeywordOp({keyword})"), &[value]);
    }

    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) {
        self.branch(&format!("LegacyFieldOp({keyword})"), &[value]);
    }

    fn and_op(&mut self, left: &Node, right: &Node) {
        self.branch("AndOp", &[left, right]);
    }

    fn or_op(&mut self, left: &Node, right: &Node) {
        self.branch("OrOp", &[left, right]);
    }

    fn not_op(&mut self, operand: &Node) {
        self.branch("NotOp", &[operand]);
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) {
        self.branch("RangeOp", &[lower, upper]);
    }

    fn greater_op(&mut self, value: &Node) {
        self.branch("GreaterOp", &[value]);
    }

    fn greater_equal_op(&mut self, value: &Node) {
        self.branch("GreaterEqualOp", &[value]);
    }

    fn lower_op(&mut self, value: &Node) {
        self.branch("LowerOp", &[value]);
    }

    fn lower_equal_op(&mut self, value: &Node) {
        self.branch("LowerEqualOp", &[value]);
    }

    fn value(&mut self, text: &str) {
        self.leaf(NodeKind::Value, text);
    }

    fn single_quoted_value(&mut self, text: &str) {
        self.leaf(NodeKind::SingleQuotedValue, text);
    }

    fn double_quoted_value(&mut self, text: &str) {
        self.leaf(NodeKind::DoubleQuotedValue, text);
    }

    fn regex_value(&mut self, pattern: &str) {
        self.leaf(NodeKind::RegexValue, pattern);
    }
}

/// Renders a tree as a native-syntax query string.
///
/// Operands are parenthesized where precedence requires it. Bare values containing
/// whitespace are double-quoted so they stay a single term. Legacy field nodes print
/// like keyword nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeSyntaxPrinter;

impl NativeSyntaxPrinter {
    /// Renders `node`, wrapped in parentheses when its variant is one of `kinds`.
    fn operand(&mut self, node: &Node, kinds: &[NodeKind]) -> String {
        let text = node.accept(self);
        if kinds.contains(&node.kind()) {
            format!("({text})")
        } else {
            text
        }
    }
}

impl Walker for NativeSyntaxPrinter {
    type Output = String;

    fn empty_query(&mut self, original: &str) -> String {
        original.to_string()
    }

    fn value_query(&mut self, value: &Node) -> String {
        value.accept(self)
    }

    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) -> String {
        format!("{keyword}:{}", value.accept(self))
    }

    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) -> String {
        self.keyword_op(keyword, value)
    }

    fn and_op(&mut self, left: &Node, right: &Node) -> String {
        let left = self.operand(left, &[NodeKind::OrOp]);
        let right = self.operand(right, &[NodeKind::AndOp, NodeKind::OrOp]);
        format!("{left} and {right}")
    }

    fn or_op(&mut self, left: &Node, right: &Node) -> String {
        let left = left.accept(self);
        let right = self.operand(right, &[NodeKind::OrOp]);
        format!("{left} or {right}")
    }

    fn not_op(&mut self, operand: &Node) -> String {
        format!(
            "not {}",
            self.operand(operand, &[NodeKind::AndOp, NodeKind::OrOp])
        )
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) -> String {
        format!("{}->{}", lower.accept(self), upper.accept(self))
    }

    fn greater_op(&mut self, value: &Node) -> String {
        format!(">{}", value.accept(self))
    }

    fn greater_equal_op(&mut self, value: &Node) -> String {
        format!(">={}", value.accept(self))
    }

    fn lower_op(&mut self, value: &Node) -> String {
        format!("<{}", value.accept(self))
    }

    fn lower_equal_op(&mut self, value: &Node) -> String {
        format!("<={}", value.accept(self))
    }

    // Reparsing a quoted bare value yields a double-quoted value with the same text.
    fn value(&mut self, text: &str) -> String {
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            format!("\"{text}\"")
        } else {
            text.to_string()
        }
    }

    fn single_quoted_value(&mut self, text: &str) -> String {
        format!("'{text}'")
    }

    fn double_quoted_value(&mut self, text: &str) -> String {
        format!("\"{text}\"")
    }

    fn regex_value(&mut self, pattern: &str) -> String {
        format!("/{pattern}/")
    }
}
