//! Legacy to native conversion.
//!
//! Rewrites every [`Node::LegacyFieldOp`] into the equivalent [`Node::KeywordOp`]. The
//! legacy grammar has already resolved keyword inheritance, so the conversion is purely
//! structural.

use crate::{
    ast::{Keyword, Node},
    walker::Walker,
};

/// Converts a legacy tree into its canonical form.
///
/// Nested legacy chains convert innermost first. Canonical trees come back unchanged.
pub fn convert(node: &Node) -> Node {
    node.accept(&mut LegacyConverter)
}

/// Transform walker behind [`convert`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyConverter;

impl Walker for LegacyConverter {
    type Output = Node;

    fn empty_query(&mut self, original: &str) -> Node {
        Node::empty(original)
    }

    fn value_query(&mut self, value: &Node) -> Node {
        Node::value_query(value.accept(self))
    }

    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) -> Node {
        Node::keyword(keyword.clone(), value.accept(self))
    }

    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) -> Node {
        let value = value.accept(self);
        Node::keyword(keyword.clone(), value)
    }

    fn and_op(&mut self, left: &Node, right: &Node) -> Node {
        Node::and(left.accept(self), right.accept(self))
    }

    fn or_op(&mut self, left: &Node, right: &Node) -> Node {
        Node::or(left.accept(self), right.accept(self))
    }

    fn not_op(&mut self, operand: &Node) -> Node {
        Node::not(operand.accept(self))
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) -> Node {
        Node::range(lower.accept(self), upper.accept(self))
    }

    fn greater_op(&mut self, value: &Node) -> Node {
        Node::greater(value.accept(self))
    }

    fn greater_equal_op(&mut self, value: &Node) -> Node {
        Node::greater_equal(value.accept(self))
    }

    fn lower_op(&mut self, value: &Node) -> Node {
        Node::lower(value.accept(self))
    }

    fn lower_equal_op(&mut self, value: &Node) -> Node {
        Node::lower_equal(value.accept(self))
    }

    fn value(&mut self, text: &str) -> Node {
        Node::value(text)
    }

    fn single_quoted_value(&mut self, text: &str) -> Node {
        Node::single_quoted(text)
    }

    fn double_quoted_value(&mut self, text: &str) -> Node {
        Node::double_quoted(text)
    }

    fn regex_value(&mut self, pattern: &str) -> Node {
        Node::regex(pattern)
    }
}
