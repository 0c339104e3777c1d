//! Tree walkers.
//!
//! A walker implements one operation over the query tree. It has exactly one method per
//! node variant and none of them have defaults, so adding a variant to
//! [`Node`](crate::Node) breaks every walker at compile time until it handles the new
//! variant. New operations never touch the node definitions.
//!
//! Dispatch goes through [`Node::accept`](crate::Node::accept). Walkers recurse by calling
//! `accept` on the children they care about, in whatever order they need.
//!
//! Two flavors exist:
//!
//! - transform walkers return a new tree (or another tree-shaped value) as `Output`;
//! - report walkers keep their result in `self` and use `Output = ()`.
//!
//! A walker that cannot give meaning to a variant returns
//! [`WalkError::UnsupportedNode`] from that method instead of skipping it.

use crate::{
    ast::{Keyword, Node, NodeKind},
    error::WalkError,
};

/// One operation over every node variant.
pub trait Walker {
    /// What each visit produces.
    type Output;

    /// Visits [`Node::EmptyQuery`].
    fn empty_query(&mut self, original: &str) -> Self::Output;

    /// Visits [`Node::ValueQuery`].
    fn value_query(&mut self, value: &Node) -> Self::Output;

    /// Visits [`Node::KeywordOp`].
    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) -> Self::Output;

    /// Visits [`Node::LegacyFieldOp`].
    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) -> Self::Output;

    /// Visits [`Node::AndOp`].
    fn and_op(&mut self, left: &Node, right: &Node) -> Self::Output;

    /// Visits [`Node::OrOp`].
    fn or_op(&mut self, left: &Node, right: &Node) -> Self::Output;

    /// Visits [`Node::NotOp`].
    fn not_op(&mut self, operand: &Node) -> Self::Output;

    /// Visits [`Node::RangeOp`].
    fn range_op(&mut self, lower: &Node, upper: &Node) -> Self::Output;

    /// Visits [`Node::GreaterOp`].
    fn greater_op(&mut self, value: &Node) -> Self::Output;

    /// Visits [`Node::GreaterEqualOp`].
    fn greater_equal_op(&mut self, value: &Node) -> Self::Output;

    /// Visits [`Node::LowerOp`].
    fn lower_op(&mut self, value: &Node) -> Self::Output;

    /// Visits [`Node::LowerEqualOp`].
    fn lower_equal_op(&mut self, value: &Node) -> Self::Output;

    /// Visits [`Node::Value`].
    fn value(&mut self, text: &str) -> Self::Output;

    /// Visits [`Node::SingleQuotedValue`].
    fn single_quoted_value(&mut self, text: &str) -> Self::Output;

    /// Visits [`Node::DoubleQuotedValue`].
    fn double_quoted_value(&mut self, text: &str) -> Self::Output;

    /// Visits [`Node::RegexValue`].
    fn regex_value(&mut self, pattern: &str) -> Self::Output;
}

/// Verifies that a tree is canonical, i.e. holds no [`Node::LegacyFieldOp`].
///
/// Backends that only understand canonical trees run this before translating.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalCheck;

impl CanonicalCheck {
    /// Name reported in [`WalkError::UnsupportedNode`].
    const NAME: &'static str = "CanonicalCheck";

    /// Checks the whole tree.
    pub fn check(node: &Node) -> Result<(), WalkError> {
        node.accept(&mut Self)
    }
}

impl Walker for CanonicalCheck {
    type Output = Result<(), WalkError>;

    fn empty_query(&mut self, _original: &str) -> Self::Output {
        Ok(())
    }

    fn value_query(&mut self, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn keyword_op(&mut self, _keyword: &Keyword, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn legacy_field_op(&mut self, _keyword: &Keyword, _value: &Node) -> Self::Output {
        Err(WalkError::UnsupportedNode {
            walker: Self::NAME,
            kind: NodeKind::LegacyFieldOp,
        })
    }

    fn and_op(&mut self, left: &Node, right: &Node) -> Self::Output {
        left.accept(self)?;
        right.accept(self)
    }

    fn or_op(&mut self, left: &Node, right: &Node) -> Self::Output {
        left.accept(self)?;
        right.accept(self)
    }

    fn not_op(&mut self, operand: &Node) -> Self::Output {
        operand.accept(self)
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) -> Self::Output {
        lower.accept(self)?;
        upper.accept(self)
    }

    fn greater_op(&mut self, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn greater_equal_op(&mut self, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn lower_op(&mut self, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn lower_equal_op(&mut self, value: &Node) -> Self::Output {
        value.accept(self)
    }

    fn value(&mut self, _text: &str) -> Self::Output {
        Ok(())
    }

    fn single_quoted_value(&mut self, _text: &str) -> Self::Output {
        Ok(())
    }

    fn double_quoted_value(&mut self, _text: &str) -> Self::Output {
        Ok(())
    }

    fn regex_value(&mut self, _pattern: &str) -> Self::Output {
        Ok(())
    }
}
