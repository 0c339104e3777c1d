//! Keyword collection.

use crate::{
    ast::{Keyword, Node},
    walker::Walker,
};

/// Report walker that records every keyword in textual order, duplicates included.
///
/// Both canonical and legacy field nodes count. Backends use this to check a query
/// against the fields they can search before translating it.
#[derive(Debug, Default, Clone)]
pub struct KeywordCollector {
    /// Keywords seen so far.
    keywords: Vec<Keyword>,
}

impl KeywordCollector {
    /// Collects the keywords of `node`.
    pub fn collect(node: &Node) -> Vec<Keyword> {
        let mut collector = Self::default();
        node.accept(&mut collector);
        collector.finish()
    }

    /// Returns the keywords recorded so far.
    pub fn finish(self) -> Vec<Keyword> {
        self.keywords
    }
}

impl Walker for KeywordCollector {
    type Output = ();

    fn empty_query(&mut self, _original: &str) {}

    fn value_query(&mut self, value: &Node) {
        value.accept(self);
    }

    fn keyword_op(&mut self, keyword: &Keyword, value: &Node) {
        self.keywords.push(keyword.clone());
        value.accept(self);
    }

    fn legacy_field_op(&mut self, keyword: &Keyword, value: &Node) {
        self.keywords.push(keyword.clone());
        value.accept(self);
    }

    fn and_op(&mut self, left: &Node, right: &Node) {
        left.accept(self);
        right.accept(self);
    }

    fn or_op(&mut self, left: &Node, right: &Node) {
        left.accept(self);
        right.accept(self);
    }

    fn not_op(&mut self, operand: &Node) {
        operand.accept(self);
    }

    fn range_op(&mut self, lower: &Node, upper: &Node) {
        lower.accept(self);
        upper.accept(self);
    }

    fn greater_op(&mut self, value: &Node) {
        value.accept(self);
    }

    fn greater_equal_op(&mut self, value: &Node) {
        value.accept(self);
    }

    fn lower_op(&mut self, value: &Node) {
        value.accept(self);
    }

    fn lower_equal_op(&mut self, value: &Node) {
        value.accept(self);
    }

    fn value(&mut self, _text: &str) {}

    fn single_quoted_value(&mut self, _text: &str) {}

    fn double_quoted_value(&mut self, _text: &str) {}

    fn regex_value(&mut self, _pattern: &str) {}
}
