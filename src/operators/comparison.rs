//! Comparison operators: equality swap, relational flip/reverse, and the
//! boundary collapse to equality.

use super::MutationOperator;
use crate::parser::{node::Span, Node};

fn atom(text: impl Into<String>) -> Node {
    Node::Atom {
        span: Span::synthetic(),
        text: text.into(),
    }
}

pub struct ComparisonEquality;

impl ComparisonEquality {
    fn swap(op: &str) -> Option<&'static str> {
        match op {
            "==" => Some("!="),
            "!=" => Some("=="),
            "=" => Some("≠"),
            "≠" => Some("="),
            "/=" => Some("=="),
            _ => None,
        }
    }
}

impl MutationOperator for ComparisonEquality {
    fn name(&self) -> &'static str {
        "comparison-equality"
    }

    fn description(&self) -> &'static str {
        "Swaps equality operators, preserving notation family"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if Self::swap(text).is_some())
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let Some(swapped) = Self::swap(text) else {
            return Vec::new();
        };
        vec![(atom(swapped), format!("comparison-equality: {text} -> {swapped}"))]
    }
}

pub struct ComparisonRelational;

impl ComparisonRelational {
    fn flip_and_reverse(op: &str) -> Option<(&'static str, &'static str)> {
        match op {
            "<" => Some(("<=", ">")),
            ">" => Some((">=", "<")),
            "<=" => Some(("<", ">=")),
            ">=" => Some((">", "<=")),
            "≤" => Some(("<", "≥")),
            "≥" => Some((">", "≤")),
            _ => None,
        }
    }
}

impl MutationOperator for ComparisonRelational {
    fn name(&self) -> &'static str {
        "comparison-relational"
    }

    fn description(&self) -> &'static str {
        "Flips strictness or reverses direction of a relational operator"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if Self::flip_and_reverse(text).is_some())
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let Some((flipped, reversed)) = Self::flip_and_reverse(text) else {
            return Vec::new();
        };
        vec![
            (atom(flipped), format!("comparison-relational: {text} -> {flipped} (flip strictness)")),
            (atom(reversed), format!("comparison-relational: {text} -> {reversed} (reverse direction)")),
        ]
    }
}

pub struct ComparisonBoundary;

impl MutationOperator for ComparisonBoundary {
    fn name(&self) -> &'static str {
        "comparison-boundary"
    }

    fn description(&self) -> &'static str {
        "Collapses a relational operator to ="
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if matches!(text.as_str(), "<" | ">" | "<=" | ">=" | "≤" | "≥"))
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        vec![(atom("="), format!("comparison-boundary: {text} -> ="))]
    }
}
