//! Boolean operators: literal flip, and/or swap, negation removal.

use super::MutationOperator;
use crate::parser::{node::Span, Node};

pub struct BooleanFlip;

impl MutationOperator for BooleanFlip {
    fn name(&self) -> &'static str {
        "boolean-flip"
    }

    fn description(&self) -> &'static str {
        "Flips a boolean literal: true <-> false"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Identifier { name, .. } if name == "true" || name == "false")
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Identifier { name, .. } = node else {
            return Vec::new();
        };
        let flipped = if name == "true" { "false" } else { "true" };
        vec![(
            Node::Identifier {
                span: Span::synthetic(),
                name: flipped.to_owned(),
            },
            format!("boolean-flip: {name} -> {flipped}"),
        )]
    }
}

pub struct BooleanAndOr;

impl BooleanAndOr {
    fn opposite(op: &str) -> Option<&'static str> {
        match op {
            "&&" => Some("||"),
            "||" => Some("&&"),
            "∧" => Some("∨"),
            "∨" => Some("∧"),
            _ => None,
        }
    }
}

impl MutationOperator for BooleanAndOr {
    fn name(&self) -> &'static str {
        "boolean-and-or"
    }

    fn description(&self) -> &'static str {
        "Swaps logical and/or, preserving ASCII/Unicode notation family"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if Self::opposite(text).is_some())
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let Some(opposite) = Self::opposite(text) else {
            return Vec::new();
        };
        vec![(
            Node::Atom {
                span: Span::synthetic(),
                text: opposite.to_owned(),
            },
            format!("boolean-and-or: {text} -> {opposite}"),
        )]
    }
}

pub struct BooleanNegationRemoval;

impl MutationOperator for BooleanNegationRemoval {
    fn name(&self) -> &'static str {
        "boolean-negation"
    }

    fn description(&self) -> &'static str {
        "Removes a unary negation, keeping its operand"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        node.kind() == "unary_expression" && node.children().len() == 2
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let [neg, operand] = node.children() else {
            return Vec::new();
        };
        let op_text = neg.leaf_text().unwrap_or("!");
        vec![(operand.clone(), format!("boolean-negation: remove {op_text}"))]
    }
}
