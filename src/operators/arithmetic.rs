//! Arithmetic operators: add/sub and mul/div swaps, the cross-family
//! all-swap, and numeric boundary mutation.

use super::MutationOperator;
use crate::parser::{node::Span, Node};

fn atom(text: impl Into<String>) -> Node {
    Node::Atom {
        span: Span::synthetic(),
        text: text.into(),
    }
}

pub struct ArithmeticAddSub;

impl MutationOperator for ArithmeticAddSub {
    fn name(&self) -> &'static str {
        "arithmetic-add-sub"
    }

    fn description(&self) -> &'static str {
        "Swaps + and -"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if text == "+" || text == "-")
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let swapped = if text == "+" { "-" } else { "+" };
        vec![(atom(swapped), format!("arithmetic-add-sub: {text} -> {swapped}"))]
    }
}

pub struct ArithmeticMulDiv;

impl MutationOperator for ArithmeticMulDiv {
    fn name(&self) -> &'static str {
        "arithmetic-mul-div"
    }

    fn description(&self) -> &'static str {
        "Swaps * and /; modulus maps to both, never surviving as %"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if matches!(text.as_str(), "*" | "/" | "%"))
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        match text.as_str() {
            "*" => vec![(atom("/"), "arithmetic-mul-div: * -> /".to_owned())],
            "/" => vec![(atom("*"), "arithmetic-mul-div: / -> *".to_owned())],
            "%" => vec![
                (atom("*"), "arithmetic-mul-div: % -> *".to_owned()),
                (atom("/"), "arithmetic-mul-div: % -> /".to_owned()),
            ],
            _ => Vec::new(),
        }
    }
}

pub struct ArithmeticSwap;

impl MutationOperator for ArithmeticSwap {
    fn name(&self) -> &'static str {
        "arithmetic-swap"
    }

    fn description(&self) -> &'static str {
        "Crosses the additive/multiplicative families: + <-> */, - <-> */"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if matches!(text.as_str(), "+" | "-" | "*" | "/" | "%"))
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let targets: &[&str] = match text.as_str() {
            "+" | "-" => &["*", "/"],
            "*" | "/" | "%" => &["+", "-"],
            _ => &[],
        };
        targets
            .iter()
            .map(|&t| (atom(t), format!("arithmetic-swap: {text} -> {t}")))
            .collect()
    }
}

pub struct NumericBoundary;

impl MutationOperator for NumericBoundary {
    fn name(&self) -> &'static str {
        "numeric-boundary"
    }

    fn description(&self) -> &'static str {
        "Shifts an integer literal to n+1, n-1, and 0"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let Ok(n) = text.parse::<i64>() else {
            return Vec::new();
        };

        let mut candidates = vec![n + 1, n - 1];
        if n != 0 {
            candidates.push(0);
        }

        candidates
            .into_iter()
            .map(|v| {
                (
                    atom(v.to_string()),
                    format!("numeric-boundary: {n} -> {v}"),
                )
            })
            .collect()
    }
}
