//! String and char literal operators.

use super::MutationOperator;
use crate::parser::{node::Span, Node};

fn atom(text: impl Into<String>) -> Node {
    Node::Atom {
        span: Span::synthetic(),
        text: text.into(),
    }
}

pub struct StringLiteral;

impl MutationOperator for StringLiteral {
    fn name(&self) -> &'static str {
        "string-literal"
    }

    fn description(&self) -> &'static str {
        "Empties or pollutes a double-quoted string literal"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if text.starts_with('"') && text.ends_with('"') && text.len() >= 2)
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let inner = &text[1..text.len() - 1];
        if inner.is_empty() {
            return vec![(
                atom("\"non-empty\""),
                "string-literal: \"\" -> \"non-empty\"".to_owned(),
            )];
        }
        vec![
            (atom("\"\""), format!("string-literal: {text} -> \"\"")),
            (
                atom("\"MUTATED\""),
                format!("string-literal: {text} -> \"MUTATED\""),
            ),
        ]
    }
}

pub struct CharLiteral;

impl MutationOperator for CharLiteral {
    fn name(&self) -> &'static str {
        "char-literal"
    }

    fn description(&self) -> &'static str {
        "Replaces a single-quoted char literal with up to three alternatives"
    }

    fn can_mutate(&self, node: &Node) -> bool {
        matches!(node, Node::Atom { text, .. } if text.starts_with('\'') && text.ends_with('\'') && text.len() >= 2)
    }

    fn mutate(&self, node: &Node) -> Vec<(Node, String)> {
        let Node::Atom { text, .. } = node else {
            return Vec::new();
        };
        let inner = &text[1..text.len() - 1];
        let single_char = if inner.chars().count() == 1 {
            inner.chars().next()
        } else {
            None
        };

        let mut candidates = vec!["' '".to_owned()];
        candidates.push(if inner == "a" { "'z'".to_owned() } else { "'a'".to_owned() });
        if single_char.is_some_and(char::is_alphabetic) {
            candidates.push("'0'".to_owned());
        }

        candidates
            .into_iter()
            .filter(|candidate| candidate != text)
            .take(3)
            .map(|candidate| {
                let desc = format!("char-literal: {text} -> {candidate}");
                (atom(candidate), desc)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::pretty_print;

    #[test]
    fn nonempty_string_emits_empty_then_mutated() {
        let op = StringLiteral;
        let node = atom("\"hi\"");
        let mutations = op.mutate(&node);
        let texts: Vec<_> = mutations.iter().map(|(n, _)| pretty_print(n, "")).collect();
        assert_eq!(texts, vec!["\"\"", "\"MUTATED\""]);
    }

    #[test]
    fn empty_string_emits_non_empty() {
        let op = StringLiteral;
        let node = atom("\"\"");
        let mutations = op.mutate(&node);
        assert_eq!(mutations.len(), 1);
        assert_eq!(pretty_print(&mutations[0].0, ""), "\"non-empty\"");
    }

    #[test]
    fn char_literal_skips_original_value() {
        let op = CharLiteral;
        let node = atom("'a'");
        let mutations = op.mutate(&node);
        let texts: Vec<_> = mutations.iter().map(|(n, _)| pretty_print(n, "")).collect();
        assert_eq!(texts, vec!["' '", "'z'", "'0'"]);
    }

    #[test]
    fn char_literal_non_alphabetic_has_no_digit_candidate() {
        let op = CharLiteral;
        let node = atom("'5'");
        let mutations = op.mutate(&node);
        let texts: Vec<_> = mutations.iter().map(|(n, _)| pretty_print(n, "")).collect();
        assert_eq!(texts, vec!["' '", "'a'"]);
    }
}
