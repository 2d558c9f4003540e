//! Source-pattern operators: match space-padded operator tokens directly in
//! the raw byte stream.
//!
//! These exist for the cases the parser declines to handle — a file the
//! parser can't fully structure, or an operator wrapped in a node kind the
//! syntactic operators don't recognize. The space padding is load-bearing:
//! it keeps `a+b` from matching while still catching `a + b`.

/// One raw, unstructured mutation candidate.
pub struct RawMatch {
    /// Start offset of the matched pattern.
    pub byte_start: usize,
    /// End offset (exclusive) of the matched pattern.
    pub byte_end: usize,
    /// The matched pattern text.
    pub original: String,
    /// The padded alternative to substitute.
    pub mutated: String,
    /// Human-readable description.
    pub description: String,
}

struct Rule {
    pattern: &'static str,
    replacement: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: " + ", replacement: " - " },
    Rule { pattern: " - ", replacement: " + " },
    Rule { pattern: " * ", replacement: " / " },
    Rule { pattern: " / ", replacement: " * " },
    Rule { pattern: " && ", replacement: " || " },
    Rule { pattern: " || ", replacement: " && " },
    Rule { pattern: " == ", replacement: " != " },
    Rule { pattern: " != ", replacement: " == " },
    Rule { pattern: " <= ", replacement: " >= " },
    Rule { pattern: " >= ", replacement: " <= " },
    Rule { pattern: " < ", replacement: " > " },
    Rule { pattern: " > ", replacement: " < " },
];

/// Scan `source` for every padded-token pattern, non-overlapping within
/// each rule, left to right.
#[must_use]
pub fn generate(source: &str) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for rule in RULES {
        let mut cursor = 0;
        while let Some(found) = source[cursor..].find(rule.pattern) {
            let byte_start = cursor + found;
            let byte_end = byte_start + rule.pattern.len();
            matches.push(RawMatch {
                byte_start,
                byte_end,
                original: rule.pattern.to_owned(),
                mutated: rule.replacement.to_owned(),
                description: format!(
                    "source-pattern: {} -> {}",
                    rule.pattern.trim(),
                    rule.replacement.trim()
                ),
            });
            cursor = byte_end;
        }
    }
    matches.sort_by_key(|m| m.byte_start);
    matches
}
