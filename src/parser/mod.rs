//! Parses a target-language source buffer into a syntax tree.
//!
//! There is no published tree-sitter grammar for this language, so unlike
//! the AST front end this crate's structure is modeled on, parsing here is
//! hand-rolled: a tokenizer (`lexer`) followed by a light structural pass
//! that groups tokens into commands and brackets, with just enough shape
//! detection (`unary_expression`) for the negation-removal operator. The
//! adapter never attempts a full elaboration.

mod lexer;
pub mod node;

pub use node::{pretty_print, Node, Span};

use crate::error::LeanMutatorError;
use lexer::{lex, Token, TokenKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const COMMAND_KEYWORDS: &[&str] = &[
    "def",
    "theorem",
    "lemma",
    "example",
    "instance",
    "structure",
    "inductive",
    "class",
    "axiom",
    "variable",
    "variables",
    "abbrev",
    "namespace",
    "section",
    "end",
    "open",
    "set_option",
    "import",
];

const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "<", "<=", ">", ">=", "==", "!=", "/=", "=", "≠", "&&", "||", "∧",
    "∨", "≤", "≥",
];

/// Outcome of parsing one source file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed tree: always `kind() == "root"`.
    pub root: Node,
    /// Diagnostics from commands the parser gave up on after the header
    /// parsed successfully. Empty means the whole file parsed cleanly.
    pub errors: Vec<String>,
}

/// Parse `source` (the contents of `file`) into a [`ParseResult`].
///
/// Reentrant and stateless: two calls on the same bytes produce identical
/// trees. Fails only when the header itself cannot be parsed; a failure in a
/// later command truncates the command list but still returns a tree built
/// from the header plus every command parsed so far.
pub fn parse(source: &str, file: &Path) -> Result<ParseResult, LeanMutatorError> {
    let tokens = lex(source, file)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        file,
    };

    let header = parser.parse_header()?;

    let mut commands = Vec::new();
    let mut errors = Vec::new();
    while !parser.at_eof() {
        match parser.parse_command() {
            Ok(node) => commands.push(node),
            Err(e) => {
                errors.push(e.to_string());
                break;
            }
        }
    }

    let (end_line, end_col) = end_position(source);
    let root = Node::Node {
        span: Span {
            byte_start: 0,
            byte_end: source.len(),
            start_line: 1,
            start_col: 1,
            end_line,
            end_col,
        },
        kind: "root",
        children: std::iter::once(header).chain(commands).collect(),
    };

    Ok(ParseResult { root, errors })
}

/// Recursively find source files under `roots`, skipping hidden directories
/// and the build-tool cache directory.
pub fn discover_source_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            if is_source_file(root) {
                files.push(root.clone());
            }
            continue;
        }

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                return !(name.starts_with('.') || name == "lake-packages" || name == "build");
            }
            true
        });

        for entry in walker.filter_map(std::result::Result::ok) {
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files
}

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("lean")
}

fn end_position(source: &str) -> (usize, usize) {
    let line_count = source.lines().count().max(1);
    let last_line_len = source.lines().last().map_or(0, str::len);
    (line_count, last_line_len + 1)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    file: &'a Path,
}

impl Parser<'_> {
    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn is_command_start(&self, tok: &Token) -> bool {
        tok.kind == TokenKind::Ident
            && (tok.text.starts_with('#') || COMMAND_KEYWORDS.contains(&tok.text.as_str()))
    }

    fn parse_header(&mut self) -> Result<Node, LeanMutatorError> {
        let start = self.peek().map_or(
            Span {
                byte_start: 0,
                byte_end: 0,
                start_line: 1,
                start_col: 1,
                end_line: 1,
                end_col: 1,
            },
            |t| t.span,
        );
        let mut children = Vec::new();
        let mut end_span = start;

        while let Some(tok) = self.peek() {
            if tok.text != "import" {
                break;
            }
            let import_atom = Node::Atom {
                span: tok.span,
                text: tok.text.clone(),
            };
            let import_start = tok.span;
            self.advance();

            let mut path_children = vec![import_atom];
            loop {
                match self.peek() {
                    Some(t) if t.kind == TokenKind::Ident => {
                        path_children.push(Node::Identifier {
                            span: t.span,
                            name: t.text.clone(),
                        });
                        self.advance();
                    }
                    _ => {
                        return Err(LeanMutatorError::Parse {
                            path: self.file.to_path_buf(),
                            message: "malformed import: expected a module path".to_owned(),
                        })
                    }
                }
                if matches!(self.peek(), Some(t) if t.text == ".") {
                    self.advance();
                } else {
                    break;
                }
            }
            let last_span = path_children
                .last()
                .map_or(import_start, |n| n.span());
            end_span = last_span;
            children.push(Node::Node {
                span: span_over(import_start, last_span),
                kind: "import",
                children: path_children,
            });
        }

        Ok(Node::Node {
            span: span_over(start, end_span),
            kind: "header",
            children,
        })
    }

    fn parse_command(&mut self) -> Result<Node, LeanMutatorError> {
        let Some(first) = self.peek().cloned() else {
            return Err(LeanMutatorError::Parse {
                path: self.file.to_path_buf(),
                message: "unexpected end of input".to_owned(),
            });
        };
        if !self.is_command_start(&first) {
            return Err(LeanMutatorError::Parse {
                path: self.file.to_path_buf(),
                message: format!("expected a top-level command, found '{}'", first.text),
            });
        }

        let mut children = vec![Node::Identifier {
            span: first.span,
            name: first.text.clone(),
        }];
        self.advance();
        children.extend(self.build_nodes(true)?);

        let end_span = children.last().map_or(first.span, Node::span);
        Ok(Node::Node {
            span: span_over(first.span, end_span),
            kind: "command",
            children,
        })
    }

    /// Build a flat sequence of nodes until either a bracket closes
    /// (`top_level == false`, handled by the caller), the next command
    /// starts (`top_level == true`), or input ends.
    fn build_nodes(&mut self, top_level: bool) -> Result<Vec<Node>, LeanMutatorError> {
        let mut nodes = Vec::new();
        while let Some(tok) = self.peek().cloned() {
            if top_level && self.is_command_start(&tok) {
                break;
            }
            if matches!(tok.text.as_str(), ")" | "}" | "]") {
                break;
            }

            if matches!(tok.text.as_str(), "(" | "{" | "[") {
                nodes.push(self.parse_group()?);
                continue;
            }

            if tok.text == "!" || tok.text == "¬" {
                nodes.push(self.parse_negation(&tok)?);
                continue;
            }

            self.advance();
            nodes.push(match tok.kind {
                TokenKind::Ident => Node::Identifier {
                    span: tok.span,
                    name: tok.text,
                },
                TokenKind::Int | TokenKind::Str | TokenKind::Char | TokenKind::Symbol => {
                    Node::Atom {
                        span: tok.span,
                        text: tok.text,
                    }
                }
            });
        }
        Ok(nodes)
    }

    fn parse_group(&mut self) -> Result<Node, LeanMutatorError> {
        let open = self.advance().ok_or_else(|| LeanMutatorError::Parse {
            path: self.file.to_path_buf(),
            message: "expected an opening bracket".to_owned(),
        })?;
        let close_text = match open.text.as_str() {
            "(" => ")",
            "{" => "}",
            "[" => "]",
            other => {
                return Err(LeanMutatorError::Parse {
                    path: self.file.to_path_buf(),
                    message: format!("'{other}' is not an opening bracket"),
                })
            }
        };

        let mut children = vec![Node::Atom {
            span: open.span,
            text: open.text.clone(),
        }];
        children.extend(self.build_nodes(false)?);

        let Some(close) = self.peek().cloned().filter(|t| t.text == close_text) else {
            return Err(LeanMutatorError::Parse {
                path: self.file.to_path_buf(),
                message: format!("unbalanced '{}': expected '{close_text}'", open.text),
            });
        };
        self.advance();
        children.push(Node::Atom {
            span: close.span,
            text: close.text,
        });

        Ok(Node::Node {
            span: span_over(open.span, close.span),
            kind: "group",
            children,
        })
    }

    /// Wrap a negation in a `unary_expression` when its operand is
    /// unambiguous: a bracketed group, or a single leaf token not itself
    /// followed by a binary operator. Otherwise the negation is left as a
    /// bare atom and the caller advances past it normally.
    fn parse_negation(&mut self, neg: &Token) -> Result<Node, LeanMutatorError> {
        self.advance();

        if matches!(self.peek(), Some(t) if t.text == "(") {
            let group = self.parse_group()?;
            let neg_atom = Node::Atom {
                span: neg.span,
                text: neg.text.clone(),
            };
            return Ok(Node::Node {
                span: span_over(neg.span, group.span()),
                kind: "unary_expression",
                children: vec![neg_atom, group],
            });
        }

        let operand_is_leaf = matches!(
            self.peek(),
            Some(t) if matches!(t.kind, TokenKind::Ident | TokenKind::Int | TokenKind::Str | TokenKind::Char)
        );
        let ambiguous = self
            .peek_at(1)
            .is_some_and(|next| BINARY_OPERATORS.contains(&next.text.as_str()));

        if operand_is_leaf && !ambiguous {
            let operand_tok = self.advance().ok_or_else(|| LeanMutatorError::Parse {
                path: self.file.to_path_buf(),
                message: "expected a negation operand".to_owned(),
            })?;
            let operand = match operand_tok.kind {
                TokenKind::Ident => Node::Identifier {
                    span: operand_tok.span,
                    name: operand_tok.text,
                },
                TokenKind::Int | TokenKind::Str | TokenKind::Char | TokenKind::Symbol => {
                    Node::Atom {
                        span: operand_tok.span,
                        text: operand_tok.text,
                    }
                }
            };
            let neg_atom = Node::Atom {
                span: neg.span,
                text: neg.text.clone(),
            };
            return Ok(Node::Node {
                span: span_over(neg.span, operand.span()),
                kind: "unary_expression",
                children: vec![neg_atom, operand],
            });
        }

        // Operand cannot be isolated unambiguously: decline, leave the
        // negation symbol as a bare atom.
        Ok(Node::Atom {
            span: neg.span,
            text: neg.text.clone(),
        })
    }
}

fn span_over(start: Span, end: Span) -> Span {
    Span {
        byte_start: start.byte_start,
        byte_end: end.byte_end,
        start_line: start.start_line,
        start_col: start.start_col,
        end_line: end.end_line,
        end_col: end.end_col,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("test.lean")
    }

    #[test]
    fn parses_simple_def() {
        let result = parse("def x : Nat := 1", &file()).unwrap();
        assert!(result.errors.is_empty());
        assert_eq!(result.root.kind(), "root");
        assert_eq!(result.root.children().len(), 2); // header, one command
        assert_eq!(result.root.children()[1].kind(), "command");
    }

    #[test]
    fn parses_header_imports() {
        let result = parse("import Mathlib.Data.Nat\n\ndef x : Nat := 1", &file()).unwrap();
        let header = &result.root.children()[0];
        assert_eq!(header.kind(), "header");
        assert_eq!(header.children().len(), 1);
        assert_eq!(header.children()[0].kind(), "import");
    }

    #[test]
    fn malformed_import_is_header_failure() {
        let result = parse("import := 1", &file());
        assert!(result.is_err());
    }

    #[test]
    fn later_command_failure_keeps_earlier_commands() {
        let source = "def a : Nat := 1\ndef b : Nat := (2\n";
        let result = parse(source, &file()).unwrap();
        assert_eq!(result.root.children().len(), 2); // header + first command only
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn wraps_unambiguous_negation() {
        let result = parse("def f (a : Bool) := !a", &file()).unwrap();
        let command = &result.root.children()[1];
        let unary = command
            .children()
            .iter()
            .find(|n| n.kind() == "unary_expression");
        assert!(unary.is_some());
    }

    #[test]
    fn declines_ambiguous_negation() {
        let result = parse("def f (a b : Bool) := !a && b", &file()).unwrap();
        let command = &result.root.children()[1];
        let unary = command
            .children()
            .iter()
            .find(|n| n.kind() == "unary_expression");
        assert!(unary.is_none());
    }

    #[test]
    fn wraps_parenthesized_negation_operand() {
        let result = parse("def f (a b : Bool) := !(a && b)", &file()).unwrap();
        let command = &result.root.children()[1];
        let unary = command
            .children()
            .iter()
            .find(|n| n.kind() == "unary_expression")
            .unwrap();
        assert_eq!(unary.children()[1].kind(), "group");
    }

    #[test]
    fn discovers_lean_files_and_skips_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.lean"), "def a : Nat := 1").unwrap();
        std::fs::create_dir(dir.path().join(".hidden")).unwrap();
        std::fs::write(dir.path().join(".hidden").join("b.lean"), "def b : Nat := 1").unwrap();
        std::fs::write(dir.path().join("c.txt"), "not lean").unwrap();

        let found = discover_source_files(&[dir.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name().unwrap(), "a.lean");
    }
}
