//! Hand-rolled tokenizer for the target language's surface syntax.
//!
//! There is no tree-sitter grammar for this language on crates.io, so the
//! parser adapter does its own lexing. The lexer only needs to recognize
//! enough structure to let the traversal find mutation sites — it does not
//! validate that the file elaborates.

use super::node::Span;
use crate::error::LeanMutatorError;
use std::path::Path;

/// A lexical token with its exact source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's literal text, including any surrounding quotes.
    pub text: String,
    /// Location of the token in the source.
    pub span: Span,
}

/// Coarse token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier, keyword, or `#command` name.
    Ident,
    /// An integer literal.
    Int,
    /// A double-quoted string literal, quotes included.
    Str,
    /// A single-quoted char literal, quotes included.
    Char,
    /// Punctuation or an operator.
    Symbol,
}

const SYMBOLS: &[&str] = &[
    ":=", "=>", "->", "==", "!=", "/=", "<=", ">=", "&&", "||", "(", ")", "{", "}", "[", "]", ":",
    ",", ".", "|", "+", "-", "*", "/", "%", "<", ">", "=", "!", "∧", "∨", "¬", "≤", "≥", "≠", "→",
];

struct Cursor<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    fn byte_offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(i, _)| i)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn pos_mark(&self) -> (usize, usize, usize) {
        (self.byte_offset(), self.line, self.col)
    }
}

fn is_id_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_id_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Tokenize `source`. Fails only on an unterminated string or char literal,
/// since those leave no sensible recovery point.
pub fn lex(source: &str, file: &Path) -> Result<Vec<Token>, LeanMutatorError> {
    let mut cur = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        skip_whitespace_and_comments(&mut cur);
        let Some(c) = cur.peek() else { break };

        let (start_byte, start_line, start_col) = cur.pos_mark();

        if is_id_start(c) {
            let mut text = String::new();
            while let Some(c) = cur.peek() {
                if is_id_continue(c) {
                    text.push(c);
                    cur.advance();
                } else {
                    break;
                }
            }
            push_token(&mut tokens, TokenKind::Ident, text, &cur, start_byte, start_line, start_col);
            continue;
        }

        if c == '#' {
            let mut text = String::from("#");
            cur.advance();
            while let Some(c) = cur.peek() {
                if is_id_continue(c) {
                    text.push(c);
                    cur.advance();
                } else {
                    break;
                }
            }
            push_token(&mut tokens, TokenKind::Ident, text, &cur, start_byte, start_line, start_col);
            continue;
        }

        if c.is_ascii_digit() {
            let mut text = String::new();
            while let Some(c) = cur.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    cur.advance();
                } else {
                    break;
                }
            }
            push_token(&mut tokens, TokenKind::Int, text, &cur, start_byte, start_line, start_col);
            continue;
        }

        if c == '"' {
            let text = lex_quoted(&mut cur, '"', file)?;
            push_token(&mut tokens, TokenKind::Str, text, &cur, start_byte, start_line, start_col);
            continue;
        }

        if c == '\'' {
            let text = lex_quoted(&mut cur, '\'', file)?;
            push_token(&mut tokens, TokenKind::Char, text, &cur, start_byte, start_line, start_col);
            continue;
        }

        if let Some(sym) = match_symbol(&cur) {
            for _ in 0..sym.chars().count() {
                cur.advance();
            }
            push_token(&mut tokens, TokenKind::Symbol, sym.to_owned(), &cur, start_byte, start_line, start_col);
            continue;
        }

        // An unrecognized character: consume it as a one-character symbol so
        // that lexing always makes forward progress.
        let mut text = String::new();
        text.push(c);
        cur.advance();
        push_token(&mut tokens, TokenKind::Symbol, text, &cur, start_byte, start_line, start_col);
    }

    Ok(tokens)
}

fn push_token(
    tokens: &mut Vec<Token>,
    kind: TokenKind,
    text: String,
    cur: &Cursor<'_>,
    start_byte: usize,
    start_line: usize,
    start_col: usize,
) {
    let (end_byte, end_line, end_col) = cur.pos_mark();
    tokens.push(Token {
        kind,
        text,
        span: Span {
            byte_start: start_byte,
            byte_end: end_byte,
            start_line,
            start_col,
            end_line,
            end_col,
        },
    });
}

fn match_symbol(cur: &Cursor<'_>) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .filter(|sym| {
            sym.chars()
                .enumerate()
                .all(|(i, c)| cur.peek_at(i) == Some(c))
        })
        .max_by_key(|sym| sym.len())
        .copied()
}

fn skip_whitespace_and_comments(cur: &mut Cursor<'_>) {
    loop {
        match cur.peek() {
            Some(c) if c.is_whitespace() => {
                cur.advance();
            }
            Some('-') if cur.peek_at(1) == Some('-') => {
                while let Some(c) = cur.peek() {
                    if c == '\n' {
                        break;
                    }
                    cur.advance();
                }
            }
            Some('/') if cur.peek_at(1) == Some('-') => {
                cur.advance();
                cur.advance();
                let mut depth = 1usize;
                while depth > 0 {
                    match (cur.peek(), cur.peek_at(1)) {
                        (Some('/'), Some('-')) => {
                            cur.advance();
                            cur.advance();
                            depth += 1;
                        }
                        (Some('-'), Some('/')) => {
                            cur.advance();
                            cur.advance();
                            depth -= 1;
                        }
                        (Some(_), _) => {
                            cur.advance();
                        }
                        (None, _) => break,
                    }
                }
            }
            _ => break,
        }
    }
}

fn lex_quoted(cur: &mut Cursor<'_>, quote: char, file: &Path) -> Result<String, LeanMutatorError> {
    let mut text = String::new();
    text.push(quote);
    cur.advance();
    loop {
        match cur.peek() {
            None => {
                return Err(LeanMutatorError::Parse {
                    path: file.to_path_buf(),
                    message: format!("unterminated {quote} literal"),
                })
            }
            Some('\\') => {
                text.push('\\');
                cur.advance();
                if let Some(escaped) = cur.peek() {
                    text.push(escaped);
                    cur.advance();
                }
            }
            Some(c) if c == quote => {
                text.push(c);
                cur.advance();
                break;
            }
            Some(c) => {
                text.push(c);
                cur.advance();
            }
        }
    }
    Ok(text)
}
