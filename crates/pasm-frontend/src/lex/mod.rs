#[cfg(test)]
mod tests;

use logos::Logos;
use pasm_common::message::{File, Span};

/// The tokens of a single line of pseudo-assembly. Newlines never appear, as
/// the input is split into lines before lexing.
#[derive(Logos, Clone, Debug, Eq, PartialEq)]
pub enum Token {
    #[regex(r"[A-Za-z_.$][A-Za-z0-9_.$]*:", |lexer| {
        let slice = lexer.slice();
        slice[..slice.len() - 1].to_string()
    })]
    Label(String),

    #[regex(r"[A-Za-z_.$][A-Za-z0-9_.$]*", |lexer| lexer.slice().to_string())]
    Name(String),

    #[regex(r"-?[0-9]+", |lexer| lexer.slice().to_string())]
    #[regex(r"-?0x[0-9a-fA-F]+", |lexer| lexer.slice().to_string())]
    Number(String),

    #[regex(r"#[^\n]*", |lexer| lexer.slice().trim_end().to_string())]
    Comment(String),

    #[error]
    #[regex(r"[ \t\r\f\v]+", logos::skip)]
    Error,
}

/// Lex one line, whose first byte sits at `offset` in `file`. A comment runs
/// to the end of the line, so it is always the last token.
pub fn lex(line: &str, offset: usize, file: File) -> Vec<(Token, Span)> {
    Token::lexer(line)
        .spanned()
        .map(|(token, range)| (token, Span::new(file, range.start, range.end).offset(offset)))
        .collect()
}
