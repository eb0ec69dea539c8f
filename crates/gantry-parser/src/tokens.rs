//! Token types produced by the lexer.
//!
//! Keywords cover both the SysML v2 subset (`package`, `item`, `def`, `part`,
//! `port`, `action`, `state`, `transition`) and the legacy dialect (`block`,
//! `extends`). Anything the lexer does not recognize becomes an [`Token::Other`]
//! token instead of an error, which is what lets the parser skip unsupported
//! syntax statement by statement.

use std::fmt;

use crate::span::Span;

/// A single lexical token, borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    // Keywords
    Package,
    Item,
    Def,
    Part,
    Port,
    Action,
    State,
    Transition,
    Block,
    Extends,

    // Literals
    Identifier(&'src str),
    StringLit(&'src str),
    Number(&'src str),

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Equals,
    Arrow,

    /// Any character the lexer has no rule for.
    Other(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Package => write!(f, "package"),
            Token::Item => write!(f, "item"),
            Token::Def => write!(f, "def"),
            Token::Part => write!(f, "part"),
            Token::Port => write!(f, "port"),
            Token::Action => write!(f, "action"),
            Token::State => write!(f, "state"),
            Token::Transition => write!(f, "transition"),
            Token::Block => write!(f, "block"),
            Token::Extends => write!(f, "extends"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::StringLit(text) => write!(f, "\"{text}\""),
            Token::Number(text) => write!(f, "{text}"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Equals => write!(f, "="),
            Token::Arrow => write!(f, "->"),
            Token::Other(c) => write!(f, "{c}"),
        }
    }
}

/// A token paired with its source span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display_keywords() {
        assert_eq!(Token::Package.to_string(), "package");
        assert_eq!(Token::Transition.to_string(), "transition");
        assert_eq!(Token::Extends.to_string(), "extends");
    }

    #[test]
    fn test_token_display_literals() {
        assert_eq!(Token::Identifier("Switch").to_string(), "Switch");
        assert_eq!(Token::StringLit("on/off").to_string(), "\"on/off\"");
        assert_eq!(Token::Number("7.5").to_string(), "7.5");
        assert_eq!(Token::Other('%').to_string(), "%");
    }

    #[test]
    fn test_token_display_punctuation() {
        assert_eq!(Token::LBrace.to_string(), "{");
        assert_eq!(Token::Arrow.to_string(), "->");
        assert_eq!(Token::Semicolon.to_string(), ";");
    }

    #[test]
    fn test_positioned_token_carries_span() {
        let tok = PositionedToken::new(Token::Part, Span::new(4..8));
        assert_eq!(tok.token, Token::Part);
        assert_eq!(tok.span.start(), 4);
        assert_eq!(tok.span.len(), 4);
    }
}
