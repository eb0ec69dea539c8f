//! Lexical analyzer for SysML source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! Whitespace and comments are consumed and discarded; the spans of the
//! surviving tokens keep their absolute byte offsets.
//!
//! The public entry point is [`tokenize`], which never fails: any character
//! with no lexer rule is emitted as a [`Token::Other`] token so the parser
//! can skip over it. An unterminated string literal degrades the same way,
//! surfacing its opening quote as `Other('"')` and re-lexing the remainder.

use winnow::{
    Parser as _,
    ascii::{digit1, multispace1},
    combinator::{alt, delimited, not, opt, peek, preceded, repeat, terminated},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, one_of, take_until, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O>;

/// Parse line comment starting with `//`.
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .void()
        .parse_next(input)
}

/// Parse block comment `/* ... */`.
///
/// An unterminated block comment swallows the rest of the document.
fn block_comment(input: &mut Input<'_>) -> IResult<()> {
    preceded(
        "/*",
        alt((
            (take_until(0.., "*/"), "*/").void(),
            take_while(0.., |_: char| true).void(),
        )),
    )
    .parse_next(input)
}

/// Consume whitespace and comments between tokens.
fn trivia(input: &mut Input<'_>) -> IResult<()> {
    repeat::<_, _, (), _, _>(1.., alt((multispace1.void(), line_comment, block_comment)))
        .parse_next(input)
}

/// Parse a double-quoted string literal.
///
/// The token borrows the raw text between the quotes. Escapes are kept
/// verbatim (a backslash shields the following character from terminating
/// the literal); emitters re-escape for their own formats.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    delimited(
        '"',
        repeat::<_, _, (), _, _>(
            0..,
            alt((preceded('\\', any).void(), none_of(['"', '\\']).void())),
        )
        .take(),
        '"',
    )
    .map(Token::StringLit)
    .parse_next(input)
}

/// Parse keywords with word boundary checking.
fn keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        alt((
            literal("package"),
            literal("item"),
            literal("def"),
            literal("part"),
            literal("port"),
            literal("action"),
            literal("state"),
            literal("transition"),
            literal("block"),
            literal("extends"),
        )),
        // Ensure keyword is not followed by identifier character (word boundary)
        peek(not(one_of(|c: char| c.is_ascii_alphanumeric() || c == '_'))),
    )
    .map(|keyword: &str| match keyword {
        "package" => Token::Package,
        "item" => Token::Item,
        "def" => Token::Def,
        "part" => Token::Part,
        "port" => Token::Port,
        "action" => Token::Action,
        "state" => Token::State,
        "transition" => Token::Transition,
        "block" => Token::Block,
        "extends" => Token::Extends,
        _ => unreachable!(),
    })
    .parse_next(input)
}

/// Parse a number literal with an optional fraction part.
fn number_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        (digit1, opt(('.', digit1))).take(),
        peek(not(one_of(|c: char| c.is_ascii_alphanumeric() || c == '_'))),
    )
    .map(Token::Number)
    .parse_next(input)
}

/// Parse identifiers.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    // Start with letter or underscore, followed by alphanumeric or underscore
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        })
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse single character tokens.
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '{'.value(Token::LBrace),
        '}'.value(Token::RBrace),
        '['.value(Token::LBracket),
        ']'.value(Token::RBracket),
        ';'.value(Token::Semicolon),
        ':'.value(Token::Colon),
        '='.value(Token::Equals),
    ))
    .parse_next(input)
}

/// Parse a single token with position tracking.
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        string_literal,                  // Must come before single chars
        literal("->").value(Token::Arrow), // Must come before the Other fallback
        keyword,                         // Must come before identifier
        number_literal,
        identifier,
        single_char_token,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Tokenize source text, never failing.
///
/// Characters with no lexer rule are emitted as [`Token::Other`] so the
/// parser can decide what to skip. This is the mechanism that lets
/// unsupported syntax degrade to a skipped statement instead of an error.
pub fn tokenize(input: &str) -> Vec<PositionedToken<'_>> {
    let mut located = LocatingSlice::new(input);
    let mut tokens = Vec::new();

    loop {
        let _ = trivia(&mut located);
        if located.is_empty() {
            break;
        }

        match positioned_token(&mut located) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                // No rule matched; emit the character as Other and move on.
                let start = located.current_token_start();
                if let Some(c) = located.next_token() {
                    let span = Span::new(start..located.current_token_start());
                    tokens.push(PositionedToken::new(Token::Other(c), span));
                }
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_single_token(input: &str, expected: Token<'_>) {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 1, "expected one token for: {input}");
        assert_eq!(tokens[0].token, expected);
    }

    #[test]
    fn test_keywords() {
        test_single_token("package", Token::Package);
        test_single_token("item", Token::Item);
        test_single_token("def", Token::Def);
        test_single_token("part", Token::Part);
        test_single_token("port", Token::Port);
        test_single_token("action", Token::Action);
        test_single_token("state", Token::State);
        test_single_token("transition", Token::Transition);
        test_single_token("block", Token::Block);
        test_single_token("extends", Token::Extends);
    }

    #[test]
    fn test_keyword_word_boundaries() {
        // Identifiers containing keywords stay identifiers
        test_single_token("statement", Token::Identifier("statement"));
        test_single_token("parts", Token::Identifier("parts"));
        test_single_token("state_machine", Token::Identifier("state_machine"));
        test_single_token("blocked", Token::Identifier("blocked"));
        test_single_token("state42", Token::Identifier("state42"));
    }

    #[test]
    fn test_identifiers() {
        test_single_token("hello", Token::Identifier("hello"));
        test_single_token("_private", Token::Identifier("_private"));
        test_single_token("var123", Token::Identifier("var123"));
        test_single_token("CamelCase", Token::Identifier("CamelCase"));
    }

    #[test]
    fn test_punctuation() {
        let tokens = tokenize("{ } [ ] ; : = ->");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
                Token::Semicolon,
                Token::Colon,
                Token::Equals,
                Token::Arrow,
            ]
        );
    }

    #[test]
    fn test_lone_dash_is_other() {
        test_single_token("-", Token::Other('-'));
    }

    #[test]
    fn test_numbers() {
        test_single_token("42", Token::Number("42"));
        test_single_token("7.5", Token::Number("7.5"));
    }

    #[test]
    fn test_string_literal() {
        test_single_token("\"hello world\"", Token::StringLit("hello world"));
        test_single_token("\"\"", Token::StringLit(""));
    }

    #[test]
    fn test_string_with_escaped_quote() {
        test_single_token(r#""a\"b""#, Token::StringLit(r#"a\"b"#));
    }

    #[test]
    fn test_unterminated_string_degrades() {
        let tokens = tokenize("\"abc");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(kinds, vec![Token::Other('"'), Token::Identifier("abc")]);
    }

    #[test]
    fn test_comments_are_discarded() {
        let tokens = tokenize("// heading\npart /* inline */ Switch");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(kinds, vec![Token::Part, Token::Identifier("Switch")]);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        assert!(tokenize("/* never closed").is_empty());
    }

    #[test]
    fn test_unknown_characters_become_other() {
        let tokens = tokenize("part ⚡ port");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(kinds, vec![Token::Part, Token::Other('⚡'), Token::Port]);
    }

    #[test]
    fn test_spans_keep_absolute_offsets() {
        let tokens = tokenize("  part  Switch");
        assert_eq!(tokens[0].span, Span::new(2..6));
        assert_eq!(tokens[1].span, Span::new(8..14));
    }

    #[test]
    fn test_span_survives_comment_prefix() {
        let source = "/* pad */ package";
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 1);
        let span = tokens[0].span;
        assert_eq!(&source[span.start()..span.end()], "package");
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_full_statement() {
        let tokens = tokenize("transition Off -> On [ pressed ];");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Transition,
                Token::Identifier("Off"),
                Token::Arrow,
                Token::Identifier("On"),
                Token::LBracket,
                Token::Identifier("pressed"),
                Token::RBracket,
                Token::Semicolon,
            ]
        );
    }
}
