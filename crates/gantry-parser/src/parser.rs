//! Tolerant parser for SysML source tokens.
//!
//! This module transforms the token stream from the [`lexer`](super::lexer)
//! into the parse tree defined in [`tree`](super::tree). The public entry
//! point is [`build_tree`].
//!
//! Parsing dispatches on the leading token of each statement. Construct
//! keywords route to dedicated rules; a rule that finds its statement
//! malformed backtracks, and the dispatcher then skips the statement
//! token-by-token to the next boundary instead of failing. The only fatal
//! outcomes are an empty document (E100) and a body still open when input
//! ends (E101). Both dialects (`package`/`item`/`part`/`port`/`action`/
//! `state`/`transition` and legacy `block`/`extends`) share one dispatch
//! table, so they may mix freely in a document.

use indexmap::IndexMap;
use log::debug;
use winnow::{
    Parser as _,
    combinator::{opt, repeat},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
    tree::{Detail, NodeKind, ParseNode},
};

/// Context attached to fatal parser errors.
///
/// Carries the byte offset of the `{` that opened the body the parser was
/// still inside when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BodyOpenedAt(usize);

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<BodyOpenedAt>>>;

/// Plain backtrack error: the current rule does not apply.
fn backtrack() -> ErrMode<ContextError<BodyOpenedAt>> {
    ErrMode::Backtrack(ContextError::new())
}

/// Cut error for a body that reached end of input without its `}`.
///
/// Cut errors pass through the dispatch untouched, so the open-brace offset
/// survives all the way to [`build_tree`].
fn unclosed_body(open_start: usize) -> ErrMode<ContextError<BodyOpenedAt>> {
    let mut e = ContextError::new();
    e.push(BodyOpenedAt(open_start));
    ErrMode::Cut(e)
}

/// Match one specific token, returning its span.
fn just<'src>(input: &mut Input<'src>, expected: Token<'static>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'src>| (token.token == expected).then_some(token.span))
        .parse_next(input)
}

/// Parse an identifier token.
fn identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Identifier(name) => Some(name),
        _ => None,
    })
    .parse_next(input)
}

/// Parse the `def` keyword (tolerated after `part`, required after `item`).
fn def_keyword(input: &mut Input<'_>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Def))
        .void()
        .parse_next(input)
}

/// Check the next token without consuming it.
fn next_is(input: &Input<'_>, expected: Token<'static>) -> bool {
    input.peek_token().is_some_and(|t| t.token == expected)
}

/// Does this token start a recognized statement?
fn starts_statement(token: Token<'_>) -> bool {
    matches!(
        token,
        Token::Package
            | Token::Item
            | Token::Part
            | Token::Port
            | Token::Action
            | Token::State
            | Token::Transition
            | Token::Block
            | Token::Extends
    )
}

/// One token of an attribute value or transition guard, rendered as text.
///
/// Statement and body delimiters never belong to a value; string literals
/// contribute their inner text.
fn value_text(input: &mut Input<'_>) -> IResult<String> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Semicolon | Token::LBrace | Token::RBrace | Token::LBracket | Token::RBracket => {
            None
        }
        Token::StringLit(text) => Some(text.to_string()),
        other => Some(other.to_string()),
    })
    .parse_next(input)
}

/// Parse a `key = value;` attribute statement.
fn attribute(input: &mut Input<'_>) -> IResult<(String, String)> {
    let key = identifier(input)?;
    just(input, Token::Equals)?;
    let values: Vec<String> = repeat(1.., value_text).parse_next(input)?;
    just(input, Token::Semicolon)?;
    Ok((key.to_string(), values.join(" ")))
}

/// Parse a `: Type` reference suffix.
fn typed_ref<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    just(input, Token::Colon)?;
    identifier(input)
}

/// Parse a `[ guard ]` suffix of a transition, joined into one label.
fn guard(input: &mut Input<'_>) -> IResult<String> {
    just(input, Token::LBracket)?;
    let words: Vec<String> = repeat(0.., value_text).parse_next(input)?;
    just(input, Token::RBracket)?;
    Ok(words.join(" "))
}

/// Parse the members of a brace body, after its `{` has been consumed.
///
/// Attributes land in the attribute map, recognized constructs become child
/// nodes, anything else is skipped. Only the matching `}` closes the body;
/// reaching end of input instead is fatal.
fn body(
    input: &mut Input<'_>,
    open: Span,
) -> IResult<(Vec<ParseNode>, IndexMap<String, String>, Span)> {
    let mut children = Vec::new();
    let mut attributes = IndexMap::new();

    loop {
        let Some(next) = input.peek_token() else {
            return Err(unclosed_body(open.start()));
        };
        if next.token == Token::RBrace {
            let close = next.span;
            input.next_token();
            return Ok((children, attributes, close));
        }

        // `key = value;` first, so identifiers get a chance to be attributes
        // before the skip fallback eats them.
        let checkpoint = input.checkpoint();
        match attribute(input) {
            Ok((key, value)) => {
                attributes.insert(key, value);
                continue;
            }
            Err(ErrMode::Backtrack(_)) => input.reset(&checkpoint),
            Err(e) => return Err(e),
        }

        if let Some(node) = member(input)? {
            children.push(node);
        }
    }
}

/// Parse a `{ ... }` body or a `;` leaf terminator.
fn body_or_leaf(input: &mut Input<'_>) -> IResult<(Vec<ParseNode>, IndexMap<String, String>, Span)> {
    if next_is(input, Token::Semicolon) {
        let end = just(input, Token::Semicolon)?;
        return Ok((Vec::new(), IndexMap::new(), end));
    }
    let open = just(input, Token::LBrace)?;
    body(input, open)
}

/// `package <Name>? { ... }`
fn package<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Package)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let open = just(input, Token::LBrace)?;
    let (children, attributes, close) = body(input, open)?;

    let mut node = ParseNode::new(NodeKind::Package, name.unwrap_or(""), kw_span.union(close));
    node.children = children;
    node.attributes = attributes;
    Ok(node)
}

/// `item def <Name>? ( { ... } | ; )`
///
/// A bare `item` without `def` is not a construct here and falls back to
/// the skip path.
fn item_def<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Item)?;
    def_keyword(input)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let (children, attributes, end) = body_or_leaf(input)?;

    let mut node = ParseNode::new(NodeKind::ItemDef, name.unwrap_or(""), kw_span.union(end));
    node.children = children;
    node.attributes = attributes;
    Ok(node)
}

/// `part def? <Name>? (: <Type>)? ( { ... } | ; )`
///
/// The `def` is tolerated so definition and usage spellings both land on
/// the same node kind.
fn part<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Part)?;
    let _ = opt(def_keyword).parse_next(input)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let type_name = opt(typed_ref).parse_next(input)?;
    let (children, attributes, end) = body_or_leaf(input)?;

    let mut node = ParseNode::new(NodeKind::Part, name.unwrap_or(""), kw_span.union(end));
    node.children = children;
    node.attributes = attributes;
    if let Some(type_name) = type_name {
        node.detail = Detail::TypedRef {
            type_name: type_name.to_string(),
        };
    }
    Ok(node)
}

/// `port <Name>? (: <Type>)? ( { ... } | ; )`
fn port<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Port)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let type_name = opt(typed_ref).parse_next(input)?;
    let (children, attributes, end) = body_or_leaf(input)?;

    let mut node = ParseNode::new(NodeKind::Port, name.unwrap_or(""), kw_span.union(end));
    node.children = children;
    node.attributes = attributes;
    if let Some(type_name) = type_name {
        node.detail = Detail::TypedRef {
            type_name: type_name.to_string(),
        };
    }
    Ok(node)
}

/// `action <Name>? ( { ... } | ; )`
fn action<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Action)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let (children, attributes, end) = body_or_leaf(input)?;

    let mut node = ParseNode::new(NodeKind::Action, name.unwrap_or(""), kw_span.union(end));
    node.children = children;
    node.attributes = attributes;
    Ok(node)
}

/// `state <Name>? { ... }` makes a state machine, `state <Name>;` a state leaf.
fn state<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::State)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }

    if next_is(input, Token::Semicolon) {
        let end = just(input, Token::Semicolon)?;
        return Ok(ParseNode::new(
            NodeKind::State,
            name.unwrap_or(""),
            kw_span.union(end),
        ));
    }

    let open = just(input, Token::LBrace)?;
    let (children, attributes, close) = body(input, open)?;

    let mut node = ParseNode::new(
        NodeKind::StateMachine,
        name.unwrap_or(""),
        kw_span.union(close),
    );
    node.children = children;
    node.attributes = attributes;
    Ok(node)
}

/// `transition <A> -> <B> ([ guard ])? ;`
fn transition<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Transition)?;
    let source = identifier(input)?;
    just(input, Token::Arrow)?;
    let target = identifier(input)?;
    let guard_label = opt(guard).parse_next(input)?.filter(|g| !g.is_empty());
    let end = just(input, Token::Semicolon)?;

    Ok(
        ParseNode::new(NodeKind::Transition, "", kw_span.union(end)).with_detail(
            Detail::Transition {
                source: source.to_string(),
                target: target.to_string(),
                guard: guard_label,
            },
        ),
    )
}

/// Legacy `block <Name>? (extends <Super>)? { ... }`.
///
/// A header `extends` is recorded as the block's detail; the body-level
/// `extends <Super>;` form becomes a child node instead.
fn block<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Block)?;
    let name = opt(identifier).parse_next(input)?;
    if name.is_none() && !next_is(input, Token::LBrace) {
        return Err(backtrack());
    }
    let supertype = opt(header_extends).parse_next(input)?;
    let open = just(input, Token::LBrace)?;
    let (children, attributes, close) = body(input, open)?;

    let mut node = ParseNode::new(NodeKind::Block, name.unwrap_or(""), kw_span.union(close));
    node.children = children;
    node.attributes = attributes;
    if let Some(supertype) = supertype {
        node.detail = Detail::Extends {
            supertype: supertype.to_string(),
        };
    }
    Ok(node)
}

/// `extends <Super>` in a block header.
fn header_extends<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    just(input, Token::Extends)?;
    identifier(input)
}

/// Legacy body-level `extends <Super>;` statement.
fn extends<'src>(input: &mut Input<'src>) -> IResult<ParseNode> {
    let kw_span = just(input, Token::Extends)?;
    let supertype = identifier(input)?;
    let end = just(input, Token::Semicolon)?;

    Ok(
        ParseNode::new(NodeKind::Extends, "", kw_span.union(end)).with_detail(Detail::Extends {
            supertype: supertype.to_string(),
        }),
    )
}

/// Parse one statement: a construct node, or `None` after skipping.
///
/// Rules signal "this statement is not mine after all" by backtracking; the
/// dispatcher then rewinds and hands the statement to [`skip_statement`].
/// Cut errors (an unclosed body) pass straight through.
fn member<'src>(input: &mut Input<'src>) -> IResult<Option<ParseNode>> {
    let Some(first) = input.peek_token() else {
        return Ok(None);
    };
    let start = first.span;

    let checkpoint = input.checkpoint();
    let attempt = match first.token {
        Token::Package => package(input),
        Token::Item => item_def(input),
        Token::Part => part(input),
        Token::Port => port(input),
        Token::Action => action(input),
        Token::State => state(input),
        Token::Transition => transition(input),
        Token::Block => block(input),
        Token::Extends => extends(input),
        _ => Err(backtrack()),
    };

    match attempt {
        Ok(node) => Ok(Some(node)),
        Err(ErrMode::Backtrack(_)) => {
            debug!(offset = start.start(); "skipping unrecognized statement");
            input.reset(&checkpoint);
            skip_statement(input)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Skip one unrecognized statement.
///
/// The first token is consumed unconditionally, guaranteeing forward
/// progress on arbitrarily malformed input. Skipping then runs to the next
/// `;` at depth zero, past the `}` closing a brace body begun inside the
/// skipped text, or stops (without consuming) in front of the `}` belonging
/// to the enclosing body or the keyword starting the next statement. A brace
/// opened inside the skipped text still has to close before input ends.
fn skip_statement(input: &mut Input<'_>) -> IResult<()> {
    let mut depth = 0usize;
    let mut opened: Option<Span> = None;

    match input.next_token() {
        None => return Ok(()),
        Some(first) => match first.token {
            Token::Semicolon | Token::RBrace => return Ok(()),
            Token::LBrace => {
                depth = 1;
                opened = Some(first.span);
            }
            _ => {}
        },
    }

    loop {
        let Some(next) = input.peek_token() else {
            if depth == 0 {
                return Ok(());
            }
            let start = opened.map(|span| span.start()).unwrap_or(0);
            return Err(unclosed_body(start));
        };

        match next.token {
            Token::Semicolon if depth == 0 => {
                input.next_token();
                return Ok(());
            }
            // The enclosing body owns this brace; stop in front of it.
            Token::RBrace if depth == 0 => return Ok(()),
            token if depth == 0 && starts_statement(token) => return Ok(()),
            Token::LBrace => {
                if opened.is_none() {
                    opened = Some(next.span);
                }
                depth += 1;
                input.next_token();
            }
            Token::RBrace => {
                depth -= 1;
                input.next_token();
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {
                input.next_token();
            }
        }
    }
}

/// Build a parse tree from tokens.
///
/// Normally yields a single root package, but malformed input may yield
/// several top-level nodes. Unrecognized statements degrade to skips; the
/// fatal outcomes are an empty document and a body never closed.
pub(crate) fn build_tree<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Vec<ParseNode>, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::error("empty document")
            .with_code(ErrorCode::E100)
            .with_help("provide at least one definition, e.g. `package Main { }`"));
    }

    let mut input = TokenSlice::new(tokens);
    let mut roots = Vec::new();

    while input.peek_token().is_some() {
        match member(&mut input) {
            Ok(Some(node)) => roots.push(node),
            Ok(None) => {}
            Err(e) => return Err(convert_error(e, tokens)),
        }
    }

    Ok(roots)
}

/// Convert a fatal winnow error into a diagnostic.
fn convert_error(
    error: ErrMode<ContextError<BodyOpenedAt>>,
    tokens: &[PositionedToken<'_>],
) -> Diagnostic {
    let opened_at = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            e.context().next().map(|BodyOpenedAt(offset)| *offset)
        }
        ErrMode::Incomplete(_) => None,
    };

    let eof = tokens.last().map(|t| t.span.end()).unwrap_or(0);
    let start = opened_at.unwrap_or(eof);

    Diagnostic::error("body is never closed")
        .with_code(ErrorCode::E101)
        .with_label(Span::new(start..start + 1), "body opened here")
        .with_secondary_label(Span::new(eof..eof), "input ends without the matching `}`")
        .with_help("add the matching `}`")
}
