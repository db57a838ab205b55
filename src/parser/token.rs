use crate::parser::MalformedRegexError;
use nom::branch::alt;
use nom::character::complete::{self, anychar, one_of};
use nom::combinator::{map, verify};
use nom::sequence::preceded;
use nom::IResult;

/// The characters that act as operators when unescaped.
const SPECIALS: &str = "()|*+?^$";
/// The characters a backslash may escape: every operator, plus the backslash itself.
const ESCAPABLE: &str = "()|*+?^$\\";

/// One token of the pattern language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(char),
    OpenParen,
    CloseParen,
    Pipe,
    Star,
    Plus,
    Question,
    Caret,
    Dollar,
}

impl Token {
    /// The source character this token was read from, for error messages.
    pub(crate) fn glyph(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::OpenParen => '(',
            Token::CloseParen => ')',
            Token::Pipe => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Question => '?',
            Token::Caret => '^',
            Token::Dollar => '$',
        }
    }
}

/// A lazy token stream over a pattern. Tokens are only recognized on demand.
#[derive(Debug, Clone)]
pub(crate) struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(pattern: &'a str) -> Self {
        Self { rest: pattern }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, MalformedRegexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match token(self.rest) {
            Ok((rest, token)) => {
                self.rest = rest;
                Some(Ok(token))
            }
            // Every character lexes on its own, so only escape sequences can fail here:
            // a backslash followed by a non-escapable character, or nothing at all.
            Err(_) => {
                let mut chars = self.rest.chars();
                chars.next();
                Some(Err(match chars.next() {
                    Some(c) => MalformedRegexError::InvalidEscape(c),
                    None => MalformedRegexError::TrailingBackslash,
                }))
            }
        }
    }
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((escaped_literal, special, literal))(input)
}

fn escaped_literal(input: &str) -> IResult<&str, Token> {
    map(preceded(complete::char('\\'), one_of(ESCAPABLE)), Token::Literal)(input)
}

fn special(input: &str) -> IResult<&str, Token> {
    map(one_of(SPECIALS), |c| match c {
        '(' => Token::OpenParen,
        ')' => Token::CloseParen,
        '|' => Token::Pipe,
        '*' => Token::Star,
        '+' => Token::Plus,
        '?' => Token::Question,
        '^' => Token::Caret,
        '$' => Token::Dollar,
        _ => unreachable!("one_of is restricted to the special characters"),
    })(input)
}

fn literal(input: &str) -> IResult<&str, Token> {
    map(
        verify(anychar, |&c| !ESCAPABLE.contains(c)),
        Token::Literal,
    )(input)
}
