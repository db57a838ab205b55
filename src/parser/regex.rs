use crate::nfa::{thompson, Nfa};
use crate::parser::token::{Token, Tokens};
use crate::parser::MalformedRegexError;
use crate::symbol::Symbol;

/// Recursive-descent parser over the token stream, building the NFA bottom-up with the
/// Thompson combinators as it goes. Grammar:
///
/// ```text
/// expression  := kleene+                        (implicit concatenation)
/// kleene      := basic ('*' | '+' | '?')?
/// basic       := char | '^' | '$' | '(' alternation ')'
/// alternation := expression ('|' expression)*
/// ```
///
/// Alternation only exists inside parentheses, and every parenthesized expression is a
/// capturing group.
pub(crate) struct Parser<'a> {
    tokens: Tokens<'a>,
    current: Option<Token>,
    consumed: bool,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(pattern: &'a str) -> Self {
        Self {
            tokens: Tokens::new(pattern),
            current: None,
            consumed: true,
        }
    }

    /// One-token lookahead: the stream is only advanced once the current token was consumed.
    fn peek(&mut self) -> Result<Option<Token>, MalformedRegexError> {
        if self.consumed {
            self.current = self.tokens.next().transpose()?;
            self.consumed = false;
        }
        Ok(self.current)
    }

    fn bump(&mut self) {
        self.consumed = true;
    }

    pub(crate) fn parse(mut self) -> Result<Nfa, MalformedRegexError> {
        let nfa = self
            .expression()?
            .ok_or(MalformedRegexError::MissingExpression)?;
        match self.peek()? {
            None => Ok(nfa.without_dead_ends()),
            Some(token) => Err(MalformedRegexError::UnexpectedToken(token.glyph())),
        }
    }

    fn expression(&mut self) -> Result<Option<Nfa>, MalformedRegexError> {
        let mut nfa: Option<Nfa> = None;
        while let Some(atom) = self.kleene()? {
            nfa = Some(match nfa {
                None => atom,
                Some(nfa) => thompson::concatenate(nfa, atom),
            });
        }
        Ok(nfa)
    }

    fn kleene(&mut self) -> Result<Option<Nfa>, MalformedRegexError> {
        let nfa = match self.basic()? {
            Some(nfa) => nfa,
            None => return Ok(None),
        };
        let nfa = match self.peek()? {
            Some(Token::Star) => {
                self.bump();
                thompson::kleene_star(nfa)
            }
            Some(Token::Plus) => {
                self.bump();
                thompson::kleene_plus(nfa)
            }
            Some(Token::Question) => {
                self.bump();
                thompson::optional(nfa)
            }
            _ => nfa,
        };
        Ok(Some(nfa))
    }

    fn basic(&mut self) -> Result<Option<Nfa>, MalformedRegexError> {
        match self.peek()? {
            Some(Token::Literal(c)) => {
                self.bump();
                Ok(Some(thompson::symbol(Symbol::Char(c))))
            }
            Some(Token::Caret) => {
                self.bump();
                Ok(Some(thompson::symbol(Symbol::Start)))
            }
            Some(Token::Dollar) => {
                self.bump();
                Ok(Some(thompson::symbol(Symbol::End)))
            }
            Some(Token::OpenParen) => {
                self.bump();
                self.group().map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Parses the alternatives of a parenthesized group, up to and including the closing
    /// parenthesis, and records the result as a capturing group.
    fn group(&mut self) -> Result<Nfa, MalformedRegexError> {
        let mut alternatives = Vec::new();
        loop {
            let alternative = self
                .expression()?
                .ok_or(MalformedRegexError::MissingExpression)?;
            alternatives.push(alternative);
            match self.peek()? {
                Some(Token::Pipe) => self.bump(),
                Some(Token::CloseParen) => {
                    self.bump();
                    break;
                }
                Some(token) => return Err(MalformedRegexError::UnexpectedToken(token.glyph())),
                None => return Err(MalformedRegexError::UnclosedGroup),
            }
        }
        let inner = if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            thompson::union(alternatives)
        };
        Ok(thompson::grouped(inner))
    }
}
