use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, parser::lookups::Nonterminal, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        !matches!(self.internal_error, ErrorImpl::SyntaxError { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidRealNumber { .. } => "InvalidRealNumber",
            ErrorImpl::ExpectedEquals { .. } => "ExpectedEquals",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidRealNumber { .. } => ErrorTip::Suggestion(String::from(
                "a real number needs digits after `.` and after `e`",
            )),
            ErrorImpl::ExpectedEquals { after, .. } => {
                ErrorTip::Suggestion(format!("did you mean `{}=`?", after))
            }
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::SyntaxError {
                expected: Some(expected),
                ..
            } => ErrorTip::Suggestion(format!("expected `{}`", expected.name())),
            ErrorImpl::SyntaxError { expected: None, .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Where a syntax error was detected: inside the error check of a
/// nonterminal procedure, or by a failed Match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxContext {
    Nonterminal(Nonterminal),
    Match,
}

impl Display for SyntaxContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxContext::Nonterminal(nonterminal) => write!(f, "{}", nonterminal.short_name()),
            SyntaxContext::Match => write!(f, "match"),
        }
    }
}

/// Spells a character the way diagnostics show it: `'x' (0x78)`.
pub fn quote_char(character: &char) -> String {
    format!("'{}' (0x{:x})", character.escape_debug(), *character as u32)
}

pub fn describe_char(character: &Option<char>) -> String {
    match character {
        Some(c) => quote_char(c),
        None => String::from("end of input"),
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Error: invalid real number: {token}")]
    InvalidRealNumber { token: String },
    #[error("expected '=' after '{after}', got {}", describe_char(.found))]
    ExpectedEquals { after: char, found: Option<char> },
    #[error("unexpected character {}", quote_char(.character))]
    UnexpectedCharacter { character: char },
    #[error("found syntax error at {context} for the current token {token}")]
    SyntaxError {
        context: SyntaxContext,
        token: String,
        expected: Option<TokenKind>,
    },
}
