use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles the text a pattern matched at the lexer's position. Returns
/// `None` when the text produces no token (whitespace, malformed input).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

// Longest prefix the number state machine consumes before it either
// succeeds or gives up: d+ ( . ( d+ (e [+-]? d*)? )? | e [+-]? d* )?  |  . ( d+ (e [+-]? d*)? )?
const NUMBER_IMAGE: &str = r"^(?:[0-9]+(?:\.(?:[0-9]+(?:e[+-]?[0-9]*)?)?|e[+-]?[0-9]*)?|\.(?:[0-9]+(?:e[+-]?[0-9]*)?)?)";

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref REAL: Regex = Regex::new(r"^(?:[0-9]+\.[0-9]+|\.[0-9]+|[0-9]+)(?:e[+-]?[0-9]+)?$").unwrap();

    // Tried in order; every regex is anchored at the current position.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^[ \t\n\r\x0B\x0C]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(NUMBER_IMAGE).unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^:=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Gets, ":=") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: missing_equals_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Eq, "==") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: missing_equals_handler },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Le, "<=") },
        RegexPattern { regex: Regex::new("^<>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Neq, "<>") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lt, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ge, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Gt, ">") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Add, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Sub, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Mul, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Div, "/") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lparen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Rparen, ")") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semi, ";") },
    ];
}

/// Pull-based scanner. Each call to `next_token` produces one token;
/// problems are recorded as diagnostics and scanning carries on.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    errors: Vec<Error>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("stdin"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            errors: vec![],
        }
    }

    /// Scans the next token. Once the input is exhausted every call
    /// returns `eof`.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::from("eof"), self.span_of(0));
            }

            let remainder = &self.source[self.pos..];
            let found = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remainder)
                    .map(|matched| (pattern.handler, matched.as_str().to_string()))
            });

            match found {
                Some((handler, matched)) => {
                    if let Some(token) = handler(self, &matched) {
                        trace!("scanned {}", token.debug());
                        return token;
                    }
                }
                None => {
                    let character = self.at();
                    self.error(ErrorImpl::UnexpectedCharacter { character }, self.pos);
                    self.advance_n(character.len_utf8());
                }
            }
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    pub fn at(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Hands over the diagnostics recorded since the last call.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    fn error(&mut self, error: ErrorImpl, at: usize) {
        self.errors.push(Error::new(error, Position(at as u32, Rc::clone(&self.file))));
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Id);
    let token = MK_TOKEN!(kind, String::from(matched), lexer.span_of(matched.len()));

    lexer.advance_n(matched.len());
    Some(token)
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let kind = if INTEGER.is_match(matched) {
        TokenKind::Inum
    } else if REAL.is_match(matched) {
        TokenKind::Rnum
    } else {
        // The partial image is dropped; scanning resumes right after it.
        let start = lexer.pos;
        lexer.error(ErrorImpl::InvalidRealNumber { token: String::from(matched) }, start);
        lexer.advance_n(matched.len());
        return None;
    };

    let token = MK_TOKEN!(kind, String::from(matched), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

// A lone ':' or '='. Both it and the character after it are consumed.
fn missing_equals_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let start = lexer.pos;
    let after = lexer.at();
    let found = lexer.peek();

    lexer.error(ErrorImpl::ExpectedEquals { after, found }, start);
    lexer.advance_n(matched.len() + found.map_or(0, char::len_utf8));
    None
}

/// Scans a whole source, including the final `eof` token.
pub fn tokenize(source: String, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    let errors = lex.take_errors();
    (tokens, errors)
}
