//! Parser state and the two primitives every grammar procedure uses.
//!
//! The parser is a predictive recursive-descent parser. Each nonterminal
//! procedure first calls `check`, which detects a token that cannot start
//! or follow the nonterminal and then discards tokens until one can
//! (Wirth's panic-mode recovery). Terminals are consumed with `expect`,
//! the Match operation, which reports a mismatch but never skips input.
//!
//! Diagnostics are collected rather than thrown; `parse` hands back either
//! the finished program or everything that went wrong.

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl, SyntaxContext},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{GrammarTables, Nonterminal},
    stmt::parse_program,
};

/// The main parser structure that maintains parsing state.
///
/// It exclusively owns the lexer for the duration of the parse and
/// borrows the grammar tables from the driver.
pub struct Parser<'a> {
    /// Token source, advanced only through `advance`
    lexer: Lexer,
    /// FIRST/FOLLOW/nullability for every nonterminal
    tables: &'a GrammarTables,
    /// One-token lookahead
    current: Token,
    /// Everything reported so far, lexical and syntactic, in order
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes the lookahead token.
    pub fn new(mut lexer: Lexer, tables: &'a GrammarTables) -> Self {
        let current = lexer.next_token();
        let errors = lexer.take_errors();

        Parser {
            lexer,
            tables,
            current,
            errors,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Scans the next token and returns the previous one.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        self.errors.extend(self.lexer.take_errors());
        std::mem::replace(&mut self.current, next)
    }

    /// Match: consumes the current token if it has the expected kind.
    ///
    /// On a mismatch a syntax error is recorded and nothing is consumed;
    /// the next `check` up the call chain resynchronizes.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Option<Token> {
        if self.current.kind == expected_kind {
            let token = self.advance();
            debug!("matched {}", token.debug());
            Some(token)
        } else {
            self.syntax_error(SyntaxContext::Match, Some(expected_kind));
            None
        }
    }

    /// Error check for `nonterminal`, with panic-mode recovery.
    ///
    /// Afterwards the current token is in FIRST ∪ FOLLOW of the
    /// nonterminal, or is `eof`.
    pub fn check(&mut self, nonterminal: Nonterminal) {
        let tables = self.tables;
        let entry = tables.get(nonterminal);

        if entry.accepts(self.current.kind) {
            return;
        }

        self.syntax_error(SyntaxContext::Nonterminal(nonterminal), None);

        while !entry.synchronizes_on(self.current.kind) {
            let skipped = self.advance();
            debug!("recovery in {} skipped {}", nonterminal.short_name(), skipped.debug());
        }
    }

    /// Whether the current token selects the non-epsilon production of
    /// `nonterminal`.
    pub fn predicts(&self, nonterminal: Nonterminal) -> bool {
        self.tables.get(nonterminal).first.contains(&self.current.kind)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the current position in the source.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    fn syntax_error(&mut self, context: SyntaxContext, expected: Option<TokenKind>) {
        let error = Error::new(
            ErrorImpl::SyntaxError {
                context,
                token: self.current.value.clone(),
                expected,
            },
            self.get_position(),
        );
        debug!("{} at offset {}", error, error.get_position().0);
        self.errors.push(error);
    }
}

/// Parses a whole program from `lexer`.
///
/// This is the main entry point for parsing. The tree is always built in
/// full, but it is only returned when nothing was reported along the way.
///
/// # Arguments
///
/// * `lexer` - Token source, owned by the parser until it finishes
/// * `tables` - Grammar tables built by the driver
///
/// # Returns
///
/// The program, or every diagnostic in the order it was found.
pub fn parse(lexer: Lexer, tables: &GrammarTables) -> Result<Program, Vec<Error>> {
    let mut parser = Parser::new(lexer, tables);
    let program = parse_program(&mut parser);

    if parser.has_errors() {
        Err(parser.errors)
    } else {
        Ok(program)
    }
}
