//! Lexical analysis module.
//!
//! This module contains the scanner that turns program text into
//! (token kind, lexeme) pairs for the parser. It handles:
//!
//! - Identifiers and reserved words
//! - Integer and real literals, including exponents
//! - One- and two-character operators
//! - Diagnostics for malformed literals and stray characters
//!
//! The parser pulls tokens one at a time; the scanner never fails.

pub mod lexer;
pub mod tokens;
