//! Diagnostics produced while scanning and parsing.
//!
//! Nothing in the front end aborts on bad input. The lexer and the parser
//! record structured diagnostics and keep going; this module defines:
//!
//! - The `Error` structure pairing a diagnostic with its source position
//! - `ErrorImpl`, whose `Display` text is the line shown to the user
//! - `SyntaxContext`, naming the nonterminal (or Match) that detected an error
//! - Tips used when diagnostics are logged verbosely

pub mod errors;
