//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains a predictive (LL(1)) recursive-descent parser with
//! one procedure per grammar nonterminal. It handles:
//!
//! - Statement parsing (declarations, assignments, read/write, if, while)
//! - Expression parsing with `*`/`/` binding tighter than `+`/`-`
//! - Conditions for `if` and `while` headers
//! - Error detection through FIRST/FOLLOW membership and panic-mode recovery
//!
//! The FIRST/FOLLOW/nullability tables live in `lookups` and are built once
//! per run, then borrowed by the parser.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
