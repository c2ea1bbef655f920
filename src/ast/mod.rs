/// AST (Abstract Syntax Tree) module
/// Contains the tree the parser builds and its serialized form
///
/// Submodules:
/// - ast: Node definitions for statements, expressions and conditions
/// - printer: The parenthesized-prefix serialization of the tree
pub mod ast;
pub mod printer;
