use log::trace;

use crate::{
    ast::ast::{DataType, Program, Stmt},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_cond, parse_expr},
    lookups::Nonterminal,
    parser::Parser,
};

/// Program -> StmtList eof
pub fn parse_program(parser: &mut Parser) -> Program {
    parser.check(Nonterminal::Program);
    trace!("predict program -> stmt_list eof");

    let body = parse_stmt_list(parser);
    parser.expect(TokenKind::EOF);

    Program { body }
}

/// StmtList -> Stmt ';' StmtList | ε
///
/// Written as a loop; each round is one application of the recursive rule.
pub fn parse_stmt_list(parser: &mut Parser) -> Vec<Stmt> {
    let mut body = vec![];

    loop {
        parser.check(Nonterminal::StmtList);
        if !parser.predicts(Nonterminal::StmtList) {
            trace!("predict stmt_list -> epsilon");
            return body;
        }

        trace!("predict stmt_list -> stmt ; stmt_list");
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.expect(TokenKind::Semi);
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    parser.check(Nonterminal::Stmt);

    match parser.current_token_kind() {
        TokenKind::Int => Some(parse_decl_stmt(parser, DataType::Int)),
        TokenKind::Real => Some(parse_decl_stmt(parser, DataType::Real)),
        TokenKind::Id => Some(parse_assignment_stmt(parser)),
        TokenKind::Read => Some(parse_read_stmt(parser)),
        TokenKind::Write => Some(parse_write_stmt(parser)),
        TokenKind::If => Some(parse_if_stmt(parser)),
        TokenKind::While => Some(parse_while_stmt(parser)),
        _ => {
            trace!("predict stmt -> epsilon");
            None
        }
    }
}

fn identifier_lexeme(parser: &Parser) -> String {
    parser.current_token().value.clone()
}

// int id := Expr | real id := Expr
fn parse_decl_stmt(parser: &mut Parser, data_type: DataType) -> Stmt {
    trace!("predict stmt -> {:?} id := expr", data_type);
    parser.advance();

    let identifier = identifier_lexeme(parser);
    parser.expect(TokenKind::Id);
    parser.expect(TokenKind::Gets);
    let value = parse_expr(parser);

    Stmt::Declaration {
        data_type,
        identifier,
        value,
    }
}

// id := Expr
fn parse_assignment_stmt(parser: &mut Parser) -> Stmt {
    trace!("predict stmt -> id := expr");
    let identifier = identifier_lexeme(parser);
    parser.expect(TokenKind::Id);
    parser.expect(TokenKind::Gets);
    let value = parse_expr(parser);

    Stmt::Assignment { identifier, value }
}

// read TypePrefix id
fn parse_read_stmt(parser: &mut Parser) -> Stmt {
    trace!("predict stmt -> read type_prefix id");
    parser.expect(TokenKind::Read);

    let data_type = parse_type_prefix(parser);
    let identifier = identifier_lexeme(parser);
    parser.expect(TokenKind::Id);

    Stmt::Read {
        data_type,
        identifier,
    }
}

// write Expr
fn parse_write_stmt(parser: &mut Parser) -> Stmt {
    trace!("predict stmt -> write expr");
    parser.expect(TokenKind::Write);
    let value = parse_expr(parser);

    Stmt::Write { value }
}

// if Cond then StmtList end
fn parse_if_stmt(parser: &mut Parser) -> Stmt {
    trace!("predict stmt -> if cond then stmt_list end");
    parser.expect(TokenKind::If);
    let condition = parse_cond(parser);
    parser.expect(TokenKind::Then);
    let body = parse_stmt_list(parser);
    parser.expect(TokenKind::End);

    Stmt::If { condition, body }
}

// while Cond do StmtList end
fn parse_while_stmt(parser: &mut Parser) -> Stmt {
    trace!("predict stmt -> while cond do stmt_list end");
    parser.expect(TokenKind::While);
    let condition = parse_cond(parser);
    parser.expect(TokenKind::Do);
    let body = parse_stmt_list(parser);
    parser.expect(TokenKind::End);

    Stmt::While { condition, body }
}

/// TypePrefix -> int | real | ε
pub fn parse_type_prefix(parser: &mut Parser) -> Option<DataType> {
    parser.check(Nonterminal::TypePrefix);

    match parser.current_token_kind() {
        TokenKind::Int => {
            trace!("predict type_prefix -> int");
            parser.expect(TokenKind::Int);
            Some(DataType::Int)
        }
        TokenKind::Real => {
            trace!("predict type_prefix -> real");
            parser.expect(TokenKind::Real);
            Some(DataType::Real)
        }
        _ => {
            trace!("predict type_prefix -> epsilon");
            None
        }
    }
}
