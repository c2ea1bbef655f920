//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs and for
//! the behavior of error detection and recovery:
//! - Declarations, assignments, read and write
//! - Expressions and operator precedence
//! - If and while statements with their conditions
//! - Syntax diagnostics and panic-mode recovery
//! - Consistency of the FIRST/FOLLOW tables with the procedures

use std::collections::HashSet;

use crate::ast::ast::{
    BinaryOperator, Condition, Conversion, DataType, Expr, Program, RelOperator, Stmt,
};
use crate::errors::errors::{Error, ErrorImpl, SyntaxContext};
use crate::lexer::{lexer::Lexer, tokens::TokenKind};

use super::expr::{parse_add_op, parse_factor, parse_mul_op, parse_rel_op};
use super::lookups::{GrammarTables, Nonterminal};
use super::parser::{parse, Parser};
use super::stmt::{parse_stmt, parse_type_prefix};

fn parse_source(source: &str) -> Result<Program, Vec<Error>> {
    let tables = GrammarTables::new();
    let lexer = Lexer::new(source.to_string(), Some("test.calc".to_string()));
    parse(lexer, &tables)
}

fn syntax_error(context: SyntaxContext, token: &str, expected: Option<TokenKind>) -> ErrorImpl {
    ErrorImpl::SyntaxError {
        context,
        token: token.to_string(),
        expected,
    }
}

// A lexeme that scans as `kind`.
fn sample(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Read => "read",
        TokenKind::Write => "write",
        TokenKind::Id => "x",
        TokenKind::Gets => ":=",
        TokenKind::Add => "+",
        TokenKind::Sub => "-",
        TokenKind::Mul => "*",
        TokenKind::Div => "/",
        TokenKind::Lparen => "(",
        TokenKind::Rparen => ")",
        TokenKind::If => "if",
        TokenKind::Then => "then",
        TokenKind::End => "end",
        TokenKind::While => "while",
        TokenKind::Do => "do",
        TokenKind::Inum => "1",
        TokenKind::Rnum => "1.5",
        TokenKind::Eq => "==",
        TokenKind::Neq => "<>",
        TokenKind::Lt => "<",
        TokenKind::Gt => ">",
        TokenKind::Le => "<=",
        TokenKind::Ge => ">=",
        TokenKind::Trunc => "trunc",
        TokenKind::Real => "real",
        TokenKind::Int => "int",
        TokenKind::Float => "float",
        TokenKind::Semi => ";",
        TokenKind::EOF => "",
    }
}

#[test]
fn test_parse_int_declaration() {
    let program = parse_source("int x := 3;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Declaration {
            data_type: DataType::Int,
            identifier: "x".to_string(),
            value: Expr::integer("3"),
        }]
    );
}

#[test]
fn test_parse_real_declaration() {
    let program = parse_source("real r := 2.5e3;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Declaration {
            data_type: DataType::Real,
            identifier: "r".to_string(),
            value: Expr::real("2.5e3"),
        }]
    );
}

#[test]
fn test_multiplication_binds_tighter() {
    let program = parse_source("write 1 + 2 * 3;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Write {
            value: Expr::binary(
                BinaryOperator::Add,
                Expr::integer("1"),
                Expr::binary(BinaryOperator::Mul, Expr::integer("2"), Expr::integer("3")),
            ),
        }]
    );

    let program = parse_source("x := a * b + c;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Assignment {
            identifier: "x".to_string(),
            value: Expr::binary(
                BinaryOperator::Add,
                Expr::binary(BinaryOperator::Mul, Expr::identifier("a"), Expr::identifier("b")),
                Expr::identifier("c"),
            ),
        }]
    );
}

#[test]
fn test_operator_chains_nest_to_the_right() {
    let program = parse_source("x := 1 - 2 - 3;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Assignment {
            identifier: "x".to_string(),
            value: Expr::binary(
                BinaryOperator::Sub,
                Expr::integer("1"),
                Expr::binary(BinaryOperator::Sub, Expr::integer("2"), Expr::integer("3")),
            ),
        }]
    );

    let program = parse_source("x := 8 / 4 / 2;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Assignment {
            identifier: "x".to_string(),
            value: Expr::binary(
                BinaryOperator::Div,
                Expr::integer("8"),
                Expr::binary(BinaryOperator::Div, Expr::integer("4"), Expr::integer("2")),
            ),
        }]
    );
}

#[test]
fn test_parse_grouping_and_conversions() {
    let program = parse_source("write trunc(1.5) * (a + 2);").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Write {
            value: Expr::binary(
                BinaryOperator::Mul,
                Expr::Conversion {
                    conversion: Conversion::Trunc,
                    operand: Box::new(Expr::real("1.5")),
                },
                Expr::binary(BinaryOperator::Add, Expr::identifier("a"), Expr::integer("2")),
            ),
        }]
    );

    let program = parse_source("y := float(n);").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Assignment {
            identifier: "y".to_string(),
            value: Expr::Conversion {
                conversion: Conversion::Float,
                operand: Box::new(Expr::identifier("n")),
            },
        }]
    );
}

#[test]
fn test_missing_expression_is_empty() {
    let program = parse_source("x := ;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::Assignment {
            identifier: "x".to_string(),
            value: Expr::Empty,
        }]
    );
}

#[test]
fn test_parse_whitespace_only() {
    assert_eq!(parse_source(" \n\t  \r\n").unwrap(), Program { body: vec![] });
    assert_eq!(parse_source("").unwrap(), Program { body: vec![] });
}

#[test]
fn test_parse_read_statements() {
    let program = parse_source("read int x; read real y; read z;").unwrap();

    assert_eq!(
        program.body,
        vec![
            Stmt::Read {
                data_type: Some(DataType::Int),
                identifier: "x".to_string(),
            },
            Stmt::Read {
                data_type: Some(DataType::Real),
                identifier: "y".to_string(),
            },
            Stmt::Read {
                data_type: None,
                identifier: "z".to_string(),
            },
        ]
    );
}

#[test]
fn test_parse_if_and_while() {
    let program =
        parse_source("if a < 3 then x := 1; end; while a >= 1 do write a; a := a - 1; end;")
            .unwrap();

    assert_eq!(
        program.body,
        vec![
            Stmt::If {
                condition: Some(Condition {
                    operator: Some(RelOperator::Lt),
                    left: Expr::identifier("a"),
                    right: Expr::integer("3"),
                }),
                body: vec![Stmt::Assignment {
                    identifier: "x".to_string(),
                    value: Expr::integer("1"),
                }],
            },
            Stmt::While {
                condition: Some(Condition {
                    operator: Some(RelOperator::Ge),
                    left: Expr::identifier("a"),
                    right: Expr::integer("1"),
                }),
                body: vec![
                    Stmt::Write {
                        value: Expr::identifier("a"),
                    },
                    Stmt::Assignment {
                        identifier: "a".to_string(),
                        value: Expr::binary(
                            BinaryOperator::Sub,
                            Expr::identifier("a"),
                            Expr::integer("1"),
                        ),
                    },
                ],
            },
        ]
    );
}

#[test]
fn test_parse_nested_blocks() {
    let program = parse_source("while x <> 0 do if x == 1 then write x; end; end;").unwrap();

    let Stmt::While { body, .. } = &program.body[0] else {
        panic!("expected a while statement, got {:?}", program.body[0]);
    };
    assert!(matches!(
        &body[0],
        Stmt::If {
            condition: Some(Condition {
                operator: Some(RelOperator::Eq),
                ..
            }),
            ..
        }
    ));
}

#[test]
fn test_empty_condition() {
    let program = parse_source("while do x := 1; end;").unwrap();

    assert_eq!(
        program.body,
        vec![Stmt::While {
            condition: None,
            body: vec![Stmt::Assignment {
                identifier: "x".to_string(),
                value: Expr::integer("1"),
            }],
        }]
    );
}

#[test]
fn test_missing_relational_operator() {
    let errors = parse_source("if a then write a; end;").unwrap_err();

    assert_eq!(
        errors[0].get_internal_error(),
        &syntax_error(SyntaxContext::Nonterminal(Nonterminal::RelOp), "then", None)
    );
    assert!(errors.iter().all(|error| !error.is_lexical()));
}

#[test]
fn test_match_does_not_consume() {
    let errors = parse_source("int 5 := 3;").unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors[0].get_internal_error(),
        &syntax_error(SyntaxContext::Match, "5", Some(TokenKind::Id))
    );
    assert_eq!(errors[0].get_position().0, 4);
    assert_eq!(
        errors[1].get_internal_error(),
        &syntax_error(SyntaxContext::Match, "5", Some(TokenKind::Gets))
    );
    assert_eq!(
        errors[2].get_internal_error(),
        &syntax_error(SyntaxContext::Nonterminal(Nonterminal::FactorTail), ":=", None)
    );
}

#[test]
fn test_missing_semicolon() {
    let errors = parse_source("write 2").unwrap_err();

    assert!(errors.contains(&Error::new(
        syntax_error(SyntaxContext::Match, "eof", Some(TokenKind::Semi)),
        crate::Position(7, std::rc::Rc::new("test.calc".to_string())),
    )));
}

#[test]
fn test_recovery_resumes_at_next_statement() {
    let errors = parse_source("x := 1; ) ; write 2;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_internal_error(),
        &syntax_error(SyntaxContext::Nonterminal(Nonterminal::StmtList), ")", None)
    );
    assert_eq!(errors[0].get_position().0, 8);
}

#[test]
fn test_stray_character_in_if() {
    let errors = parse_source("if x > 1 @ then write x; end;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_lexical());
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::UnexpectedCharacter { character: '@' }
    );
}

#[test]
fn test_malformed_real_suppresses_tree() {
    let errors = parse_source("x := 3.;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::InvalidRealNumber {
            token: "3.".to_string()
        }
    );
}

#[test]
fn test_diagnostics_keep_source_order() {
    let errors = parse_source("write 1 2; x := @;").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].get_internal_error(),
        &syntax_error(SyntaxContext::Nonterminal(Nonterminal::FactorTail), "2", None)
    );
    assert_eq!(
        errors[1].get_internal_error(),
        &ErrorImpl::UnexpectedCharacter { character: '@' }
    );
}

#[test]
fn test_recovery_terminates_on_garbage() {
    let inputs = [
        ") ) ; then do end := + * 3 4.5 ( if",
        "if",
        "while while while",
        "((((((((",
        "end end end;;;",
        "read read int real := :=",
        "x := trunc(float(trunc(",
    ];

    for input in inputs {
        let errors = parse_source(input).unwrap_err();
        assert!(!errors.is_empty(), "{:?} should be rejected", input);
    }
}

#[test]
fn test_parse_is_deterministic() {
    let source = "int a := 1; while a < 10 do a := a * 2; end; write a;";

    assert_eq!(parse_source(source), parse_source(source));
    assert_eq!(
        parse_source("x := 1 2;").unwrap_err(),
        parse_source("x := 1 2;").unwrap_err()
    );
}

#[test]
fn test_parser_collects_lexer_errors() {
    let tables = GrammarTables::new();
    let lexer = Lexer::new("@ x".to_string(), None);
    let mut parser = Parser::new(lexer, &tables);

    assert!(parser.has_errors());
    assert!(parser.errors()[0].is_lexical());
    assert_eq!(parser.current_token_kind(), TokenKind::Id);
    assert_eq!(parser.get_position().0, 2);
    assert_eq!(*parser.get_position().1, "stdin");

    parser.advance();
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn test_check_skips_to_synchronizing_token() {
    let tables = GrammarTables::new();
    let lexer = Lexer::new(") then 7 ;".to_string(), None);
    let mut parser = Parser::new(lexer, &tables);

    parser.check(Nonterminal::Stmt);

    assert_eq!(parser.current_token_kind(), TokenKind::Semi);
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn test_all_nonterminals_nullable() {
    let tables = GrammarTables::new();

    for nonterminal in Nonterminal::ALL {
        assert!(tables.get(nonterminal).nullable, "{:?}", nonterminal);
    }
}

#[test]
fn test_first_and_follow_are_disjoint() {
    let tables = GrammarTables::new();

    // Program lists eof in both sets; it is matched, not predicted.
    for nonterminal in Nonterminal::ALL.into_iter().filter(|n| *n != Nonterminal::Program) {
        let entry = tables.get(nonterminal);
        assert!(
            entry.first.is_disjoint(&entry.follow),
            "{:?} has a FIRST/FOLLOW conflict",
            nonterminal
        );
    }
}

#[test]
fn test_follow_sets_are_nested() {
    let tables = GrammarTables::new();
    let follow = |n: Nonterminal| tables.get(n).follow.clone();

    assert_eq!(follow(Nonterminal::Expr), follow(Nonterminal::TermTail));
    assert_eq!(follow(Nonterminal::Term), follow(Nonterminal::FactorTail));

    let mut expected: HashSet<TokenKind> = follow(Nonterminal::Expr);
    expected.extend([TokenKind::Add, TokenKind::Sub]);
    assert_eq!(follow(Nonterminal::Term), expected);

    expected.extend([TokenKind::Mul, TokenKind::Div]);
    assert_eq!(follow(Nonterminal::Factor), expected);

    let factor_first = tables.get(Nonterminal::Factor).first.clone();
    assert_eq!(follow(Nonterminal::AddOp), factor_first);
    assert_eq!(follow(Nonterminal::MulOp), factor_first);
    assert_eq!(follow(Nonterminal::RelOp), factor_first);

    assert!(tables.get(Nonterminal::RelOp).first.contains(&TokenKind::Ge));
    assert_eq!(tables.get(Nonterminal::RelOp).first.len(), 6);
}

#[test]
fn test_stmt_dispatch_covers_first() {
    let tables = GrammarTables::new();

    for kind in TokenKind::ALL {
        let mut parser = Parser::new(Lexer::new(sample(kind).to_string(), None), &tables);
        let stmt = parse_stmt(&mut parser);

        assert_eq!(
            stmt.is_some(),
            tables.get(Nonterminal::Stmt).first.contains(&kind),
            "{:?}",
            kind
        );
    }
}

#[test]
fn test_operator_dispatch_covers_first() {
    let tables = GrammarTables::new();
    let parser_for = |kind: TokenKind| Parser::new(Lexer::new(sample(kind).to_string(), None), &tables);

    for kind in TokenKind::ALL {
        let first = |n: Nonterminal| tables.get(n).first.contains(&kind);

        assert_eq!(parse_add_op(&mut parser_for(kind)).is_some(), first(Nonterminal::AddOp));
        assert_eq!(parse_mul_op(&mut parser_for(kind)).is_some(), first(Nonterminal::MulOp));
        assert_eq!(parse_rel_op(&mut parser_for(kind)).is_some(), first(Nonterminal::RelOp));
        assert_eq!(
            parse_type_prefix(&mut parser_for(kind)).is_some(),
            first(Nonterminal::TypePrefix)
        );
    }
}

#[test]
fn test_factor_dispatch_covers_first() {
    let tables = GrammarTables::new();
    let entry = tables.get(Nonterminal::Factor);

    for kind in TokenKind::ALL {
        if !entry.accepts(kind) {
            continue;
        }

        let source = format!("{} 1 )", sample(kind));
        let mut parser = Parser::new(Lexer::new(source, None), &tables);
        let factor = parse_factor(&mut parser);

        assert_eq!(factor != Expr::Empty, entry.first.contains(&kind), "{:?}", kind);
    }
}

#[test]
fn test_long_operator_chains() {
    const TERMS: usize = 100_000;

    for (operator, symbol) in [(BinaryOperator::Add, "+"), (BinaryOperator::Mul, "*")] {
        let source = format!("x := {}2;", format!("2 {} ", symbol).repeat(TERMS - 1));
        let program = parse_source(&source).unwrap();

        let Stmt::Assignment { value, .. } = &program.body[0] else {
            panic!("expected an assignment");
        };

        let mut depth = 0;
        let mut expr = value;
        while let Expr::Binary {
            operator: found,
            left,
            right,
        } = expr
        {
            assert_eq!(*found, operator);
            assert!(matches!(**left, Expr::Literal { .. }));
            depth += 1;
            expr = &**right;
        }

        assert_eq!(depth, TERMS - 1);
        assert!(matches!(expr, Expr::Literal { .. }));
    }
}
