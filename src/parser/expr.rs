use log::trace;

use crate::{
    ast::ast::{BinaryOperator, Condition, Conversion, Expr, LiteralKind, RelOperator},
    lexer::tokens::TokenKind,
};

use super::{lookups::Nonterminal, parser::Parser};

/// Expr -> Term TermTail | ε
pub fn parse_expr(parser: &mut Parser) -> Expr {
    parser.check(Nonterminal::Expr);

    if !parser.predicts(Nonterminal::Expr) {
        trace!("predict expr -> epsilon");
        return Expr::Empty;
    }

    trace!("predict expr -> term term_tail");
    let term = parse_term(parser);
    parse_term_tail(parser, term)
}

/// TermTail -> AddOp Term TermTail | ε
///
/// `left` is the operand already parsed; each operator pairs the operand
/// before it with the whole remaining tail. The rule is applied in a loop
/// and the tree is folded from the right afterwards.
pub fn parse_term_tail(parser: &mut Parser, left: Expr) -> Expr {
    let mut operands = vec![left];
    let mut operators = vec![];

    loop {
        parser.check(Nonterminal::TermTail);

        if !parser.predicts(Nonterminal::TermTail) {
            trace!("predict term_tail -> epsilon");
            break;
        }

        trace!("predict term_tail -> add_op term term_tail");
        let Some(operator) = parse_add_op(parser) else {
            break;
        };
        operators.push(operator);
        operands.push(parse_term(parser));
    }

    fold_right(operands, operators)
}

/// Term -> Factor FactorTail | ε
pub fn parse_term(parser: &mut Parser) -> Expr {
    parser.check(Nonterminal::Term);

    if !parser.predicts(Nonterminal::Term) {
        trace!("predict term -> epsilon");
        return Expr::Empty;
    }

    trace!("predict term -> factor factor_tail");
    let factor = parse_factor(parser);
    parse_factor_tail(parser, factor)
}

/// FactorTail -> MulOp Factor FactorTail | ε
pub fn parse_factor_tail(parser: &mut Parser, left: Expr) -> Expr {
    let mut operands = vec![left];
    let mut operators = vec![];

    loop {
        parser.check(Nonterminal::FactorTail);

        if !parser.predicts(Nonterminal::FactorTail) {
            trace!("predict factor_tail -> epsilon");
            break;
        }

        trace!("predict factor_tail -> mul_op factor factor_tail");
        let Some(operator) = parse_mul_op(parser) else {
            break;
        };
        operators.push(operator);
        operands.push(parse_factor(parser));
    }

    fold_right(operands, operators)
}

// `a op1 b op2 c` becomes `(op1 a (op2 b c))`. There is always one more
// operand than operators.
fn fold_right(mut operands: Vec<Expr>, mut operators: Vec<BinaryOperator>) -> Expr {
    let mut tail = operands.pop().unwrap_or(Expr::Empty);

    while let Some(operator) = operators.pop() {
        let left = operands.pop().unwrap_or(Expr::Empty);
        tail = Expr::binary(operator, left, tail);
    }

    tail
}

/// Factor -> inum | rnum | id | ( Expr ) | trunc ( Expr ) | float ( Expr ) | ε
pub fn parse_factor(parser: &mut Parser) -> Expr {
    parser.check(Nonterminal::Factor);

    match parser.current_token_kind() {
        TokenKind::Inum => {
            trace!("predict factor -> inum");
            parse_literal(parser, TokenKind::Inum, LiteralKind::Integer)
        }
        TokenKind::Rnum => {
            trace!("predict factor -> rnum");
            parse_literal(parser, TokenKind::Rnum, LiteralKind::Real)
        }
        TokenKind::Id => {
            trace!("predict factor -> id");
            let name = parser.current_token().value.clone();
            parser.expect(TokenKind::Id);
            Expr::Identifier(name)
        }
        TokenKind::Lparen => {
            trace!("predict factor -> ( expr )");
            parse_grouping_expr(parser)
        }
        TokenKind::Trunc => {
            trace!("predict factor -> trunc ( expr )");
            parse_conversion_expr(parser, TokenKind::Trunc, Conversion::Trunc)
        }
        TokenKind::Float => {
            trace!("predict factor -> float ( expr )");
            parse_conversion_expr(parser, TokenKind::Float, Conversion::Float)
        }
        _ => {
            trace!("predict factor -> epsilon");
            Expr::Empty
        }
    }
}

fn parse_literal(parser: &mut Parser, token: TokenKind, kind: LiteralKind) -> Expr {
    let value = parser.current_token().value.clone();
    parser.expect(token);
    Expr::Literal { kind, value }
}

fn parse_grouping_expr(parser: &mut Parser) -> Expr {
    parser.expect(TokenKind::Lparen);
    let expr = parse_expr(parser);
    parser.expect(TokenKind::Rparen);

    expr
}

fn parse_conversion_expr(parser: &mut Parser, keyword: TokenKind, conversion: Conversion) -> Expr {
    parser.expect(keyword);
    parser.expect(TokenKind::Lparen);
    let operand = parse_expr(parser);
    parser.expect(TokenKind::Rparen);

    Expr::Conversion {
        conversion,
        operand: Box::new(operand),
    }
}

/// AddOp -> + | - | ε
pub fn parse_add_op(parser: &mut Parser) -> Option<BinaryOperator> {
    parser.check(Nonterminal::AddOp);
    parse_operator(parser, Nonterminal::AddOp)
}

/// MulOp -> * | / | ε
pub fn parse_mul_op(parser: &mut Parser) -> Option<BinaryOperator> {
    parser.check(Nonterminal::MulOp);
    parse_operator(parser, Nonterminal::MulOp)
}

fn parse_operator(parser: &mut Parser, nonterminal: Nonterminal) -> Option<BinaryOperator> {
    let kind = parser.current_token_kind();
    let operator = if parser.predicts(nonterminal) {
        BinaryOperator::from_token(kind)
    } else {
        None
    };

    match operator {
        Some(operator) => {
            trace!("predict {:?} -> {}", nonterminal, kind.name());
            parser.expect(kind);
            Some(operator)
        }
        None => {
            trace!("predict {:?} -> epsilon", nonterminal);
            None
        }
    }
}

/// Cond -> Expr RelOp Expr | ε
pub fn parse_cond(parser: &mut Parser) -> Option<Condition> {
    parser.check(Nonterminal::Cond);

    if !parser.predicts(Nonterminal::Cond) {
        trace!("predict cond -> epsilon");
        return None;
    }

    trace!("predict cond -> expr rel_op expr");
    let left = parse_expr(parser);
    let operator = parse_rel_op(parser);
    let right = parse_expr(parser);

    Some(Condition {
        operator,
        left,
        right,
    })
}

/// RelOp -> == | <> | < | > | <= | >= | ε
pub fn parse_rel_op(parser: &mut Parser) -> Option<RelOperator> {
    parser.check(Nonterminal::RelOp);

    let kind = parser.current_token_kind();
    let operator = if parser.predicts(Nonterminal::RelOp) {
        RelOperator::from_token(kind)
    } else {
        None
    };

    match operator {
        Some(operator) => {
            trace!("predict rel_op -> {}", kind.name());
            parser.expect(kind);
            Some(operator)
        }
        None => {
            trace!("predict rel_op -> epsilon");
            None
        }
    }
}
