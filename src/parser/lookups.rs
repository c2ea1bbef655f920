use std::collections::{HashMap, HashSet};

use crate::lexer::tokens::TokenKind;

/// The grammar's nonterminals, one parsing procedure each.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Nonterminal {
    Program,
    StmtList,
    Stmt,
    Expr,
    TermTail,
    Term,
    FactorTail,
    Factor,
    AddOp,
    MulOp,
    Cond,
    TypePrefix,
    RelOp,
}

impl Nonterminal {
    pub const ALL: [Nonterminal; 13] = [
        Nonterminal::Program,
        Nonterminal::StmtList,
        Nonterminal::Stmt,
        Nonterminal::Expr,
        Nonterminal::TermTail,
        Nonterminal::Term,
        Nonterminal::FactorTail,
        Nonterminal::Factor,
        Nonterminal::AddOp,
        Nonterminal::MulOp,
        Nonterminal::Cond,
        Nonterminal::TypePrefix,
        Nonterminal::RelOp,
    ];

    /// Name used in syntax diagnostics.
    pub fn short_name(&self) -> &'static str {
        match self {
            Nonterminal::Program => "P",
            Nonterminal::StmtList => "SL",
            Nonterminal::Stmt => "S",
            Nonterminal::Expr => "E",
            Nonterminal::TermTail => "TT",
            Nonterminal::Term => "T",
            Nonterminal::FactorTail => "FT",
            Nonterminal::Factor => "F",
            Nonterminal::AddOp => "AO",
            Nonterminal::MulOp => "MO",
            Nonterminal::Cond => "C",
            Nonterminal::TypePrefix => "TP",
            Nonterminal::RelOp => "RO",
        }
    }
}

/// Prediction data for one nonterminal.
#[derive(Debug, Clone, Default)]
pub struct GrammarEntry {
    pub nullable: bool,
    pub first: HashSet<TokenKind>,
    pub follow: HashSet<TokenKind>,
}

impl GrammarEntry {
    /// Whether `kind` may legally appear when this nonterminal is expected.
    pub fn accepts(&self, kind: TokenKind) -> bool {
        self.first.contains(&kind) || (self.nullable && self.follow.contains(&kind))
    }

    /// Whether panic-mode recovery may stop at `kind`.
    pub fn synchronizes_on(&self, kind: TokenKind) -> bool {
        self.first.contains(&kind) || self.follow.contains(&kind) || kind == TokenKind::EOF
    }
}

/// FIRST sets, FOLLOW sets and nullability for every nonterminal.
///
/// Built once by the driver and shared by reference with the parser.
#[derive(Debug, Clone)]
pub struct GrammarTables {
    entries: HashMap<Nonterminal, GrammarEntry>,
}

impl Default for GrammarTables {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarTables {
    pub fn new() -> Self {
        let mut tables = GrammarTables {
            entries: HashMap::new(),
        };
        create_grammar_lookups(&mut tables);
        tables
    }

    pub fn get(&self, nonterminal: Nonterminal) -> &GrammarEntry {
        // Every nonterminal is registered in `create_grammar_lookups`.
        &self.entries[&nonterminal]
    }

    pub fn nullable(&mut self, nonterminal: Nonterminal, nullable: bool) {
        self.entries.entry(nonterminal).or_default().nullable = nullable;
    }

    pub fn first(&mut self, nonterminal: Nonterminal, kinds: &[TokenKind]) {
        self.entries
            .entry(nonterminal)
            .or_default()
            .first
            .extend(kinds.iter().copied());
    }

    pub fn follow(&mut self, nonterminal: Nonterminal, kinds: &[TokenKind]) {
        self.entries
            .entry(nonterminal)
            .or_default()
            .follow
            .extend(kinds.iter().copied());
    }
}

const STMT_START: [TokenKind; 7] = [
    TokenKind::Int,
    TokenKind::Real,
    TokenKind::Id,
    TokenKind::Read,
    TokenKind::Write,
    TokenKind::If,
    TokenKind::While,
];

const FACTOR_START: [TokenKind; 6] = [
    TokenKind::Lparen,
    TokenKind::Id,
    TokenKind::Inum,
    TokenKind::Rnum,
    TokenKind::Trunc,
    TokenKind::Float,
];

const REL_OPS: [TokenKind; 6] = [
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::Le,
    TokenKind::Ge,
];

const ADD_OPS: [TokenKind; 2] = [TokenKind::Add, TokenKind::Sub];
const MUL_OPS: [TokenKind; 2] = [TokenKind::Mul, TokenKind::Div];

// FOLLOW(E): what may come after a complete expression.
const EXPR_END: [TokenKind; 10] = [
    TokenKind::Rparen,
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::Le,
    TokenKind::Ge,
    TokenKind::Then,
    TokenKind::Do,
    TokenKind::Semi,
];

pub fn create_grammar_lookups(tables: &mut GrammarTables) {
    // Every nonterminal has an epsilon production so that error checks
    // and recovery work the same way everywhere.
    for nonterminal in Nonterminal::ALL {
        tables.nullable(nonterminal, true);
    }

    // Statements
    tables.first(Nonterminal::Program, &STMT_START);
    tables.first(Nonterminal::Program, &[TokenKind::EOF]);
    tables.follow(Nonterminal::Program, &[TokenKind::EOF]);

    tables.first(Nonterminal::StmtList, &STMT_START);
    tables.follow(Nonterminal::StmtList, &[TokenKind::End, TokenKind::EOF]);

    tables.first(Nonterminal::Stmt, &STMT_START);
    tables.follow(Nonterminal::Stmt, &[TokenKind::Semi]);

    tables.first(Nonterminal::TypePrefix, &[TokenKind::Int, TokenKind::Real]);
    tables.follow(Nonterminal::TypePrefix, &[TokenKind::Id]);

    tables.first(Nonterminal::Cond, &FACTOR_START);
    tables.follow(Nonterminal::Cond, &[TokenKind::Then, TokenKind::Do]);

    // Expressions
    tables.first(Nonterminal::Expr, &FACTOR_START);
    tables.follow(Nonterminal::Expr, &EXPR_END);

    tables.first(Nonterminal::TermTail, &ADD_OPS);
    tables.follow(Nonterminal::TermTail, &EXPR_END);

    tables.first(Nonterminal::Term, &FACTOR_START);
    tables.follow(Nonterminal::Term, &EXPR_END);
    tables.follow(Nonterminal::Term, &ADD_OPS);

    tables.first(Nonterminal::FactorTail, &MUL_OPS);
    tables.follow(Nonterminal::FactorTail, &EXPR_END);
    tables.follow(Nonterminal::FactorTail, &ADD_OPS);

    tables.first(Nonterminal::Factor, &FACTOR_START);
    tables.follow(Nonterminal::Factor, &EXPR_END);
    tables.follow(Nonterminal::Factor, &ADD_OPS);
    tables.follow(Nonterminal::Factor, &MUL_OPS);

    // Operators
    tables.first(Nonterminal::AddOp, &ADD_OPS);
    tables.follow(Nonterminal::AddOp, &FACTOR_START);

    tables.first(Nonterminal::MulOp, &MUL_OPS);
    tables.follow(Nonterminal::MulOp, &FACTOR_START);

    tables.first(Nonterminal::RelOp, &REL_OPS);
    tables.follow(Nonterminal::RelOp, &FACTOR_START);
}
