use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map.insert("trunc", TokenKind::Trunc);
        map.insert("float", TokenKind::Float);
        map.insert("while", TokenKind::While);
        map.insert("int", TokenKind::Int);
        map.insert("i_num", TokenKind::Inum);
        map.insert("r_num", TokenKind::Rnum);
        map.insert("real", TokenKind::Real);
        map.insert("do", TokenKind::Do);
        map.insert("end", TokenKind::End);
        map.insert("then", TokenKind::Then);
        map.insert("if", TokenKind::If);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Read,
    Write,
    Id,
    Gets, // :=
    Add,
    Sub,
    Mul,
    Div,
    Lparen,
    Rparen,
    If,
    Then,
    End,
    While,
    Do,
    Inum,
    Rnum,
    Eq,  // ==
    Neq, // <>
    Lt,
    Gt,
    Le,
    Ge,
    Trunc,
    Real,
    Int,
    Float,
    Semi,
    EOF,
}

impl TokenKind {
    pub const ALL: [TokenKind; 29] = [
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::Id,
        TokenKind::Gets,
        TokenKind::Add,
        TokenKind::Sub,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Lparen,
        TokenKind::Rparen,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::End,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::Inum,
        TokenKind::Rnum,
        TokenKind::Eq,
        TokenKind::Neq,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::Le,
        TokenKind::Ge,
        TokenKind::Trunc,
        TokenKind::Real,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::Semi,
        TokenKind::EOF,
    ];

    /// Short human name, used in logs and tips.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Read => "read",
            TokenKind::Write => "write",
            TokenKind::Id => "id",
            TokenKind::Gets => "gets",
            TokenKind::Add => "add",
            TokenKind::Sub => "sub",
            TokenKind::Mul => "mul",
            TokenKind::Div => "div",
            TokenKind::Lparen => "lparen",
            TokenKind::Rparen => "rparen",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::End => "end",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Inum => "inum",
            TokenKind::Rnum => "rnum",
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
            TokenKind::Semi => "semi",
            TokenKind::EOF => "eof",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line description for trace logs; carries the lexeme only for
    /// tokens whose spelling varies.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::Id, TokenKind::Inum, TokenKind::Rnum]) {
            format!("{}: {}", self.kind.name(), self.value)
        } else {
            self.kind.name().to_string()
        }
    }
}
