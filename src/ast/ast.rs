use crate::lexer::tokens::TokenKind;

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Real,
}

/// Additive and multiplicative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(BinaryOperator::Add),
            TokenKind::Sub => Some(BinaryOperator::Sub),
            TokenKind::Mul => Some(BinaryOperator::Mul),
            TokenKind::Div => Some(BinaryOperator::Div),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOperator {
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl RelOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(RelOperator::Eq),
            TokenKind::Neq => Some(RelOperator::Neq),
            TokenKind::Lt => Some(RelOperator::Lt),
            TokenKind::Gt => Some(RelOperator::Gt),
            TokenKind::Le => Some(RelOperator::Le),
            TokenKind::Ge => Some(RelOperator::Ge),
            _ => None,
        }
    }
}

/// `trunc(...)` and `float(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Trunc,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Real,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An expression position that derived the empty string.
    Empty,
    Literal { kind: LiteralKind, value: String },
    Identifier(String),
    /// Built by the tail procedures: `right` is everything after the
    /// operator, so `a - b - c` nests as `a - (b - c)`.
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conversion {
        conversion: Conversion,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn integer(value: &str) -> Self {
        Expr::Literal {
            kind: LiteralKind::Integer,
            value: value.to_string(),
        }
    }

    pub fn real(value: &str) -> Self {
        Expr::Literal {
            kind: LiteralKind::Real,
            value: value.to_string(),
        }
    }

    pub fn identifier(name: &str) -> Self {
        Expr::Identifier(name.to_string())
    }

    fn spine_mut(&mut self) -> Option<&mut Box<Expr>> {
        match self {
            Expr::Binary { right, .. } => Some(right),
            Expr::Conversion { operand, .. } => Some(operand),
            _ => None,
        }
    }
}

impl Drop for Expr {
    // Unlinks the right spine one node at a time so long operator chains
    // are not dropped recursively.
    fn drop(&mut self) {
        let Some(child) = self.spine_mut() else {
            return;
        };
        let mut next = std::mem::replace(&mut **child, Expr::Empty);

        loop {
            let rest = match next.spine_mut() {
                Some(child) => std::mem::replace(&mut **child, Expr::Empty),
                None => break,
            };
            next = rest;
        }
    }
}

/// `left operator right` in an `if`/`while` header. The operator is
/// absent when RelOp took its epsilon production.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: Option<RelOperator>,
    pub left: Expr,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `int x := e` / `real x := e`
    Declaration {
        data_type: DataType,
        identifier: String,
        value: Expr,
    },
    Assignment {
        identifier: String,
        value: Expr,
    },
    /// `read [int|real] x`
    Read {
        data_type: Option<DataType>,
        identifier: String,
    },
    Write {
        value: Expr,
    },
    If {
        condition: Option<Condition>,
        body: Vec<Stmt>,
    },
    While {
        condition: Option<Condition>,
        body: Vec<Stmt>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}
