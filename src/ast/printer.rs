//! Parenthesized-prefix serialization of the AST.
//!
//! Every shape the front end prints lives here:
//!
//! ```text
//! program      [ <stmts> ]
//! int decl     (int "x")\n(:= "x"<e>)\n
//! real decl    (real "x"<e>)\n
//! assignment   (:= "x"<e>)
//! read int     (int "x")\n(read "x")\n
//! read         (read "x")\n
//! write        (write<e>)
//! if           (if (<cond>)\n[<stmts>\n ])
//! while        (while (<cond>)\n[ <stmts>\n ])
//! condition    <relop><left><right>
//! binary       " (<op><left><right>)"
//! leaf         " \"<lexeme>\""
//! empty expr   " "
//! ```
//!
//! Expression fragments carry their own leading space, which is why
//! parents concatenate them without separators.

use std::fmt::{Display, Formatter, Result};

use super::ast::{BinaryOperator, Condition, DataType, Expr, Program, RelOperator, Stmt};

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for RelOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let symbol = match self {
            RelOperator::Eq => "==",
            RelOperator::Neq => "<>",
            RelOperator::Lt => "<",
            RelOperator::Gt => ">",
            RelOperator::Le => "<=",
            RelOperator::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for Expr {
    // Walks the right spine in a loop; operator chains nest to the right
    // and can be arbitrarily long.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut expr = self;
        let mut open = 0;

        loop {
            match expr {
                Expr::Empty => {
                    write!(f, " ")?;
                    break;
                }
                Expr::Literal { value, .. } => {
                    write!(f, " \"{}\"", value)?;
                    break;
                }
                Expr::Identifier(name) => {
                    write!(f, " \"{}\"", name)?;
                    break;
                }
                Expr::Binary {
                    operator,
                    left,
                    right,
                } => {
                    write!(f, " ({}{}", operator, left)?;
                    open += 1;
                    expr = &**right;
                }
                // Conversions print as their operand.
                Expr::Conversion { operand, .. } => expr = &**operand,
            }
        }

        for _ in 0..open {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if let Some(operator) = self.operator {
            write!(f, "{}", operator)?;
        }
        write!(f, "{}{}", self.left, self.right)
    }
}

fn write_body(f: &mut Formatter<'_>, body: &[Stmt]) -> Result {
    for stmt in body {
        write!(f, "{}", stmt)?;
    }
    Ok(())
}

fn write_condition(f: &mut Formatter<'_>, condition: &Option<Condition>) -> Result {
    match condition {
        Some(condition) => write!(f, "{}", condition),
        None => Ok(()),
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Declaration {
                data_type: DataType::Int,
                identifier,
                value,
            } => write!(f, "(int \"{0}\")\n(:= \"{0}\"{1})\n", identifier, value),
            // No separate declaration line for reals.
            Stmt::Declaration {
                data_type: DataType::Real,
                identifier,
                value,
            } => write!(f, "(real \"{}\"{})\n", identifier, value),
            Stmt::Assignment { identifier, value } => write!(f, "(:= \"{}\"{})", identifier, value),
            Stmt::Read {
                data_type: Some(DataType::Int),
                identifier,
            } => write!(f, "(int \"{0}\")\n(read \"{0}\")\n", identifier),
            Stmt::Read { identifier, .. } => write!(f, "(read \"{}\")\n", identifier),
            Stmt::Write { value } => write!(f, "(write{})", value),
            Stmt::If { condition, body } => {
                write!(f, "(if (")?;
                write_condition(f, condition)?;
                write!(f, ")\n[")?;
                write_body(f, body)?;
                write!(f, "\n ])")
            }
            Stmt::While { condition, body } => {
                write!(f, "(while (")?;
                write_condition(f, condition)?;
                write!(f, ")\n[ ")?;
                write_body(f, body)?;
                write!(f, "\n ])")
            }
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[ ")?;
        write_body(f, &self.body)?;
        write!(f, " ]")
    }
}
