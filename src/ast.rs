use crate::expr::{Expr, LiteralValue};
use crate::token::TokenType;

/// Renders expressions in parenthesized prefix form, e.g.
/// `(+ 1.0 (* 2.0 3.0))`.  Used by the `parse` subcommand and by tests to
/// assert on parse shapes.
pub struct Ast;

impl Ast {
    pub fn print(&self, expr: &Expr<'_>) -> String {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let op_str = match operator.token_type {
                    TokenType::PLUS => "+",

                    TokenType::MINUS => "-",

                    TokenType::STAR => "*",

                    TokenType::SLASH => "/",

                    TokenType::BANG_EQUAL => "!=",

                    TokenType::EQUAL_EQUAL => "==",

                    TokenType::GREATER => ">",

                    TokenType::GREATER_EQUAL => ">=",

                    TokenType::LESS => "<",

                    TokenType::LESS_EQUAL => "<=",

                    _ => unreachable!("Invalid binary operator"),
                };

                format!("({} {} {})", op_str, self.print(left), self.print(right))
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let op_str = match operator.token_type {
                    TokenType::OR => "or",

                    TokenType::AND => "and",

                    _ => unreachable!("Invalid logical operator"),
                };

                format!("({} {} {})", op_str, self.print(left), self.print(right))
            }

            Expr::Unary { operator, right } => {
                let op_str = match operator.token_type {
                    TokenType::MINUS => "-",

                    TokenType::BANG => "!",

                    _ => unreachable!("Invalid unary operator"),
                };

                format!("({} {})", op_str, self.print(right))
            }

            Expr::Literal(literal) => match literal {
                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 {
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }

                LiteralValue::Str(s) => s.to_string(),

                LiteralValue::True => "true".to_string(),

                LiteralValue::False => "false".to_string(),

                LiteralValue::Null => "null".to_string(),
            },

            Expr::Grouping(inner) => format!("(group {})", self.print(inner)),

            Expr::Variable(token) => token.lexeme.to_string(),

            Expr::Assign { name, value } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }
        }
    }
}
