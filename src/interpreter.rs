//! Tree-walking evaluator for Spartie.
//!
//! Statements produce effects (output, variable mutation); expressions
//! produce [`Value`]s.  The active scope is threaded explicitly through every
//! `execute`/`evaluate_in` call: a block builds its child scope in the callee
//! frame, so the caller's scope survives unconditionally — including when an
//! error propagates out of the block.  All failures surface as structured
//! [`SpartieError`] results; the evaluator never terminates the process.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::environment::Environment;
use crate::error::{Result, SpartieError};
use crate::expr::{Expr, LiteralValue};
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// The evaluator.  Holds the global scope and the sink that `print`
/// statements write to; generic over the sink so tests can capture output.
pub struct Interpreter<W: Write> {
    globals: Rc<RefCell<Environment>>,
    out: W,
}

impl Interpreter<io::Stdout> {
    /// Creates an interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter printing to `out`.
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        Self { globals, out }
    }

    /// Runs a list of statements (a "program") against the global scope.
    pub fn run(&mut self, statements: &[Stmt<'_>]) -> Result<()> {
        debug!("Running {} statements", statements.len());

        let globals: Rc<RefCell<Environment>> = self.globals.clone();

        for stmt in statements {
            self.execute(stmt, &globals)?;
        }

        info!("Run completed successfully");
        Ok(())
    }

    /// Evaluates a single expression against the global scope (used by the
    /// `evaluate` subcommand and by tests).
    pub fn evaluate(&mut self, expr: &Expr<'_>) -> Result<Value> {
        let globals: Rc<RefCell<Environment>> = self.globals.clone();

        self.evaluate_in(expr, &globals)
    }

    /// Executes a single statement against the active scope `env`.
    fn execute(&mut self, stmt: &Stmt<'_>, env: &Rc<RefCell<Environment>>) -> Result<()> {
        match stmt {
            Stmt::Expression(expr) => {
                debug!("Evaluating expression statement");
                let _ = self.evaluate_in(expr, env)?;
                Ok(())
            }

            Stmt::Print(expr) => {
                debug!("Evaluating print statement");
                let value = self.evaluate_in(expr, env)?;
                writeln!(self.out, "{}", value)?;
                info!("Printed value: {}", value);
                Ok(())
            }

            Stmt::Var { name, initializer } => {
                debug!("Declaring variable '{}'", name.lexeme);
                let value = if let Some(expr) = initializer {
                    self.evaluate_in(expr, env)?
                } else {
                    Value::Null
                };
                // Declarations bind into the active scope, so a declaration
                // inside a block shadows instead of clobbering the outer
                // binding.
                env.borrow_mut().define(name.lexeme, value);
                Ok(())
            }

            Stmt::Block(statements) => {
                debug!("Entering block with {} statements", statements.len());
                let scope = Rc::new(RefCell::new(Environment::with_enclosing(env.clone())));
                for stmt in statements {
                    self.execute(stmt, &scope)?;
                }
                info!("Exited block");
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                debug!("Evaluating if condition");
                let cond_value = self.evaluate_in(condition, env)?;
                if is_truthy(&cond_value) {
                    self.execute(then_branch, env)?;
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt, env)?;
                }
                Ok(())
            }

            Stmt::While { condition, body } => {
                debug!("Entering while loop");
                // Iterative on purpose: one stack frame regardless of the
                // iteration count.
                while is_truthy(&self.evaluate_in(condition, env)?) {
                    self.execute(body, env)?;
                }
                info!("Exited while loop");
                Ok(())
            }
        }
    }

    /// Evaluates an expression against the active scope `env` and returns a
    /// [`Value`].
    fn evaluate_in(&mut self, expr: &Expr<'_>, env: &Rc<RefCell<Environment>>) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(evaluate_literal(literal)),

            Expr::Grouping(inner) => self.evaluate_in(inner, env),

            Expr::Variable(name) => env.borrow().get(name.lexeme, name.line),

            Expr::Assign { name, value } => {
                debug!("Assigning to variable '{}'", name.lexeme);
                let value = self.evaluate_in(value, env)?;
                env.borrow_mut().assign(name.lexeme, value.clone(), name.line)?;
                // Assignment is itself an expression and yields the value.
                Ok(value)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right, env),

            Expr::Unary { operator, right } => {
                let operand = self.evaluate_in(right, env)?;
                evaluate_unary(operator, operand)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                // Both sides always evaluate; only `and`/`or` short-circuit.
                let left_val = self.evaluate_in(left, env)?;
                let right_val = self.evaluate_in(right, env)?;
                evaluate_binary(operator, left_val, right_val)
            }
        }
    }

    /// `or` returns a truthy left operand without touching the right;
    /// `and` returns a falsy left operand without touching the right.
    /// Either way the non-short-circuit path yields the right operand.
    fn evaluate_logical(
        &mut self,
        left: &Expr<'_>,
        operator: &Token<'_>,
        right: &Expr<'_>,
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Value> {
        let left_val = self.evaluate_in(left, env)?;

        if operator.token_type == TokenType::OR {
            if is_truthy(&left_val) {
                debug!("'or' short-circuit on truthy left operand");
                return Ok(left_val);
            }
        } else if !is_truthy(&left_val) {
            debug!("'and' short-circuit on falsy left operand");
            return Ok(left_val);
        }

        self.evaluate_in(right, env)
    }
}

/// Converts a parsed literal into its runtime value.
fn evaluate_literal(literal: &LiteralValue) -> Value {
    match literal {
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Str(s) => Value::String(s.clone()),
        LiteralValue::True => Value::Bool(true),
        LiteralValue::False => Value::Bool(false),
        LiteralValue::Null => Value::Null,
    }
}

/// Applies a unary operator.  `!` negates booleans, `-` negates numbers; any
/// other operand type is a type error naming the operator and operand.
fn evaluate_unary(operator: &Token<'_>, operand: Value) -> Result<Value> {
    debug!("Evaluating unary operation: {}", operator.lexeme);

    match operator.token_type {
        TokenType::BANG => match operand {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            operand => Err(invalid_operand(operator, &operand)),
        },

        TokenType::MINUS => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            operand => Err(invalid_operand(operator, &operand)),
        },

        _ => Err(SpartieError::invalid_type(
            operator.line,
            format!("'{}' is not a unary operator", operator.lexeme),
        )),
    }
}

/// Applies a binary operator to two already-evaluated operands.
fn evaluate_binary(operator: &Token<'_>, left: Value, right: Value) -> Result<Value> {
    debug!(
        "Evaluating binary operation: {} {} {}",
        left, operator.lexeme, right
    );

    // `+` is overloaded across numbers and strings and handled up front.
    if operator.token_type == TokenType::PLUS {
        return evaluate_add(operator, left, right);
    }

    // Equality is defined for every type pair and has no error path.
    match operator.token_type {
        TokenType::EQUAL_EQUAL => return Ok(Value::Bool(is_equal(&left, &right))),
        TokenType::BANG_EQUAL => return Ok(Value::Bool(!is_equal(&left, &right))),
        _ => {}
    }

    // Everything else is numeric-only.
    let (a, b) = check_number_operands(operator, &left, &right)?;

    match operator.token_type {
        TokenType::MINUS => Ok(Value::Number(a - b)),
        TokenType::STAR => Ok(Value::Number(a * b)),
        // Division by zero follows IEEE-754: an infinity or NaN, not an error.
        TokenType::SLASH => Ok(Value::Number(a / b)),
        TokenType::GREATER => Ok(Value::Bool(a > b)),
        TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
        TokenType::LESS => Ok(Value::Bool(a < b)),
        TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),
        _ => Err(SpartieError::invalid_type(
            operator.line,
            format!("'{}' is not a binary operator", operator.lexeme),
        )),
    }
}

/// The `+` overload table.
///
/// number + number ⇒ sum; string + string ⇒ concatenation; a number mixed
/// with a string is formatted to two decimal places and concatenated in the
/// operands' original order.  Every other combination is a type error.
fn evaluate_add(operator: &Token<'_>, left: Value, right: Value) -> Result<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

        (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),

        (Value::Number(a), Value::String(b)) => Ok(Value::String(format!("{:.2}{}", a, b))),

        (Value::String(a), Value::Number(b)) => Ok(Value::String(format!("{}{:.2}", a, b))),

        (left, right) => Err(invalid_operands(operator, &left, &right)),
    }
}

/// Requires both operands to be numbers, for arithmetic and comparison.
fn check_number_operands(operator: &Token<'_>, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(invalid_operands(operator, left, right)),
    }
}

fn invalid_operand(operator: &Token<'_>, operand: &Value) -> SpartieError {
    SpartieError::invalid_type(operator.line, format!("{}{}", operator.lexeme, operand))
}

fn invalid_operands(operator: &Token<'_>, left: &Value, right: &Value) -> SpartieError {
    SpartieError::invalid_type(
        operator.line,
        format!("{} {} {}", left, operator.lexeme, right),
    )
}

/// Null and `false` are falsy; every other value (including `0` and the
/// empty string) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}

/// Structural equality.  Mixed types are simply unequal; Null equals only
/// Null.
pub fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}
