//! Expression evaluation.
//!
//! A single left-to-right pass over the tokens with an operand stack and an
//! operator stack. Multiplicative operators are applied as soon as their right
//! operand is known; an additive operator is applied when the next additive
//! operator, a closing parenthesis or the end of input arrives. This gives
//! `*`/`/` higher precedence than `+`/`-`, both left associative.

use super::error::EvalError;
use super::expression::Expression;
use super::token::Token;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Open,
}

impl Op {
    fn is_additive(self) -> bool {
        matches!(self, Op::Add | Op::Sub)
    }

    fn is_multiplicative(self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match self {
            Op::Add => Ok(lhs + rhs),
            Op::Sub => Ok(lhs - rhs),
            Op::Mul => Ok(lhs * rhs),
            Op::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
            Op::Div => Ok(lhs / rhs),
            Op::Open => unreachable!("parenthesis marker is never applied"),
        }
    }
}

#[derive(Default)]
struct Stacks {
    values: Vec<f64>,
    ops: Vec<Op>,
}

impl Stacks {
    fn top_is(&self, pred: fn(Op) -> bool) -> bool {
        self.ops.last().is_some_and(|op| pred(*op))
    }

    fn pop_value(&mut self) -> f64 {
        self.values
            .pop()
            .expect("validated expression keeps the operand stack non-empty")
    }

    /// Pop one operator and two operands, push the result.
    fn reduce(&mut self) -> Result<(), EvalError> {
        let op = self
            .ops
            .pop()
            .expect("validated expression keeps the operator stack non-empty");
        let rhs = self.pop_value();
        let lhs = self.pop_value();
        self.values.push(op.apply(lhs, rhs)?);
        Ok(())
    }

    /// Push an operand, folding it into a pending `*` or `/`.
    fn push_operand(&mut self, value: f64) -> Result<(), EvalError> {
        self.values.push(value);
        if self.top_is(Op::is_multiplicative) {
            self.reduce()?;
        }
        Ok(())
    }
}

impl Expression {
    /// Evaluate using `lookup` to resolve variables.
    ///
    /// `lookup` returns `None` when a variable has no numeric value, which
    /// fails the evaluation with [`EvalError::UndefinedVariable`].
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let mut stacks = Stacks::default();

        for token in self.tokens() {
            match token {
                Token::Number { value, .. } => stacks.push_operand(*value)?,
                Token::Variable(name) => {
                    let value =
                        lookup(name).ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                    stacks.push_operand(value)?;
                }
                Token::Plus | Token::Minus => {
                    if stacks.top_is(Op::is_additive) {
                        stacks.reduce()?;
                    }
                    stacks.ops.push(if *token == Token::Plus { Op::Add } else { Op::Sub });
                }
                Token::Star => stacks.ops.push(Op::Mul),
                Token::Slash => stacks.ops.push(Op::Div),
                Token::LeftParen => stacks.ops.push(Op::Open),
                Token::RightParen => {
                    if stacks.top_is(Op::is_additive) {
                        stacks.reduce()?;
                    }
                    stacks.ops.pop();
                    if stacks.top_is(Op::is_multiplicative) {
                        stacks.reduce()?;
                    }
                }
            }
        }

        if !stacks.ops.is_empty() {
            stacks.reduce()?;
        }
        Ok(stacks.pop_value())
    }
}
