//! Operators passed to instructions as `operator` and `relationalOperator`
//! parameters

use std::str::FromStr;

use crate::ExtensionError;

/// Comparison used by conditions testing a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl RelationalOperator {
    /// Compare `value` against `reference`
    pub fn compare(&self, value: f64, reference: f64) -> bool {
        match self {
            RelationalOperator::Equal => value == reference,
            RelationalOperator::NotEqual => value != reference,
            RelationalOperator::Less => value < reference,
            RelationalOperator::LessOrEqual => value <= reference,
            RelationalOperator::Greater => value > reference,
            RelationalOperator::GreaterOrEqual => value >= reference,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RelationalOperator::Equal => "=",
            RelationalOperator::NotEqual => "!=",
            RelationalOperator::Less => "<",
            RelationalOperator::LessOrEqual => "<=",
            RelationalOperator::Greater => ">",
            RelationalOperator::GreaterOrEqual => ">=",
        }
    }
}

impl FromStr for RelationalOperator {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(RelationalOperator::Equal),
            "!=" => Ok(RelationalOperator::NotEqual),
            "<" => Ok(RelationalOperator::Less),
            "<=" => Ok(RelationalOperator::LessOrEqual),
            ">" => Ok(RelationalOperator::Greater),
            ">=" => Ok(RelationalOperator::GreaterOrEqual),
            other => Err(ExtensionError::ParseError(format!(
                "unknown relational operator '{other}'"
            ))),
        }
    }
}

/// Modification applied by actions changing a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Set,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the modification. Division by zero leaves the value unchanged.
    pub fn apply(&self, current: f64, operand: f64) -> f64 {
        match self {
            Operator::Set => operand,
            Operator::Add => current + operand,
            Operator::Subtract => current - operand,
            Operator::Multiply => current * operand,
            Operator::Divide => {
                if operand == 0.0 {
                    tracing::warn!(current, "division by zero ignored");
                    current
                } else {
                    current / operand
                }
            }
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Set => "=",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Operator::Set),
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(ExtensionError::ParseError(format!(
                "unknown operator '{other}'"
            ))),
        }
    }
}
