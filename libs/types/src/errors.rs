//! Error types for calculation methods
//!
//! Fatal precondition violations abort a calculation before any loop runs
//! and surface as [`CalcError`]. Method inapplicability that is only
//! advisory is reported through [`Validation`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running a calculation method
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Divisor of zero given to any division method
    #[error("Division by zero: {method} requires a non-zero divisor")]
    DivisionByZero { method: &'static str },

    /// Coefficient array cannot be divided synthetically
    #[error("Malformed polynomial: {reason}")]
    MalformedPolynomial { reason: String },

    /// Operands variant does not match what the method consumes
    #[error("{method} expects {expected} operands, got {got}")]
    OperandShape {
        method: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// Value does not fit the signed range of a fixed bit width
    #[error("Value {value} is outside the {bits}-bit signed range [{min}, {max}]")]
    OutOfRange {
        value: i128,
        bits: u32,
        min: i128,
        max: i128,
    },

    /// Register width outside what the binary methods support
    #[error("{method} supports {min} to {max} bit registers, got {bits}")]
    UnsupportedWidth {
        method: &'static str,
        bits: u32,
        min: u32,
        max: u32,
    },

    /// Method cannot be applied to these operands at all
    #[error("{method} cannot be applied: {reason}")]
    Inapplicable { method: &'static str, reason: String },

    /// Intermediate value exceeded the working integer type
    #[error("Arithmetic overflow in {method}: {context}")]
    Overflow {
        method: &'static str,
        context: String,
    },

    /// Trace handed to the result envelope is empty or not terminated
    #[error("Malformed trace from {method}: {reason}")]
    MalformedTrace { method: &'static str, reason: String },
}

impl CalcError {
    pub fn operand_shape(method: &'static str, expected: &'static str, got: &'static str) -> Self {
        Self::OperandShape {
            method,
            expected,
            got,
        }
    }

    pub fn inapplicable(method: &'static str, reason: impl Into<String>) -> Self {
        Self::Inapplicable {
            method,
            reason: reason.into(),
        }
    }

    pub fn overflow(method: &'static str, context: impl Into<String>) -> Self {
        Self::Overflow {
            method,
            context: context.into(),
        }
    }

    /// Out-of-range error for a two's-complement width
    pub fn out_of_range(value: i128, bits: u32) -> Self {
        let max = (1i128 << (bits - 1)) - 1;
        Self::OutOfRange {
            value,
            bits,
            min: -max - 1,
            max,
        }
    }
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Advisory outcome of a method's precondition check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Warning text to attach to a result, if any
    pub fn warning(&self) -> Option<&str> {
        (!self.valid).then_some(self.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_bounds() {
        let err = CalcError::out_of_range(-220, 8);
        assert_eq!(
            err,
            CalcError::OutOfRange {
                value: -220,
                bits: 8,
                min: -128,
                max: 127
            }
        );
        assert_eq!(
            err.to_string(),
            "Value -220 is outside the 8-bit signed range [-128, 127]"
        );
    }

    #[test]
    fn test_validation_warning() {
        assert_eq!(Validation::ok().warning(), None);
        assert_eq!(Validation::invalid("too far").warning(), Some("too far"));
    }
}
