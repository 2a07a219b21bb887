//! Result envelope returned by every calculation

use crate::errors::{CalcError, CalcResult};
use crate::metadata::MethodMetadata;
use crate::operands::Operands;
use crate::step::{Step, StepTrace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Final answer of a calculation; the variant depends on the method family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FinalAnswer {
    Integer { value: i128 },
    /// Truncating division: the remainder carries the dividend's sign
    QuotientRemainder { quotient: i64, remainder: i64 },
    /// Iterative approximation, compared within a tolerance
    Approximate { value: Decimal },
    Real { value: f64 },
    Polynomial { quotient: Vec<i64>, remainder: i64 },
}

impl FinalAnswer {
    pub fn integer(value: impl Into<i128>) -> Self {
        FinalAnswer::Integer {
            value: value.into(),
        }
    }

    pub fn quotient_remainder(quotient: i64, remainder: i64) -> Self {
        FinalAnswer::QuotientRemainder {
            quotient,
            remainder,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            FinalAnswer::Integer { value } => Some(*value),
            _ => None,
        }
    }

    pub fn quotient(&self) -> Option<i64> {
        match self {
            FinalAnswer::QuotientRemainder { quotient, .. } => Some(*quotient),
            _ => None,
        }
    }

    pub fn remainder(&self) -> Option<i64> {
        match self {
            FinalAnswer::QuotientRemainder { remainder, .. }
            | FinalAnswer::Polynomial { remainder, .. } => Some(*remainder),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FinalAnswer::Approximate { value } => Some(*value),
            FinalAnswer::Integer { value } => Decimal::try_from_i128_with_scale(*value, 0).ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinalAnswer::Integer { value } => write!(f, "{value}"),
            FinalAnswer::QuotientRemainder {
                quotient,
                remainder,
            } => write!(f, "{quotient} R {remainder}"),
            FinalAnswer::Approximate { value } => write!(f, "≈ {value}"),
            FinalAnswer::Real { value } => write!(f, "{value}"),
            FinalAnswer::Polynomial {
                quotient,
                remainder,
            } => write!(f, "{quotient:?} R {remainder}"),
        }
    }
}

/// Self-check of a method's answer against the reference operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub expected: FinalAnswer,
    pub correct: bool,
}

impl Verification {
    /// Exact comparison with the reference answer
    pub fn exact(expected: FinalAnswer, actual: &FinalAnswer) -> Self {
        let correct = expected == *actual;
        Self { expected, correct }
    }

    /// Tolerance-bounded comparison for approximate methods
    pub fn within(expected: Decimal, actual: Decimal, tolerance: Decimal) -> Self {
        Self {
            expected: FinalAnswer::Approximate { value: expected },
            correct: (actual - expected).abs() < tolerance,
        }
    }

    /// Tolerance-bounded comparison for floating-point results
    pub fn within_real(expected: f64, actual: f64, tolerance: f64) -> Self {
        Self {
            expected: FinalAnswer::Real { value: expected },
            correct: (actual - expected).abs() <= tolerance,
        }
    }
}

/// Output contract of every `calculate` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub method: String,
    pub method_name: String,
    pub inputs: Operands,
    pub steps: Vec<Step>,
    pub final_answer: FinalAnswer,
    pub time_complexity: String,
    pub recommended_use: String,
    pub alternative: String,
    pub verification: Verification,
    /// Advisory messages, e.g. operands outside the method's sweet spot
    pub warnings: Vec<String>,
}

impl CalculationResult {
    /// Build the envelope from a finished trace
    ///
    /// Refuses an empty trace or one whose last step is not `RESULT`, so a
    /// caller never receives a partial result.
    pub fn assemble(
        meta: &MethodMetadata,
        inputs: Operands,
        trace: StepTrace,
        final_answer: FinalAnswer,
        verification: Verification,
    ) -> CalcResult<Self> {
        match trace.last() {
            None => {
                return Err(CalcError::MalformedTrace {
                    method: meta.id,
                    reason: "no steps recorded".to_string(),
                })
            }
            Some(step) if !step.is_terminal() => {
                return Err(CalcError::MalformedTrace {
                    method: meta.id,
                    reason: format!("last step is {}, expected RESULT", step.step_type),
                })
            }
            Some(_) => {}
        }

        Ok(Self {
            method: meta.id.to_string(),
            method_name: meta.name.to_string(),
            inputs,
            steps: trace.into_steps(),
            final_answer,
            time_complexity: meta.time_complexity.to_string(),
            recommended_use: meta.recommended_use.to_string(),
            alternative: meta.alternative.to_string(),
            verification,
            warnings: Vec::new(),
        })
    }

    pub fn with_warning(mut self, warning: Option<&str>) -> Self {
        if let Some(message) = warning {
            self.warnings.push(message.to_string());
        }
        self
    }

    pub fn is_verified(&self) -> bool {
        self.verification.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Operation;
    use crate::step::{Step, StepType};
    use rust_decimal_macros::dec;

    static META: MethodMetadata = MethodMetadata {
        id: "probe",
        name: "Probe",
        operation: Operation::Addition,
        time_complexity: "O(1)",
        ..MethodMetadata::BLANK
    };

    #[test]
    fn test_assemble_rejects_empty_trace() {
        let answer = FinalAnswer::integer(1);
        let err = CalculationResult::assemble(
            &META,
            Operands::pair(0, 1),
            StepTrace::new(),
            answer.clone(),
            Verification::exact(answer.clone(), &answer),
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::MalformedTrace { .. }));
    }

    #[test]
    fn test_assemble_requires_terminal_result_step() {
        let mut trace = StepTrace::new();
        trace.push(Step::builder(StepType::Input, "Inputs"));
        let answer = FinalAnswer::integer(1);
        let result = CalculationResult::assemble(
            &META,
            Operands::pair(0, 1),
            trace,
            answer.clone(),
            Verification::exact(answer.clone(), &answer),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_assemble_copies_metadata() {
        let mut trace = StepTrace::new();
        trace.push(Step::builder(StepType::Result, "Answer"));
        let answer = FinalAnswer::integer(1);
        let result = CalculationResult::assemble(
            &META,
            Operands::pair(0, 1),
            trace,
            answer.clone(),
            Verification::exact(FinalAnswer::integer(2), &answer),
        )
        .unwrap()
        .with_warning(Some("note"));

        assert_eq!(result.method, "probe");
        assert_eq!(result.time_complexity, "O(1)");
        assert!(!result.is_verified());
        assert_eq!(result.warnings, vec!["note".to_string()]);
    }

    #[test]
    fn test_within_tolerance() {
        assert!(Verification::within(dec!(2.5), dec!(2.50001), dec!(0.0001)).correct);
        assert!(!Verification::within(dec!(2.5), dec!(2.6), dec!(0.0001)).correct);
    }
}
