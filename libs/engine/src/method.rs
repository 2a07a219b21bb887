//! Method trait definitions for the unified calculation interface

use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodMetadata, Operands,
    StepTrace, Validation, Verification,
};
use tracing::warn;

/// Unified interface every calculation method implements
///
/// Implementations are pure: the same operands always produce the same
/// result, and nothing is shared between calls.
pub trait CalculationMethod: Send + Sync {
    /// Static description of the method
    fn metadata(&self) -> &'static MethodMetadata;

    /// Advisory precondition check; never fails
    fn validate_input(&self, operands: &Operands) -> Validation;

    /// Run the method, producing a complete result or a fatal error
    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult>;

    /// Canned demonstration input
    fn example(&self) -> Example;

    fn id(&self) -> &'static str {
        self.metadata().id
    }
}

/// Unpack scalar-pair operands or report the shape mismatch
pub(crate) fn expect_pair(meta: &MethodMetadata, operands: &Operands) -> CalcResult<(i64, i64)> {
    operands
        .as_pair()
        .ok_or_else(|| CalcError::operand_shape(meta.id, "pair", operands.shape()))
}

/// Validation for methods that only accept scalar pairs
pub(crate) fn validate_pair(
    operands: &Operands,
    check: impl FnOnce(i64, i64) -> Validation,
) -> Validation {
    match operands.as_pair() {
        Some((num1, num2)) => check(num1, num2),
        None => Validation::invalid(format!(
            "expects a pair of numbers, got {} operands",
            operands.shape()
        )),
    }
}

/// Assemble the envelope and attach any advisory warning
pub(crate) fn finish(
    meta: &MethodMetadata,
    inputs: Operands,
    trace: StepTrace,
    answer: FinalAnswer,
    verification: Verification,
    validation: &Validation,
) -> CalcResult<CalculationResult> {
    if let Some(message) = validation.warning() {
        warn!(method = meta.id, %inputs, "{}", message);
    }
    if !verification.correct {
        warn!(
            method = meta.id,
            %inputs,
            answer = %answer,
            expected = %verification.expected,
            "Result does not match the reference operation"
        );
    }
    Ok(
        CalculationResult::assemble(meta, inputs, trace, answer, verification)?
            .with_warning(validation.warning()),
    )
}
