//! Vedic Ekadhikena Purvena: squaring numbers that end in 5
//!
//! With `n = 10p + 5`, `n² = 100·p(p+1) + 25`: multiply the prefix by one
//! more than itself and append "25". Any other last digit is rejected.

use crate::method::{finish, CalculationMethod};
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory,
    MethodMetadata, Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType,
    Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "vedic-ekadhikena",
    name: "Vedic Ekadhikena",
    operation: Operation::Multiplication,
    category: MethodCategory::Vedic,
    difficulty: 1,
    display_order: 4,
    origin: Origin {
        culture: "Indian (Vedic Mathematics)",
        time_period: "Popularised by Bharati Krishna Tirtha, 1965",
        description: "Ekadhikena Purvena, \"by one more than the previous one\": square a \
                      number ending in 5 with a single small product.",
    },
    when_to_use: &["Squaring a number whose last digit is 5"],
    advantages: &[
        "One multiplication regardless of size",
        "Instant for two- and three-digit numbers",
    ],
    disadvantages: &["Only works for squares of numbers ending in 5"],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "(10p + 5)² = 100·p(p + 1) + 25.",
    related_methods: &["vedic-nikhilam", "vedic-urdhva"],
    time_complexity: "O(1) multiplications",
    recommended_use: "Mental squaring of numbers ending in 5",
    alternative: "vedic-urdhva",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct VedicEkadhikena;

impl VedicEkadhikena {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, num: i64) -> Validation {
        if num.unsigned_abs() % 10 == 5 {
            Validation::ok()
        } else {
            Validation::invalid(format!("{num} does not end in 5"))
        }
    }

    /// Square `num`, which must end in 5
    pub fn square(&self, num: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num, "Vedic Ekadhikena squaring");
        let magnitude = u128::from(num.unsigned_abs());
        if magnitude % 10 != 5 {
            return Err(CalcError::inapplicable(
                METADATA.id,
                format!("{num} does not end in 5"),
            ));
        }
        let prefix = magnitude / 10;
        let next = prefix + 1;
        let left = prefix * next;
        let square = left * 100 + 25;

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Split off the final 5")
                .calculation(format!("{magnitude} → prefix {prefix}, last digit 5"))
                .explanation(if num < 0 {
                    "A square is never negative, so work with the magnitude"
                } else {
                    "The last digit is 5, so the sutra applies"
                })
                .result(json!({ "prefix": prefix.to_string() })),
        );
        trace.push(
            Step::builder(StepType::Calculation, "One more than the previous")
                .description("Ekadhikena: increase the prefix by one")
                .calculation(format!("{prefix} + 1 = {next}"))
                .result(json!({ "ekadhika": next.to_string() })),
        );
        trace.push(
            Step::builder(StepType::Multiply, "Multiply the prefix by its successor")
                .calculation(format!("{prefix} × {next} = {left}"))
                .explanation("This gives the left part of the answer")
                .result(json!({ "leftPart": left.to_string() })),
        );
        trace.push(
            Step::builder(StepType::Calculation, "Append 25")
                .calculation(format!("{left} | 25"))
                .explanation("5 × 5 = 25 always forms the right part")
                .result(json!({ "rightPart": 25 })),
        );

        let value = square as i128;
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("{num}² = {value}"))
                .result(json!({ "value": value.to_string() })),
        );

        let answer = FinalAnswer::integer(value);
        let reference = FinalAnswer::integer(i128::from(num) * i128::from(num));
        let verification = Verification::exact(reference, &answer);
        finish(
            &METADATA,
            Operands::single(num),
            trace,
            answer,
            verification,
            &Validation::ok(),
        )
    }

    fn operand(operands: &Operands) -> CalcResult<i64> {
        match *operands {
            Operands::Single { num } => Ok(num),
            Operands::Pair { num1, num2 } if num1 == num2 => Ok(num1),
            Operands::Pair { num1, num2 } => Err(CalcError::inapplicable(
                METADATA.id,
                format!("squares a single number; {num1} and {num2} differ"),
            )),
            _ => Err(CalcError::operand_shape(
                METADATA.id,
                "single",
                operands.shape(),
            )),
        }
    }
}

impl CalculationMethod for VedicEkadhikena {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        match Self::operand(operands) {
            Ok(num) => self.check(num),
            Err(err) => Validation::invalid(err.to_string()),
        }
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        self.square(Self::operand(operands)?)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::single(25),
            description: "25²: 2 × 3 = 6, then append 25",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_of_25() {
        let result = VedicEkadhikena.square(25).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(625));
        assert!(result.verification.correct);
        assert_eq!(result.inputs, Operands::single(25));
    }

    #[test]
    fn test_larger_and_negative() {
        assert_eq!(
            VedicEkadhikena.square(115).unwrap().final_answer,
            FinalAnswer::integer(13225)
        );
        assert_eq!(
            VedicEkadhikena.square(-35).unwrap().final_answer,
            FinalAnswer::integer(1225)
        );
        assert_eq!(
            VedicEkadhikena.square(5).unwrap().final_answer,
            FinalAnswer::integer(25)
        );
    }

    #[test]
    fn test_other_last_digit_rejected() {
        let err = VedicEkadhikena.square(24).unwrap_err();
        assert!(matches!(err, CalcError::Inapplicable { .. }));
        assert!(!VedicEkadhikena.validate_input(&Operands::single(24)).valid);
    }

    #[test]
    fn test_pair_operands() {
        let method = VedicEkadhikena;
        let result = method.calculate(&Operands::pair(45, 45)).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(2025));
        assert!(method.calculate(&Operands::pair(45, 55)).is_err());
        assert!(method.calculate(&Operands::series(vec![1.0])).is_err());
    }
}
