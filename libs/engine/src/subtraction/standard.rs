//! Standard borrowing subtraction
//!
//! Subtracts the smaller magnitude from the larger, column by column from the
//! right. A column that underflows borrows from the nearest non-zero digit to
//! its left; zeros passed on the way become 9.

use crate::digits::{from_digits, padded_digits, place_name, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodMetadata, Operands, Operation,
    Origin, Step, StepTrace, StepType, Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "standard",
    name: "Standard Borrowing Subtraction",
    operation: Operation::Subtraction,
    difficulty: 2,
    display_order: 1,
    origin: Origin {
        culture: "European",
        time_period: "Decomposition method, widespread from the 20th century",
        description: "The column method taught in schools, regrouping (borrowing) from \
                      the next place when a digit is too small.",
    },
    when_to_use: &[
        "Subtracting whole numbers by hand",
        "Practising regrouping across zeros",
    ],
    advantages: &[
        "Mirrors the structure of column addition",
        "Works for numbers of any length",
    ],
    disadvantages: &[
        "Borrowing across several zeros is error-prone",
        "Mixed-sign operands need addition instead",
    ],
    math_principle: "Borrowing rewrites one unit of a higher place as ten units of the \
                     place below, so each column difference is non-negative.",
    related_methods: &["twos-complement"],
    time_complexity: "O(n) in the number of digits",
    recommended_use: "Everyday subtraction of whole numbers",
    alternative: "twos-complement",
    ..MethodMetadata::BLANK
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSubtraction;

impl StandardSubtraction {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, num1: i64, num2: i64) -> Validation {
        if (num1 > 0 && num2 < 0) || (num1 < 0 && num2 > 0) {
            Validation::invalid(
                "Borrowing subtraction works on magnitudes; operands with different signs need addition",
            )
        } else {
            Validation::ok()
        }
    }

    pub fn subtract(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Standard subtraction");
        let validation = self.check(num1, num2);
        let (m1, m2) = (
            u128::from(num1.unsigned_abs()),
            u128::from(num2.unsigned_abs()),
        );
        let (larger, smaller) = if m1 >= m2 { (m1, m2) } else { (m2, m1) };
        let negative = num1 < num2;

        let width = larger.to_string().len();
        let mut top = padded_digits(larger, width);
        let bottom = padded_digits(smaller, width);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Larger number on top")
                .description("Subtract the smaller magnitude from the larger one")
                .calculation(format!("  {larger:>width$}\n- {smaller:>width$}"))
                .explanation(if negative {
                    format!("{num1} is less than {num2}, so the answer will be negative")
                } else {
                    "The answer will not be negative".to_string()
                })
                .result(json!({ "larger": larger.to_string(), "smaller": smaller.to_string() })),
        );

        let mut difference = vec![0u8; width];
        for (offset, index) in (0..width).rev().enumerate() {
            let needed = bottom[index];
            if top[index] < needed {
                // larger >= smaller guarantees a non-zero digit to the left
                let mut lender = index - 1;
                while top[lender] == 0 {
                    lender -= 1;
                }
                top[lender] -= 1;
                let lender_offset = width - 1 - lender;
                trace.push(
                    Step::builder(
                        StepType::Borrow,
                        format!("Borrow from the {} place", place_name(lender_offset)),
                    )
                    .description(format!(
                        "{} is smaller than {needed}, so regroup from the left",
                        top[index]
                    ))
                    .calculation(format!("{} → {}", top[lender] + 1, top[lender]))
                    .explanation("One unit of the higher place is worth ten of the place below")
                    .borrow(1)
                    .position(lender_offset)
                    .result(json!({ "from": lender_offset, "to": offset, "digit": top[lender] })),
                );

                for zero in lender + 1..index {
                    top[zero] = 9;
                    let zero_offset = width - 1 - zero;
                    trace.push(
                        Step::builder(StepType::Borrow, "Pass the borrow through a zero")
                            .description(format!(
                                "The {} digit is 0, so it becomes 9 and passes the borrow on",
                                place_name(zero_offset)
                            ))
                            .calculation("0 → 9")
                            .borrow(1)
                            .position(zero_offset)
                            .result(json!({ "digit": 9, "position": zero_offset })),
                    );
                }

                top[index] += 10;
                trace.push(
                    Step::builder(StepType::Borrow, "Add ten to this column")
                        .calculation(format!("{} + 10 = {}", top[index] - 10, top[index]))
                        .borrow(1)
                        .position(offset)
                        .result(json!({ "digit": top[index], "position": offset })),
                );
            }

            let digit = top[index] - needed;
            difference[index] = digit;
            trace.push(
                Step::builder(
                    StepType::Calculation,
                    format!("Subtract the {} column", place_name(offset)),
                )
                .calculation(format!("{} - {needed} = {digit}", top[index]))
                .digit(digit)
                .position(offset)
                .result(json!({ "digit": digit, "position": offset })),
            );
        }

        let magnitude = from_digits(&difference);
        let value = signed(negative, magnitude);
        if negative {
            trace.push(
                Step::builder(StepType::Info, "Apply the sign")
                    .description(format!("{num1} < {num2}, so negate the difference"))
                    .calculation(format!("-{magnitude}"))
                    .result(json!({ "negated": true })),
            );
        }

        let answer = FinalAnswer::integer(value);
        let expected = FinalAnswer::integer(i128::from(num1) - i128::from(num2));
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("{num1} - {num2} = {value}"))
                .result(json!({ "value": value.to_string() })),
        );

        let verification = Verification::exact(expected, &answer);
        finish(
            &METADATA,
            Operands::pair(num1, num2),
            trace,
            answer,
            verification,
            &validation,
        )
    }
}

impl CalculationMethod for StandardSubtraction {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |a, b| self.check(a, b))
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (num1, num2) = expect_pair(&METADATA, operands)?;
        self.subtract(num1, num2)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(1003, 478),
            description: "1003 - 478: a borrow chain through two zeros",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_chain_through_zeros() {
        let result = StandardSubtraction.subtract(1003, 478).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(525));
        assert!(result.verification.correct);

        let zero_passes = result
            .steps
            .iter()
            .filter(|s| s.title == "Pass the borrow through a zero")
            .count();
        assert_eq!(zero_passes, 2);
    }

    #[test]
    fn test_negative_when_first_is_smaller() {
        let result = StandardSubtraction.subtract(185, 247).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-62));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_both_negative() {
        let result = StandardSubtraction.subtract(-3, -5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(2));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_no_borrow_needed() {
        let result = StandardSubtraction.subtract(58, 23).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(35));
        assert!(!result.steps.iter().any(|s| s.step_type == StepType::Borrow));
    }

    #[test]
    fn test_mixed_signs_flagged() {
        assert!(!StandardSubtraction.validate_input(&Operands::pair(5, -3)).valid);
        assert!(StandardSubtraction.validate_input(&Operands::pair(0, -3)).valid);
    }
}
