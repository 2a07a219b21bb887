//! Long division, one dividend digit at a time

use super::{check_divisor, reference_division, result_step, sign_step, signed_quotient};
use crate::digits::decimal_digits;
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "long-division",
    name: "Long Division",
    operation: Operation::Division,
    category: MethodCategory::Standard,
    difficulty: 3,
    display_order: 1,
    origin: Origin {
        culture: "European",
        time_period: "Henry Briggs, c. 1600; standard in schools since the 19th century",
        description: "Divide, multiply, subtract and bring down, one digit of the \
                      dividend at a time.",
    },
    when_to_use: &[
        "Dividing by multi-digit divisors by hand",
        "When an exact quotient and remainder are needed",
    ],
    advantages: &[
        "Works for any divisor",
        "Gives the remainder directly",
    ],
    disadvantages: &[
        "Estimating each quotient digit takes practice",
        "Long for large dividends",
    ],
    speed_rating: SpeedRating::Medium,
    math_principle: "At each place the running remainder r satisfies 0 ≤ r < divisor, so \
                     every quotient digit is between 0 and 9.",
    related_methods: &["vedic-paravartya", "non-restoring"],
    time_complexity: "O(n) digit steps for an n-digit dividend",
    recommended_use: "General-purpose division by hand",
    alternative: "vedic-paravartya",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LongDivision;

impl LongDivision {
    pub fn new() -> Self {
        Self
    }

    pub fn divide(&self, dividend: i64, divisor: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, dividend, divisor, "Long division");
        check_divisor(&METADATA, dividend, divisor)?;
        let a = u128::from(dividend.unsigned_abs());
        let d = u128::from(divisor.unsigned_abs());
        let digits = decimal_digits(a);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Set up the division")
                .calculation(format!("{d} ) {a}"))
                .explanation("Work from the leftmost digit of the dividend")
                .result(json!({ "dividend": a.to_string(), "divisor": d.to_string() })),
        );

        let mut quotient = 0u128;
        let mut current = 0u128;
        for (index, &digit) in digits.iter().enumerate() {
            let previous = current;
            current = current * 10 + u128::from(digit);
            trace.push(
                Step::builder(StepType::BringDown, format!("Bring down {digit}"))
                    .calculation(format!("{previous} → {current}"))
                    .digit(digit)
                    .position(index)
                    .result(json!({ "value": current.to_string() })),
            );

            // on the last digit a short value still goes through divide, multiply, subtract
            if current < d && index + 1 < digits.len() {
                quotient *= 10;
                trace.push(
                    Step::builder(StepType::Divide, format!("{d} does not go into {current}"))
                        .calculation(format!("{current} < {d}, write 0"))
                        .digit(0)
                        .position(index)
                        .result(json!({ "quotientDigit": 0 })),
                );
                continue;
            }

            let q = current / d;
            let product = q * d;
            let remainder = current - product;
            quotient = quotient * 10 + q;
            trace.push(
                Step::builder(StepType::Divide, format!("How many times does {d} go into {current}?"))
                    .calculation(format!("{current} ÷ {d} = {q}"))
                    .digit(q as u8)
                    .position(index)
                    .result(json!({ "quotientDigit": q as u8 })),
            );
            trace.push(
                Step::builder(StepType::Multiply, "Multiply back")
                    .calculation(format!("{q} × {d} = {product}"))
                    .result(json!({ "product": product.to_string() })),
            );
            trace.push(
                Step::builder(StepType::Subtract, "Subtract")
                    .calculation(format!("{current} - {product} = {remainder}"))
                    .result(json!({ "remainder": remainder.to_string() })),
            );
            current = remainder;
        }

        trace.push(
            Step::builder(StepType::Remainder, "No digits left to bring down")
                .calculation(format!("Quotient {quotient}, remainder {current}"))
                .result(json!({ "quotient": quotient.to_string(), "remainder": current.to_string() })),
        );

        let (q, r) = signed_quotient(&METADATA, dividend, divisor, quotient, current)?;
        if dividend < 0 || divisor < 0 {
            trace.push(sign_step(dividend, divisor));
        }
        trace.push(result_step(dividend, divisor, q, r));

        let answer = FinalAnswer::quotient_remainder(q, r);
        let verification = Verification::exact(reference_division(dividend, divisor), &answer);
        finish(
            &METADATA,
            Operands::pair(dividend, divisor),
            trace,
            answer,
            verification,
            &Validation::ok(),
        )
    }
}

impl CalculationMethod for LongDivision {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |_, divisor| {
            if divisor == 0 {
                Validation::invalid("Division by zero is undefined")
            } else {
                Validation::ok()
            }
        })
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (dividend, divisor) = expect_pair(&METADATA, operands)?;
        self.divide(dividend, divisor)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(456, 12),
            description: "456 ÷ 12 = 38",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganita_types::CalcError;

    #[test]
    fn test_exact_division() {
        let result = LongDivision.divide(456, 12).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(38, 0));
        assert!(result.verification.correct);
        let bring_downs = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::BringDown)
            .count();
        assert_eq!(bring_downs, 3);
    }

    #[test]
    fn test_remainder_and_inner_zero() {
        let result = LongDivision.divide(1035, 5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(207, 0));
        let result = LongDivision.divide(100, 7).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(14, 2));
    }

    #[test]
    fn test_signs_truncate() {
        let result = LongDivision.divide(-17, 5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(-3, -2));
        assert!(result.verification.correct);
        let result = LongDivision.divide(17, -5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(-3, 2));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        assert_eq!(
            LongDivision.divide(10, 0).unwrap_err(),
            CalcError::DivisionByZero { method: "long-division" }
        );
        assert!(!LongDivision.validate_input(&Operands::pair(10, 0)).valid);
    }

    #[test]
    fn test_most_negative_dividend() {
        let result = LongDivision.divide(i64::MIN, 7).unwrap();
        assert!(result.verification.correct);
        assert!(LongDivision.divide(i64::MIN, -1).is_err());
    }

    #[test]
    fn test_short_last_digit_becomes_remainder() {
        let result = LongDivision.divide(453, 5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(90, 3));
        let skipped = result
            .steps
            .iter()
            .filter(|s| s.title.contains("does not go into"))
            .count();
        assert_eq!(skipped, 1);
        let last_subtract = result
            .steps
            .iter()
            .rev()
            .find(|s| s.step_type == StepType::Subtract)
            .unwrap();
        assert_eq!(last_subtract.calculation, "3 - 0 = 3");
    }
}
