//! Standard column addition with a carry register
//!
//! Works on magnitudes. If either operand is negative the summed magnitude
//! is negated, which is only correct when both operands share a sign;
//! [`StandardAddition::check`] flags mixed-sign input.

use crate::digits::{padded_digits, place_name, pow10, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodMetadata, Operands, Operation,
    Origin, Step, StepTrace, StepType, Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "standard",
    name: "Standard Column Addition",
    operation: Operation::Addition,
    display_order: 1,
    origin: Origin {
        culture: "Indian / Arabic / European",
        time_period: "Place-value column methods from the 9th century onward",
        description: "The familiar right-to-left column method taught in primary school, \
                      built on the Hindu-Arabic positional system.",
    },
    when_to_use: &[
        "Adding two whole numbers by hand",
        "Learning how place value and carrying work",
    ],
    advantages: &[
        "Works for numbers of any length",
        "Every step is small and easy to check",
    ],
    disadvantages: &[
        "Carries ripple one column at a time",
        "Mixed-sign operands need subtraction instead",
    ],
    math_principle: "Each column sum d1 + d2 + carry is split into a digit (sum mod 10) \
                     and a carry (sum div 10) passed to the next place.",
    related_methods: &["carry-lookahead", "kahan"],
    time_complexity: "O(n) in the number of digits",
    recommended_use: "Everyday addition of whole numbers",
    alternative: "carry-lookahead",
    ..MethodMetadata::BLANK
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAddition;

impl StandardAddition {
    pub fn new() -> Self {
        Self
    }

    /// Mixed-sign operands are outside what column addition of magnitudes models
    pub fn check(&self, num1: i64, num2: i64) -> Validation {
        if (num1 > 0 && num2 < 0) || (num1 < 0 && num2 > 0) {
            Validation::invalid(
                "Column addition adds magnitudes; operands with different signs need subtraction",
            )
        } else {
            Validation::ok()
        }
    }

    pub fn add(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Standard addition");
        let validation = self.check(num1, num2);
        let negative = num1 < 0 || num2 < 0;
        let a = u128::from(num1.unsigned_abs());
        let b = u128::from(num2.unsigned_abs());

        let width = a.to_string().len().max(b.to_string().len());
        let top = padded_digits(a, width);
        let bottom = padded_digits(b, width);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Line up the numbers")
                .description("Write the numbers one above the other, aligned by place value")
                .calculation(format!("  {a:>width$}\n+ {b:>width$}"))
                .explanation(format!("Both numbers are padded to {width} digit(s)"))
                .result(json!({ "num1": num1, "num2": num2, "width": width })),
        );

        let mut carry = 0u8;
        let mut sum_digits = Vec::with_capacity(width + 1);
        for (offset, index) in (0..width).rev().enumerate() {
            let (d1, d2) = (top[index], bottom[index]);
            let column_sum = d1 + d2 + carry;
            let digit = column_sum % 10;
            let calculation = if carry > 0 {
                format!("{d1} + {d2} + {carry} (carry) = {column_sum}")
            } else {
                format!("{d1} + {d2} = {column_sum}")
            };

            trace.push(
                Step::builder(
                    StepType::Calculation,
                    format!("Add the {} column", place_name(offset)),
                )
                .description(format!("Add the digits in the {} place", place_name(offset)))
                .calculation(calculation)
                .explanation(format!("Write down {digit}"))
                .digit(digit)
                .position(offset)
                .result(json!({
                    "digit": digit,
                    "placeValue": pow10(offset as u32).to_string(),
                    "columnSum": column_sum,
                })),
            );

            carry = column_sum / 10;
            if carry > 0 {
                trace.push(
                    Step::builder(StepType::Carry, format!("Carry {carry}"))
                        .description(format!(
                            "{column_sum} is 10 or more, so carry to the {} column",
                            place_name(offset + 1)
                        ))
                        .calculation(format!("{column_sum} = {carry}×10 + {digit}"))
                        .explanation(format!(
                            "The {carry} is added to the next column on the left"
                        ))
                        .carry(i64::from(carry))
                        .position(offset + 1)
                        .result(json!({
                            "digit": carry,
                            "placeValue": pow10(offset as u32 + 1).to_string(),
                        }))
                        .animation_hint("carry-up"),
                );
            }
            sum_digits.push(digit);
        }

        if carry > 0 {
            trace.push(
                Step::builder(StepType::Calculation, "Write the final carry")
                    .description("No columns remain, so the carry becomes the leading digit")
                    .calculation(format!("{carry}"))
                    .digit(carry)
                    .position(width)
                    .result(json!({ "digit": carry, "placeValue": pow10(width as u32).to_string() })),
            );
            sum_digits.push(carry);
        }

        sum_digits.reverse();
        let magnitude = crate::digits::from_digits(&sum_digits);
        let sum = signed(negative, magnitude);

        if negative {
            trace.push(
                Step::builder(StepType::Info, "Apply the sign")
                    .description("At least one operand was negative, so the sum is negated")
                    .calculation(format!("-{magnitude}"))
                    .explanation("This matches true addition only when both operands are negative")
                    .result(json!({ "negated": true })),
            );
        }

        let answer = FinalAnswer::integer(sum);
        let expected = FinalAnswer::integer(i128::from(num1) + i128::from(num2));
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("{num1} + {num2} = {sum}"))
                .explanation("Read the digits from left to right")
                .result(json!({ "value": sum.to_string() })),
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

impl CalculationMethod for StandardAddition {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |a, b| self.check(a, b))
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (num1, num2) = expect_pair(&METADATA, operands)?;
        self.add(num1, num2)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(247, 185),
            description: "247 + 185: carries out of the ones and tens columns",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carries_are_recorded() {
        let result = StandardAddition.add(247, 185).unwrap();

        assert_eq!(result.final_answer, FinalAnswer::integer(432));
        assert!(result.verification.correct);

        let carries: Vec<_> = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::Carry)
            .collect();
        // 7+5=12 and 4+8+1=13 both carry; 2+1+1=4 does not
        assert_eq!(carries.len(), 2);
        assert_eq!(carries[0].position, Some(1));
        assert_eq!(carries[1].position, Some(2));
    }

    #[test]
    fn test_final_carry_becomes_leading_digit() {
        let result = StandardAddition.add(999, 1).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(1000));
        assert!(result
            .steps
            .iter()
            .any(|s| s.title == "Write the final carry"));
    }

    #[test]
    fn test_both_negative_is_correct() {
        let result = StandardAddition.add(-40, -2).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-42));
        assert!(result.verification.correct);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_mixed_signs_flagged_and_verification_honest() {
        let result = StandardAddition.add(-5, 3).unwrap();
        // magnitudes are summed and negated
        assert_eq!(result.final_answer, FinalAnswer::integer(-8));
        assert!(!result.verification.correct);
        assert_eq!(result.verification.expected, FinalAnswer::integer(-2));
        assert_eq!(result.warnings.len(), 1);
        assert!(!StandardAddition.validate_input(&Operands::pair(-5, 3)).valid);
    }

    #[test]
    fn test_rejects_polynomial_operands() {
        let err = StandardAddition
            .calculate(&Operands::polynomial([1, 2], 3))
            .unwrap_err();
        assert!(err.to_string().contains("expects pair"));
    }
}
