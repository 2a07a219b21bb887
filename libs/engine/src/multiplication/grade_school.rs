//! Grade-school partial-products multiplication

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{decimal_digits, place_name, pow10, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodMetadata, Operands, Operation,
    Origin, Step, StepTrace, StepType, Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "grade-school",
    name: "Grade-School Multiplication",
    operation: Operation::Multiplication,
    difficulty: 2,
    display_order: 1,
    origin: Origin {
        culture: "Indian / Arabic / European",
        time_period: "Long multiplication in print from the 15th century",
        description: "Multiply by one digit at a time, shift each partial product by its \
                      place value, and add them up.",
    },
    when_to_use: &[
        "Multiplying multi-digit numbers by hand",
        "Checking any other multiplication method",
    ],
    advantages: &[
        "Works for any pair of whole numbers",
        "Only needs the times tables up to 9×9",
    ],
    disadvantages: &[
        "Many partial products for long multipliers",
        "Alignment mistakes are common",
    ],
    math_principle: "Distributivity: a × (d_k·10^k + … + d_0) = Σ a × d_i × 10^i.",
    related_methods: &["lattice", "vedic-urdhva", "karatsuba", "abacus"],
    time_complexity: "O(n·m) for n- and m-digit operands",
    recommended_use: "General-purpose multiplication by hand",
    alternative: "lattice",
    ..MethodMetadata::BLANK
};

#[derive(Debug, Clone, Copy, Default)]
pub struct GradeSchoolMultiplication;

impl GradeSchoolMultiplication {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Grade-school multiplication");
        let (negative, a, b) = split_signs(num1, num2);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Set up the multiplication")
                .description("Multiply the top number by each digit of the bottom number")
                .calculation(format!("{a} × {b}"))
                .result(json!({ "multiplicand": a.to_string(), "multiplier": b.to_string() })),
        );

        let mut total = 0u128;
        for (place, &digit) in decimal_digits(b).iter().rev().enumerate() {
            let row = a * u128::from(digit);
            let partial = row * pow10(place as u32);
            trace.push(
                Step::builder(
                    StepType::PartialProduct,
                    format!("Multiply by the {} digit", place_name(place)),
                )
                .description(format!("{a} × {digit}, shifted {place} place(s) left"))
                .calculation(format!("{a} × {digit} = {row} → {partial}"))
                .explanation(if place == 0 {
                    "No shift for the ones digit".to_string()
                } else {
                    format!("Append {place} zero(s) for the {} place", place_name(place))
                })
                .digit(digit)
                .position(place)
                .partial_product(partial as i128)
                .result(json!({
                    "digit": digit,
                    "shift": place,
                    "partialProduct": partial.to_string(),
                })),
            );

            let previous = total;
            total += partial;
            if place > 0 {
                trace.push(
                    Step::builder(StepType::Calculation, "Add to the running total")
                        .calculation(format!("{previous} + {partial} = {total}"))
                        .result(json!({ "runningTotal": total.to_string() })),
                );
            }
        }

        if negative && total != 0 {
            trace.push(sign_step(num1, num2, total));
        }
        let product = signed(negative, total);
        trace.push(result_step(num1, num2, product));

        let answer = FinalAnswer::integer(product);
        let verification = Verification::exact(reference_product(num1, num2), &answer);
        finish(
            &METADATA,
            Operands::pair(num1, num2),
            trace,
            answer,
            verification,
            &Validation::ok(),
        )
    }
}

impl CalculationMethod for GradeSchoolMultiplication {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |_, _| Validation::ok())
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (num1, num2) = expect_pair(&METADATA, operands)?;
        self.multiply(num1, num2)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(35, 12),
            description: "35 × 12 = 70 + 350",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_products() {
        let result = GradeSchoolMultiplication.multiply(35, 12).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(420));
        assert!(result.verification.correct);

        let partials: Vec<i128> = result
            .steps
            .iter()
            .filter_map(|s| s.partial_product)
            .collect();
        assert_eq!(partials, vec![70, 350]);
    }

    #[test]
    fn test_signs() {
        assert_eq!(
            GradeSchoolMultiplication.multiply(-35, 12).unwrap().final_answer,
            FinalAnswer::integer(-420)
        );
        assert_eq!(
            GradeSchoolMultiplication.multiply(-35, -12).unwrap().final_answer,
            FinalAnswer::integer(420)
        );
    }

    #[test]
    fn test_zero_multiplier() {
        let result = GradeSchoolMultiplication.multiply(-987, 0).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(0));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_extreme_operands() {
        let result = GradeSchoolMultiplication
            .multiply(i64::MIN, i64::MAX)
            .unwrap();
        assert!(result.verification.correct);
    }
}
