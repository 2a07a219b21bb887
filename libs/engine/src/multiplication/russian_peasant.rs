//! Russian peasant (halving and doubling) multiplication

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::signed;
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "russian-peasant",
    name: "Russian Peasant Multiplication",
    operation: Operation::Multiplication,
    category: MethodCategory::Ancient,
    difficulty: 2,
    display_order: 6,
    origin: Origin {
        culture: "Egyptian / Russian",
        time_period: "Rhind Papyrus, c. 1650 BCE; used by Russian peasants into the 19th century",
        description: "Needs nothing but halving, doubling and adding, which made it \
                      popular where the times tables were not taught.",
    },
    when_to_use: &[
        "Multiplying without memorised times tables",
        "Showing the link between multiplication and binary",
    ],
    advantages: &[
        "Only halving, doubling and addition",
        "Mirrors how computers shift and add",
    ],
    disadvantages: &[
        "Many rows for a large multiplier",
        "Long columns to add at the end",
    ],
    speed_rating: SpeedRating::Slow,
    math_principle: "Halving the right column reads its binary digits; each odd row adds \
                     the matching power-of-two multiple of the left column.",
    related_methods: &["grade-school", "karatsuba"],
    time_complexity: "O(log n) rows",
    recommended_use: "Explaining binary multiplication",
    alternative: "grade-school",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RussianPeasantMultiplication;

impl RussianPeasantMultiplication {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Russian peasant multiplication");
        let (negative, mut left, mut right) = split_signs(num1, num2);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Set up two columns")
                .description("Halve the right column and double the left until the right reaches 1")
                .calculation(format!("{left} | {right}"))
                .result(json!({ "left": left.to_string(), "right": right.to_string() })),
        );

        if right == 0 {
            trace.push(
                Step::builder(StepType::Info, "Nothing to halve")
                    .description("The right column starts at 0, so no row is kept")
                    .result(json!({ "rows": 0 })),
            );
        }

        let mut total = 0u128;
        let mut kept = Vec::new();
        let mut row = 0usize;
        while right > 0 {
            let odd = right % 2 == 1;
            if odd {
                total += left;
                kept.push(left.to_string());
            }
            trace.push(
                Step::builder(StepType::Calculation, format!("Row {}", row + 1))
                    .calculation(format!("{left} | {right}"))
                    .explanation(if odd {
                        format!("{right} is odd: keep {left}")
                    } else {
                        format!("{right} is even: cross out this row")
                    })
                    .position(row)
                    .result(json!({
                        "left": left.to_string(),
                        "right": right.to_string(),
                        "odd": odd,
                    })),
            );
            right /= 2;
            if right > 0 {
                left *= 2;
            }
            row += 1;
        }

        if !kept.is_empty() {
            trace.push(
                Step::builder(StepType::Calculation, "Add the kept rows")
                    .calculation(format!("{} = {total}", kept.join(" + ")))
                    .result(json!({ "sum": total.to_string(), "rowsKept": kept.len() })),
            );
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

impl CalculationMethod for RussianPeasantMultiplication {
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
            operands: Operands::pair(18, 25),
            description: "18 × 25: keep the rows where 25, 12, 6, 3, 1 is odd",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halving_and_doubling() {
        let result = RussianPeasantMultiplication.multiply(18, 25).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(450));
        let rows: Vec<bool> = result
            .steps
            .iter()
            .filter(|s| s.title.starts_with("Row "))
            .map(|s| s.result["odd"].as_bool().unwrap())
            .collect();
        assert_eq!(rows, vec![true, false, false, true, true]);
    }

    #[test]
    fn test_zero_multiplier() {
        let result = RussianPeasantMultiplication.multiply(18, 0).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(0));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_extreme_operands() {
        let result = RussianPeasantMultiplication
            .multiply(i64::MIN, i64::MIN)
            .unwrap();
        assert!(result.verification.correct);
    }
}
