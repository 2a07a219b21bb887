//! Soroban (abacus) multiplication narrative
//!
//! The numeric path is the plain grade-school product. What this method adds
//! is the bead narration: after each partial product is moved onto the rods,
//! an ANIMATION step shows how every rod's heaven bead (worth 5) and earth
//! beads (worth 1 each) are set.

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{decimal_digits, place_name, pow10, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::{json, Value};
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "abacus",
    name: "Abacus (Soroban)",
    operation: Operation::Multiplication,
    category: MethodCategory::Ancient,
    difficulty: 3,
    display_order: 7,
    origin: Origin {
        culture: "Chinese / Japanese",
        time_period: "Suanpan from the 2nd century; soroban from the 16th century",
        description: "Rods hold decimal digits as one heaven bead worth five and four \
                      earth beads worth one.",
    },
    when_to_use: &[
        "Learning place value through a physical model",
        "Practising mental abacus (anzan)",
    ],
    advantages: &[
        "Makes carrying visible as bead movements",
        "Very fast with practice",
    ],
    disadvantages: &[
        "Needs the tool, or a strong mental image of it",
        "Same number of digit products as long multiplication",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "Each rod is one decimal place; a digit d is shown as ⌊d/5⌋ heaven \
                     beads and d mod 5 earth beads.",
    related_methods: &["grade-school", "lattice"],
    time_complexity: "O(n·m) bead movements",
    recommended_use: "Building place-value intuition",
    alternative: "grade-school",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AbacusMultiplication;

/// Bead layout of every rod holding `value`, leftmost rod first
fn rods(value: u128) -> Vec<Value> {
    decimal_digits(value)
        .into_iter()
        .map(|d| json!({ "digit": d, "heaven": d / 5, "earth": d % 5 }))
        .collect()
}

fn describe_rods(value: u128) -> String {
    decimal_digits(value)
        .into_iter()
        .map(|d| format!("[{}|{}]", "●".repeat(usize::from(d / 5)), "●".repeat(usize::from(d % 5))))
        .collect::<Vec<_>>()
        .join(" ")
}

impl AbacusMultiplication {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Abacus multiplication");
        let (negative, a, b) = split_signs(num1, num2);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Clear the abacus")
                .description(format!("Set {a} on the left rods and {b} on the middle rods"))
                .calculation(format!("{a} × {b}"))
                .explanation("Every rod starts with all beads away from the beam")
                .animation_hint("clear")
                .result(json!({ "multiplicand": a.to_string(), "multiplier": b.to_string() })),
        );

        let mut total = 0u128;
        for (place, &digit) in decimal_digits(b).iter().rev().enumerate() {
            if digit == 0 {
                continue;
            }
            let partial = a * u128::from(digit) * pow10(place as u32);
            total += partial;
            trace.push(
                Step::builder(
                    StepType::Animation,
                    format!("Multiply by the {} digit", place_name(place)),
                )
                .description(format!(
                    "Add {a} × {digit} starting {place} rod(s) to the left of the ones rod"
                ))
                .calculation(format!("+{partial} → {total}"))
                .explanation(describe_rods(total))
                .digit(digit)
                .position(place)
                .partial_product(partial as i128)
                .animation_hint("move-beads")
                .visualization(json!({ "rods": rods(total) }))
                .result(json!({ "partialProduct": partial.to_string(), "total": total.to_string() })),
            );
        }

        // the beads only narrate; the value is the direct product
        let magnitude = a * b;
        trace.push(
            Step::builder(StepType::Animation, "Read the answer rods")
                .calculation(format!("{magnitude}"))
                .explanation(describe_rods(magnitude))
                .animation_hint("read")
                .visualization(json!({ "rods": rods(magnitude) }))
                .result(json!({ "value": magnitude.to_string() })),
        );
        if negative && magnitude != 0 {
            trace.push(sign_step(num1, num2, magnitude));
        }
        let product = signed(negative, magnitude);
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

impl CalculationMethod for AbacusMultiplication {
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
            operands: Operands::pair(23, 7),
            description: "23 × 7 = 161 shown bead by bead",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bead_layout() {
        assert_eq!(rods(7)[0], json!({ "digit": 7, "heaven": 1, "earth": 2 }));
        assert_eq!(describe_rods(161), "[|●] [●|●] [|●]");
    }

    #[test]
    fn test_same_answer_as_direct_product() {
        let result = AbacusMultiplication.multiply(23, 7).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(161));
        assert!(result.verification.correct);
        assert!(result
            .steps
            .iter()
            .any(|s| s.animation_hint.as_deref() == Some("move-beads")));
    }

    #[test]
    fn test_zero_digits_skipped() {
        let result = AbacusMultiplication.multiply(-12, 101).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-1212));
        let moves = result
            .steps
            .iter()
            .filter(|s| s.animation_hint.as_deref() == Some("move-beads"))
            .count();
        assert_eq!(moves, 2);
    }
}
