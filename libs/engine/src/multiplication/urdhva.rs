//! Vedic Urdhva-Tiryak ("vertically and crosswise") multiplication

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{decimal_digits, place_name, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::{debug, trace};

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "vedic-urdhva",
    name: "Vedic Urdhva-Tiryak",
    operation: Operation::Multiplication,
    category: MethodCategory::Vedic,
    difficulty: 3,
    display_order: 3,
    origin: Origin {
        culture: "Indian (Vedic Mathematics)",
        time_period: "Popularised by Bharati Krishna Tirtha, 1965",
        description: "Urdhva Tiryagbhyam: multiply vertically and crosswise, producing \
                      one answer digit per diagonal.",
    },
    when_to_use: &[
        "Any two multi-digit numbers",
        "Writing the answer in one line, right to left",
    ],
    advantages: &[
        "No partial-product rows to line up",
        "Each answer digit depends only on one diagonal and a carry",
    ],
    disadvantages: &[
        "Crosswise sums get long for many-digit operands",
        "Carries must be held mentally",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "The coefficient of 10^k in the product is Σ a_i·b_j over i + j = k.",
    related_methods: &["grade-school", "lattice", "vedic-nikhilam"],
    time_complexity: "O(n·m) digit products",
    recommended_use: "General multiplication written on one line",
    alternative: "grade-school",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct VedicUrdhvaTiryak;

impl VedicUrdhvaTiryak {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Vedic Urdhva-Tiryak multiplication");
        let (negative, a, b) = split_signs(num1, num2);
        // little-endian so index = place exponent
        let d1: Vec<u8> = decimal_digits(a).into_iter().rev().collect();
        let d2: Vec<u8> = decimal_digits(b).into_iter().rev().collect();

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Write the numbers one above the other")
                .description("Each answer digit comes from one vertical or crosswise group")
                .calculation(format!("{a} × {b}"))
                .explanation(format!(
                    "{} diagonal(s) for {}- and {}-digit numbers",
                    d1.len() + d2.len() - 1,
                    d1.len(),
                    d2.len()
                ))
                .result(json!({ "diagonals": d1.len() + d2.len() - 1 })),
        );

        let mut answer_digits = Vec::with_capacity(d1.len() + d2.len());
        let mut carry = 0u128;
        for k in 0..d1.len() + d2.len() - 1 {
            let pairs: Vec<(usize, usize)> = (0..d1.len())
                .filter(|&i| k >= i && k - i < d2.len())
                .map(|i| (i, k - i))
                .collect();
            let products: Vec<u128> = pairs
                .iter()
                .map(|&(i, j)| u128::from(d1[i]) * u128::from(d2[j]))
                .collect();
            let cross: u128 = products.iter().sum();
            let sum = cross + carry;
            let digit = (sum % 10) as u8;
            let carry_in = carry;
            carry = sum / 10;
            answer_digits.push(digit);
            trace!(k, cross = %cross, carry = %carry, "diagonal");

            let terms: Vec<String> = pairs
                .iter()
                .map(|&(i, j)| format!("{}×{}", d1[i], d2[j]))
                .collect();
            let title = if pairs.len() == 1 {
                "Multiply vertically".to_string()
            } else {
                format!("Multiply crosswise for the {} place", place_name(k))
            };
            trace.push(
                Step::builder(StepType::AddDiagonal, title)
                    .calculation(format!("{} + carry {carry_in} = {sum}", terms.join(" + ")))
                    .explanation(format!("Write {digit}, carry {carry}"))
                    .digit(digit)
                    .position(k)
                    .carry(carry as i64)
                    .result(json!({
                        "products": products.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                        "sum": sum.to_string(),
                        "digit": digit,
                        "carry": carry.to_string(),
                    })),
            );
        }

        if carry > 0 {
            trace.push(
                Step::builder(StepType::Carry, "Write the final carry")
                    .calculation(format!("{carry}"))
                    .carry(carry as i64)
                    .result(json!({ "carry": carry.to_string() })),
            );
            while carry > 0 {
                answer_digits.push((carry % 10) as u8);
                carry /= 10;
            }
        }

        let magnitude = answer_digits
            .iter()
            .rev()
            .fold(0u128, |acc, &d| acc * 10 + u128::from(d));
        trace.push(
            Step::builder(StepType::Calculation, "Read the digits left to right")
                .calculation(format!("{magnitude}"))
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

impl CalculationMethod for VedicUrdhvaTiryak {
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
            operands: Operands::pair(23, 41),
            description: "23 × 41: 3×1, then 2×1 + 3×4, then 2×4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_crosswise() {
        let result = VedicUrdhvaTiryak.multiply(23, 41).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(943));
        let diagonals = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::AddDiagonal)
            .count();
        assert_eq!(diagonals, 3);
    }

    #[test]
    fn test_final_carry_digits() {
        let result = VedicUrdhvaTiryak.multiply(99, 99).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(9801));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_uneven_lengths_and_sign() {
        let result = VedicUrdhvaTiryak.multiply(-1234, 56).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-69104));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_large_operands() {
        let result = VedicUrdhvaTiryak.multiply(i64::MAX, i64::MAX).unwrap();
        assert!(result.verification.correct);
    }
}
