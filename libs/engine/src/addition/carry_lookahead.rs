//! Carry-lookahead binary addition
//!
//! Generate (`a & b`) and propagate (`a ^ b`) signals are computed for every
//! bit at once, then each carry is resolved by the recurrence
//! `C[i] = G[i] | (P[i] & C[i-1])` with `C[0] = G[0]`.

use crate::digits::{bit_length, to_binary};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::{debug, trace};

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "carry-lookahead",
    name: "Carry-Lookahead Addition",
    operation: Operation::Addition,
    category: MethodCategory::Computer,
    difficulty: 4,
    display_order: 2,
    origin: Origin {
        culture: "Digital electronics",
        time_period: "1950s",
        description: "Adder design from early computer engineering that computes carries \
                      in parallel instead of waiting for them to ripple.",
    },
    when_to_use: &[
        "Understanding how CPUs add quickly",
        "Exploring binary generate/propagate logic",
    ],
    advantages: &[
        "Carries can be computed in logarithmic gate depth",
        "Shows why hardware addition is fast",
    ],
    disadvantages: &[
        "Only defined for unsigned binary here",
        "Needs many gates for wide operands",
    ],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "A bit pair generates a carry when both bits are 1 and propagates an \
                     incoming carry when exactly one bit is 1.",
    related_methods: &["standard"],
    time_complexity: "O(log n) gate depth, O(n) steps here",
    recommended_use: "Learning hardware adder design",
    alternative: "standard",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CarryLookaheadAddition;

/// Expanded lookahead form of carry `i`: G_i + P_i·G_{i-1} + P_i·P_{i-1}·G_{i-2} + …
fn lookahead_expansion(i: usize) -> String {
    (0..=i)
        .rev()
        .map(|k| {
            let propagates: String = (k + 1..=i).rev().map(|p| format!("P{p}·")).collect();
            format!("{propagates}G{k}")
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

impl CarryLookaheadAddition {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, num1: i64, num2: i64) -> Validation {
        if num1 < 0 || num2 < 0 {
            Validation::invalid(
                "Carry-lookahead adds unsigned binary; negative operands are added as magnitudes",
            )
        } else {
            Validation::ok()
        }
    }

    pub fn add(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Carry-lookahead addition");
        let validation = self.check(num1, num2);
        let a = u128::from(num1.unsigned_abs());
        let b = u128::from(num2.unsigned_abs());
        let width = bit_length(a).max(bit_length(b)).max(1);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Convert to binary")
                .description("Write both operands as unsigned binary of equal width")
                .calculation(format!(
                    "{a} = {}\n{b} = {}",
                    to_binary(a, width),
                    to_binary(b, width)
                ))
                .explanation(format!("{width} bit(s) are needed"))
                .bits(to_binary(a, width))
                .result(json!({
                    "a": to_binary(a, width),
                    "b": to_binary(b, width),
                    "width": width,
                })),
        );

        let bit = |v: u128, i: u32| ((v >> i) & 1) as u8;
        let generate: Vec<u8> = (0..width).map(|i| bit(a, i) & bit(b, i)).collect();
        let propagate: Vec<u8> = (0..width).map(|i| bit(a, i) ^ bit(b, i)).collect();
        let render = |bits: &[u8]| -> String {
            bits.iter().rev().map(|b| char::from(b'0' + b)).collect()
        };

        trace.push(
            Step::builder(StepType::BinaryOperation, "Generate and propagate signals")
                .description("Every bit position computes its signals at the same time")
                .calculation(format!(
                    "G = a AND b = {}\nP = a XOR b = {}",
                    render(&generate),
                    render(&propagate)
                ))
                .explanation(
                    "G=1: this bit pair creates a carry. P=1: this bit pair passes a carry along.",
                )
                .result(json!({
                    "generate": render(&generate),
                    "propagate": render(&propagate),
                })),
        );

        let shown = (width as usize).min(3);
        let expansions: Vec<String> = (0..shown)
            .map(|i| format!("C{i} = {}", lookahead_expansion(i)))
            .collect();
        trace.push(
            Step::builder(StepType::Info, "Lookahead equations")
                .description("Each carry can be written using only G and P signals")
                .calculation(expansions.join("\n"))
                .explanation("Expanding the recurrence removes the wait for lower carries"),
        );

        let mut carries = vec![0u8; width as usize];
        let mut sum_bits = vec![0u8; width as usize];
        for i in 0..width as usize {
            let carry_in = if i == 0 { 0 } else { carries[i - 1] };
            carries[i] = generate[i] | (propagate[i] & carry_in);
            sum_bits[i] = propagate[i] ^ carry_in;
            trace!(bit = i, carry_in, carry = carries[i], sum = sum_bits[i], "Resolved bit");

            let calculation = if i == 0 {
                format!("C0 = G0 = {}; S0 = P0 = {}", carries[0], sum_bits[0])
            } else {
                format!(
                    "C{i} = G{i} | (P{i} & C{}) = {} | ({} & {}) = {}; S{i} = P{i} ^ C{} = {}",
                    i - 1,
                    generate[i],
                    propagate[i],
                    carry_in,
                    carries[i],
                    i - 1,
                    sum_bits[i]
                )
            };
            trace.push(
                Step::builder(StepType::BinaryOperation, format!("Bit {i}"))
                    .description(format!("Resolve the carry and sum for bit {i}"))
                    .calculation(calculation)
                    .position(i)
                    .digit(sum_bits[i])
                    .carry(i64::from(carries[i]))
                    .result(json!({ "bit": i, "carry": carries[i], "sum": sum_bits[i] })),
            );
        }

        let carry_out = carries[width as usize - 1];
        let mut magnitude: u128 = sum_bits
            .iter()
            .enumerate()
            .map(|(i, &s)| u128::from(s) << i)
            .sum();
        if carry_out == 1 {
            magnitude |= 1 << width;
            trace.push(
                Step::builder(StepType::Carry, "Carry out becomes the top bit")
                    .calculation(format!("C{} = 1", width - 1))
                    .carry(1)
                    .position(width as usize)
                    .result(json!({ "bit": width, "carry": 1 })),
            );
        }
        let out_width = width + u32::from(carry_out);

        let answer = FinalAnswer::integer(magnitude as i128);
        let expected = FinalAnswer::integer(i128::from(num1) + i128::from(num2));
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .description("Read the sum bits and convert back to decimal")
                .calculation(format!("{} = {magnitude}", to_binary(magnitude, out_width)))
                .bits(to_binary(magnitude, out_width))
                .result(json!({
                    "binary": to_binary(magnitude, out_width),
                    "value": magnitude.to_string(),
                })),
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

impl CalculationMethod for CarryLookaheadAddition {
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
            operands: Operands::pair(11, 6),
            description: "1011 + 0110: carries generated at bit 1 and propagated upward",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_expansion_uses_true_recurrence() {
        assert_eq!(lookahead_expansion(0), "G0");
        assert_eq!(lookahead_expansion(1), "G1 + P1·G0");
        assert_eq!(lookahead_expansion(2), "G2 + P2·G1 + P2·P1·G0");
    }

    #[test]
    fn test_long_propagate_chain() {
        // 0111 + 0001: carry generated at bit 0 must propagate through bits 1 and 2
        let result = CarryLookaheadAddition.add(7, 1).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(8));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_carry_out_extends_width() {
        let result = CarryLookaheadAddition.add(255, 255).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(510));
        assert!(result
            .steps
            .iter()
            .any(|s| s.step_type == StepType::Carry));
    }

    #[test]
    fn test_zero_operands() {
        let result = CarryLookaheadAddition.add(0, 0).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(0));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_negative_inputs_warn_and_use_magnitudes() {
        let result = CarryLookaheadAddition.add(-3, 4).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(7));
        assert!(!result.verification.correct);
        assert!(!result.warnings.is_empty());
    }
}
