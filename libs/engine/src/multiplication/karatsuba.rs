//! Karatsuba divide-and-conquer multiplication
//!
//! Splits both operands at `m = ceil(max_digits / 2)` and replaces four
//! half-size products with three:
//!
//! ```text
//! z0 = low1 × low2
//! z2 = high1 × high2
//! z1 = (low1 + high1)(low2 + high2) - z0 - z2
//! x × y = z2·10^(2m) + z1·10^m + z0
//! ```
//!
//! Each of the three sub-products is an independent recursive call. The
//! recursion bottoms out when either operand is a single digit.

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{digit_count, pow10, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::{debug, trace};

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "karatsuba",
    name: "Karatsuba Multiplication",
    operation: Operation::Multiplication,
    category: MethodCategory::Computer,
    difficulty: 5,
    display_order: 8,
    origin: Origin {
        culture: "Soviet Union",
        time_period: "Anatoly Karatsuba, 1960 (published 1962)",
        description: "The first multiplication algorithm asymptotically faster than the \
                      quadratic schoolbook method.",
    },
    when_to_use: &[
        "Very large numbers",
        "Understanding divide-and-conquer algorithms",
    ],
    advantages: &[
        "Three recursive products instead of four",
        "Sub-quadratic growth for large inputs",
    ],
    disadvantages: &[
        "Overhead outweighs the gain for small numbers",
        "Awkward to do by hand",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "(a·10^m + b)(c·10^m + d) = ac·10^(2m) + ((a+b)(c+d) - ac - bd)·10^m + bd.",
    related_methods: &["grade-school", "russian-peasant"],
    time_complexity: "O(n^1.585)",
    recommended_use: "Large-integer arithmetic in software",
    alternative: "grade-school",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct KaratsubaMultiplication;

/// Recursive Karatsuba product of two magnitudes, recording each call
fn karatsuba(x: u128, y: u128, depth: usize, trace: &mut StepTrace) -> u128 {
    let indent = "  ".repeat(depth);
    if x < 10 || y < 10 {
        let product = x * y;
        trace!(depth, %x, %y, "base case");
        trace.push(
            Step::builder(StepType::Multiply, "Base case")
                .description("A single-digit operand is multiplied directly")
                .calculation(format!("{indent}{x} × {y} = {product}"))
                .position(depth)
                .result(json!({ "product": product.to_string(), "depth": depth })),
        );
        return product;
    }

    let n = digit_count(x).max(digit_count(y));
    let m = (n + 1) / 2;
    let split = pow10(m);
    let (high1, low1) = (x / split, x % split);
    let (high2, low2) = (y / split, y % split);
    trace.push(
        Step::builder(StepType::Shift, format!("Split at 10^{m}"))
            .calculation(format!(
                "{indent}{x} = {high1}·10^{m} + {low1}\n{indent}{y} = {high2}·10^{m} + {low2}"
            ))
            .position(depth)
            .result(json!({
                "m": m,
                "depth": depth,
                "high1": high1.to_string(),
                "low1": low1.to_string(),
                "high2": high2.to_string(),
                "low2": low2.to_string(),
            })),
    );

    let z0 = karatsuba(low1, low2, depth + 1, trace);
    let z2 = karatsuba(high1, high2, depth + 1, trace);
    let z1_raw = karatsuba(low1 + high1, low2 + high2, depth + 1, trace);
    let z1 = z1_raw - z0 - z2;
    let product = z2 * pow10(2 * m) + z1 * split + z0;

    trace.push(
        Step::builder(StepType::Calculation, "Combine the three products")
            .calculation(format!(
                "{indent}z1 = {z1_raw} - {z0} - {z2} = {z1}\n\
                 {indent}{z2}·10^{} + {z1}·10^{m} + {z0} = {product}",
                2 * m
            ))
            .position(depth)
            .result(json!({
                "z0": z0.to_string(),
                "z1": z1.to_string(),
                "z2": z2.to_string(),
                "product": product.to_string(),
                "depth": depth,
            })),
    );
    product
}

impl KaratsubaMultiplication {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Karatsuba multiplication");
        let (negative, a, b) = split_signs(num1, num2);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Multiply by divide and conquer")
                .description("Split each number in half and recurse on three products")
                .calculation(format!("{a} × {b}"))
                .result(json!({ "x": a.to_string(), "y": b.to_string() })),
        );

        let magnitude = karatsuba(a, b, 0, &mut trace);
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

impl CalculationMethod for KaratsubaMultiplication {
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
            operands: Operands::pair(56, 78),
            description: "56 × 78 with z0 = 6×8, z2 = 5×7, z1 = 11×15 - z0 - z2",
        }
    }
}
