//! Vedic Nikhilam multiplication ("all from 9 and the last from 10")
//!
//! With base `B` and deviations `d1 = n1 - B`, `d2 = n2 - B`:
//! `n1 × n2 = (n1 + d2) × B + d1 × d2`. The right part keeps
//! `digits(B) - 1` places; anything beyond (or a negative right part) moves
//! into the left part.

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{digit_count, nearest_power_of_ten, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_config::VedicConfig;
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "vedic-nikhilam",
    name: "Vedic Nikhilam",
    operation: Operation::Multiplication,
    category: MethodCategory::Vedic,
    difficulty: 3,
    display_order: 2,
    origin: Origin {
        culture: "Indian (Vedic Mathematics)",
        time_period: "Popularised by Bharati Krishna Tirtha, 1965",
        description: "Nikhilam Navatashcaramam Dashatah: work with each number's distance \
                      from a nearby power of ten.",
    },
    when_to_use: &[
        "Both numbers are close to the same power of ten (e.g. 97 × 96, 103 × 108)",
        "Mental multiplication",
    ],
    advantages: &[
        "Replaces a large product with one small product and one addition",
        "Very fast mentally near a base",
    ],
    disadvantages: &[
        "Loses its advantage when numbers are far from the base",
        "Signed deviations need care",
    ],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "(B + d1)(B + d2) = B(B + d1 + d2) + d1·d2.",
    related_methods: &["vedic-urdhva", "vedic-ekadhikena", "grade-school"],
    time_complexity: "O(1) products near the base",
    recommended_use: "Numbers within about 10% of a power of ten",
    alternative: "vedic-urdhva",
};

pub struct VedicNikhilam {
    tolerance_pct: u32,
}

impl Default for VedicNikhilam {
    fn default() -> Self {
        Self::new(&VedicConfig::default())
    }
}

/// Describe a signed deviation as deficit or excess
fn describe(deviation: i128) -> String {
    match deviation.signum() {
        -1 => format!("deficit {}", -deviation),
        1 => format!("excess {deviation}"),
        _ => "exactly the base".to_string(),
    }
}

impl VedicNikhilam {
    pub fn new(config: &VedicConfig) -> Self {
        Self {
            tolerance_pct: config.nikhilam_tolerance_pct,
        }
    }

    fn base_for(a: u128, b: u128) -> u128 {
        nearest_power_of_ten(a.max(b))
    }

    pub fn check(&self, num1: i64, num2: i64) -> Validation {
        let (_, a, b) = split_signs(num1, num2);
        let base = Self::base_for(a, b);
        let limit = base * u128::from(self.tolerance_pct);
        let far = [a, b].into_iter().find(|n| n.abs_diff(base) * 100 > limit);
        match far {
            Some(n) => Validation::invalid(format!(
                "{n} is not within {}% of the base {base}; Nikhilam gives little advantage here",
                self.tolerance_pct
            )),
            None => Validation::ok(),
        }
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Vedic Nikhilam multiplication");
        let validation = self.check(num1, num2);
        let (negative, a, b) = split_signs(num1, num2);
        let base = Self::base_for(a, b) as i128;
        let right_places = digit_count(base as u128) - 1;
        let (n1, n2) = (a as i128, b as i128);
        let (d1, d2) = (n1 - base, n2 - base);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Choose the base")
                .description("Use the power of ten closest to the numbers")
                .calculation(format!("{a} × {b}, base {base}"))
                .explanation(format!(
                    "The right part will have {right_places} digit(s), one fewer than the base"
                ))
                .result(json!({ "base": base.to_string(), "rightPlaces": right_places })),
        );

        trace.push(
            Step::builder(StepType::Calculation, "Find the deviations")
                .calculation(format!("{n1} - {base} = {d1}\n{n2} - {base} = {d2}"))
                .explanation(format!("{n1}: {}; {n2}: {}", describe(d1), describe(d2)))
                .result(json!({ "deviation1": d1.to_string(), "deviation2": d2.to_string() })),
        );

        let mut left = n1 + d2;
        let cross_kind = match (d1.signum(), d2.signum()) {
            (1, 1) => "excess plus excess: add",
            (-1, -1) => "deficit plus deficit: subtract",
            _ => "mixed: cross-add the signed deviation",
        };
        trace.push(
            Step::builder(StepType::Calculation, "Cross-add for the left part")
                .description(cross_kind)
                .calculation(format!("{n1} + ({d2}) = {left}"))
                .explanation(format!("Crosswise gives the same: {n2} + ({d1}) = {}", n2 + d1))
                .result(json!({ "leftPart": left.to_string() })),
        );

        let right_raw = d1 * d2;
        trace.push(
            Step::builder(StepType::Multiply, "Multiply the deviations for the right part")
                .calculation(format!("({d1}) × ({d2}) = {right_raw}"))
                .result(json!({ "rightPart": right_raw.to_string() })),
        );

        let carry = right_raw.div_euclid(base);
        let right = right_raw.rem_euclid(base);
        if carry != 0 {
            left += carry;
            let reason = if right_raw < 0 {
                format!("{right_raw} is negative, so borrow {} base(s) from the left part", -carry)
            } else {
                format!("{right_raw} needs more than {right_places} digit(s); carry {carry} left")
            };
            trace.push(
                Step::builder(StepType::Carry, "Adjust the right part")
                    .description(reason)
                    .calculation(format!(
                        "{right_raw} = {carry} × {base} + {right}; left part becomes {left}"
                    ))
                    .carry(carry as i64)
                    .result(json!({
                        "carry": carry.to_string(),
                        "leftPart": left.to_string(),
                        "rightPart": right.to_string(),
                    })),
            );
        }

        let magnitude = left * base + right;
        let joined = if right_places == 0 {
            format!("{left}")
        } else {
            format!("{left} | {right:0width$}", width = right_places as usize)
        };
        trace.push(
            Step::builder(StepType::Calculation, "Join the parts")
                .calculation(format!("{left} × {base} + {right} = {magnitude}"))
                .explanation(joined)
                .result(json!({ "value": magnitude.to_string() })),
        );

        let magnitude = magnitude as u128;
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
            &validation,
        )
    }
}

impl CalculationMethod for VedicNikhilam {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |a, b| self.check(a, b))
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (num1, num2) = expect_pair(&METADATA, operands)?;
        self.multiply(num1, num2)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(97, 96),
            description: "97 × 96: deficits 3 and 4, so 93 | 12",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_below_base() {
        let result = VedicNikhilam::default().multiply(97, 96).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(9312));
        assert!(result.verification.correct);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_both_above_base_with_overflow() {
        // 12 × 13: left 15, right 6 → 156; 18 × 17 has right part 56 which overflows 1 digit
        let result = VedicNikhilam::default().multiply(18, 17).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(306));
        assert!(result.steps.iter().any(|s| s.step_type == StepType::Carry));
    }

    #[test]
    fn test_mixed_deviation_borrows() {
        // 103 × 98: left 101, right -6 → 100 | 94
        let result = VedicNikhilam::default().multiply(103, 98).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(10094));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_far_from_base_still_exact_with_warning() {
        let result = VedicNikhilam::default().multiply(47, 23).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(1081));
        assert!(result.verification.correct);
        assert_eq!(result.warnings.len(), 1);
        assert!(!VedicNikhilam::default()
            .validate_input(&Operands::pair(47, 23))
            .valid);
    }

    #[test]
    fn test_negative_and_zero() {
        let method = VedicNikhilam::default();
        assert_eq!(
            method.multiply(-97, 96).unwrap().final_answer,
            FinalAnswer::integer(-9312)
        );
        assert_eq!(
            method.multiply(0, 0).unwrap().final_answer,
            FinalAnswer::integer(0)
        );
    }
}
