//! Non-restoring binary division
//!
//! Works on the accumulator/quotient register pair `(A, Q)` of an `n`-bit
//! divider. Each cycle shifts the pair left, then subtracts the divisor `M`
//! when `A` was non-negative or adds it when `A` was negative. The new sign
//! of `A` decides the quotient bit. A negative `A` after the last cycle gets
//! one corrective `+M`.

use super::{check_divisor, reference_division, result_step, sign_step, signed_quotient};
use crate::digits::{bit_length, mask, to_binary};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_config::{defaults, NonRestoringConfig};
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "non-restoring",
    name: "Non-Restoring Division",
    operation: Operation::Division,
    category: MethodCategory::Computer,
    difficulty: 5,
    display_order: 4,
    origin: Origin {
        culture: "Computer architecture",
        time_period: "1950s hardware dividers",
        description: "Hardware division that never undoes a failed subtraction; it adds \
                      the divisor on the next cycle instead.",
    },
    when_to_use: &[
        "Understanding how processors divide",
        "Binary arithmetic exercises",
    ],
    advantages: &[
        "One add or subtract per quotient bit",
        "No restore step inside the loop",
    ],
    disadvantages: &[
        "Hard to follow by hand",
        "Needs a final correction of the remainder",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "Restoring then subtracting (A + M)·2 - M equals A·2 + M, so a \
                     negative partial remainder is fixed by adding on the next cycle.",
    related_methods: &["long-division", "twos-complement"],
    time_complexity: "O(n) for an n-bit dividend",
    recommended_use: "Learning hardware division",
    alternative: "long-division",
};

pub struct NonRestoringDivision {
    min_bits: u32,
}

impl Default for NonRestoringDivision {
    fn default() -> Self {
        Self::new(&NonRestoringConfig::default())
    }
}

impl NonRestoringDivision {
    pub fn new(config: &NonRestoringConfig) -> Self {
        Self {
            min_bits: config.min_bit_width,
        }
    }

    pub fn divide(&self, dividend: i64, divisor: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, dividend, divisor, "Non-restoring division");
        check_divisor(&METADATA, dividend, divisor)?;
        let (min, max) = (defaults::MIN_REGISTER_BITS, defaults::MAX_REGISTER_BITS);
        if !(min..=max).contains(&self.min_bits) {
            return Err(CalcError::UnsupportedWidth {
                method: METADATA.id,
                bits: self.min_bits,
                min,
                max,
            });
        }
        let a = u128::from(dividend.unsigned_abs());
        let m = i128::from(divisor.unsigned_abs());
        let n = self.min_bits.max(bit_length(a));

        let mut acc = 0i128;
        let mut q = a;

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Load the registers")
                .description(format!("{n}-bit divider working on magnitudes"))
                .calculation(format!("A = 0, Q = {}, M = {m}", to_binary(q, n)))
                .explanation("A holds the partial remainder, Q the dividend and then the quotient")
                .bits(to_binary(q, n))
                .result(json!({ "A": "0", "Q": to_binary(q, n), "M": m.to_string(), "bits": n })),
        );

        for cycle in 0..n {
            let was_non_negative = acc >= 0;
            let top = ((q >> (n - 1)) & 1) as i128;
            acc = (acc << 1) | top;
            q = (q << 1) & mask(n);
            trace.push(
                Step::builder(StepType::Shift, format!("Cycle {}: shift A,Q left", cycle + 1))
                    .calculation(format!("A = {acc}, Q = {}", to_binary(q, n)))
                    .position(cycle as usize)
                    .bits(to_binary(q, n))
                    .result(json!({ "A": acc.to_string(), "Q": to_binary(q, n) })),
            );

            let (kind, operation) = if was_non_negative {
                acc -= m;
                (StepType::Subtract, "A was non-negative: subtract M")
            } else {
                acc += m;
                (StepType::BinaryOperation, "A was negative: add M")
            };
            let bit = u8::from(acc >= 0);
            q |= u128::from(bit);
            trace.push(
                Step::builder(kind, operation)
                    .calculation(format!("A = {acc}, so Q0 = {bit}"))
                    .explanation(if bit == 1 {
                        "A is non-negative, so the quotient bit is 1"
                    } else {
                        "A is negative, so the quotient bit is 0"
                    })
                    .digit(bit)
                    .position(cycle as usize)
                    .bits(to_binary(q, n))
                    .result(json!({ "A": acc.to_string(), "Q": to_binary(q, n), "quotientBit": bit })),
            );
        }

        if acc < 0 {
            let before = acc;
            acc += m;
            trace.push(
                Step::builder(StepType::Calculation, "Correct the remainder")
                    .description("A finished negative, so add M once more")
                    .calculation(format!("{before} + {m} = {acc}"))
                    .result(json!({ "A": acc.to_string() })),
            );
        }

        let remainder = acc as u128;
        trace.push(
            Step::builder(StepType::Remainder, "Read the registers")
                .calculation(format!("Q = {} = {q}, A = {remainder}", to_binary(q, n)))
                .bits(to_binary(q, n))
                .result(json!({ "quotient": q.to_string(), "remainder": remainder.to_string() })),
        );

        let (quotient, remainder) = signed_quotient(&METADATA, dividend, divisor, q, remainder)?;
        if dividend < 0 || divisor < 0 {
            trace.push(sign_step(dividend, divisor));
        }
        trace.push(result_step(dividend, divisor, quotient, remainder));

        let answer = FinalAnswer::quotient_remainder(quotient, remainder);
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

impl CalculationMethod for NonRestoringDivision {
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
            operands: Operands::pair(13, 5),
            description: "13 ÷ 5 in an 8-bit divider",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_by_five() {
        let result = NonRestoringDivision::default().divide(13, 5).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(2, 3));
        assert!(result.verification.correct);
        let shifts = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::Shift)
            .count();
        assert_eq!(shifts, 8);
    }

    #[test]
    fn test_register_grows_with_dividend() {
        let result = NonRestoringDivision::default().divide(100_000, 7).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(14285, 5));
        let shifts = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::Shift)
            .count();
        assert_eq!(shifts, 17);
    }

    #[test]
    fn test_divisor_larger_than_dividend() {
        let result = NonRestoringDivision::default().divide(3, 10).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(0, 3));
    }

    #[test]
    fn test_signs_and_extremes() {
        let method = NonRestoringDivision::default();
        assert_eq!(
            method.divide(-13, 5).unwrap().final_answer,
            FinalAnswer::quotient_remainder(-2, -3)
        );
        assert!(method.divide(i64::MIN, 3).unwrap().verification.correct);
        assert!(matches!(
            method.divide(13, 0),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_unsupported_register_width() {
        for min_bit_width in [0, 200] {
            let method = NonRestoringDivision::new(&NonRestoringConfig { min_bit_width });
            assert!(matches!(
                method.divide(13, 5),
                Err(CalcError::UnsupportedWidth { .. })
            ));
        }
    }
}
