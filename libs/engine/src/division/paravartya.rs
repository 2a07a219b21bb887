//! Vedic Paravartya division ("transpose and apply")
//!
//! Division by a divisor near a power of ten `B`. Dividing by `B` is only a
//! shift, so each quotient digit is estimated as `current / B` and the
//! estimate is repaired by adding back `estimate × (B - divisor)`, the
//! transposed complement. A final normalisation brings the running
//! remainder back into `0..divisor`, nudging the quotient digit up or down.

use super::{check_divisor, reference_division, result_step, sign_step, signed_quotient};
use crate::digits::{decimal_digits, nearest_power_of_ten};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_config::VedicConfig;
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::{debug, trace};

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "vedic-paravartya",
    name: "Vedic Paravartya",
    operation: Operation::Division,
    category: MethodCategory::Vedic,
    difficulty: 4,
    display_order: 2,
    origin: Origin {
        culture: "Indian (Vedic Mathematics)",
        time_period: "Popularised by Bharati Krishna Tirtha, 1965",
        description: "Paravartya Yojayet: transpose the divisor's distance from a power \
                      of ten and apply it instead of dividing.",
    },
    when_to_use: &[
        "Divisors slightly above or below a power of ten (e.g. 12, 98, 1003)",
        "Mental division",
    ],
    advantages: &[
        "Replaces trial division with shifting and small multiplications",
        "No quotient-digit guessing",
    ],
    disadvantages: &[
        "Only practical for divisors near a power of ten",
        "Negative intermediate values need correcting",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "current = q·B + low, and B = divisor + complement, so \
                     current - q·divisor = low + q·complement.",
    related_methods: &["long-division", "vedic-nikhilam"],
    time_complexity: "O(n) digit steps",
    recommended_use: "Divisors within about 20% of a power of ten",
    alternative: "long-division",
};

pub struct VedicParavartya {
    tolerance_pct: u32,
}

impl Default for VedicParavartya {
    fn default() -> Self {
        Self::new(&VedicConfig::default())
    }
}

impl VedicParavartya {
    pub fn new(config: &VedicConfig) -> Self {
        Self {
            tolerance_pct: config.paravartya_tolerance_pct,
        }
    }

    pub fn check(&self, divisor: i64) -> Validation {
        if divisor == 0 {
            return Validation::invalid("Division by zero is undefined");
        }
        let d = u128::from(divisor.unsigned_abs());
        let base = nearest_power_of_ten(d);
        if d.abs_diff(base) * 100 > base * u128::from(self.tolerance_pct) {
            Validation::invalid(format!(
                "{d} is not within {}% of the base {base}; long division is simpler",
                self.tolerance_pct
            ))
        } else {
            Validation::ok()
        }
    }

    pub fn divide(&self, dividend: i64, divisor: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, dividend, divisor, "Vedic Paravartya division");
        check_divisor(&METADATA, dividend, divisor)?;
        let validation = self.check(divisor);
        let a = u128::from(dividend.unsigned_abs());
        let d = i128::from(divisor.unsigned_abs());
        let base = nearest_power_of_ten(d as u128) as i128;
        let complement = base - d;
        let digits = decimal_digits(a);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Find the base and complement")
                .calculation(format!("{a} ÷ {d}: base {base}, complement {base} - {d} = {complement}"))
                .explanation(
                    "Dividing by the base is a shift; the complement repairs the difference",
                )
                .result(json!({
                    "base": base.to_string(),
                    "complement": complement.to_string(),
                })),
        );

        let first = i128::from(digits[0]);
        let mut quotient = (first / d) as u128;
        let mut remainder = first % d;
        trace.push(
            Step::builder(StepType::Divide, "Seed with the first digit")
                .calculation(format!("{first} ÷ {d} = {quotient} remainder {remainder}"))
                .digit(quotient as u8)
                .position(0)
                .result(json!({ "quotientDigit": quotient as u8, "remainder": remainder.to_string() })),
        );

        for (index, &digit) in digits.iter().enumerate().skip(1) {
            let current = remainder * 10 + i128::from(digit);
            trace.push(
                Step::builder(StepType::BringDown, format!("Bring down {digit}"))
                    .calculation(format!("{remainder} × 10 + {digit} = {current}"))
                    .digit(digit)
                    .position(index)
                    .result(json!({ "value": current.to_string() })),
            );

            let mut q = current / base;
            let low = current % base;
            let mut adjusted = low + q * complement;
            trace.push(
                Step::builder(StepType::Calculation, "Divide by the base and transpose")
                    .calculation(format!(
                        "{current} = {q}·{base} + {low}; {low} + {q} × ({complement}) = {adjusted}"
                    ))
                    .explanation(format!("Estimate the quotient digit as {q}"))
                    .position(index)
                    .result(json!({ "estimate": q.to_string(), "adjusted": adjusted.to_string() })),
            );

            let estimate = q;
            while adjusted >= d {
                adjusted -= d;
                q += 1;
            }
            while adjusted < 0 {
                adjusted += d;
                q -= 1;
            }
            if q != estimate {
                trace!(index, estimate = %estimate, q = %q, "estimate corrected");
                trace.push(
                    Step::builder(StepType::Calculation, "Correct the estimate")
                        .description(if q > estimate {
                            format!("The adjusted value is at least {d}, so raise the digit")
                        } else {
                            "The adjusted value is negative, so lower the digit and add the divisor back"
                                .to_string()
                        })
                        .calculation(format!("digit {estimate} → {q}, remainder {adjusted}"))
                        .position(index)
                        .result(json!({ "quotientDigit": q.to_string(), "remainder": adjusted.to_string() })),
                );
            }

            quotient = quotient * 10 + q as u128;
            remainder = adjusted;
            trace.push(
                Step::builder(StepType::Divide, format!("Quotient digit {q}"))
                    .calculation(format!("quotient so far {quotient}, remainder {remainder}"))
                    .digit(q as u8)
                    .position(index)
                    .result(json!({ "quotientDigit": q as u8, "remainder": remainder.to_string() })),
            );
        }

        trace.push(
            Step::builder(StepType::Remainder, "Read off the answer")
                .calculation(format!("Quotient {quotient}, remainder {remainder}"))
                .result(json!({ "quotient": quotient.to_string(), "remainder": remainder.to_string() })),
        );

        let (q, r) = signed_quotient(&METADATA, dividend, divisor, quotient, remainder as u128)?;
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
            &validation,
        )
    }
}

impl CalculationMethod for VedicParavartya {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |_, divisor| self.check(divisor))
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (dividend, divisor) = expect_pair(&METADATA, operands)?;
        self.divide(dividend, divisor)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(1234, 112),
            description: "1234 ÷ 112 with base 100 and complement -12",
        }
    }
}
