//! Newton-Raphson division by reciprocal refinement
//!
//! The divisor is scaled into `[0.5, 1)` by a power of ten and a few
//! doublings, its reciprocal is refined with `x ← x(2 - Dx)` starting from
//! `x₀ = 2 - D`, and the rescaled reciprocal is multiplied by the dividend.
//! The answer is an approximation checked against a tolerance, not an exact
//! quotient and remainder.

use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_config::NewtonRaphsonConfig;
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory,
    MethodMetadata, Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType,
    Validation, Verification,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::{debug, trace};

/// Decimal places kept in the reported quotient
const ANSWER_DP: u32 = 12;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "newton-raphson",
    name: "Newton-Raphson Division",
    operation: Operation::Division,
    category: MethodCategory::Computer,
    difficulty: 5,
    display_order: 5,
    origin: Origin {
        culture: "Numerical analysis",
        time_period: "Newton 1669, Raphson 1690; used in floating-point units since the 1960s",
        description: "Division as multiplication by a reciprocal that is found by \
                      Newton's method.",
    },
    when_to_use: &[
        "Floating-point division in hardware",
        "When only multiplication is fast",
    ],
    advantages: &[
        "Quadratic convergence: correct digits double every iteration",
        "Uses only multiplication and subtraction",
    ],
    disadvantages: &[
        "Gives an approximation, not a remainder",
        "Needs normalisation and a starting estimate",
    ],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "Newton's method on f(x) = 1/x - D gives x ← x(2 - Dx); the error \
                     1 - Dx squares each step.",
    related_methods: &["long-division", "non-restoring"],
    time_complexity: "O(log p) iterations for p bits of precision",
    recommended_use: "High-precision division on computers",
    alternative: "long-division",
};

pub struct NewtonRaphsonDivision {
    iterations: u32,
    tolerance: Decimal,
}

impl Default for NewtonRaphsonDivision {
    fn default() -> Self {
        Self::new(&NewtonRaphsonConfig::default())
    }
}

impl NewtonRaphsonDivision {
    pub fn new(config: &NewtonRaphsonConfig) -> Self {
        Self {
            iterations: config.iterations,
            tolerance: Decimal::from_f64(config.tolerance).unwrap_or(dec!(0.0001)),
        }
    }

    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn divide(&self, dividend: i64, divisor: i64) -> CalcResult<CalculationResult> {
        debug!(
            method = METADATA.id,
            dividend,
            divisor,
            iterations = self.iterations,
            "Newton-Raphson division"
        );
        if divisor == 0 {
            return Err(CalcError::DivisionByZero { method: METADATA.id });
        }
        let magnitude = Decimal::from(divisor.unsigned_abs());

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Divide by multiplying with a reciprocal")
                .calculation(format!("{dividend} ÷ {divisor} = {dividend} × (1/{divisor})"))
                .explanation("Find 1/divisor with Newton's method, then multiply")
                .result(json!({ "dividend": dividend, "divisor": divisor })),
        );

        let mut scaled = magnitude;
        let mut tens = 0u32;
        while scaled >= Decimal::ONE {
            scaled /= dec!(10);
            tens += 1;
        }
        let mut doublings = 0u32;
        while scaled < dec!(0.5) {
            scaled *= dec!(2);
            doublings += 1;
        }
        trace.push(
            Step::builder(StepType::Shift, "Normalise the divisor into [0.5, 1)")
                .calculation(format!(
                    "D = {magnitude} ÷ 10^{tens} × 2^{doublings} = {scaled}"
                ))
                .explanation("Scaling by powers of ten and two is exact and easy to undo")
                .result(json!({
                    "scaled": scaled.to_string(),
                    "powersOfTen": tens,
                    "doublings": doublings,
                })),
        );

        let mut x = dec!(2) - scaled;
        trace.push(
            Step::builder(StepType::Calculation, "Initial estimate")
                .calculation(format!("x₀ = 2 - {scaled} = {x}"))
                .explanation("For D in [0.5, 1) this is within 25% of 1/D")
                .result(json!({ "x": x.to_string() })),
        );

        for iteration in 1..=self.iterations {
            let error = Decimal::ONE - scaled * x;
            x *= dec!(2) - scaled * x;
            trace!(iteration, x = %x, "refined reciprocal");
            trace.push(
                Step::builder(StepType::Calculation, format!("Iteration {iteration}"))
                    .calculation(format!("x{iteration} = x(2 - D·x) = {x}"))
                    .explanation(format!("Error before this step: {}", error.round_dp(ANSWER_DP)))
                    .position(iteration as usize)
                    .result(json!({ "x": x.to_string(), "error": error.to_string() })),
            );
        }

        let reciprocal = x * Decimal::from(2u64.pow(doublings)) * Decimal::new(1, tens);
        trace.push(
            Step::builder(StepType::Shift, "Undo the scaling")
                .calculation(format!("1/{magnitude} ≈ {x} × 2^{doublings} ÷ 10^{tens} = {reciprocal}"))
                .result(json!({ "reciprocal": reciprocal.to_string() })),
        );

        let mut quotient = Decimal::from(dividend.unsigned_abs()) * reciprocal;
        if (dividend < 0) != (divisor < 0) {
            quotient.set_sign_negative(true);
        }
        let quotient = quotient.round_dp(ANSWER_DP);
        trace.push(
            Step::builder(StepType::Multiply, "Multiply by the dividend")
                .calculation(format!("{dividend} × {reciprocal} ≈ {quotient}"))
                .explanation(if (dividend < 0) != (divisor < 0) {
                    "Exactly one operand is negative, so the quotient is negative"
                } else {
                    "The operands share a sign, so the quotient is positive"
                })
                .result(json!({ "quotient": quotient.to_string() })),
        );

        let expected = Decimal::from(dividend) / Decimal::from(divisor);
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("{dividend} ÷ {divisor} ≈ {quotient}"))
                .explanation(format!("Checked against the exact quotient within {}", self.tolerance))
                .result(json!({ "value": quotient.to_string() })),
        );

        let answer = FinalAnswer::Approximate { value: quotient };
        let verification = Verification::within(expected, quotient, self.tolerance);
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

impl CalculationMethod for NewtonRaphsonDivision {
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
            operands: Operands::pair(355, 113),
            description: "355 ÷ 113 ≈ 3.14159292",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximates_within_tolerance() {
        let result = NewtonRaphsonDivision::default().divide(355, 113).unwrap();
        let value = result.final_answer.as_decimal().unwrap();
        assert!((value - dec!(3.14159292035)).abs() < dec!(0.0001));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_normalisation() {
        let result = NewtonRaphsonDivision::default().divide(1, 3).unwrap();
        let normalise = &result.steps[1];
        assert_eq!(normalise.result["powersOfTen"], 1);
        assert_eq!(normalise.result["doublings"], 1);
        assert!(result.verification.correct);
    }

    #[test]
    fn test_negative_quotient() {
        let result = NewtonRaphsonDivision::default().divide(-100, 8).unwrap();
        let value = result.final_answer.as_decimal().unwrap();
        assert!((value - dec!(-12.5)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_too_few_iterations_is_reported() {
        let result = NewtonRaphsonDivision::with_iterations(1)
            .divide(1000, 7)
            .unwrap();
        assert!(!result.verification.correct);
    }

    #[test]
    fn test_zero_divisor() {
        assert!(matches!(
            NewtonRaphsonDivision::default().divide(1, 0),
            Err(CalcError::DivisionByZero { .. })
        ));
    }
}
