//! Kahan compensated summation
//!
//! Sums floating-point values while carrying a running compensation for the
//! low-order bits each addition loses. The answer is checked against the
//! correctly rounded sum of the same inputs, built from exact partials so it
//! covers the whole `f64` range.

use crate::method::{finish, CalculationMethod};
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory,
    MethodMetadata, Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType,
    Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "kahan",
    name: "Kahan Summation",
    operation: Operation::Addition,
    category: MethodCategory::Computer,
    difficulty: 4,
    display_order: 3,
    origin: Origin {
        culture: "Numerical analysis",
        time_period: "1965",
        description: "William Kahan's compensated summation for floating-point arithmetic.",
    },
    when_to_use: &[
        "Adding many decimal fractions on a computer",
        "Seeing why 0.1 + 0.2 is not exactly 0.3 in floating point",
    ],
    advantages: &[
        "Error stays bounded regardless of how many values are added",
        "Only four floating-point operations per value",
    ],
    disadvantages: &[
        "Only meaningful for floating-point numbers",
        "Aggressive compiler optimisations can cancel the compensation",
    ],
    speed_rating: SpeedRating::Fast,
    math_principle: "The compensation c = (t - sum) - y recovers the part of y that was \
                     rounded away when t = sum + y was formed, and subtracts it next time.",
    related_methods: &["standard"],
    time_complexity: "O(n) in the number of values",
    recommended_use: "Summing long lists of fractional values",
    alternative: "standard",
};

pub struct KahanSummation {
    tolerance: f64,
}

impl Default for KahanSummation {
    fn default() -> Self {
        Self::new(ganita_config::defaults::KAHAN_TOLERANCE)
    }
}

/// Correctly rounded sum of `values`
///
/// Keeps the running total as non-overlapping partials, each addition split
/// into its rounded sum and exact error term, then rounds the expansion once.
fn exact_sum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    for &value in values {
        let mut x = value;
        let mut kept = 0;
        for i in 0..partials.len() {
            let mut y = partials[i];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some((&top, rest)) = partials.split_last() else {
        return 0.0;
    };
    let mut hi = top;
    let mut lo = 0.0;
    let mut remaining = rest.len();
    while remaining > 0 {
        let x = hi;
        let y = rest[remaining - 1];
        remaining -= 1;
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }
    // half-way case: the partials below decide the rounding direction
    if remaining > 0 {
        let next = rest[remaining - 1];
        if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
    }
    hi
}

impl KahanSummation {
    /// `tolerance` is relative to the total magnitude `Σ|x|` of the values
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn check(&self, values: &[f64]) -> Validation {
        if values.iter().any(|v| !v.is_finite()) {
            Validation::invalid("All values must be finite numbers")
        } else if values.len() < 2 {
            Validation::invalid("Compensated summation needs at least two values to be useful")
        } else {
            Validation::ok()
        }
    }

    pub fn sum(&self, values: &[f64]) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, count = values.len(), "Kahan summation");
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CalcError::inapplicable(
                METADATA.id,
                "values must be finite numbers",
            ));
        }
        let validation = self.check(values);

        let expected = exact_sum(values);
        if !expected.is_finite() {
            return Err(CalcError::overflow(METADATA.id, "sum exceeds the f64 range"));
        }

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Values to add")
                .description("Start with sum = 0 and compensation c = 0")
                .calculation(format!("{values:?}"))
                .result(json!({ "values": values, "count": values.len() })),
        );

        let mut sum = 0.0f64;
        let mut compensation = 0.0f64;
        let mut naive = 0.0f64;
        for (index, &value) in values.iter().enumerate() {
            let y = value - compensation;
            let t = sum + y;
            compensation = (t - sum) - y;
            sum = t;
            naive += value;

            trace.push(
                Step::builder(StepType::Calculation, format!("Add value {}", index + 1))
                    .description("Correct the value, add it, then measure what was lost")
                    .calculation(format!(
                        "y = {value} - c = {y}\nt = sum + y = {t}\nc = (t - sum) - y = {compensation}"
                    ))
                    .explanation(format!("Running sum is now {sum}"))
                    .position(index)
                    .result(json!({ "y": y, "t": t, "compensation": compensation, "sum": sum })),
            );
        }

        trace.push(
            Step::builder(StepType::Info, "Compare with naive summation")
                .calculation(format!("naive = {naive}, compensated = {sum}"))
                .explanation(format!("Difference: {}", naive - sum))
                .result(json!({ "naive": naive, "compensated": sum })),
        );

        let magnitude: f64 = values.iter().map(|v| v.abs()).sum();
        let tolerance = self.tolerance * magnitude.min(f64::MAX);
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("Σ = {sum}"))
                .result(json!({ "value": sum })),
        );

        let answer = FinalAnswer::Real { value: sum };
        let verification = Verification::within_real(expected, sum, tolerance);
        finish(
            &METADATA,
            Operands::series(values.to_vec()),
            trace,
            answer,
            verification,
            &validation,
        )
    }
}

impl CalculationMethod for KahanSummation {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        match operands {
            Operands::Series { values } => self.check(values),
            Operands::Pair { num1, num2 } => self.check(&[*num1 as f64, *num2 as f64]),
            other => Validation::invalid(format!(
                "expects a series of values, got {} operands",
                other.shape()
            )),
        }
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        match operands {
            Operands::Series { values } => self.sum(values),
            Operands::Pair { num1, num2 } => self.sum(&[*num1 as f64, *num2 as f64]),
            other => Err(CalcError::operand_shape(
                METADATA.id,
                "series",
                other.shape(),
            )),
        }
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::series(vec![0.1; 10]),
            description: "Ten copies of 0.1: naive summation drifts, compensated does not",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenths_sum_to_one() {
        let result = KahanSummation::default().sum(&[0.1; 10]).unwrap();
        match result.final_answer {
            FinalAnswer::Real { value } => assert!((value - 1.0).abs() < 1e-15),
            ref other => panic!("unexpected answer {other:?}"),
        }
        assert!(result.verification.correct);
    }

    #[test]
    fn test_one_step_per_value() {
        let result = KahanSummation::default().sum(&[1.0, 2.0, 3.0]).unwrap();
        let adds = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::Calculation)
            .count();
        assert_eq!(adds, 3);
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = KahanSummation::default()
            .sum(&[1.0, f64::INFINITY])
            .unwrap_err();
        assert!(matches!(err, CalcError::Inapplicable { .. }));
    }

    #[test]
    fn test_pair_operands_accepted() {
        let result = KahanSummation::default()
            .calculate(&Operands::pair(2, 40))
            .unwrap();
        assert_eq!(result.final_answer, FinalAnswer::Real { value: 42.0 });
    }

    #[test]
    fn test_reference_is_correctly_rounded() {
        assert_eq!(exact_sum(&[0.1; 10]), 1.0);
        assert_eq!(exact_sum(&[1e100, 1.0, -1e100]), 1.0);
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[1e-30, 1e-30]), 2e-30);
    }

    #[test]
    fn test_values_beyond_decimal_range() {
        let result = KahanSummation::default().sum(&[1e30, 1.0]).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::Real { value: 1e30 });
        assert_eq!(result.verification.expected, FinalAnswer::Real { value: 1e30 });
        assert!(result.verification.correct);
    }

    #[test]
    fn test_tiny_values_checked_against_their_own_scale() {
        let result = KahanSummation::default().sum(&[1e-30, 1e-30]).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::Real { value: 2e-30 });
        assert_eq!(result.verification.expected, FinalAnswer::Real { value: 2e-30 });
        assert!(result.verification.correct);
    }

    #[test]
    fn test_cancellation_recovered() {
        let result = KahanSummation::default()
            .sum(&[1e16, 1.0, -1e16])
            .unwrap();
        assert_eq!(result.verification.expected, FinalAnswer::Real { value: 1.0 });
    }

    #[test]
    fn test_overflowing_sum_rejected() {
        let err = KahanSummation::default()
            .sum(&[f64::MAX, f64::MAX])
            .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }
}
