//! Synthetic division of a polynomial by `(x - root)`

use crate::method::{finish, CalculationMethod};
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory,
    MethodMetadata, Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType,
    Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "synthetic",
    name: "Synthetic Division",
    operation: Operation::Division,
    category: MethodCategory::Specialized,
    difficulty: 3,
    display_order: 3,
    origin: Origin {
        culture: "European / Chinese",
        time_period: "Ruffini, 1804; Horner, 1819; Qin Jiushao, 1247",
        description: "A shorthand for dividing a polynomial by a linear factor using \
                      only its coefficients.",
    },
    when_to_use: &[
        "Dividing a polynomial by x - c",
        "Testing whether c is a root",
        "Evaluating a polynomial at c",
    ],
    advantages: &[
        "Only multiplications by c and additions",
        "Quotient and remainder in one pass",
    ],
    disadvantages: &["Only divides by linear factors with leading coefficient 1"],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "Horner's scheme: b_0 = a_0, b_k = a_k + c·b_(k-1); the last b is \
                     P(c), the remainder.",
    related_methods: &["long-division"],
    time_complexity: "O(n) for a degree-n polynomial",
    recommended_use: "Polynomial division and root testing",
    alternative: "long-division",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticDivision;

/// Term-by-term polynomial long division by `(x - root)`
fn long_divide(coefficients: &[i64], root: i64) -> CalcResult<(Vec<i64>, i64)> {
    let mut working: Vec<i128> = coefficients.iter().map(|&c| i128::from(c)).collect();
    let mut quotient = Vec::with_capacity(coefficients.len() - 1);
    for k in 0..coefficients.len() - 1 {
        let lead = working[k];
        // subtracting lead·x^m·(x - root) cancels this term and adds lead·root below it
        working[k + 1] += lead * i128::from(root);
        quotient.push(narrow(lead)?);
    }
    let remainder = working[coefficients.len() - 1];
    Ok((quotient, narrow(remainder)?))
}

/// `P(root)` evaluated term by term, if it fits in 128 bits
fn evaluate(coefficients: &[i64], root: i64) -> Option<i128> {
    let degree = coefficients.len() - 1;
    coefficients
        .iter()
        .enumerate()
        .try_fold(0i128, |acc, (i, &a)| {
            let power = i128::from(root).checked_pow((degree - i) as u32)?;
            acc.checked_add(i128::from(a).checked_mul(power)?)
        })
}

fn narrow(value: i128) -> CalcResult<i64> {
    i64::try_from(value)
        .map_err(|_| CalcError::overflow(METADATA.id, format!("{value} does not fit in 64 bits")))
}

fn format_polynomial(coefficients: &[i64]) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let terms: Vec<String> = coefficients
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != 0)
        .map(|(i, &c)| match degree - i {
            0 => format!("{c}"),
            1 => format!("{c}x"),
            p => format!("{c}x^{p}"),
        })
        .collect();
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ").replace("+ -", "- ")
    }
}

impl SyntheticDivision {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, coefficients: &[i64]) -> Validation {
        match Self::malformed(coefficients) {
            Some(reason) => Validation::invalid(reason),
            None => Validation::ok(),
        }
    }

    fn malformed(coefficients: &[i64]) -> Option<String> {
        match coefficients.first() {
            _ if coefficients.len() < 2 => Some(format!(
                "need at least two coefficients to divide by a linear factor, got {}",
                coefficients.len()
            )),
            Some(0) => Some("leading coefficient must be non-zero".to_string()),
            _ => None,
        }
    }

    /// Divide the polynomial with `coefficients` (most significant first) by `(x - root)`
    pub fn divide_polynomial(&self, coefficients: &[i64], root: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, ?coefficients, root, "Synthetic division");
        if let Some(reason) = Self::malformed(coefficients) {
            return Err(CalcError::MalformedPolynomial { reason });
        }
        let overflow = || CalcError::overflow(METADATA.id, "coefficient exceeds 64 bits");

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Write the coefficients and the root")
                .description(format!(
                    "({}) ÷ (x - {root})",
                    format_polynomial(coefficients)
                ))
                .calculation(format!("{root} | {coefficients:?}"))
                .explanation("Divide by x - c using c itself")
                .result(json!({ "coefficients": coefficients, "root": root })),
        );

        let mut values = Vec::with_capacity(coefficients.len());
        let mut running = coefficients[0];
        values.push(running);
        trace.push(
            Step::builder(StepType::BringDown, "Bring down the leading coefficient")
                .calculation(format!("{running}"))
                .position(0)
                .result(json!({ "value": running })),
        );

        for (index, &next) in coefficients.iter().enumerate().skip(1) {
            let product = running.checked_mul(root).ok_or_else(overflow)?;
            trace.push(
                Step::builder(StepType::Multiply, "Multiply by the root")
                    .calculation(format!("{running} × {root} = {product}"))
                    .position(index)
                    .result(json!({ "product": product })),
            );
            running = next.checked_add(product).ok_or_else(overflow)?;
            trace.push(
                Step::builder(StepType::Calculation, "Add the next coefficient")
                    .calculation(format!("{next} + {product} = {running}"))
                    .position(index)
                    .result(json!({ "value": running })),
            );
            values.push(running);
        }

        let remainder = running;
        values.pop();
        let quotient = values;
        trace.push(
            Step::builder(StepType::Remainder, "Read off the quotient and remainder")
                .description("The last value is the remainder; the rest are the quotient coefficients")
                .calculation(format!("quotient {quotient:?}, remainder {remainder}"))
                .result(json!({ "quotient": quotient, "remainder": remainder })),
        );

        if remainder == 0 {
            trace.push(
                Step::builder(StepType::Info, format!("{root} is a root"))
                    .description(format!("The remainder is zero, so (x - {root}) is a factor"))
                    .result(json!({ "root": root })),
            );
        }

        let (expected_quotient, mut expected_remainder) = long_divide(coefficients, root)?;
        if let Some(value) = evaluate(coefficients, root) {
            trace.push(
                Step::builder(StepType::Info, "Check with the remainder theorem")
                    .calculation(format!("P({root}) = {value}"))
                    .result(json!({ "value": value.to_string() })),
            );
            if value != i128::from(expected_remainder) {
                expected_remainder = narrow(value)?;
            }
        }

        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!(
                    "{} remainder {remainder}",
                    format_polynomial(&quotient)
                ))
                .result(json!({ "quotient": quotient, "remainder": remainder })),
        );

        let answer = FinalAnswer::Polynomial {
            quotient,
            remainder,
        };
        let expected = FinalAnswer::Polynomial {
            quotient: expected_quotient,
            remainder: expected_remainder,
        };
        let verification = Verification::exact(expected, &answer);
        finish(
            &METADATA,
            Operands::polynomial(coefficients, root),
            trace,
            answer,
            verification,
            &Validation::ok(),
        )
    }
}

impl CalculationMethod for SyntheticDivision {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        match operands {
            Operands::Polynomial { coefficients, .. } => self.check(coefficients),
            other => Validation::invalid(format!(
                "expects polynomial coefficients and a root, got {} operands",
                other.shape()
            )),
        }
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        match operands {
            Operands::Polynomial { coefficients, root } => {
                self.divide_polynomial(coefficients, *root)
            }
            other => Err(CalcError::operand_shape(
                METADATA.id,
                "polynomial",
                other.shape(),
            )),
        }
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::polynomial(vec![1, 5, 3, -8], 2),
            description: "(x³ + 5x² + 3x - 8) ÷ (x - 2)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_by_linear() {
        let result = SyntheticDivision.divide_polynomial(&[1, 5, 3, -8], 2).unwrap();
        assert_eq!(
            result.final_answer,
            FinalAnswer::Polynomial {
                quotient: vec![1, 7, 17],
                remainder: 26
            }
        );
        assert!(result.verification.correct);
        assert!(!result.steps.iter().any(|s| s.title.ends_with("is a root")));
    }

    #[test]
    fn test_root_detected() {
        // x² - 5x + 6 = (x - 2)(x - 3)
        let result = SyntheticDivision.divide_polynomial(&[1, -5, 6], 3).unwrap();
        assert_eq!(result.final_answer.remainder(), Some(0));
        assert!(result.steps.iter().any(|s| s.title == "3 is a root"));
    }

    #[test]
    fn test_malformed_polynomials() {
        assert!(matches!(
            SyntheticDivision.divide_polynomial(&[4], 1),
            Err(CalcError::MalformedPolynomial { .. })
        ));
        assert!(matches!(
            SyntheticDivision.divide_polynomial(&[], 1),
            Err(CalcError::MalformedPolynomial { .. })
        ));
        assert!(matches!(
            SyntheticDivision.divide_polynomial(&[0, 1, 2], 1),
            Err(CalcError::MalformedPolynomial { .. })
        ));
        assert!(!SyntheticDivision
            .validate_input(&Operands::polynomial(vec![7], 2))
            .valid);
    }

    #[test]
    fn test_overflow_reported() {
        let err = SyntheticDivision
            .divide_polynomial(&[i64::MAX, 0, 0], 2)
            .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            SyntheticDivision.calculate(&Operands::pair(1, 2)),
            Err(CalcError::OperandShape { .. })
        ));
    }

    #[test]
    fn test_format_polynomial() {
        assert_eq!(format_polynomial(&[1, 5, 3, -8]), "1x^3 + 5x^2 + 3x - 8");
        assert_eq!(format_polynomial(&[0, 0]), "0");
    }
}
