//! Division methods
//!
//! Integer methods return [`FinalAnswer::QuotientRemainder`] with truncating
//! semantics, so the remainder carries the dividend's sign exactly as Rust's
//! `/` and `%` do. A zero divisor is rejected before any method loop runs.

pub mod long_division;
pub mod newton_raphson;
pub mod non_restoring;
pub mod paravartya;
pub mod synthetic;

pub use long_division::LongDivision;
pub use newton_raphson::NewtonRaphsonDivision;
pub use non_restoring::NonRestoringDivision;
pub use paravartya::VedicParavartya;
pub use synthetic::SyntheticDivision;

use ganita_types::{
    CalcError, CalcResult, FinalAnswer, MethodMetadata, Step, StepBuilder, StepType,
};
use serde_json::json;

/// Reject the operand pairs no division method can handle
pub(crate) fn check_divisor(meta: &MethodMetadata, dividend: i64, divisor: i64) -> CalcResult<()> {
    if divisor == 0 {
        return Err(CalcError::DivisionByZero { method: meta.id });
    }
    if dividend.checked_div(divisor).is_none() {
        return Err(CalcError::overflow(
            meta.id,
            format!("{dividend} ÷ {divisor} does not fit in 64 bits"),
        ));
    }
    Ok(())
}

/// Reference quotient and remainder; callers run [`check_divisor`] first
pub(crate) fn reference_division(dividend: i64, divisor: i64) -> FinalAnswer {
    FinalAnswer::quotient_remainder(
        dividend.wrapping_div(divisor),
        dividend.wrapping_rem(divisor),
    )
}

/// Reattach signs to a magnitude quotient and remainder
pub(crate) fn signed_quotient(
    meta: &MethodMetadata,
    dividend: i64,
    divisor: i64,
    quotient: u128,
    remainder: u128,
) -> CalcResult<(i64, i64)> {
    let apply = |negative: bool, magnitude: u128| -> CalcResult<i64> {
        let value = if negative {
            -(magnitude as i128)
        } else {
            magnitude as i128
        };
        i64::try_from(value)
            .map_err(|_| CalcError::overflow(meta.id, format!("{value} does not fit in 64 bits")))
    };
    Ok((
        apply((dividend < 0) != (divisor < 0), quotient)?,
        apply(dividend < 0, remainder)?,
    ))
}

/// Step announcing which signs were reattached
pub(crate) fn sign_step(dividend: i64, divisor: i64) -> StepBuilder {
    let quotient_negative = (dividend < 0) != (divisor < 0);
    Step::builder(StepType::Info, "Apply the signs")
        .description(format!(
            "The quotient is {} because {}; the remainder takes the sign of {dividend}",
            if quotient_negative { "negative" } else { "positive" },
            if quotient_negative {
                "exactly one operand is negative"
            } else {
                "both operands have the same sign"
            }
        ))
        .result(json!({ "quotientNegative": quotient_negative, "remainderNegative": dividend < 0 }))
}

/// Terminal step shared by the integer division methods
pub(crate) fn result_step(dividend: i64, divisor: i64, quotient: i64, remainder: i64) -> StepBuilder {
    Step::builder(StepType::Result, "Final answer")
        .calculation(format!("{dividend} ÷ {divisor} = {quotient} R {remainder}"))
        .explanation(format!("{divisor} × {quotient} + {remainder} = {dividend}"))
        .result(json!({ "quotient": quotient, "remainder": remainder }))
}
