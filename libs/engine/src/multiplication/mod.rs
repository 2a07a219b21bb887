//! Multiplication methods
//!
//! Operands are `i64`, so every product fits the `i128` carried by
//! [`FinalAnswer::Integer`](ganita_types::FinalAnswer). Methods work on
//! magnitudes and apply the XOR of the operand signs at the end.

pub mod abacus;
pub mod ekadhikena;
pub mod grade_school;
pub mod karatsuba;
pub mod lattice;
pub mod nikhilam;
pub mod russian_peasant;
pub mod urdhva;

pub use abacus::AbacusMultiplication;
pub use ekadhikena::VedicEkadhikena;
pub use grade_school::GradeSchoolMultiplication;
pub use karatsuba::KaratsubaMultiplication;
pub use lattice::LatticeMultiplication;
pub use nikhilam::VedicNikhilam;
pub use russian_peasant::RussianPeasantMultiplication;
pub use urdhva::VedicUrdhvaTiryak;

use ganita_types::{FinalAnswer, Step, StepBuilder, StepType};
use serde_json::json;

/// Sign and magnitudes of a product's operands
pub(crate) fn split_signs(num1: i64, num2: i64) -> (bool, u128, u128) {
    (
        (num1 < 0) != (num2 < 0),
        u128::from(num1.unsigned_abs()),
        u128::from(num2.unsigned_abs()),
    )
}

/// Reference product used by every multiplication method's verification
pub(crate) fn reference_product(num1: i64, num2: i64) -> FinalAnswer {
    FinalAnswer::integer(i128::from(num1) * i128::from(num2))
}

/// Step announcing that the sign is applied to the magnitude
pub(crate) fn sign_step(num1: i64, num2: i64, magnitude: u128) -> StepBuilder {
    Step::builder(StepType::Info, "Apply the sign")
        .description(format!(
            "Exactly one of {num1} and {num2} is negative, so the product is negative"
        ))
        .calculation(format!("-{magnitude}"))
        .result(json!({ "negated": true }))
}

/// Terminal step shared by the multiplication methods
pub(crate) fn result_step(num1: i64, num2: i64, product: i128) -> StepBuilder {
    Step::builder(StepType::Result, "Final answer")
        .calculation(format!("{num1} × {num2} = {product}"))
        .result(json!({ "value": product.to_string() }))
}
