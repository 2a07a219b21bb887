//! Worked scenarios through the public registry surface
//!
//! Each test drives a method the way a consumer would: look it up by
//! operation and id, hand it operands, and read the finished result.

use ganita_engine::{
    default_registry, CalcError, CalculationMethod, FinalAnswer, Operands, Operation, StepType,
};

fn method(operation: Operation, id: &str) -> &'static dyn CalculationMethod {
    default_registry()
        .get_method(operation, id)
        .unwrap_or_else(|| panic!("{operation} method {id} is registered"))
}

#[test]
fn standard_addition_carries_into_the_tens() {
    let result = method(Operation::Addition, "standard")
        .calculate(&Operands::pair(247, 185))
        .unwrap();
    assert_eq!(result.final_answer, FinalAnswer::integer(432));
    assert!(result.steps.iter().any(|s| s.step_type == StepType::Carry));
    assert!(result.verification.correct);
}

#[test]
fn grade_school_multiplication() {
    let result = method(Operation::Multiplication, "grade-school")
        .calculate(&Operands::pair(35, 12))
        .unwrap();
    assert_eq!(result.final_answer, FinalAnswer::integer(420));
    assert!(result.verification.correct);
}

#[test]
fn long_division_without_remainder() {
    let result = method(Operation::Division, "long-division")
        .calculate(&Operands::pair(456, 12))
        .unwrap();
    assert_eq!(result.final_answer.quotient(), Some(38));
    assert_eq!(result.final_answer.remainder(), Some(0));
}

#[test]
fn ekadhikena_squares_a_number_ending_in_five() {
    let ekadhikena = method(Operation::Multiplication, "vedic-ekadhikena");
    let result = ekadhikena.calculate(&Operands::single(25)).unwrap();
    assert_eq!(result.final_answer, FinalAnswer::integer(625));

    assert!(!ekadhikena.validate_input(&Operands::single(24)).valid);
    assert!(matches!(
        ekadhikena.calculate(&Operands::single(24)),
        Err(CalcError::Inapplicable { .. })
    ));
}

#[test]
fn karatsuba_agrees_with_grade_school() {
    let operands = Operands::pair(56, 78);
    let karatsuba = method(Operation::Multiplication, "karatsuba")
        .calculate(&operands)
        .unwrap();
    let grade_school = method(Operation::Multiplication, "grade-school")
        .calculate(&operands)
        .unwrap();
    assert_eq!(karatsuba.final_answer, FinalAnswer::integer(4368));
    assert_eq!(karatsuba.final_answer, grade_school.final_answer);
}

#[test]
fn non_restoring_division() {
    let result = method(Operation::Division, "non-restoring")
        .calculate(&Operands::pair(13, 5))
        .unwrap();
    assert_eq!(result.final_answer, FinalAnswer::quotient_remainder(2, 3));
}

#[test]
fn twos_complement_in_an_eight_bit_register() {
    let twos = method(Operation::Subtraction, "twos-complement");
    let result = twos.calculate(&Operands::pair(15, 3)).unwrap();
    assert_eq!(result.final_answer, FinalAnswer::integer(12));

    let out_of_range = Operands::pair(-120, 100);
    assert!(!twos.validate_input(&out_of_range).valid);
    assert!(matches!(
        twos.calculate(&out_of_range),
        Err(CalcError::OutOfRange { .. })
    ));
}

#[test]
fn synthetic_division_of_a_cubic() {
    let result = method(Operation::Division, "synthetic")
        .calculate(&Operands::polynomial(vec![1, 5, 3, -8], 2))
        .unwrap();
    assert_eq!(
        result.final_answer,
        FinalAnswer::Polynomial {
            quotient: vec![1, 7, 17],
            remainder: 26,
        }
    );
    assert!(result.verification.correct);
}

#[test]
fn zero_divisor_fails_fast_everywhere() {
    for division in default_registry().get_all_methods(Operation::Division) {
        if division.id() == "synthetic" {
            continue;
        }
        let outcome = division.calculate(&Operands::pair(7, 0));
        assert!(
            matches!(outcome, Err(CalcError::DivisionByZero { .. })),
            "{} accepted a zero divisor",
            division.id()
        );
        assert!(!division.validate_input(&Operands::pair(7, 0)).valid);
    }
}

#[test]
fn wrong_operand_shape_is_rejected() {
    let result = method(Operation::Addition, "standard")
        .calculate(&Operands::polynomial(vec![1, 2], 3));
    assert!(matches!(result, Err(CalcError::OperandShape { .. })));
}

#[test]
fn registry_lookups_are_idempotent() {
    let first = method(Operation::Multiplication, "karatsuba");
    let second = method(Operation::Multiplication, "karatsuba");
    assert!(std::ptr::addr_eq(first, second));
    assert!(default_registry()
        .get_method_by_name("multiplication", "no-such-method")
        .is_none());
    assert!(default_registry()
        .get_method_by_name("exponentiation", "karatsuba")
        .is_none());
}

#[test]
fn every_example_runs_and_verifies() {
    for operation in Operation::ALL {
        for m in default_registry().get_all_methods(operation) {
            let example = m.example();
            let result = m
                .calculate(&example.operands)
                .unwrap_or_else(|e| panic!("{} example failed: {e}", m.id()));
            assert!(result.verification.correct, "{} example", m.id());
            assert_eq!(result.method, m.id());
        }
    }
}
