//! Lattice (gelosia) multiplication
//!
//! Each grid cell splits its digit product into tens and ones across a
//! diagonal. Every diagonal collects one place value, so summing the
//! diagonals right to left with carries gives the product.

use super::{reference_product, result_step, sign_step, split_signs};
use crate::digits::{decimal_digits, place_name, signed};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_types::{
    CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory, MethodMetadata,
    Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType, Validation,
    Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "lattice",
    name: "Lattice Multiplication",
    operation: Operation::Multiplication,
    category: MethodCategory::Ancient,
    difficulty: 2,
    display_order: 5,
    origin: Origin {
        culture: "Arabic / Italian / Chinese",
        time_period: "Described by Fibonacci in Liber Abaci, 1202",
        description: "Also called gelosia multiplication after the lattice window \
                      screens of Venice.",
    },
    when_to_use: &[
        "Multi-digit multiplication on paper",
        "Separating the times-table work from the adding",
    ],
    advantages: &[
        "All single-digit products are written before any addition",
        "No shifting of partial products",
    ],
    disadvantages: &[
        "Needs a grid drawn in advance",
        "Takes more space than long multiplication",
    ],
    speed_rating: SpeedRating::Medium,
    math_principle: "Cell (i, j) contributes to place 10^(i+j); diagonals group equal \
                     place values.",
    related_methods: &["grade-school", "vedic-urdhva", "abacus"],
    time_complexity: "O(n·m) cells",
    recommended_use: "Visual learners and long multiplication by hand",
    alternative: "grade-school",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeMultiplication;

impl LatticeMultiplication {
    pub fn new() -> Self {
        Self
    }

    pub fn multiply(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, "Lattice multiplication");
        let (negative, a, b) = split_signs(num1, num2);
        let top = decimal_digits(a);
        let side = decimal_digits(b);
        let (rows, cols) = (side.len(), top.len());

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, "Draw the lattice")
                .description(format!("{a} across the top, {b} down the right side"))
                .calculation(format!("{rows} × {cols} grid"))
                .explanation("Draw a diagonal through every cell from top-right to bottom-left")
                .result(json!({ "rows": rows, "cols": cols })),
        );

        let mut grid = vec![vec![(0u8, 0u8); cols]; rows];
        let mut diagonals = vec![0u128; rows + cols];
        for (i, &s) in side.iter().enumerate() {
            for (j, &t) in top.iter().enumerate() {
                let product = s * t;
                let cell = (product / 10, product % 10);
                grid[i][j] = cell;
                let exponent = (rows - 1 - i) + (cols - 1 - j);
                diagonals[exponent] += u128::from(cell.1);
                diagonals[exponent + 1] += u128::from(cell.0);
            }
        }

        let cells: Vec<Vec<String>> = grid
            .iter()
            .map(|row| row.iter().map(|(t, o)| format!("{t}/{o}")).collect())
            .collect();
        trace.push(
            Step::builder(StepType::Visualization, "Fill every cell")
                .description("Write each digit product with tens above the diagonal and ones below")
                .calculation(
                    cells
                        .iter()
                        .zip(&side)
                        .map(|(row, s)| format!("{} | {s}", row.join(" ")))
                        .collect::<Vec<_>>()
                        .join("\n"),
                )
                .visualization(json!({
                    "top": top,
                    "side": side,
                    "cells": grid.iter().map(|row| row.iter().map(|(t, o)| json!([t, o])).collect::<Vec<_>>()).collect::<Vec<_>>(),
                }))
                .result(json!({ "cells": cells })),
        );

        let mut digits = Vec::with_capacity(rows + cols);
        let mut carry = 0u128;
        for (place, &diagonal) in diagonals.iter().enumerate() {
            let sum = diagonal + carry;
            let digit = (sum % 10) as u8;
            let carry_in = carry;
            carry = sum / 10;
            digits.push(digit);
            trace.push(
                Step::builder(
                    StepType::AddDiagonal,
                    format!("Add the {} diagonal", place_name(place)),
                )
                .calculation(format!("{diagonal} + carry {carry_in} = {sum}"))
                .explanation(format!("Write {digit}, carry {carry}"))
                .digit(digit)
                .position(place)
                .carry(carry as i64)
                .result(json!({ "diagonalSum": diagonal.to_string(), "digit": digit })),
            );
        }

        // the top diagonal only ever holds a tens digit, so no carry leaves it
        let magnitude = digits
            .iter()
            .rev()
            .fold(0u128, |acc, &d| acc * 10 + u128::from(d));
        trace.push(
            Step::builder(StepType::Calculation, "Read down the left and along the bottom")
                .calculation(format!("{magnitude}"))
                .explanation("Leading zeros are dropped")
                .result(json!({ "value": magnitude.to_string() })),
        );
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

impl CalculationMethod for LatticeMultiplication {
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
            operands: Operands::pair(47, 36),
            description: "47 × 36 on a 2 × 2 lattice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_lattice() {
        let result = LatticeMultiplication.multiply(47, 36).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(1692));
        assert!(result.verification.correct);

        let grid = result
            .steps
            .iter()
            .find(|s| s.step_type == StepType::Visualization)
            .unwrap();
        // 3 × 4 = 12 sits in the top-left cell
        assert_eq!(grid.visualization.as_ref().unwrap()["cells"][0][0], json!([1, 2]));
    }

    #[test]
    fn test_diagonal_count() {
        let result = LatticeMultiplication.multiply(123, 45).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(5535));
        let diagonals = result
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::AddDiagonal)
            .count();
        assert_eq!(diagonals, 5);
    }

    #[test]
    fn test_negative_operand() {
        let result = LatticeMultiplication.multiply(99, -99).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-9801));
    }
}
