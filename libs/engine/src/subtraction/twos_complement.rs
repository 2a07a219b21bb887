//! Two's-complement subtraction in a fixed-width register
//!
//! `a - b` is computed as `a + (!b + 1)` with a ripple-carry adder. By
//! default a value outside the signed range of the register is reported as
//! [`CalcError::OutOfRange`] rather than wrapped; [`OverflowMode::Wrap`]
//! returns what the hardware would produce instead.

use crate::digits::{mask, to_binary};
use crate::method::{expect_pair, finish, validate_pair, CalculationMethod};
use ganita_config::{defaults, OverflowMode, TwosComplementConfig};
use ganita_types::{
    CalcError, CalcResult, CalculationResult, Example, FinalAnswer, MethodCategory,
    MethodMetadata, Operands, Operation, Origin, SpeedRating, Step, StepTrace, StepType,
    Validation, Verification,
};
use serde_json::json;
use tracing::debug;

pub static METADATA: MethodMetadata = MethodMetadata {
    id: "twos-complement",
    name: "Two's-Complement Subtraction",
    operation: Operation::Subtraction,
    category: MethodCategory::Computer,
    difficulty: 4,
    display_order: 2,
    origin: Origin {
        culture: "Digital electronics",
        time_period: "1940s (EDSAC, von Neumann's First Draft)",
        description: "How essentially every modern processor subtracts: negate by \
                      flipping bits and adding one, then add.",
    },
    when_to_use: &[
        "Understanding how computers subtract",
        "Exploring negative numbers in binary",
    ],
    advantages: &[
        "Subtraction reuses the adder circuit",
        "Only one representation of zero",
    ],
    disadvantages: &[
        "Limited to the register's signed range",
        "Binary is hard to read by hand",
    ],
    speed_rating: SpeedRating::VeryFast,
    math_principle: "In w bits, -b ≡ 2^w - b = (!b) + 1 (mod 2^w), so a - b = a + (!b + 1).",
    related_methods: &["standard", "carry-lookahead"],
    time_complexity: "O(w) for a w-bit register",
    recommended_use: "Learning binary arithmetic and processor design",
    alternative: "standard",
};

pub struct TwosComplementSubtraction {
    bits: u32,
    overflow: OverflowMode,
}

impl Default for TwosComplementSubtraction {
    fn default() -> Self {
        Self::new(&TwosComplementConfig::default())
    }
}

/// `new` trusts a validated config; this guards hand-built ones
fn supported_width(bits: u32) -> CalcResult<u32> {
    let (min, max) = (defaults::MIN_REGISTER_BITS, defaults::MAX_REGISTER_BITS);
    if (min..=max).contains(&bits) {
        Ok(bits)
    } else {
        Err(CalcError::UnsupportedWidth {
            method: METADATA.id,
            bits,
            min,
            max,
        })
    }
}

/// Ripple-carry sum of the low `bits` bits, with the carry into each position
fn ripple_add(x: u128, y: u128, bits: u32) -> (u128, Vec<u8>, u8) {
    let mut sum = 0u128;
    let mut carry = 0u8;
    let mut carries_in = Vec::with_capacity(bits as usize);
    for i in 0..bits {
        let xi = ((x >> i) & 1) as u8;
        let yi = ((y >> i) & 1) as u8;
        carries_in.push(carry);
        let s = xi ^ yi ^ carry;
        carry = (xi & yi) | (carry & (xi ^ yi));
        sum |= u128::from(s) << i;
    }
    (sum, carries_in, carry)
}

impl TwosComplementSubtraction {
    pub fn new(config: &TwosComplementConfig) -> Self {
        Self {
            bits: config.bit_width,
            overflow: config.overflow,
        }
    }

    pub fn with_width(bits: u32, overflow: OverflowMode) -> CalcResult<Self> {
        supported_width(bits)?;
        Ok(Self { bits, overflow })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn range(&self) -> (i128, i128) {
        let max = (1i128 << (self.bits - 1)) - 1;
        (-max - 1, max)
    }

    fn encode(&self, value: i64) -> u128 {
        (i128::from(value) as u128) & mask(self.bits)
    }

    fn decode(&self, raw: u128) -> i128 {
        let raw = raw & mask(self.bits);
        if (raw >> (self.bits - 1)) & 1 == 1 {
            raw as i128 - (1i128 << self.bits)
        } else {
            raw as i128
        }
    }

    /// Reduce an exact integer into the register's signed range
    fn wrap(&self, value: i128) -> i128 {
        self.decode((value as u128) & mask(self.bits))
    }

    /// First value that does not fit the register, if any
    fn first_out_of_range(&self, num1: i64, num2: i64) -> Option<i128> {
        let (min, max) = self.range();
        let difference = i128::from(num1) - i128::from(num2);
        let check_difference = self.overflow == OverflowMode::Reject;
        [i128::from(num1), i128::from(num2)]
            .into_iter()
            .chain(check_difference.then_some(difference))
            .find(|v| *v < min || *v > max)
    }

    pub fn check(&self, num1: i64, num2: i64) -> Validation {
        if let Err(err) = supported_width(self.bits) {
            return Validation::invalid(err.to_string());
        }
        match self.first_out_of_range(num1, num2) {
            Some(value) => {
                let (min, max) = self.range();
                Validation::invalid(format!(
                    "{value} does not fit in {} bits (range {min} to {max})",
                    self.bits
                ))
            }
            None => Validation::ok(),
        }
    }

    pub fn subtract(&self, num1: i64, num2: i64) -> CalcResult<CalculationResult> {
        debug!(method = METADATA.id, num1, num2, bits = self.bits, "Two's-complement subtraction");
        supported_width(self.bits)?;
        if let Some(value) = self.first_out_of_range(num1, num2) {
            return Err(CalcError::out_of_range(value, self.bits));
        }
        let bits = self.bits;
        let validation = Validation::ok();

        let a = self.encode(num1);
        let b = self.encode(num2);

        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::Input, format!("Represent in {bits}-bit two's complement"))
                .calculation(format!(
                    "{num1} = {}\n{num2} = {}",
                    to_binary(a, bits),
                    to_binary(b, bits)
                ))
                .explanation(format!(
                    "A {bits}-bit register holds {} to {}",
                    self.range().0,
                    self.range().1
                ))
                .bits(to_binary(a, bits))
                .result(json!({
                    "minuend": to_binary(a, bits),
                    "subtrahend": to_binary(b, bits),
                    "bits": bits,
                })),
        );

        let flipped = !b & mask(bits);
        trace.push(
            Step::builder(StepType::BinaryOperation, "Flip every bit of the subtrahend")
                .description("One's complement: 0 becomes 1 and 1 becomes 0")
                .calculation(format!("NOT {} = {}", to_binary(b, bits), to_binary(flipped, bits)))
                .bits(to_binary(flipped, bits))
                .result(json!({ "onesComplement": to_binary(flipped, bits) })),
        );

        let (negated, _, _) = ripple_add(flipped, 1, bits);
        trace.push(
            Step::builder(StepType::BinaryOperation, "Add 1 to get the negation")
                .calculation(format!(
                    "{} + 1 = {}",
                    to_binary(flipped, bits),
                    to_binary(negated, bits)
                ))
                .explanation(format!("{} now represents {}", to_binary(negated, bits), self.decode(negated)))
                .bits(to_binary(negated, bits))
                .result(json!({ "negated": to_binary(negated, bits), "value": self.decode(negated).to_string() })),
        );

        let (sum, carries_in, carry_out) = ripple_add(a, negated, bits);
        for i in 0..bits {
            let (ai, bi) = (((a >> i) & 1) as u8, ((negated >> i) & 1) as u8);
            let ci = carries_in[i as usize];
            let si = ((sum >> i) & 1) as u8;
            trace.push(
                Step::builder(StepType::BinaryOperation, format!("Add bit {i}"))
                    .calculation(format!("{ai} + {bi} + carry {ci} = {si}"))
                    .position(i as usize)
                    .digit(si)
                    .carry(i64::from(ci))
                    .result(json!({ "bit": i, "sum": si, "carryIn": ci })),
            );
        }

        if carry_out == 1 {
            trace.push(
                Step::builder(StepType::Info, "Discard the carry out")
                    .description(format!("The carry out of bit {} does not fit the register", bits - 1))
                    .carry(1)
                    .result(json!({ "carryOut": 1 })),
            );
        }

        let value = self.decode(sum);
        let answer = FinalAnswer::integer(value);
        let reference = i128::from(num1) - i128::from(num2);
        let expected = match self.overflow {
            OverflowMode::Reject => reference,
            OverflowMode::Wrap => self.wrap(reference),
        };
        if value != reference {
            trace.push(
                Step::builder(StepType::Info, "Register overflow")
                    .description(format!("{reference} wrapped around to {value}"))
                    .result(json!({ "exact": reference.to_string(), "wrapped": value.to_string() })),
            );
        }
        trace.push(
            Step::builder(StepType::Result, "Final answer")
                .calculation(format!("{} = {value}", to_binary(sum, bits)))
                .bits(to_binary(sum, bits))
                .result(json!({ "binary": to_binary(sum, bits), "value": value.to_string() })),
        );

        let verification = Verification::exact(FinalAnswer::integer(expected), &answer);
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

impl CalculationMethod for TwosComplementSubtraction {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn validate_input(&self, operands: &Operands) -> Validation {
        validate_pair(operands, |a, b| self.check(a, b))
    }

    fn calculate(&self, operands: &Operands) -> CalcResult<CalculationResult> {
        let (num1, num2) = expect_pair(&METADATA, operands)?;
        self.subtract(num1, num2)
    }

    fn example(&self) -> Example {
        Example {
            operands: Operands::pair(15, 3),
            description: "15 - 3 as 00001111 + 11111101",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_difference() {
        let result = TwosComplementSubtraction::default().subtract(15, 3).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(12));
        assert!(result.verification.correct);
        let negation = &result.steps[2];
        assert_eq!(negation.bits.as_deref(), Some("11111101"));
    }

    #[test]
    fn test_negative_difference() {
        let result = TwosComplementSubtraction::default().subtract(3, 15).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-12));
        assert_eq!(result.steps.last().unwrap().bits.as_deref(), Some("11110100"));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = TwosComplementSubtraction::default()
            .subtract(-120, 100)
            .unwrap_err();
        assert_eq!(err, CalcError::out_of_range(-220, 8));
        assert!(!TwosComplementSubtraction::default()
            .validate_input(&Operands::pair(-120, 100))
            .valid);
    }

    #[test]
    fn test_operand_outside_register_rejected() {
        let err = TwosComplementSubtraction::default()
            .subtract(200, 1)
            .unwrap_err();
        assert_eq!(err, CalcError::out_of_range(200, 8));
    }

    #[test]
    fn test_most_negative_subtrahend() {
        let result = TwosComplementSubtraction::default()
            .subtract(-1, -128)
            .unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(127));
        assert!(result.verification.correct);
    }

    #[test]
    fn test_wrap_mode_matches_hardware() {
        let method = TwosComplementSubtraction::with_width(8, OverflowMode::Wrap).unwrap();
        let result = method.subtract(-120, 100).unwrap();
        // -220 + 256 = 36
        assert_eq!(result.final_answer, FinalAnswer::integer(36));
        assert!(result.verification.correct);
        assert!(result.steps.iter().any(|s| s.title == "Register overflow"));
    }

    #[test]
    fn test_wider_register() {
        let method = TwosComplementSubtraction::with_width(16, OverflowMode::Reject).unwrap();
        let result = method.subtract(-120, 100).unwrap();
        assert_eq!(result.final_answer, FinalAnswer::integer(-220));
    }

    #[test]
    fn test_unsupported_widths_fail_without_panicking() {
        for bits in [0, 1, 33, 64, 128, u32::MAX] {
            assert!(matches!(
                TwosComplementSubtraction::with_width(bits, OverflowMode::Reject),
                Err(CalcError::UnsupportedWidth { .. })
            ));

            let config = TwosComplementConfig {
                bit_width: bits,
                overflow: OverflowMode::Wrap,
            };
            let method = TwosComplementSubtraction::new(&config);
            assert!(!method.validate_input(&Operands::pair(0, 0)).valid);
            assert!(matches!(
                method.subtract(0, 0),
                Err(CalcError::UnsupportedWidth { bits: b, min: 2, max: 32, .. }) if b == bits
            ));
        }
        assert!(TwosComplementSubtraction::with_width(2, OverflowMode::Reject).is_ok());
        assert!(TwosComplementSubtraction::with_width(32, OverflowMode::Reject).is_ok());
    }
}
