//! Digit, place-value and binary helpers shared by the method modules

/// Decimal digits of `n`, most significant first. Zero yields `[0]`.
pub fn decimal_digits(n: u128) -> Vec<u8> {
    n.to_string().bytes().map(|b| b - b'0').collect()
}

/// Inverse of [`decimal_digits`]
pub fn from_digits(digits: &[u8]) -> u128 {
    digits
        .iter()
        .fold(0u128, |acc, &d| acc * 10 + u128::from(d))
}

pub fn digit_count(n: u128) -> u32 {
    if n == 0 {
        1
    } else {
        n.ilog10() + 1
    }
}

/// `10^exp`; callers keep `exp` within u128 range (≤ 38)
pub fn pow10(exp: u32) -> u128 {
    10u128.pow(exp)
}

/// Power of ten closest to `n`; ties go to the larger power
pub fn nearest_power_of_ten(n: u128) -> u128 {
    if n <= 1 {
        return 1;
    }
    let lower = pow10(digit_count(n) - 1);
    let upper = lower * 10;
    if upper - n <= n - lower {
        upper
    } else {
        lower
    }
}

/// Left-pad the digit string of `n` with zeros to `width`
pub fn padded_digits(n: u128, width: usize) -> Vec<u8> {
    let digits = decimal_digits(n);
    let mut padded = vec![0; width.saturating_sub(digits.len())];
    padded.extend(digits);
    padded
}

/// Name of a decimal place counted from the right (0 = ones)
pub fn place_name(offset: usize) -> String {
    match offset {
        0 => "ones".to_string(),
        1 => "tens".to_string(),
        2 => "hundreds".to_string(),
        3 => "thousands".to_string(),
        4 => "ten-thousands".to_string(),
        5 => "hundred-thousands".to_string(),
        6 => "millions".to_string(),
        n => format!("10^{n}"),
    }
}

pub fn bit_length(n: u128) -> u32 {
    128 - n.leading_zeros()
}

/// Binary string of the low `width` bits of `value`
pub fn to_binary(value: u128, width: u32) -> String {
    (0..width)
        .rev()
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// All-ones mask covering `width` bits (`width` ≤ 127)
pub fn mask(width: u32) -> u128 {
    (1u128 << width) - 1
}

/// Reattach a sign to a magnitude
pub fn signed(negative: bool, magnitude: u128) -> i128 {
    if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits_round_trip() {
        assert_eq!(decimal_digits(0), vec![0]);
        assert_eq!(decimal_digits(4368), vec![4, 3, 6, 8]);
        assert_eq!(from_digits(&[0, 4, 3, 2]), 432);
    }

    #[test]
    fn test_nearest_power_of_ten() {
        assert_eq!(nearest_power_of_ten(0), 1);
        assert_eq!(nearest_power_of_ten(9), 10);
        assert_eq!(nearest_power_of_ten(12), 10);
        assert_eq!(nearest_power_of_ten(97), 100);
        assert_eq!(nearest_power_of_ten(112), 100);
        assert_eq!(nearest_power_of_ten(3), 1);
        assert_eq!(nearest_power_of_ten(55), 100);
    }

    #[test]
    fn test_binary_helpers() {
        assert_eq!(to_binary(13, 8), "00001101");
        assert_eq!(bit_length(13), 4);
        assert_eq!(bit_length(0), 0);
        assert_eq!(mask(8), 0xFF);
    }

    #[test]
    fn test_padded_digits() {
        assert_eq!(padded_digits(42, 4), vec![0, 0, 4, 2]);
        assert_eq!(padded_digits(12345, 3), vec![1, 2, 3, 4, 5]);
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(1000), 4);
    }
}
