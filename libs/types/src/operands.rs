//! Operand shapes accepted at the registry boundary

use serde::{Deserialize, Serialize};

/// Inputs to a calculation
///
/// Most methods take a scalar pair. Ekadhikena squares a single number,
/// synthetic division takes a coefficient vector and Kahan summation takes a
/// series of reals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Operands {
    Pair { num1: i64, num2: i64 },
    Single { num: i64 },
    /// Coefficients most-significant first, divided by `(x - root)`
    Polynomial { coefficients: Vec<i64>, root: i64 },
    Series { values: Vec<f64> },
}

impl Operands {
    pub fn pair(num1: i64, num2: i64) -> Self {
        Operands::Pair { num1, num2 }
    }

    pub fn single(num: i64) -> Self {
        Operands::Single { num }
    }

    pub fn polynomial(coefficients: impl Into<Vec<i64>>, root: i64) -> Self {
        Operands::Polynomial {
            coefficients: coefficients.into(),
            root,
        }
    }

    pub fn series(values: impl Into<Vec<f64>>) -> Self {
        Operands::Series {
            values: values.into(),
        }
    }

    /// Short name of the variant, for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Operands::Pair { .. } => "pair",
            Operands::Single { .. } => "single",
            Operands::Polynomial { .. } => "polynomial",
            Operands::Series { .. } => "series",
        }
    }

    pub fn as_pair(&self) -> Option<(i64, i64)> {
        match self {
            Operands::Pair { num1, num2 } => Some((*num1, *num2)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operands::Pair { num1, num2 } => write!(f, "({num1}, {num2})"),
            Operands::Single { num } => write!(f, "{num}"),
            Operands::Polynomial { coefficients, root } => {
                write!(f, "{coefficients:?} ÷ (x - {root})")
            }
            Operands::Series { values } => write!(f, "{values:?}"),
        }
    }
}

/// Canned demonstration input for a method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub operands: Operands,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands_tagged_serialization() {
        let value = serde_json::to_value(Operands::polynomial([1, 5, 3, -8], 2)).unwrap();
        assert_eq!(value["shape"], "polynomial");
        assert_eq!(value["root"], 2);

        let back: Operands = serde_json::from_value(value).unwrap();
        assert_eq!(back, Operands::polynomial([1, 5, 3, -8], 2));
    }

    #[test]
    fn test_as_pair_only_matches_pairs() {
        assert_eq!(Operands::pair(3, 4).as_pair(), Some((3, 4)));
        assert_eq!(Operands::single(25).as_pair(), None);
        assert_eq!(Operands::series([1.0]).shape(), "series");
    }
}
