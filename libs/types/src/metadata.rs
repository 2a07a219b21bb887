//! Static descriptive records for each calculation method
//!
//! Method modules declare their metadata as a `static` using struct-update
//! syntax over [`MethodMetadata::BLANK`], so any field a module leaves out
//! takes a defined default.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Arithmetic operation a method implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    /// Infix symbol used in step calculations
    pub fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "addition" | "add" => Ok(Operation::Addition),
            "subtraction" | "sub" => Ok(Operation::Subtraction),
            "multiplication" | "mul" => Ok(Operation::Multiplication),
            "division" | "div" => Ok(Operation::Division),
            other => Err(format!("unknown operation '{other}'")),
        }
    }
}

/// Family a method belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodCategory {
    Standard,
    Vedic,
    Ancient,
    Computer,
    Specialized,
}

/// Qualitative speed of a method when done by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedRating {
    VerySlow,
    Slow,
    Medium,
    Fast,
    VeryFast,
}

/// Where and when a method comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    pub culture: &'static str,
    pub time_period: &'static str,
    pub description: &'static str,
}

/// Immutable description of one calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub operation: Operation,
    pub category: MethodCategory,
    /// Ordinal 1 (easiest) to 5 (hardest)
    pub difficulty: u8,
    pub display_order: u8,
    pub origin: Origin,
    pub when_to_use: &'static [&'static str],
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
    pub speed_rating: SpeedRating,
    pub math_principle: &'static str,
    pub related_methods: &'static [&'static str],
    pub time_complexity: &'static str,
    pub recommended_use: &'static str,
    pub alternative: &'static str,
}

impl MethodMetadata {
    /// Defaults for every field; method modules override what they know
    pub const BLANK: MethodMetadata = MethodMetadata {
        id: "",
        name: "",
        operation: Operation::Addition,
        category: MethodCategory::Standard,
        difficulty: 1,
        display_order: 0,
        origin: Origin {
            culture: "",
            time_period: "",
            description: "",
        },
        when_to_use: &[],
        advantages: &[],
        disadvantages: &[],
        speed_rating: SpeedRating::Medium,
        math_principle: "",
        related_methods: &[],
        time_complexity: "",
        recommended_use: "",
        alternative: "",
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: MethodMetadata = MethodMetadata {
        id: "sample",
        name: "Sample Method",
        operation: Operation::Division,
        difficulty: 3,
        ..MethodMetadata::BLANK
    };

    #[test]
    fn test_struct_update_keeps_defaults() {
        assert_eq!(SAMPLE.id, "sample");
        assert_eq!(SAMPLE.difficulty, 3);
        assert_eq!(SAMPLE.category, MethodCategory::Standard);
        assert!(SAMPLE.related_methods.is_empty());
        assert_eq!(SAMPLE.origin.culture, "");
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("Multiplication".parse::<Operation>(), Ok(Operation::Multiplication));
        assert_eq!("div".parse::<Operation>(), Ok(Operation::Division));
        assert!("exponentiation".parse::<Operation>().is_err());
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let value = serde_json::to_value(SAMPLE).unwrap();
        assert_eq!(value["displayOrder"], 0);
        assert_eq!(value["operation"], "division");
        assert_eq!(value["speedRating"], "MEDIUM");
    }
}
