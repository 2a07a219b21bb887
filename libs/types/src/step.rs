//! Computation steps and the trace that numbers them
//!
//! A [`Step`] is one unit of explanation. Methods never set `step_number`
//! themselves; they hand a [`StepBuilder`] to [`StepTrace::push`], which
//! assigns the next 1-based index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of step tags consumers pattern-match on to interpret `result`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    Input,
    Calculation,
    Carry,
    Borrow,
    PartialProduct,
    AddDiagonal,
    Shift,
    Divide,
    Multiply,
    Subtract,
    BringDown,
    Remainder,
    Result,
    Animation,
    BinaryOperation,
    Visualization,
    Info,
}

impl StepType {
    /// Wire name used by serialized traces
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Input => "INPUT",
            StepType::Calculation => "CALCULATION",
            StepType::Carry => "CARRY",
            StepType::Borrow => "BORROW",
            StepType::PartialProduct => "PARTIAL_PRODUCT",
            StepType::AddDiagonal => "ADD_DIAGONAL",
            StepType::Shift => "SHIFT",
            StepType::Divide => "DIVIDE",
            StepType::Multiply => "MULTIPLY",
            StepType::Subtract => "SUBTRACT",
            StepType::BringDown => "BRING_DOWN",
            StepType::Remainder => "REMAINDER",
            StepType::Result => "RESULT",
            StepType::Animation => "ANIMATION",
            StepType::BinaryOperation => "BINARY_OPERATION",
            StepType::Visualization => "VISUALIZATION",
            StepType::Info => "INFO",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of explanation in a computation trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step_number: u32,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub title: String,
    pub description: String,
    pub calculation: String,
    pub explanation: String,
    /// Opaque payload; its shape depends on `step_type`
    pub result: Value,
    pub carry: Option<i64>,
    pub borrow: Option<i64>,
    pub partial_product: Option<i128>,
    pub position: Option<usize>,
    pub digit: Option<u8>,
    pub bits: Option<String>,
    pub visualization: Option<Value>,
    pub animation_hint: Option<String>,
}

impl Step {
    /// Start a step of the given kind. Every field not set on the builder
    /// takes its default: empty string, `None`, or an empty `result` object.
    pub fn builder(step_type: StepType, title: impl Into<String>) -> StepBuilder {
        StepBuilder {
            step_type,
            title: title.into(),
            description: String::new(),
            calculation: String::new(),
            explanation: String::new(),
            result: Value::Object(Map::new()),
            carry: None,
            borrow: None,
            partial_product: None,
            position: None,
            digit: None,
            bits: None,
            visualization: None,
            animation_hint: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.step_type == StepType::Result
    }
}

/// Unnumbered step under construction
#[derive(Debug, Clone)]
#[must_use]
pub struct StepBuilder {
    step_type: StepType,
    title: String,
    description: String,
    calculation: String,
    explanation: String,
    result: Value,
    carry: Option<i64>,
    borrow: Option<i64>,
    partial_product: Option<i128>,
    position: Option<usize>,
    digit: Option<u8>,
    bits: Option<String>,
    visualization: Option<Value>,
    animation_hint: Option<String>,
}

impl StepBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = calculation.into();
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Structured payload. Non-object values are wrapped as `{ "value": .. }`
    /// so `result` is always an associative record.
    pub fn result(mut self, result: Value) -> Self {
        self.result = match result {
            Value::Object(_) => result,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Value::Object(map)
            }
        };
        self
    }

    pub fn carry(mut self, carry: i64) -> Self {
        self.carry = Some(carry);
        self
    }

    pub fn borrow(mut self, borrow: i64) -> Self {
        self.borrow = Some(borrow);
        self
    }

    pub fn partial_product(mut self, partial_product: i128) -> Self {
        self.partial_product = Some(partial_product);
        self
    }

    pub fn position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn digit(mut self, digit: u8) -> Self {
        self.digit = Some(digit);
        self
    }

    pub fn bits(mut self, bits: impl Into<String>) -> Self {
        self.bits = Some(bits.into());
        self
    }

    pub fn visualization(mut self, visualization: Value) -> Self {
        self.visualization = Some(visualization);
        self
    }

    pub fn animation_hint(mut self, hint: impl Into<String>) -> Self {
        self.animation_hint = Some(hint.into());
        self
    }

    fn build(self, step_number: u32) -> Step {
        Step {
            step_number,
            step_type: self.step_type,
            title: self.title,
            description: self.description,
            calculation: self.calculation,
            explanation: self.explanation,
            result: self.result,
            carry: self.carry,
            borrow: self.borrow,
            partial_product: self.partial_product,
            position: self.position,
            digit: self.digit,
            bits: self.bits,
            visualization: self.visualization,
            animation_hint: self.animation_hint,
        }
    }
}

/// Ordered, auto-numbered sequence of steps for one calculation
#[derive(Debug, Clone, Default)]
pub struct StepTrace {
    steps: Vec<Step>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return the number it was given
    pub fn push(&mut self, builder: StepBuilder) -> u32 {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(builder.build(step_number));
        step_number
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_fills_defaults() {
        let mut trace = StepTrace::new();
        trace.push(Step::builder(StepType::Info, "Note"));
        let step = &trace.steps()[0];

        assert_eq!(step.step_number, 1);
        assert_eq!(step.description, "");
        assert_eq!(step.calculation, "");
        assert_eq!(step.explanation, "");
        assert_eq!(step.result, json!({}));
        assert!(step.carry.is_none());
        assert!(step.visualization.is_none());
        assert!(step.animation_hint.is_none());
    }

    #[test]
    fn test_trace_numbers_steps_sequentially() {
        let mut trace = StepTrace::new();
        for kind in [StepType::Input, StepType::Carry, StepType::Result] {
            trace.push(Step::builder(kind, kind.as_str()));
        }

        let numbers: Vec<u32> = trace.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(trace.last().unwrap().is_terminal());
    }

    #[test]
    fn test_scalar_result_is_wrapped_in_object() {
        let mut trace = StepTrace::new();
        trace.push(Step::builder(StepType::Result, "Answer").result(json!(42)));
        assert_eq!(trace.steps()[0].result, json!({ "value": 42 }));
    }

    #[test]
    fn test_step_serializes_with_wire_names() {
        let mut trace = StepTrace::new();
        trace.push(
            Step::builder(StepType::BringDown, "Bring down")
                .digit(5)
                .position(2),
        );
        let value = serde_json::to_value(&trace.steps()[0]).unwrap();

        assert_eq!(value["type"], json!("BRING_DOWN"));
        assert_eq!(value["stepNumber"], json!(1));
        assert_eq!(value["digit"], json!(5));
        assert_eq!(value["animationHint"], Value::Null);
    }
}
