//! # Ganita Engine - Multi-Method Arithmetic with Replayable Traces
//!
//! ## Purpose
//!
//! Computes addition, subtraction, multiplication and division with many
//! historical and computational algorithms. Every calculation returns the
//! full sequence of teaching steps alongside the answer and a self-check
//! against the reference operation.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`Operands`](ganita_types::Operands) from a UI, the `ganita` CLI or tests
//! - **Output Destinations**: [`CalculationResult`](ganita_types::CalculationResult) rendered step by step
//! - **Configuration**: [`EngineConfig`](ganita_config::EngineConfig) sets register widths, iteration counts and tolerances
//! - **Lookup**: [`Registry`] is the only surface a consumer needs
//!
//! ## Architecture Role
//!
//! ```text
//! Operands ──► Registry ──► CalculationMethod::calculate ──► CalculationResult
//!                 │                    │                        ├─ steps (numbered, RESULT last)
//!          EngineConfig           StepTrace                     ├─ final_answer
//!                                                               └─ verification
//! ```
//!
//! Methods are pure: no state survives a call, so any method can be used from
//! several threads at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use ganita_engine::{default_registry, Operands, Operation};
//!
//! let karatsuba = default_registry()
//!     .get_method(Operation::Multiplication, "karatsuba")
//!     .unwrap();
//! let result = karatsuba.calculate(&Operands::pair(56, 78)).unwrap();
//! assert_eq!(result.final_answer.as_integer(), Some(4368));
//! assert!(result.verification.correct);
//! ```

pub mod addition;
pub mod digits;
pub mod division;
pub mod method;
pub mod multiplication;
pub mod registry;
pub mod subtraction;

pub use method::CalculationMethod;
pub use registry::{default_registry, Comparison, Registry};

pub use ganita_types::{
    CalcError, CalcResult, CalculationResult, FinalAnswer, MethodMetadata, Operands, Operation,
    Step, StepType, Validation,
};
