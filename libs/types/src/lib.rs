//! # Ganita Shared Types
//!
//! Vocabulary shared by every calculation method: steps, method metadata,
//! operands and the result envelope.
//!
//! ## Design Philosophy
//!
//! - **Uniform Output**: Every method produces the same [`CalculationResult`] shape
//! - **Defaults Everywhere**: Omitted step fields take a defined default, never absent
//! - **Immutable Metadata**: [`MethodMetadata`] values are `'static` and never mutated
//! - **One Error Convention**: Fatal input problems surface as [`CalcError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ganita_types::{Step, StepTrace, StepType};
//! use serde_json::json;
//!
//! let mut trace = StepTrace::new();
//! trace.push(Step::builder(StepType::Input, "Inputs").calculation("247 + 185"));
//! trace.push(
//!     Step::builder(StepType::Result, "Answer")
//!         .calculation("432")
//!         .result(json!({ "value": 432 })),
//! );
//!
//! let steps = trace.into_steps();
//! assert_eq!(steps[1].step_number, 2);
//! ```

pub mod errors;
pub mod metadata;
pub mod operands;
pub mod result;
pub mod step;

pub use errors::{CalcError, CalcResult, Validation};
pub use metadata::{MethodCategory, MethodMetadata, Operation, Origin, SpeedRating};
pub use operands::{Example, Operands};
pub use result::{CalculationResult, FinalAnswer, Verification};
pub use step::{Step, StepBuilder, StepTrace, StepType};

pub use rust_decimal::Decimal;
