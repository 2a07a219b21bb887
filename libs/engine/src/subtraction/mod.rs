//! Subtraction methods

pub mod standard;
pub mod twos_complement;

pub use standard::StandardSubtraction;
pub use twos_complement::TwosComplementSubtraction;
