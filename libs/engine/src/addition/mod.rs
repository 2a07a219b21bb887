//! Addition methods

pub mod carry_lookahead;
pub mod kahan;
pub mod standard;

pub use carry_lookahead::CarryLookaheadAddition;
pub use kahan::KahanSummation;
pub use standard::StandardAddition;
