//! Default values for engine tunables
//!
//! These constants are the single source for the numbers the methods use
//! when no configuration file or environment override is present.

/// Register width for two's-complement subtraction
pub const TWOS_COMPLEMENT_BITS: u32 = 8;

/// Narrowest register non-restoring division will use
pub const NON_RESTORING_MIN_BITS: u32 = 8;

/// Widest register supported by the binary methods
pub const MAX_REGISTER_BITS: u32 = 32;

/// Narrowest register supported by the binary methods
pub const MIN_REGISTER_BITS: u32 = 2;

/// Reciprocal refinement iterations for Newton-Raphson division
pub const NEWTON_RAPHSON_ITERATIONS: u32 = 6;

/// Upper bound on configurable Newton-Raphson iterations
pub const NEWTON_RAPHSON_MAX_ITERATIONS: u32 = 64;

/// Accepted absolute error for Newton-Raphson quotients
pub const NEWTON_RAPHSON_TOLERANCE: f64 = 0.0001;

/// Nikhilam is recommended when both operands are within this percent of the base
pub const NIKHILAM_TOLERANCE_PCT: u32 = 10;

/// Paravartya is recommended when the complement is within this percent of the base
pub const PARAVARTYA_TOLERANCE_PCT: u32 = 20;

/// Accepted error for compensated summation, relative to the sum of magnitudes
pub const KAHAN_TOLERANCE: f64 = 1e-9;

/// Log filter used when neither the config nor `RUST_LOG` sets one
pub const LOG_LEVEL: &str = "info";

/// Environment variable prefix for overrides (`GANITA__SECTION__KEY`)
pub const ENV_PREFIX: &str = "GANITA";

/// Separator between prefix, section and key in environment overrides
pub const ENV_SEPARATOR: &str = "__";
