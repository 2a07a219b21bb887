//! # Ganita Engine Configuration
//!
//! Tunables for the calculation methods, with defaults that reproduce the
//! classroom behaviour (8-bit registers, six Newton-Raphson iterations).
//!
//! ## Features
//!
//! - **Defaults**: Named constants for every tunable
//! - **Layered Loading**: Defaults, then an optional TOML file, then `GANITA__*` environment variables
//! - **Validation**: Out-of-range widths and iteration counts are rejected up front
//!
//! ## Usage
//!
//! ```rust
//! use ganita_config::{defaults, EngineConfig};
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.twos_complement.bit_width, defaults::TWOS_COMPLEMENT_BITS);
//! config.validate().unwrap();
//! ```

pub mod defaults;
pub mod engine_config;

pub use engine_config::{
    load_config, EngineConfig, KahanConfig, LoggingConfig, NewtonRaphsonConfig,
    NonRestoringConfig, OverflowMode, TwosComplementConfig, VedicConfig,
};
