//! Synthra Common Library
//!
//! Shared types, constants, math, and events for the Synthra
//! collateral-backed synthetic-asset protocol.
//!
//! All accounting is integer-only: amounts are `u128`, percentages use
//! denominator 100, prices are 18-decimal fixed point, and every
//! multiply-then-divide goes through 256-bit intermediates.

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod types;

// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use events::*;
pub use math::*;
pub use types::*;
