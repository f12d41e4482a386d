//! Synthra Collateral Manager
//!
//! The issuance engine for synUSD: users lock approved collateral in
//! per-symbol vaults and mint stable units against a time-weighted average
//! of the collateral's oracle price. Undercollateralized vaults are
//! liquidated whole, anomalous flow trips a circuit breaker that halts the
//! system, and vaults can be handed to a successor contract when the
//! protocol upgrades.
//!
//! The engine is a deterministic state machine: the host supplies prices,
//! fund movement, and the stable ledger through the [`Externals`] trait and
//! applies one operation at a time. See [`CollateralManager`] for the
//! operation surface.

pub mod breaker;
pub mod external;
pub mod manager;
pub mod oracle;
pub mod registry;
pub mod twap;

pub use breaker::{BreakerConfig, BreakerState, BreakerTrip, CircuitBreaker};
pub use external::Externals;
pub use manager::{CollateralManager, VaultHealth};
pub use registry::CollateralRegistry;
pub use twap::{PriceHistory, TwapBook};

#[cfg(test)]
mod integration_tests;
