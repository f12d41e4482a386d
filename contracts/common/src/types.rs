//! Core Types for the Synthra Protocol
//!
//! Fundamental data structures shared by all protocol crates.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for account identities (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for collateral symbols (fixed-width, zero-padded)
pub type Symbol = [u8; 32];

/// Derives a deterministic address from a human-readable label.
///
/// Used for well-known protocol accounts (reserve, owner in tests) so that
/// fixtures and deployments agree on identities without a keystore.
pub fn derive_address(label: &str) -> Address {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Builds a fixed-width symbol from an ASCII ticker, zero-padded.
///
/// Panics if the ticker is longer than 32 bytes; tickers are short
/// compile-time literals in practice.
pub fn symbol(ticker: &str) -> Symbol {
    let bytes = ticker.as_bytes();
    assert!(bytes.len() <= 32, "symbol too long");
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(bytes);
    out
}

// ============ Collateral Types ============

/// The underlying asset backing a collateral class.
///
/// Explicit tagged variant instead of a sentinel address: operations
/// dispatch on this once and never compare against magic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum AssetRef {
    /// The host chain's native asset
    Native,
    /// An external token contract
    External(Address),
}

/// Per-symbol collateral configuration.
///
/// Never deleted, only disabled. Ratio, penalty, and fee share the
/// percentage base (denominator 100) and are deliberately not validated
/// against each other; penalty + fee > 100 is a representable (if unsafe)
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CollateralType {
    /// Underlying asset
    pub asset: AssetRef,
    /// Price feed reference for this asset
    pub oracle: Address,
    /// Minimum collateralization ratio (percent, e.g. 150 = 150%)
    pub min_ratio: u128,
    /// Decimal precision of the asset's native units
    pub decimals: u8,
    /// Whether new operations are accepted
    pub enabled: bool,
    /// Liquidation penalty awarded to the liquidator (percent)
    pub penalty_pct: u128,
    /// Protocol fee carved out of minted amounts (percent)
    pub fee_pct: u128,
}

// ============ Vault Types ============

/// A user's position in one collateral class.
///
/// Created implicitly on first deposit; zeroed by full liquidation or
/// migration. Collateral is in the asset's native units, debt in stable
/// base units (18 decimals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Vault {
    /// Collateral held, in asset native units
    pub collateral: u128,
    /// Debt owed, in stable base units
    pub debt: u128,
}

impl Vault {
    /// Returns true if the vault holds nothing and owes nothing
    pub fn is_empty(&self) -> bool {
        self.collateral == 0 && self.debt == 0
    }
}

// ============ Call Context ============

/// Identity and environment of the current operation.
///
/// The host authenticates the caller; the engine only checks the injected
/// identity against its configured capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Authenticated caller identity
    pub caller: Address,
    /// Native funds supplied with the call
    pub native_value: u128,
    /// Current settlement block index
    pub block: u64,
}

impl CallContext {
    /// Context for a plain call carrying no native funds
    pub fn new(caller: Address, block: u64) -> Self {
        Self {
            caller,
            native_value: 0,
            block,
        }
    }

    /// Context for a call carrying native funds
    pub fn with_value(caller: Address, native_value: u128, block: u64) -> Self {
        Self {
            caller,
            native_value,
            block,
        }
    }
}
