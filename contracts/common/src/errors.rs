//! Error Types for the Synthra Protocol
//!
//! Typed errors with struct payloads so callers can act on the exact
//! failure, plus stable error codes for log indexing.

use crate::types::{Address, Symbol};

/// Result type alias for Synthra operations
pub type SynthResult<T> = Result<T, SynthError>;

/// Main error enum for all Synthra protocol errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    // ============ Configuration Errors ============
    /// Symbol was never registered
    UnknownCollateral { symbol: Symbol },

    /// Collateral type exists but is disabled
    CollateralDisabled { symbol: Symbol },

    /// Symbol is already registered and enabled
    CollateralExists { symbol: Symbol },

    // ============ Solvency Errors ============
    /// Projected ratio after mint falls below the minimum
    InsufficientCollateral { ratio: u128, required: u128 },

    /// Post-withdrawal ratio falls below the minimum
    WouldBeUndercollateralized { ratio: u128, required: u128 },

    /// Burn amount exceeds outstanding debt
    BurnExceedsDebt { burn: u128, debt: u128 },

    /// Withdraw amount exceeds held collateral
    WithdrawExceedsCollateral { withdraw: u128, collateral: u128 },

    /// Liquidation target still meets its minimum ratio
    VaultIsSafe { ratio: u128 },

    /// Operation requires a non-empty vault
    EmptyVault,

    // ============ Oracle Errors ============
    /// Feed reported a zero or negative price
    InvalidPrice { reported: i128 },

    // ============ Transfer Errors ============
    /// Supplied native funds do not match the deposit amount
    DepositMismatch { supplied: u128, expected: u128 },

    /// Native funds supplied on an external-asset operation
    UnexpectedNativeFunds { supplied: u128 },

    /// External token transfer or pull failed
    TransferFailed { token: Address, amount: u128 },

    /// Native asset transfer failed
    NativeTransferFailed { to: Address, amount: u128 },

    /// Stable ledger refused the mint
    MintFailed { to: Address, amount: u128 },

    /// Stable ledger refused the burn
    BurnFailed { from: Address, amount: u128 },

    // ============ Authorization Errors ============
    /// Caller lacks the required capability
    Unauthorized { caller: Address },

    // ============ State Errors ============
    /// System is halted
    Halted,

    /// Operation is only permitted while halted
    NotHalted,

    /// Migration is disabled or no successor is configured
    MigrationDisabled,

    /// Successor rejected the vault hand-off
    MigrationFailed,

    /// Nested call into a state-changing entry point
    ReentrantCall,

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Division by zero
    DivisionByZero,
}

impl SynthError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCollateral { .. } => "E001_UNKNOWN_COLLATERAL",
            Self::CollateralDisabled { .. } => "E002_COLLATERAL_DISABLED",
            Self::CollateralExists { .. } => "E003_COLLATERAL_EXISTS",
            Self::InsufficientCollateral { .. } => "E010_INSUFFICIENT_COLLATERAL",
            Self::WouldBeUndercollateralized { .. } => "E011_UNDERCOLLATERALIZED",
            Self::BurnExceedsDebt { .. } => "E012_BURN_EXCEEDS_DEBT",
            Self::WithdrawExceedsCollateral { .. } => "E013_WITHDRAW_EXCEEDS_COLLATERAL",
            Self::VaultIsSafe { .. } => "E014_VAULT_IS_SAFE",
            Self::EmptyVault => "E015_EMPTY_VAULT",
            Self::InvalidPrice { .. } => "E020_INVALID_PRICE",
            Self::DepositMismatch { .. } => "E030_DEPOSIT_MISMATCH",
            Self::UnexpectedNativeFunds { .. } => "E031_UNEXPECTED_NATIVE_FUNDS",
            Self::TransferFailed { .. } => "E032_TRANSFER_FAILED",
            Self::NativeTransferFailed { .. } => "E033_NATIVE_TRANSFER_FAILED",
            Self::MintFailed { .. } => "E034_MINT_FAILED",
            Self::BurnFailed { .. } => "E035_BURN_FAILED",
            Self::Unauthorized { .. } => "E040_UNAUTHORIZED",
            Self::Halted => "E050_HALTED",
            Self::NotHalted => "E051_NOT_HALTED",
            Self::MigrationDisabled => "E052_MIGRATION_DISABLED",
            Self::MigrationFailed => "E053_MIGRATION_FAILED",
            Self::ReentrantCall => "E054_REENTRANT_CALL",
            Self::Overflow => "E060_OVERFLOW",
            Self::DivisionByZero => "E061_DIV_ZERO",
        }
    }

    /// Returns true if the caller can fix this error and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientCollateral { .. }
                | Self::WouldBeUndercollateralized { .. }
                | Self::BurnExceedsDebt { .. }
                | Self::WithdrawExceedsCollateral { .. }
                | Self::DepositMismatch { .. }
        )
    }
}
