//! Collateral Type Registry
//!
//! Per-symbol configuration: minimum ratio, penalty, fee, enablement.
//! Types are never deleted, only disabled; the listed-symbol sequence is
//! append-only and drives the circuit breaker's block-reset sweep.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use synthra_common::errors::{SynthError, SynthResult};
use synthra_common::types::{CollateralType, Symbol};

/// Registry of collateral classes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CollateralRegistry {
    types: BTreeMap<Symbol, CollateralType>,
    /// Every symbol ever registered, in registration order. Entries are
    /// never removed, even when the type is disabled.
    listed: Vec<Symbol>,
}

impl CollateralRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collateral type.
    ///
    /// Fails with `CollateralExists` if the symbol is already registered
    /// and enabled. Re-registering a disabled symbol replaces its
    /// configuration; its listing (and any accumulated price history held
    /// elsewhere) survives.
    pub fn add(&mut self, sym: Symbol, config: CollateralType) -> SynthResult<()> {
        if let Some(existing) = self.types.get(&sym) {
            if existing.enabled {
                return Err(SynthError::CollateralExists { symbol: sym });
            }
        } else {
            self.listed.push(sym);
        }
        self.types.insert(sym, config);
        Ok(())
    }

    /// Updates an existing type's risk parameters and enablement.
    ///
    /// Fails with `UnknownCollateral` if the symbol was never added.
    pub fn update(
        &mut self,
        sym: Symbol,
        min_ratio: u128,
        enabled: bool,
        penalty_pct: u128,
        fee_pct: u128,
    ) -> SynthResult<()> {
        let config = self
            .types
            .get_mut(&sym)
            .ok_or(SynthError::UnknownCollateral { symbol: sym })?;
        config.min_ratio = min_ratio;
        config.enabled = enabled;
        config.penalty_pct = penalty_pct;
        config.fee_pct = fee_pct;
        Ok(())
    }

    /// Soft delete: disables the type, retaining its data.
    pub fn disable(&mut self, sym: Symbol) -> SynthResult<()> {
        let config = self
            .types
            .get_mut(&sym)
            .ok_or(SynthError::UnknownCollateral { symbol: sym })?;
        config.enabled = false;
        Ok(())
    }

    /// Looks up a type regardless of enablement.
    pub fn get(&self, sym: Symbol) -> SynthResult<&CollateralType> {
        self.types
            .get(&sym)
            .ok_or(SynthError::UnknownCollateral { symbol: sym })
    }

    /// Looks up a type, failing with `CollateralDisabled` if it is not
    /// accepting operations.
    pub fn get_enabled(&self, sym: Symbol) -> SynthResult<&CollateralType> {
        let config = self.get(sym)?;
        if !config.enabled {
            return Err(SynthError::CollateralDisabled { symbol: sym });
        }
        Ok(config)
    }

    /// Every symbol ever registered, in registration order.
    pub fn listed(&self) -> &[Symbol] {
        &self.listed
    }
}
