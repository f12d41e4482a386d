//! Circuit Breaker
//!
//! Per-operation and per-settlement-block caps plus a price-drop detector.
//! Invoked at the end of every state-changing operation; a trip halts the
//! system for subsequent operations but never reverts the triggering one
//! (fail-open-after-the-fact).

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use synthra_common::constants::ratios;
use synthra_common::events::BreakerReason;
use synthra_common::math::mul_div;
use synthra_common::types::Symbol;

/// Risk thresholds. A cap of 0 disables that check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct BreakerConfig {
    /// Max quote value of a single withdrawal
    pub max_single_withdrawal: u128,
    /// Max stable amount of a single mint
    pub max_single_mint: u128,
    /// Max cumulative withdrawal value per settlement block
    pub max_block_withdrawal: u128,
    /// Max cumulative mint amount per settlement block
    pub max_block_mint: u128,
    /// Max tolerated single-observation price drop (percent)
    pub max_price_drop_pct: u128,
}

/// Per-symbol running counters for the current settlement block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct BreakerState {
    /// Cumulative withdrawal value this block, quote units
    pub block_withdrawals: u128,
    /// Cumulative mint amount this block, stable units
    pub block_mints: u128,
    /// Last observed raw oracle price
    pub last_price: u128,
}

/// A tripped threshold. The manager halts and emits on `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerTrip {
    pub reason: BreakerReason,
    pub measured: u128,
    pub cap: u128,
}

/// Breaker state across all symbols.
#[derive(Debug, Clone, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CircuitBreaker {
    /// Configured thresholds
    pub config: BreakerConfig,
    states: BTreeMap<Symbol, BreakerState>,
    /// Block index at which per-symbol counters were last reset
    last_reset_block: u64,
}

impl CircuitBreaker {
    /// Create a breaker with all checks disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the breaker for one committed operation.
    ///
    /// Sequence: lazy all-symbol counter reset on a new block, single-op
    /// caps (strictly greater trips), block-cumulative caps (strictly
    /// greater trips), price-drop percentage (greater-or-equal trips).
    /// The current price is recorded as the new previous price
    /// unconditionally. Returns the first tripped threshold, if any.
    pub fn run(
        &mut self,
        listed: &[Symbol],
        sym: Symbol,
        withdrawal_value: u128,
        mint_amount: u128,
        price: u128,
        block: u64,
    ) -> Option<BreakerTrip> {
        if block != self.last_reset_block {
            for s in listed {
                if let Some(state) = self.states.get_mut(s) {
                    state.block_withdrawals = 0;
                    state.block_mints = 0;
                }
            }
            self.last_reset_block = block;
        }

        let config = self.config;
        let mut trip = None;

        if config.max_single_withdrawal > 0 && withdrawal_value > config.max_single_withdrawal {
            trip = Some(BreakerTrip {
                reason: BreakerReason::SingleWithdrawalTooLarge,
                measured: withdrawal_value,
                cap: config.max_single_withdrawal,
            });
        }

        if trip.is_none() && config.max_single_mint > 0 && mint_amount > config.max_single_mint {
            trip = Some(BreakerTrip {
                reason: BreakerReason::SingleMintTooLarge,
                measured: mint_amount,
                cap: config.max_single_mint,
            });
        }

        let state = self.states.entry(sym).or_default();
        state.block_withdrawals = state.block_withdrawals.saturating_add(withdrawal_value);
        state.block_mints = state.block_mints.saturating_add(mint_amount);

        if trip.is_none()
            && config.max_block_withdrawal > 0
            && state.block_withdrawals > config.max_block_withdrawal
        {
            trip = Some(BreakerTrip {
                reason: BreakerReason::BlockWithdrawalsTooLarge,
                measured: state.block_withdrawals,
                cap: config.max_block_withdrawal,
            });
        }

        if trip.is_none() && config.max_block_mint > 0 && state.block_mints > config.max_block_mint {
            trip = Some(BreakerTrip {
                reason: BreakerReason::BlockMintsTooLarge,
                measured: state.block_mints,
                cap: config.max_block_mint,
            });
        }

        let previous = state.last_price;
        if trip.is_none() && previous > 0 && config.max_price_drop_pct > 0 {
            let drop_pct = if price < previous {
                // (previous - current) * 100 / previous, truncating
                mul_div(previous - price, ratios::PERCENT, previous).unwrap_or(0)
            } else {
                0
            };
            if drop_pct >= config.max_price_drop_pct {
                trip = Some(BreakerTrip {
                    reason: BreakerReason::OraclePriceDrop,
                    measured: drop_pct,
                    cap: config.max_price_drop_pct,
                });
            }
        }

        state.last_price = price;
        trip
    }

    /// The symbol's counters, if it has been observed.
    pub fn state(&self, sym: Symbol) -> Option<&BreakerState> {
        self.states.get(&sym)
    }

    /// Full snapshot for operation rollback.
    pub(crate) fn checkpoint(&self) -> (BTreeMap<Symbol, BreakerState>, u64) {
        (self.states.clone(), self.last_reset_block)
    }

    /// Restores a snapshot taken by [`Self::checkpoint`].
    pub(crate) fn restore(&mut self, saved: (BTreeMap<Symbol, BreakerState>, u64)) {
        self.states = saved.0;
        self.last_reset_block = saved.1;
    }
}
