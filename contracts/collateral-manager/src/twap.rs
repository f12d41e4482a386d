//! TWAP Aggregator
//!
//! Fixed-size rolling window of observed prices per collateral symbol.
//! Smooths single-block oracle manipulation: an attacker must sustain a
//! skew across multiple operations before it dominates the average. A
//! sufficiently sustained manipulation still succeeds; this is damping,
//! not a guarantee.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use synthra_common::constants::twap::WINDOW;
use synthra_common::types::Symbol;

/// Ring buffer of the last `WINDOW` observed prices for one symbol.
///
/// The count saturates at the window capacity and never decreases, even
/// across disable/re-enable of the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PriceHistory {
    /// Observed prices, 18-decimal fixed point
    prices: [u128; WINDOW],
    /// Populated slot count, saturating at `WINDOW`
    count: usize,
    /// Next write position
    cursor: usize,
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            prices: [0; WINDOW],
            count: 0,
            cursor: 0,
        }
    }

    /// Records a price at the cursor and advances it.
    pub fn record(&mut self, price: u128) {
        self.prices[self.cursor] = price;
        self.cursor = (self.cursor + 1) % WINDOW;
        if self.count < WINDOW {
            self.count += 1;
        }
    }

    /// Truncating integer mean of the populated slots, 0 when empty.
    pub fn average(&self) -> u128 {
        if self.count == 0 {
            return 0;
        }
        let sum: u128 = self.prices[..self.count.min(WINDOW)]
            .iter()
            .copied()
            .fold(0u128, |acc, p| acc.saturating_add(p));
        sum / self.count as u128
    }

    /// Number of populated slots
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Per-symbol price histories, owned explicitly by the manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TwapBook {
    histories: BTreeMap<Symbol, PriceHistory>,
}

impl TwapBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an observation for a symbol, creating its history on first use.
    pub fn update(&mut self, symbol: Symbol, price: u128) {
        self.histories.entry(symbol).or_default().record(price);
    }

    /// Current TWAP for a symbol, 0 if never observed.
    pub fn read(&self, symbol: Symbol) -> u128 {
        self.histories
            .get(&symbol)
            .map(PriceHistory::average)
            .unwrap_or(0)
    }

    /// The symbol's history, if any observations exist.
    pub fn history(&self, symbol: Symbol) -> Option<&PriceHistory> {
        self.histories.get(&symbol)
    }

    /// Snapshot of a symbol's history for rollback.
    pub(crate) fn checkpoint(&self, symbol: Symbol) -> Option<PriceHistory> {
        self.histories.get(&symbol).cloned()
    }

    /// Restores a symbol's history from a checkpoint.
    pub(crate) fn restore(&mut self, symbol: Symbol, saved: Option<PriceHistory>) {
        match saved {
            Some(history) => {
                self.histories.insert(symbol, history);
            }
            None => {
                self.histories.remove(&symbol);
            }
        }
    }
}
