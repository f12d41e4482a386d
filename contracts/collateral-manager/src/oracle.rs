//! Price Oracle Adapter
//!
//! Reads the latest report from a collateral type's configured feed,
//! rejects non-positive values, and rescales the feed's 8-decimal
//! precision to the internal 18-decimal representation. Pure read; called
//! once per user-facing operation.

use synthra_common::constants::price::FEED_SCALE;
use synthra_common::errors::{SynthError, SynthResult};
use synthra_common::types::Address;

use crate::external::Externals;

/// Reads and normalizes the referenced feed's latest price.
pub fn read_price<E: Externals>(ext: &E, oracle: Address) -> SynthResult<u128> {
    let (reported, _timestamp) = ext.latest_price(oracle);
    if reported <= 0 {
        return Err(SynthError::InvalidPrice { reported });
    }

    (reported as u128)
        .checked_mul(FEED_SCALE)
        .ok_or(SynthError::Overflow)
}
