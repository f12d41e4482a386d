//! Mathematical Utilities for the Synthra Protocol
//!
//! Integer-only financial calculations. All amounts are `u128`; every
//! multiply-then-divide routes through 256-bit intermediates so that
//! 18-decimal values never overflow mid-calculation.

use uint::construct_uint;

use crate::constants::ratios;
use crate::errors::{SynthError, SynthResult};

construct_uint! {
    /// 256-bit unsigned integer for intermediate products
    pub struct U256(4);
}

/// Computes `a * b / denom` with a 256-bit intermediate, truncating.
pub fn mul_div(a: u128, b: u128, denom: u128) -> SynthResult<u128> {
    if denom == 0 {
        return Err(SynthError::DivisionByZero);
    }
    let wide = U256::from(a) * U256::from(b) / U256::from(denom);
    if wide > U256::from(u128::MAX) {
        return Err(SynthError::Overflow);
    }
    Ok(wide.as_u128())
}

/// Returns `10^decimals`, failing on unrepresentable exponents.
pub fn pow10(decimals: u8) -> SynthResult<u128> {
    10u128
        .checked_pow(decimals as u32)
        .ok_or(SynthError::Overflow)
}

/// Values collateral in 18-decimal quote units.
///
/// `value = amount * price18 / 10^decimals` where `amount` is in the
/// asset's native units and `price18` is the internal fixed-point price.
pub fn collateral_value(amount: u128, price18: u128, decimals: u8) -> SynthResult<u128> {
    mul_div(amount, price18, pow10(decimals)?)
}

/// Computes a collateralization ratio as a percentage (scale 100).
///
/// `ratio = collateral * price18 * 100 / (10^decimals * debt)`.
/// A vault with zero debt is infinitely collateralized and reports
/// `u128::MAX` regardless of collateral.
pub fn collateral_ratio(
    collateral: u128,
    price18: u128,
    debt: u128,
    decimals: u8,
) -> SynthResult<u128> {
    if debt == 0 {
        return Ok(u128::MAX);
    }

    let numerator = U256::from(collateral) * U256::from(price18) * U256::from(ratios::PERCENT);
    let denominator = U256::from(pow10(decimals)?) * U256::from(debt);
    let ratio = numerator / denominator;
    if ratio > U256::from(u128::MAX) {
        return Err(SynthError::Overflow);
    }
    Ok(ratio.as_u128())
}

/// Computes `amount * pct / 100`, truncating.
pub fn percent_of(amount: u128, pct: u128) -> SynthResult<u128> {
    mul_div(amount, pct, ratios::PERCENT)
}
