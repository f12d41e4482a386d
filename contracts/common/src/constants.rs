//! Protocol Constants
//!
//! All fixed-point scales and configuration values for the Synthra protocol.

/// Stable unit metadata
pub mod unit {
    /// Unit name
    pub const NAME: &str = "Synthra USD";
    /// Unit symbol
    pub const SYMBOL: &str = "synUSD";
    /// Decimal places of the stable unit
    pub const DECIMALS: u8 = 18;
    /// One stable unit in base units
    pub const ONE: u128 = 1_000_000_000_000_000_000;
}

/// Price representation
pub mod price {
    /// Decimal places reported by external price feeds
    pub const FEED_DECIMALS: u8 = 8;
    /// Internal fixed-point decimal places for prices
    pub const PRICE_DECIMALS: u8 = 18;
    /// Rescale factor from feed precision to internal precision (10^10)
    pub const FEED_SCALE: u128 = 10_000_000_000;
}

/// Ratio and percentage configuration
pub mod ratios {
    /// Denominator for all percentage values (ratio, penalty, fee, price drop)
    pub const PERCENT: u128 = 100;

    /// Margin above the minimum ratio that triggers an early-warning event.
    /// Relative: a vault warns when ratio < min_ratio * (100 + 5) / 100.
    pub const WARNING_MARGIN_PCT: u128 = 5;
}

/// TWAP configuration
pub mod twap {
    /// Ring buffer capacity per collateral symbol
    pub const WINDOW: usize = 10;
}
