//! External Collaborator Boundary
//!
//! The engine runs inside a host transaction layer that owns the stable
//! ledger, the price feeds, and fund movement. Everything it needs from
//! that layer is injected through [`Externals`]; the engine never reaches
//! for ambient state and never learns how identities are authenticated.
//!
//! Fallible collaborator calls return `bool`: the host reports success or
//! failure and the engine maps failures to transfer-class errors. A failed
//! operation's external side effects are discarded by the host's
//! all-or-nothing transaction semantics.

use synthra_common::types::{Address, Symbol};

/// Services consumed from the host environment.
pub trait Externals {
    /// Reads the referenced price feed's latest report.
    ///
    /// Returns `(price, timestamp)` with 8-decimal fixed-point price
    /// semantics. Non-positive prices are rejected by the oracle adapter,
    /// not here.
    fn latest_price(&self, oracle: Address) -> (i128, u64);

    /// Mints stable units to an account. Requires the minting capability
    /// the manager holds on the stable ledger.
    fn mint_stable(&mut self, to: Address, amount: u128) -> bool;

    /// Burns stable units from an account.
    fn burn_stable(&mut self, from: Address, amount: u128) -> bool;

    /// Transfers native asset out of the manager's holdings.
    fn transfer_native(&mut self, to: Address, amount: u128) -> bool;

    /// Transfers an external token out of the manager's holdings.
    fn transfer_token(&mut self, token: Address, to: Address, amount: u128) -> bool;

    /// Pulls an external token from an account into the manager's holdings.
    fn pull_token(&mut self, token: Address, from: Address, amount: u128) -> bool;

    /// Hands a vault's state to the migration successor. The successor's
    /// acceptance is caller-checked: `false` aborts the migration.
    fn receive_migrated_vault(
        &mut self,
        target: Address,
        owner: Address,
        symbol: Symbol,
        collateral: u128,
        debt: u128,
    ) -> bool;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory host double used by the engine's tests.

    use std::collections::BTreeMap;

    use super::Externals;
    use synthra_common::types::{Address, Symbol};

    /// Recorded migration hand-off
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MigrationRecord {
        pub target: Address,
        pub owner: Address,
        pub symbol: Symbol,
        pub collateral: u128,
        pub debt: u128,
    }

    /// Mock host: balances, feeds, and failure toggles.
    #[derive(Debug, Default)]
    pub struct MockExternals {
        /// Feed prices by oracle reference, 8-decimal fixed point
        pub feed_prices: BTreeMap<Address, i128>,
        /// Stable ledger balances
        pub stable: BTreeMap<Address, u128>,
        /// Native asset balances credited by transfers
        pub native: BTreeMap<Address, u128>,
        /// External token balances, keyed by (token, account)
        pub tokens: BTreeMap<(Address, Address), u128>,
        /// Force native transfers to fail
        pub fail_native_transfers: bool,
        /// Force token transfers to fail
        pub fail_token_transfers: bool,
        /// Force token pulls to fail
        pub fail_token_pulls: bool,
        /// Force stable mints to fail
        pub fail_mints: bool,
        /// Successor accepts hand-offs
        pub migration_accepts: bool,
        /// Accepted hand-offs, in order
        pub migrations: Vec<MigrationRecord>,
    }

    impl MockExternals {
        pub fn new() -> Self {
            Self {
                migration_accepts: true,
                ..Self::default()
            }
        }

        /// Sets the feed price for an oracle reference (8 decimals).
        pub fn set_feed_price(&mut self, oracle: Address, price8: i128) {
            self.feed_prices.insert(oracle, price8);
        }

        /// Credits a stable balance so burns can succeed.
        pub fn fund_stable(&mut self, account: Address, amount: u128) {
            *self.stable.entry(account).or_default() += amount;
        }

        pub fn stable_balance(&self, account: Address) -> u128 {
            self.stable.get(&account).copied().unwrap_or(0)
        }

        pub fn native_balance(&self, account: Address) -> u128 {
            self.native.get(&account).copied().unwrap_or(0)
        }

        pub fn token_balance(&self, token: Address, account: Address) -> u128 {
            self.tokens.get(&(token, account)).copied().unwrap_or(0)
        }
    }

    impl Externals for MockExternals {
        fn latest_price(&self, oracle: Address) -> (i128, u64) {
            (self.feed_prices.get(&oracle).copied().unwrap_or(0), 0)
        }

        fn mint_stable(&mut self, to: Address, amount: u128) -> bool {
            if self.fail_mints {
                return false;
            }
            *self.stable.entry(to).or_default() += amount;
            true
        }

        fn burn_stable(&mut self, from: Address, amount: u128) -> bool {
            let balance = self.stable.entry(from).or_default();
            if *balance < amount {
                return false;
            }
            *balance -= amount;
            true
        }

        fn transfer_native(&mut self, to: Address, amount: u128) -> bool {
            if self.fail_native_transfers {
                return false;
            }
            *self.native.entry(to).or_default() += amount;
            true
        }

        fn transfer_token(&mut self, token: Address, to: Address, amount: u128) -> bool {
            if self.fail_token_transfers {
                return false;
            }
            *self.tokens.entry((token, to)).or_default() += amount;
            true
        }

        fn pull_token(&mut self, token: Address, from: Address, amount: u128) -> bool {
            if self.fail_token_pulls {
                return false;
            }
            // Caller funds are assumed; record the movement on the manager side.
            let _ = from;
            let _ = (token, amount);
            true
        }

        fn receive_migrated_vault(
            &mut self,
            target: Address,
            owner: Address,
            symbol: Symbol,
            collateral: u128,
            debt: u128,
        ) -> bool {
            if !self.migration_accepts {
                return false;
            }
            self.migrations.push(MigrationRecord {
                target,
                owner,
                symbol,
                collateral,
                debt,
            });
            true
        }
    }
}
