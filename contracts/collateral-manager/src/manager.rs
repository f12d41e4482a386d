//! Collateral Manager
//!
//! The shared ledger at the heart of the protocol: per-user-per-symbol
//! vault accounting, issuance against TWAP-valued collateral, permissionless
//! liquidation, circuit-breaker enforcement, and one-shot vault migration.
//!
//! ## Execution Model
//!
//! The host applies at most one state-changing operation at a time and
//! discards external side effects of failed operations. Inside the engine,
//! every mutating entry point:
//!
//! - consults the global halt flag (emergency withdrawal inverts the check)
//! - sets a reentrancy flag, cleared on every exit path
//! - checkpoints the state it may touch and rolls back on any error, so a
//!   failed call leaves vaults, price history, breaker counters, and the
//!   event log exactly as they were

use std::collections::BTreeMap;

use synthra_common::constants::ratios::WARNING_MARGIN_PCT;
use synthra_common::errors::{SynthError, SynthResult};
use synthra_common::events::{EventLog, SynthEvent};
use synthra_common::math::{collateral_ratio, collateral_value, mul_div, percent_of};
use synthra_common::types::{Address, AssetRef, CallContext, CollateralType, Symbol, Vault};

use crate::breaker::{BreakerConfig, BreakerState, CircuitBreaker};
use crate::external::Externals;
use crate::oracle;
use crate::registry::CollateralRegistry;
use crate::twap::{PriceHistory, TwapBook};

/// Key into the vault ledger
type VaultKey = (Address, Symbol);

/// Read-only health report for a vault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultHealth {
    /// Current collateralization ratio (percent; `u128::MAX` for zero debt)
    pub ratio: u128,
    /// The symbol's required minimum ratio
    pub min_ratio: u128,
    /// Whether the vault meets its minimum
    pub safe: bool,
}

/// Snapshot of the state one operation may mutate.
struct Checkpoint {
    vault: Option<Vault>,
    history: Option<PriceHistory>,
    breaker: (BTreeMap<Symbol, BreakerState>, u64),
    halted: bool,
    events_len: usize,
}

/// The collateral manager: vault ledger plus everything that guards it.
#[derive(Debug)]
pub struct CollateralManager {
    owner: Address,
    reserve: Address,
    halted: bool,
    entered: bool,
    migration_target: Option<Address>,
    migration_enabled: bool,
    registry: CollateralRegistry,
    vaults: BTreeMap<VaultKey, Vault>,
    twap: TwapBook,
    breaker: CircuitBreaker,
    events: EventLog,
}

impl CollateralManager {
    /// Creates a manager with an empty ledger and all breaker caps disabled.
    pub fn new(owner: Address, reserve: Address) -> Self {
        Self {
            owner,
            reserve,
            halted: false,
            entered: false,
            migration_target: None,
            migration_enabled: false,
            registry: CollateralRegistry::new(),
            vaults: BTreeMap::new(),
            twap: TwapBook::new(),
            breaker: CircuitBreaker::new(),
            events: EventLog::new(),
        }
    }

    // ========================================================================
    // User Operations
    // ========================================================================

    /// Deposits collateral and optionally mints stable units against it.
    ///
    /// For native collateral the supplied funds must equal `deposit_amount`
    /// exactly and be nonzero; for external collateral no native funds may
    /// accompany the call and the deposit is pulled from the caller. Minting
    /// requires the projected position, valued at TWAP, to meet the symbol's
    /// minimum ratio. The protocol fee is carved out of the caller's share:
    /// debt grows by the full `mint_amount`, the caller receives
    /// `mint_amount - fee`, the reserve receives the fee.
    pub fn deposit_and_mint<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        deposit_amount: u128,
        mint_amount: u128,
    ) -> SynthResult<()> {
        self.begin()?;
        let key = (ctx.caller, sym);
        let cp = self.checkpoint(key);
        let result = self.deposit_and_mint_inner(ext, ctx, sym, deposit_amount, mint_amount);
        if result.is_err() {
            self.rollback(key, cp);
        }
        self.end();
        result
    }

    fn deposit_and_mint_inner<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        deposit_amount: u128,
        mint_amount: u128,
    ) -> SynthResult<()> {
        let config = self.registry.get_enabled(sym)?.clone();
        let key = (ctx.caller, sym);

        match config.asset {
            AssetRef::Native => {
                if ctx.native_value != deposit_amount || deposit_amount == 0 {
                    return Err(SynthError::DepositMismatch {
                        supplied: ctx.native_value,
                        expected: deposit_amount,
                    });
                }
            }
            AssetRef::External(token) => {
                if ctx.native_value != 0 {
                    return Err(SynthError::UnexpectedNativeFunds {
                        supplied: ctx.native_value,
                    });
                }
                if deposit_amount > 0 && !ext.pull_token(token, ctx.caller, deposit_amount) {
                    return Err(SynthError::TransferFailed {
                        token,
                        amount: deposit_amount,
                    });
                }
            }
        }

        {
            let vault = self.vaults.entry(key).or_default();
            vault.collateral = vault
                .collateral
                .checked_add(deposit_amount)
                .ok_or(SynthError::Overflow)?;
        }

        let price = oracle::read_price(ext, config.oracle)?;
        self.twap.update(sym, price);
        let twap_price = self.twap.read(sym);

        if mint_amount > 0 {
            let vault = self.vaults[&key];
            let projected_debt = vault
                .debt
                .checked_add(mint_amount)
                .ok_or(SynthError::Overflow)?;
            let ratio =
                collateral_ratio(vault.collateral, twap_price, projected_debt, config.decimals)?;
            if ratio < config.min_ratio {
                return Err(SynthError::InsufficientCollateral {
                    ratio,
                    required: config.min_ratio,
                });
            }

            let fee = percent_of(mint_amount, config.fee_pct)?;
            let to_caller = mint_amount.checked_sub(fee).ok_or(SynthError::Overflow)?;

            if fee > 0 && !ext.mint_stable(self.reserve, fee) {
                return Err(SynthError::MintFailed {
                    to: self.reserve,
                    amount: fee,
                });
            }
            // Debt grows by the full mint; the fee reduces only what the
            // caller receives.
            self.vaults.entry(key).or_default().debt = projected_debt;
            if !ext.mint_stable(ctx.caller, to_caller) {
                return Err(SynthError::MintFailed {
                    to: ctx.caller,
                    amount: to_caller,
                });
            }
        }

        self.run_breaker(sym, 0, mint_amount, price, ctx.block);
        self.emit_health(ctx.caller, sym, &config, ctx.block)
    }

    /// Burns debt and optionally withdraws collateral.
    ///
    /// The withdrawal is valued at TWAP and only permitted when the
    /// post-withdrawal position still meets the minimum ratio against the
    /// remaining debt. Native transfer failure is a hard failure.
    pub fn burn_and_withdraw<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        burn_amount: u128,
        withdraw_amount: u128,
    ) -> SynthResult<()> {
        self.begin()?;
        let key = (ctx.caller, sym);
        let cp = self.checkpoint(key);
        let result = self.burn_and_withdraw_inner(ext, ctx, sym, burn_amount, withdraw_amount);
        if result.is_err() {
            self.rollback(key, cp);
        }
        self.end();
        result
    }

    fn burn_and_withdraw_inner<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        burn_amount: u128,
        withdraw_amount: u128,
    ) -> SynthResult<()> {
        let config = self.registry.get_enabled(sym)?.clone();
        let key = (ctx.caller, sym);
        let vault = self.vaults.get(&key).copied().unwrap_or_default();

        if burn_amount > vault.debt {
            return Err(SynthError::BurnExceedsDebt {
                burn: burn_amount,
                debt: vault.debt,
            });
        }
        if withdraw_amount > vault.collateral {
            return Err(SynthError::WithdrawExceedsCollateral {
                withdraw: withdraw_amount,
                collateral: vault.collateral,
            });
        }

        if burn_amount > 0 {
            if !ext.burn_stable(ctx.caller, burn_amount) {
                return Err(SynthError::BurnFailed {
                    from: ctx.caller,
                    amount: burn_amount,
                });
            }
            self.vaults.entry(key).or_default().debt -= burn_amount;
        }

        let price = oracle::read_price(ext, config.oracle)?;
        self.twap.update(sym, price);
        let twap_price = self.twap.read(sym);

        let mut withdrawal_value = 0u128;
        if withdraw_amount > 0 {
            let vault = self.vaults.get(&key).copied().unwrap_or_default();
            let remaining_collateral = vault.collateral - withdraw_amount;
            let ratio =
                collateral_ratio(remaining_collateral, twap_price, vault.debt, config.decimals)?;
            if ratio < config.min_ratio {
                return Err(SynthError::WouldBeUndercollateralized {
                    ratio,
                    required: config.min_ratio,
                });
            }
            self.vaults.entry(key).or_default().collateral = remaining_collateral;
            withdrawal_value = collateral_value(withdraw_amount, twap_price, config.decimals)?;
        }

        self.run_breaker(sym, withdrawal_value, 0, price, ctx.block);

        if withdraw_amount > 0 {
            match config.asset {
                AssetRef::Native => {
                    if !ext.transfer_native(ctx.caller, withdraw_amount) {
                        return Err(SynthError::NativeTransferFailed {
                            to: ctx.caller,
                            amount: withdraw_amount,
                        });
                    }
                }
                AssetRef::External(token) => {
                    if !ext.transfer_token(token, ctx.caller, withdraw_amount) {
                        return Err(SynthError::TransferFailed {
                            token,
                            amount: withdraw_amount,
                        });
                    }
                }
            }
        }

        self.emit_health(ctx.caller, sym, &config, ctx.block)
    }

    /// Liquidates an unsafe vault. Callable by any party.
    ///
    /// The target must fail its minimum ratio at the current TWAP; a
    /// zero-debt vault is always safe. The entire position is seized
    /// atomically, the liquidator burns stable units equal to the seized
    /// debt, and the collateral splits into a penalty reward for the
    /// liquidator and a remainder for the reserve, conserving the seized
    /// amount exactly.
    pub fn liquidate<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        target_owner: Address,
    ) -> SynthResult<()> {
        self.begin()?;
        let key = (target_owner, sym);
        let cp = self.checkpoint(key);
        let result = self.liquidate_inner(ext, ctx, sym, target_owner);
        if result.is_err() {
            self.rollback(key, cp);
        }
        self.end();
        result
    }

    fn liquidate_inner<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
        target_owner: Address,
    ) -> SynthResult<()> {
        let config = self.registry.get_enabled(sym)?.clone();

        let price = oracle::read_price(ext, config.oracle)?;
        self.twap.update(sym, price);
        let twap_price = self.twap.read(sym);

        let key = (target_owner, sym);
        let vault = self.vaults.get(&key).copied().unwrap_or_default();
        if vault.debt == 0 {
            return Err(SynthError::VaultIsSafe { ratio: u128::MAX });
        }
        let ratio = collateral_ratio(vault.collateral, twap_price, vault.debt, config.decimals)?;
        if ratio >= config.min_ratio {
            return Err(SynthError::VaultIsSafe { ratio });
        }

        // Seize and zero atomically: no window with stale vault data.
        let seized = vault;
        self.vaults.remove(&key);

        // The liquidator's cost of entry: burn stable equal to the debt.
        if !ext.burn_stable(ctx.caller, seized.debt) {
            return Err(SynthError::BurnFailed {
                from: ctx.caller,
                amount: seized.debt,
            });
        }

        let reward = percent_of(seized.collateral, config.penalty_pct)?;
        let to_reserve = seized
            .collateral
            .checked_sub(reward)
            .ok_or(SynthError::Overflow)?;

        match config.asset {
            AssetRef::Native => {
                if !ext.transfer_native(ctx.caller, reward) {
                    return Err(SynthError::NativeTransferFailed {
                        to: ctx.caller,
                        amount: reward,
                    });
                }
                if !ext.transfer_native(self.reserve, to_reserve) {
                    return Err(SynthError::NativeTransferFailed {
                        to: self.reserve,
                        amount: to_reserve,
                    });
                }
            }
            AssetRef::External(token) => {
                if !ext.transfer_token(token, ctx.caller, reward) {
                    return Err(SynthError::TransferFailed {
                        token,
                        amount: reward,
                    });
                }
                if !ext.transfer_token(token, self.reserve, to_reserve) {
                    return Err(SynthError::TransferFailed {
                        token,
                        amount: to_reserve,
                    });
                }
            }
        }

        self.run_breaker(sym, 0, 0, price, ctx.block);
        self.events.emit(SynthEvent::Liquidated {
            owner: target_owner,
            liquidator: ctx.caller,
            symbol: sym,
            debt_burned: seized.debt,
            collateral_seized: seized.collateral,
            reward,
            to_reserve,
            block: ctx.block,
        });
        Ok(())
    }

    /// Hands the caller's vault to the configured successor contract.
    ///
    /// The migration event reports the pre-transfer collateral and debt,
    /// captured before the vault is zeroed.
    pub fn migrate_vault<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
    ) -> SynthResult<()> {
        self.begin()?;
        let key = (ctx.caller, sym);
        let cp = self.checkpoint(key);
        let result = self.migrate_vault_inner(ext, ctx, sym);
        if result.is_err() {
            self.rollback(key, cp);
        }
        self.end();
        result
    }

    fn migrate_vault_inner<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
    ) -> SynthResult<()> {
        let target = match (self.migration_enabled, self.migration_target) {
            (true, Some(target)) => target,
            _ => return Err(SynthError::MigrationDisabled),
        };

        let key = (ctx.caller, sym);
        let vault = self.vaults.get(&key).copied().unwrap_or_default();
        if vault.is_empty() {
            return Err(SynthError::EmptyVault);
        }

        if !ext.receive_migrated_vault(target, ctx.caller, sym, vault.collateral, vault.debt) {
            return Err(SynthError::MigrationFailed);
        }

        self.vaults.remove(&key);
        self.events.emit(SynthEvent::VaultMigrated {
            owner: ctx.caller,
            symbol: sym,
            collateral: vault.collateral,
            debt: vault.debt,
            target,
            block: ctx.block,
        });
        Ok(())
    }

    // ========================================================================
    // Owner Operations
    // ========================================================================

    /// Registers a collateral type. Owner only.
    pub fn add_collateral_type(
        &mut self,
        ctx: &CallContext,
        sym: Symbol,
        config: CollateralType,
    ) -> SynthResult<()> {
        self.require_owner(ctx)?;
        let min_ratio = config.min_ratio;
        self.registry.add(sym, config)?;
        self.events.emit(SynthEvent::CollateralAdded {
            symbol: sym,
            min_ratio,
            block: ctx.block,
        });
        Ok(())
    }

    /// Updates a collateral type's risk parameters. Owner only.
    pub fn update_collateral_type(
        &mut self,
        ctx: &CallContext,
        sym: Symbol,
        min_ratio: u128,
        enabled: bool,
        penalty_pct: u128,
        fee_pct: u128,
    ) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.registry
            .update(sym, min_ratio, enabled, penalty_pct, fee_pct)?;
        self.events.emit(SynthEvent::CollateralUpdated {
            symbol: sym,
            min_ratio,
            enabled,
            block: ctx.block,
        });
        Ok(())
    }

    /// Soft-deletes a collateral type. Owner only.
    pub fn disable_collateral_type(&mut self, ctx: &CallContext, sym: Symbol) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.registry.disable(sym)?;
        self.events.emit(SynthEvent::CollateralDisabled {
            symbol: sym,
            block: ctx.block,
        });
        Ok(())
    }

    /// Replaces the circuit breaker thresholds. Owner only.
    pub fn set_breaker_config(
        &mut self,
        ctx: &CallContext,
        config: BreakerConfig,
    ) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.breaker.config = config;
        Ok(())
    }

    /// Configures the migration successor and enablement. Owner only.
    pub fn set_migration_target(
        &mut self,
        ctx: &CallContext,
        target: Option<Address>,
        enabled: bool,
    ) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.migration_target = target;
        self.migration_enabled = enabled;
        self.events.emit(SynthEvent::MigrationTargetSet {
            target,
            enabled,
            block: ctx.block,
        });
        Ok(())
    }

    /// Halts all user-facing operations. Owner only.
    pub fn pause(&mut self, ctx: &CallContext) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.halted = true;
        self.events.emit(SynthEvent::SystemHalted { block: ctx.block });
        Ok(())
    }

    /// Resumes operation after investigation. Owner only.
    pub fn resume(&mut self, ctx: &CallContext) -> SynthResult<()> {
        self.require_owner(ctx)?;
        self.halted = false;
        self.events.emit(SynthEvent::SystemResumed {
            by: ctx.caller,
            block: ctx.block,
        });
        Ok(())
    }

    /// Recovers all collateral held for a symbol while the system is
    /// halted. Owner only; the single operation that REQUIRES the halted
    /// state. Vault bookkeeping is left untouched for off-system
    /// reconciliation.
    pub fn emergency_withdraw<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
    ) -> SynthResult<()> {
        self.require_owner(ctx)?;
        if !self.halted {
            return Err(SynthError::NotHalted);
        }
        if self.entered {
            return Err(SynthError::ReentrantCall);
        }
        self.entered = true;
        let result = self.emergency_withdraw_inner(ext, ctx, sym);
        self.entered = false;
        result
    }

    fn emergency_withdraw_inner<E: Externals>(
        &mut self,
        ext: &mut E,
        ctx: &CallContext,
        sym: Symbol,
    ) -> SynthResult<()> {
        // Disabled symbols remain recoverable.
        let config = self.registry.get(sym)?.clone();

        let total: u128 = self
            .vaults
            .iter()
            .filter(|((_, s), _)| *s == sym)
            .map(|(_, vault)| vault.collateral)
            .fold(0u128, |acc, c| acc.saturating_add(c));

        match config.asset {
            AssetRef::Native => {
                if !ext.transfer_native(self.owner, total) {
                    return Err(SynthError::NativeTransferFailed {
                        to: self.owner,
                        amount: total,
                    });
                }
            }
            AssetRef::External(token) => {
                if !ext.transfer_token(token, self.owner, total) {
                    return Err(SynthError::TransferFailed {
                        token,
                        amount: total,
                    });
                }
            }
        }

        self.events.emit(SynthEvent::EmergencyWithdrawal {
            symbol: sym,
            amount: total,
            to: self.owner,
            block: ctx.block,
        });
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The vault for (owner, symbol); zero-valued if never touched.
    pub fn vault(&self, owner: Address, sym: Symbol) -> Vault {
        self.vaults.get(&(owner, sym)).copied().unwrap_or_default()
    }

    /// Current TWAP for a symbol, 0 if never observed.
    pub fn twap(&self, sym: Symbol) -> u128 {
        self.twap.read(sym)
    }

    /// Health report at the current TWAP.
    pub fn vault_health(&self, owner: Address, sym: Symbol) -> SynthResult<VaultHealth> {
        let config = self.registry.get(sym)?;
        let vault = self.vault(owner, sym);
        let ratio = collateral_ratio(
            vault.collateral,
            self.twap.read(sym),
            vault.debt,
            config.decimals,
        )?;
        Ok(VaultHealth {
            ratio,
            min_ratio: config.min_ratio,
            safe: ratio >= config.min_ratio,
        })
    }

    /// Additional stable units mintable against the vault at the current
    /// TWAP without violating the minimum ratio.
    pub fn max_mintable(&self, owner: Address, sym: Symbol) -> SynthResult<u128> {
        let config = self.registry.get_enabled(sym)?;
        let vault = self.vault(owner, sym);
        let value = collateral_value(vault.collateral, self.twap.read(sym), config.decimals)?;
        let capacity = mul_div(value, synthra_common::constants::ratios::PERCENT, config.min_ratio)?;
        Ok(capacity.saturating_sub(vault.debt))
    }

    /// Whether the system is halted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The owner/DAO identity.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The protocol reserve account.
    pub fn reserve(&self) -> Address {
        self.reserve
    }

    /// The collateral registry.
    pub fn registry(&self) -> &CollateralRegistry {
        &self.registry
    }

    /// Events emitted so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drains the event log for the host to publish.
    pub fn take_events(&mut self) -> Vec<SynthEvent> {
        std::mem::take(&mut self.events).into_events()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_owner(&self, ctx: &CallContext) -> SynthResult<()> {
        if ctx.caller != self.owner {
            return Err(SynthError::Unauthorized { caller: ctx.caller });
        }
        Ok(())
    }

    /// Entry gate for user-facing operations: halt, then reentrancy.
    fn begin(&mut self) -> SynthResult<()> {
        if self.halted {
            return Err(SynthError::Halted);
        }
        if self.entered {
            return Err(SynthError::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    fn end(&mut self) {
        self.entered = false;
    }

    fn checkpoint(&self, key: VaultKey) -> Checkpoint {
        Checkpoint {
            vault: self.vaults.get(&key).copied(),
            history: self.twap.checkpoint(key.1),
            breaker: self.breaker.checkpoint(),
            halted: self.halted,
            events_len: self.events.len(),
        }
    }

    fn rollback(&mut self, key: VaultKey, cp: Checkpoint) {
        match cp.vault {
            Some(vault) => {
                self.vaults.insert(key, vault);
            }
            None => {
                self.vaults.remove(&key);
            }
        }
        self.twap.restore(key.1, cp.history);
        self.breaker.restore(cp.breaker);
        self.halted = cp.halted;
        self.events.truncate(cp.events_len);
    }

    /// Runs the breaker for a committed operation; a trip halts the system
    /// and emits, but never fails the caller.
    fn run_breaker(
        &mut self,
        sym: Symbol,
        withdrawal_value: u128,
        mint_amount: u128,
        price: u128,
        block: u64,
    ) {
        let listed = self.registry.listed().to_vec();
        if let Some(trip) =
            self.breaker
                .run(&listed, sym, withdrawal_value, mint_amount, price, block)
        {
            self.events.emit(SynthEvent::BreakerTripped {
                symbol: sym,
                reason: trip.reason,
                measured: trip.measured,
                cap: trip.cap,
                block,
            });
            self.halted = true;
            self.events.emit(SynthEvent::SystemHalted { block });
        }
    }

    /// Advisory telemetry after every issuance-side operation.
    fn emit_health(
        &mut self,
        owner: Address,
        sym: Symbol,
        config: &CollateralType,
        block: u64,
    ) -> SynthResult<()> {
        let vault = self.vault(owner, sym);
        if vault.debt == 0 {
            return Ok(());
        }
        let ratio = collateral_ratio(
            vault.collateral,
            self.twap.read(sym),
            vault.debt,
            config.decimals,
        )?;
        let safe = ratio >= config.min_ratio;
        self.events.emit(SynthEvent::VaultHealthChanged {
            owner,
            symbol: sym,
            ratio,
            safe,
            block,
        });
        if safe {
            let warning_band = config
                .min_ratio
                .saturating_add(percent_of(config.min_ratio, WARNING_MARGIN_PCT)?);
            if ratio < warning_band {
                self.events.emit(SynthEvent::VaultHealthWarning {
                    owner,
                    symbol: sym,
                    ratio,
                    min_ratio: config.min_ratio,
                    block,
                });
            }
        }
        Ok(())
    }

    /// Test hook: simulate a nested call in progress.
    #[cfg(test)]
    pub(crate) fn set_entered(&mut self, entered: bool) {
        self.entered = entered;
    }
}
