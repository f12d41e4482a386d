//! Protocol Events for Synthra
//!
//! Events are collected during execution and indexed off-system for
//! monitoring, analytics, and liquidation bots. Breaker trips surface here
//! rather than as errors: the triggering operation has already committed.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::types::{Address, Symbol};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Registry Events (0x01 - 0x0F)
    CollateralAdded = 0x01,
    CollateralUpdated = 0x02,
    CollateralDisabled = 0x03,

    // Vault Events (0x10 - 0x1F)
    VaultHealthChanged = 0x10,
    VaultHealthWarning = 0x11,
    Liquidated = 0x12,
    VaultMigrated = 0x13,

    // Safety Events (0x20 - 0x2F)
    BreakerTripped = 0x20,
    SystemHalted = 0x21,
    SystemResumed = 0x22,
    EmergencyWithdrawal = 0x23,

    // Admin Events (0x30 - 0x3F)
    MigrationTargetSet = 0x30,
}

/// Why the circuit breaker halted the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum BreakerReason {
    /// One withdrawal's quote value exceeded the single-operation cap
    SingleWithdrawalTooLarge,
    /// One mint exceeded the single-operation cap
    SingleMintTooLarge,
    /// Cumulative withdrawals this block exceeded the block cap
    BlockWithdrawalsTooLarge,
    /// Cumulative mints this block exceeded the block cap
    BlockMintsTooLarge,
    /// Oracle price dropped by at least the configured percentage
    OraclePriceDrop,
}

impl BreakerReason {
    /// Human-readable reason tag for operator tooling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleWithdrawalTooLarge => "single withdrawal too large",
            Self::SingleMintTooLarge => "single mint too large",
            Self::BlockWithdrawalsTooLarge => "block withdrawals too large",
            Self::BlockMintsTooLarge => "block mints too large",
            Self::OraclePriceDrop => "oracle price drop",
        }
    }
}

/// Main event enum containing all protocol events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum SynthEvent {
    // ============ Registry Events ============

    /// Emitted when a collateral type is registered
    CollateralAdded {
        symbol: Symbol,
        min_ratio: u128,
        block: u64,
    },

    /// Emitted when a collateral type's parameters change
    CollateralUpdated {
        symbol: Symbol,
        min_ratio: u128,
        enabled: bool,
        block: u64,
    },

    /// Emitted when a collateral type is soft-deleted
    CollateralDisabled {
        symbol: Symbol,
        block: u64,
    },

    // ============ Vault Events ============

    /// Emitted after every deposit/mint/burn/withdraw on a vault with debt
    VaultHealthChanged {
        owner: Address,
        symbol: Symbol,
        ratio: u128,
        safe: bool,
        block: u64,
    },

    /// Emitted when a safe vault sits within the warning band above its
    /// minimum ratio
    VaultHealthWarning {
        owner: Address,
        symbol: Symbol,
        ratio: u128,
        min_ratio: u128,
        block: u64,
    },

    /// Emitted when a vault is fully liquidated
    Liquidated {
        owner: Address,
        liquidator: Address,
        symbol: Symbol,
        debt_burned: u128,
        collateral_seized: u128,
        reward: u128,
        to_reserve: u128,
        block: u64,
    },

    /// Emitted when a vault's state is handed to the successor contract.
    /// Reports the pre-transfer collateral and debt.
    VaultMigrated {
        owner: Address,
        symbol: Symbol,
        collateral: u128,
        debt: u128,
        target: Address,
        block: u64,
    },

    // ============ Safety Events ============

    /// Emitted when a risk threshold trips the breaker
    BreakerTripped {
        symbol: Symbol,
        reason: BreakerReason,
        measured: u128,
        cap: u128,
        block: u64,
    },

    /// Emitted when the system halts
    SystemHalted {
        block: u64,
    },

    /// Emitted when the owner resumes operation
    SystemResumed {
        by: Address,
        block: u64,
    },

    /// Emitted when held collateral is recovered while halted
    EmergencyWithdrawal {
        symbol: Symbol,
        amount: u128,
        to: Address,
        block: u64,
    },

    // ============ Admin Events ============

    /// Emitted when the migration successor is configured
    MigrationTargetSet {
        target: Option<Address>,
        enabled: bool,
        block: u64,
    },
}

impl SynthEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::CollateralAdded { .. } => EventType::CollateralAdded,
            Self::CollateralUpdated { .. } => EventType::CollateralUpdated,
            Self::CollateralDisabled { .. } => EventType::CollateralDisabled,
            Self::VaultHealthChanged { .. } => EventType::VaultHealthChanged,
            Self::VaultHealthWarning { .. } => EventType::VaultHealthWarning,
            Self::Liquidated { .. } => EventType::Liquidated,
            Self::VaultMigrated { .. } => EventType::VaultMigrated,
            Self::BreakerTripped { .. } => EventType::BreakerTripped,
            Self::SystemHalted { .. } => EventType::SystemHalted,
            Self::SystemResumed { .. } => EventType::SystemResumed,
            Self::EmergencyWithdrawal { .. } => EventType::EmergencyWithdrawal,
            Self::MigrationTargetSet { .. } => EventType::MigrationTargetSet,
        }
    }

    /// Get the settlement block when the event occurred
    pub fn block(&self) -> u64 {
        match self {
            Self::CollateralAdded { block, .. } => *block,
            Self::CollateralUpdated { block, .. } => *block,
            Self::CollateralDisabled { block, .. } => *block,
            Self::VaultHealthChanged { block, .. } => *block,
            Self::VaultHealthWarning { block, .. } => *block,
            Self::Liquidated { block, .. } => *block,
            Self::VaultMigrated { block, .. } => *block,
            Self::BreakerTripped { block, .. } => *block,
            Self::SystemHalted { block, .. } => *block,
            Self::SystemResumed { block, .. } => *block,
            Self::EmergencyWithdrawal { block, .. } => *block,
            Self::MigrationTargetSet { block, .. } => *block,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SynthEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: SynthEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[SynthEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<SynthEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&SynthEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events past `len`, keeping the first `len` entries
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
