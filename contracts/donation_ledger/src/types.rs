//! # Types
//!
//! Shared data structures used across all modules of the donation ledger.
//!
//! ## Design decisions
//!
//! ### Profile / State split
//!
//! Charities and projects are stored as two ledger entries each:
//!
//! - [`CharityProfile`] / [`ProjectConfig`]: written once at registration.
//! - [`CharityState`] / [`ProjectState`]: rewritten on donations, proofs,
//!   withdrawals and lock changes.
//!
//! The public API returns the reconstructed [`Charity`] and [`Project`] views.
//!
//! ### Donation lifecycle
//!
//! ```text
//! Unverified ──(partial proof)──► Partially verified ──► Fully verified
//!      └──────────────────(proof covers outstanding)──────────►┘
//! ```
//!
//! `verified_amount` only ever grows, and `time_taken_to_verify` is written
//! exactly once, on the step that makes `verified_amount == amount`.

use soroban_sdk::{contracttype, Address, String};

/// Field of work a charity is registered under.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CharityCategory {
    Children,
    Elderly,
    Education,
    Health,
    Environment,
    Animals,
    DisasterRelief,
    Other,
}

/// Immutable charity registration record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharityProfile {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub category: CharityCategory,
    pub registered_at: u64,
}

/// Mutable charity wallet state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharityState {
    /// Credits held in custody by the contract on behalf of the charity.
    pub balance: i128,
    /// Set manually by an admin or automatically by the exposure check.
    pub locked: bool,
    /// Donations whose `verified_amount == amount`.
    pub verified_count: u32,
    /// Donations with any outstanding unverified amount.
    pub unverified_count: u32,
}

/// Full charity view returned by the public API.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Charity {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub category: CharityCategory,
    pub registered_at: u64,
    pub balance: i128,
    pub locked: bool,
    pub verified_count: u32,
    pub unverified_count: u32,
}

impl Charity {
    pub fn from_parts(profile: CharityProfile, state: CharityState) -> Self {
        Charity {
            id: profile.id,
            owner: profile.owner,
            name: profile.name,
            category: profile.category,
            registered_at: profile.registered_at,
            balance: state.balance,
            locked: state.locked,
            verified_count: state.verified_count,
            unverified_count: state.unverified_count,
        }
    }
}

/// Running total of unverified credits attributed to one charity.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnverifiedExposure {
    pub charity_id: u64,
    pub running_total: i128,
    /// Ledger timestamp at which `running_total` last rose to the lock
    /// threshold. Cleared whenever the total drops back below it.
    pub threshold_crossed_at: Option<u64>,
}

impl UnverifiedExposure {
    pub fn new(charity_id: u64) -> Self {
        UnverifiedExposure {
            charity_id,
            running_total: 0,
            threshold_crossed_at: None,
        }
    }

    /// Add newly donated credits, stamping the crossing time on the first
    /// rise to `threshold`.
    pub fn add(&mut self, amount: i128, threshold: i128, now: u64) {
        self.running_total += amount;
        if self.running_total >= threshold && self.threshold_crossed_at.is_none() {
            self.threshold_crossed_at = Some(now);
        }
    }

    /// Remove verified credits. Dropping below `threshold` ends the excursion,
    /// so a later re-crossing starts a fresh clock.
    pub fn release(&mut self, amount: i128, threshold: i128) {
        self.running_total -= amount;
        if self.running_total < threshold {
            self.threshold_crossed_at = None;
        }
    }

    /// Re-evaluate the crossing against a new `threshold`. An exposure that
    /// meets it starts a fresh clock at `now`; one below it has none.
    pub fn restart(&mut self, threshold: i128, now: u64) {
        self.threshold_crossed_at = if self.running_total >= threshold {
            Some(now)
        } else {
            None
        };
    }

    /// `true` once the total has stayed at or above `threshold` for at least
    /// `time_limit` seconds.
    pub fn is_overdue(&self, threshold: i128, time_limit: u64, now: u64) -> bool {
        if self.running_total < threshold {
            return false;
        }
        match self.threshold_crossed_at {
            Some(crossed_at) => now.saturating_sub(crossed_at) >= time_limit,
            None => false,
        }
    }
}

/// Thresholds driving the automatic wallet lock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockPolicy {
    /// Unverified credits at or above which the clock starts.
    pub threshold: i128,
    /// Seconds the exposure may stay at or above `threshold` before locking.
    pub time_limit: u64,
}

/// Registered donor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorRecord {
    pub address: Address,
    pub valid: bool,
    pub registered_at: u64,
}

/// Immutable project listing, written once by the owning charity.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub charity_id: u64,
    pub title: String,
    pub description: String,
    pub target_amount: i128,
    pub created_at: u64,
}

/// Mutable project state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Listed and accepting donations.
    pub active: bool,
    /// Sum of all donation amounts.
    pub raised: i128,
    /// Sum of all verified amounts.
    pub verified: i128,
}

/// Full project view returned by the public API.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub charity_id: u64,
    pub title: String,
    pub description: String,
    pub target_amount: i128,
    pub created_at: u64,
    pub active: bool,
    pub raised: i128,
    pub verified: i128,
}

impl Project {
    pub fn from_parts(config: ProjectConfig, state: ProjectState) -> Self {
        Project {
            id: config.id,
            charity_id: config.charity_id,
            title: config.title,
            description: config.description,
            target_amount: config.target_amount,
            created_at: config.created_at,
            active: state.active,
            raised: state.raised,
            verified: state.verified,
        }
    }
}

/// A transfer of credits from a donor into a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Donation {
    pub id: u64,
    pub project_id: u64,
    pub charity_id: u64,
    pub donor: Address,
    pub amount: i128,
    pub verified_amount: i128,
    pub timestamp: u64,
    /// Seconds between donation and full verification; 0 while outstanding.
    pub time_taken_to_verify: u64,
}

impl Donation {
    pub fn outstanding(&self) -> i128 {
        self.amount - self.verified_amount
    }

    pub fn is_fully_verified(&self) -> bool {
        self.verified_amount == self.amount
    }
}

/// Verifier attestation applied against a project's outstanding donations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proof {
    pub id: u64,
    pub project_id: u64,
    pub verifier: Address,
    /// Amount attested by the verifier.
    pub amount: i128,
    /// Portion of `amount` actually consumed by outstanding donations.
    pub applied: i128,
    pub description: String,
    pub timestamp: u64,
}
