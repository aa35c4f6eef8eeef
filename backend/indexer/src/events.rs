//! Canonical event types emitted by the donation ledger contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/donation_ledger/src/events.rs` and `contracts/donation_ledger/src/rbac.rs`.

use serde::{Deserialize, Serialize};

/// What topic 1 of an event identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Project,
    Charity,
    Address,
    None,
}

/// All recognised event kinds from the donation ledger contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A charity was registered (`char_reg` topic).
    CharityRegistered,
    /// A donor was allowed to donate (`donor_reg` topic).
    DonorRegistered,
    /// A donor lost permission to donate (`donor_del` topic).
    DonorDeregistered,
    /// A project was listed (`listed` topic).
    ProjectListed,
    /// A project was closed to donations (`unlisted` topic).
    ProjectUnlisted,
    /// A project was reopened (`relisted` topic).
    ProjectRelisted,
    /// Credits were donated to a project (`donated` topic).
    DonationMade,
    /// A donation became fully verified (`dn_verif` topic).
    DonationVerified,
    /// A verifier submitted a proof (`proof` topic).
    ProofVerified,
    /// A charity's unverified exposure stayed over the threshold too long (`exceeded` topic).
    UnverifiedExceeded,
    /// A charity wallet was frozen (`locked` topic).
    WalletLocked,
    /// A charity wallet was released (`unlocked` topic).
    WalletUnlocked,
    /// A charity owner withdrew credits (`withdrawn` topic).
    Withdrawal,
    /// The auto-lock policy changed (`policy` topic).
    LockPolicySet,
    /// A role was granted or replaced (`role_set` topic).
    RoleSet,
    /// A role was revoked (`role_del` topic).
    RoleDel,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "char_reg" => Self::CharityRegistered,
            "donor_reg" => Self::DonorRegistered,
            "donor_del" => Self::DonorDeregistered,
            "listed" => Self::ProjectListed,
            "unlisted" => Self::ProjectUnlisted,
            "relisted" => Self::ProjectRelisted,
            "donated" => Self::DonationMade,
            "dn_verif" => Self::DonationVerified,
            "proof" => Self::ProofVerified,
            "exceeded" => Self::UnverifiedExceeded,
            "locked" => Self::WalletLocked,
            "unlocked" => Self::WalletUnlocked,
            "withdrawn" => Self::Withdrawal,
            "policy" => Self::LockPolicySet,
            "role_set" => Self::RoleSet,
            "role_del" => Self::RoleDel,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CharityRegistered => "charity_registered",
            Self::DonorRegistered => "donor_registered",
            Self::DonorDeregistered => "donor_deregistered",
            Self::ProjectListed => "project_listed",
            Self::ProjectUnlisted => "project_unlisted",
            Self::ProjectRelisted => "project_relisted",
            Self::DonationMade => "donation_made",
            Self::DonationVerified => "donation_verified",
            Self::ProofVerified => "proof_verified",
            Self::UnverifiedExceeded => "unverified_donations_exceeded",
            Self::WalletLocked => "wallet_locked",
            Self::WalletUnlocked => "wallet_unlocked",
            Self::Withdrawal => "withdrawal",
            Self::LockPolicySet => "lock_policy_set",
            Self::RoleSet => "role_set",
            Self::RoleDel => "role_del",
            Self::Unknown => "unknown",
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            Self::ProjectListed
            | Self::ProjectUnlisted
            | Self::ProjectRelisted
            | Self::DonationMade
            | Self::DonationVerified
            | Self::ProofVerified => Subject::Project,
            Self::CharityRegistered
            | Self::UnverifiedExceeded
            | Self::WalletLocked
            | Self::WalletUnlocked
            | Self::Withdrawal => Subject::Charity,
            Self::DonorRegistered | Self::DonorDeregistered | Self::RoleSet | Self::RoleDel => {
                Subject::Address
            }
            Self::LockPolicySet | Self::Unknown => Subject::None,
        }
    }
}

/// A fully decoded ledger event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Unique RPC event id; the idempotency key for inserts.
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub charity_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub charity_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
