//! # Events
//!
//! Every state transition publishes exactly one typed event. Topic 0 is a
//! short symbol naming the transition and topic 1 identifies the subject
//! (charity ID, project ID or address), so the off-chain indexer can route
//! events without decoding their data.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::{CharityCategory, LockPolicy};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharityRegistered {
    pub charity_id: u64,
    pub owner: Address,
    pub name: String,
    pub category: CharityCategory,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorRegistered {
    pub donor: Address,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorDeregistered {
    pub donor: Address,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectListed {
    pub project_id: u64,
    pub charity_id: u64,
    pub target_amount: i128,
}

/// Published for both `unlisted` and `relisted` topics.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectStatusChanged {
    pub project_id: u64,
    pub charity_id: u64,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationMade {
    pub donation_id: u64,
    pub project_id: u64,
    pub charity_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationVerified {
    pub donation_id: u64,
    pub project_id: u64,
    pub charity_id: u64,
    pub donor: Address,
    pub amount: i128,
    pub time_taken_to_verify: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofVerified {
    pub proof_id: u64,
    pub project_id: u64,
    pub charity_id: u64,
    pub verifier: Address,
    pub amount: i128,
    pub applied: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnverifiedDonationsExceeded {
    pub charity_id: u64,
    pub exposure: i128,
    pub threshold_crossed_at: u64,
}

/// Published for both `locked` and `unlocked` topics.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletLockChanged {
    pub charity_id: u64,
    pub owner: Address,
    pub locked: bool,
    /// `true` when set by the exposure check rather than an admin.
    pub automatic: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub charity_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub remaining: i128,
}

pub fn emit_charity_registered(
    env: &Env,
    charity_id: u64,
    owner: Address,
    name: String,
    category: CharityCategory,
) {
    env.events().publish(
        (symbol_short!("char_reg"), charity_id),
        CharityRegistered {
            charity_id,
            owner,
            name,
            category,
        },
    );
}

pub fn emit_donor_registered(env: &Env, donor: Address, by: Address) {
    env.events().publish(
        (symbol_short!("donor_reg"), donor.clone()),
        DonorRegistered { donor, by },
    );
}

pub fn emit_donor_deregistered(env: &Env, donor: Address, by: Address) {
    env.events().publish(
        (symbol_short!("donor_del"), donor.clone()),
        DonorDeregistered { donor, by },
    );
}

pub fn emit_project_listed(env: &Env, project_id: u64, charity_id: u64, target_amount: i128) {
    env.events().publish(
        (symbol_short!("listed"), project_id),
        ProjectListed {
            project_id,
            charity_id,
            target_amount,
        },
    );
}

pub fn emit_project_status_changed(env: &Env, project_id: u64, charity_id: u64, active: bool) {
    let topic = if active {
        symbol_short!("relisted")
    } else {
        symbol_short!("unlisted")
    };
    env.events().publish(
        (topic, project_id),
        ProjectStatusChanged {
            project_id,
            charity_id,
            active,
        },
    );
}

pub fn emit_donation_made(
    env: &Env,
    donation_id: u64,
    project_id: u64,
    charity_id: u64,
    donor: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("donated"), project_id),
        DonationMade {
            donation_id,
            project_id,
            charity_id,
            donor,
            amount,
        },
    );
}

pub fn emit_donation_verified(
    env: &Env,
    donation_id: u64,
    project_id: u64,
    charity_id: u64,
    donor: Address,
    amount: i128,
    time_taken_to_verify: u64,
) {
    env.events().publish(
        (symbol_short!("dn_verif"), project_id),
        DonationVerified {
            donation_id,
            project_id,
            charity_id,
            donor,
            amount,
            time_taken_to_verify,
        },
    );
}

pub fn emit_proof_verified(
    env: &Env,
    proof_id: u64,
    project_id: u64,
    charity_id: u64,
    verifier: Address,
    amount: i128,
    applied: i128,
) {
    env.events().publish(
        (symbol_short!("proof"), project_id),
        ProofVerified {
            proof_id,
            project_id,
            charity_id,
            verifier,
            amount,
            applied,
        },
    );
}

pub fn emit_unverified_exceeded(
    env: &Env,
    charity_id: u64,
    exposure: i128,
    threshold_crossed_at: u64,
) {
    env.events().publish(
        (symbol_short!("exceeded"), charity_id),
        UnverifiedDonationsExceeded {
            charity_id,
            exposure,
            threshold_crossed_at,
        },
    );
}

pub fn emit_wallet_lock_changed(
    env: &Env,
    charity_id: u64,
    owner: Address,
    locked: bool,
    automatic: bool,
) {
    let topic = if locked {
        symbol_short!("locked")
    } else {
        symbol_short!("unlocked")
    };
    env.events().publish(
        (topic, charity_id),
        WalletLockChanged {
            charity_id,
            owner,
            locked,
            automatic,
        },
    );
}

pub fn emit_withdrawal(env: &Env, charity_id: u64, owner: Address, amount: i128, remaining: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), charity_id),
        Withdrawal {
            charity_id,
            owner,
            amount,
            remaining,
        },
    );
}

pub fn emit_lock_policy_set(env: &Env, policy: LockPolicy) {
    env.events().publish((symbol_short!("policy"),), policy);
}
