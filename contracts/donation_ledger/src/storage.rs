//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the donation ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type         | Description                          |
//! |-----------------|--------------|--------------------------------------|
//! | `Token`         | `Address`    | Credit token (SEP-41) held in escrow |
//! | `LockPolicy`    | `LockPolicy` | Auto-lock threshold and time limit   |
//! | `CharityCount`  | `u64`        | Auto-increment charity ID counter    |
//! | `ProjectCount`  | `u64`        | Auto-increment project ID counter    |
//! | `DonationCount` | `u64`        | Auto-increment donation ID counter   |
//! | `ProofCount`    | `u64`        | Auto-increment proof ID counter      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type                  | Description                          |
//! |--------------------------|-----------------------|--------------------------------------|
//! | `CharityProfile(id)`     | `CharityProfile`      | Immutable charity registration       |
//! | `CharityState(id)`       | `CharityState`        | Balance, lock flag, counters         |
//! | `Exposure(id)`           | `UnverifiedExposure`  | Outstanding credits per charity      |
//! | `CharityProjects(id)`    | `Vec<u64>`            | Project IDs owned by a charity       |
//! | `Donor(addr)`            | `DonorRecord`         | Donor registry entry                 |
//! | `DonorDonations(addr)`   | `Vec<u64>`            | Donation IDs made by a donor         |
//! | `ProjConfig(id)`         | `ProjectConfig`       | Immutable project listing            |
//! | `ProjState(id)`          | `ProjectState`        | Active flag and running totals       |
//! | `ProjDonations(id)`      | `Vec<u64>`            | Donation IDs in creation order       |
//! | `ProjProofs(id)`         | `Vec<u64>`            | Proof IDs in creation order          |
//! | `VerifyCursor(id)`       | `u32`                 | First not-fully-verified donation    |
//! | `Donation(id)`           | `Donation`            | Donation record                      |
//! | `Proof(id)`              | `Proof`               | Proof record                         |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Every `load_*` helper for a keyed entity raises [`Error::NotFound`] when the
//! entry is missing; `find_*` helpers return `Option` instead.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{
    CharityProfile, CharityState, Donation, DonorRecord, LockPolicy, ProjectConfig, ProjectState,
    Proof, UnverifiedExposure,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Lock policy defaults ─────────────────────────────────────────────

/// Unverified credits at which the auto-lock clock starts.
pub const DEFAULT_LOCK_THRESHOLD: i128 = 100;

/// Seconds the exposure may stay over the threshold (20 days).
pub const DEFAULT_LOCK_TIME_LIMIT: u64 = 20 * 24 * 60 * 60;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // Instance tier
    Token,
    LockPolicy,
    CharityCount,
    ProjectCount,
    DonationCount,
    ProofCount,
    // Persistent tier
    CharityProfile(u64),
    CharityState(u64),
    Exposure(u64),
    CharityProjects(u64),
    Donor(Address),
    DonorDonations(Address),
    ProjConfig(u64),
    ProjState(u64),
    ProjDonations(u64),
    ProjProofs(u64),
    VerifyCursor(u64),
    Donation(u64),
    Proof(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Atomically reads, increments, and stores the counter under `key`.
/// Returns the ID to use for the *current* entity (pre-increment value).
fn next_id(env: &Env, key: DataKey) -> u64 {
    bump_instance(env);
    let current: u64 = env.storage().instance().get(&key).unwrap_or(0);
    env.storage().instance().set(&key, &(current + 1));
    current
}

fn count(env: &Env, key: DataKey) -> u64 {
    env.storage().instance().get(&key).unwrap_or(0)
}

pub fn next_charity_id(env: &Env) -> u64 {
    next_id(env, DataKey::CharityCount)
}

pub fn next_project_id(env: &Env) -> u64 {
    next_id(env, DataKey::ProjectCount)
}

pub fn next_donation_id(env: &Env) -> u64 {
    next_id(env, DataKey::DonationCount)
}

pub fn next_proof_id(env: &Env) -> u64 {
    next_id(env, DataKey::ProofCount)
}

pub fn charity_count(env: &Env) -> u64 {
    count(env, DataKey::CharityCount)
}

pub fn project_count(env: &Env) -> u64 {
    count(env, DataKey::ProjectCount)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Credit token held in escrow. Panics with `NotInitialized` before `init`.
pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn set_lock_policy(env: &Env, policy: &LockPolicy) {
    env.storage().instance().set(&DataKey::LockPolicy, policy);
    bump_instance(env);
}

/// Current lock policy, falling back to the defaults when never configured.
pub fn get_lock_policy(env: &Env) -> LockPolicy {
    env.storage()
        .instance()
        .get(&DataKey::LockPolicy)
        .unwrap_or(LockPolicy {
            threshold: DEFAULT_LOCK_THRESHOLD,
            time_limit: DEFAULT_LOCK_TIME_LIMIT,
        })
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key. Also used for role entries
/// kept under the RBAC key space.
pub(crate) fn bump_persistent<K>(env: &Env, key: &K)
where
    K: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn write<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

fn find<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn load<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(env: &Env, key: &DataKey) -> V {
    find(env, key).unwrap_or_else(|| panic_with_error!(env, Error::NotFound))
}

fn load_ids(env: &Env, key: &DataKey) -> Vec<u64> {
    find(env, key).unwrap_or_else(|| Vec::new(env))
}

fn push_id(env: &Env, key: DataKey, id: u64) {
    let mut ids = load_ids(env, &key);
    ids.push_back(id);
    write(env, &key, &ids);
}

// Charities

pub fn save_charity_profile(env: &Env, profile: &CharityProfile) {
    write(env, &DataKey::CharityProfile(profile.id), profile);
}

pub fn load_charity_profile(env: &Env, id: u64) -> CharityProfile {
    load(env, &DataKey::CharityProfile(id))
}

pub fn save_charity_state(env: &Env, id: u64, state: &CharityState) {
    write(env, &DataKey::CharityState(id), state);
}

pub fn load_charity_state(env: &Env, id: u64) -> CharityState {
    load(env, &DataKey::CharityState(id))
}

pub fn find_charity_state(env: &Env, id: u64) -> Option<CharityState> {
    find(env, &DataKey::CharityState(id))
}

pub fn save_exposure(env: &Env, exposure: &UnverifiedExposure) {
    write(env, &DataKey::Exposure(exposure.charity_id), exposure);
}

/// Exposure for `charity_id`; a charity that never received a donation has none.
pub fn load_exposure(env: &Env, charity_id: u64) -> UnverifiedExposure {
    find(env, &DataKey::Exposure(charity_id))
        .unwrap_or_else(|| UnverifiedExposure::new(charity_id))
}

pub fn charity_projects(env: &Env, charity_id: u64) -> Vec<u64> {
    load_ids(env, &DataKey::CharityProjects(charity_id))
}

pub fn add_charity_project(env: &Env, charity_id: u64, project_id: u64) {
    push_id(env, DataKey::CharityProjects(charity_id), project_id);
}

// Donors

pub fn save_donor(env: &Env, donor: &DonorRecord) {
    write(env, &DataKey::Donor(donor.address.clone()), donor);
}

pub fn find_donor(env: &Env, address: &Address) -> Option<DonorRecord> {
    find(env, &DataKey::Donor(address.clone()))
}

pub fn donor_donations(env: &Env, donor: &Address) -> Vec<u64> {
    load_ids(env, &DataKey::DonorDonations(donor.clone()))
}

pub fn add_donor_donation(env: &Env, donor: &Address, donation_id: u64) {
    push_id(env, DataKey::DonorDonations(donor.clone()), donation_id);
}

// Projects

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, config: &ProjectConfig, state: &ProjectState) {
    write(env, &DataKey::ProjConfig(config.id), config);
    write(env, &DataKey::ProjState(config.id), state);
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> ProjectConfig {
    load(env, &DataKey::ProjConfig(id))
}

pub fn find_project_config(env: &Env, id: u64) -> Option<ProjectConfig> {
    find(env, &DataKey::ProjConfig(id))
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> ProjectState {
    load(env, &DataKey::ProjState(id))
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    write(env, &DataKey::ProjState(id), state);
}

pub fn project_donations(env: &Env, project_id: u64) -> Vec<u64> {
    load_ids(env, &DataKey::ProjDonations(project_id))
}

pub fn add_project_donation(env: &Env, project_id: u64, donation_id: u64) {
    push_id(env, DataKey::ProjDonations(project_id), donation_id);
}

pub fn project_proofs(env: &Env, project_id: u64) -> Vec<u64> {
    load_ids(env, &DataKey::ProjProofs(project_id))
}

pub fn add_project_proof(env: &Env, project_id: u64, proof_id: u64) {
    push_id(env, DataKey::ProjProofs(project_id), proof_id);
}

/// Index into `ProjDonations(project_id)` of the first donation that still
/// has an outstanding amount.
pub fn verify_cursor(env: &Env, project_id: u64) -> u32 {
    find(env, &DataKey::VerifyCursor(project_id)).unwrap_or(0)
}

pub fn set_verify_cursor(env: &Env, project_id: u64, cursor: u32) {
    write(env, &DataKey::VerifyCursor(project_id), &cursor);
}

// Donations and proofs

pub fn save_donation(env: &Env, donation: &Donation) {
    write(env, &DataKey::Donation(donation.id), donation);
}

pub fn load_donation(env: &Env, id: u64) -> Donation {
    load(env, &DataKey::Donation(id))
}

pub fn save_proof(env: &Env, proof: &Proof) {
    write(env, &DataKey::Proof(proof.id), proof);
}

pub fn load_proof(env: &Env, id: u64) -> Proof {
    load(env, &DataKey::Proof(id))
}
