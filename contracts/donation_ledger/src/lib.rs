//! # Donation Ledger Contract
//!
//! Charities list funding projects, registered donors contribute credits held
//! in escrow by this contract, and a verifier attests how much of each
//! donation was actually spent. The single Soroban contract
//! `DonationLedger` exposes:
//!
//! | Phase         | Entry Point(s)                                                   |
//! |---------------|------------------------------------------------------------------|
//! | Bootstrap     | [`DonationLedger::init`]                                         |
//! | Role admin    | `grant_role`, `revoke_role`, `transfer_super_admin`, `set_verifier` |
//! | Registries    | `register_charity`, `register_donor`, `deregister_donor`         |
//! | Listings      | `list_project`, `unlist_project`, `relist_project`               |
//! | Funding       | [`DonationLedger::donate`]                                       |
//! | Verification  | [`DonationLedger::submit_proof`]                                 |
//! | Wallet        | `withdraw`, `lock_wallet`, `unlock_wallet`                       |
//! | Auto-lock     | `check_unverified_donations`, `check_charity`, `set_lock_policy` |
//! | Queries       | `get_*`, `is_*`, `role_of`, `has_role`                           |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`rbac`], storage access to
//! [`storage`], and event emission to [`events`]. The business rules live
//! in [`charity`], [`donor`], [`projects`] and [`allocation`]; this file
//! contains only the public entry points.
//!
//! Every entry point validates before its first write, and any failure
//! panics with an [`Error`], which reverts the whole invocation including
//! the token transfer.

#![no_std]

// Property tests expand to `::std` paths.
#[cfg(test)]
extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

mod allocation;
mod charity;
mod donor;
pub mod events;
mod projects;
pub mod rbac;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_charity;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_setup;

pub use rbac::Role;
pub use storage::{DEFAULT_LOCK_THRESHOLD, DEFAULT_LOCK_TIME_LIMIT};
pub use types::{
    Charity, CharityCategory, Donation, DonorRecord, LockPolicy, Project, Proof,
    UnverifiedExposure,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized       = 1,
    NotFound            = 2,
    WalletLocked        = 3,
    ProjectInactive     = 4,
    InvalidAmount       = 5,
    DonorInvalid        = 6,
    TransferFailed      = 7,
    InsufficientBalance = 8,
    AlreadyInitialized  = 9,
    NotInitialized      = 10,
    RoleNotFound        = 11,
    InvalidConfig       = 12,
}

#[contract]
pub struct DonationLedger;

#[contractimpl]
impl DonationLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract with its SuperAdmin and the credit token.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, super_admin: Address, token: Address) {
        super_admin.require_auth();
        rbac::init_super_admin(&env, &super_admin);
        storage::set_token(&env, &token);
    }

    /// Address of the credit token held in escrow.
    pub fn get_token(env: Env) -> Address {
        storage::get_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`.
    ///
    /// - `caller` must hold `SuperAdmin` or `Admin`.
    /// - `SuperAdmin` cannot be granted; use `transfer_super_admin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) {
        rbac::grant_role(&env, &caller, &target, role);
    }

    /// Revoke any role from `target`.
    ///
    /// - `caller` must hold `SuperAdmin` or `Admin`.
    /// - Cannot be used to remove the SuperAdmin.
    pub fn revoke_role(env: Env, caller: Address, target: Address) {
        rbac::revoke_role(&env, &caller, &target);
    }

    /// Transfer SuperAdmin to `new_super_admin`. The previous holder loses it.
    pub fn transfer_super_admin(env: Env, current_super_admin: Address, new_super_admin: Address) {
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin);
    }

    /// Grant the Verifier role to `verifier`.
    pub fn set_verifier(env: Env, caller: Address, verifier: Address) {
        rbac::grant_role(&env, &caller, &verifier, Role::Verifier);
    }

    /// Return the role held by `address`, or `None`.
    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::role_of(&env, address)
    }

    /// Return `true` if `address` holds `role`.
    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, address, role)
    }

    // ─────────────────────────────────────────────────────────
    // Registries
    // ─────────────────────────────────────────────────────────

    /// Register a charity owned by `owner`. Admin only.
    pub fn register_charity(
        env: Env,
        admin: Address,
        owner: Address,
        name: String,
        category: CharityCategory,
    ) -> Charity {
        charity::register_charity(&env, &admin, &owner, name, category)
    }

    /// Allow `donor` to donate. Admin only.
    pub fn register_donor(env: Env, admin: Address, donor: Address) -> DonorRecord {
        donor::register_donor(&env, &admin, &donor)
    }

    /// Revoke `donor`'s permission to donate. Admin only.
    pub fn deregister_donor(env: Env, admin: Address, donor: Address) {
        donor::deregister_donor(&env, &admin, &donor);
    }

    pub fn is_valid_donor(env: Env, donor: Address) -> bool {
        donor::is_valid_donor(&env, &donor)
    }

    pub fn is_charity_owner(env: Env, charity_id: u64, address: Address) -> bool {
        charity::is_owner(&env, charity_id, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Project listings
    // ─────────────────────────────────────────────────────────

    /// List a new active project. `owner` must own `charity_id`.
    pub fn list_project(
        env: Env,
        owner: Address,
        charity_id: u64,
        title: String,
        description: String,
        target_amount: i128,
    ) -> Project {
        projects::list_project(&env, &owner, charity_id, title, description, target_amount)
    }

    /// Close a project to new donations. Existing donations are unaffected.
    pub fn unlist_project(env: Env, owner: Address, project_id: u64) {
        projects::unlist_project(&env, &owner, project_id);
    }

    /// Reopen a previously unlisted project.
    pub fn relist_project(env: Env, owner: Address, project_id: u64) {
        projects::relist_project(&env, &owner, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Funding and verification
    // ─────────────────────────────────────────────────────────

    /// Donate `amount` credits to `project_id`.
    ///
    /// `donor` must be registered and must have approved this contract as
    /// spender for at least `amount` on the credit token.
    pub fn donate(env: Env, donor: Address, project_id: u64, amount: i128) -> Donation {
        allocation::donate(&env, &donor, project_id, amount)
    }

    /// Attest that `amount` of the project's donations was spent as stated.
    ///
    /// The amount is applied to outstanding donations oldest-first; any
    /// excess over the outstanding total is not consumed.
    pub fn submit_proof(
        env: Env,
        verifier: Address,
        project_id: u64,
        amount: i128,
        description: String,
    ) -> Proof {
        allocation::submit_proof(&env, &verifier, project_id, amount, description)
    }

    // ─────────────────────────────────────────────────────────
    // Charity wallet
    // ─────────────────────────────────────────────────────────

    /// Pay `amount` from the charity's balance to its owner.
    pub fn withdraw(env: Env, owner: Address, charity_id: u64, amount: i128) {
        charity::withdraw(&env, &owner, charity_id, amount);
    }

    /// Freeze the charity's wallet. Admin only; idempotent.
    pub fn lock_wallet(env: Env, admin: Address, charity_id: u64) {
        charity::lock_wallet(&env, &admin, charity_id);
    }

    /// Unfreeze the charity's wallet. Admin only; idempotent.
    pub fn unlock_wallet(env: Env, admin: Address, charity_id: u64) {
        charity::unlock_wallet(&env, &admin, charity_id);
    }

    // ─────────────────────────────────────────────────────────
    // Auto-lock
    // ─────────────────────────────────────────────────────────

    /// Lock the wallet of the charity owning `project_id` if its unverified
    /// exposure has stayed at or above the threshold for the time limit.
    ///
    /// Callable by anyone; never fails. Returns the lock flag afterwards.
    pub fn check_unverified_donations(env: Env, project_id: u64) -> bool {
        allocation::check_unverified_donations(&env, project_id)
    }

    /// Same evaluation as `check_unverified_donations`, keyed by charity.
    pub fn check_charity(env: Env, charity_id: u64) -> bool {
        charity::check_exposure(&env, charity_id)
    }

    pub fn get_lock_policy(env: Env) -> LockPolicy {
        storage::get_lock_policy(&env)
    }

    /// Replace the auto-lock policy. Admin only; both values must be positive.
    ///
    /// Changing the threshold restarts every charity's crossing clock at the
    /// current time; changing only the time limit keeps existing clocks.
    pub fn set_lock_policy(env: Env, admin: Address, threshold: i128, time_limit: u64) {
        rbac::authorize(&env, &admin, rbac::Action::SetLockPolicy, None);
        if threshold <= 0 || time_limit == 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        let previous = storage::get_lock_policy(&env);
        let policy = LockPolicy {
            threshold,
            time_limit,
        };
        storage::set_lock_policy(&env, &policy);
        // A stamp taken under another threshold does not count toward this one.
        if previous.threshold != threshold {
            charity::restart_exposure_clocks(&env, threshold);
        }
        events::emit_lock_policy_set(&env, policy);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_charity(env: Env, charity_id: u64) -> Charity {
        charity::load_charity(&env, charity_id)
    }

    pub fn get_all_charities(env: Env) -> Vec<Charity> {
        charity::all_charities(&env)
    }

    pub fn get_charity_balance(env: Env, charity_id: u64) -> i128 {
        storage::load_charity_state(&env, charity_id).balance
    }

    pub fn is_wallet_locked(env: Env, charity_id: u64) -> bool {
        storage::load_charity_state(&env, charity_id).locked
    }

    /// Number of the charity's donations that are fully verified.
    pub fn get_verified_count(env: Env, charity_id: u64) -> u32 {
        storage::load_charity_state(&env, charity_id).verified_count
    }

    /// Number of the charity's donations with an outstanding amount.
    pub fn get_unverified_count(env: Env, charity_id: u64) -> u32 {
        storage::load_charity_state(&env, charity_id).unverified_count
    }

    pub fn get_unverified_exposure(env: Env, charity_id: u64) -> UnverifiedExposure {
        storage::load_charity_profile(&env, charity_id);
        storage::load_exposure(&env, charity_id)
    }

    pub fn get_all_active_project_listings(env: Env) -> Vec<Project> {
        projects::active_projects(&env)
    }

    pub fn get_project_listing_details(env: Env, project_id: u64) -> Project {
        projects::load_project(&env, project_id)
    }

    pub fn get_projects_by_charity(env: Env, charity_id: u64) -> Vec<Project> {
        projects::projects_by_charity(&env, charity_id)
    }

    pub fn is_project_active(env: Env, project_id: u64) -> bool {
        projects::is_active(&env, project_id)
    }

    pub fn get_donation(env: Env, donation_id: u64) -> Donation {
        storage::load_donation(&env, donation_id)
    }

    pub fn get_donations_by_project(env: Env, project_id: u64) -> Vec<Donation> {
        projects::donations_by_project(&env, project_id)
    }

    pub fn get_proofs_by_project(env: Env, project_id: u64) -> Vec<Proof> {
        projects::proofs_by_project(&env, project_id)
    }

    pub fn get_donations_by_donor(env: Env, donor: Address) -> Vec<Donation> {
        projects::donations_by_donor(&env, &donor)
    }

    /// Credit balance of `donor` on the escrow token.
    pub fn get_donor_balance(env: Env, donor: Address) -> i128 {
        token::Client::new(&env, &storage::get_token(&env)).balance(&donor)
    }
}
