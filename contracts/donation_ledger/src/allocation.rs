//! # Allocation engine
//!
//! Donations flow in through [`donate`]; verifier attestations flow in
//! through [`submit_proof`], which spreads the attested amount over the
//! project's outstanding donations oldest-first.
//!
//! ## FIFO walk
//!
//! ```text
//! donations:  [ 50 ✔ ][ 40 ✔ ][ 40 ◐ 10/40 ][ 100 ○ ] ...
//!                               ▲ cursor
//! ```
//!
//! Because allocation always fills the oldest outstanding donation first,
//! fully verified donations form a prefix of the project's donation list.
//! The per-project cursor marks the first donation that is not fully
//! verified, so a proof never reloads the verified prefix.
//!
//! A proof consumes at most the project's total outstanding amount. Any
//! excess is recorded on the [`Proof`] (`amount > applied`) and otherwise
//! ignored.

use soroban_sdk::{panic_with_error, token, Address, Env, String};

use crate::charity;
use crate::events;
use crate::rbac::{self, Action};
use crate::storage;
use crate::types::{Donation, Proof};
use crate::Error;

/// Pull `amount` credits from `donor` into the project's charity wallet and
/// record the donation.
pub fn donate(env: &Env, donor: &Address, project_id: u64, amount: i128) -> Donation {
    rbac::authorize(env, donor, Action::Donate, None);

    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let config = storage::load_project_config(env, project_id);
    let mut project_state = storage::load_project_state(env, project_id);
    if !project_state.active {
        panic_with_error!(env, Error::ProjectInactive);
    }
    let charity_id = config.charity_id;
    let mut charity_state = storage::load_charity_state(env, charity_id);
    charity::require_unlocked(env, &charity_state);

    // The pull must succeed before anything is recorded.
    let ledger = env.current_contract_address();
    let token_client = token::Client::new(env, &storage::get_token(env));
    if token_client.balance(donor) < amount || token_client.allowance(donor, &ledger) < amount {
        panic_with_error!(env, Error::TransferFailed);
    }
    token_client.transfer_from(&ledger, donor, &ledger, &amount);

    let now = env.ledger().timestamp();
    let donation = Donation {
        id: storage::next_donation_id(env),
        project_id,
        charity_id,
        donor: donor.clone(),
        amount,
        verified_amount: 0,
        timestamp: now,
        time_taken_to_verify: 0,
    };
    storage::save_donation(env, &donation);
    storage::add_project_donation(env, project_id, donation.id);
    storage::add_donor_donation(env, donor, donation.id);

    project_state.raised += amount;
    storage::save_project_state(env, project_id, &project_state);

    charity_state.balance += amount;
    charity_state.unverified_count += 1;
    storage::save_charity_state(env, charity_id, &charity_state);

    let policy = storage::get_lock_policy(env);
    let mut exposure = storage::load_exposure(env, charity_id);
    exposure.add(amount, policy.threshold, now);
    storage::save_exposure(env, &exposure);

    events::emit_donation_made(
        env,
        donation.id,
        project_id,
        charity_id,
        donor.clone(),
        amount,
    );
    donation
}

/// Apply `amount` of verified spend to the project's outstanding donations
/// in creation order and record the proof.
pub fn submit_proof(
    env: &Env,
    verifier: &Address,
    project_id: u64,
    amount: i128,
    description: String,
) -> Proof {
    rbac::authorize(env, verifier, Action::SubmitProof, None);

    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let config = storage::load_project_config(env, project_id);
    let now = env.ledger().timestamp();

    let donation_ids = storage::project_donations(env, project_id);
    let mut cursor = storage::verify_cursor(env, project_id);
    let mut remaining = amount;
    let mut applied: i128 = 0;
    let mut newly_verified: u32 = 0;

    while remaining > 0 && cursor < donation_ids.len() {
        let mut donation = storage::load_donation(env, donation_ids.get_unchecked(cursor));
        let delta = remaining.min(donation.outstanding());
        if delta > 0 {
            donation.verified_amount += delta;
            remaining -= delta;
            applied += delta;
        }
        if donation.is_fully_verified() {
            // Zero is reserved for "not yet verified".
            donation.time_taken_to_verify = now.saturating_sub(donation.timestamp).max(1);
            newly_verified += 1;
            cursor += 1;
            events::emit_donation_verified(
                env,
                donation.id,
                project_id,
                config.charity_id,
                donation.donor.clone(),
                donation.amount,
                donation.time_taken_to_verify,
            );
        }
        if delta > 0 {
            storage::save_donation(env, &donation);
        }
    }
    storage::set_verify_cursor(env, project_id, cursor);

    if applied > 0 {
        let mut project_state = storage::load_project_state(env, project_id);
        project_state.verified += applied;
        storage::save_project_state(env, project_id, &project_state);

        let mut charity_state = storage::load_charity_state(env, config.charity_id);
        charity_state.verified_count += newly_verified;
        charity_state.unverified_count -= newly_verified;
        storage::save_charity_state(env, config.charity_id, &charity_state);

        let policy = storage::get_lock_policy(env);
        let mut exposure = storage::load_exposure(env, config.charity_id);
        exposure.release(applied, policy.threshold);
        storage::save_exposure(env, &exposure);
    }

    let proof = Proof {
        id: storage::next_proof_id(env),
        project_id,
        verifier: verifier.clone(),
        amount,
        applied,
        description,
        timestamp: now,
    };
    storage::save_proof(env, &proof);
    storage::add_project_proof(env, project_id, proof.id);

    events::emit_proof_verified(
        env,
        proof.id,
        project_id,
        config.charity_id,
        verifier.clone(),
        amount,
        applied,
    );
    proof
}

/// Evaluate the auto-lock rule for the charity owning `project_id`.
///
/// Never fails; an unknown project evaluates to `false`.
pub fn check_unverified_donations(env: &Env, project_id: u64) -> bool {
    match storage::find_project_config(env, project_id) {
        Some(config) => charity::check_exposure(env, config.charity_id),
        None => false,
    }
}
