//! # Charity accounts
//!
//! Custody of donated credits per charity, the wallet lock, and the
//! verified/unverified counters maintained by [`crate::allocation`].
//!
//! Credits never leave the contract except through [`withdraw`], which pays
//! the charity owner from the contract's token balance.

use soroban_sdk::{panic_with_error, token, Address, Env, String, Vec};

use crate::events;
use crate::rbac::{self, Action};
use crate::storage;
use crate::types::{Charity, CharityCategory, CharityProfile, CharityState, UnverifiedExposure};
use crate::Error;

pub fn register_charity(
    env: &Env,
    admin: &Address,
    owner: &Address,
    name: String,
    category: CharityCategory,
) -> Charity {
    rbac::authorize(env, admin, Action::RegisterCharity, None);

    let id = storage::next_charity_id(env);
    let profile = CharityProfile {
        id,
        owner: owner.clone(),
        name: name.clone(),
        category,
        registered_at: env.ledger().timestamp(),
    };
    let state = CharityState {
        balance: 0,
        locked: false,
        verified_count: 0,
        unverified_count: 0,
    };

    storage::save_charity_profile(env, &profile);
    storage::save_charity_state(env, id, &state);
    storage::save_exposure(env, &UnverifiedExposure::new(id));

    events::emit_charity_registered(env, id, owner.clone(), name, category);
    Charity::from_parts(profile, state)
}

pub fn load_charity(env: &Env, id: u64) -> Charity {
    let profile = storage::load_charity_profile(env, id);
    let state = storage::load_charity_state(env, id);
    Charity::from_parts(profile, state)
}

/// All charities in registration order.
pub fn all_charities(env: &Env) -> Vec<Charity> {
    let mut charities = Vec::new(env);
    for id in 0..storage::charity_count(env) {
        charities.push_back(load_charity(env, id));
    }
    charities
}

pub fn is_owner(env: &Env, charity_id: u64, address: &Address) -> bool {
    storage::load_charity_profile(env, charity_id).owner == *address
}

/// Pay `amount` of the charity's custodied credits out to its owner.
pub fn withdraw(env: &Env, owner: &Address, charity_id: u64, amount: i128) {
    let profile = storage::load_charity_profile(env, charity_id);
    rbac::authorize(env, owner, Action::Withdraw, Some(&profile.owner));

    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let mut state = storage::load_charity_state(env, charity_id);
    require_unlocked(env, &state);
    if amount > state.balance {
        panic_with_error!(env, Error::InsufficientBalance);
    }

    state.balance -= amount;
    storage::save_charity_state(env, charity_id, &state);

    let token_client = token::Client::new(env, &storage::get_token(env));
    token_client.transfer(&env.current_contract_address(), &profile.owner, &amount);

    events::emit_withdrawal(env, charity_id, profile.owner, amount, state.balance);
}

/// Manually lock the wallet. Locking a locked wallet is a no-op.
pub fn lock_wallet(env: &Env, admin: &Address, charity_id: u64) {
    rbac::authorize(env, admin, Action::LockWallet, None);
    set_locked(env, charity_id, true, false);
}

/// Manually unlock the wallet. Unlocking an unlocked wallet is a no-op.
///
/// Exposure is left as is: if it is still overdue, the next
/// `check_unverified_donations` locks the wallet again.
pub fn unlock_wallet(env: &Env, admin: &Address, charity_id: u64) {
    rbac::authorize(env, admin, Action::UnlockWallet, None);
    set_locked(env, charity_id, false, false);
}

/// Write the lock flag and emit the change. Returns `false` when the flag
/// already had the requested value.
pub(crate) fn set_locked(env: &Env, charity_id: u64, locked: bool, automatic: bool) -> bool {
    let profile = storage::load_charity_profile(env, charity_id);
    let mut state = storage::load_charity_state(env, charity_id);
    if state.locked == locked {
        return false;
    }
    state.locked = locked;
    storage::save_charity_state(env, charity_id, &state);
    events::emit_wallet_lock_changed(env, charity_id, profile.owner, locked, automatic);
    true
}

/// Panics with `WalletLocked` when the charity's wallet is frozen.
pub fn require_unlocked(env: &Env, state: &CharityState) {
    if state.locked {
        panic_with_error!(env, Error::WalletLocked);
    }
}

/// Evaluate the exposure of `charity_id` against the lock policy, locking
/// the wallet when it has been over the threshold for too long.
///
/// Never fails: an unknown charity evaluates to `false`. Returns the lock
/// flag after evaluation.
pub fn check_exposure(env: &Env, charity_id: u64) -> bool {
    let state = match storage::find_charity_state(env, charity_id) {
        Some(state) => state,
        None => return false,
    };
    if state.locked {
        return true;
    }

    let policy = storage::get_lock_policy(env);
    let exposure = storage::load_exposure(env, charity_id);
    let now = env.ledger().timestamp();
    if !exposure.is_overdue(policy.threshold, policy.time_limit, now) {
        return false;
    }

    let crossed_at = exposure.threshold_crossed_at.unwrap_or(now);
    events::emit_unverified_exceeded(env, charity_id, exposure.running_total, crossed_at);
    set_locked(env, charity_id, true, true);
    true
}

/// Restart every charity's threshold clock under a new lock threshold.
pub fn restart_exposure_clocks(env: &Env, threshold: i128) {
    let now = env.ledger().timestamp();
    for id in 0..storage::charity_count(env) {
        let mut exposure = storage::load_exposure(env, id);
        exposure.restart(threshold, now);
        storage::save_exposure(env, &exposure);
    }
}
