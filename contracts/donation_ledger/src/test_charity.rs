extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::{assert_counters_cover_donations, assert_exposure_matches};
use crate::test_setup::setup;
use crate::{CharityCategory, Error};

#[test]
fn test_register_charity() {
    let t = setup();
    let owner = Address::generate(&t.env);
    let charity = t.client.register_charity(
        &t.super_admin,
        &owner,
        &t.text("Leonard Foundation"),
        &CharityCategory::Children,
    );

    assert_eq!(charity.id, 0);
    assert_eq!(charity.owner, owner);
    assert_eq!(charity.category, CharityCategory::Children);
    assert_eq!(charity.balance, 0);
    assert!(!charity.locked);
    assert_eq!(t.client.get_charity(&charity.id), charity);
    assert!(t.client.is_charity_owner(&charity.id, &owner));
    assert!(!t
        .client
        .is_charity_owner(&charity.id, &Address::generate(&t.env)));

    let exposure = t.client.get_unverified_exposure(&charity.id);
    assert_eq!(exposure.running_total, 0);
    assert_eq!(exposure.threshold_crossed_at, None);
}

#[test]
fn test_register_charity_requires_admin() {
    let t = setup();
    let owner = Address::generate(&t.env);
    let result = t.client.try_register_charity(
        &owner,
        &owner,
        &t.text("Self Declared"),
        &CharityCategory::Other,
    );
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));
}

#[test]
fn test_all_charities_in_registration_order() {
    let t = setup();
    let (first, _) = t.charity();
    let second_owner = Address::generate(&t.env);
    t.client.register_charity(
        &t.super_admin,
        &second_owner,
        &t.text("Green Earth"),
        &CharityCategory::Environment,
    );

    let all = t.client.get_all_charities();
    assert_eq!(all.len(), 2);
    assert_eq!(all.get(0).unwrap().id, first);
    assert_eq!(all.get(1).unwrap().category, CharityCategory::Environment);
}

#[test]
fn test_unknown_charity_is_not_found() {
    let t = setup();
    assert_eq!(t.client.try_get_charity(&3), Err(Ok(Error::NotFound)));
    assert_eq!(
        t.client.try_get_unverified_exposure(&3),
        Err(Ok(Error::NotFound))
    );
    assert_eq!(t.client.try_lock_wallet(&t.super_admin, &3), Err(Ok(Error::NotFound)));
}

// ─────────────────────────────────────────────────────────
// Donors
// ─────────────────────────────────────────────────────────

#[test]
fn test_donor_registration_lifecycle() {
    let t = setup();
    let donor = Address::generate(&t.env);
    assert!(!t.client.is_valid_donor(&donor));

    t.advance(60);
    let record = t.client.register_donor(&t.super_admin, &donor);
    assert!(record.valid);
    assert!(t.client.is_valid_donor(&donor));

    t.client.deregister_donor(&t.super_admin, &donor);
    assert!(!t.client.is_valid_donor(&donor));
    // Deregistering twice is harmless.
    t.client.deregister_donor(&t.super_admin, &donor);

    t.advance(60);
    let again = t.client.register_donor(&t.super_admin, &donor);
    assert!(again.valid);
    assert_eq!(again.registered_at, record.registered_at);
}

#[test]
fn test_donor_registry_is_admin_only() {
    let t = setup();
    let donor = Address::generate(&t.env);
    assert_eq!(
        t.client.try_register_donor(&donor, &donor),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        t.client.try_deregister_donor(&t.super_admin, &donor),
        Err(Ok(Error::NotFound))
    );
}

#[test]
fn test_deregistered_donor_keeps_history() {
    let t = setup();
    let (_, _, project_id) = t.charity_with_project();
    let donor = t.donor(50);
    t.donate(&donor, project_id, 50);

    t.client.deregister_donor(&t.super_admin, &donor);
    assert_eq!(t.client.get_donations_by_donor(&donor).len(), 1);
    assert_eq!(t.client.get_donations_by_project(&project_id).len(), 1);
}

// ─────────────────────────────────────────────────────────
// Withdrawals
// ─────────────────────────────────────────────────────────

#[test]
fn test_withdraw_pays_owner_once() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    let donor = t.donor(100);

    t.donate(&donor, project_id, 50);
    assert_eq!(t.client.get_donor_balance(&donor), 50);
    assert_eq!(t.client.get_charity_balance(&charity_id), 50);

    let stranger = Address::generate(&t.env);
    assert_eq!(
        t.client.try_withdraw(&stranger, &charity_id, &50),
        Err(Ok(Error::NotAuthorized))
    );

    t.client.withdraw(&owner, &charity_id, &50);
    assert_eq!(t.client.get_charity_balance(&charity_id), 0);
    assert_eq!(t.token.balance(&owner), 50);
    assert_eq!(t.token.balance(&t.client.address), 0);

    assert_eq!(
        t.client.try_withdraw(&owner, &charity_id, &50),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn test_withdraw_rejects_non_positive_amount() {
    let t = setup();
    let (charity_id, owner) = t.charity();
    assert_eq!(
        t.client.try_withdraw(&owner, &charity_id, &0),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_withdraw_does_not_change_verification_state() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    let donor = t.donor(80);
    t.donate(&donor, project_id, 80);

    t.client.withdraw(&owner, &charity_id, &30);

    let charity = t.client.get_charity(&charity_id);
    let donations: std::vec::Vec<_> = t
        .client
        .get_donations_by_project(&project_id)
        .iter()
        .collect();
    assert_counters_cover_donations(&charity, &donations);
    assert_exposure_matches(&t.client.get_unverified_exposure(&charity_id), &donations);
    assert_eq!(charity.balance, 50);
}

#[test]
fn test_manual_lock_blocks_withdrawal_until_unlocked() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    let donor = t.donor(100);
    t.donate(&donor, project_id, 60);

    t.client.lock_wallet(&t.super_admin, &charity_id);
    assert!(t.client.is_wallet_locked(&charity_id));
    assert_eq!(
        t.client.try_withdraw(&owner, &charity_id, &60),
        Err(Ok(Error::WalletLocked))
    );
    assert_eq!(t.client.get_charity_balance(&charity_id), 60);

    t.client.unlock_wallet(&t.super_admin, &charity_id);
    assert!(!t.client.is_wallet_locked(&charity_id));
    t.client.withdraw(&owner, &charity_id, &60);
    assert_eq!(t.client.get_charity_balance(&charity_id), 0);
}

#[test]
fn test_lock_and_unlock_are_idempotent() {
    let t = setup();
    let (charity_id, _) = t.charity();

    t.client.unlock_wallet(&t.super_admin, &charity_id);
    assert!(!t.client.is_wallet_locked(&charity_id));

    t.client.lock_wallet(&t.super_admin, &charity_id);
    t.client.lock_wallet(&t.super_admin, &charity_id);
    assert!(t.client.is_wallet_locked(&charity_id));
    assert!(t.client.check_charity(&charity_id));
}

#[test]
fn test_lock_requires_admin() {
    let t = setup();
    let (charity_id, owner) = t.charity();
    assert_eq!(
        t.client.try_lock_wallet(&owner, &charity_id),
        Err(Ok(Error::NotAuthorized))
    );
    assert_eq!(
        t.client.try_unlock_wallet(&t.verifier, &charity_id),
        Err(Ok(Error::NotAuthorized))
    );
}

#[test]
fn test_unlocked_overdue_wallet_relocks_on_next_check() {
    let t = setup();
    let (charity_id, _, project_id) = t.charity_with_project();
    let donor = t.donor(100);
    t.donate(&donor, project_id, 100);
    t.advance(t.client.get_lock_policy().time_limit);

    assert!(t.client.check_charity(&charity_id));
    t.client.unlock_wallet(&t.super_admin, &charity_id);
    assert!(!t.client.is_wallet_locked(&charity_id));

    assert!(t.client.check_charity(&charity_id));
    assert!(t.client.is_wallet_locked(&charity_id));
}
