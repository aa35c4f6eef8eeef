extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{
    CharityRegistered, DonationMade, DonationVerified, ProjectListed, ProjectStatusChanged,
    ProofVerified, UnverifiedDonationsExceeded, WalletLockChanged, Withdrawal,
};
use crate::test_setup::setup;
use crate::{CharityCategory, LockPolicy, Role};

#[test]
fn test_charity_registered_event() {
    let t = setup();
    let owner = Address::generate(&t.env);
    let charity = t.client.register_charity(
        &t.super_admin,
        &owner,
        &t.text("Leonard Foundation"),
        &CharityCategory::Children,
    );

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, t.client.address);
    let expected_topics = vec![
        &t.env,
        symbol_short!("char_reg").into_val(&t.env),
        charity.id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CharityRegistered = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        CharityRegistered {
            charity_id: charity.id,
            owner,
            name: t.text("Leonard Foundation"),
            category: CharityCategory::Children,
        }
    );
}

#[test]
fn test_project_listed_event() {
    let t = setup();
    let (charity_id, owner) = t.charity();
    let project_id = t.project(charity_id, &owner);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("listed").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectListed = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        ProjectListed {
            project_id,
            charity_id,
            target_amount: 100,
        }
    );
}

#[test]
fn test_project_unlisted_event() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    t.client.unlist_project(&owner, &project_id);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("unlisted").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectStatusChanged = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        ProjectStatusChanged {
            project_id,
            charity_id,
            active: false,
        }
    );
}

#[test]
fn test_donation_made_event() {
    let t = setup();
    let (charity_id, _, project_id) = t.charity_with_project();
    let donor = t.donor(100);
    let donation = t.donate(&donor, project_id, 60);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, t.client.address);
    let expected_topics = vec![
        &t.env,
        symbol_short!("donated").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DonationMade = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        DonationMade {
            donation_id: donation.id,
            project_id,
            charity_id,
            donor,
            amount: 60,
        }
    );
}

#[test]
fn test_proof_events() {
    let t = setup();
    let (charity_id, _, project_id) = t.charity_with_project();
    let donor = t.donor(100);
    let first = t.donate(&donor, project_id, 30);
    t.donate(&donor, project_id, 30);
    t.advance(100);
    let proof = t.prove(project_id, 45);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("proof").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: ProofVerified = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        ProofVerified {
            proof_id: proof.id,
            project_id,
            charity_id,
            verifier: t.verifier.clone(),
            amount: 45,
            applied: 45,
        }
    );

    // Only the first donation completed, so exactly one dn_verif precedes the proof.
    let verified_topic = vec![
        &t.env,
        symbol_short!("dn_verif").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    let verified: std::vec::Vec<_> = all_events
        .iter()
        .filter(|event| event.1 == verified_topic)
        .collect();
    assert_eq!(verified.len(), 1);
    let event_data: DonationVerified = verified[0].2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        DonationVerified {
            donation_id: first.id,
            project_id,
            charity_id,
            donor,
            amount: 30,
            time_taken_to_verify: 100,
        }
    );
}

#[test]
fn test_auto_lock_events() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    let donor = t.donor(100);
    t.donate(&donor, project_id, 100);
    let crossed_at = t.now();
    t.advance(t.client.get_lock_policy().time_limit);
    t.client.check_unverified_donations(&project_id);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("locked").into_val(&t.env),
        charity_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: WalletLockChanged = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        WalletLockChanged {
            charity_id,
            owner,
            locked: true,
            automatic: true,
        }
    );

    let exceeded_topic = vec![
        &t.env,
        symbol_short!("exceeded").into_val(&t.env),
        charity_id.into_val(&t.env),
    ];
    let exceeded = all_events
        .iter()
        .find(|event| event.1 == exceeded_topic)
        .expect("No exceeded event");
    let event_data: UnverifiedDonationsExceeded = exceeded.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        UnverifiedDonationsExceeded {
            charity_id,
            exposure: 100,
            threshold_crossed_at: crossed_at,
        }
    );
}

#[test]
fn test_manual_unlock_event() {
    let t = setup();
    let (charity_id, owner) = t.charity();
    t.client.lock_wallet(&t.super_admin, &charity_id);
    t.client.unlock_wallet(&t.super_admin, &charity_id);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("unlocked").into_val(&t.env),
        charity_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: WalletLockChanged = last_event.2.try_into_val(&t.env).unwrap();
    assert!(!event_data.locked);
    assert!(!event_data.automatic);
    assert_eq!(event_data.owner, owner);
}

#[test]
fn test_withdrawal_event() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    let donor = t.donor(90);
    t.donate(&donor, project_id, 90);
    t.client.withdraw(&owner, &charity_id, &40);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("withdrawn").into_val(&t.env),
        charity_id.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: Withdrawal = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        Withdrawal {
            charity_id,
            owner,
            amount: 40,
            remaining: 50,
        }
    );
}

#[test]
fn test_lock_policy_event() {
    let t = setup();
    t.client.set_lock_policy(&t.super_admin, &250, &3600);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&t.env, symbol_short!("policy").into_val(&t.env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: LockPolicy = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        LockPolicy {
            threshold: 250,
            time_limit: 3600,
        }
    );
}

#[test]
fn test_role_granted_event() {
    let t = setup();
    let admin = Address::generate(&t.env);
    t.client.grant_role(&t.super_admin, &admin, &Role::Admin);

    let all_events = t.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &t.env,
        symbol_short!("role_set").into_val(&t.env),
        admin.into_val(&t.env),
        Role::Admin.into_val(&t.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let caller: Address = last_event.2.try_into_val(&t.env).unwrap();
    assert_eq!(caller, t.super_admin);
}

#[test]
fn test_noop_transitions_emit_nothing() {
    let t = setup();
    let (charity_id, owner, project_id) = t.charity_with_project();
    t.client.relist_project(&owner, &project_id);
    t.client.unlock_wallet(&t.super_admin, &charity_id);

    let relisted_topic = vec![
        &t.env,
        symbol_short!("relisted").into_val(&t.env),
        project_id.into_val(&t.env),
    ];
    let unlocked_topic = vec![
        &t.env,
        symbol_short!("unlocked").into_val(&t.env),
        charity_id.into_val(&t.env),
    ];
    let all_events = t.env.events().all();
    assert!(!all_events
        .iter()
        .any(|event| event.1 == relisted_topic || event.1 == unlocked_topic));
}
