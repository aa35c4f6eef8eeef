#![allow(dead_code)]

extern crate std;

use soroban_sdk::Vec;

use crate::types::{Charity, Donation, UnverifiedExposure};

/// INV-1: A donation's verified amount stays within `[0, amount]`.
pub fn assert_verified_within_bounds(donation: &Donation) {
    assert!(
        donation.verified_amount >= 0 && donation.verified_amount <= donation.amount,
        "INV-1 violated: donation {} has verified {} of {}",
        donation.id,
        donation.verified_amount,
        donation.amount
    );
}

/// INV-2: Verification latency is recorded iff the donation is fully verified.
pub fn assert_latency_matches_status(donation: &Donation) {
    assert_eq!(
        donation.time_taken_to_verify > 0,
        donation.is_fully_verified(),
        "INV-2 violated: donation {} has latency {} with verified {} of {}",
        donation.id,
        donation.time_taken_to_verify,
        donation.verified_amount,
        donation.amount
    );
}

/// INV-3: Verified amounts never decrease between two snapshots of the same donation.
pub fn assert_verified_monotonic(before: &Donation, after: &Donation) {
    assert_eq!(before.id, after.id);
    assert!(
        after.verified_amount >= before.verified_amount,
        "INV-3 violated: donation {} verified amount went from {} to {}",
        before.id,
        before.verified_amount,
        after.verified_amount
    );
}

/// INV-4: Donation records are immutable apart from verification fields.
pub fn assert_donation_immutable_fields(before: &Donation, after: &Donation) {
    assert_eq!(before.id, after.id, "INV-4 violated: donation id changed");
    assert_eq!(
        before.project_id, after.project_id,
        "INV-4 violated: donation project changed"
    );
    assert_eq!(before.donor, after.donor, "INV-4 violated: donor changed");
    assert_eq!(before.amount, after.amount, "INV-4 violated: amount changed");
    assert_eq!(
        before.timestamp, after.timestamp,
        "INV-4 violated: timestamp changed"
    );
}

/// INV-5: Every donation is counted exactly once, as verified or unverified.
pub fn assert_counters_cover_donations(charity: &Charity, donations: &[Donation]) {
    let verified = donations.iter().filter(|d| d.is_fully_verified()).count() as u32;
    assert_eq!(
        charity.verified_count, verified,
        "INV-5 violated: charity {} counts {} verified, ledger has {}",
        charity.id, charity.verified_count, verified
    );
    assert_eq!(
        charity.verified_count + charity.unverified_count,
        donations.len() as u32,
        "INV-5 violated: charity {} counters do not sum to {} donations",
        charity.id,
        donations.len()
    );
}

/// INV-6: Exposure equals the sum of outstanding amounts.
pub fn assert_exposure_matches(exposure: &UnverifiedExposure, donations: &[Donation]) {
    let outstanding: i128 = donations.iter().map(|d| d.outstanding()).sum();
    assert_eq!(
        exposure.running_total, outstanding,
        "INV-6 violated: charity {} exposure {} != outstanding {}",
        exposure.charity_id, exposure.running_total, outstanding
    );
}

/// INV-7: Fully verified donations form a prefix of a project's donations.
pub fn assert_fifo_prefix(donations: &Vec<Donation>) {
    let mut seen_outstanding = false;
    for donation in donations.iter() {
        if seen_outstanding {
            assert_eq!(
                donation.verified_amount, 0,
                "INV-7 violated: donation {} verified after an outstanding one",
                donation.id
            );
        }
        if !donation.is_fully_verified() {
            seen_outstanding = true;
        }
    }
}

/// Run all per-donation invariants.
pub fn assert_all_donation_invariants(donation: &Donation) {
    assert_verified_within_bounds(donation);
    assert_latency_matches_status(donation);
}
