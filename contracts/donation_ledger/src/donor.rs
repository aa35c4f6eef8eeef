//! Donor directory: the set of addresses permitted to donate.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::events;
use crate::rbac::{self, Action};
use crate::storage;
use crate::types::DonorRecord;
use crate::Error;

/// Mark `donor` as valid. Re-registering a deregistered donor revalidates it
/// and keeps its original registration time.
pub fn register_donor(env: &Env, admin: &Address, donor: &Address) -> DonorRecord {
    rbac::authorize(env, admin, Action::RegisterDonor, None);

    let record = match storage::find_donor(env, donor) {
        Some(existing) => DonorRecord {
            valid: true,
            ..existing
        },
        None => DonorRecord {
            address: donor.clone(),
            valid: true,
            registered_at: env.ledger().timestamp(),
        },
    };
    storage::save_donor(env, &record);
    events::emit_donor_registered(env, donor.clone(), admin.clone());
    record
}

/// Revoke `donor`'s permission to donate. Past donations are untouched.
pub fn deregister_donor(env: &Env, admin: &Address, donor: &Address) {
    rbac::authorize(env, admin, Action::DeregisterDonor, None);

    let mut record = storage::find_donor(env, donor)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotFound));
    if !record.valid {
        return;
    }
    record.valid = false;
    storage::save_donor(env, &record);
    events::emit_donor_deregistered(env, donor.clone(), admin.clone());
}

pub fn is_valid_donor(env: &Env, donor: &Address) -> bool {
    storage::find_donor(env, donor)
        .map(|record| record.valid)
        .unwrap_or(false)
}
