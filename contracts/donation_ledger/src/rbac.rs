//! # Role-Based Access Control
//!
//! Every address holds at most one [`Role`]. Charity ownership and donor
//! validity are not roles: they come from the charity profile and the donor
//! registry respectively, and are checked through the same policy table.
//!
//! ## Policy table
//!
//! | Action                                                   | Requirement     |
//! |----------------------------------------------------------|-----------------|
//! | `RegisterCharity`, `RegisterDonor`, `DeregisterDonor`    | `AdminOrAbove`  |
//! | `LockWallet`, `UnlockWallet`, `SetLockPolicy`, `ManageRoles` | `AdminOrAbove` |
//! | `SubmitProof`                                            | `Verifier`      |
//! | `ListProject`, `UnlistProject`, `RelistProject`, `Withdraw` | `CharityOwner` |
//! | `Donate`                                                 | `ValidDonor`    |
//!
//! `SuperAdmin` and `Admin` satisfy `Verifier` as well.

use soroban_sdk::{contracttype, panic_with_error, symbol_short, Address, Env};

use crate::{donor, storage, Error};

/// Roles recognised by the ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Single root of trust; grants and transfers roles.
    SuperAdmin,
    /// Registers charities and donors, locks wallets, tunes the lock policy.
    Admin,
    /// Attests spend by submitting proofs.
    Verifier,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    SuperAdmin,
    Role(Address),
}

/// Mutating operations subject to the policy table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    ManageRoles,
    RegisterCharity,
    RegisterDonor,
    DeregisterDonor,
    LockWallet,
    UnlockWallet,
    SetLockPolicy,
    SubmitProof,
    ListProject,
    UnlistProject,
    RelistProject,
    Withdraw,
    Donate,
}

/// Predicate an action's caller must satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    AdminOrAbove,
    Verifier,
    CharityOwner,
    ValidDonor,
}

pub const fn requirement(action: Action) -> Requirement {
    match action {
        Action::ManageRoles
        | Action::RegisterCharity
        | Action::RegisterDonor
        | Action::DeregisterDonor
        | Action::LockWallet
        | Action::UnlockWallet
        | Action::SetLockPolicy => Requirement::AdminOrAbove,
        Action::SubmitProof => Requirement::Verifier,
        Action::ListProject | Action::UnlistProject | Action::RelistProject | Action::Withdraw => {
            Requirement::CharityOwner
        }
        Action::Donate => Requirement::ValidDonor,
    }
}

/// Authenticate `caller` and enforce the policy for `action`.
///
/// `owner` is the owning charity's address and must be supplied for
/// `CharityOwner` actions.
pub fn authorize(env: &Env, caller: &Address, action: Action, owner: Option<&Address>) {
    caller.require_auth();
    match requirement(action) {
        Requirement::AdminOrAbove => require_admin_or_above(env, caller),
        Requirement::Verifier => require_verifier(env, caller),
        Requirement::CharityOwner => match owner {
            Some(owner) if owner == caller => {}
            _ => panic_with_error!(env, Error::NotAuthorized),
        },
        Requirement::ValidDonor => {
            if !donor::is_valid_donor(env, caller) {
                panic_with_error!(env, Error::DonorInvalid);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────
// Role storage
// ─────────────────────────────────────────────────────────

/// Record the first SuperAdmin. Panics with `AlreadyInitialized` on a second call.
pub fn init_super_admin(env: &Env, super_admin: &Address) {
    if env.storage().instance().has(&RbacKey::SuperAdmin) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage().instance().set(&RbacKey::SuperAdmin, super_admin);
    storage::bump_instance(env);
    set_role(env, super_admin, Role::SuperAdmin);
}

pub fn role_of(env: &Env, address: Address) -> Option<Role> {
    let key = RbacKey::Role(address);
    let role = env.storage().persistent().get(&key);
    if role.is_some() {
        storage::bump_persistent(env, &key);
    }
    role
}

pub fn has_role(env: &Env, address: Address, role: Role) -> bool {
    role_of(env, address) == Some(role)
}

fn set_role(env: &Env, target: &Address, role: Role) {
    let key = RbacKey::Role(target.clone());
    env.storage().persistent().set(&key, &role);
    storage::bump_persistent(env, &key);
}

/// Grant `role` to `target`, replacing any role it held.
///
/// Only a SuperAdmin may grant `SuperAdmin`; use [`transfer_super_admin`] to
/// move the root role instead.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) {
    authorize(env, caller, Action::ManageRoles, None);
    if role == Role::SuperAdmin {
        panic_with_error!(env, Error::NotAuthorized);
    }
    if has_role(env, target.clone(), Role::SuperAdmin) {
        panic_with_error!(env, Error::NotAuthorized);
    }
    set_role(env, target, role);
    env.events()
        .publish((symbol_short!("role_set"), target.clone(), role), caller.clone());
}

/// Remove whatever role `target` holds. The SuperAdmin cannot be revoked.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) {
    authorize(env, caller, Action::ManageRoles, None);
    let key = RbacKey::Role(target.clone());
    match env.storage().persistent().get::<_, Role>(&key) {
        None => panic_with_error!(env, Error::RoleNotFound),
        Some(Role::SuperAdmin) => panic_with_error!(env, Error::NotAuthorized),
        Some(_) => {}
    }
    env.storage().persistent().remove(&key);
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), caller.clone());
}

/// Move the SuperAdmin role from `current` to `new_super_admin`.
pub fn transfer_super_admin(env: &Env, current: &Address, new_super_admin: &Address) {
    current.require_auth();
    if !has_role(env, current.clone(), Role::SuperAdmin) {
        panic_with_error!(env, Error::NotAuthorized);
    }
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(current.clone()));
    env.storage()
        .instance()
        .set(&RbacKey::SuperAdmin, new_super_admin);
    storage::bump_instance(env);
    set_role(env, new_super_admin, Role::SuperAdmin);
    env.events().publish(
        (symbol_short!("role_set"), new_super_admin.clone(), Role::SuperAdmin),
        current.clone(),
    );
}

// ─────────────────────────────────────────────────────────
// Guards
// ─────────────────────────────────────────────────────────

pub fn require_admin_or_above(env: &Env, caller: &Address) {
    match role_of(env, caller.clone()) {
        Some(Role::SuperAdmin) | Some(Role::Admin) => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}

pub fn require_verifier(env: &Env, caller: &Address) {
    match role_of(env, caller.clone()) {
        Some(Role::Verifier) | Some(Role::Admin) | Some(Role::SuperAdmin) => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}
