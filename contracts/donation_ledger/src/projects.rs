//! Project listings and the read-only ledger queries.

use soroban_sdk::{panic_with_error, Address, Env, String, Vec};

use crate::events;
use crate::rbac::{self, Action};
use crate::storage;
use crate::types::{Donation, Project, ProjectConfig, ProjectState, Proof};
use crate::Error;

/// Create an active project under `charity_id`. Only the charity owner may list.
pub fn list_project(
    env: &Env,
    owner: &Address,
    charity_id: u64,
    title: String,
    description: String,
    target_amount: i128,
) -> Project {
    let profile = storage::load_charity_profile(env, charity_id);
    rbac::authorize(env, owner, Action::ListProject, Some(&profile.owner));

    if target_amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let id = storage::next_project_id(env);
    let config = ProjectConfig {
        id,
        charity_id,
        title,
        description,
        target_amount,
        created_at: env.ledger().timestamp(),
    };
    let state = ProjectState {
        active: true,
        raised: 0,
        verified: 0,
    };

    storage::save_project(env, &config, &state);
    storage::add_charity_project(env, charity_id, id);

    events::emit_project_listed(env, id, charity_id, target_amount);
    Project::from_parts(config, state)
}

pub fn unlist_project(env: &Env, owner: &Address, project_id: u64) {
    set_active(env, owner, project_id, false, Action::UnlistProject);
}

pub fn relist_project(env: &Env, owner: &Address, project_id: u64) {
    set_active(env, owner, project_id, true, Action::RelistProject);
}

/// Toggle listing status. Setting the current value again is a no-op.
fn set_active(env: &Env, owner: &Address, project_id: u64, active: bool, action: Action) {
    let config = storage::load_project_config(env, project_id);
    let profile = storage::load_charity_profile(env, config.charity_id);
    rbac::authorize(env, owner, action, Some(&profile.owner));

    let mut state = storage::load_project_state(env, project_id);
    if state.active == active {
        return;
    }
    state.active = active;
    storage::save_project_state(env, project_id, &state);
    events::emit_project_status_changed(env, project_id, config.charity_id, active);
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

pub fn load_project(env: &Env, id: u64) -> Project {
    let config = storage::load_project_config(env, id);
    let state = storage::load_project_state(env, id);
    Project::from_parts(config, state)
}

pub fn is_active(env: &Env, id: u64) -> bool {
    storage::load_project_state(env, id).active
}

/// Active projects across all charities, in listing order.
pub fn active_projects(env: &Env) -> Vec<Project> {
    let mut projects = Vec::new(env);
    for id in 0..storage::project_count(env) {
        let project = load_project(env, id);
        if project.active {
            projects.push_back(project);
        }
    }
    projects
}

pub fn projects_by_charity(env: &Env, charity_id: u64) -> Vec<Project> {
    // Surface NotFound for unknown charities rather than an empty list.
    storage::load_charity_profile(env, charity_id);
    let mut projects = Vec::new(env);
    for id in storage::charity_projects(env, charity_id).iter() {
        projects.push_back(load_project(env, id));
    }
    projects
}

pub fn donations_by_project(env: &Env, project_id: u64) -> Vec<Donation> {
    storage::load_project_config(env, project_id);
    load_donations(env, storage::project_donations(env, project_id))
}

pub fn donations_by_donor(env: &Env, donor: &Address) -> Vec<Donation> {
    load_donations(env, storage::donor_donations(env, donor))
}

pub fn proofs_by_project(env: &Env, project_id: u64) -> Vec<Proof> {
    storage::load_project_config(env, project_id);
    let mut proofs = Vec::new(env);
    for id in storage::project_proofs(env, project_id).iter() {
        proofs.push_back(storage::load_proof(env, id));
    }
    proofs
}

fn load_donations(env: &Env, ids: Vec<u64>) -> Vec<Donation> {
    let mut donations = Vec::new(env);
    for id in ids.iter() {
        donations.push_back(storage::load_donation(env, id));
    }
    donations
}
