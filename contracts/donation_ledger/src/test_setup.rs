extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use crate::{CharityCategory, Donation, DonationLedger, DonationLedgerClient, Proof};

pub struct TestContext {
    pub env: Env,
    pub client: DonationLedgerClient<'static>,
    pub super_admin: Address,
    pub verifier: Address,
    pub token: token::Client<'static>,
    pub token_sac: token::StellarAssetClient<'static>,
}

/// Deployed and initialised ledger with a Verifier and a fresh credit token.
pub fn setup() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let super_admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());
    let token_sac = token::StellarAssetClient::new(&env, &sac.address());

    let contract_id = env.register(DonationLedger, ());
    let client = DonationLedgerClient::new(&env, &contract_id);
    client.init(&super_admin, &token.address);

    let verifier = Address::generate(&env);
    client.set_verifier(&super_admin, &verifier);

    TestContext {
        env,
        client,
        super_admin,
        verifier,
        token,
        token_sac,
    }
}

impl TestContext {
    pub fn text(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }

    /// Register a charity under a freshly generated owner.
    pub fn charity(&self) -> (u64, Address) {
        let owner = Address::generate(&self.env);
        let charity = self.client.register_charity(
            &self.super_admin,
            &owner,
            &self.text("Leonard Foundation"),
            &CharityCategory::Children,
        );
        (charity.id, owner)
    }

    pub fn project(&self, charity_id: u64, owner: &Address) -> u64 {
        self.client
            .list_project(
                owner,
                &charity_id,
                &self.text("Project 1"),
                &self.text("Give Leonard Some Food"),
                &100,
            )
            .id
    }

    /// Charity with a single active project: `(charity_id, owner, project_id)`.
    pub fn charity_with_project(&self) -> (u64, Address, u64) {
        let (charity_id, owner) = self.charity();
        let project_id = self.project(charity_id, &owner);
        (charity_id, owner, project_id)
    }

    /// Registered donor holding `credits`, with the ledger approved to pull all of them.
    pub fn donor(&self, credits: i128) -> Address {
        let donor = Address::generate(&self.env);
        self.client.register_donor(&self.super_admin, &donor);
        self.fund(&donor, credits);
        donor
    }

    /// Mint `credits` to `donor` and raise the ledger's allowance to match.
    pub fn fund(&self, donor: &Address, credits: i128) {
        self.token_sac.mint(donor, &credits);
        let allowance = self.token.allowance(donor, &self.client.address);
        self.token.approve(
            donor,
            &self.client.address,
            &(allowance + credits),
            &(self.env.ledger().sequence() + 10_000),
        );
    }

    pub fn donate(&self, donor: &Address, project_id: u64, amount: i128) -> Donation {
        self.client.donate(donor, &project_id, &amount)
    }

    pub fn prove(&self, project_id: u64, amount: i128) -> Proof {
        self.client
            .submit_proof(&self.verifier, &project_id, &amount, &self.text("Food"))
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }
}
