#![allow(dead_code)]

use confidential_interface::{EncryptedInput, AMOUNT_BITS};
use confidential_token::{ConfidentialToken, ConfidentialTokenClient as LedgerClient};
use confidential_vesting::{
    ConfidentialVesting, ConfidentialVestingClient, ScheduleParams, VestingCurve,
};
use mock_engine::{MockEngine, MockEngineClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, BytesN, Env, String, Vec,
};

pub const GENESIS: u64 = 1_000;

pub struct Setup {
    pub env: Env,
    pub engine: MockEngineClient<'static>,
    pub ledger: LedgerClient<'static>,
    pub vesting: ConfidentialVestingClient<'static>,
    pub admin: Address,
}

pub fn setup() -> Setup {
    setup_with(VestingCurve::Linear)
}

pub fn setup_with(curve: VestingCurve) -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    #[allow(deprecated)]
    env.budget().reset_unlimited();
    env.ledger().with_mut(|l| l.timestamp = GENESIS);

    let engine_id = env.register(MockEngine, ());
    let ledger_id = env.register(ConfidentialToken, ());
    let vesting_id = env.register(ConfidentialVesting, ());

    let admin = Address::generate(&env);
    let ledger = LedgerClient::new(&env, &ledger_id);
    ledger.initialize(
        &admin,
        &engine_id,
        &String::from_str(&env, "Vested"),
        &String::from_str(&env, "VST"),
    );
    let vesting = ConfidentialVestingClient::new(&env, &vesting_id);
    vesting.initialize(&admin, &engine_id, &ledger_id, &curve);
    ledger.set_operator(&admin, &vesting_id, &u64::MAX);

    Setup {
        engine: MockEngineClient::new(&env, &engine_id),
        env,
        ledger,
        vesting,
        admin,
    }
}

impl Setup {
    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().with_mut(|l| l.timestamp = timestamp);
    }

    pub fn mint(&self, to: &Address, value: u128) {
        let input = self.engine.encrypt_inputs(
            &self.ledger.address,
            &self.admin,
            &vec![&self.env, value],
            &AMOUNT_BITS,
        );
        self.ledger
            .mint(to, &input.handles.get(0).unwrap(), &input.proof);
    }

    /// One client-side encryption session for `user` calling the vesting
    /// contract.
    pub fn encrypt(&self, user: &Address, values: &[u128]) -> EncryptedInput {
        let mut cleartexts = Vec::new(&self.env);
        for value in values {
            cleartexts.push_back(*value);
        }
        self.engine
            .encrypt_inputs(&self.vesting.address, user, &cleartexts, &AMOUNT_BITS)
    }

    pub fn schedule(
        &self,
        beneficiary: &Address,
        start: u64,
        duration: u64,
        cliff: u64,
    ) -> ScheduleParams {
        ScheduleParams {
            beneficiary: beneficiary.clone(),
            start,
            duration,
            cliff,
        }
    }

    /// Creates and funds one wallet through the batch path.
    pub fn create_funded(&self, params: &ScheduleParams, value: u128) -> BytesN<32> {
        self.mint(&self.admin, value);
        let input = self.encrypt(&self.admin, &[value]);
        self.vesting.batch_create_and_fund(
            &vec![&self.env, params.clone()],
            &input.handles,
            &input.proof,
        );
        params.identity(&self.env)
    }

    pub fn decrypt(&self, who: &Address, handle: &BytesN<32>) -> Option<u128> {
        self.engine.decrypt(who, handle)
    }

    pub fn balance(&self, who: &Address) -> Option<u128> {
        let handle = self.ledger.balance_of(who)?;
        self.engine.decrypt(who, &handle)
    }

    pub fn allocated(&self, identity: &BytesN<32>) -> Option<u128> {
        let wallet = self.vesting.wallet(identity);
        self.engine
            .decrypt(&wallet.params.beneficiary, &wallet.total_allocated)
    }

    pub fn released(&self, identity: &BytesN<32>) -> Option<u128> {
        let wallet = self.vesting.wallet(identity);
        self.engine
            .decrypt(&wallet.params.beneficiary, &wallet.total_released)
    }

    pub fn vested_at(&self, identity: &BytesN<32>, at: u64) -> Option<u128> {
        let wallet = self.vesting.wallet(identity);
        let handle = self.vesting.vested_amount(identity, &at);
        self.engine.decrypt(&wallet.params.beneficiary, &handle)
    }
}
