#![no_std]
//! Confidential vesting: encrypted allocations released to beneficiaries
//! along a public schedule.
//!
//! Wallets are records keyed by a deterministic identity (a hash of their
//! schedule). This contract holds every wallet's funds in its own ledger
//! account and tracks each wallet's share with encrypted counters.

mod batch;
mod errors;
mod events;
mod factory;
mod schedule;
mod storage;
mod wallet;

pub use batch::BatchReport;
pub use errors::VestingError;
pub use schedule::{ScheduleParams, MAX_DURATION};
pub use storage::Config;
pub use wallet::{VestingCurve, VestingState, VestingWallet};

use confidential_interface::{Confidential, ConfidentialTokenClient};
use soroban_sdk::{contract, contractimpl, vec, Address, Bytes, BytesN, Env, Vec};

#[contract]
pub struct ConfidentialVesting;

#[contractimpl]
impl ConfidentialVesting {
    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    pub fn initialize(
        env: Env,
        admin: Address,
        engine: Address,
        token: Address,
        curve: VestingCurve,
    ) -> Result<(), VestingError> {
        if storage::has_config(&env) {
            return Err(VestingError::AlreadyInitialized);
        }
        admin.require_auth();

        storage::write_config(
            &env,
            &Config {
                admin,
                engine,
                token,
                curve,
            },
        );
        Ok(())
    }

    pub fn config(env: Env) -> Result<Config, VestingError> {
        storage::read_config(&env)
    }

    /// First step of an admin handover.
    pub fn propose_admin(env: Env, new_admin: Address) -> Result<(), VestingError> {
        let config = storage::read_config(&env)?;
        config.admin.require_auth();

        storage::write_pending_admin(&env, &new_admin);
        events::admin_proposed(&env, &config.admin, &new_admin);
        Ok(())
    }

    /// Second step: the proposed admin takes over.
    pub fn accept_admin(env: Env) -> Result<(), VestingError> {
        let mut config = storage::read_config(&env)?;
        let pending = storage::read_pending_admin(&env).ok_or(VestingError::NoPendingAdmin)?;
        pending.require_auth();

        let previous = config.admin.clone();
        config.admin = pending.clone();
        storage::write_config(&env, &config);
        storage::clear_pending_admin(&env);

        events::admin_accepted(&env, &previous, &pending);
        Ok(())
    }

    pub fn pending_admin(env: Env) -> Option<Address> {
        storage::read_pending_admin(&env)
    }

    // -----------------------------------------------------------------------
    // Factory
    // -----------------------------------------------------------------------

    /// Identity a wallet with these parameters has (or would have). Reads
    /// no contract state.
    pub fn predict_wallet_identity(
        env: Env,
        beneficiary: Address,
        start: u64,
        duration: u64,
        cliff: u64,
    ) -> BytesN<32> {
        ScheduleParams {
            beneficiary,
            start,
            duration,
            cliff,
        }
        .identity(&env)
    }

    pub fn create_wallet(
        env: Env,
        beneficiary: Address,
        start: u64,
        duration: u64,
        cliff: u64,
    ) -> Result<BytesN<32>, VestingError> {
        let config = storage::read_config(&env)?;
        let c = Confidential::new(&env, &config.engine);
        factory::create(
            &env,
            &c,
            ScheduleParams {
                beneficiary,
                start,
                duration,
                cliff,
            },
        )
    }

    pub fn wallet_count(env: Env) -> u64 {
        storage::read_wallet_count(&env)
    }

    // -----------------------------------------------------------------------
    // Funding
    // -----------------------------------------------------------------------

    /// Creates any missing wallets, then funds each schedule with the
    /// matching encrypted input. All inputs share `proof`, produced for the
    /// admin calling this contract. The admin must have made this contract
    /// its ledger operator.
    pub fn batch_create_and_fund(
        env: Env,
        schedules: Vec<ScheduleParams>,
        inputs: Vec<BytesN<32>>,
        proof: Bytes,
    ) -> Result<BatchReport, VestingError> {
        let config = storage::read_config(&env)?;
        config.admin.require_auth();

        batch::create_and_fund(&env, &config, schedules, inputs, proof)
    }

    /// Tops up one wallet from `funder`'s ledger balance.
    pub fn fund_wallet(
        env: Env,
        funder: Address,
        identity: BytesN<32>,
        input: BytesN<32>,
        proof: Bytes,
    ) -> Result<BytesN<32>, VestingError> {
        funder.require_auth();
        let config = storage::read_config(&env)?;
        let c = Confidential::new(&env, &config.engine);

        let inputs = vec![&env, input.clone()];
        batch::require_amount_widths(&c, &inputs)?;
        if !c.verify_inputs(&funder, &inputs, &proof) {
            return Err(VestingError::InvalidProof);
        }
        batch::fund_identity(&env, &c, &config, &funder, &identity, &input)
    }

    // -----------------------------------------------------------------------
    // Release
    // -----------------------------------------------------------------------

    /// Sends everything vested and not yet released to the beneficiary.
    /// Returns the handle of what the ledger moved, readable by the
    /// beneficiary.
    pub fn release(
        env: Env,
        caller: Address,
        identity: BytesN<32>,
    ) -> Result<BytesN<32>, VestingError> {
        caller.require_auth();
        let config = storage::read_config(&env)?;
        let mut wallet = storage::read_wallet(&env, &identity)?;
        if caller != *wallet.beneficiary() {
            return Err(VestingError::NotBeneficiary);
        }

        let now = env.ledger().timestamp();
        if wallet.state(now) == VestingState::Locked {
            return Err(VestingError::CliffNotPassed);
        }
        if !storage::acquire_release_lock(&env, &identity) {
            return Err(VestingError::ReentrancyDetected);
        }

        let c = Confidential::new(&env, &config.engine);
        let releasable = wallet.releasable(&c, config.curve, now);
        c.grant(&releasable, &[&config.token]);

        let token = ConfidentialTokenClient::new(&env, &config.token);
        let moved = token.confidential_transfer(c.holder(), wallet.beneficiary(), &releasable);

        wallet.record_release(&c, &moved);
        storage::write_wallet(&env, &wallet);
        storage::release_release_lock(&env, &identity);

        events::released(&env, &identity, wallet.beneficiary(), &moved);
        Ok(moved)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn wallet(env: Env, identity: BytesN<32>) -> Result<VestingWallet, VestingError> {
        storage::read_wallet(&env, &identity)
    }

    pub fn vesting_state(env: Env, identity: BytesN<32>) -> Result<VestingState, VestingError> {
        let wallet = storage::read_wallet(&env, &identity)?;
        Ok(wallet.state(env.ledger().timestamp()))
    }

    /// Encrypted amount vested at `at`, readable by the beneficiary.
    ///
    /// Each call leaves fresh ciphertexts and grants in engine storage. Read
    /// it through simulation rather than a submitted transaction.
    pub fn vested_amount(
        env: Env,
        identity: BytesN<32>,
        at: u64,
    ) -> Result<BytesN<32>, VestingError> {
        let config = storage::read_config(&env)?;
        let wallet = storage::read_wallet(&env, &identity)?;
        let c = Confidential::new(&env, &config.engine);
        Ok(wallet.vested(&c, config.curve, at))
    }

    /// Encrypted amount a release would send right now. Like
    /// `vested_amount`, meant for simulation.
    pub fn releasable_amount(env: Env, identity: BytesN<32>) -> Result<BytesN<32>, VestingError> {
        let config = storage::read_config(&env)?;
        let wallet = storage::read_wallet(&env, &identity)?;
        let c = Confidential::new(&env, &config.engine);
        Ok(wallet.releasable(&c, config.curve, env.ledger().timestamp()))
    }
}
