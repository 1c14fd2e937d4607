//! Funding: the per-wallet transfer path and the batch orchestrator on top
//! of it.
//!
//! Creation is tolerant per item (an existing wallet is skipped). Funding
//! is all-or-nothing: the shared proof is checked once, before any
//! transfer is issued.

use confidential_interface::{Confidential, ConfidentialTokenClient, AMOUNT_BITS};
use soroban_sdk::{contracttype, log, Address, Bytes, BytesN, Env, Vec};

use crate::{
    events, factory, schedule::ScheduleParams, storage, storage::Config, VestingError,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchReport {
    pub created: u32,
    pub skipped_create: u32,
    pub funded: u32,
}

/// Rejects inputs the ledger could not combine with a balance.
pub fn require_amount_widths(
    c: &Confidential,
    inputs: &Vec<BytesN<32>>,
) -> Result<(), VestingError> {
    for input in inputs.iter() {
        if c.bit_width(&input) != AMOUNT_BITS {
            return Err(VestingError::InvalidWidth);
        }
    }
    Ok(())
}

/// Pulls `amount` from `funder` into this contract's ledger account and
/// credits the wallet with what the ledger actually moved. `amount` must
/// already be allowed to this contract.
pub fn fund_identity(
    env: &Env,
    c: &Confidential,
    config: &Config,
    funder: &Address,
    identity: &BytesN<32>,
    amount: &BytesN<32>,
) -> Result<BytesN<32>, VestingError> {
    let mut wallet = storage::read_wallet(env, identity)?;

    let token = ConfidentialTokenClient::new(env, &config.token);
    if !token.is_operator(funder, c.holder()) {
        return Err(VestingError::NotOperator);
    }

    c.grant(amount, &[&config.token]);
    let moved = token.confidential_transfer_from(c.holder(), funder, c.holder(), amount);

    wallet.record_funding(c, &moved);
    storage::write_wallet(env, &wallet);

    events::wallet_funded(env, identity, funder, &moved);
    Ok(moved)
}

pub fn create_and_fund(
    env: &Env,
    config: &Config,
    schedules: Vec<ScheduleParams>,
    inputs: Vec<BytesN<32>>,
    proof: Bytes,
) -> Result<BatchReport, VestingError> {
    if schedules.len() != inputs.len() {
        return Err(VestingError::LengthMismatch);
    }

    let c = Confidential::new(env, &config.engine);
    let mut report = BatchReport {
        created: 0,
        skipped_create: 0,
        funded: 0,
    };

    let mut identities = Vec::new(env);
    for params in schedules.iter() {
        let identity = params.identity(env);
        match factory::create(env, &c, params) {
            Ok(_) => report.created += 1,
            Err(VestingError::AlreadyExists) => {
                log!(env, "wallet exists, skipping creation", identity.clone());
                report.skipped_create += 1;
            }
            Err(e) => return Err(e),
        }
        identities.push_back(identity);
    }

    require_amount_widths(&c, &inputs)?;
    if !c.verify_inputs(&config.admin, &inputs, &proof) {
        return Err(VestingError::InvalidProof);
    }

    for (identity, amount) in identities.iter().zip(inputs.iter()) {
        fund_identity(env, &c, config, &config.admin, &identity, &amount)?;
        report.funded += 1;
    }

    events::batch_processed(env, &report);
    Ok(report)
}
