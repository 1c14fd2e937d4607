use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::BatchReport;

pub fn wallet_created(env: &Env, identity: &BytesN<32>, beneficiary: &Address) {
    env.events()
        .publish((symbol_short!("created"), identity.clone()), beneficiary.clone());
}

/// Carries the handle of what the ledger actually moved, never a cleartext.
pub fn wallet_funded(env: &Env, identity: &BytesN<32>, funder: &Address, moved: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("funded"), identity.clone()),
        (funder.clone(), moved.clone()),
    );
}

pub fn released(env: &Env, identity: &BytesN<32>, beneficiary: &Address, moved: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("released"), identity.clone()),
        (beneficiary.clone(), moved.clone()),
    );
}

pub fn batch_processed(env: &Env, report: &BatchReport) {
    env.events()
        .publish((symbol_short!("batch"),), report.clone());
}

pub fn admin_proposed(env: &Env, current: &Address, proposed: &Address) {
    env.events()
        .publish((symbol_short!("adm_prop"), current.clone()), proposed.clone());
}

pub fn admin_accepted(env: &Env, previous: &Address, accepted: &Address) {
    env.events()
        .publish((symbol_short!("adm_acc"), previous.clone()), accepted.clone());
}
