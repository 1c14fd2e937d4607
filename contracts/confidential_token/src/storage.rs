use soroban_sdk::{contracttype, Address, BytesN, Env, String};

use crate::TokenError;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_TTL_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Supply,
    Balance(Address),
    Operator(Address, Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfig {
    pub admin: Address,
    pub engine: Address,
    pub name: String,
    pub symbol: String,
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<TokenConfig, TokenError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(TokenError::NotInitialized)?;
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    Ok(config)
}

pub fn write_config(env: &Env, config: &TokenConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_supply(env: &Env) -> Option<BytesN<32>> {
    env.storage().instance().get(&DataKey::Supply)
}

pub fn write_supply(env: &Env, supply: &BytesN<32>) {
    env.storage().instance().set(&DataKey::Supply, supply);
}

pub fn read_balance(env: &Env, account: &Address) -> Option<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
}

pub fn write_balance(env: &Env, account: &Address, balance: &BytesN<32>) {
    let key = DataKey::Balance(account.clone());
    env.storage().persistent().set(&key, balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_TTL_EXTEND_TO);
}

/// Timestamp until which `operator` may move `holder`'s funds.
pub fn read_operator(env: &Env, holder: &Address, operator: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Operator(holder.clone(), operator.clone()))
}

pub fn write_operator(env: &Env, holder: &Address, operator: &Address, until: u64) {
    let key = DataKey::Operator(holder.clone(), operator.clone());
    env.storage().persistent().set(&key, &until);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_TTL_EXTEND_TO);
}
