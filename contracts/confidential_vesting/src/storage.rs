use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::{wallet::VestingWallet, VestingCurve, VestingError};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_TTL_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
const WALLET_TTL_THRESHOLD: u32 = 60 * DAY_IN_LEDGERS;
const WALLET_TTL_EXTEND_TO: u32 = 180 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    PendingAdmin,
    WalletCount,
    Wallet(BytesN<32>),
    ReleaseLock(BytesN<32>),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub engine: Address,
    pub token: Address,
    pub curve: VestingCurve,
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<Config, VestingError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VestingError::NotInitialized)?;
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    Ok(config)
}

pub fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PendingAdmin)
}

pub fn write_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::PendingAdmin, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingAdmin);
}

pub fn read_wallet_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::WalletCount)
        .unwrap_or(0)
}

pub fn bump_wallet_count(env: &Env) -> u64 {
    let count = read_wallet_count(env) + 1;
    env.storage().instance().set(&DataKey::WalletCount, &count);
    count
}

pub fn has_wallet(env: &Env, identity: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Wallet(identity.clone()))
}

pub fn read_wallet(env: &Env, identity: &BytesN<32>) -> Result<VestingWallet, VestingError> {
    let key = DataKey::Wallet(identity.clone());
    let wallet = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(VestingError::WalletNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, WALLET_TTL_THRESHOLD, WALLET_TTL_EXTEND_TO);
    Ok(wallet)
}

pub fn write_wallet(env: &Env, wallet: &VestingWallet) {
    let key = DataKey::Wallet(wallet.identity.clone());
    env.storage().persistent().set(&key, wallet);
    env.storage()
        .persistent()
        .extend_ttl(&key, WALLET_TTL_THRESHOLD, WALLET_TTL_EXTEND_TO);
}

/// Takes the per-wallet release lock. Returns false if it is already held.
pub fn acquire_release_lock(env: &Env, identity: &BytesN<32>) -> bool {
    let key = DataKey::ReleaseLock(identity.clone());
    let temporary = env.storage().temporary();
    if temporary.has(&key) {
        return false;
    }
    temporary.set(&key, &true);
    true
}

pub fn release_release_lock(env: &Env, identity: &BytesN<32>) {
    env.storage()
        .temporary()
        .remove(&DataKey::ReleaseLock(identity.clone()));
}
