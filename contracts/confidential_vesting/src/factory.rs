use confidential_interface::Confidential;
use soroban_sdk::{BytesN, Env};

use crate::{events, schedule::ScheduleParams, storage, wallet::VestingWallet, VestingError};

/// Registers a new wallet at the identity derived from `params`.
pub fn create(
    env: &Env,
    c: &Confidential,
    params: ScheduleParams,
) -> Result<BytesN<32>, VestingError> {
    params.validate(env)?;

    let identity = params.identity(env);
    if storage::has_wallet(env, &identity) {
        return Err(VestingError::AlreadyExists);
    }

    let wallet = VestingWallet::new(env, c, params);
    storage::write_wallet(env, &wallet);
    storage::bump_wallet_count(env);

    events::wallet_created(env, &identity, wallet.beneficiary());
    Ok(identity)
}
