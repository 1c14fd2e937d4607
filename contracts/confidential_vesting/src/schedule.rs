use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::VestingError;

/// Longest schedule accepted: ten years. Also keeps `total * duration²`
/// inside the 128-bit working width.
pub const MAX_DURATION: u64 = 315_360_000;

const IDENTITY_DOMAIN: &[u8] = b"confidential-vesting:wallet:v1";

/// Public timing metadata of a wallet. Immutable once the wallet exists.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleParams {
    pub beneficiary: Address,
    pub start: u64,
    pub duration: u64,
    pub cliff: u64,
}

impl ScheduleParams {
    pub fn validate(&self, env: &Env) -> Result<(), VestingError> {
        if self.start == 0
            || self.duration == 0
            || self.duration > MAX_DURATION
            || self.cliff > self.duration
            || self.start.checked_add(self.duration).is_none()
            || self.beneficiary == env.current_contract_address()
        {
            return Err(VestingError::InvalidParams);
        }
        Ok(())
    }

    /// Timestamp from which releases are accepted.
    pub fn cliff_end(&self) -> u64 {
        self.start.saturating_add(self.cliff)
    }

    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    /// Public seconds elapsed at `now`, clamped to `[0, duration]`.
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start).min(self.duration)
    }

    /// Wallet identity: a hash of the parameters alone, so anyone can
    /// derive it without touching contract state.
    pub fn identity(&self, env: &Env) -> BytesN<32> {
        let mut preimage = Bytes::from_slice(env, IDENTITY_DOMAIN);
        preimage.append(&self.clone().to_xdr(env));
        env.crypto().sha256(&preimage).to_bytes()
    }
}
