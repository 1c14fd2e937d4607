//! Wallet record and the vesting curve over ciphertext.
//!
//! Only `total_allocated` and `total_released` are encrypted. Time is
//! public, so the curve is evaluated as scalar operations on one
//! ciphertext. The cliff is applied with an encrypted select, so the same
//! sequence of engine calls runs whether or not the cliff has passed.

use confidential_interface::{Confidential, AMOUNT_BITS, WIDE_BITS};
use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::schedule::ScheduleParams;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingCurve {
    Linear,
    Quadratic,
}

/// Derived from the clock; never stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingState {
    Locked,
    Vesting,
    FullyVested,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingWallet {
    pub identity: BytesN<32>,
    pub params: ScheduleParams,
    pub total_allocated: BytesN<32>,
    pub total_released: BytesN<32>,
    pub created_at: u64,
}

impl VestingWallet {
    /// Fresh wallet with both counters at an encrypted zero readable by the
    /// beneficiary.
    pub fn new(env: &Env, c: &Confidential, params: ScheduleParams) -> Self {
        let beneficiary = params.beneficiary.clone();
        Self {
            identity: params.identity(env),
            total_allocated: c.trivial(0, AMOUNT_BITS, &[&beneficiary]),
            total_released: c.trivial(0, AMOUNT_BITS, &[&beneficiary]),
            created_at: env.ledger().timestamp(),
            params,
        }
    }

    pub fn beneficiary(&self) -> &Address {
        &self.params.beneficiary
    }

    pub fn state(&self, now: u64) -> VestingState {
        if now < self.params.cliff_end() {
            VestingState::Locked
        } else if now < self.params.end() {
            VestingState::Vesting
        } else {
            VestingState::FullyVested
        }
    }

    /// Encrypted amount vested at `at`.
    pub fn vested(&self, c: &Confidential, curve: VestingCurve, at: u64) -> BytesN<32> {
        let elapsed = self.params.elapsed(at) as u128;
        let duration = self.params.duration as u128;
        let (numerator, denominator) = match curve {
            VestingCurve::Linear => (elapsed, duration),
            VestingCurve::Quadratic => (elapsed * elapsed, duration * duration),
        };

        let wide = c.cast(&self.total_allocated, WIDE_BITS, &[]);
        let scaled = c.mul_scalar(&wide, numerator, &[]);
        let scaled = c.div_scalar(&scaled, denominator, &[]);
        let curve_value = c.cast(&scaled, AMOUNT_BITS, &[]);

        let now = c.trivial(at as u128, AMOUNT_BITS, &[]);
        let cliff_passed = c.ge_scalar(&now, self.params.cliff_end() as u128, &[]);
        let zero = c.trivial(0, AMOUNT_BITS, &[]);
        c.select(&cliff_passed, &curve_value, &zero, &[self.beneficiary()])
    }

    /// `vested - min(released, vested)`: never negative, computed without
    /// decrypting either side.
    pub fn releasable(&self, c: &Confidential, curve: VestingCurve, at: u64) -> BytesN<32> {
        let vested = self.vested(c, curve, at);
        let released = c.min(&self.total_released, &vested, &[]);
        c.sub(&vested, &released, &[self.beneficiary()])
    }

    pub fn record_funding(&mut self, c: &Confidential, moved: &BytesN<32>) {
        let total = c.add(&self.total_allocated, moved, &[self.beneficiary()]);
        self.total_allocated = total;
    }

    pub fn record_release(&mut self, c: &Confidential, moved: &BytesN<32>) {
        let total = c.add(&self.total_released, moved, &[self.beneficiary()]);
        self.total_released = total;
    }
}
