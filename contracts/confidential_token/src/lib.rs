#![no_std]
//! Confidential ledger: encrypted balances keyed by principal.
//!
//! Transfers never revert on insufficient funds. They move
//! `min(amount, balance[from])`, computed by the engine, so a failing
//! transfer cannot reveal anything about a balance. After every balance
//! change the ledger re-grants the new handles to itself and to their owner.

mod error;
mod storage;

pub use error::TokenError;
pub use storage::TokenConfig;

use confidential_interface::{Confidential, AMOUNT_BITS};
use soroban_sdk::{
    contract, contractimpl, log, symbol_short, vec, Address, Bytes, BytesN, Env, String,
};

#[contract]
pub struct ConfidentialToken;

#[contractimpl]
impl ConfidentialToken {
    pub fn initialize(
        env: Env,
        admin: Address,
        engine: Address,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if storage::has_config(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        admin.require_auth();

        storage::write_config(
            &env,
            &TokenConfig {
                admin,
                engine,
                name,
                symbol,
            },
        );
        Ok(())
    }

    /// Mints an encrypted input submitted by the admin. Returns the handle
    /// of what was credited: the amount, or zero if the total supply would
    /// overflow.
    pub fn mint(
        env: Env,
        to: Address,
        amount: BytesN<32>,
        proof: Bytes,
    ) -> Result<BytesN<32>, TokenError> {
        let config = storage::read_config(&env)?;
        config.admin.require_auth();

        let c = Confidential::new(&env, &config.engine);
        if to == *c.holder() {
            return Err(TokenError::ZeroAddress);
        }
        if c.bit_width(&amount) != AMOUNT_BITS {
            return Err(TokenError::InvalidWidth);
        }
        if !c.verify_inputs(&config.admin, &vec![&env, amount.clone()], &proof) {
            return Err(TokenError::InvalidProof);
        }

        // Supply bounds every balance, so a mint that would wrap it mints zero.
        let supply = storage::read_supply(&env).unwrap_or_else(|| c.trivial(0, AMOUNT_BITS, &[]));
        let increased = c.add(&supply, &amount, &[]);
        let fits = c.ge(&increased, &supply, &[]);
        let zero = c.trivial(0, AMOUNT_BITS, &[]);
        let minted = c.select(&fits, &amount, &zero, &[&to, &config.admin]);

        let supply = c.add(&supply, &minted, &[&config.admin]);
        storage::write_supply(&env, &supply);

        let balance = balance_or_zero(&env, &c, &to);
        let balance = c.add(&balance, &minted, &[&to]);
        storage::write_balance(&env, &to, &balance);

        env.events().publish((symbol_short!("mint"), to), minted.clone());
        Ok(minted)
    }

    /// Moves up to `amount` from `from` to `to`. `from` must be allowed on
    /// `amount` and must have granted it to the ledger.
    pub fn confidential_transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: BytesN<32>,
    ) -> Result<BytesN<32>, TokenError> {
        from.require_auth();
        let config = storage::read_config(&env)?;
        let c = Confidential::new(&env, &config.engine);

        require_access(&c, &amount, &from)?;
        move_balance(&env, &c, &from, &to, &amount, None)
    }

    pub fn confidential_transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: BytesN<32>,
    ) -> Result<BytesN<32>, TokenError> {
        spender.require_auth();
        let config = storage::read_config(&env)?;
        if !Self::is_operator(env.clone(), from.clone(), spender.clone()) {
            return Err(TokenError::NotOperator);
        }
        let c = Confidential::new(&env, &config.engine);

        require_access(&c, &amount, &spender)?;
        move_balance(&env, &c, &from, &to, &amount, Some(&spender))
    }

    /// Transfer of a freshly encrypted amount submitted by `from`.
    pub fn transfer_encrypted(
        env: Env,
        from: Address,
        to: Address,
        amount: BytesN<32>,
        proof: Bytes,
    ) -> Result<BytesN<32>, TokenError> {
        from.require_auth();
        let config = storage::read_config(&env)?;
        let c = Confidential::new(&env, &config.engine);

        if !c.verify_inputs(&from, &vec![&env, amount.clone()], &proof) {
            return Err(TokenError::InvalidProof);
        }
        move_balance(&env, &c, &from, &to, &amount, None)
    }

    /// Lets `operator` move `holder`'s funds until the ledger timestamp
    /// `until` (inclusive). Passing a past timestamp revokes.
    pub fn set_operator(env: Env, holder: Address, operator: Address, until: u64) {
        holder.require_auth();
        storage::write_operator(&env, &holder, &operator, until);
        env.events()
            .publish((symbol_short!("operator"), holder, operator), until);
    }

    pub fn is_operator(env: Env, holder: Address, spender: Address) -> bool {
        if holder == spender {
            return true;
        }
        storage::read_operator(&env, &holder, &spender)
            .map(|until| until >= env.ledger().timestamp())
            .unwrap_or(false)
    }

    pub fn balance_of(env: Env, account: Address) -> Option<BytesN<32>> {
        storage::read_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> Option<BytesN<32>> {
        storage::read_supply(&env)
    }

    pub fn admin(env: Env) -> Result<Address, TokenError> {
        Ok(storage::read_config(&env)?.admin)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Ok(storage::read_config(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Ok(storage::read_config(&env)?.symbol)
    }
}

fn require_access(
    c: &Confidential,
    amount: &BytesN<32>,
    principal: &Address,
) -> Result<(), TokenError> {
    if !c.is_allowed(amount, principal) || !c.is_allowed(amount, c.holder()) {
        return Err(TokenError::HandleNotAllowed);
    }
    Ok(())
}

fn balance_or_zero(env: &Env, c: &Confidential, account: &Address) -> BytesN<32> {
    storage::read_balance(env, account).unwrap_or_else(|| c.trivial(0, AMOUNT_BITS, &[account]))
}

fn move_balance(
    env: &Env,
    c: &Confidential,
    from: &Address,
    to: &Address,
    amount: &BytesN<32>,
    spender: Option<&Address>,
) -> Result<BytesN<32>, TokenError> {
    if to == c.holder() {
        return Err(TokenError::ZeroAddress);
    }

    let from_balance = balance_or_zero(env, c, from);
    let moved = match spender {
        Some(spender) => c.min(amount, &from_balance, &[from, to, spender]),
        None => c.min(amount, &from_balance, &[from, to]),
    };

    if from != to {
        let to_balance = balance_or_zero(env, c, to);
        let from_balance = c.sub(&from_balance, &moved, &[from]);
        let to_balance = c.add(&to_balance, &moved, &[to]);
        storage::write_balance(env, from, &from_balance);
        storage::write_balance(env, to, &to_balance);
    } else {
        log!(env, "self transfer leaves balance untouched", from.clone());
    }

    env.events()
        .publish((symbol_short!("transfer"), from.clone(), to.clone()), moved.clone());
    Ok(moved)
}
