#![no_std]
//! Cleartext-backed stand-in for the confidential compute engine.
//!
//! Values are stored in the clear under opaque handles so tests and local
//! deployments can run the confidential contracts end to end. The access
//! rules are the real ones: operands must be allowed to the caller, results
//! start with an empty ACL, and decryption without a grant yields nothing.

use confidential_interface::{EncryptedInput, BOOL_BITS, WIDE_BITS};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, panic_with_error, xdr::ToXdr,
    Address, Bytes, BytesN, Env, Vec,
};

const HANDLE_DOMAIN: &[u8] = b"mock-engine:handle:v1";
const PROOF_DOMAIN: &[u8] = b"mock-engine:input-proof:v1";

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 60 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EngineError {
    UnknownHandle = 1,
    AccessDenied = 2,
    WidthMismatch = 3,
    DivisionByZero = 4,
    UnsupportedWidth = 5,
}

/// What a handle points at. Never exposed outside the engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ciphertext {
    pub value: u128,
    pub bits: u32,
    pub producer: Address,
}

/// The contract and user an encrypted input was produced for.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputBinding {
    pub contract: Address,
    pub user: Address,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Nonce,
    Ciphertext(BytesN<32>),
    Acl(BytesN<32>, Address),
    Input(BytesN<32>),
}

#[contract]
pub struct MockEngine;

#[contractimpl]
impl MockEngine {
    /// Client-side encryption of one session's values for `user` calling
    /// `contract`. All handles share one proof.
    pub fn encrypt_inputs(
        env: Env,
        contract: Address,
        user: Address,
        values: Vec<u128>,
        bits: u32,
    ) -> EncryptedInput {
        check_width(&env, bits);
        let engine = env.current_contract_address();
        let mut handles = Vec::new(&env);
        for value in values.iter() {
            let handle = store(&env, value, bits, &engine);
            let key = DataKey::Input(handle.clone());
            env.storage().persistent().set(
                &key,
                &InputBinding {
                    contract: contract.clone(),
                    user: user.clone(),
                },
            );
            extend(&env, &key);
            handles.push_back(handle);
        }
        let proof = input_proof(&env, &contract, &user, &handles);
        EncryptedInput { handles, proof }
    }

    pub fn verify_inputs(
        env: Env,
        caller: Address,
        user: Address,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
    ) -> bool {
        caller.require_auth();

        if input_proof(&env, &caller, &user, &handles) != proof {
            log!(&env, "input proof rejected", caller, user);
            return false;
        }
        for handle in handles.iter() {
            let binding: Option<InputBinding> =
                env.storage().persistent().get(&DataKey::Input(handle));
            match binding {
                Some(b) if b.contract == caller && b.user == user => {}
                _ => return false,
            }
        }
        for handle in handles.iter() {
            grant(&env, &handle, &caller);
        }
        true
    }

    pub fn trivial_encrypt(env: Env, caller: Address, value: u128, bits: u32) -> BytesN<32> {
        caller.require_auth();
        check_width(&env, bits);
        store(&env, value, bits, &caller)
    }

    pub fn add(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32> {
        caller.require_auth();
        let (a, b, bits) = operand_pair(&env, &caller, &lhs, &rhs);
        store(&env, a.wrapping_add(b), bits, &caller)
    }

    pub fn sub(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32> {
        caller.require_auth();
        let (a, b, bits) = operand_pair(&env, &caller, &lhs, &rhs);
        store(&env, a.wrapping_sub(b), bits, &caller)
    }

    pub fn mul_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32> {
        caller.require_auth();
        let a = operand(&env, &caller, &lhs);
        store(&env, a.value.wrapping_mul(scalar), a.bits, &caller)
    }

    pub fn div_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32> {
        caller.require_auth();
        if scalar == 0 {
            panic_with_error!(&env, EngineError::DivisionByZero);
        }
        let a = operand(&env, &caller, &lhs);
        store(&env, a.value / scalar, a.bits, &caller)
    }

    pub fn min(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32> {
        caller.require_auth();
        let (a, b, bits) = operand_pair(&env, &caller, &lhs, &rhs);
        store(&env, a.min(b), bits, &caller)
    }

    pub fn ge(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32> {
        caller.require_auth();
        let (a, b, _) = operand_pair(&env, &caller, &lhs, &rhs);
        store(&env, (a >= b) as u128, BOOL_BITS, &caller)
    }

    pub fn ge_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32> {
        caller.require_auth();
        let a = operand(&env, &caller, &lhs);
        store(&env, (a.value >= scalar) as u128, BOOL_BITS, &caller)
    }

    pub fn select(
        env: Env,
        caller: Address,
        condition: BytesN<32>,
        if_true: BytesN<32>,
        if_false: BytesN<32>,
    ) -> BytesN<32> {
        caller.require_auth();
        let cond = operand(&env, &caller, &condition);
        if cond.bits != BOOL_BITS {
            panic_with_error!(&env, EngineError::WidthMismatch);
        }
        let (t, f, bits) = operand_pair(&env, &caller, &if_true, &if_false);
        let value = if cond.value == 1 { t } else { f };
        store(&env, value, bits, &caller)
    }

    pub fn cast(env: Env, caller: Address, value: BytesN<32>, bits: u32) -> BytesN<32> {
        caller.require_auth();
        check_width(&env, bits);
        let a = operand(&env, &caller, &value);
        store(&env, a.value, bits, &caller)
    }

    pub fn allow(env: Env, caller: Address, handle: BytesN<32>, grantee: Address) {
        caller.require_auth();
        let ct = load(&env, &handle);
        if ct.producer != caller && !has_grant(&env, &handle, &caller) {
            panic_with_error!(&env, EngineError::AccessDenied);
        }
        grant(&env, &handle, &grantee);
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, principal: Address) -> bool {
        has_grant(&env, &handle, &principal)
    }

    pub fn decrypt(env: Env, requester: Address, handle: BytesN<32>) -> Option<u128> {
        requester.require_auth();
        if !has_grant(&env, &handle, &requester) {
            return None;
        }
        env.storage()
            .persistent()
            .get::<_, Ciphertext>(&DataKey::Ciphertext(handle))
            .map(|ct| ct.value)
    }

    pub fn bit_width(env: Env, handle: BytesN<32>) -> u32 {
        load(&env, &handle).bits
    }
}

fn mask(value: u128, bits: u32) -> u128 {
    if bits >= WIDE_BITS {
        value
    } else {
        value & ((1u128 << bits) - 1)
    }
}

fn check_width(env: &Env, bits: u32) {
    if bits == 0 || bits > WIDE_BITS {
        panic_with_error!(env, EngineError::UnsupportedWidth);
    }
}

fn extend(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn next_handle(env: &Env) -> BytesN<32> {
    let nonce: u64 = env.storage().instance().get(&DataKey::Nonce).unwrap_or(0) + 1;
    env.storage().instance().set(&DataKey::Nonce, &nonce);

    let mut preimage = Bytes::from_slice(env, HANDLE_DOMAIN);
    preimage.extend_from_array(&nonce.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

fn store(env: &Env, value: u128, bits: u32, producer: &Address) -> BytesN<32> {
    let handle = next_handle(env);
    let key = DataKey::Ciphertext(handle.clone());
    env.storage().persistent().set(
        &key,
        &Ciphertext {
            value: mask(value, bits),
            bits,
            producer: producer.clone(),
        },
    );
    extend(env, &key);
    handle
}

fn load(env: &Env, handle: &BytesN<32>) -> Ciphertext {
    env.storage()
        .persistent()
        .get(&DataKey::Ciphertext(handle.clone()))
        .unwrap_or_else(|| panic_with_error!(env, EngineError::UnknownHandle))
}

fn has_grant(env: &Env, handle: &BytesN<32>, principal: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Acl(handle.clone(), principal.clone()))
}

fn grant(env: &Env, handle: &BytesN<32>, principal: &Address) {
    let key = DataKey::Acl(handle.clone(), principal.clone());
    env.storage().persistent().set(&key, &true);
    extend(env, &key);
}

fn operand(env: &Env, caller: &Address, handle: &BytesN<32>) -> Ciphertext {
    let ct = load(env, handle);
    if !has_grant(env, handle, caller) {
        panic_with_error!(env, EngineError::AccessDenied);
    }
    ct
}

fn operand_pair(
    env: &Env,
    caller: &Address,
    lhs: &BytesN<32>,
    rhs: &BytesN<32>,
) -> (u128, u128, u32) {
    let a = operand(env, caller, lhs);
    let b = operand(env, caller, rhs);
    if a.bits != b.bits {
        panic_with_error!(env, EngineError::WidthMismatch);
    }
    (a.value, b.value, a.bits)
}

fn input_proof(env: &Env, contract: &Address, user: &Address, handles: &Vec<BytesN<32>>) -> Bytes {
    let mut preimage = Bytes::from_slice(env, PROOF_DOMAIN);
    preimage.append(&contract.clone().to_xdr(env));
    preimage.append(&user.clone().to_xdr(env));
    for handle in handles.iter() {
        preimage.extend_from_array(&handle.to_array());
    }
    let digest = env.crypto().sha256(&preimage).to_bytes();
    Bytes::from_array(env, &digest.to_array())
}

#[cfg(test)]
mod test;
