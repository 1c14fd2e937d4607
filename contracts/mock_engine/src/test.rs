#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, BytesN, Env};

use crate::{MockEngine, MockEngineClient};
use confidential_interface::AMOUNT_BITS;

struct Setup {
    env: Env,
    engine: MockEngineClient<'static>,
    alice: Address,
}

fn create_setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let engine_id = env.register(MockEngine, ());
    let engine = MockEngineClient::new(&env, &engine_id);
    let alice = Address::generate(&env);

    Setup { env, engine, alice }
}

/// Encrypts `value` as `who` and grants it back to `who`.
fn owned(s: &Setup, who: &Address, value: u128, bits: u32) -> BytesN<32> {
    let handle = s.engine.trivial_encrypt(who, &value, &bits);
    s.engine.allow(who, &handle, who);
    handle
}

fn reveal(s: &Setup, who: &Address, handle: &BytesN<32>) -> u128 {
    s.engine.allow(who, handle, who);
    s.engine.decrypt(who, handle).unwrap()
}

#[test]
fn fresh_result_is_readable_by_nobody() {
    let s = create_setup();
    let a = owned(&s, &s.alice, 7, AMOUNT_BITS);

    let sum = s.engine.add(&s.alice, &a, &a);

    assert!(!s.engine.is_allowed(&sum, &s.alice));
    assert_eq!(s.engine.decrypt(&s.alice, &sum), None);

    // The producer may still grant itself.
    assert_eq!(reveal(&s, &s.alice, &sum), 14);
}

#[test]
fn arithmetic_wraps_at_bit_width() {
    let s = create_setup();
    let max = owned(&s, &s.alice, u64::MAX as u128, AMOUNT_BITS);
    let one = owned(&s, &s.alice, 1, AMOUNT_BITS);

    let wrapped = s.engine.add(&s.alice, &max, &one);
    assert_eq!(reveal(&s, &s.alice, &wrapped), 0);

    let under = s.engine.sub(&s.alice, &one, &max);
    assert_eq!(reveal(&s, &s.alice, &under), 2);
}

#[test]
fn scalar_ops_min_and_cast() {
    let s = create_setup();
    let a = owned(&s, &s.alice, 1_000, AMOUNT_BITS);
    let b = owned(&s, &s.alice, 300, AMOUNT_BITS);

    let wide = s.engine.cast(&s.alice, &a, &128);
    s.engine.allow(&s.alice, &wide, &s.alice);
    assert_eq!(s.engine.bit_width(&wide), 128);

    let product = s.engine.mul_scalar(&s.alice, &wide, &120);
    s.engine.allow(&s.alice, &product, &s.alice);
    let quotient = s.engine.div_scalar(&s.alice, &product, &300);
    assert_eq!(reveal(&s, &s.alice, &quotient), 400);

    let smaller = s.engine.min(&s.alice, &a, &b);
    assert_eq!(reveal(&s, &s.alice, &smaller), 300);
}

#[test]
fn select_follows_encrypted_comparison() {
    let s = create_setup();
    let a = owned(&s, &s.alice, 10, AMOUNT_BITS);
    let b = owned(&s, &s.alice, 20, AMOUNT_BITS);

    let a_ge_b = s.engine.ge(&s.alice, &a, &b);
    s.engine.allow(&s.alice, &a_ge_b, &s.alice);
    let picked = s.engine.select(&s.alice, &a_ge_b, &a, &b);
    assert_eq!(reveal(&s, &s.alice, &picked), 20);

    let a_ge_5 = s.engine.ge_scalar(&s.alice, &a, &5);
    s.engine.allow(&s.alice, &a_ge_5, &s.alice);
    let picked = s.engine.select(&s.alice, &a_ge_5, &a, &b);
    assert_eq!(reveal(&s, &s.alice, &picked), 10);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn operands_need_a_grant() {
    let s = create_setup();
    let mallory = Address::generate(&s.env);
    let a = owned(&s, &s.alice, 10, AMOUNT_BITS);

    s.engine.add(&mallory, &a, &a);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn only_allowed_principals_can_grant() {
    let s = create_setup();
    let mallory = Address::generate(&s.env);
    let a = owned(&s, &s.alice, 10, AMOUNT_BITS);

    s.engine.allow(&mallory, &a, &mallory);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn mixed_widths_are_rejected() {
    let s = create_setup();
    let a = owned(&s, &s.alice, 10, AMOUNT_BITS);
    let b = owned(&s, &s.alice, 10, 128);

    s.engine.add(&s.alice, &a, &b);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn division_by_zero_is_rejected() {
    let s = create_setup();
    let a = owned(&s, &s.alice, 10, AMOUNT_BITS);

    s.engine.div_scalar(&s.alice, &a, &0);
}

#[test]
fn decrypt_without_grant_returns_nothing() {
    let s = create_setup();
    let bob = Address::generate(&s.env);
    let a = owned(&s, &s.alice, 42, AMOUNT_BITS);

    assert_eq!(s.engine.decrypt(&bob, &a), None);
    s.engine.allow(&s.alice, &a, &bob);
    assert_eq!(s.engine.decrypt(&bob, &a), Some(42));
}

#[test]
fn verified_inputs_are_granted_to_the_caller() {
    let s = create_setup();
    let contract = Address::generate(&s.env);
    let input = s
        .engine
        .encrypt_inputs(&contract, &s.alice, &vec![&s.env, 5u128, 9u128], &AMOUNT_BITS);

    assert!(s
        .engine
        .verify_inputs(&contract, &s.alice, &input.handles, &input.proof));
    for handle in input.handles.iter() {
        assert!(s.engine.is_allowed(&handle, &contract));
    }
    assert_eq!(s.engine.decrypt(&contract, &input.handles.get(1).unwrap()), Some(9));
}

#[test]
fn forged_or_misbound_inputs_are_rejected() {
    let s = create_setup();
    let contract = Address::generate(&s.env);
    let other = Address::generate(&s.env);
    let input = s
        .engine
        .encrypt_inputs(&contract, &s.alice, &vec![&s.env, 5u128], &AMOUNT_BITS);

    let forged = Bytes::from_array(&s.env, &[0u8; 32]);
    assert!(!s
        .engine
        .verify_inputs(&contract, &s.alice, &input.handles, &forged));

    // Right proof, wrong submitter.
    assert!(!s
        .engine
        .verify_inputs(&contract, &other, &input.handles, &input.proof));
    // Right proof, wrong consuming contract.
    assert!(!s
        .engine
        .verify_inputs(&other, &s.alice, &input.handles, &input.proof));

    let handle = input.handles.get(0).unwrap();
    assert!(!s.engine.is_allowed(&handle, &contract));
    assert!(!s.engine.is_allowed(&handle, &other));
}
