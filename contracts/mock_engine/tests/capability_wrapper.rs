use confidential_interface::{Confidential, AMOUNT_BITS, WIDE_BITS};
use mock_engine::{MockEngine, MockEngineClient};
use soroban_sdk::{contract, contractimpl, testutils::Address as _, Address, Env};

/// Stand-in for any contract holding ciphertexts.
#[contract]
pub struct Holder;

#[contractimpl]
impl Holder {}

fn setup(env: &Env) -> (MockEngineClient<'static>, Address) {
    env.mock_all_auths();
    let engine_id = env.register(MockEngine, ());
    let holder_id = env.register(Holder, ());
    (MockEngineClient::new(env, &engine_id), holder_id)
}

#[test]
fn every_result_is_granted_to_holder_and_readers() {
    let env = Env::default();
    let (engine, holder) = setup(&env);
    let reader = Address::generate(&env);

    let (seed, sum, wide) = env.as_contract(&holder, || {
        let c = Confidential::new(&env, &engine.address);
        let seed = c.trivial(21, AMOUNT_BITS, &[]);
        let sum = c.add(&seed, &seed, &[&reader]);
        let wide = c.cast(&sum, WIDE_BITS, &[]);
        (seed, sum, wide)
    });

    assert!(engine.is_allowed(&seed, &holder));
    assert!(!engine.is_allowed(&seed, &reader));
    assert!(engine.is_allowed(&sum, &holder));
    assert!(engine.is_allowed(&sum, &reader));
    assert!(!engine.is_allowed(&wide, &reader));

    assert_eq!(engine.decrypt(&reader, &sum), Some(42));
    assert_eq!(engine.decrypt(&reader, &wide), None);
}

#[test]
fn grant_reasserts_on_existing_handles() {
    let env = Env::default();
    let (engine, holder) = setup(&env);
    let late_reader = Address::generate(&env);

    let handle = env.as_contract(&holder, || {
        let c = Confidential::new(&env, &engine.address);
        let handle = c.trivial(9, AMOUNT_BITS, &[]);
        c.grant(&handle, &[&late_reader]);
        assert!(c.is_allowed(&handle, &late_reader));
        handle
    });

    assert_eq!(engine.decrypt(&late_reader, &handle), Some(9));
}

#[test]
fn clipped_subtraction_never_underflows() {
    let env = Env::default();
    let (engine, holder) = setup(&env);
    let reader = Address::generate(&env);

    let clipped = env.as_contract(&holder, || {
        let c = Confidential::new(&env, &engine.address);
        let vested = c.trivial(100, AMOUNT_BITS, &[]);
        let released = c.trivial(250, AMOUNT_BITS, &[]);
        let capped = c.min(&released, &vested, &[]);
        c.sub(&vested, &capped, &[&reader])
    });

    assert_eq!(engine.decrypt(&reader, &clipped), Some(0));
}

#[test]
fn encrypted_comparison_drives_select() {
    let env = Env::default();
    let (engine, holder) = setup(&env);
    let reader = Address::generate(&env);

    let picked = env.as_contract(&holder, || {
        let c = Confidential::new(&env, &engine.address);
        let small = c.trivial(3, AMOUNT_BITS, &[]);
        let large = c.trivial(8, AMOUNT_BITS, &[]);
        let small_ge_large = c.ge(&small, &large, &[]);
        c.select(&small_ge_large, &small, &large, &[&reader])
    });

    assert_eq!(engine.decrypt(&reader, &picked), Some(8));
}
