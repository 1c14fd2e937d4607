use soroban_sdk::{contractclient, contracttype, Address, Bytes, BytesN, Env, Vec};

/// Width of encrypted booleans produced by comparisons.
pub const BOOL_BITS: u32 = 1;
/// Width of token amounts and vesting totals.
pub const AMOUNT_BITS: u32 = 64;
/// Width used for intermediate products so scalar multiplication cannot wrap.
pub const WIDE_BITS: u32 = 128;

/// Ciphertexts produced by one client-side encryption session, bound together
/// by a single well-formedness proof.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedInput {
    pub handles: Vec<BytesN<32>>,
    pub proof: Bytes,
}

/// Confidential compute engine consumed by the ledger and the vesting
/// contract.
///
/// Every producing call names its `caller` and requires that principal's
/// authorization. Operands must already be allowed to the caller. A freshly
/// produced handle is readable by nobody; only its producer may grant it, so
/// the producer must `allow` itself before it can compute on the result again.
#[contractclient(name = "EngineClient")]
pub trait ConfidentialEngine {
    fn trivial_encrypt(env: Env, caller: Address, value: u128, bits: u32) -> BytesN<32>;

    /// Checks `proof` against `handles` for the `(caller, user)` pair and, on
    /// success, grants `caller` every handle. Grants nothing on failure.
    fn verify_inputs(
        env: Env,
        caller: Address,
        user: Address,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
    ) -> bool;

    fn add(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn sub(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn mul_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32>;

    fn div_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32>;

    fn min(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn ge(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn ge_scalar(env: Env, caller: Address, lhs: BytesN<32>, scalar: u128) -> BytesN<32>;

    fn select(
        env: Env,
        caller: Address,
        condition: BytesN<32>,
        if_true: BytesN<32>,
        if_false: BytesN<32>,
    ) -> BytesN<32>;

    fn cast(env: Env, caller: Address, value: BytesN<32>, bits: u32) -> BytesN<32>;

    fn allow(env: Env, caller: Address, handle: BytesN<32>, grantee: Address);

    fn is_allowed(env: Env, handle: BytesN<32>, principal: Address) -> bool;

    /// Returns `None` when `requester` holds no grant on `handle`.
    fn decrypt(env: Env, requester: Address, handle: BytesN<32>) -> Option<u128>;

    fn bit_width(env: Env, handle: BytesN<32>) -> u32;
}
