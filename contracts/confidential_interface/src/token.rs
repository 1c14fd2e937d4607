use soroban_sdk::{contractclient, Address, BytesN, Env};

/// The part of the confidential ledger other contracts call into.
///
/// Transfers never fail on insufficient funds: they move
/// `min(amount, balance[from])` and return a handle to what actually moved.
#[contractclient(name = "ConfidentialTokenClient")]
pub trait ConfidentialTokenInterface {
    fn confidential_transfer(env: Env, from: Address, to: Address, amount: BytesN<32>)
        -> BytesN<32>;

    fn confidential_transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: BytesN<32>,
    ) -> BytesN<32>;

    fn set_operator(env: Env, holder: Address, operator: Address, until: u64);

    fn is_operator(env: Env, holder: Address, spender: Address) -> bool;

    fn balance_of(env: Env, account: Address) -> Option<BytesN<32>>;

    fn total_supply(env: Env) -> Option<BytesN<32>>;
}
