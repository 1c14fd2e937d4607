use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOperator = 3,
    /// Recipient is the ledger itself, the closest thing to a null account.
    ZeroAddress = 4,
    /// The moving principal (or the ledger) holds no grant on the amount.
    HandleNotAllowed = 5,
    InvalidProof = 6,
    /// The encrypted amount is not an `AMOUNT_BITS` integer.
    InvalidWidth = 7,
}
