use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Schedule parameters violate a static invariant.
    InvalidParams = 3,
    /// A wallet is already registered at this identity.
    AlreadyExists = 4,
    WalletNotFound = 5,
    NotBeneficiary = 6,
    CliffNotPassed = 7,
    /// A release for this wallet is already in flight.
    ReentrancyDetected = 8,
    InvalidProof = 9,
    /// Schedules and encrypted inputs differ in length.
    LengthMismatch = 10,
    NoPendingAdmin = 11,
    /// The funder has not made this contract its ledger operator.
    NotOperator = 12,
    /// An encrypted amount is not an `AMOUNT_BITS` integer.
    InvalidWidth = 13,
}
