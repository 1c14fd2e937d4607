#![no_std]
//! Shared seams between the confidential contracts: the compute engine and
//! ledger client traits, the encrypted-input envelope, and the capability
//! wrapper every contract routes its ciphertext arithmetic through.

mod compute;
mod engine;
mod token;

pub use compute::Confidential;
pub use engine::{
    ConfidentialEngine, EncryptedInput, EngineClient, AMOUNT_BITS, BOOL_BITS, WIDE_BITS,
};
pub use token::{ConfidentialTokenClient, ConfidentialTokenInterface};
