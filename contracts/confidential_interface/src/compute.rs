use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

use crate::engine::EngineClient;

/// Capability-carrying view of the compute engine for the current contract.
///
/// Every method that produces a ciphertext grants the result to the holder
/// (the contract running this code) and to each of `readers` before returning
/// it. Nothing is inherited from operands. Contracts go through this type
/// rather than calling `EngineClient` directly, so a result cannot leave a
/// method without its grants.
pub struct Confidential<'a> {
    engine: EngineClient<'a>,
    holder: Address,
}

impl<'a> Confidential<'a> {
    pub fn new(env: &'a Env, engine: &Address) -> Self {
        Self {
            engine: EngineClient::new(env, engine),
            holder: env.current_contract_address(),
        }
    }

    pub fn holder(&self) -> &Address {
        &self.holder
    }

    /// Re-asserts grants on an existing handle. The holder must already be
    /// allowed on it (or be its producer).
    pub fn grant(&self, handle: &BytesN<32>, readers: &[&Address]) {
        for reader in readers {
            if **reader != self.holder {
                self.engine.allow(&self.holder, handle, reader);
            }
        }
    }

    pub fn is_allowed(&self, handle: &BytesN<32>, principal: &Address) -> bool {
        self.engine.is_allowed(handle, principal)
    }

    pub fn bit_width(&self, handle: &BytesN<32>) -> u32 {
        self.engine.bit_width(handle)
    }

    /// Validates a batch of encrypted inputs submitted by `user`; on success
    /// the holder is granted every handle.
    pub fn verify_inputs(&self, user: &Address, handles: &Vec<BytesN<32>>, proof: &Bytes) -> bool {
        self.engine.verify_inputs(&self.holder, user, handles, proof)
    }

    pub fn trivial(&self, value: u128, bits: u32, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.trivial_encrypt(&self.holder, &value, &bits);
        self.seal(out, readers)
    }

    pub fn add(&self, lhs: &BytesN<32>, rhs: &BytesN<32>, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.add(&self.holder, lhs, rhs);
        self.seal(out, readers)
    }

    pub fn sub(&self, lhs: &BytesN<32>, rhs: &BytesN<32>, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.sub(&self.holder, lhs, rhs);
        self.seal(out, readers)
    }

    pub fn mul_scalar(&self, lhs: &BytesN<32>, scalar: u128, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.mul_scalar(&self.holder, lhs, &scalar);
        self.seal(out, readers)
    }

    pub fn div_scalar(&self, lhs: &BytesN<32>, scalar: u128, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.div_scalar(&self.holder, lhs, &scalar);
        self.seal(out, readers)
    }

    pub fn min(&self, lhs: &BytesN<32>, rhs: &BytesN<32>, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.min(&self.holder, lhs, rhs);
        self.seal(out, readers)
    }

    pub fn ge(&self, lhs: &BytesN<32>, rhs: &BytesN<32>, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.ge(&self.holder, lhs, rhs);
        self.seal(out, readers)
    }

    pub fn ge_scalar(&self, lhs: &BytesN<32>, scalar: u128, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.ge_scalar(&self.holder, lhs, &scalar);
        self.seal(out, readers)
    }

    pub fn select(
        &self,
        condition: &BytesN<32>,
        if_true: &BytesN<32>,
        if_false: &BytesN<32>,
        readers: &[&Address],
    ) -> BytesN<32> {
        let out = self.engine.select(&self.holder, condition, if_true, if_false);
        self.seal(out, readers)
    }

    pub fn cast(&self, value: &BytesN<32>, bits: u32, readers: &[&Address]) -> BytesN<32> {
        let out = self.engine.cast(&self.holder, value, &bits);
        self.seal(out, readers)
    }

    fn seal(&self, handle: BytesN<32>, readers: &[&Address]) -> BytesN<32> {
        self.engine.allow(&self.holder, &handle, &self.holder);
        self.grant(&handle, readers);
        handle
    }
}
