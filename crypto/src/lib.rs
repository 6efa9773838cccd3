//! Address handling for Cosmos SDK chains.
//!
//! Validator operator addresses and account addresses wrap the same 20-byte
//! key hash under different bech32 human-readable prefixes
//! (`cosmosvaloper1...` vs `cosmos1...`). Converting between them is a
//! decode/re-encode with the prefix swapped.

pub mod address;

pub use address::{operator_to_account, AddressError, Bech32Converter, VALOPER_SUFFIX};
