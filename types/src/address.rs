//! Operator-to-account address conversion seam.

/// Converts a validator operator address (e.g. `cosmosvaloper1...`) into the
/// account address the same key signs governance votes with (`cosmos1...`).
///
/// Implementations are pure. A conversion that fails yields an empty string;
/// callers decide whether that is fatal.
pub trait AddressConverter {
    fn operator_to_account(&self, operator_address: &str) -> String;
}

impl<F> AddressConverter for F
where
    F: Fn(&str) -> String,
{
    fn operator_to_account(&self, operator_address: &str) -> String {
        self(operator_address)
    }
}
