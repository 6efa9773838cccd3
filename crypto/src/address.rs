//! Operator → account address conversion.

use bech32::{FromBase32, ToBase32, Variant};
use govtally_types::AddressConverter;
use thiserror::Error;

/// Suffix the SDK appends to the account prefix for operator addresses.
pub const VALOPER_SUFFIX: &str = "valoper";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("bech32 decoding failed: {0}")]
    Decode(String),

    #[error("bech32 encoding failed: {0}")]
    Encode(String),

    #[error("prefix '{0}' is not an operator prefix")]
    NotOperator(String),

    #[error("operator address uses bech32m, expected bech32")]
    UnexpectedVariant,
}

/// Convert an operator address to the account address of the same key.
///
/// With `account_prefix = None` the account prefix is the operator prefix
/// minus its `valoper` suffix (`cosmosvaloper` → `cosmos`).
pub fn operator_to_account(
    operator_address: &str,
    account_prefix: Option<&str>,
) -> Result<String, AddressError> {
    let (hrp, data, variant) =
        bech32::decode(operator_address).map_err(|e| AddressError::Decode(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(AddressError::UnexpectedVariant);
    }
    let prefix = match account_prefix {
        Some(p) => p.to_string(),
        None => hrp
            .strip_suffix(VALOPER_SUFFIX)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AddressError::NotOperator(hrp.clone()))?
            .to_string(),
    };
    // Round-trip through bytes so malformed padding is rejected here rather
    // than silently re-encoded.
    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Decode(e.to_string()))?;
    bech32::encode(&prefix, bytes.to_base32(), Variant::Bech32)
        .map_err(|e| AddressError::Encode(e.to_string()))
}

/// [`AddressConverter`] backed by bech32 re-encoding.
///
/// Failed conversions yield an empty string.
#[derive(Clone, Debug, Default)]
pub struct Bech32Converter {
    account_prefix: Option<String>,
}

impl Bech32Converter {
    /// Derive the account prefix from each operator prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always encode with the given account prefix.
    pub fn with_account_prefix(prefix: impl Into<String>) -> Self {
        Self {
            account_prefix: Some(prefix.into()),
        }
    }
}

impl AddressConverter for Bech32Converter {
    fn operator_to_account(&self, operator_address: &str) -> String {
        operator_to_account(operator_address, self.account_prefix.as_deref()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(prefix: &str, bytes: &[u8]) -> String {
        bech32::encode(prefix, bytes.to_base32(), Variant::Bech32).unwrap()
    }

    #[test]
    fn strips_valoper_suffix() {
        let key = [7u8; 20];
        let operator = encode("cosmosvaloper", &key);
        assert!(operator.starts_with("cosmosvaloper1"));
        assert_eq!(operator_to_account(&operator, None).unwrap(), encode("cosmos", &key));
    }

    #[test]
    fn explicit_prefix_wins() {
        let key = [0xAB; 20];
        let operator = encode("osmovaloper", &key);
        assert_eq!(
            operator_to_account(&operator, Some("osmo")).unwrap(),
            encode("osmo", &key)
        );
    }

    #[test]
    fn account_address_is_not_an_operator() {
        let account = encode("cosmos", &[1u8; 20]);
        assert_eq!(
            operator_to_account(&account, None),
            Err(AddressError::NotOperator("cosmos".into()))
        );
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let mut operator = encode("cosmosvaloper", &[3u8; 20]);
        let last = operator.pop().unwrap();
        operator.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(
            operator_to_account(&operator, None),
            Err(AddressError::Decode(_))
        ));
    }

    #[test]
    fn converter_degrades_to_empty_string() {
        let conv = Bech32Converter::new();
        assert_eq!(conv.operator_to_account("not-an-address"), "");
        let key = [9u8; 20];
        assert_eq!(
            conv.operator_to_account(&encode("cosmosvaloper", &key)),
            encode("cosmos", &key)
        );
    }
}
