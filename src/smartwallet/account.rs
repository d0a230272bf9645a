//! Smart account flavours and EIP-7702 delegation helpers.

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Prefix of an EIP-7702 delegation designator (`0xef0100 ‖ address`).
pub const EIP7702_DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Delegation contract used by the custom-account example.
pub const CUSTOM_DELEGATION_ADDRESS: Address = address!("11923b4c785d87bb34da4d4e34e9feea09179289");

/// Safe version deployed by the Safe examples.
pub const DEFAULT_SAFE_VERSION: &str = "1.4.1";

/// How batched calls are encoded for the account's `execute` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletEncoding {
    Erc7821,
    Erc7579,
    Safe,
}

/// ERC-4337 entry point versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPointVersion {
    #[serde(rename = "0.7")]
    V07,
    #[serde(rename = "0.8")]
    V08,
}

/// ERC-4337 entry point deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub address: Address,
    pub version: EntryPointVersion,
}

impl EntryPoint {
    pub const V07: EntryPoint = EntryPoint {
        address: address!("0000000071727De22E5E9d8BAf0edAc6f37da032"),
        version: EntryPointVersion::V07,
    };

    pub const V08: EntryPoint = EntryPoint {
        address: address!("4337084D9E255Ff0702461CF8895CE9E3b5Ff108"),
        version: EntryPointVersion::V08,
    };
}

/// Smart account flavour controlled by the owner key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AccountKind {
    /// Relay-provided EIP-7702 account; the owner EOA is the account.
    Gelato,
    /// Kernel account, counterfactual or EIP-7702 delegated.
    Kernel { eip7702: bool },
    /// Counterfactual Safe with a single owner.
    Safe { version: String },
    /// Caller-chosen delegation contract behind an ERC-4337 entry point.
    Custom {
        delegation: Address,
        entry_point: EntryPoint,
        encoding: WalletEncoding,
        eip7702: bool,
    },
}

impl AccountKind {
    pub fn gelato() -> Self {
        AccountKind::Gelato
    }

    pub fn kernel(eip7702: bool) -> Self {
        AccountKind::Kernel { eip7702 }
    }

    pub fn safe() -> Self {
        AccountKind::Safe {
            version: DEFAULT_SAFE_VERSION.to_string(),
        }
    }

    /// EIP-7702 account delegating to `delegation`, entry point v0.8,
    /// ERC-7821 batch encoding.
    pub fn custom(delegation: Address) -> Self {
        AccountKind::Custom {
            delegation,
            entry_point: EntryPoint::V08,
            encoding: WalletEncoding::Erc7821,
            eip7702: true,
        }
    }

    /// Default call encoding for this account.
    pub fn encoding(&self) -> WalletEncoding {
        match self {
            AccountKind::Gelato => WalletEncoding::Erc7821,
            AccountKind::Kernel { .. } => WalletEncoding::Erc7579,
            AccountKind::Safe { .. } => WalletEncoding::Safe,
            AccountKind::Custom { encoding, .. } => *encoding,
        }
    }

    /// True when the owner EOA itself becomes the smart account.
    pub fn uses_eip7702(&self) -> bool {
        match self {
            AccountKind::Gelato => true,
            AccountKind::Kernel { eip7702 } => *eip7702,
            AccountKind::Safe { .. } => false,
            AccountKind::Custom { eip7702, .. } => *eip7702,
        }
    }

    /// Delegation target known up front, if any.
    pub fn delegation(&self) -> Option<Address> {
        match self {
            AccountKind::Custom { delegation, .. } => Some(*delegation),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Gelato => "gelato",
            AccountKind::Kernel { .. } => "kernel",
            AccountKind::Safe { .. } => "safe",
            AccountKind::Custom { .. } => "custom",
        }
    }
}

/// True when `code` is an EIP-7702 designator pointing at `delegate`.
pub fn is_delegated_to(code: &[u8], delegate: Address) -> bool {
    code.len() == 23
        && code[..3] == EIP7702_DELEGATION_PREFIX
        && code[3..] == delegate.as_slice()[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodings() {
        assert_eq!(AccountKind::gelato().encoding(), WalletEncoding::Erc7821);
        assert_eq!(AccountKind::kernel(true).encoding(), WalletEncoding::Erc7579);
        assert_eq!(AccountKind::safe().encoding(), WalletEncoding::Safe);
        assert_eq!(
            AccountKind::custom(CUSTOM_DELEGATION_ADDRESS).encoding(),
            WalletEncoding::Erc7821
        );
    }

    #[test]
    fn test_eip7702_flags() {
        assert!(AccountKind::gelato().uses_eip7702());
        assert!(!AccountKind::kernel(false).uses_eip7702());
        assert!(AccountKind::kernel(true).uses_eip7702());
        assert!(!AccountKind::safe().uses_eip7702());
        assert!(AccountKind::custom(CUSTOM_DELEGATION_ADDRESS).uses_eip7702());
    }

    #[test]
    fn test_custom_delegation() {
        let kind = AccountKind::custom(CUSTOM_DELEGATION_ADDRESS);
        assert_eq!(kind.delegation(), Some(CUSTOM_DELEGATION_ADDRESS));
        assert_eq!(AccountKind::gelato().delegation(), None);
    }

    #[test]
    fn test_account_json() {
        let value = serde_json::to_value(AccountKind::custom(CUSTOM_DELEGATION_ADDRESS)).unwrap();
        assert_eq!(value["type"], "custom");
        assert_eq!(value["encoding"], "erc7821");
        assert_eq!(value["eip7702"], true);
        assert_eq!(value["entryPoint"]["version"], "0.8");

        let value = serde_json::to_value(AccountKind::safe()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "safe", "version": "1.4.1"}));
    }

    #[test]
    fn test_delegation_designator() {
        let mut code = EIP7702_DELEGATION_PREFIX.to_vec();
        code.extend_from_slice(CUSTOM_DELEGATION_ADDRESS.as_slice());

        assert!(is_delegated_to(&code, CUSTOM_DELEGATION_ADDRESS));
        assert!(!is_delegated_to(&code, Address::ZERO));
        assert!(!is_delegated_to(&[], CUSTOM_DELEGATION_ADDRESS));
        assert!(!is_delegated_to(&code[..22], CUSTOM_DELEGATION_ADDRESS));
    }
}
