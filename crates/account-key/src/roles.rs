//! Roles an account key can authorize.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of role slots a role-based key can carry.
pub const ROLE_COUNT: usize = 3;

/// A role governed by a role-based account key.
///
/// The discriminant is the role's slot index inside a role-based key.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Signs ordinary transactions sent from the account.
    Transaction = 0,

    /// Signs transactions that replace the account's key.
    AccountUpdate = 1,

    /// Signs as fee payer for fee-delegated transactions.
    FeePayer = 2,
}

impl Role {
    /// All roles in slot order.
    pub const ALL: [Role; ROLE_COUNT] = [Role::Transaction, Role::AccountUpdate, Role::FeePayer];

    /// Slot index of the role.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The canonical role name used by wallets and RPC payloads.
    pub fn name(self) -> &'static str {
        match self {
            Role::Transaction => "roleTransactionKey",
            Role::AccountUpdate => "roleAccountUpdateKey",
            Role::FeePayer => "roleFeePayerKey",
        }
    }

    /// Looks up a role by its canonical name or its short snake_case alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "roleTransactionKey" | "transaction" => Some(Role::Transaction),
            "roleAccountUpdateKey" | "account_update" | "update" => Some(Role::AccountUpdate),
            "roleFeePayerKey" | "fee_payer" => Some(Role::FeePayer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_indices_contiguous() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
            assert_eq!(Role::from_index(i), Some(*role));
        }
        assert_eq!(Role::from_index(ROLE_COUNT), None);
    }

    #[test]
    fn test_role_name_lookup() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
        assert_eq!(Role::from_name("update"), Some(Role::AccountUpdate));
        assert_eq!(Role::from_name("fee_payer"), Some(Role::FeePayer));
        assert_eq!(Role::from_name("roleLast"), None);
    }

    #[test]
    fn test_role_serde_names() {
        let json = serde_json::to_string(&Role::FeePayer).unwrap();
        assert_eq!(json, "\"fee_payer\"");
        let role: Role = serde_json::from_str("\"account_update\"").unwrap();
        assert_eq!(role, Role::AccountUpdate);
    }
}
