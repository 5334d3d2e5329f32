//! Role-based account keys.

use serde::Serialize;
use tracing::debug;

use super::AccountKey;
use crate::{
    errors::KeyError,
    roles::{Role, ROLE_COUNT},
};

/// Maximum number of role slots.
pub const MAX_ROLE_KEYS: usize = ROLE_COUNT;

/// Per-role policies, positional by [`Role::index`].
///
/// Slots are filled from the transaction role onwards. A role is unset when
/// its slot is past the end of the list or holds a nil key, so a nil slot
/// leaves a middle role unset while a later one is set. Each slot holds a
/// nil, public or weighted multisig key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleBased {
    keys: Vec<AccountKey>,
}

impl RoleBased {
    /// Creates a role-based key from slot keys in role order.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if:
    /// - `TooManyRoles`: more than [`MAX_ROLE_KEYS`] keys are given
    /// - `UnsupportedRoleKey`: a slot holds a legacy, fail or role-based key
    pub fn try_new(keys: Vec<AccountKey>) -> Result<Self, KeyError> {
        if keys.len() > MAX_ROLE_KEYS {
            return Err(KeyError::TooManyRoles {
                count: keys.len(),
                max: MAX_ROLE_KEYS,
            });
        }

        for key in &keys {
            match key {
                AccountKey::Nil | AccountKey::Public(_) | AccountKey::WeightedMultiSig(_) => {}
                other => return Err(KeyError::UnsupportedRoleKey(other.key_type())),
            }
        }

        debug!(roles = keys.len(), "constructed role-based key");
        Ok(Self { keys })
    }

    /// Slot keys in role order.
    pub fn keys(&self) -> &[AccountKey] {
        &self.keys
    }

    /// The key set for `role`, if any. Nil slots count as unset.
    pub fn slot(&self, role: Role) -> Option<&AccountKey> {
        self.keys
            .get(role.index())
            .filter(|key| !matches!(key, AccountKey::Nil))
    }

    /// Returns the policy governing `role`.
    ///
    /// A set slot wins. An unset update or fee-payer slot falls back to the
    /// transaction slot. An unset transaction slot has no fallback and fails
    /// with [`KeyError::RoleKeyNotFound`].
    pub fn resolve(&self, role: Role) -> Result<&AccountKey, KeyError> {
        self.slot(role)
            .or_else(|| self.slot(Role::Transaction))
            .ok_or(KeyError::RoleKeyNotFound(role))
    }

    /// Number of slots, set or not.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no slot is present.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
