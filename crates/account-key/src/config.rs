//! Declarative account key descriptions loaded from TOML.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    account_key::AccountKey,
    errors::{ConfigError, KeyError},
    weighted::{parse_weight, WeightedPublicKey},
};

/// A weight or threshold written either as an integer or as a decimal/hex
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    Text(String),
}

impl NumberOrString {
    pub fn to_u64(&self) -> Result<u64, KeyError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => parse_weight(s),
        }
    }
}

/// One `{ weight, public_key }` entry of a weighted multisig description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightedKeyEntry {
    pub weight: Option<NumberOrString>,
    pub public_key: Option<String>,
}

impl WeightedKeyEntry {
    pub fn to_weighted_key(&self) -> Result<WeightedPublicKey, KeyError> {
        let weight = self
            .weight
            .as_ref()
            .ok_or(KeyError::MissingField("weight"))?
            .to_u64()?;
        let public_key = self
            .public_key
            .as_deref()
            .ok_or(KeyError::MissingField("public_key"))?;
        WeightedPublicKey::new(weight, public_key)
    }
}

/// An account key as written in a key file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKeyConfig {
    Nil,
    Legacy,
    Fail,
    Public {
        key: String,
    },
    WeightedMultisig {
        threshold: Option<NumberOrString>,
        #[serde(default)]
        keys: Vec<WeightedKeyEntry>,
    },
    /// Slot keys in transaction, update, fee-payer order.
    RoleBased {
        #[serde(default)]
        roles: Vec<AccountKeyConfig>,
    },
}

impl AccountKeyConfig {
    /// Builds the described key, running every constructor check.
    pub fn to_account_key(&self) -> Result<AccountKey, KeyError> {
        match self {
            Self::Nil => Ok(AccountKey::Nil),
            Self::Legacy => Ok(AccountKey::Legacy),
            Self::Fail => Ok(AccountKey::Fail),
            Self::Public { key } => AccountKey::public(key),
            Self::WeightedMultisig { threshold, keys } => {
                let threshold = threshold
                    .as_ref()
                    .ok_or(KeyError::MissingField("threshold"))?
                    .to_u64()?;
                let keys = keys
                    .iter()
                    .map(WeightedKeyEntry::to_weighted_key)
                    .collect::<Result<Vec<_>, _>>()?;
                AccountKey::weighted_multisig(threshold, keys)
            }
            Self::RoleBased { roles } => {
                let keys = roles
                    .iter()
                    .map(Self::to_account_key)
                    .collect::<Result<Vec<_>, _>>()?;
                AccountKey::role_based(keys)
            }
        }
    }
}

impl TryFrom<&AccountKeyConfig> for AccountKey {
    type Error = KeyError;

    fn try_from(config: &AccountKeyConfig) -> Result<Self, Self::Error> {
        config.to_account_key()
    }
}

/// A key file holding a single `[account_key]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    pub account_key: AccountKeyConfig,
}

impl KeyFile {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_account_key(&self) -> Result<AccountKey, ConfigError> {
        Ok(self.account_key.to_account_key()?)
    }
}
