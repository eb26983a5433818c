use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The fixed set of banks this pipeline analyzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankCode {
    #[serde(rename = "CBE")]
    Cbe,
    #[serde(rename = "BOA")]
    Boa,
    Dashen,
}

impl BankCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BankCode::Cbe => "CBE",
            BankCode::Boa => "BOA",
            BankCode::Dashen => "Dashen",
        }
    }

    /// All known bank codes, in roster order.
    #[must_use]
    pub fn all() -> &'static [BankCode] {
        &[BankCode::Cbe, BankCode::Boa, BankCode::Dashen]
    }
}

impl std::fmt::Display for BankCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BankCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cbe" => Ok(BankCode::Cbe),
            "boa" => Ok(BankCode::Boa),
            "dashen" => Ok(BankCode::Dashen),
            other => Err(ConfigError::Validation(format!(
                "unknown bank code '{other}'; expected one of CBE, BOA, Dashen"
            ))),
        }
    }
}

/// One bank in the roster file: its code, display name, and the store
/// application id its reviews are listed under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankEntry {
    pub code: BankCode,
    pub name: String,
    pub app_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BanksFile {
    pub banks: Vec<BankEntry>,
}

/// Load and validate the bank roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty roster, duplicate codes, duplicate or empty app ids).
pub fn load_banks(path: &Path) -> Result<BanksFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let banks_file: BanksFile = serde_yaml::from_str(&content)?;

    validate_banks(&banks_file)?;

    Ok(banks_file)
}

fn validate_banks(banks_file: &BanksFile) -> Result<(), ConfigError> {
    if banks_file.banks.is_empty() {
        return Err(ConfigError::Validation(
            "bank roster must list at least one bank".to_string(),
        ));
    }

    let mut seen_codes = HashSet::new();
    let mut seen_app_ids = HashSet::new();

    for bank in &banks_file.banks {
        if bank.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "bank '{}' has an empty name",
                bank.code
            )));
        }

        if bank.app_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "bank '{}' has an empty app_id",
                bank.code
            )));
        }

        if !seen_codes.insert(bank.code) {
            return Err(ConfigError::Validation(format!(
                "duplicate bank code: '{}'",
                bank.code
            )));
        }

        if !seen_app_ids.insert(bank.app_id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate app_id: '{}' (bank '{}')",
                bank.app_id, bank.code
            )));
        }
    }

    Ok(())
}
