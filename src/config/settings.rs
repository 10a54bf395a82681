//! User settings for fintrack
//!
//! Settings decide how the ledger treats unknown currencies, missing ids and
//! duplicate codes, and which currency summaries default to.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::{normalize_code, ANCHOR_CODE};
use crate::services::{ConversionPolicy, MissingIdPolicy, StorePolicy};
use crate::storage::file_io::write_atomic;

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency summaries are shown in when none is given
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default)]
    pub conversion_policy: ConversionPolicy,

    #[serde(default)]
    pub missing_id_policy: MissingIdPolicy,

    /// Reject a new currency whose code is already taken
    #[serde(default = "default_true")]
    pub enforce_unique_codes: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    ANCHOR_CODE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            conversion_policy: ConversionPolicy::default(),
            missing_id_policy: MissingIdPolicy::default(),
            enforce_unique_codes: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_atomic(&paths.settings_file(), &contents)
    }

    /// Change one setting by its config key
    ///
    /// Keys are `default-currency`, `conversion-policy`, `missing-id-policy` and
    /// `unique-codes`. Nothing changes when the key or value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        match key.trim().to_lowercase().as_str() {
            "default-currency" => {
                let code = normalize_code(value);
                if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(FinanceError::Validation(format!(
                        "Invalid currency code: '{}'",
                        value
                    )));
                }
                self.default_currency = code;
            }
            "conversion-policy" => {
                self.conversion_policy = ConversionPolicy::parse(value).ok_or_else(|| {
                    FinanceError::Validation(format!(
                        "Unknown conversion policy '{}'. Use strict or lenient",
                        value
                    ))
                })?;
            }
            "missing-id-policy" => {
                self.missing_id_policy = MissingIdPolicy::parse(value).ok_or_else(|| {
                    FinanceError::Validation(format!(
                        "Unknown missing id policy '{}'. Use ignore or error",
                        value
                    ))
                })?;
            }
            "unique-codes" => {
                self.enforce_unique_codes = parse_flag(value).ok_or_else(|| {
                    FinanceError::Validation(format!("Expected true or false, got '{}'", value))
                })?;
            }
            other => {
                return Err(FinanceError::Validation(format!(
                    "Unknown setting '{}'. Valid keys: default-currency, conversion-policy, \
                     missing-id-policy, unique-codes",
                    other
                )));
            }
        }
        Ok(())
    }

    /// Store behavior these settings describe
    pub fn store_policy(&self) -> StorePolicy {
        let default_target = if self.default_currency.trim().is_empty() {
            default_currency()
        } else {
            normalize_code(&self.default_currency)
        };

        StorePolicy {
            conversion: self.conversion_policy,
            missing_ids: self.missing_id_policy,
            unique_codes: self.enforce_unique_codes,
            default_target,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
