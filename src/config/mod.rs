use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub seczetta: SecZettaSettings,
    pub policy: PolicySettings,
    pub logging: LoggingSettings,
}

/// Connection settings for the SecZetta tenant. The gate runs only when
/// both `api_key` and `base_url` are present; the two ids are passed into
/// the profile search as-is, unchecked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecZettaSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub attribute_id: Option<String>,
    pub profile_type_id: Option<String>,
}

/// Decision policy knobs. Thresholds are normalized at load time: a value
/// that does not parse as an integer, or parses to zero, disables the
/// corresponding branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    pub authenticate_on_error: bool,
    pub risk_key: Option<String>,
    pub allowable_risk: Option<i64>,
    pub maximum_allowed_risk: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            seczetta: SecZettaSettings::default(),
            policy: PolicySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for SecZettaSettings {
    fn default() -> Self {
        SecZettaSettings {
            api_key: None,
            base_url: None,
            attribute_id: None,
            profile_type_id: None,
        }
    }
}

impl Default for PolicySettings {
    fn default() -> Self {
        PolicySettings {
            authenticate_on_error: false,
            risk_key: None,
            allowable_risk: None,
            maximum_allowed_risk: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let _settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        Ok(Settings {
            seczetta: SecZettaSettings {
                api_key: env::var("SECZETTA_API_KEY").ok(),
                base_url: env::var("SECZETTA_BASE_URL").ok(),
                attribute_id: env::var("SECZETTA_ATTRIBUTE_ID").ok(),
                profile_type_id: env::var("SECZETTA_PROFILE_TYPE_ID").ok(),
            },
            policy: PolicySettings {
                authenticate_on_error: flag_enabled(env::var("SECZETTA_AUTHENTICATE_ON_ERROR").ok()),
                risk_key: env::var("SECZETTA_RISK_KEY").ok(),
                allowable_risk: parse_threshold(env::var("SECZETTA_ALLOWABLE_RISK").ok()),
                maximum_allowed_risk: parse_threshold(env::var("SECZETTA_MAXIMUM_ALLOWED_RISK").ok()),
            },
            logging: LoggingSettings {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}

/// Only the literal string "true" opts a tenant into fail-open behavior.
fn flag_enabled(raw: Option<String>) -> bool {
    matches!(raw.as_deref(), Some("true"))
}

/// A threshold of zero counts as unset and disables its check.
fn parse_threshold(raw: Option<String>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&v| v != 0)
}
