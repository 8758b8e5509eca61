//! Runtime Configuration
//!
//! Process-wide settings for the keychain's ambient concerns:
//! - Debug logging
//! - Redaction of public material in log fields
//!
//! Settings are read once from the environment and can be overridden by
//! the command line before they are applied to the logger.

use std::sync::OnceLock;

use super::logging;

/// Enables debug log records
pub const DEBUG_ENV: &str = "SECP_KEYCHAIN_DEBUG";
/// Controls redaction of public keys and digests in log fields
pub const REDACT_LOGS_ENV: &str = "SECP_KEYCHAIN_REDACT_LOGS";

/// Keychain settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Emit debug records (retries, recovery failures)
    pub debug_logging: bool,
    /// Redact public keys and digests in log fields
    pub redact_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            redact_logs: true,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            debug_logging: lookup(DEBUG_ENV)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.debug_logging),
            redact_logs: lookup(REDACT_LOGS_ENV)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.redact_logs),
        }
    }

    /// Force debug logging on
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_logging = self.debug_logging || enabled;
        self
    }

    /// Push these settings into the logger
    pub fn apply(&self) {
        if self.debug_logging {
            logging::enable_debug();
        } else {
            logging::disable_debug();
        }
        logging::set_redaction(self.redact_logs);
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Global settings instance
static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Install settings for the process; the first call wins.
/// Returns the settings actually in effect.
pub fn init(settings: Settings) -> &'static Settings {
    let active = SETTINGS.get_or_init(|| settings);
    active.apply();
    active
}
