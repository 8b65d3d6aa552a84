//! Central configuration for the biometric_credential crate

use std::{env, sync::LazyLock};

/// Relying-party display name. Falls back to the platform hostname when unset.
pub(crate) static BIOMETRIC_RP_NAME: LazyLock<Option<String>> = LazyLock::new(|| {
    env::var("BIOMETRIC_RP_NAME")
        .ok()
        .filter(|v| !v.trim().is_empty())
});

/// Ceremony timeout in seconds, handed to the platform in milliseconds.
pub(crate) static BIOMETRIC_TIMEOUT: LazyLock<u32> = LazyLock::new(|| {
    env::var("BIOMETRIC_TIMEOUT")
        .map(|v| parse_timeout(&v))
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
});

pub(crate) static BIOMETRIC_AUTHENTICATOR_ATTACHMENT: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_AUTHENTICATOR_ATTACHMENT")
        .map_or("platform".to_string(), |v| parse_attachment(&v))
});

pub(crate) static BIOMETRIC_USER_VERIFICATION: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_USER_VERIFICATION")
        .map_or("required".to_string(), |v| parse_user_verification(&v))
});

/// Namespace prepended to the username to form the storage key.
pub(crate) static BIOMETRIC_STORAGE_KEY_PREFIX: LazyLock<String> = LazyLock::new(|| {
    env::var("BIOMETRIC_STORAGE_KEY_PREFIX").unwrap_or_else(|_| "biometric_".to_string())
});

const DEFAULT_TIMEOUT_SECS: u32 = 60;

fn parse_timeout(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => secs,
        _ => {
            tracing::warn!(
                "Invalid timeout: {}. Using default {}",
                value,
                DEFAULT_TIMEOUT_SECS
            );
            DEFAULT_TIMEOUT_SECS
        }
    }
}

fn parse_attachment(value: &str) -> String {
    match value.to_lowercase().as_str() {
        "platform" => "platform".to_string(),
        "cross-platform" => "cross-platform".to_string(),
        invalid => {
            tracing::warn!(
                "Invalid authenticator attachment: {}. Using default 'platform'",
                invalid
            );
            "platform".to_string()
        }
    }
}

fn parse_user_verification(value: &str) -> String {
    match value.to_lowercase().as_str() {
        "required" => "required".to_string(),
        "preferred" => "preferred".to_string(),
        "discouraged" => "discouraged".to_string(),
        invalid => {
            tracing::warn!(
                "Invalid user verification: {}. Using default 'required'",
                invalid
            );
            "required".to_string()
        }
    }
}

/// Ceremony parameters used by [`crate::BiometricCredentialHelper`].
///
/// [`HelperConfig::from_env`] snapshots the environment-driven defaults; tests and
/// embedders may build one directly instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Relying-party name. `None` means "use the hostname".
    pub rp_name: Option<String>,
    /// Timeout in seconds.
    pub timeout_secs: u32,
    pub authenticator_attachment: String,
    pub user_verification: String,
    pub storage_key_prefix: String,
}

impl HelperConfig {
    pub fn from_env() -> Self {
        Self {
            rp_name: BIOMETRIC_RP_NAME.clone(),
            timeout_secs: *BIOMETRIC_TIMEOUT,
            authenticator_attachment: BIOMETRIC_AUTHENTICATOR_ATTACHMENT.clone(),
            user_verification: BIOMETRIC_USER_VERIFICATION.clone(),
            storage_key_prefix: BIOMETRIC_STORAGE_KEY_PREFIX.clone(),
        }
    }

    pub(crate) fn timeout_millis(&self) -> u32 {
        self.timeout_secs.saturating_mul(1000)
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            rp_name: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            authenticator_attachment: "platform".to_string(),
            user_verification: "required".to_string(),
            storage_key_prefix: "biometric_".to_string(),
        }
    }
}
