mod errors;
mod options;
#[cfg(test)]
mod test_utils;
mod types;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::HelperConfig;
use crate::platform::{CredentialPlatform, PlatformError};
use crate::storage::KeyValueStore;
use crate::utils::{base64url_decode, base64url_encode, gen_random_bytes};

pub use errors::BiometricError;
pub use types::{CeremonyResult, CredentialRecord};

use options::{CHALLENGE_LEN, USER_HANDLE_LEN, authentication_options, registration_options};

/// Registers and authenticates a per-username biometric credential.
///
/// The platform credential API and the local key-value store are injected, so
/// the helper runs the same against a browser bridge, a software authenticator,
/// or a test fake. Each ceremony awaits exactly one platform call; callers should
/// not start a second ceremony for the same username before the first resolves.
pub struct BiometricCredentialHelper {
    platform: Box<dyn CredentialPlatform>,
    store: Mutex<Box<dyn KeyValueStore>>,
    config: HelperConfig,
}

impl BiometricCredentialHelper {
    pub fn new(platform: Box<dyn CredentialPlatform>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            platform,
            store: Mutex::new(store),
            config: HelperConfig::from_env(),
        }
    }

    pub fn with_config(mut self, config: HelperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// True only on a secure origin that exposes credential creation and retrieval.
    pub fn is_supported(&self) -> bool {
        self.platform.capabilities().supports_public_key()
    }

    /// Whether the device has a built-in user-verifying authenticator (fingerprint, face).
    pub async fn is_platform_authenticator_available(&self) -> bool {
        self.is_supported()
            && self
                .platform
                .is_user_verifying_platform_authenticator_available()
                .await
    }

    /// Runs a registration ceremony and stores the resulting credential for `username`.
    ///
    /// Returns the base64url credential id. An existing record for the same
    /// username is replaced.
    pub async fn register(&self, username: &str) -> Result<String, BiometricError> {
        let username = validate_username(username)?;

        if !self.is_supported() {
            tracing::warn!("Biometric registration requested on an unsupported platform");
            return Err(BiometricError::Unsupported);
        }

        let rp_id = self.rp_id()?;
        let challenge = gen_random_bytes(CHALLENGE_LEN)?;
        let user_handle = gen_random_bytes(USER_HANDLE_LEN)?;
        let options = registration_options(&self.config, &rp_id, username, challenge, user_handle);

        tracing::debug!("Registration options: {:?}", options);

        let credential = self
            .platform
            .create(options)
            .await
            .map_err(|e| log_platform_error("registration", e))?
            .ok_or_else(|| {
                tracing::error!("Platform returned no credential");
                BiometricError::Unknown("Platform returned no credential".to_string())
            })?;

        let record = CredentialRecord {
            credential_id: base64url_encode(&credential.raw_id),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_string(&record)?;

        self.store
            .lock()
            .await
            .set(&self.storage_key(username), value)
            .await?;

        tracing::info!(
            "Registered biometric credential {} for {}",
            record.credential_id,
            username
        );

        Ok(record.credential_id)
    }

    /// Runs an authentication ceremony restricted to the credential stored for `username`.
    ///
    /// Fails with `NoCredential` before touching the platform when nothing is stored.
    pub async fn authenticate(&self, username: &str) -> Result<(), BiometricError> {
        let username = validate_username(username)?;

        let record = self.load_record(username).await?.ok_or_else(|| {
            tracing::debug!("No biometric credential stored for {}", username);
            BiometricError::NoCredential(username.to_string())
        })?;

        if !self.is_supported() {
            tracing::warn!("Biometric authentication requested on an unsupported platform");
            return Err(BiometricError::Unsupported);
        }

        let rp_id = self.rp_id()?;
        let credential_id = base64url_decode(&record.credential_id)?;
        let challenge = gen_random_bytes(CHALLENGE_LEN)?;
        let options = authentication_options(&self.config, &rp_id, credential_id, challenge);

        tracing::debug!("Authentication options: {:?}", options);

        let assertion = self
            .platform
            .get(options)
            .await
            .map_err(|e| log_platform_error("authentication", e))?;

        match assertion {
            Some(assertion) => {
                tracing::debug!(
                    "Assertion received from credential {}",
                    base64url_encode(&assertion.raw_id)
                );
                tracing::info!("Biometric authentication succeeded for {}", username);
                Ok(())
            }
            None => {
                tracing::warn!("Platform returned no assertion for {}", username);
                Err(BiometricError::Unknown(
                    "Platform returned no assertion".to_string(),
                ))
            }
        }
    }

    /// Whether a credential record exists for `username`.
    ///
    /// Storage failures and unreadable records count as "not registered".
    pub async fn has_registered(&self, username: &str) -> bool {
        let Ok(username) = validate_username(username) else {
            return false;
        };

        match self.load_record(username).await {
            Ok(record) => record.is_some(),
            Err(e) => {
                tracing::warn!("Failed to look up biometric credential: {}", e);
                false
            }
        }
    }

    pub async fn credential_record(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, BiometricError> {
        let username = validate_username(username)?;
        self.load_record(username).await
    }

    /// Removes the record for `username`, returning whether one existed.
    ///
    /// Called when the wallet account itself is deleted. The platform keeps its
    /// key pair; only the local mapping goes away.
    pub async fn unregister(&self, username: &str) -> Result<bool, BiometricError> {
        let username = validate_username(username)?;
        let key = self.storage_key(username);

        let mut store = self.store.lock().await;
        let existed = store.get(&key).await?.is_some();
        if existed {
            store.delete(&key).await?;
            tracing::info!("Removed biometric credential for {}", username);
        }
        Ok(existed)
    }

    /// Usernames with a stored record, for "sign in as" pickers.
    pub async fn registered_usernames(&self) -> Result<Vec<String>, BiometricError> {
        let keys = self.store.lock().await.keys().await?;
        let prefix = self.config.storage_key_prefix.as_str();
        Ok(keys
            .iter()
            .filter_map(|k| k.strip_prefix(prefix))
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn storage_key(&self, username: &str) -> String {
        format!("{}{}", self.config.storage_key_prefix, username)
    }

    fn rp_id(&self) -> Result<String, BiometricError> {
        self.platform
            .origin()
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| BiometricError::Unknown("Origin has no hostname".to_string()))
    }

    async fn load_record(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, BiometricError> {
        let value = self.store.lock().await.get(&self.storage_key(username)).await?;

        let Some(value) = value else {
            return Ok(None);
        };

        match serde_json::from_str::<CredentialRecord>(&value) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable biometric record for {}: {}", username, e);
                Ok(None)
            }
        }
    }
}

fn validate_username(username: &str) -> Result<&str, BiometricError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(BiometricError::Unknown(
            "Username must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

fn log_platform_error(ceremony: &str, err: PlatformError) -> BiometricError {
    match &err {
        PlatformError::NotAllowed(_) | PlatformError::Abort(_) => {
            tracing::info!("Biometric {} was cancelled: {}", ceremony, err);
        }
        _ => {
            tracing::error!("Biometric {} failed: {}", ceremony, err);
        }
    }
    err.into()
}
