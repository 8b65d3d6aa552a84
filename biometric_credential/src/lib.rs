//! biometric_credential - WebAuthn biometric sign-in helper for the campus meal-card wallet
//!
//! This crate wraps a platform public-key credential API (WebAuthn) to register a
//! per-username biometric credential, authenticate against it later, and keep the
//! username to credential-id mapping in a local key-value store. Both the platform
//! and the store are injected through traits.

mod config;
mod helper;
mod platform;
mod storage;
mod utils;

pub use config::HelperConfig;

pub use helper::{BiometricCredentialHelper, BiometricError, CeremonyResult, CredentialRecord};

pub use platform::{
    AllowCredential, AuthenticatorSelection, COSE_ALG_ES256, COSE_ALG_RS256,
    CredentialCreationOptions, CredentialPlatform, CredentialRequestOptions, PlatformAssertion,
    PlatformCapabilities, PlatformCredential, PlatformError, PubKeyCredParam, RelyingParty,
    SoftwareAuthenticator, UserEntity, UserGesture,
};

pub use storage::{
    InMemoryKeyValueStore, KeyValueStore, RedisKeyValueStore, StorageError, store_from_env,
};

pub use utils::{UtilError, base64url_decode, base64url_encode};

/// Build a helper from environment configuration
///
/// Selects the key-value store from `BIOMETRIC_STORE_TYPE`/`BIOMETRIC_STORE_URL`
/// and reads ceremony parameters from the `BIOMETRIC_*` variables.
pub async fn init(
    platform: Box<dyn CredentialPlatform>,
) -> Result<BiometricCredentialHelper, StorageError> {
    let store = store_from_env().await?;
    Ok(BiometricCredentialHelper::new(platform, store))
}
