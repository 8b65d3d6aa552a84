//! Seam between the helper and the platform public-key credential API.

mod errors;
mod software;
mod types;

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

pub use errors::PlatformError;
pub use software::{SoftwareAuthenticator, UserGesture};
pub use types::{
    AllowCredential, AuthenticatorSelection, COSE_ALG_ES256, COSE_ALG_RS256,
    CredentialCreationOptions, CredentialRequestOptions, PlatformAssertion, PlatformCapabilities,
    PlatformCredential, PubKeyCredParam, RelyingParty, UserEntity,
};

/// The credential API of the environment the helper runs in.
///
/// In a browser this is `window.isSecureContext`, `PublicKeyCredential` and
/// `navigator.credentials`; elsewhere it is whatever bridges to an authenticator.
/// A `None` result from `create`/`get` is the platform resolving with `null`.
#[async_trait]
pub trait CredentialPlatform: Send + Sync + 'static {
    fn capabilities(&self) -> PlatformCapabilities;

    /// Origin of the current execution context. The RP id is derived from its host.
    fn origin(&self) -> &Url;

    async fn is_user_verifying_platform_authenticator_available(&self) -> bool;

    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Option<PlatformCredential>, PlatformError>;

    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Option<PlatformAssertion>, PlatformError>;
}

#[async_trait]
impl<T: CredentialPlatform + ?Sized> CredentialPlatform for Arc<T> {
    fn capabilities(&self) -> PlatformCapabilities {
        (**self).capabilities()
    }

    fn origin(&self) -> &Url {
        (**self).origin()
    }

    async fn is_user_verifying_platform_authenticator_available(&self) -> bool {
        (**self).is_user_verifying_platform_authenticator_available().await
    }

    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Option<PlatformCredential>, PlatformError> {
        (**self).create(options).await
    }

    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Option<PlatformAssertion>, PlatformError> {
        (**self).get(options).await
    }
}
