use async_trait::async_trait;
use ring::digest;
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_ASN1_SIGNING, EcdsaKeyPair, KeyPair};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use url::Url;

use super::errors::PlatformError;
use super::types::{
    COSE_ALG_ES256, CredentialCreationOptions, CredentialRequestOptions, PlatformAssertion,
    PlatformCapabilities, PlatformCredential,
};
use super::CredentialPlatform;
use crate::utils::{base64url_encode, gen_random_bytes};

const CREDENTIAL_ID_LEN: usize = 32;

// User present + user verified
const AUTH_DATA_FLAGS: u8 = 0x01 | 0x04;

const NOT_ALLOWED_MESSAGE: &str = "The operation either timed out or was not allowed.";

/// How the simulated user answers the next biometric prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserGesture {
    #[default]
    Approve,
    Deny,
    Timeout,
}

struct SoftwareCredential {
    rp_id: String,
    user_handle: Vec<u8>,
    pkcs8: Vec<u8>,
    public_key: Vec<u8>,
    counter: u32,
}

/// In-process platform authenticator backed by ECDSA P-256 keys.
///
/// Behaves like a browser with a built-in biometric authenticator: it scopes
/// credentials to the RP id, requires a matching allow-list entry on assertion,
/// and reports denial as `NotAllowed`.
pub struct SoftwareAuthenticator {
    origin: Url,
    capabilities: PlatformCapabilities,
    platform_authenticator: bool,
    gesture: Mutex<UserGesture>,
    credentials: Mutex<HashMap<Vec<u8>, SoftwareCredential>>,
    rng: SystemRandom,
}

impl SoftwareAuthenticator {
    pub fn new(origin: &str) -> Result<Self, PlatformError> {
        let origin = Url::parse(origin).map_err(|e| PlatformError::Other {
            name: "SyntaxError".to_string(),
            message: format!("Invalid origin {origin}: {e}"),
        })?;

        let capabilities = PlatformCapabilities {
            secure_context: is_secure_origin(&origin),
            ..PlatformCapabilities::full()
        };

        tracing::debug!(
            "Software authenticator for {} (secure context: {})",
            origin,
            capabilities.secure_context
        );

        Ok(Self {
            origin,
            capabilities,
            platform_authenticator: true,
            gesture: Mutex::new(UserGesture::default()),
            credentials: Mutex::new(HashMap::new()),
            rng: SystemRandom::new(),
        })
    }

    /// Overrides the detected capabilities, e.g. to model a browser without WebAuthn.
    pub fn with_capabilities(mut self, capabilities: PlatformCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Models a device with WebAuthn but no built-in biometric sensor.
    pub fn without_platform_authenticator(mut self) -> Self {
        self.platform_authenticator = false;
        self
    }

    pub fn set_gesture(&self, gesture: UserGesture) -> Result<(), PlatformError> {
        *lock(&self.gesture)? = gesture;
        Ok(())
    }

    pub fn credential_count(&self) -> Result<usize, PlatformError> {
        Ok(lock(&self.credentials)?.len())
    }

    /// SEC1 public key of a credential, for verifying assertions it produced.
    pub fn public_key(&self, raw_id: &[u8]) -> Result<Option<Vec<u8>>, PlatformError> {
        Ok(lock(&self.credentials)?
            .get(raw_id)
            .map(|c| c.public_key.clone()))
    }

    fn await_gesture(&self) -> Result<(), PlatformError> {
        match *lock(&self.gesture)? {
            UserGesture::Approve => Ok(()),
            UserGesture::Deny => {
                tracing::debug!("Simulated user denied the prompt");
                Err(PlatformError::NotAllowed(NOT_ALLOWED_MESSAGE.to_string()))
            }
            UserGesture::Timeout => {
                tracing::debug!("Simulated prompt timed out");
                Err(PlatformError::NotAllowed(NOT_ALLOWED_MESSAGE.to_string()))
            }
        }
    }

    fn check_rp_id(&self, rp_id: &str) -> Result<(), PlatformError> {
        let host = self.origin.host_str().unwrap_or_default();
        if host == rp_id || host.ends_with(&format!(".{rp_id}")) {
            Ok(())
        } else {
            Err(PlatformError::Security(format!(
                "The relying party ID '{rp_id}' is not a registrable domain suffix of '{host}'"
            )))
        }
    }

    fn client_data_json(&self, type_: &str, challenge: &[u8]) -> Result<Vec<u8>, PlatformError> {
        let client_data = serde_json::json!({
            "type": type_,
            "challenge": base64url_encode(challenge),
            "origin": self.origin.origin().ascii_serialization(),
            "crossOrigin": false,
        });
        serde_json::to_vec(&client_data).map_err(|e| PlatformError::Other {
            name: "EncodingError".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CredentialPlatform for SoftwareAuthenticator {
    fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    async fn is_user_verifying_platform_authenticator_available(&self) -> bool {
        self.capabilities.supports_public_key() && self.platform_authenticator
    }

    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Option<PlatformCredential>, PlatformError> {
        self.check_rp_id(&options.rp.id)?;

        if !options
            .pub_key_cred_params
            .iter()
            .any(|p| p.type_ == "public-key" && p.alg == COSE_ALG_ES256)
        {
            return Err(PlatformError::NotSupported(
                "None of the requested algorithms are supported".to_string(),
            ));
        }

        if options.authenticator_selection.authenticator_attachment == "cross-platform" {
            tracing::debug!("Cross-platform authenticator requested; none attached");
            return Err(PlatformError::NotAllowed(NOT_ALLOWED_MESSAGE.to_string()));
        }

        self.await_gesture()?;

        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &self.rng)
            .map_err(|_| PlatformError::Other {
                name: "UnknownError".to_string(),
                message: "Failed to generate key pair".to_string(),
            })?;
        let key_pair = load_key_pair(pkcs8.as_ref(), &self.rng)?;

        let raw_id = gen_random_bytes(CREDENTIAL_ID_LEN).map_err(|e| PlatformError::Other {
            name: "UnknownError".to_string(),
            message: e.to_string(),
        })?;

        let credential = SoftwareCredential {
            rp_id: options.rp.id.clone(),
            user_handle: options.user.id.clone(),
            pkcs8: pkcs8.as_ref().to_vec(),
            public_key: key_pair.public_key().as_ref().to_vec(),
            counter: 0,
        };
        lock(&self.credentials)?.insert(raw_id.clone(), credential);

        tracing::debug!(
            "Created credential {} for {}",
            base64url_encode(&raw_id),
            options.user.name
        );

        Ok(Some(PlatformCredential {
            raw_id,
            authenticator_attachment: Some("platform".to_string()),
        }))
    }

    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Option<PlatformAssertion>, PlatformError> {
        self.check_rp_id(&options.rp_id)?;
        self.await_gesture()?;

        let client_data_json = self.client_data_json("webauthn.get", &options.challenge)?;

        let mut credentials = lock(&self.credentials)?;
        let allowed = |id: &Vec<u8>| {
            options.allow_credentials.is_empty()
                || options.allow_credentials.iter().any(|c| &c.id == id)
        };
        let (raw_id, credential) = credentials
            .iter_mut()
            .find(|(id, c)| c.rp_id == options.rp_id && allowed(*id))
            .ok_or_else(|| {
                tracing::debug!("No allowed credential for {}", options.rp_id);
                PlatformError::NotAllowed(NOT_ALLOWED_MESSAGE.to_string())
            })?;

        credential.counter = credential.counter.wrapping_add(1);

        let mut authenticator_data =
            digest::digest(&digest::SHA256, credential.rp_id.as_bytes())
                .as_ref()
                .to_vec();
        authenticator_data.push(AUTH_DATA_FLAGS);
        authenticator_data.extend_from_slice(&credential.counter.to_be_bytes());

        let client_data_hash = digest::digest(&digest::SHA256, &client_data_json);
        let mut signed_data = authenticator_data.clone();
        signed_data.extend_from_slice(client_data_hash.as_ref());

        let key_pair = load_key_pair(&credential.pkcs8, &self.rng)?;
        let signature = key_pair
            .sign(&self.rng, &signed_data)
            .map_err(|_| PlatformError::Other {
                name: "UnknownError".to_string(),
                message: "Failed to sign assertion".to_string(),
            })?;

        Ok(Some(PlatformAssertion {
            raw_id: raw_id.clone(),
            authenticator_data,
            client_data_json,
            signature: signature.as_ref().to_vec(),
            user_handle: Some(credential.user_handle.clone()),
        }))
    }
}

fn is_secure_origin(origin: &Url) -> bool {
    match origin.scheme() {
        "https" | "wss" => true,
        "http" | "ws" => matches!(
            origin.host_str(),
            Some("localhost" | "127.0.0.1" | "[::1]")
        ) || origin
            .host_str()
            .is_some_and(|h| h.ends_with(".localhost")),
        _ => false,
    }
}

fn load_key_pair(pkcs8: &[u8], rng: &SystemRandom) -> Result<EcdsaKeyPair, PlatformError> {
    EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8, rng).map_err(|e| {
        PlatformError::Other {
            name: "UnknownError".to_string(),
            message: format!("Invalid key material: {e}"),
        }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PlatformError> {
    mutex.lock().map_err(|_| PlatformError::Other {
        name: "UnknownError".to_string(),
        message: "Authenticator state poisoned".to_string(),
    })
}
