use serde::Serialize;

use crate::utils::serialize_base64url;

/// COSE algorithm identifier for ECDSA with P-256 and SHA-256.
pub const COSE_ALG_ES256: i32 = -7;
/// COSE algorithm identifier for RSASSA-PKCS1-v1_5 with SHA-256.
pub const COSE_ALG_RS256: i32 = -257;

/// What the execution context exposes, the equivalent of probing `window` and
/// `navigator.credentials` in a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Whether the page runs on a secure origin (https or localhost)
    pub secure_context: bool,
    /// Whether `PublicKeyCredential` is defined
    pub public_key_credential: bool,
    /// Whether `navigator.credentials.create` is callable
    pub credentials_create: bool,
    /// Whether `navigator.credentials.get` is callable
    pub credentials_get: bool,
}

impl PlatformCapabilities {
    pub fn full() -> Self {
        Self {
            secure_context: true,
            public_key_credential: true,
            credentials_create: true,
            credentials_get: true,
        }
    }

    pub fn none() -> Self {
        Self {
            secure_context: false,
            public_key_credential: false,
            credentials_create: false,
            credentials_get: false,
        }
    }

    /// True only when a secure context exposes both creation and retrieval.
    pub fn supports_public_key(&self) -> bool {
        self.secure_context
            && self.public_key_credential
            && self.credentials_create
            && self.credentials_get
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RelyingParty {
    pub name: String,
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// Random user handle, never the username itself
    #[serde(serialize_with = "serialize_base64url")]
    pub id: Vec<u8>,
    pub name: String,
    pub display_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PubKeyCredParam {
    #[serde(rename = "type")]
    pub type_: String,
    pub alg: i32,
}

impl PubKeyCredParam {
    pub(crate) fn public_key(alg: i32) -> Self {
        Self {
            type_: "public-key".to_string(),
            alg,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    pub authenticator_attachment: String,
    pub user_verification: String,
}

/// Options for `navigator.credentials.create({ publicKey })`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptions {
    #[serde(serialize_with = "serialize_base64url")]
    pub challenge: Vec<u8>,
    pub rp: RelyingParty,
    pub user: UserEntity,
    pub pub_key_cred_params: Vec<PubKeyCredParam>,
    pub authenticator_selection: AuthenticatorSelection,
    /// Milliseconds
    pub timeout: u32,
    pub attestation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AllowCredential {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(serialize_with = "serialize_base64url")]
    pub id: Vec<u8>,
}

/// Options for `navigator.credentials.get({ publicKey })`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptions {
    #[serde(serialize_with = "serialize_base64url")]
    pub challenge: Vec<u8>,
    /// Milliseconds
    pub timeout: u32,
    pub rp_id: String,
    pub allow_credentials: Vec<AllowCredential>,
    pub user_verification: String,
}

/// A newly created public-key credential as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCredential {
    pub raw_id: Vec<u8>,
    pub authenticator_attachment: Option<String>,
}

/// An assertion produced by the platform for an authentication ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformAssertion {
    pub raw_id: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}
