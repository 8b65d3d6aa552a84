use crate::config::HelperConfig;
use crate::platform::{
    AllowCredential, AuthenticatorSelection, COSE_ALG_ES256, COSE_ALG_RS256,
    CredentialCreationOptions, CredentialRequestOptions, PubKeyCredParam, RelyingParty,
    UserEntity,
};

pub(super) const CHALLENGE_LEN: usize = 32;
pub(super) const USER_HANDLE_LEN: usize = 32;

pub(super) fn registration_options(
    config: &HelperConfig,
    rp_id: &str,
    username: &str,
    challenge: Vec<u8>,
    user_handle: Vec<u8>,
) -> CredentialCreationOptions {
    CredentialCreationOptions {
        challenge,
        rp: RelyingParty {
            name: config.rp_name.clone().unwrap_or_else(|| rp_id.to_string()),
            id: rp_id.to_string(),
        },
        user: UserEntity {
            id: user_handle,
            name: username.to_string(),
            display_name: username.to_string(),
        },
        pub_key_cred_params: vec![
            PubKeyCredParam::public_key(COSE_ALG_ES256),
            PubKeyCredParam::public_key(COSE_ALG_RS256),
        ],
        authenticator_selection: AuthenticatorSelection {
            authenticator_attachment: config.authenticator_attachment.clone(),
            user_verification: config.user_verification.clone(),
        },
        timeout: config.timeout_millis(),
        attestation: "none".to_string(),
    }
}

pub(super) fn authentication_options(
    config: &HelperConfig,
    rp_id: &str,
    credential_id: Vec<u8>,
    challenge: Vec<u8>,
) -> CredentialRequestOptions {
    CredentialRequestOptions {
        challenge,
        timeout: config.timeout_millis(),
        rp_id: rp_id.to_string(),
        allow_credentials: vec![AllowCredential {
            type_: "public-key".to_string(),
            id: credential_id,
        }],
        user_verification: config.user_verification.clone(),
    }
}
