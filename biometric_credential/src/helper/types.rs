use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::BiometricError;

/// Persisted mapping from a username to its platform credential.
///
/// Serialized as `{"credentialId", "username", "createdAt"}` with an RFC 3339 timestamp.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Base64url (unpadded) credential identifier
    pub credential_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a ceremony in the shape UI code consumes.
///
/// `{"success": true, "credentialId": "..."}` or `{"success": false, "error": "NotAllowed"}`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable detail for the error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CeremonyResult {
    fn failure(err: &BiometricError) -> Self {
        Self {
            success: false,
            credential_id: None,
            error: Some(err.code().to_string()),
            message: Some(err.to_string()),
        }
    }
}

impl From<Result<String, BiometricError>> for CeremonyResult {
    fn from(result: Result<String, BiometricError>) -> Self {
        match result {
            Ok(credential_id) => Self {
                success: true,
                credential_id: Some(credential_id),
                error: None,
                message: None,
            },
            Err(e) => Self::failure(&e),
        }
    }
}

impl From<Result<(), BiometricError>> for CeremonyResult {
    fn from(result: Result<(), BiometricError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                credential_id: None,
                error: None,
                message: None,
            },
            Err(e) => Self::failure(&e),
        }
    }
}
