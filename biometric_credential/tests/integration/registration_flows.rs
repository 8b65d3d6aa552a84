use biometric_credential::{
    BiometricError, CeremonyResult, PlatformCapabilities, UserGesture, base64url_decode,
};

use crate::common::{INSECURE_ORIGIN, SECURE_ORIGIN, TestSetup};

/// Test the full registration flow
///
/// Registering stores a record whose credential id decodes to the raw id the
/// authenticator holds a key for.
#[tokio::test]
async fn test_registration_stores_credential() {
    // Given a supported device
    let setup = TestSetup::new(SECURE_ORIGIN);
    assert!(setup.helper.is_supported());
    assert!(setup.helper.is_platform_authenticator_available().await);
    assert!(!setup.helper.has_registered("alice").await);

    // When alice registers
    let credential_id = setup.helper.register("alice").await.unwrap();

    // Then the record is stored and maps to a key in the authenticator
    assert!(setup.helper.has_registered("alice").await);
    let record = setup
        .helper
        .credential_record("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.credential_id, credential_id);
    assert_eq!(record.username, "alice");

    let raw_id = base64url_decode(&credential_id).unwrap();
    assert_eq!(raw_id.len(), 32);
    assert!(setup.authenticator.public_key(&raw_id).unwrap().is_some());
}

#[tokio::test]
async fn test_registration_on_insecure_origin_is_unsupported() {
    let setup = TestSetup::new(INSECURE_ORIGIN);

    assert!(!setup.helper.is_supported());
    let result = setup.helper.register("alice").await;

    assert_eq!(result, Err(BiometricError::Unsupported));
    assert!(!result.unwrap_err().is_retryable());
    assert_eq!(setup.authenticator.credential_count().unwrap(), 0);
}

#[tokio::test]
async fn test_registration_without_webauthn_is_unsupported() {
    // Given a secure browser without PublicKeyCredential
    let setup = TestSetup::with_capabilities(
        SECURE_ORIGIN,
        PlatformCapabilities {
            public_key_credential: false,
            ..PlatformCapabilities::full()
        },
    );

    // Then registration is unsupported
    assert!(!setup.helper.is_supported());
    assert_eq!(
        setup.helper.register("alice").await,
        Err(BiometricError::Unsupported)
    );
}

#[tokio::test]
async fn test_cancelled_registration_can_be_retried() {
    // Given a user who cancels the first prompt
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.authenticator.set_gesture(UserGesture::Deny).unwrap();

    // When registering
    let err = setup.helper.register("alice").await.unwrap_err();

    // Then it is a recoverable NotAllowed with nothing stored
    assert_eq!(err.code(), "NotAllowed");
    assert!(err.is_retryable());
    assert!(!setup.helper.has_registered("alice").await);

    // And approving on retry succeeds
    setup.authenticator.set_gesture(UserGesture::Approve).unwrap();
    setup.helper.register("alice").await.unwrap();
    assert!(setup.helper.has_registered("alice").await);
}

#[tokio::test]
async fn test_timed_out_registration_is_not_allowed() {
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.authenticator.set_gesture(UserGesture::Timeout).unwrap();

    let result = CeremonyResult::from(setup.helper.register("alice").await);

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("NotAllowed"));
}

#[tokio::test]
async fn test_reregistration_overwrites_record() {
    // Given alice registered on this device
    let setup = TestSetup::new(SECURE_ORIGIN);
    let first = setup.helper.register("alice").await.unwrap();

    // When she registers again
    let second = setup.helper.register("alice").await.unwrap();

    // Then a single record points at the new credential
    assert_ne!(first, second);
    assert_eq!(
        setup.helper.registered_usernames().await.unwrap(),
        vec!["alice".to_string()]
    );
    let record = setup
        .helper
        .credential_record("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.credential_id, second);
}

#[tokio::test]
async fn test_successful_registration_result_shape() {
    let setup = TestSetup::new(SECURE_ORIGIN);

    let result = CeremonyResult::from(setup.helper.register("alice").await);

    assert!(result.success);
    assert!(result.credential_id.is_some());
    assert!(result.error.is_none());
}
