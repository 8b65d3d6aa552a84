use biometric_credential::{BiometricError, CeremonyResult, PlatformCapabilities, UserGesture};

use crate::common::{SECURE_ORIGIN, TestSetup, helper_with_record};

/// Test the wallet sign-in scenario
///
/// alice registers and signs in; bob never registered and gets NoCredential.
#[tokio::test]
async fn test_register_then_authenticate_example() {
    let setup = TestSetup::new(SECURE_ORIGIN);

    setup.helper.register("alice").await.unwrap();
    assert!(setup.helper.has_registered("alice").await);
    setup.helper.authenticate("alice").await.unwrap();

    let bob = CeremonyResult::from(setup.helper.authenticate("bob").await);
    let json = serde_json::to_value(&bob).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "NoCredential");
}

#[tokio::test]
async fn test_authenticate_before_registration_is_no_credential() {
    let setup = TestSetup::new(SECURE_ORIGIN);

    assert!(!setup.helper.has_registered("carol").await);
    let result = setup.helper.authenticate("carol").await;

    assert_eq!(
        result,
        Err(BiometricError::NoCredential("carol".to_string()))
    );
}

#[tokio::test]
async fn test_denied_authentication_is_recoverable() {
    // Given alice registered
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.helper.register("alice").await.unwrap();

    // When she dismisses the sign-in prompt
    setup.authenticator.set_gesture(UserGesture::Deny).unwrap();
    let err = setup.helper.authenticate("alice").await.unwrap_err();

    // Then it is NotAllowed, and a retry with approval succeeds
    assert!(matches!(err, BiometricError::NotAllowed(_)));
    assert!(err.is_retryable());
    setup.authenticator.set_gesture(UserGesture::Approve).unwrap();
    setup.helper.authenticate("alice").await.unwrap();
}

#[tokio::test]
async fn test_authentication_on_another_device_is_not_allowed() {
    // Given alice's record copied to a device that never saw her key pair
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.helper.register("alice").await.unwrap();
    let record = setup
        .helper
        .credential_record("alice")
        .await
        .unwrap()
        .unwrap();
    let other_device = TestSetup::new(SECURE_ORIGIN);
    let helper = helper_with_record(other_device.authenticator.clone(), &record).await;

    // When authenticating there
    let result = helper.authenticate("alice").await;

    // Then the platform finds no allowed credential
    assert!(matches!(result, Err(BiometricError::NotAllowed(_))));
}

#[tokio::test]
async fn test_authentication_after_losing_support() {
    // Given a registration made while supported
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.helper.register("alice").await.unwrap();
    let record = setup
        .helper
        .credential_record("alice")
        .await
        .unwrap()
        .unwrap();

    // And the same record seen from a context that is no longer secure
    let degraded = TestSetup::with_capabilities(
        SECURE_ORIGIN,
        PlatformCapabilities {
            secure_context: false,
            ..PlatformCapabilities::full()
        },
    );
    let helper = helper_with_record(degraded.authenticator.clone(), &record).await;

    // Then the record is visible but authentication is Unsupported
    assert!(helper.has_registered("alice").await);
    assert_eq!(
        helper.authenticate("alice").await,
        Err(BiometricError::Unsupported)
    );
}

#[tokio::test]
async fn test_unregister_removes_sign_in() {
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.helper.register("alice").await.unwrap();

    assert!(setup.helper.unregister("alice").await.unwrap());

    assert!(!setup.helper.has_registered("alice").await);
    assert!(matches!(
        setup.helper.authenticate("alice").await,
        Err(BiometricError::NoCredential(_))
    ));
}

#[tokio::test]
async fn test_ceremony_can_be_bounded_by_caller_timeout() {
    let setup = TestSetup::new(SECURE_ORIGIN);
    setup.helper.register("alice").await.unwrap();

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        setup.helper.authenticate("alice"),
    )
    .await;

    assert!(matches!(result, Ok(Ok(()))));
}
