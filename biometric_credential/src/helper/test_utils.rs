//! Scriptable platform fake for helper unit tests

use async_trait::async_trait;
use std::sync::Mutex;
use url::Url;

use crate::platform::{
    CredentialCreationOptions, CredentialPlatform, CredentialRequestOptions, PlatformAssertion,
    PlatformCapabilities, PlatformCredential, PlatformError,
};

/// What the fake returns from the next `create`/`get` call.
#[derive(Clone, Debug)]
pub(super) enum Response {
    Succeed,
    Null,
    Fail(PlatformError),
}

pub(super) struct RecordingPlatform {
    origin: Url,
    pub(super) capabilities: PlatformCapabilities,
    pub(super) create_response: Mutex<Response>,
    pub(super) get_response: Mutex<Response>,
    pub(super) created: Mutex<Vec<CredentialCreationOptions>>,
    pub(super) requested: Mutex<Vec<CredentialRequestOptions>>,
    next_id: Mutex<u8>,
}

impl RecordingPlatform {
    pub(super) fn new(origin: &str) -> Self {
        Self {
            origin: Url::parse(origin).expect("valid test origin"),
            capabilities: PlatformCapabilities::full(),
            create_response: Mutex::new(Response::Succeed),
            get_response: Mutex::new(Response::Succeed),
            created: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub(super) fn with_capabilities(mut self, capabilities: PlatformCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub(super) fn respond_to_create(&self, response: Response) {
        *self.create_response.lock().unwrap() = response;
    }

    pub(super) fn respond_to_get(&self, response: Response) {
        *self.get_response.lock().unwrap() = response;
    }

    pub(super) fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub(super) fn get_calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialPlatform for RecordingPlatform {
    fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    async fn is_user_verifying_platform_authenticator_available(&self) -> bool {
        self.capabilities.supports_public_key()
    }

    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Option<PlatformCredential>, PlatformError> {
        self.created.lock().unwrap().push(options);
        let response = self.create_response.lock().unwrap().clone();
        match response {
            Response::Succeed => {
                let mut next_id = self.next_id.lock().unwrap();
                let raw_id = vec![*next_id; 16];
                *next_id += 1;
                Ok(Some(PlatformCredential {
                    raw_id,
                    authenticator_attachment: Some("platform".to_string()),
                }))
            }
            Response::Null => Ok(None),
            Response::Fail(e) => Err(e),
        }
    }

    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Option<PlatformAssertion>, PlatformError> {
        let raw_id = options
            .allow_credentials
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        self.requested.lock().unwrap().push(options);
        let response = self.get_response.lock().unwrap().clone();
        match response {
            Response::Succeed => Ok(Some(PlatformAssertion {
                raw_id,
                authenticator_data: vec![0; 37],
                client_data_json: b"{}".to_vec(),
                signature: vec![0; 64],
                user_handle: None,
            })),
            Response::Null => Ok(None),
            Response::Fail(e) => Err(e),
        }
    }
}
