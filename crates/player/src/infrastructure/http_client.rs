//! HTTP client for the form service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use formwalk_domain::FormSchema;
use formwalk_shared::{CreateUserRequest, CreateUserResponse, FormResponse};

use crate::ports::outbound::{FetchError, FormSourcePort, IdentityError, IdentityPort};
use crate::session_types::SessionKey;

/// Default form service base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://dynamic-form-generator-9rl7.onrender.com";

/// Default request timeout. The hosted service can take a while to wake up.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client for `get-form` and `create-user`.
#[derive(Clone)]
pub struct HttpFormApi {
    client: Client,
    base_url: String,
}

impl HttpFormApi {
    pub fn new(base_url: &Url) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn form_url(&self, session_key: &SessionKey) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/get-form", self.base_url),
            &[("rollNumber", session_key.as_str())],
        )
    }

    fn create_user_url(&self) -> String {
        format!("{}/create-user", self.base_url)
    }
}

#[async_trait]
impl FormSourcePort for HttpFormApi {
    async fn fetch_form(&self, session_key: SessionKey) -> Result<FormSchema, FetchError> {
        let url = self
            .form_url(&session_key)
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;
        tracing::debug!(url = %url, "GET form");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: FormResponse = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        body.into_schema()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl IdentityPort for HttpFormApi {
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, IdentityError> {
        let response = self
            .client
            .post(self.create_user_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| IdentityError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::RequestFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(CreateUserResponse::default());
        }
        serde_json::from_str(&text).map_err(|e| IdentityError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpFormApi {
        HttpFormApi::new(&Url::parse(base).unwrap())
    }

    #[test]
    fn form_url_encodes_the_roll_number() {
        let api = api("https://forms.example.com/");
        let key = SessionKey::new("RA 01&x").unwrap();
        assert_eq!(
            api.form_url(&key).unwrap().as_str(),
            "https://forms.example.com/get-form?rollNumber=RA+01%26x"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let api = api("https://example.com/api/v1/");
        assert_eq!(api.base_url(), "https://example.com/api/v1");
        assert_eq!(api.create_user_url(), "https://example.com/api/v1/create-user");
    }
}
