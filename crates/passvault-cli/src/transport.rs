use async_trait::async_trait;
use passvault_client_core::api::{
    ApiResponse, ApiTransport, HttpMethod, HttpRequestPlan, TransportError, bearer_header_value,
};
use reqwest::header::AUTHORIZATION;

/// Executes request plans against `base_url`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("passvault-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn execute(
        &self,
        plan: &HttpRequestPlan,
        bearer_token: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&plan.path);
        let mut request = match plan.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        if let Some(token) = bearer_token {
            request = request.header(AUTHORIZATION, bearer_header_value(token));
        }
        if let Some(body) = plan.body.as_ref() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| TransportError::new(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(format!("response body read failed: {error}")))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::ReqwestTransport;

    #[test]
    fn url_for_joins_base_and_path() {
        let transport = ReqwestTransport::new("http://127.0.0.1:8000").expect("client");
        assert_eq!(
            transport.url_for("/passwords/3"),
            "http://127.0.0.1:8000/passwords/3"
        );
        let trailing = ReqwestTransport::new("https://vault.example.com/").expect("client");
        assert_eq!(
            trailing.url_for("/auth/login"),
            "https://vault.example.com/auth/login"
        );
    }
}
