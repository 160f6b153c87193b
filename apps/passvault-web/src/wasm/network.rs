use async_trait::async_trait;
use gloo_net::http::Request;
use passvault_client_core::api::{
    ApiResponse, ApiTransport, HttpMethod, HttpRequestPlan, TransportError, bearer_header_value,
};

/// Same-origin `fetch` transport.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct GlooTransport;

#[async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn execute(
        &self,
        plan: &HttpRequestPlan,
        bearer_token: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let mut request_builder = match plan.method {
            HttpMethod::Get => Request::get(&plan.path),
            HttpMethod::Post => Request::post(&plan.path),
            HttpMethod::Delete => Request::delete(&plan.path),
        };

        if let Some(token) = bearer_token {
            request_builder =
                request_builder.header("authorization", &bearer_header_value(token));
        }

        let response = if let Some(body) = plan.body.as_ref() {
            let body = serde_json::to_string(body).map_err(|error| {
                TransportError::new(format!("failed to serialize request body: {error}"))
            })?;
            let request = request_builder
                .header("content-type", "application/json")
                .body(body)
                .map_err(map_network_error)?;
            request.send().await.map_err(map_network_error)?
        } else {
            request_builder.send().await.map_err(map_network_error)?
        };

        let status = response.status();
        let body = response.text().await.map_err(map_network_error)?;
        Ok(ApiResponse { status, body })
    }
}

fn map_network_error(error: gloo_net::Error) -> TransportError {
    TransportError::new(error.to_string())
}
