//! Blocking HTTP execution with ureq.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

/// Executes `HttpRequest`s built by `todo-core`.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses come
/// back as data and the core decides what they mean. Only failures to
/// complete the round-trip become `ApiError::Transport`. No timeout is set.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let agent = &self.agent;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, path = %req.path, "response received");
        Ok(HttpResponse::new(status, body))
    }
}
