//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Mutations accept any 2xx and ignore the response body: the screen only
//! trusts what the next list fetch returns.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

const TODOS_PATH: &str = "/api/todos";

/// Stateless client for the `/api/todos` endpoints.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller executes the HTTP round-trip between
/// `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> String {
        format!("{}{TODOS_PATH}", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{TODOS_PATH}/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:5000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = CreateTodo {
            text: "Call dentist".to_string(),
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "Call dentist" }));
    }

    #[test]
    fn build_update_todo_sends_only_completed() {
        let req = client().build_update_todo("1", &UpdateTodo::completed(true)).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5000/api/todos/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn build_update_todo_sends_only_text() {
        let req = client().build_update_todo("abc", &UpdateTodo::text("Updated")).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["text"], "Updated");
        assert!(body.get("completed").is_none());
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo("7");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:5000/api/todos/7");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, r#"[{"id":"1","text":"Buy milk","completed":false}]"#);
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "Buy milk");
    }

    #[test]
    fn parse_list_todos_keeps_server_order() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":"b","text":"second","completed":true},{"id":"a","text":"first","completed":false}]"#,
        );
        let ids: Vec<String> = client()
            .parse_list_todos(response)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn parse_list_todos_server_error() {
        let response = HttpResponse::new(503, "unavailable");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_todo_accepts_any_2xx() {
        assert!(client().parse_create_todo(HttpResponse::new(201, "{}")).is_ok());
        assert!(client().parse_create_todo(HttpResponse::new(200, "")).is_ok());
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[test]
    fn parse_update_todo_ignores_body() {
        assert!(client().parse_update_todo(HttpResponse::new(200, "garbage")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client().parse_delete_todo(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:5000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:5000/api/todos");
    }
}
