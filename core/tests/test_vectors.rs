//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo};

const BASE_URL: &str = "http://localhost:5000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request_line(name: &str, req: &HttpRequest, expected_req: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
}

/// Check headers and JSON body of a request that carries one.
fn assert_json_body(name: &str, req: &HttpRequest, expected_req: &serde_json::Value) {
    let expected_headers: Vec<(String, String)> = expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(req_body, expected_req["body"], "{name}: body");
}

fn assert_outcome<T: std::fmt::Debug>(name: &str, case: &serde_json::Value, result: Result<T, ApiError>) -> Option<T> {
    match case.get("expected_error") {
        Some(expected_error) => {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            None
        }
        None => Some(result.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"))),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_todos();
        assert_request_line(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");
        assert!(req.headers.is_empty(), "{name}: headers should be empty");

        if let Some(todos) = assert_outcome(name, case, c.parse_list_todos(simulated_response(case))) {
            let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todos, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_todo(&input).unwrap();
        assert_request_line(name, &req, &case["expected_request"]);
        assert_json_body(name, &req, &case["expected_request"]);

        assert_outcome(name, case, c.parse_create_todo(simulated_response(case)));
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_todo(id, &input).unwrap();
        assert_request_line(name, &req, &case["expected_request"]);
        assert_json_body(name, &req, &case["expected_request"]);

        assert_outcome(name, case, c.parse_update_todo(simulated_response(case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_delete_todo(id);
        assert_request_line(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        assert_outcome(name, case, c.parse_delete_todo(simulated_response(case)));
    }
}
