use super::*;
use futures::channel::oneshot;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use taskflow_shared::protocol::{DashboardRequest, LoginRequest};

// =========================================================
// Shared Mock Transport
// =========================================================

enum Scripted {
    Ready(Result<RawResponse, ApiError>),
    Wait(oneshot::Receiver<Result<RawResponse, ApiError>>),
}

/// Scripted transport double: responses are consumed in dispatch order,
/// every dispatch is recorded so tests can assert call sequences.
pub(crate) struct MockTransport {
    calls: RefCell<Vec<String>>,
    bodies: RefCell<Vec<Option<String>>>,
    pub csrf_refreshes: Cell<u32>,
    pub fail_csrf: Cell<bool>,
    responses: RefCell<VecDeque<Scripted>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            bodies: RefCell::new(Vec::new()),
            csrf_refreshes: Cell::new(0),
            fail_csrf: Cell::new(false),
            responses: RefCell::new(VecDeque::new()),
        }
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(RawResponse {
                status,
                body: body.to_string(),
            })));
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(RawResponse {
                status,
                body: body.to_string(),
            })));
    }

    pub fn push_network_error(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Scripted::Ready(Err(ApiError::Network(message.to_string()))));
    }

    /// Script a response whose arrival the test controls through the sender.
    pub fn push_pending(&self) -> oneshot::Sender<Result<RawResponse, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.responses.borrow_mut().push_back(Scripted::Wait(rx));
        tx
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn sent_bodies(&self) -> Vec<Option<String>> {
        self.bodies.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        form_body: Option<String>,
    ) -> Result<RawResponse, ApiError> {
        self.calls
            .borrow_mut()
            .push(format!("{} {}", method.as_str(), path));
        self.bodies.borrow_mut().push(form_body);

        let scripted = self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("dispatch without a scripted response");

        match scripted {
            Scripted::Ready(result) => result,
            Scripted::Wait(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("response sender dropped".into()))),
        }
    }

    async fn refresh_csrf(&self) -> Result<(), ApiError> {
        self.csrf_refreshes.set(self.csrf_refreshes.get() + 1);
        if self.fail_csrf.get() {
            Err(ApiError::Network("csrf endpoint unreachable".into()))
        } else {
            Ok(())
        }
    }
}

// =========================================================
// Protocol dispatch
// =========================================================

#[test]
fn send_parses_successful_response() {
    let mock = MockTransport::new();
    mock.push_json(
        200,
        serde_json::json!({ "team_members": [], "team_tasks": [] }),
    );

    let data = block_on(send(&mock, &DashboardRequest)).unwrap();
    assert!(data.team_tasks.is_empty());
    assert_eq!(mock.call_log(), vec!["GET /dashboard/"]);
    assert_eq!(mock.sent_bodies(), vec![None]);
}

#[test]
fn send_posts_form_encoded_body() {
    let mock = MockTransport::new();
    mock.push_json(
        200,
        serde_json::json!({
            "member_name": "Alice A",
            "member_username": "alice",
            "is_admin": true
        }),
    );

    let request = LoginRequest {
        username: "alice".to_string(),
        password: "pw123".to_string(),
    };
    let session = block_on(send(&mock, &request)).unwrap();
    assert!(session.is_admin);
    assert_eq!(mock.call_log(), vec!["POST /login/"]);
    assert_eq!(
        mock.sent_bodies(),
        vec![Some("username=alice&password=pw123".to_string())]
    );
}

#[test]
fn send_extracts_backend_error_field() {
    let mock = MockTransport::new();
    mock.push_json(401, serde_json::json!({ "error": "Invalid credentials" }));

    let err = block_on(send(
        &mock,
        &LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        },
    ))
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::Backend {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }
    );
    assert_eq!(error_message(&err, "Login failed"), "Invalid credentials");
}

#[test]
fn send_falls_back_when_error_field_is_absent() {
    let mock = MockTransport::new();
    mock.push_raw(500, "<html>Server Error</html>");

    let err = block_on(send(&mock, &DashboardRequest)).unwrap_err();
    assert_eq!(
        err,
        ApiError::Backend {
            status: 500,
            message: None,
        }
    );
    assert_eq!(
        error_message(&err, "Failed to fetch tasks"),
        "Failed to fetch tasks"
    );
}

#[test]
fn send_reports_undecodable_success_body() {
    let mock = MockTransport::new();
    mock.push_raw(200, "not json");

    let err = block_on(send(&mock, &DashboardRequest)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn network_errors_use_their_own_text() {
    let mock = MockTransport::new();
    mock.push_network_error("Failed to fetch");

    let err = block_on(send(&mock, &DashboardRequest)).unwrap_err();
    assert_eq!(
        error_message(&err, "Failed to fetch tasks"),
        "network error: Failed to fetch"
    );
}

#[test]
fn base_url_join_handles_slashes() {
    let api = TaskflowApi::with_base_url("https://taskflow.example/");
    assert_eq!(api.url("/login/"), "https://taskflow.example/login/");
    assert_eq!(api.url("login/"), "https://taskflow.example/login/");

    let same_origin = TaskflowApi::new();
    assert_eq!(same_origin.url("/dashboard/"), "/dashboard/");
}
