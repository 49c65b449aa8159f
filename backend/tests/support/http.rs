//! Request helpers running the full route table against a [`Backend`].

use actix_web::http::Method;
use actix_web::{App, test};
use serde_json::Value;

use reelmark::Trace;
use reelmark::inbound::http;

use super::in_memory::Backend;

/// Status and decoded JSON body of one response.
pub struct Reply {
    pub status: u16,
    pub body: Value,
    pub trace_id: Option<String>,
}

/// Send one request through a freshly initialised app sharing `backend`'s state.
pub async fn send(
    backend: &Backend,
    method: Method,
    path: &str,
    token: Option<&str>,
    payload: Option<Value>,
) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(backend.state.clone())
            .wrap(Trace)
            .configure(http::configure),
    )
    .await;

    let mut request = test::TestRequest::default().method(method).uri(path);
    if let Some(token) = token {
        request = request.insert_header(("Authorization", format!("Bearer {token}")));
    }
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }

    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    Reply {
        status,
        body,
        trace_id,
    }
}

/// Register and sign in a user, returning the bearer token and user id.
pub async fn signed_in(backend: &Backend, email: &str) -> (String, String) {
    let registered = send(
        backend,
        Method::POST,
        "/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": "secret123",
            "name": "Ada",
            "lastname": "Lovelace"
        })),
    )
    .await;
    assert_eq!(registered.status, 201, "register: {}", registered.body);

    let login = send(
        backend,
        Method::POST,
        "/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(login.status, 200, "login: {}", login.body);
    let token = login.body["token"].as_str().expect("token").to_owned();
    let user_id = login.body["user"]["id"].as_str().expect("user id").to_owned();
    (token, user_id)
}
