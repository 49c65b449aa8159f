//! Behavioural tests for rating submission over HTTP.
//!
//! Steps are synchronous, so the world owns an Actix system runner and
//! drives each request to completion on it.

mod support;

use std::cell::RefCell;

use actix_web::http::Method;
use actix_web::rt::SystemRunner;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use support::http::{Reply, send, signed_in};
use support::in_memory::Backend;

pub struct RatingWorld {
    runner: SystemRunner,
    backend: Backend,
    token: RefCell<Option<String>>,
    last: RefCell<Option<Reply>>,
}

impl RatingWorld {
    fn request(&self, method: Method, path: &str, payload: Option<Value>) {
        let token = self.token.borrow().clone();
        let reply = self
            .runner
            .block_on(send(&self.backend, method, path, token.as_deref(), payload));
        self.last.replace(Some(reply));
    }

    fn last_body(&self) -> Value {
        self.last
            .borrow()
            .as_ref()
            .map(|reply| reply.body.clone())
            .expect("a request was sent")
    }

    fn last_status(&self) -> u16 {
        self.last
            .borrow()
            .as_ref()
            .map(|reply| reply.status)
            .expect("a request was sent")
    }
}

#[fixture]
fn world() -> RatingWorld {
    RatingWorld {
        runner: actix_web::rt::System::new(),
        backend: Backend::new(),
        token: RefCell::new(None),
        last: RefCell::new(None),
    }
}

#[given("a signed-in viewer")]
fn a_signed_in_viewer(world: &RatingWorld) {
    let (token, _) = world
        .runner
        .block_on(signed_in(&world.backend, "viewer@example.com"));
    world.token.replace(Some(token));
}

#[given("a backend with no signed-in viewer")]
fn a_backend_with_no_signed_in_viewer(world: &RatingWorld) {
    assert!(world.token.borrow().is_none());
}

#[when("the viewer rates content {content} with puntuacion {score}")]
fn the_viewer_rates_content(world: &RatingWorld, content: String, score: i64) {
    world.request(
        Method::POST,
        "/ratings",
        Some(json!({ "id_contenido": content.trim_matches('"'), "puntuacion": score })),
    );
    assert_eq!(world.last_status(), 200);
}

#[when("the viewer comments {comment} on content {content}")]
fn the_viewer_comments_on_content(world: &RatingWorld, comment: String, content: String) {
    world.request(
        Method::POST,
        "/ratings",
        Some(json!({
            "id_contenido": content.trim_matches('"'),
            "comentario": comment.trim_matches('"')
        })),
    );
}

#[when("an anonymous client lists its ratings")]
fn an_anonymous_client_lists_its_ratings(world: &RatingWorld) {
    world.request(Method::GET, "/ratings/my-ratings", None);
}

#[then("the response reports an updated rating")]
fn the_response_reports_an_updated_rating(world: &RatingWorld) {
    assert_eq!(world.last_status(), 200);
    let body = world.last_body();
    assert_eq!(body["created"], json!(false));
    assert_eq!(body["message"], json!("Rating updated successfully"));
}

#[then("the stored rating has score {score} and comment {comment}")]
fn the_stored_rating_has(world: &RatingWorld, score: u64, comment: String) {
    world.request(Method::GET, "/ratings/my-ratings", None);
    let body = world.last_body();
    let entry = &body.as_array().expect("ratings array")[0];
    assert_eq!(entry["score"].as_u64(), Some(score));
    assert_eq!(entry["comment"].as_str(), Some(comment.trim_matches('"')));
}

#[then("exactly one content row exists")]
fn exactly_one_content_row_exists(world: &RatingWorld) {
    assert_eq!(world.backend.contents.len(), 1);
}

#[then("the response is unauthorised")]
fn the_response_is_unauthorised(world: &RatingWorld) {
    assert_eq!(world.last_status(), 401);
    assert_eq!(world.last_body()["code"], json!("unauthorized"));
}

#[then("the auth platform was never asked to resolve a token")]
fn the_auth_platform_was_never_asked(world: &RatingWorld) {
    assert_eq!(world.backend.identity.token_lookups(), 0);
}

#[scenario(path = "tests/features/legacy_rating_fields.feature")]
fn legacy_rating_fields(world: RatingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/missing_bearer_token.feature")]
fn missing_bearer_token(world: RatingWorld) {
    let _ = world;
}
