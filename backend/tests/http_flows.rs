//! End-to-end HTTP flows over the real services and in-memory collaborators.

mod support;

use actix_web::http::Method;
use rstest::rstest;
use serde_json::json;

use support::http::{send, signed_in};
use support::in_memory::Backend;

#[actix_web::test]
async fn partial_rating_updates_keep_earlier_fields() {
    let backend = Backend::new();
    let (token, _) = signed_in(&backend, "ada@example.com").await;

    let first = send(
        &backend,
        Method::POST,
        "/ratings",
        Some(&token),
        Some(json!({ "id_contenido": "v1", "puntuacion": 4 })),
    )
    .await;
    assert_eq!(first.status, 200, "{}", first.body);
    assert_eq!(first.body["created"], json!(true));
    assert_eq!(first.body["rating"]["comment"], json!(null));

    let second = send(
        &backend,
        Method::POST,
        "/ratings",
        Some(&token),
        Some(json!({ "id_contenido": "v1", "comentario": "nice" })),
    )
    .await;
    assert_eq!(second.status, 200, "{}", second.body);
    assert_eq!(second.body["created"], json!(false));
    assert_eq!(second.body["message"], json!("Rating updated successfully"));
    assert_eq!(second.body["rating"]["score"], json!(4));
    assert_eq!(second.body["rating"]["comment"], json!("nice"));
    assert_eq!(backend.contents.len(), 1);
}

#[actix_web::test]
async fn rating_without_score_or_comment_never_persists() {
    let backend = Backend::new();
    let (token, _) = signed_in(&backend, "ada@example.com").await;

    let reply = send(
        &backend,
        Method::POST,
        "/ratings",
        Some(&token),
        Some(json!({ "contentId": "v1" })),
    )
    .await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["code"], json!("invalid_request"));
    assert_eq!(backend.ratings.writes(), 0);
    assert_eq!(backend.contents.len(), 0);
}

#[actix_web::test]
async fn my_ratings_embed_the_content() {
    let backend = Backend::new();
    let (token, _) = signed_in(&backend, "ada@example.com").await;
    for (content, score) in [("v1", 3), ("v2", 5)] {
        let reply = send(
            &backend,
            Method::POST,
            "/ratings",
            Some(&token),
            Some(json!({ "contentId": content, "score": score })),
        )
        .await;
        assert_eq!(reply.status, 200);
    }

    let listing = send(&backend, Method::GET, "/ratings/my-ratings", Some(&token), None).await;

    assert_eq!(listing.status, 200);
    let entries = listing.body.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["content"]["type"], json!("video"));
        assert!(entry["content"]["title"].as_str().expect("title").starts_with("Video "));
    }
}

async fn rated_content_id(backend: &Backend, token: &str) -> String {
    let reply = send(
        backend,
        Method::POST,
        "/ratings",
        Some(token),
        Some(json!({ "contentId": "857251", "score": 5 })),
    )
    .await;
    reply.body["rating"]["contentId"]
        .as_str()
        .expect("content id")
        .to_owned()
}

#[actix_web::test]
async fn duplicate_favorite_is_a_conflict_with_one_row() {
    let backend = Backend::new();
    let (token, user_id) = signed_in(&backend, "ada@example.com").await;
    let content_id = rated_content_id(&backend, &token).await;
    let payload = json!({ "id_usuario": user_id, "id_contenido": content_id });

    let first = send(&backend, Method::POST, "/favorites", Some(&token), Some(payload.clone())).await;
    let second = send(&backend, Method::POST, "/favorites", Some(&token), Some(payload)).await;

    assert_eq!(first.status, 201, "{}", first.body);
    assert_eq!(second.status, 400);
    assert_eq!(second.body["code"], json!("conflict"));
    assert_eq!(backend.favorites.len(), 1);

    let check = send(
        &backend,
        Method::GET,
        &format!("/favorites/{user_id}/{content_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(check.body, json!({ "isFavorite": true }));

    let listing = send(&backend, Method::GET, &format!("/favorites/{user_id}"), Some(&token), None).await;
    assert_eq!(listing.body[0]["content"]["externalId"], json!("857251"));
}

#[actix_web::test]
async fn removing_an_absent_favorite_succeeds() {
    let backend = Backend::new();
    let (token, user_id) = signed_in(&backend, "ada@example.com").await;
    let content_id = rated_content_id(&backend, &token).await;

    let reply = send(
        &backend,
        Method::DELETE,
        &format!("/favorites/{user_id}/{content_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["message"], json!("Removed from favorites"));
}

#[actix_web::test]
async fn favorites_of_another_user_are_forbidden() {
    let backend = Backend::new();
    let (token, _) = signed_in(&backend, "ada@example.com").await;
    let (_, other_id) = signed_in(&backend, "grace@example.com").await;

    let reply = send(&backend, Method::GET, &format!("/favorites/{other_id}"), Some(&token), None).await;

    assert_eq!(reply.status, 403);
    assert_eq!(reply.body["code"], json!("forbidden"));
}

#[rstest]
#[case(Method::GET, "/me")]
#[case(Method::PUT, "/update-user")]
#[case(Method::DELETE, "/delete-user")]
#[case(Method::POST, "/ratings")]
#[case(Method::GET, "/ratings/my-ratings")]
#[case(Method::POST, "/favorites")]
#[case(Method::GET, "/favorites/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[actix_web::test]
async fn protected_routes_reject_missing_tokens(#[case] method: Method, #[case] path: &str) {
    let backend = Backend::new();

    let reply = send(&backend, method, path, None, Some(json!({}))).await;

    assert_eq!(reply.status, 401);
    assert_eq!(reply.body["code"], json!("unauthorized"));
    assert!(reply.trace_id.is_some());
    assert_eq!(backend.identity.token_lookups(), 0);
    assert_eq!(backend.ratings.writes(), 0);
}

#[actix_web::test]
async fn account_lifecycle_round_trip() {
    let backend = Backend::new();
    let (token, user_id) = signed_in(&backend, "ada@example.com").await;
    assert_eq!(backend.mailer.sent().len(), 1, "welcome email");

    let me = send(&backend, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(me.status, 200);
    assert_eq!(me.body["user"]["id"], json!(user_id));

    let updated = send(
        &backend,
        Method::PUT,
        "/update-user",
        Some(&token),
        Some(json!({ "name": "Augusta", "birthDate": "1815-12-10" })),
    )
    .await;
    assert_eq!(updated.status, 200, "{}", updated.body);
    assert_eq!(updated.body["user"]["name"], json!("Augusta"));
    assert_eq!(updated.body["user"]["lastname"], json!("Lovelace"));
    assert_eq!(updated.body["user"]["birthDate"], json!("1815-12-10"));

    let deleted = send(&backend, Method::DELETE, "/delete-user", Some(&token), None).await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.body["message"], json!("User deleted successfully"));

    let gone = send(&backend, Method::GET, "/me", Some(&token), None).await;
    assert_eq!(gone.status, 404);
}

#[actix_web::test]
async fn password_reset_round_trip() {
    let backend = Backend::new();
    signed_in(&backend, "ada@example.com").await;

    let requested = send(
        &backend,
        Method::POST,
        "/forgot-password",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(requested.status, 200);
    let reset_token = requested.body["token"].as_str().expect("debug token").to_owned();
    let mails = backend.mailer.sent();
    assert!(mails.last().expect("reset mail").html.contains(&reset_token));

    let reset = send(
        &backend,
        Method::POST,
        "/reset-password",
        None,
        Some(json!({ "token": reset_token, "newPassword": "brand-new-pass" })),
    )
    .await;
    assert_eq!(reset.status, 200, "{}", reset.body);
    assert_eq!(
        backend.identity.password_for("ada@example.com").as_deref(),
        Some("brand-new-pass")
    );

    let replay = send(
        &backend,
        Method::POST,
        "/reset-password",
        None,
        Some(json!({ "token": reset_token, "newPassword": "another-pass" })),
    )
    .await;
    assert_eq!(replay.status, 400);
    assert_eq!(replay.body["message"], json!("Invalid or expired token"));
}

#[actix_web::test]
async fn forgot_password_for_unknown_email_is_silent() {
    let backend = Backend::new();

    let reply = send(
        &backend,
        Method::POST,
        "/forgot-password",
        None,
        Some(json!({ "email": "nobody@example.com" })),
    )
    .await;

    assert_eq!(reply.status, 200);
    assert!(reply.body.get("token").is_none());
    assert!(backend.mailer.sent().is_empty());
}

#[rstest]
#[case("/videos/search", 6)]
#[case("/videos/search?query=popular", 6)]
#[case("/videos/search?query=comedy", 1)]
#[actix_web::test]
async fn video_search_modes(#[case] path: &str, #[case] expected_terms: usize) {
    let backend = Backend::new();

    let reply = send(&backend, Method::GET, path, None, None).await;

    assert_eq!(reply.status, 200);
    let cards = reply.body.as_array().expect("cards");
    assert_eq!(cards.len(), expected_terms);
    assert_eq!(backend.videos.terms().len(), expected_terms);
    if expected_terms == 1 {
        assert_eq!(cards[0]["genre"], json!("comedy"));
        assert_eq!(backend.videos.terms(), vec!["comedy".to_owned()]);
    }
}
