use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use tierarr::config::Config;
use tower::ServiceExt;

const ACCESS_KEY: &str = "test-access-key";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    // A single pooled connection keeps every query on the same
    // in-memory database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.auth.access_key = ACCESS_KEY.to_string();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.bcrypt_cost = 4;

    let state = tierarr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    tierarr::api::router(state).await
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-access-key", ACCESS_KEY)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-access-key", ACCESS_KEY)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn register(app: &Router, username: &str, email: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/user/register",
            &serde_json::json!({ "username": username, "email": email, "password": password }),
        ))
        .await
        .unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/user/login",
            &serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap()
}

/// Pull the bare `access_token=...` pair out of a login response.
fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap();

    assert!(set_cookie.contains("HttpOnly"));

    set_cookie
        .split(';')
        .next()
        .expect("cookie has a name=value pair")
        .to_string()
}

#[tokio::test]
async fn access_gate_rejects_missing_or_wrong_key_on_every_route() {
    let app = spawn_app().await;

    for uri in ["/", "/user/register", "/tierlist/some-id", "/no/such/route"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {uri}");

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "API access denied");
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-access-key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_answers_with_status_message() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/no/such/route"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "This page doesn't exist");
}

#[tokio::test]
async fn register_returns_profile_without_password() {
    let app = spawn_app().await;

    let response = register(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "user");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    let response = register(&app, "ab", "a@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username must be at least 3 characters");

    let response = register(&app, "alice", "not-an-email", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Email is invalid");

    let response = register(&app, "alice", "a@x.com", "short").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn_app().await;

    let response = register(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = register(&app, "alice", "other@x.com", "secret2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The Username is already taken");
}

#[tokio::test]
async fn login_sets_cookie_and_returns_token() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;

    let response = login(&app, "alice", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("access_token="));

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_string());
    assert!(body["token"].is_string());

    let response = login(&app, "alice", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Username or Password is invalid");

    // Unknown usernames get the same uniform message.
    let response = login(&app, "nobody", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Username or Password is invalid");
}

#[tokio::test]
async fn me_requires_a_valid_session() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;

    let response = app.clone().oneshot(get_request("/user/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "You have to login before doing that");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/user/me")
                .header("x-access-key", ACCESS_KEY)
                .header(header::COOKIE, "access_token=not.a.real.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let login_response = login(&app, "alice", "secret1").await;
    let cookie = session_cookie(&login_response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/user/me")
                .header("x-access-key", ACCESS_KEY)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn bearer_token_is_accepted_for_protected_routes() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;
    let login_response = login(&app, "alice", "secret1").await;
    let body = body_json(login_response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/user/me")
                .header("x-access-key", ACCESS_KEY)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn password_update_rotates_the_stored_hash() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;
    let login_response = login(&app, "alice", "secret1").await;
    let cookie = session_cookie(&login_response);

    let mut request = json_request(
        "PATCH",
        "/user/me",
        &serde_json::json!({ "password": "newpass1" }),
    );
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = login(&app, "alice", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = login(&app, "alice", "newpass1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn profile_update_changes_visible_fields() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;
    let login_response = login(&app, "alice", "secret1").await;
    let cookie = session_cookie(&login_response);

    let mut request = json_request(
        "PATCH",
        "/user/me",
        &serde_json::json!({ "email": "new@x.com" }),
    );
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "new@x.com");
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/user/logout"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("access_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}

fn sample_tierlist() -> serde_json::Value {
    serde_json::json!({
        "tiers": [
            {
                "id": 1,
                "name": "S",
                "color": "#ff5555",
                "nested": [
                    { "id": "w1", "name": "Mistsplitter", "type": "weapon", "weaponType": "sword" },
                    { "id": "w2", "name": "Amos' Bow", "type": "weapon", "weaponType": "bow" }
                ]
            },
            { "id": 2, "name": "A" }
        ]
    })
}

#[tokio::test]
async fn tierlist_save_list_and_public_fetch() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;
    let login_response = login(&app, "alice", "secret1").await;
    let cookie = session_cookie(&login_response);

    // Saving requires a session.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/tierlist", &sample_tierlist()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut request = json_request("POST", "/tierlist", &sample_tierlist());
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await;
    let id = saved["id"].as_str().unwrap().to_string();
    assert!(saved["userId"].is_string());
    assert_eq!(saved["tiers"][0]["name"], "S");

    // The owner sees it in their list.
    let mut request = get_request("/tierlist");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Fetch by id needs no session.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/tierlist/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/tierlist/unknown-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Tierlist doesn't exist");
}

#[tokio::test]
async fn mixed_tier_entries_are_rejected_and_not_persisted() {
    let app = spawn_app().await;

    register(&app, "alice", "a@x.com", "secret1").await;
    let login_response = login(&app, "alice", "secret1").await;
    let cookie = session_cookie(&login_response);

    let mixed = serde_json::json!({
        "tiers": [{
            "id": 1,
            "name": "S",
            "nested": [
                { "id": "c1", "name": "Ayaka", "weapon": "sword", "type": "character", "nested": [] },
                { "id": "w1", "name": "Mistsplitter", "type": "weapon", "weaponType": "sword" }
            ]
        }]
    });

    let mut request = json_request("POST", "/tierlist", &mixed);
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Tierlist is invalid");

    // Nothing reached the store.
    let mut request = get_request("/tierlist");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}
