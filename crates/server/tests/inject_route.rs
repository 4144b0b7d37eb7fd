//! Endpoint tests for `/ratecss/inject`.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use ratecss_server::config::ServerConfig;
use ratecss_server::routes::router;
use tower::ServiceExt;

async fn send(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_param_is_a_css_comment_error() {
    let response = send(router(ServerConfig::default()), "/ratecss/inject").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "text/css");

    let body = body_string(response).await;
    assert_eq!(
        body,
        "/* Error: Missing css parameter. Example: /ratecss/inject?css=color:white */"
    );
}

#[tokio::test]
async fn fully_filtered_input_is_rejected() {
    let response = send(
        router(ServerConfig::default()),
        "/ratecss/inject?css=behavior:url(evil);-moz-binding:x",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());

    let body = body_string(response).await;
    assert_eq!(body, "/* Error: No permitted declarations in css parameter */");
}

#[tokio::test]
async fn allowed_declarations_are_wrapped_in_the_target_selector() {
    let response = send(
        router(ServerConfig::default()),
        "/ratecss/inject?css=color:red;display:none",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(cache, "public, max-age=86400");

    let body = body_string(response).await;
    assert_eq!(body, "#page-content div.rate { color:red;display:none }");
}

#[tokio::test]
async fn disallowed_declarations_are_dropped_from_mixed_input() {
    let response = send(
        router(ServerConfig::default()),
        "/ratecss/inject?css=color:red;behavior:url(evil)",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(body, "#page-content div.rate { color:red }");
}

#[tokio::test]
async fn important_flag_suffixes_every_declaration() {
    let config = ServerConfig {
        important: true,
        ..ServerConfig::default()
    };
    let response = send(router(config), "/ratecss/inject?css=color:red;display:none").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(
        body,
        "#page-content div.rate { color:red !important;display:none !important }"
    );
}

#[tokio::test]
async fn custom_target_and_param_are_honored() {
    let config = ServerConfig {
        target: "div.stats".to_owned(),
        param: "style".to_owned(),
        ..ServerConfig::default()
    };
    let app = router(config);

    let renamed = send(app.clone(), "/ratecss/inject?style=color:teal").await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(
        body_string(renamed).await,
        "div.stats { color:teal }"
    );

    let old_name = send(app, "/ratecss/inject?css=color:teal").await;
    assert_eq!(old_name.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_string(old_name)
            .await
            .starts_with("/* Error: Missing style parameter")
    );
}

#[tokio::test]
async fn first_occurrence_of_the_param_wins() {
    let response = send(
        router(ServerConfig::default()),
        "/ratecss/inject?css=color:red&css=color:blue",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(body, "#page-content div.rate { color:red }");
}

#[tokio::test]
async fn encoded_declarations_are_decoded_before_sanitizing() {
    let response = send(
        router(ServerConfig::default()),
        "/ratecss/inject?css=color%3Ared%3Bfont-size%3A2em",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(body, "#page-content div.rate { color:red;font-size:2em }");
}
