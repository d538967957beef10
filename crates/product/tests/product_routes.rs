mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use common::{Fixture, PNG_BYTES};
use product::{handler::AppRouter, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "product-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                let disposition =
                    format!("form-data; name=\"{name}\"; filename=\"{file_name}\"");
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: {disposition}\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn valid_parts<'a>(name: &'a str) -> Vec<Part<'a>> {
    vec![
        Part::Text("name", name),
        Part::Text("price", "25000"),
        Part::Text("stock", "10"),
        Part::Text("category", "food"),
        Part::File("image", "photo.png", PNG_BYTES),
    ]
}

async fn setup() -> (Fixture, Router) {
    let fixture = Fixture::new().await;
    let state = AppState::from_deps(
        fixture.deps(),
        fixture.store.directory().to_path_buf(),
        1024 * 1024,
    );
    (fixture, AppRouter::build(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, name: &str) -> Value {
    let request = multipart_request("POST", "/api/products", &valid_parts(name));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_returns_201_with_envelope() {
    let (_fixture, app) = setup().await;

    let (status, body) = send(
        &app,
        multipart_request("POST", "/api/products", &valid_parts("Nasi Goreng")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Product Created"));
    assert_eq!(body["data"]["name"], json!("Nasi Goreng"));
    assert_eq!(body["data"]["category"], json!("food"));
    assert_eq!(body["data"]["is_favorite"], json!(false));
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_with_invalid_fields_returns_422() {
    let (fixture, app) = setup().await;

    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            "/api/products",
            &[
                Part::Text("name", "ab"),
                Part::Text("price", "10"),
                Part::Text("stock", "1"),
                Part::Text("category", "dessert"),
                Part::File("image", "photo.png", PNG_BYTES),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["category"].is_array());
    assert!(body["errors"].get("price").is_none());
    assert!(fixture.stored_keys().is_empty());
}

#[tokio::test]
async fn create_without_image_returns_422() {
    let (_fixture, app) = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"name": "Nasi Goreng", "price": 1, "stock": 1, "category": "food"}).to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["image"].is_array());
}

#[tokio::test]
async fn nested_json_field_returns_422() {
    let (_fixture, app) = setup().await;
    let created = create(&app, "Nasi Goreng").await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/products/{}", created["id"]))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": {"a": 1}}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_array());

    let (_, body) = send(&app, get(&format!("/api/products/{}", created["id"]))).await;
    assert_eq!(body["data"]["name"], json!("Nasi Goreng"));
}

#[tokio::test]
async fn failed_record_write_returns_409() {
    let (fixture, app) = setup().await;
    fixture.repo.fail_writes(true);

    let (status, body) = send(
        &app,
        multipart_request("POST", "/api/products", &valid_parts("Nasi Goreng")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Product Failed to Save"));
    assert!(fixture.stored_keys().is_empty());
}

#[tokio::test]
async fn list_and_detail_return_200() {
    let (_fixture, app) = setup().await;
    let first = create(&app, "Nasi Goreng").await;
    let second = create(&app, "Es Teh Manis").await;

    let (status, body) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("List Data Product"));
    assert_eq!(body["data"][0]["id"], second["id"]);
    assert_eq!(body["data"][1]["id"], first["id"]);

    let (status, body) = send(&app, get(&format!("/api/products/{}", first["id"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Detail Data Product"));
    assert_eq!(body["data"], first);
}

#[tokio::test]
async fn unknown_or_non_numeric_id_returns_404() {
    let (_fixture, app) = setup().await;

    for uri in ["/api/products/999", "/api/products/abc"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Product not found"));
    }

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/999")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_accepts_json_and_urlencoded_bodies() {
    let (_fixture, app) = setup().await;
    let created = create(&app, "Nasi Goreng").await;
    let uri = format!("/api/products/{}", created["id"]);

    let request = Request::builder()
        .method("PUT")
        .uri(&uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"price": 500}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Product updated successfully"));
    assert_eq!(body["data"]["price"], json!(500));
    assert_eq!(body["data"]["name"], json!("Nasi Goreng"));

    let request = Request::builder()
        .method("PATCH")
        .uri(&uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("stock=3&is_favorite=true"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], json!(3));
    assert_eq!(body["data"]["is_favorite"], json!(true));
    assert_eq!(body["data"]["price"], json!(500));
}

#[tokio::test]
async fn multipart_update_replaces_image() {
    let (fixture, app) = setup().await;
    let created = create(&app, "Nasi Goreng").await;
    let old_key = created["image"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            &format!("/api/products/{}", created["id"]),
            &[
                Part::Text("name", "Nasi Goreng Spesial"),
                Part::File("image", "new.png", PNG_BYTES),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Nasi Goreng Spesial"));
    let new_key = body["data"]["image"].as_str().unwrap().to_string();
    assert_ne!(new_key, old_key);
    assert_eq!(fixture.stored_keys(), [new_key]);
}

#[tokio::test]
async fn stored_image_is_served() {
    let (_fixture, app) = setup().await;
    let created = create(&app, "Nasi Goreng").await;
    let key = created["image"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/storage/products/{key}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], PNG_BYTES);
}

#[tokio::test]
async fn delete_returns_message_and_removes_product() {
    let (fixture, app) = setup().await;
    let created = create(&app, "Nasi Goreng").await;
    let uri = format!("/api/products/{}", created["id"]);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Product deleted successfully"})
    );
    assert!(fixture.stored_keys().is_empty());

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_body_returns_400() {
    let (_fixture, app) = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Nasi"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn metrics_are_exposed() {
    let (_fixture, app) = setup().await;
    create(&app, "Nasi Goreng").await;

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("product_command_service_request_counter_total"));
}
