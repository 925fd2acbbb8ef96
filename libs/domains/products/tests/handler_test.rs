//! Handler tests for Products domain
//!
//! These tests drive the products router with in-memory storage and verify:
//! - Request decoding in every registered format
//! - Response encoding and `Content-Type` for the negotiated format
//! - HTTP status codes
//! - Error bodies for validation, lookup and negotiation failures

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use axum_helpers::negotiation::{decode, encode};
use axum_helpers::{ErrorBody, MediaFormat};
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

const WIDGET_JSON: &str = r#"{"nome":"Widget","descricao":"x","preco":9.99,"quantidadeEstoque":5}"#;

fn app() -> (Router, InMemoryProductStore) {
    let store = InMemoryProductStore::new();
    let app = handlers::router(ProductService::new(store.clone()));
    (app, store)
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn post(body: &str, content_type: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    builder.body(Body::empty()).unwrap()
}

async fn create_widget(app: &Router) -> i64 {
    let response = app.clone().oneshot(post(WIDGET_JSON, "application/json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ProductRepresentation = json_body(response).await;
    created.id.unwrap()
}

async fn stored_count(store: &InMemoryProductStore) -> u64 {
    let mut tx = store.begin().await.unwrap();
    tx.count().await.unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_generated_id() {
    let (app, _) = app();

    let response = app.oneshot(post(WIDGET_JSON, "application/json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body: serde_json::Value = json_body(response).await;
    assert!(body["id"].is_i64());
    assert_eq!(body["nome"], "Widget");
    assert_eq!(body["descricao"], "x");
    assert_eq!(body["preco"], json!(9.99));
    assert_eq!(body["quantidadeEstoque"], 5);
}

#[tokio::test]
async fn test_create_with_empty_name_returns_validation_error() {
    let (app, store) = app();
    let body = r#"{"nome":"","preco":1.0,"quantidadeEstoque":0}"#;

    let response = app.oneshot(post(body, "application/json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.status, 400);
    assert_eq!(error.error, "Erro de validação nos campos");
    assert_eq!(error.details.len(), 1);
    assert!(error.details[0].starts_with("nome"));
    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (app, _) = app();
    let body = r#"{"nome":"  ","preco":-1,"quantidadeEstoque":-3}"#;

    let response = app.oneshot(post(body, "application/json")).await.unwrap();

    let error: ErrorBody = json_body(response).await;
    let fields: Vec<_> = error
        .details
        .iter()
        .map(|d| d.split(':').next().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["nome", "preco", "quantidadeEstoque"]);
}

#[tokio::test]
async fn test_get_missing_product_returns_404_naming_id() {
    let (app, _) = app();

    let response = app.oneshot(get("/products/999999", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.status, 404);
    assert!(error.message.contains("999999"));
    assert!(error.details.is_empty());
}

#[tokio::test]
async fn test_list_in_yaml_matches_json() {
    let (app, _) = app();
    create_widget(&app).await;
    create_widget(&app).await;

    let yaml = app
        .clone()
        .oneshot(get("/products", Some("application/x-yaml")))
        .await
        .unwrap();
    assert_eq!(yaml.status(), StatusCode::OK);
    assert_eq!(yaml.headers()[header::CONTENT_TYPE], "application/x-yaml");
    let from_yaml: Vec<ProductRepresentation> = serde_yaml::from_slice(&body_bytes(yaml).await).unwrap();

    let json = app.oneshot(get("/products", None)).await.unwrap();
    let from_json: Vec<ProductRepresentation> = json_body(json).await;

    assert_eq!(from_yaml.len(), 2);
    assert_eq!(from_yaml, from_json);
}

#[tokio::test]
async fn test_update_with_text_plain_returns_415_and_leaves_store_untouched() {
    let (app, store) = app();
    let id = create_widget(&app).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/products/{}", id))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("nome=Changed"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error: ErrorBody = json_body(response).await;
    assert!(error.message.contains("text/plain"));

    let response = app.oneshot(get(&format!("/products/{}", id), None)).await.unwrap();
    let product: ProductRepresentation = json_body(response).await;
    assert_eq!(product.name, "Widget");
    assert_eq!(stored_count(&store).await, 1);
}

#[tokio::test]
async fn test_create_without_content_type_returns_415() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(WIDGET_JSON))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_unsupported_accept_returns_406() {
    let (app, _) = app();

    let response = app.oneshot(get("/products", Some("text/html"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.status, 406);
}

#[tokio::test]
async fn test_create_and_fetch_in_xml() {
    let (app, _) = app();
    let body = "<product><nome>Widget</nome><descricao>x</descricao>\
                <preco>9.99</preco><quantidadeEstoque>5</quantidadeEstoque></product>";

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/xml")
        .header(header::ACCEPT, "application/xml")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    let created: ProductRepresentation = decode(MediaFormat::Xml, &body_bytes(response).await).unwrap();
    let id = created.id.unwrap();

    let response = app
        .oneshot(get(&format!("/products/{}", id), Some("application/xml")))
        .await
        .unwrap();
    let bytes = body_bytes(response).await;
    assert!(String::from_utf8(bytes.clone()).unwrap().starts_with("<product>"));

    let fetched: ProductRepresentation = decode(MediaFormat::Xml, &bytes).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Widget");
}

#[tokio::test]
async fn test_xml_validation_error_rendered_as_xml() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/xml")
        .body(Body::from(r#"{"nome":"","preco":1,"quantidadeEstoque":1}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.starts_with("<error>"));
    assert!(text.contains("<details>nome: "));
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let (app, _) = app();
    let id = create_widget(&app).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/products/{}", id))
        .header(header::CONTENT_TYPE, "application/x-yaml")
        .body(Body::from("nome: Gadget\npreco: 15.5\nquantidadeEstoque: 0\n"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductRepresentation = json_body(response).await;
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.description, None);
    assert_eq!(updated.stock_quantity, Some(0));
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let (app, _) = app();
    let request = Request::builder()
        .method("PUT")
        .uri("/products/5")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(WIDGET_JSON))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_204_then_404() {
    let (app, _) = app();
    let id = create_widget(&app).await;
    let uri = format!("/products/{}", id);

    let delete = || Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let response = app.clone().oneshot(get(&uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_count_in_each_format() {
    let (app, _) = app();
    create_widget(&app).await;
    create_widget(&app).await;

    let response = app.clone().oneshot(get("/products/count", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"2");

    let response = app
        .clone()
        .oneshot(get("/products/count", Some("application/xml")))
        .await
        .unwrap();
    assert_eq!(body_bytes(response).await, b"<count>2</count>");

    let response = app
        .oneshot(get("/products/count", Some("application/x-yaml")))
        .await
        .unwrap();
    let count: u64 = serde_yaml::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let (app, _) = app();

    let response = app.oneshot(get("/products/abc", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.error, "Requisição inválida");
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let (app, store) = app();

    let response = app.oneshot(post("{\"nome\":", "application/json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.error, "Requisição inválida");
    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn test_supplied_id_is_ignored_on_create() {
    let (app, _) = app();
    let body = r#"{"id":77,"nome":"Widget","preco":1,"quantidadeEstoque":1}"#;

    let response = app.oneshot(post(body, "application/json; charset=utf-8")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ProductRepresentation = json_body(response).await;
    assert_eq!(created.id, Some(1));
}

#[tokio::test]
async fn test_price_with_more_than_two_decimals_returns_validation_error() {
    let (app, store) = app();
    let body = r#"{"nome":"Widget","preco":9.999,"quantidadeEstoque":1}"#;

    let response = app.oneshot(post(body, "application/json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.details, vec!["preco: O preço deve ter no máximo 2 casas decimais"]);
    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn test_price_beyond_exact_range_returns_validation_error() {
    let (app, store) = app();
    let body = r#"{"nome":"Widget","preco":12345678901234567.89,"quantidadeEstoque":1}"#;

    let response = app.oneshot(post(body, "application/json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = json_body(response).await;
    assert_eq!(error.details.len(), 1);
    assert!(error.details[0].starts_with("preco: "));
    assert_eq!(stored_count(&store).await, 0);
}

#[tokio::test]
async fn test_product_round_trips_in_every_format() {
    let (app, _) = app();
    let product = ProductRepresentation {
        id: None,
        name: "Cofre".to_string(),
        description: Some("aço".to_string()),
        price: Some(Decimal::new(999_999_999_999_999, 2)),
        stock_quantity: Some(3),
    };

    for format in MediaFormat::ALL {
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header(header::CONTENT_TYPE, format.mime())
            .header(header::ACCEPT, format.mime())
            .body(Body::from(encode(format, &product).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{}", format);

        let created: ProductRepresentation = decode(format, &body_bytes(response).await).unwrap();
        let id = created.id.unwrap();
        assert_eq!(created, ProductRepresentation { id: Some(id), ..product.clone() });

        let response = app
            .clone()
            .oneshot(get(&format!("/products/{}", id), Some(format.mime())))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], format.mime());
        let fetched: ProductRepresentation = decode(format, &body_bytes(response).await).unwrap();
        assert_eq!(fetched, created, "{}", format);
    }
}

#[tokio::test]
async fn test_count_tracks_creates_and_deletes() {
    let (app, _) = app();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(create_widget(&app).await);
    }

    for id in &ids[..2] {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/products/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.clone().oneshot(get("/products/count", None)).await.unwrap();
    assert_eq!(body_bytes(response).await, b"3");

    let response = app.oneshot(get("/products", None)).await.unwrap();
    let remaining: Vec<ProductRepresentation> = json_body(response).await;
    let remaining_ids: Vec<_> = remaining.into_iter().filter_map(|p| p.id).collect();
    assert_eq!(remaining_ids, ids[2..].to_vec());
}
