// vitrina-client/tests/http_adapters.rs
// Document store and uploader against a scripted axum server

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use vitrina_client::{ClientConfig, CloudinaryUploader, HttpClient, HttpDocumentStore};
use vitrina_core::{
    AssetUploader, CatalogEngine, CatalogRepository, ImageFile, RemoteStore, StoreError,
    TenantConfig, UploadError, UploadProfile,
};

/// ("METHOD /path?query", status, JSON body)
type Route = (&'static str, u16, Value);

/// One request as the server saw it
#[derive(Debug, Clone)]
struct Seen {
    target: String,
    authorization: Option<String>,
    body: String,
}

#[derive(Clone)]
struct Script {
    routes: Arc<Vec<Route>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

/// Record the request, answer with the route scripted for it or 404
async fn scripted(
    State(script): State<Script>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let target = match uri.path_and_query() {
        Some(pq) => format!("{method} {pq}"),
        None => format!("{method} {}", uri.path()),
    };
    script.seen.lock().unwrap().push(Seen {
        target: target.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    match script.routes.iter().find(|(route, _, _)| *route == target) {
        Some((_, status, body)) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(body.clone()),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

struct StubServer {
    base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl StubServer {
    async fn start(routes: Vec<Route>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(scripted).with_state(Script {
            routes: Arc::new(routes),
            seen: seen.clone(),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, seen }
    }

    fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn client(&self) -> HttpClient {
        HttpClient::new(&ClientConfig::new(self.base_url.clone()).with_token("secret-token")).unwrap()
    }
}

fn catalog_routes() -> Vec<Route> {
    vec![
        (
            "GET /collections/config_bebidas/documents?limit=1",
            200,
            json!({"documents": [{"id": "global", "fields": {"categories": ["Gaseosas", "Aguas"]}}]}),
        ),
        (
            "GET /collections/productos_bebidas/documents",
            200,
            json!({"documents": [
                {"id": "cola", "fields": {"name": "Cola", "description": "2L", "price": 10, "image": "https://x/upload/c.jpg", "category": "Gaseosas"}},
                {"id": "agua", "fields": {"name": "Agua", "description": "1L", "price": 5.5, "image": "https://x/upload/a.jpg", "category": "Aguas", "stock": 3}}
            ]}),
        ),
        (
            "POST /collections/productos_bebidas/documents",
            201,
            json!({"id": "new-1"}),
        ),
        ("PATCH /collections/productos_bebidas/documents/ghost", 404, json!({"error": "missing"})),
        ("POST /collections/config_bebidas/documents/global/append", 200, json!({})),
    ]
}

#[tokio::test]
async fn test_engine_refresh_over_http() {
    let server = StubServer::start(catalog_routes()).await;
    let store = HttpDocumentStore::new(server.client());
    let repo = CatalogRepository::for_tenant(Arc::new(store), &TenantConfig::default());
    let engine = CatalogEngine::new(repo);

    let report = engine.refresh().await.unwrap();
    assert_eq!(report.products, 2);
    assert_eq!(report.categories, 2);
    assert_eq!(engine.product("agua").unwrap().display_price(), "$5.5");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(
        requests
            .iter()
            .all(|r| r.authorization.as_deref() == Some("Bearer secret-token"))
    );
}

#[tokio::test]
async fn test_create_posts_fields_and_returns_id() {
    let server = StubServer::start(catalog_routes()).await;
    let store = HttpDocumentStore::new(server.client());

    let fields = json!({"name": "Fanta", "price": 8.0}).as_object().cloned().unwrap();
    let id = store.create("productos_bebidas", fields).await.unwrap();
    assert_eq!(id, "new-1");

    let request = &server.requests()[0];
    assert_eq!(request.target, "POST /collections/productos_bebidas/documents");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["name"], json!("Fanta"));
}

#[tokio::test]
async fn test_update_of_missing_document_is_not_found() {
    let server = StubServer::start(catalog_routes()).await;
    let store = HttpDocumentStore::new(server.client());

    let err = store
        .update("productos_bebidas", "ghost", serde_json::Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { ref id, .. } if id == "ghost"));
}

#[tokio::test]
async fn test_unknown_collection_lists_empty() {
    let server = StubServer::start(Vec::new()).await;
    let store = HttpDocumentStore::new(server.client());
    assert!(store.list("nada").await.unwrap().is_empty());
    assert!(store.get("nada").await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_to_set_posts_field_and_value() {
    let server = StubServer::start(catalog_routes()).await;
    let store = HttpDocumentStore::new(server.client());

    store
        .append_to_set("config_bebidas", "global", "categories", json!("Vinos"))
        .await
        .unwrap();
    let request = &server.requests()[0];
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"field": "categories", "value": "Vinos"}));
}

#[tokio::test]
async fn test_uploader_sends_preset_and_folder() {
    let server = StubServer::start(vec![(
        "POST /",
        200,
        json!({"secure_url": "https://res.cloudinary.com/demo/image/upload/v1/tienda_bebidas/x.jpg"}),
    )])
    .await;
    let http = HttpClient::new(&ClientConfig::new(format!("{}/", server.base_url))).unwrap();
    let uploader = CloudinaryUploader::new(http);

    let file = ImageFile::new("x.jpg", vec![1, 2, 3, 4]);
    let profile = UploadProfile::new("chatlink_unsigned", "tienda_bebidas");
    let url = uploader.upload(&file, &profile).await.unwrap();
    assert!(url.ends_with("/tienda_bebidas/x.jpg"));

    let request = &server.requests()[0];
    assert!(request.authorization.is_none());
    assert!(request.body.contains("name=\"upload_preset\""));
    assert!(request.body.contains("chatlink_unsigned"));
    assert!(request.body.contains("name=\"folder\""));
    assert!(request.body.contains("filename=\"x.jpg\""));
}

#[tokio::test]
async fn test_uploader_rejection_is_upload_error() {
    let server = StubServer::start(vec![(
        "POST /",
        400,
        json!({"error": {"message": "Upload preset not found"}}),
    )])
    .await;
    let http = HttpClient::new(&ClientConfig::new(server.base_url.clone())).unwrap();
    let uploader = CloudinaryUploader::new(http);

    let file = ImageFile::new("x.jpg", vec![1]);
    let err = uploader
        .upload(&file, &UploadProfile::new("bad", "f"))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Rejected(ref msg) if msg.contains("preset")));
}
