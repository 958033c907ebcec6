// sunstar-client/tests/common/mod.rs
// In-process mock backend for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use sunstar_client::catalog::{Notice, OperatorPrompt};
use sunstar_client::{ApiResponse, ClientConfig, NetworkHttpClient, Product, ProductDraft, SiteApi};

#[derive(Default)]
pub struct BackendState {
    pub products: Mutex<Vec<Product>>,
    pub requests: Mutex<Vec<String>>,
    pub auth_headers: Mutex<Vec<String>>,
    next_id: AtomicU64,
    pub fail_writes: AtomicBool,
    /// Answer writes with 200 and `success: false`
    pub reject_writes: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_uploads: AtomicBool,
    pub upload_delay_ms: AtomicU64,
}

impl BackendState {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Insert directly, bypassing the HTTP layer
    pub fn insert(&self, draft: ProductDraft) -> Product {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id: format!("prod-{}", n),
            category_id: draft.category_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            is_featured: draft.is_featured,
            is_available: draft.is_available,
            created_at: Some("2024-01-01T00:00:00".into()),
            updated_at: None,
        };
        self.products.lock().unwrap().push(product.clone());
        product
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).with_progress_tick(20)
    }

    pub fn api(&self) -> SiteApi<NetworkHttpClient> {
        self.api_with(self.config())
    }

    pub fn api_with(&self, config: ClientConfig) -> SiteApi<NetworkHttpClient> {
        SiteApi::new(config.build_http_client().unwrap())
    }
}

pub fn draft(name: &str, category_id: &str) -> ProductDraft {
    ProductDraft {
        category_id: category_id.into(),
        name: name.into(),
        description: format!("{} description", name),
        price: "$75".into(),
        ..Default::default()
    }
}

/// Prompt with a scripted confirm answer that records every notice
#[derive(Default)]
pub struct RecordingPrompt {
    pub answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl OperatorPrompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// ========== Routes ==========

type Shared = State<Arc<BackendState>>;

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/api/", get(|| async { Json(json!({"message": "Sun Star International API"})) }))
        .route("/api/company-info", get(company_info))
        .route("/api/products/categories", get(categories))
        .route("/api/products/sample/{id}", get(samples))
        .route("/api/testimonials", get(testimonials))
        .route("/api/advantages", get(advantages))
        .route("/api/stats", get(stats))
        .route("/api/contact/inquiry", post(inquiry))
        .route("/api/admin/products", get(list_products).post(create_product))
        .route("/api/admin/products/{id}", put(update_product).delete(delete_product))
        .route("/api/upload/image", post(upload_image))
        .route("/api/upload/images", post(upload_images))
        .route("/api/upload/image/{filename}", delete(delete_image))
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): Shared, req: Request, next: Next) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", req.method(), req.uri().path()));
    if let Some(auth) = req.headers().get(header::AUTHORIZATION) {
        state
            .auth_headers
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }
    next.run(req).await
}

fn failure(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn company_info() -> Json<Value> {
    Json(json!({
        "id": "company",
        "name": "Sun Star International",
        "tagline": "Your trusted trading partner",
        "values": ["Integrity", "Quality"],
        "address": {"city": "Dubai"},
        "contact": {"phone": "+971 50 123 4567", "email": "info@sunstar.ae"},
        "license": {}
    }))
}

async fn categories() -> Json<Value> {
    Json(json!([
        {"id": "1", "name": "New Passenger Motor Vehicles", "description": "", "image": "", "products": []},
        {"id": "2", "name": "Auto Spare Parts & Components", "description": "", "image": "", "products": []}
    ]))
}

async fn samples(Path(id): Path<String>) -> Json<Value> {
    Json(json!([
        {"name": format!("Sample {}", id), "specs": "Demo", "price": "Contact for Price"}
    ]))
}

#[derive(Deserialize)]
struct TestimonialQuery {
    #[serde(default)]
    featured_only: bool,
}

async fn testimonials(Query(q): Query<TestimonialQuery>) -> Json<Value> {
    let all = vec![
        json!({"id": "t1", "name": "Ahmed", "company": "Gulf Motors", "text": "Great", "rating": 5, "is_featured": true}),
        json!({"id": "t2", "name": "Maria", "company": "Parts Co", "text": "Good", "rating": 4, "is_featured": false}),
    ];
    let list: Vec<Value> = all
        .into_iter()
        .filter(|t| !q.featured_only || t["is_featured"] == true)
        .collect();
    Json(Value::Array(list))
}

async fn advantages() -> Json<Value> {
    Json(json!([
        {"id": "a1", "title": "Fast Delivery", "description": "Worldwide", "icon": "truck", "order": 1}
    ]))
}

async fn stats(State(state): Shared) -> Json<Value> {
    let count = state.products.lock().unwrap().len();
    Json(json!({
        "total_inquiries": 12, "new_inquiries": 3,
        "total_testimonials": 2, "product_categories": 4, "products": count
    }))
}

async fn inquiry(Json(body): Json<Value>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok_with_message(
        json!({"inquiry_id": "inq-1"}),
        format!(
            "Thank you {}! We will contact you soon.",
            body["name"].as_str().unwrap_or("")
        ),
    ))
}

/// Write failures: either a real error status or a 200 refusal envelope
fn write_failure(state: &BackendState) -> Option<Response> {
    if state.fail_writes.load(Ordering::SeqCst) {
        return Some(failure(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"));
    }
    if state.reject_writes.load(Ordering::SeqCst) {
        let body = ApiResponse::<Value>::error("Product name already exists");
        return Some(Json(body).into_response());
    }
    None
}

async fn list_products(State(state): Shared) -> Response {
    if state.fail_list.load(Ordering::SeqCst) {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let products = state.products.lock().unwrap().clone();
    Json(products).into_response()
}

async fn create_product(State(state): Shared, Json(draft): Json<ProductDraft>) -> Response {
    if let Some(resp) = write_failure(&state) {
        return resp;
    }
    let product = state.insert(draft);
    Json(ApiResponse::ok_with_message(
        json!({ "product_id": product.id }),
        "Product created successfully",
    ))
    .into_response()
}

async fn update_product(
    State(state): Shared,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Response {
    if let Some(resp) = write_failure(&state) {
        return resp;
    }
    let mut products = state.products.lock().unwrap();
    let Some(product) = products.iter_mut().find(|p| p.id == id) else {
        return failure(StatusCode::NOT_FOUND, "Product not found");
    };
    product.category_id = draft.category_id;
    product.name = draft.name;
    product.description = draft.description;
    product.price = draft.price;
    product.image_url = draft.image_url;
    product.is_featured = draft.is_featured;
    product.is_available = draft.is_available;
    product.updated_at = Some("2024-01-02T00:00:00".into());
    Json(ApiResponse::ok_with_message(
        product.clone(),
        "Product updated successfully",
    ))
    .into_response()
}

async fn delete_product(State(state): Shared, Path(id): Path<String>) -> Response {
    if state.fail_writes.load(Ordering::SeqCst) {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let mut products = state.products.lock().unwrap();
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        return failure(StatusCode::NOT_FOUND, "Product not found");
    }
    Json(json!({"message": "Product deleted successfully"})).into_response()
}

/// File names declared in a multipart body
fn multipart_file_names(headers: &HeaderMap, body: &[u8]) -> Option<Vec<String>> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    if !content_type.starts_with("multipart/form-data") {
        return None;
    }
    let text = String::from_utf8_lossy(body);
    Some(
        text.split("filename=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect(),
    )
}

async fn upload_image(State(state): Shared, headers: HeaderMap, body: Bytes) -> Response {
    let delay = state.upload_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if state.fail_uploads.load(Ordering::SeqCst) {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload file");
    }
    let Some(names) = multipart_file_names(&headers, &body) else {
        return failure(StatusCode::BAD_REQUEST, "Expected multipart form data");
    };
    let Some(name) = names.first() else {
        return failure(StatusCode::BAD_REQUEST, "No file provided");
    };
    Json(ApiResponse::ok_with_message(
        json!({"file_url": format!("/uploads/images/stored-{}", name), "filename": name, "size": body.len()}),
        "Image uploaded successfully",
    ))
    .into_response()
}

async fn upload_images(headers: HeaderMap, body: Bytes) -> Response {
    let Some(names) = multipart_file_names(&headers, &body) else {
        return failure(StatusCode::BAD_REQUEST, "Expected multipart form data");
    };
    let files: Vec<Value> = names
        .iter()
        .map(|n| json!({"file_url": format!("/uploads/images/stored-{}", n), "filename": n, "size": 1}))
        .collect();
    Json(ApiResponse::ok_with_message(
        json!({"uploaded_files": files, "upload_count": names.len(), "errors": []}),
        format!("Successfully uploaded {} images", files.len()),
    ))
    .into_response()
}

async fn delete_image(Path(filename): Path<String>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({ "filename": filename })))
}
