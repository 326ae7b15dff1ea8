//! Integration test harness for the CaPhe client.
//!
//! Spins up an in-process mock of the café backend on an ephemeral port and
//! hands out an [`ApiClient`] pointed at it, with a unique state directory
//! per test so persisted sessions never leak between tests.
//!
//! The mock reproduces the backend's observable quirks on purpose: the
//! login endpoint returns the token as a *quoted* string, collection
//! payloads mix field-name conventions between rows, and the plan
//! endpoints wrap everything in a `{"message", "data"}` envelope.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::Json;
use secrecy::SecretString;
use serde_json::{Value, json};

use caphe_client::{ApiClient, AuthSession, ClientConfig};
use caphe_core::Email;

/// Token the mock backend hands out at login (wire format: `"abc123"`).
pub const TEST_TOKEN: &str = "abc123";
/// Credentials the mock backend accepts.
pub const STAFF_EMAIL: &str = "admin@caphe.coffee";
pub const STAFF_PASSWORD: &str = "s3cret!";

/// Observable side effects of requests, shared with the tests.
#[derive(Debug, Default)]
pub struct MockState {
    /// When set, `/api/categories` answers 404.
    pub categories_unavailable: bool,
    /// Content-Type header of the last product create/update request.
    pub last_product_content_type: Mutex<Option<String>>,
    /// Active flags for the seeded plans.
    pub plan_active: Mutex<HashMap<i64, bool>>,
}

/// The running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start the mock with default behavior.
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    /// Start the mock with explicit behavior flags.
    ///
    /// # Panics
    ///
    /// Panics if no ephemeral port can be bound.
    pub async fn start_with(state: MockState) -> Self {
        let state = Arc::new(MockState {
            plan_active: Mutex::new(HashMap::from([(1, true), (2, false)])),
            ..state
        });

        let router = Router::new()
            .route("/api/staff/login", post(login))
            .route("/api/customers", get(list_customers).post(create_customer))
            .route(
                "/api/customers/{id}",
                put(update_customer).delete(delete_ok),
            )
            .route("/api/products/coffees", get(list_coffees))
            .route("/api/products/teas", get(list_teas))
            .route("/api/products/freezes", get(list_freezes))
            .route("/api/products", post(upsert_product).put(upsert_product))
            .route("/api/products/{id}", delete(delete_ok))
            .route("/api/categories", get(list_categories))
            .route("/api/plans", get(list_plans).post(create_plan))
            .route(
                "/api/plans/{id}",
                get(get_plan).put(update_plan).delete(delete_ok),
            )
            .route("/api/plans/{id}/toggle-status", patch(toggle_plan))
            .route("/api/plans/{id}/deactivate", put(deactivate_plan))
            .route("/api/orders", get(list_orders))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock backend");
        });

        Self { addr, state }
    }
}

/// A mock backend plus a client wired to it.
pub struct TestContext {
    pub client: ApiClient,
    pub backend: MockBackend,
    pub state_dir: PathBuf,
}

impl TestContext {
    /// Fresh backend + client with a unique state directory.
    ///
    /// # Panics
    ///
    /// Panics if the client configuration cannot be built.
    pub async fn new() -> Self {
        Self::with_state(MockState::default()).await
    }

    /// Fresh backend with explicit behavior flags.
    ///
    /// # Panics
    ///
    /// Panics if the client configuration cannot be built.
    pub async fn with_state(state: MockState) -> Self {
        let backend = MockBackend::start_with(state).await;
        let state_dir = std::env::temp_dir().join(format!("caphe-it-{}", uuid::Uuid::new_v4()));

        let config = ClientConfig::for_base_url(&format!("http://{}", backend.addr))
            .expect("valid base url")
            .with_state_dir(state_dir.clone());

        Self {
            client: ApiClient::new(config),
            backend,
            state_dir,
        }
    }

    /// Log in with the accepted credentials.
    ///
    /// # Panics
    ///
    /// Panics when login fails - the fixtures guarantee it succeeds.
    pub async fn login(&self) -> AuthSession {
        let email = Email::parse(STAFF_EMAIL).expect("valid email");
        let password = SecretString::from(STAFF_PASSWORD);
        self.client
            .login(&email, &password)
            .await
            .expect("login against mock backend")
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TEST_TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Phiên đăng nhập đã hết hạn"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);

    if email == Some(STAFF_EMAIL) && password == Some(STAFF_PASSWORD) {
        // The real backend returns the token JSON-quoted; the client must
        // strip the quotes before storing it.
        (StatusCode::OK, format!("\"{TEST_TOKEN}\"")).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Tên đăng nhập hoặc mật khẩu không đúng."})),
        )
            .into_response()
    }
}

async fn list_customers(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    // Two rows, two naming conventions.
    Json(json!([
        {
            "customerId": "USR001",
            "fullName": "Nguyễn Văn An",
            "email": "an@email.com",
            "phoneNumber": "0901234567",
            "createdAt": "2024-11-15",
            "isActive": true
        },
        {
            "id": "USR002",
            "name": "Trần Thị Bình",
            "email": "binh@email.com",
            "phone": "0912345678",
            "registeredAt": "2024-11-12",
            "status": "inactive"
        }
    ]))
    .into_response()
}

async fn create_customer(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut created = body;
    if let Value::Object(map) = &mut created {
        map.insert("id".to_owned(), json!("USR010"));
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_customer(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut updated = body;
    if let Value::Object(map) = &mut updated {
        map.insert("id".to_owned(), json!(id));
    }
    Json(updated).into_response()
}

async fn delete_ok(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_coffees(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "productId": 1,
            "name": "Cà phê đen",
            "description": "Cà phê phin nguyên chất",
            "price": 30_000,
            "imageUrl": "/images/ca-phe-den.jpg",
            "categoryId": 1
        },
        {
            // No price at all, and the category arrives embedded.
            "id": 2,
            "name": "Cà phê sữa đá",
            "description": "Cà phê phin với sữa đặc",
            "category": {"id": 1, "name": "Cà phê"}
        }
    ]))
    .into_response()
}

async fn list_teas(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "product_id": 3,
            "name": "Trà đào cam sả",
            "description": "Trà đào tươi mát",
            "price": 40_000,
            "img": "/images/tra-dao.jpg",
            "category_id": 2
        }
    ]))
    .into_response()
}

async fn list_freezes(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            // No id anywhere: the mapper falls back to the position.
            "name": "Cà phê freeze",
            "description": "Đá xay cà phê",
            "price": 55_000,
            "categoryID": 3
        }
    ]))
    .into_response()
}

async fn upsert_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    // Record the Content-Type so tests can assert the boundary contract.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    *state
        .last_product_content_type
        .lock()
        .expect("content-type lock") = content_type;

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut image_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "image" {
            image_name = field.file_name().map(str::to_owned);
            let _ = field.bytes().await;
        } else if let Ok(text) = field.text().await {
            fields.insert(name, text);
        }
    }

    let product_id: i64 = fields
        .get("productId")
        .and_then(|id| id.parse().ok())
        .unwrap_or(101);
    let price: i64 = fields
        .get("price")
        .and_then(|price| price.parse().ok())
        .unwrap_or(0);
    let category_id: i64 = fields
        .get("categoryId")
        .and_then(|id| id.parse().ok())
        .unwrap_or(0);

    Json(json!({
        "productId": product_id,
        "name": fields.get("name").cloned().unwrap_or_default(),
        "description": fields.get("description").cloned().unwrap_or_default(),
        "price": price,
        "imageUrl": image_name.map_or_else(String::new, |name| format!("/uploads/{name}")),
        "categoryId": category_id
    }))
    .into_response()
}

async fn list_categories(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.categories_unavailable {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response();
    }
    Json(json!([
        {"category_id": 1, "name": "Cà phê"},
        {"categoryID": 2, "categoryName": "Trà"},
        {"categoryId": 3, "name": "Đồ uống đá"},
        {"id": 4, "name": "Khác"}
    ]))
    .into_response()
}

fn plan_fixture(id: i64, active: bool) -> Value {
    match id {
        1 => json!({
            "planId": 1,
            "name": "Gói Cơ Bản",
            "description": "Gói cà phê cơ bản cho người mới bắt đầu",
            "productId": 1,
            "productName": "Cà phê đen",
            "imageUrl": "/images/goi-co-ban.jpg",
            "price": 150_000,
            "durationDays": 30,
            "dailyQuota": 1,
            "maxPerVisit": 1,
            "active": active
        }),
        _ => json!({
            "planId": id,
            "name": "Gói Tiêu Chuẩn",
            "description": "Gói phổ biến nhất cho người yêu cà phê",
            "productId": 2,
            "productName": "Cà phê sữa đá",
            "imageUrl": "/images/goi-tieu-chuan.jpg",
            "price": 300_000,
            "durationDays": 45,
            "dailyQuota": 2,
            "maxPerVisit": 1,
            "active": active
        }),
    }
}

async fn list_plans(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let active = state.plan_active.lock().expect("plan lock").clone();
    Json(json!({
        "message": "success",
        "data": [
            plan_fixture(1, active.get(&1).copied().unwrap_or(false)),
            plan_fixture(2, active.get(&2).copied().unwrap_or(false)),
        ]
    }))
    .into_response()
}

async fn get_plan(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let active = state
        .plan_active
        .lock()
        .expect("plan lock")
        .get(&id)
        .copied()
        .unwrap_or(false);
    Json(json!({"message": "success", "data": plan_fixture(id, active)})).into_response()
}

async fn create_plan(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut created = body;
    if let Value::Object(map) = &mut created {
        map.insert("planId".to_owned(), json!(7));
    }
    (
        StatusCode::CREATED,
        Json(json!({"message": "created", "data": created})),
    )
        .into_response()
}

async fn update_plan(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut updated = plan_fixture(id, true);
    if let (Value::Object(target), Value::Object(patch)) = (&mut updated, &body) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(json!({"message": "updated", "data": updated})).into_response()
}

async fn toggle_plan(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut active = state.plan_active.lock().expect("plan lock");
    let flag = active.entry(id).or_insert(false);
    *flag = !*flag;
    let now_active = *flag;
    drop(active);
    Json(json!({"message": "toggled", "data": plan_fixture(id, now_active)})).into_response()
}

async fn deactivate_plan(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state
        .plan_active
        .lock()
        .expect("plan lock")
        .insert(id, false);
    StatusCode::OK.into_response()
}

async fn list_orders(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": "ORD-2024-001",
            "userId": "USR001",
            "userName": "Nguyễn Văn An",
            "packageName": "Gói Tiêu Chuẩn",
            "total": 300_000,
            "createdAt": "2024-12-15",
            "status": "completed",
            "paymentMethod": "vnpay"
        },
        {
            "orderId": "ORD-2024-002",
            "customerId": "USR002",
            "user": {"name": "Trần Thị Bình"},
            "package": {"name": "Gói Premium"},
            "amount": 450_000,
            "orderDate": "14/12/2024",
            "status": "pending",
            "paymentMethod": "card"
        }
    ]))
    .into_response()
}
