//! In-process mock of the POS backend
//!
//! An axum router over shared state; every endpoint counts its calls so
//! tests can assert exactly which requests the console issued.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pos_admin::Notifier;
use pos_client::models::{
    Branch, BranchCreate, BranchProduct, BranchUpdate, CompanySettings, CompanySettingsUpdate,
    Employee, PriceType, PriceUpdateRequest, ProductPrice, RecordStatus,
};
use pos_client::{OneshotHttpClient, PosApi, Session};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use shared::{ApiResponse, AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct Counters {
    pub branches: AtomicUsize,
    pub price_types: AtomicUsize,
    pub employees: AtomicUsize,
    pub branch_products: AtomicUsize,
    pub price_loads: AtomicUsize,
    pub price_commits: AtomicUsize,
    pub branch_writes: AtomicUsize,
    pub alert_updates: AtomicUsize,
    pub settings_writes: AtomicUsize,
}

#[derive(Default)]
pub struct Backend {
    pub counters: Counters,
    pub branches: Mutex<Vec<Branch>>,
    pub price_types: Mutex<Vec<PriceType>>,
    pub employees: Mutex<Vec<Employee>>,
    pub products: Mutex<HashMap<i64, Vec<BranchProduct>>>,
    pub prices: Mutex<Vec<ProductPrice>>,
    pub settings: Mutex<Option<CompanySettings>>,
    /// Last body received by `POST /update-product-price`
    pub last_commit: Mutex<Option<Value>>,
    /// Every Authorization header seen
    pub auth_headers: Mutex<Vec<String>>,
    /// Canned failure for the next commits
    pub commit_failure: Mutex<Option<(StatusCode, Value)>>,
    pub commit_delay_ms: AtomicU64,
    /// Answer successful commits with an empty 204
    pub commit_no_content: AtomicBool,
    /// Per-product delay of `GET /load-product-prices`
    pub load_delay_ms: Mutex<HashMap<i64, u64>>,
    pub fail_price_types: Mutex<bool>,
}

pub fn branch(id: i64, name: &str) -> Branch {
    Branch {
        id,
        name: name.into(),
        address: None,
        phone: None,
        manager: None,
        is_active: true,
    }
}

pub fn price_type(id: i64, name: &str) -> PriceType {
    PriceType {
        id,
        name: name.into(),
        description: None,
        status: RecordStatus::Active,
    }
}

pub fn product(id: i64, name: &str) -> BranchProduct {
    BranchProduct {
        id,
        name: name.into(),
        category_name: None,
        unit_name: None,
        stock_quantity: Decimal::from(10),
        alert_quantity: 2,
        status: RecordStatus::Active,
    }
}

pub fn price(product_id: i64, branch_id: i64, price_type_id: i64, cents: i64) -> ProductPrice {
    ProductPrice {
        id: None,
        product_id,
        branch_id,
        price_type_id,
        price: Decimal::new(cents, 2),
    }
}

impl Backend {
    /// Main Store (1) and Downtown (2), two price types, products 3, 4 and 7
    pub fn seeded() -> Arc<Self> {
        let backend = Self::default();
        *backend.branches.lock().unwrap() = vec![branch(1, "Main Store"), branch(2, "Downtown")];
        *backend.price_types.lock().unwrap() =
            vec![price_type(1, "Retail"), price_type(2, "Wholesale")];
        *backend.employees.lock().unwrap() = vec![Employee {
            id: 12,
            name: "Ana".into(),
            username: "ana".into(),
            email: None,
            phone: None,
            role_id: Some(1),
            branch_id: Some(2),
            login_status_id: None,
            is_active: true,
        }];
        let catalog = vec![product(3, "Coffee"), product(4, "Tea"), product(7, "Juice")];
        backend
            .products
            .lock()
            .unwrap()
            .extend([(1, catalog.clone()), (2, catalog)]);
        *backend.prices.lock().unwrap() = vec![price(4, 1, 1, 999), price(7, 1, 2, 350)];
        *backend.settings.lock().unwrap() = Some(CompanySettings {
            company_name: "Acme".into(),
            address: None,
            phone: None,
            email: None,
            tax_number: None,
            currency: Some("EUR".into()),
            logo_url: None,
        });
        Arc::new(backend)
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/branches", get(list_branches).post(create_branch))
            .route("/branches/{id}", put(update_branch).delete(delete_branch))
            .route("/price-types", get(list_price_types))
            .route("/employees/{id}", get(get_employee))
            .route("/branch-products", get(branch_products))
            .route("/branch-products/{id}", put(update_alert))
            .route("/load-product-prices", get(load_prices))
            .route("/update-product-price", post(update_prices))
            .route("/settings", get(get_settings).put(update_settings))
            .with_state(self.clone())
    }

    pub fn api(self: &Arc<Self>, session: Session) -> PosApi<OneshotHttpClient> {
        PosApi::new(OneshotHttpClient::new(self.router(), session))
    }
}

pub fn notifier() -> Notifier {
    Notifier::new()
}

type Shared = State<Arc<Backend>>;

fn record_auth(backend: &Backend, headers: &HeaderMap) {
    if let Some(value) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        backend.auth_headers.lock().unwrap().push(value.to_string());
    }
}

fn error(code: ErrorCode, message: &str) -> Response {
    AppError::with_message(code, message).into_response()
}

async fn list_branches(State(backend): Shared, headers: HeaderMap) -> Json<Vec<Branch>> {
    record_auth(&backend, &headers);
    backend.counters.branches.fetch_add(1, Ordering::SeqCst);
    Json(backend.branches.lock().unwrap().clone())
}

async fn create_branch(State(backend): Shared, Json(body): Json<BranchCreate>) -> Response {
    backend.counters.branch_writes.fetch_add(1, Ordering::SeqCst);
    let mut branches = backend.branches.lock().unwrap();
    if branches.iter().any(|b| b.name == body.name) {
        return AppError::new(ErrorCode::BranchNameExists).into_response();
    }
    let id = branches.iter().map(|b| b.id).max().unwrap_or(0) + 1;
    let created = Branch {
        address: body.address,
        phone: body.phone,
        manager: body.manager,
        ..branch(id, &body.name)
    };
    branches.push(created.clone());
    (StatusCode::CREATED, Json(ApiResponse::success(created))).into_response()
}

async fn update_branch(
    State(backend): Shared,
    Path(id): Path<i64>,
    Json(body): Json<BranchUpdate>,
) -> Response {
    backend.counters.branch_writes.fetch_add(1, Ordering::SeqCst);
    let mut branches = backend.branches.lock().unwrap();
    let Some(existing) = branches.iter_mut().find(|b| b.id == id) else {
        return error(ErrorCode::BranchNotFound, "Branch not found");
    };
    if let Some(name) = body.name {
        existing.name = name;
    }
    if let Some(address) = body.address {
        existing.address = Some(address);
    }
    Json(existing.clone()).into_response()
}

async fn delete_branch(State(backend): Shared, Path(id): Path<i64>) -> Response {
    backend.counters.branch_writes.fetch_add(1, Ordering::SeqCst);
    backend.branches.lock().unwrap().retain(|b| b.id != id);
    Json(ApiResponse::message("Branch deleted")).into_response()
}

async fn list_price_types(State(backend): Shared) -> Response {
    backend.counters.price_types.fetch_add(1, Ordering::SeqCst);
    if *backend.fail_price_types.lock().unwrap() {
        return error(ErrorCode::InternalError, "Price types unavailable");
    }
    let types = backend.price_types.lock().unwrap().clone();
    Json(ApiResponse::success(types)).into_response()
}

async fn get_employee(State(backend): Shared, Path(id): Path<i64>) -> Response {
    backend.counters.employees.fetch_add(1, Ordering::SeqCst);
    let employees = backend.employees.lock().unwrap();
    match employees.iter().find(|e| e.id == id) {
        Some(e) => Json(ApiResponse::success(e)).into_response(),
        None => error(ErrorCode::EmployeeNotFound, "Employee not found"),
    }
}

#[derive(Deserialize)]
struct BranchQuery {
    branch_id: i64,
}

async fn branch_products(State(backend): Shared, Query(q): Query<BranchQuery>) -> Json<Vec<BranchProduct>> {
    backend.counters.branch_products.fetch_add(1, Ordering::SeqCst);
    let products = backend.products.lock().unwrap();
    Json(products.get(&q.branch_id).cloned().unwrap_or_default())
}

#[derive(Deserialize)]
struct PriceQuery {
    product_id: i64,
    branch_id: i64,
}

async fn load_prices(State(backend): Shared, Query(q): Query<PriceQuery>) -> Json<Vec<ProductPrice>> {
    backend.counters.price_loads.fetch_add(1, Ordering::SeqCst);
    let delay = backend
        .load_delay_ms
        .lock()
        .unwrap()
        .get(&q.product_id)
        .copied()
        .unwrap_or(0);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    let prices = backend
        .prices
        .lock()
        .unwrap()
        .iter()
        .filter(|p| p.product_id == q.product_id && p.branch_id == q.branch_id)
        .cloned()
        .collect();
    Json(prices)
}

async fn update_prices(State(backend): Shared, Json(body): Json<Value>) -> Response {
    backend.counters.price_commits.fetch_add(1, Ordering::SeqCst);
    *backend.last_commit.lock().unwrap() = Some(body.clone());

    let delay = backend.commit_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    let failure = backend.commit_failure.lock().unwrap().clone();
    if let Some((status, body)) = failure {
        return (status, Json(body)).into_response();
    }

    let request: PriceUpdateRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(_) => return error(ErrorCode::InvalidFormat, "Malformed prices"),
    };
    let mut prices = backend.prices.lock().unwrap();
    for update in request.prices {
        prices.retain(|p| {
            !(p.product_id == update.product_id
                && p.branch_id == update.branch_id
                && p.price_type_id == update.price_type_id)
        });
        prices.push(ProductPrice {
            id: None,
            product_id: update.product_id,
            branch_id: update.branch_id,
            price_type_id: update.price_type_id,
            price: update.price,
        });
    }
    if backend.commit_no_content.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(ApiResponse::message("Prices updated")).into_response()
}

#[derive(Deserialize)]
struct AlertBody {
    alert_quantity: i64,
}

async fn update_alert(State(backend): Shared, Path(id): Path<i64>, Json(body): Json<AlertBody>) -> Response {
    backend.counters.alert_updates.fetch_add(1, Ordering::SeqCst);
    let mut products = backend.products.lock().unwrap();
    for list in products.values_mut() {
        for p in list.iter_mut().filter(|p| p.id == id) {
            p.alert_quantity = body.alert_quantity;
        }
    }
    Json(ApiResponse::message("Alert quantity updated")).into_response()
}

async fn get_settings(State(backend): Shared) -> Response {
    match backend.settings.lock().unwrap().clone() {
        Some(s) => Json(s).into_response(),
        None => error(ErrorCode::SettingsNotFound, "Settings not found"),
    }
}

async fn update_settings(State(backend): Shared, Json(body): Json<CompanySettingsUpdate>) -> Response {
    backend.counters.settings_writes.fetch_add(1, Ordering::SeqCst);
    let mut settings = backend.settings.lock().unwrap();
    let Some(current) = settings.as_mut() else {
        return error(ErrorCode::SettingsNotFound, "Settings not found");
    };
    if let Some(name) = body.company_name {
        current.company_name = name;
    }
    if let Some(phone) = body.phone {
        current.phone = Some(phone);
    }
    if let Some(currency) = body.currency {
        current.currency = Some(currency);
    }
    Json(ApiResponse::success(current.clone())).into_response()
}
