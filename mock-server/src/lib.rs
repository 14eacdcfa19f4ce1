use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Stored supplier. Header and response maps are kept as JSON objects so the
/// server echoes back whatever key order it received.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    pub scope: String,
    pub description: String,
    pub timeout: u64,
    pub error_condition: String,
    pub request_url: String,
    pub cost_per_request: f64,
    pub parameter_type: Vec<String>,
    pub method: String,
    pub post_header: Option<Map<String, Value>>,
    pub post_body: Option<String>,
    pub standard_response: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub error_condition: String,
    pub request_url: String,
    #[serde(default)]
    pub cost_per_request: f64,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default = "default_method")]
    pub method: String,
    pub post_header: Option<Map<String, Value>>,
    pub post_body: Option<String>,
    pub standard_response: Option<Map<String, Value>>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl SupplierInput {
    fn is_valid(&self) -> bool {
        self.name.chars().count() >= 3
            && self.description.chars().count() >= 10
            && self.request_url.chars().count() >= 10
            && matches!(self.method.as_str(), "GET" | "POST")
    }

    fn into_supplier(self, id: u64) -> Supplier {
        Supplier {
            id,
            name: self.name,
            scope: self.scope,
            description: self.description,
            timeout: self.timeout,
            error_condition: self.error_condition,
            request_url: self.request_url,
            cost_per_request: self.cost_per_request,
            parameter_type: self.parameters,
            method: self.method,
            post_header: self.post_header,
            post_body: self.post_body,
            standard_response: self.standard_response,
        }
    }
}

/// Product as returned to clients, with its suppliers expanded.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub supplier_list: Vec<Supplier>,
    pub total_price: f64,
    pub total_cost: f64,
    pub standard_response: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub supplier_ids: Vec<u64>,
    pub standard_response: Option<Map<String, Value>>,
}

impl ProductInput {
    fn is_valid(&self, store: &Store) -> bool {
        self.name.chars().count() >= 3
            && self
                .supplier_ids
                .iter()
                .all(|id| store.suppliers.iter().any(|s| s.id == *id))
    }

    fn into_record(self, id: u64) -> ProductRecord {
        ProductRecord {
            id,
            name: self.name,
            supplier_ids: self.supplier_ids,
            total_price: self.total_price,
            total_cost: self.total_cost,
            standard_response: self.standard_response,
        }
    }
}

/// Stored product. Suppliers are kept by id and expanded on every read, so a
/// deleted supplier drops out of the products that linked it.
#[derive(Clone)]
struct ProductRecord {
    id: u64,
    name: String,
    supplier_ids: Vec<u64>,
    total_price: f64,
    total_cost: f64,
    standard_response: Option<Map<String, Value>>,
}

/// List envelope, as returned by the real paged endpoint.
#[derive(Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    suppliers: Vec<Supplier>,
    next_product_id: u64,
    products: Vec<ProductRecord>,
}

impl Store {
    fn expand(&self, record: &ProductRecord) -> Product {
        Product {
            id: record.id,
            name: record.name.clone(),
            supplier_list: record
                .supplier_ids
                .iter()
                .filter_map(|id| self.suppliers.iter().find(|s| s.id == *id))
                .cloned()
                .collect(),
            total_price: record.total_price,
            total_cost: record.total_cost,
            standard_response: record.standard_response.clone(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/supplier",
            get(list_suppliers).post(create_supplier).put(update_supplier),
        )
        .route("/supplier/{id}", get(get_supplier).delete(delete_supplier))
        .route(
            "/product",
            get(list_products).post(create_product).put(update_product),
        )
        .route("/product/{id}", get(get_product).delete(delete_product))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_suppliers(State(db): State<Db>) -> Json<Page<Supplier>> {
    let store = db.read().await;
    Json(Page {
        content: store.suppliers.clone(),
    })
}

async fn create_supplier(
    State(db): State<Db>,
    Json(input): Json<SupplierInput>,
) -> Result<(StatusCode, Json<Supplier>), StatusCode> {
    if !input.is_valid() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let supplier = input.into_supplier(store.next_id);
    tracing::info!(id = supplier.id, name = %supplier.name, "supplier created");
    store.suppliers.push(supplier.clone());
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn get_supplier(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Supplier>, StatusCode> {
    let store = db.read().await;
    store
        .suppliers
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_supplier(
    State(db): State<Db>,
    Json(input): Json<SupplierInput>,
) -> Result<Json<Supplier>, StatusCode> {
    let id = input.id.ok_or(StatusCode::BAD_REQUEST)?;
    if !input.is_valid() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    let slot = store
        .suppliers
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_supplier(id);
    tracing::info!(id, "supplier updated");
    Ok(Json(slot.clone()))
}

async fn delete_supplier(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let before = store.suppliers.len();
    store.suppliers.retain(|s| s.id != id);
    if store.suppliers.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    tracing::info!(id, "supplier deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_products(State(db): State<Db>) -> Json<Page<Product>> {
    let store = db.read().await;
    Json(Page {
        content: store.products.iter().map(|p| store.expand(p)).collect(),
    })
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    let mut store = db.write().await;
    if !input.is_valid(&store) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    store.next_product_id += 1;
    let record = input.into_record(store.next_product_id);
    tracing::info!(id = record.id, name = %record.name, suppliers = record.supplier_ids.len(), "product created");
    let product = store.expand(&record);
    store.products.push(record);
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store
        .products
        .iter()
        .find(|p| p.id == id)
        .map(|p| Json(store.expand(p)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, StatusCode> {
    let id = input.id.ok_or(StatusCode::BAD_REQUEST)?;
    let mut store = db.write().await;
    if !input.is_valid(&store) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let slot = store
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_record(id);
    let record = slot.clone();
    tracing::info!(id, "product updated");
    Ok(Json(store.expand(&record)))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let before = store.products.len();
    store.products.retain(|p| p.id != id);
    if store.products.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    tracing::info!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
