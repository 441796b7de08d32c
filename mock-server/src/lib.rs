use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A stored row, in the same shape the real store returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    pub fields: Map<String, Value>,
}

/// Request body for create and update: `{"fields": {...}}`.
#[derive(Deserialize)]
pub struct FieldsBody {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

type TableKey = (String, String);
type Tables = HashMap<TableKey, HashMap<String, Record>>;

/// In-memory record store shared by all handlers.
#[derive(Clone)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
    api_key: Arc<str>,
    pending_failures: Arc<AtomicU32>,
}

impl Store {
    pub fn new(api_key: &str) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            api_key: Arc::from(api_key),
            pending_failures: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Answer the next `n` requests with 503, whatever they are.
    pub fn fail_next(&self, n: u32) {
        self.pending_failures.store(n, Ordering::SeqCst);
    }

    /// Seed a record directly, bypassing HTTP.
    pub async fn insert(&self, base_id: &str, table_id: &str, fields: Map<String, Value>) -> Record {
        let record = Record {
            id: new_record_id(),
            created_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            fields,
        };
        self.tables
            .write()
            .await
            .entry((base_id.to_string(), table_id.to_string()))
            .or_default()
            .insert(record.id.clone(), record.clone());
        record
    }

    pub async fn get(&self, base_id: &str, table_id: &str, record_id: &str) -> Option<Record> {
        let tables = self.tables.read().await;
        tables
            .get(&(base_id.to_string(), table_id.to_string()))
            .and_then(|table| table.get(record_id))
            .cloned()
    }

    fn take_failure(&self) -> bool {
        self.pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub fn app(store: Store) -> Router {
    Router::new()
        .route("/v0/{base_id}/{table_id}", post(create_record))
        .route(
            "/v0/{base_id}/{table_id}/{record_id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .layer(middleware::from_fn_with_state(store.clone(), gate))
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// `rec` followed by 14 lowercase hex characters.
pub fn new_record_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("rec{}", &hex[..14])
}

/// Apply a partial update: present keys overwrite, `null` clears.
pub fn merge_fields(target: &mut Map<String, Value>, updates: Map<String, Value>) {
    for (key, value) in updates {
        if value.is_null() {
            target.remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}

fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (status, Json(json!({ "error": { "type": kind, "message": message } }))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "NOT_FOUND" }))).into_response()
}

fn invalid_body(rejection: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_REQUEST_UNKNOWN",
        &rejection.body_text(),
    )
}

/// Fault injection first, then bearer-token authentication.
async fn gate(State(store): State<Store>, request: Request, next: Next) -> Response {
    if store.take_failure() {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "injected failure",
        );
    }
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == &*store.api_key);
    if !authorized {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "AUTHENTICATION_REQUIRED",
            "Authentication required",
        );
    }
    next.run(request).await
}

async fn create_record(
    State(store): State<Store>,
    Path((base_id, table_id)): Path<(String, String)>,
    body: Result<Json<FieldsBody>, JsonRejection>,
) -> Result<Json<Record>, Response> {
    let Json(input) = body.map_err(invalid_body)?;
    Ok(Json(store.insert(&base_id, &table_id, input.fields).await))
}

async fn get_record(
    State(store): State<Store>,
    Path((base_id, table_id, record_id)): Path<(String, String, String)>,
) -> Result<Json<Record>, Response> {
    store
        .get(&base_id, &table_id, &record_id)
        .await
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_record(
    State(store): State<Store>,
    Path((base_id, table_id, record_id)): Path<(String, String, String)>,
    body: Result<Json<FieldsBody>, JsonRejection>,
) -> Result<Json<Record>, Response> {
    let Json(input) = body.map_err(invalid_body)?;
    let mut tables = store.tables.write().await;
    let record = tables
        .get_mut(&(base_id, table_id))
        .and_then(|table| table.get_mut(&record_id))
        .ok_or_else(not_found)?;
    merge_fields(&mut record.fields, input.fields);
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(store): State<Store>,
    Path((base_id, table_id, record_id)): Path<(String, String, String)>,
) -> Result<Json<Value>, Response> {
    let mut tables = store.tables.write().await;
    tables
        .get_mut(&(base_id, table_id))
        .and_then(|table| table.remove(&record_id))
        .map(|record| Json(json!({ "id": record.id, "deleted": true })))
        .ok_or_else(not_found)
}
