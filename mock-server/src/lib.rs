//! In-memory stand-in for the slbcph REST backend.
//!
//! Every route lives under `/api`. JSON errors carry a `message` field the
//! way the real backend does; a few extra routes (`echo`, `status`, `plain`)
//! exist so clients can observe exactly what they sent and how they react to
//! arbitrary statuses or non-JSON bodies.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
}

#[derive(Debug)]
pub struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        let ann = User {
            id: 1,
            name: "Ann".to_string(),
        };
        Self {
            users: BTreeMap::from([(ann.id, ann)]),
            next_id: 2,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ErrorResponse = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ErrorResponse {
    (status, Json(json!({ "message": message })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/echo", any(echo))
        .route("/uploads", post(upload))
        .route("/status/{code}", get(status))
        .route("/plain", get(plain))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let users: Vec<&User> = store.users.values().collect();
    Json(json!({ "users": users }))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, ErrorResponse> {
    let store = db.read().await;
    store
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "user not found"))
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ErrorResponse> {
    let mut store = db.write().await;
    if store.users.values().any(|u| u.name == input.name) {
        return Err(error(StatusCode::BAD_REQUEST, "name taken"));
    }
    let user = User {
        id: store.next_id,
        name: input.name,
    };
    store.next_id += 1;
    store.users.insert(user.id, user.clone());
    tracing::info!(id = user.id, "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ErrorResponse> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| Json(json!({ "deleted": id })))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "user not found"))
}

/// Reflects the received method, headers and raw body.
async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = if body.is_empty() {
        Value::Null
    } else {
        Value::String(String::from_utf8_lossy(&body).into_owned())
    };
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn upload(mut multipart: Multipart) -> Result<Json<Value>, ErrorResponse> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| error(StatusCode::BAD_REQUEST, &e.body_text()))?;
        match filename {
            Some(filename) => files.push(json!({
                "name": name,
                "filename": filename,
                "content_type": content_type,
                "size": data.len(),
            })),
            None => {
                fields.insert(name, String::from_utf8_lossy(&data).into_owned());
            }
        }
    }
    Ok(Json(json!({
        "id": Uuid::new_v4(),
        "fields": fields,
        "files": files,
    })))
}

/// Answers with the requested status and an empty JSON object.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    let status = StatusCode::from_u16(code)
        .map_err(|_| error(StatusCode::BAD_REQUEST, "invalid status"))?;
    Ok((status, Json(json!({}))))
}

async fn plain() -> &'static str {
    "ok"
}
