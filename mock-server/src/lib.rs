use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A stored user. The service only owns the `id` field; everything else is
/// whatever the client posted.
pub type User = Map<String, Value>;

#[derive(Default)]
pub struct Users {
    records: BTreeMap<u64, User>,
    next_id: u64,
}

impl Users {
    /// Seeds with a numeric `id` are stored first so ids handed out to the
    /// remaining seeds never collide with an explicit one.
    fn seeded(seed: Vec<User>) -> Self {
        let mut users = Users::default();
        let (explicit, unnumbered): (Vec<User>, Vec<User>) = seed
            .into_iter()
            .partition(|user| user.get("id").and_then(Value::as_u64).is_some());
        for user in explicit {
            if let Some(id) = user.get("id").and_then(Value::as_u64) {
                users.records.insert(id, user);
                users.next_id = users.next_id.max(id);
            }
        }
        for user in unnumbered {
            if users.insert(user).is_none() {
                tracing::warn!("id space exhausted, dropping seeded user");
            }
        }
        users
    }

    /// Store `user` under the next free id. `None` once `u64::MAX` is taken.
    fn insert(&mut self, mut user: User) -> Option<User> {
        let id = self.next_id.checked_add(1)?;
        self.next_id = id;
        user.insert("id".to_string(), Value::from(id));
        self.records.insert(id, user.clone());
        Some(user)
    }
}

pub type Db = Arc<RwLock<Users>>;

pub fn app() -> Router {
    app_with_users(Vec::new())
}

/// Router pre-populated with `seed`. Seeded users keep a numeric `id` when
/// they carry one; newly created users are numbered after the highest seed.
pub fn app_with_users(seed: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(Users::seeded(seed)));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .with_state(db)
}

/// Delay every response by `latency`.
pub fn with_latency(router: Router, latency: Duration) -> Router {
    router.layer(middleware::from_fn(move |req: Request, next: Next| async move {
        tokio::time::sleep(latency).await;
        next.run(req).await
    }))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    Json(users.records.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<User>,
) -> Result<(StatusCode, Json<User>), StatusCode> {
    let user = db
        .write()
        .await
        .insert(input)
        .ok_or(StatusCode::INSUFFICIENT_STORAGE)?;
    tracing::debug!(id = ?user.get("id"), "created user");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let id: u64 = id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let users = db.read().await;
    users.records.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
