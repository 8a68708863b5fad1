//! In-memory stand-in for the `/api/todos` service, used by tests and for
//! running the screen locally.
//!
//! Todos are kept in insertion order so list responses are stable.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-owned store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if input.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        text: input.text,
        completed: false,
    };
    tracing::debug!(id = %todo.id, "todo created");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(text) = input.text {
        if text.trim().is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
        todo.text = text;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    tracing::debug!(%id, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut todos = db.write().await;
    match todos.iter().position(|t| t.id == id) {
        Some(index) => {
            todos.remove(index);
            tracing::debug!(%id, "todo deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
