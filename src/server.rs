//! HTTP front end for the lookup pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::entry::Entry;
use crate::lookup::{self, LookupOutcome};

pub struct AppState {
    conn: Mutex<Connection>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type LookupError = (StatusCode, Json<ErrorResponse>);

pub async fn serve(conn: Connection, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        conn: Mutex::new(conn),
        client: reqwest::Client::new(),
    });

    let app = Router::new()
        .route("/lookup/:word", get(handle_lookup))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_lookup(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Result<Json<Entry>, LookupError> {
    match lookup::lookup(&state.conn, &state.client, &word, false).await {
        Ok(LookupOutcome::Found { entry, .. }) => Ok(Json(entry)),
        Ok(LookupOutcome::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Not found: {}", lookup::normalize(&word)),
            }),
        )),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: err.to_string() }),
        )),
    }
}
