use crate::commands::Inserted;
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{ItemMaster, Record, Submission, Tno};
use crate::server::page::{self, Page};
use crate::server::AppState;
use crate::store::DeleteOutcome;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde_json::json;
use tracing::{debug, error, trace};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.error_type() {
            ErrorType::Validation => StatusCode::BAD_REQUEST,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {self:#}");
        } else {
            debug!("Request rejected: {self}");
        }
        let body = json!({ "status": "error", "message": format!("{self:#}") });
        (status, Json(body)).into_response()
    }
}

/// The entry form, showing the next transaction number and today's date.
pub(super) async fn index(State(state): State<AppState>) -> Result<Response, Error> {
    let tno = state.ledger.lock().await.next_tno().await;
    let today = Local::now().format("%d/%m/%Y").to_string();
    let page = page::index(&state.templates_dir, tno, &today)
        .await
        .pub_result(ErrorType::Internal)?;
    Ok(match page {
        Page::Rendered(html) => Html(html).into_response(),
        Page::Missing(diagnostic) => {
            error!("{diagnostic}");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(diagnostic)).into_response()
        }
    })
}

pub(super) async fn items(State(state): State<AppState>) -> Result<Json<Vec<String>>, Error> {
    let items = ItemMaster::load(&state.items_path)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Json(items.into_names()))
}

pub(super) async fn save(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Error> {
    let Json(body) = body.map_err(|rejection| {
        Error::msg(
            ErrorType::Validation,
            format!("Invalid JSON body: {}", rejection.body_text()),
        )
    })?;
    trace!("save: {body}");
    let mut ledger = state.ledger.lock().await;
    let Inserted { tno, next_tno } =
        crate::commands::save(&mut ledger, Submission::from_json(body)).await?;
    Ok(Json(json!({
        "status": "success",
        "tno": tno,
        "next_tno": next_tno,
    })))
}

pub(super) async fn records(State(state): State<AppState>) -> Result<Json<Vec<Record>>, Error> {
    Ok(Json(state.ledger.lock().await.read_all().await?))
}

pub(super) async fn record(
    State(state): State<AppState>,
    Path(tno): Path<Tno>,
) -> Result<Response, Error> {
    Ok(match state.ledger.lock().await.read_one(tno).await? {
        Some(record) => Json(record).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    })
}

pub(super) async fn delete(
    State(state): State<AppState>,
    Path(tno): Path<Tno>,
) -> Result<Response, Error> {
    let outcome = state.ledger.lock().await.delete(tno).await?;
    let status = match outcome {
        DeleteOutcome::Deleted { .. } => StatusCode::OK,
        DeleteOutcome::NotFound => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(outcome)).into_response())
}
