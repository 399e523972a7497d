use axum::Json;
use axum::extract::Path;
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::{ClassRecord, Query};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/classes", get(list_classes))
        .route("/api/classes/{class_id}", get(get_class_by_id))
        .route("/api/classes/course/{course_id}", get(list_classes_by_course))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.cache().ping().await?;
    Ok(StatusCode::OK)
}

async fn list_classes(State(state): State<AppState>) -> Result<Json<Vec<ClassRecord>>, AppError> {
    let lookup = state.store.lookup(&Query::All).await?;
    Ok(Json(lookup.records))
}

async fn get_class_by_id(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<Vec<ClassRecord>>, AppError> {
    let lookup = state.store.lookup(&Query::Section(class_id)).await?;
    Ok(Json(lookup.records))
}

async fn list_classes_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<ClassRecord>>, AppError> {
    let Some(query) = Query::from_course_code(&course_id) else {
        return Ok(Json(Vec::new()));
    };
    let lookup = state.store.lookup(&query).await?;
    Ok(Json(lookup.records))
}
