// src/web/unidade_handlers.rs
use crate::{
    error::AppResult,
    models::unidade::{Unidade, UnidadeListagem, UnidadePayload},
    services::unidade_service,
    state::AppState,
    web::{criado, mensagem},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

// GET /api/unidades
pub async fn list_units(State(state): State<AppState>) -> AppResult<Json<Vec<UnidadeListagem>>> {
    Ok(Json(unidade_service::list_units(&state.db_pool).await?))
}

// GET /api/unidades/{id}
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Unidade>> {
    Ok(Json(unidade_service::find_unit(&state.db_pool, id).await?))
}

// POST /api/unidades
pub async fn create_unit(
    State(state): State<AppState>,
    Json(payload): Json<UnidadePayload>,
) -> AppResult<impl IntoResponse> {
    let id = unidade_service::create_unit(&state.db_pool, &payload).await?;
    Ok(criado(id, "Unidade registrada com sucesso"))
}

// PUT /api/unidades/{id}
pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UnidadePayload>,
) -> AppResult<impl IntoResponse> {
    unidade_service::update_unit(&state.db_pool, id, &payload).await?;
    Ok(mensagem("Unidade atualizada com sucesso"))
}
