// src/web/aula_handlers.rs
use crate::{
    error::AppResult,
    models::{
        aula::{AulaDetalhe, AulaFiltro, AulaListagem, AulaPayload, Estatisticas},
        usuario::SessaoUsuario,
    },
    services::{aula_service, escopo_service},
    state::AppState,
    web::{criado, mensagem},
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};

// GET /api/aulas?turmaId=
pub async fn list_lessons(
    State(state): State<AppState>,
    Query(filtro): Query<AulaFiltro>,
) -> AppResult<Json<Vec<AulaListagem>>> {
    Ok(Json(aula_service::list_lessons(&state.db_pool, filtro.turma_id).await?))
}

// GET /api/aulas/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AulaDetalhe>> {
    Ok(Json(aula_service::find_lesson(&state.db_pool, id).await?))
}

// POST /api/aulas
pub async fn create_lesson(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Json(payload): Json<AulaPayload>,
) -> AppResult<impl IntoResponse> {
    escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, payload.turma_id).await?;
    let id = aula_service::create_lesson(&state.db_pool, &payload).await?;
    Ok(criado(id, "Aula registrada com sucesso"))
}

// PUT /api/aulas/{id}
pub async fn update_lesson(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Path(id): Path<i64>,
    Json(payload): Json<AulaPayload>,
) -> AppResult<impl IntoResponse> {
    let atual = aula_service::find_lesson(&state.db_pool, id).await?;
    escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, atual.aula.turma_id).await?;
    if payload.turma_id != atual.aula.turma_id {
        escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, payload.turma_id).await?;
    }
    aula_service::update_lesson(&state.db_pool, id, &payload).await?;
    Ok(mensagem("Aula atualizada com sucesso"))
}

// GET /api/estatisticas
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<Estatisticas>> {
    Ok(Json(aula_service::statistics(&state.db_pool).await?))
}
