// src/web/turma_handlers.rs
use crate::{
    error::AppResult,
    models::{
        aluno::Aluno,
        turma::{Turma, TurmaFiltro, TurmaPayload},
        usuario::SessaoUsuario,
    },
    services::{escopo_service, turma_service},
    state::AppState,
    web::{criado, mensagem},
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};

// GET /api/turmas?unidadeId=
pub async fn list_classes(
    State(state): State<AppState>,
    Query(filtro): Query<TurmaFiltro>,
) -> AppResult<Json<Vec<Turma>>> {
    Ok(Json(turma_service::list_classes(&state.db_pool, filtro.unidade_id).await?))
}

// GET /api/turmas/{id}
pub async fn get_class(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Turma>> {
    Ok(Json(turma_service::find_class(&state.db_pool, id).await?))
}

// GET /api/turmas/{id}/alunos
pub async fn class_students(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Aluno>>> {
    Ok(Json(turma_service::list_class_students(&state.db_pool, id).await?))
}

// POST /api/turmas
pub async fn create_class(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Json(payload): Json<TurmaPayload>,
) -> AppResult<impl IntoResponse> {
    escopo_service::ensure_unit_in_scope(&state.db_pool, &sessao, payload.unidade_id).await?;
    let id = turma_service::create_class(&state.db_pool, &payload).await?;
    Ok(criado(id, "Turma criada com sucesso"))
}

// PUT /api/turmas/{id}
pub async fn update_class(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Path(id): Path<i64>,
    Json(payload): Json<TurmaPayload>,
) -> AppResult<impl IntoResponse> {
    let atual = turma_service::find_class(&state.db_pool, id).await?;
    escopo_service::ensure_unit_in_scope(&state.db_pool, &sessao, atual.unidade_id).await?;
    if payload.unidade_id != atual.unidade_id {
        escopo_service::ensure_unit_in_scope(&state.db_pool, &sessao, payload.unidade_id).await?;
    }
    turma_service::update_class(&state.db_pool, id, &payload).await?;
    Ok(mensagem("Turma atualizada com sucesso"))
}

// DELETE /api/turmas/{id}
pub async fn delete_class(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let atual = turma_service::find_class(&state.db_pool, id).await?;
    escopo_service::ensure_unit_in_scope(&state.db_pool, &sessao, atual.unidade_id).await?;
    turma_service::delete_class(&state.db_pool, id).await?;
    Ok(mensagem("Turma e dados vinculados excluídos com sucesso"))
}
