// src/web/aluno_handlers.rs
use crate::{
    error::AppResult,
    models::{
        aluno::{Aluno, AlunoComTurma, AlunoFiltro, AlunoPayload},
        usuario::SessaoUsuario,
    },
    services::{aluno_service, escopo_service},
    state::AppState,
    web::{criado, mensagem},
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};

// GET /api/alunos?turmaId=
pub async fn list_students(
    State(state): State<AppState>,
    Query(filtro): Query<AlunoFiltro>,
) -> AppResult<Json<Vec<AlunoComTurma>>> {
    Ok(Json(aluno_service::list_students(&state.db_pool, filtro.turma_id).await?))
}

// GET /api/alunos/{id}
pub async fn get_student(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Aluno>> {
    Ok(Json(aluno_service::find_student(&state.db_pool, id).await?))
}

// POST /api/alunos
pub async fn create_student(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Json(payload): Json<AlunoPayload>,
) -> AppResult<impl IntoResponse> {
    escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, payload.turma_id).await?;
    let id = aluno_service::create_student(&state.db_pool, &payload).await?;
    Ok(criado(id, "Aluno cadastrado com sucesso"))
}

// PUT /api/alunos/{id} (também usado para transferir de turma)
pub async fn update_student(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Path(id): Path<i64>,
    Json(payload): Json<AlunoPayload>,
) -> AppResult<impl IntoResponse> {
    // A turma de origem e a de destino têm de estar no escopo
    let atual = aluno_service::find_student(&state.db_pool, id).await?;
    escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, atual.turma_id).await?;
    if payload.turma_id != atual.turma_id {
        escopo_service::ensure_class_in_scope(&state.db_pool, &sessao, payload.turma_id).await?;
    }
    aluno_service::update_student(&state.db_pool, id, &payload).await?;
    Ok(mensagem("Aluno atualizado com sucesso"))
}
