// src/web/conta_handlers.rs
//! Coordenadores, instrutores e escopo de unidades por conta.

use crate::{
    error::AppResult,
    models::{
        unidade::Unidade,
        usuario::{ContaDetalhe, ContaPayload, ContaResumo, Role},
    },
    services::{escopo_service, usuario_service},
    state::AppState,
    web::{criado, mensagem},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrutorFiltro {
    pub coordinator_id: Option<i64>,
}

async fn create_account(state: &AppState, role: Role, payload: &ContaPayload) -> AppResult<i64> {
    usuario_service::create_account(
        &state.db_pool,
        state.bcrypt_cost,
        role,
        &payload.name,
        &payload.email,
        payload.password.as_deref().unwrap_or_default(),
        &payload.unit_ids,
    )
    .await
}

async fn update_account(state: &AppState, role: Role, id: i64, payload: &ContaPayload) -> AppResult<()> {
    usuario_service::update_account(
        &state.db_pool,
        state.bcrypt_cost,
        role,
        id,
        &payload.name,
        &payload.email,
        payload.password.as_deref(),
        &payload.unit_ids,
    )
    .await
}

// GET /api/users/{id}/units
pub async fn user_units(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Unidade>>> {
    Ok(Json(escopo_service::units_for_user(&state.db_pool, id).await?))
}

// --- Coordenadores ---

// GET /api/coordinators
pub async fn list_coordinators(State(state): State<AppState>) -> AppResult<Json<Vec<ContaResumo>>> {
    Ok(Json(usuario_service::list_accounts(&state.db_pool, Role::Coordenador, None).await?))
}

// GET /api/coordinators/{id}
pub async fn get_coordinator(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContaDetalhe>> {
    Ok(Json(usuario_service::find_account_detail(&state.db_pool, Role::Coordenador, id).await?))
}

// POST /api/coordinators
pub async fn create_coordinator(
    State(state): State<AppState>,
    Json(payload): Json<ContaPayload>,
) -> AppResult<impl IntoResponse> {
    let id = create_account(&state, Role::Coordenador, &payload).await?;
    let message = if payload.unit_ids.is_empty() {
        "Coordenador cadastrado sem unidades"
    } else {
        "Coordenador cadastrado e vinculado com sucesso"
    };
    Ok(criado(id, message))
}

// PUT /api/coordinators/{id}
pub async fn update_coordinator(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContaPayload>,
) -> AppResult<impl IntoResponse> {
    update_account(&state, Role::Coordenador, id, &payload).await?;
    Ok(mensagem("Coordenador atualizado com sucesso"))
}

// GET /api/coordinators/{id}/units
pub async fn coordinator_units(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Unidade>>> {
    Ok(Json(escopo_service::units_for_role(&state.db_pool, Role::Coordenador, id).await?))
}

// --- Instrutores ---

// GET /api/instructors?coordinatorId=
pub async fn list_instructors(
    State(state): State<AppState>,
    Query(filtro): Query<InstrutorFiltro>,
) -> AppResult<Json<Vec<ContaResumo>>> {
    Ok(Json(
        usuario_service::list_accounts(&state.db_pool, Role::Instrutor, filtro.coordinator_id).await?,
    ))
}

// GET /api/instructors/{id}
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContaDetalhe>> {
    Ok(Json(usuario_service::find_account_detail(&state.db_pool, Role::Instrutor, id).await?))
}

// POST /api/instructors
pub async fn create_instructor(
    State(state): State<AppState>,
    Json(payload): Json<ContaPayload>,
) -> AppResult<impl IntoResponse> {
    let id = create_account(&state, Role::Instrutor, &payload).await?;
    let message = if payload.unit_ids.is_empty() {
        "Instrutor cadastrado sem unidades"
    } else {
        "Instrutor cadastrado e vinculado com sucesso"
    };
    Ok(criado(id, message))
}

// PUT /api/instructors/{id}
pub async fn update_instructor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContaPayload>,
) -> AppResult<impl IntoResponse> {
    update_account(&state, Role::Instrutor, id, &payload).await?;
    Ok(mensagem("Instrutor atualizado com sucesso"))
}

// GET /api/instructors/{id}/units
pub async fn instructor_units(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Unidade>>> {
    Ok(Json(escopo_service::units_for_role(&state.db_pool, Role::Instrutor, id).await?))
}
