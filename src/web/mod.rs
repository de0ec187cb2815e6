// src/web/mod.rs
pub mod auth_handlers;
pub mod aluno_handlers;
pub mod aula_handlers;
pub mod conta_handlers;
pub mod mw_auth;
pub mod mw_politica;
pub mod painel_handlers;
pub mod routes;
pub mod turma_handlers;
pub mod unidade_handlers;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Resposta 201 com o id criado.
pub(crate) fn criado(id: i64, message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({ "id": id, "message": message })))
}

pub(crate) fn mensagem(message: &str) -> Json<Value> {
    Json(json!({ "message": message }))
}
