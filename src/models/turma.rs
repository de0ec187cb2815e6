// src/models/turma.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Turma {
    pub id: i64,
    pub nome: String,
    pub serie: String,
    pub unidade_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurmaPayload {
    pub nome: String,
    pub serie: String,
    pub unidade_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaFiltro {
    pub unidade_id: Option<i64>,
}
