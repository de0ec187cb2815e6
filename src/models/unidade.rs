// src/models/unidade.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Unidade {
    pub id: i64,
    pub pais: String,
    pub estado: String,
    pub cidade: String,
    pub escola: String,
}

/// Unidade na listagem geral, marcada quando já tem coordenador.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UnidadeListagem {
    pub id: i64,
    pub pais: String,
    pub estado: String,
    pub cidade: String,
    pub escola: String,
    pub esta_ocupada: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnidadePayload {
    pub pais: String,
    pub estado: String,
    pub cidade: String,
    pub escola: String,
}
