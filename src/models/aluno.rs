// src/models/aluno.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Aluno {
    pub id: i64,
    pub nome: String,
    pub data_nascimento: Option<String>,
    pub nome_responsavel: Option<String>,
    pub contato_responsavel: Option<String>,
    pub turma_id: i64,
}

/// Aluno com o nome da turma atual (listagem geral).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AlunoComTurma {
    pub id: i64,
    pub nome: String,
    pub data_nascimento: Option<String>,
    pub nome_responsavel: Option<String>,
    pub contato_responsavel: Option<String>,
    pub turma_id: i64,
    pub turma_nome: String,
}

/// Corpo de criação/edição. A transferência de turma é só uma edição com outro `turma_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlunoPayload {
    pub nome: String,
    pub turma_id: i64,
    #[serde(default)]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub nome_responsavel: Option<String>,
    #[serde(default)]
    pub contato_responsavel: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoFiltro {
    pub turma_id: Option<i64>,
}
