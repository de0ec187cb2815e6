// src/services/aluno_service.rs
use crate::{
    error::{AppError, AppResult},
    models::aluno::{Aluno, AlunoComTurma, AlunoPayload},
};
use sqlx::SqlitePool;

fn validate(payload: &AlunoPayload) -> AppResult<()> {
    if payload.nome.trim().is_empty() {
        return Err(AppError::ValidationError("O nome do aluno é obrigatório.".into()));
    }
    Ok(())
}

// Campos opcionais vazios são gravados como NULL
fn opcional(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn list_students(
    db_pool: &SqlitePool,
    turma_id: Option<i64>,
) -> AppResult<Vec<AlunoComTurma>> {
    let mut sql = String::from(
        r#"
        SELECT a.id, a.nome, a.data_nascimento, a.nome_responsavel, a.contato_responsavel,
               a.turma_id, t.nome AS turma_nome
        FROM alunos a
        JOIN turmas t ON a.turma_id = t.id
        "#,
    );
    if turma_id.is_some() {
        sql.push_str(" WHERE a.turma_id = ?1");
    }
    sql.push_str(" ORDER BY a.nome");

    let mut query = sqlx::query_as::<_, AlunoComTurma>(&sql);
    if let Some(id) = turma_id {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db_pool).await?)
}

pub async fn find_student(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Aluno> {
    sqlx::query_as::<_, Aluno>(
        r#"
        SELECT id, nome, data_nascimento, nome_responsavel, contato_responsavel, turma_id
        FROM alunos
        WHERE id = ?1
        "#,
    )
    .bind(aluno_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Aluno não encontrado".into()))
}

pub async fn create_student(db_pool: &SqlitePool, payload: &AlunoPayload) -> AppResult<i64> {
    validate(payload)?;
    let id = sqlx::query(
        r#"
        INSERT INTO alunos (nome, turma_id, data_nascimento, nome_responsavel, contato_responsavel)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(payload.nome.trim())
    .bind(payload.turma_id)
    .bind(opcional(&payload.data_nascimento))
    .bind(opcional(&payload.nome_responsavel))
    .bind(opcional(&payload.contato_responsavel))
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("✅ Aluno '{}' matriculado na turma {} (id {}).", payload.nome, payload.turma_id, id);
    Ok(id)
}

/// Reescreve todos os campos do aluno. Transferir de turma é mudar só o `turma_id`.
pub async fn update_student(
    db_pool: &SqlitePool,
    aluno_id: i64,
    payload: &AlunoPayload,
) -> AppResult<()> {
    validate(payload)?;
    let rows_affected = sqlx::query(
        r#"
        UPDATE alunos
        SET nome = ?1, turma_id = ?2, data_nascimento = ?3,
            nome_responsavel = ?4, contato_responsavel = ?5
        WHERE id = ?6
        "#,
    )
    .bind(payload.nome.trim())
    .bind(payload.turma_id)
    .bind(opcional(&payload.data_nascimento))
    .bind(opcional(&payload.nome_responsavel))
    .bind(opcional(&payload.contato_responsavel))
    .bind(aluno_id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(AppError::NotFound("Aluno não encontrado".into()));
    }
    tracing::info!("✅ Aluno {} atualizado (turma {}).", aluno_id, payload.turma_id);
    Ok(())
}
