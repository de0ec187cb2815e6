// src/services/turma_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        aluno::Aluno,
        turma::{Turma, TurmaPayload},
    },
};
use sqlx::SqlitePool;

fn validate(payload: &TurmaPayload) -> AppResult<()> {
    if payload.nome.trim().is_empty() || payload.serie.trim().is_empty() {
        return Err(AppError::ValidationError("Nome e série da turma são obrigatórios.".into()));
    }
    Ok(())
}

pub async fn list_classes(db_pool: &SqlitePool, unidade_id: Option<i64>) -> AppResult<Vec<Turma>> {
    let turmas = match unidade_id {
        Some(id) => {
            sqlx::query_as::<_, Turma>(
                "SELECT id, nome, serie, unidade_id FROM turmas WHERE unidade_id = ?1 ORDER BY nome",
            )
            .bind(id)
            .fetch_all(db_pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Turma>("SELECT id, nome, serie, unidade_id FROM turmas ORDER BY nome")
                .fetch_all(db_pool)
                .await?
        }
    };
    Ok(turmas)
}

pub async fn find_class(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Turma> {
    sqlx::query_as::<_, Turma>("SELECT id, nome, serie, unidade_id FROM turmas WHERE id = ?1")
        .bind(turma_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Turma não encontrada".into()))
}

pub async fn create_class(db_pool: &SqlitePool, payload: &TurmaPayload) -> AppResult<i64> {
    validate(payload)?;
    let id = sqlx::query("INSERT INTO turmas (nome, serie, unidade_id) VALUES (?1, ?2, ?3)")
        .bind(payload.nome.trim())
        .bind(payload.serie.trim())
        .bind(payload.unidade_id)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("✅ Turma '{}' criada com id {}.", payload.nome, id);
    Ok(id)
}

pub async fn update_class(db_pool: &SqlitePool, turma_id: i64, payload: &TurmaPayload) -> AppResult<()> {
    validate(payload)?;
    let rows_affected =
        sqlx::query("UPDATE turmas SET nome = ?1, serie = ?2, unidade_id = ?3 WHERE id = ?4")
            .bind(payload.nome.trim())
            .bind(payload.serie.trim())
            .bind(payload.unidade_id)
            .bind(turma_id)
            .execute(db_pool)
            .await?
            .rows_affected();
    if rows_affected == 0 {
        return Err(AppError::NotFound("Turma não encontrada".into()));
    }
    tracing::info!("✅ Turma {} atualizada.", turma_id);
    Ok(())
}

/// Apaga a turma com as suas aulas e alunos numa única transação.
/// A frequência sai em cascata pelas chaves estrangeiras.
pub async fn delete_class(db_pool: &SqlitePool, turma_id: i64) -> AppResult<()> {
    tracing::info!("Apagando turma {} e dados vinculados...", turma_id);
    let mut tx = db_pool.begin().await?;

    let aulas = sqlx::query("DELETE FROM aulas WHERE turma_id = ?1")
        .bind(turma_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let alunos = sqlx::query("DELETE FROM alunos WHERE turma_id = ?1")
        .bind(turma_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let turmas = sqlx::query("DELETE FROM turmas WHERE id = ?1")
        .bind(turma_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if turmas == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound("Turma não encontrada".into()));
    }

    tx.commit().await?;
    tracing::info!(
        "✅ Turma {} apagada ({} aula(s), {} aluno(s)).",
        turma_id,
        aulas,
        alunos
    );
    Ok(())
}

/// Alunos atualmente matriculados na turma.
pub async fn list_class_students(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Vec<Aluno>> {
    let alunos = sqlx::query_as::<_, Aluno>(
        r#"
        SELECT id, nome, data_nascimento, nome_responsavel, contato_responsavel, turma_id
        FROM alunos
        WHERE turma_id = ?1
        ORDER BY nome
        "#,
    )
    .bind(turma_id)
    .fetch_all(db_pool)
    .await?;
    Ok(alunos)
}
