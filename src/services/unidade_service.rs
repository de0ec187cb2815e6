// src/services/unidade_service.rs
use crate::{
    error::{AppError, AppResult},
    models::unidade::{Unidade, UnidadeListagem, UnidadePayload},
};
use sqlx::SqlitePool;

fn validate(payload: &UnidadePayload) -> AppResult<()> {
    let campos = [&payload.pais, &payload.estado, &payload.cidade, &payload.escola];
    if campos.iter().any(|c| c.trim().is_empty()) {
        return Err(AppError::ValidationError(
            "País, estado, cidade e escola são obrigatórios.".into(),
        ));
    }
    Ok(())
}

/// Todas as unidades, marcando as que já têm coordenador vinculado.
pub async fn list_units(db_pool: &SqlitePool) -> AppResult<Vec<UnidadeListagem>> {
    let unidades = sqlx::query_as::<_, UnidadeListagem>(
        r#"
        SELECT u.id, u.pais, u.estado, u.cidade, u.escola,
               EXISTS(SELECT 1 FROM coordenadores_unidades cu WHERE cu.unidade_id = u.id) AS esta_ocupada
        FROM unidades u
        ORDER BY u.id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontradas {} unidades.", unidades.len());
    Ok(unidades)
}

pub async fn find_unit(db_pool: &SqlitePool, unidade_id: i64) -> AppResult<Unidade> {
    sqlx::query_as::<_, Unidade>(
        "SELECT id, pais, estado, cidade, escola FROM unidades WHERE id = ?1",
    )
    .bind(unidade_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Unidade não encontrada".into()))
}

pub async fn create_unit(db_pool: &SqlitePool, payload: &UnidadePayload) -> AppResult<i64> {
    validate(payload)?;
    let id = sqlx::query(
        "INSERT INTO unidades (pais, estado, cidade, escola) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(payload.pais.trim())
    .bind(payload.estado.trim())
    .bind(payload.cidade.trim())
    .bind(payload.escola.trim())
    .execute(db_pool)
    .await?
    .last_insert_rowid();
    tracing::info!("✅ Unidade '{}' registada com id {}.", payload.escola, id);
    Ok(id)
}

pub async fn update_unit(
    db_pool: &SqlitePool,
    unidade_id: i64,
    payload: &UnidadePayload,
) -> AppResult<()> {
    validate(payload)?;
    let rows_affected = sqlx::query(
        "UPDATE unidades SET pais = ?1, estado = ?2, cidade = ?3, escola = ?4 WHERE id = ?5",
    )
    .bind(payload.pais.trim())
    .bind(payload.estado.trim())
    .bind(payload.cidade.trim())
    .bind(payload.escola.trim())
    .bind(unidade_id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(AppError::NotFound("Unidade não encontrada".into()));
    }
    tracing::info!("✅ Unidade {} atualizada.", unidade_id);
    Ok(())
}
