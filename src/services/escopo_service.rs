// src/services/escopo_service.rs
//! Unidades sobre as quais uma conta pode atuar, conforme a sua função.

use crate::{
    error::{AppError, AppResult},
    models::{
        unidade::Unidade,
        usuario::{Role, SessaoUsuario},
    },
};
use sqlx::SqlitePool;

/// Unidades vinculadas à conta na tabela da função indicada.
pub async fn units_for_role(
    db_pool: &SqlitePool,
    role: Role,
    usuario_id: i64,
) -> AppResult<Vec<Unidade>> {
    let Some(tabela) = role.tabela_vinculos() else {
        return Ok(Vec::new());
    };
    let unidades = sqlx::query_as::<_, Unidade>(&format!(
        r#"
        SELECT u.id, u.pais, u.estado, u.cidade, u.escola
        FROM unidades u
        JOIN {} v ON u.id = v.unidade_id
        WHERE v.usuario_id = ?1
        ORDER BY u.id
        "#,
        tabela
    ))
    .bind(usuario_id)
    .fetch_all(db_pool)
    .await?;
    Ok(unidades)
}

/// Escopo de unidades de uma conta: coordenador e instrutor pelos seus vínculos,
/// CEO fica com escopo vazio (usa as listagens sem escopo).
pub async fn units_for_user(db_pool: &SqlitePool, usuario_id: i64) -> AppResult<Vec<Unidade>> {
    let role: Option<Role> = sqlx::query_scalar("SELECT role FROM usuarios WHERE id = ?1")
        .bind(usuario_id)
        .fetch_optional(db_pool)
        .await?;
    let role = role.ok_or_else(|| AppError::NotFound("Usuário não encontrado".into()))?;

    let unidades = units_for_role(db_pool, role, usuario_id).await?;
    tracing::debug!(
        "Escopo da conta {} ({}): {} unidade(s)",
        usuario_id,
        role,
        unidades.len()
    );
    Ok(unidades)
}

/// Falha com Forbidden quando uma conta de função com escopo atua fora das suas unidades.
pub async fn ensure_unit_in_scope(
    db_pool: &SqlitePool,
    sessao: &SessaoUsuario,
    unidade_id: i64,
) -> AppResult<()> {
    let Some(tabela) = sessao.role.tabela_vinculos() else {
        return Ok(());
    };

    let vinculada: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE usuario_id = ?1 AND unidade_id = ?2)",
        tabela
    ))
    .bind(sessao.id)
    .bind(unidade_id)
    .fetch_one(db_pool)
    .await?;

    if vinculada {
        Ok(())
    } else {
        tracing::warn!(
            "Conta {} ({}) tentou atuar na unidade {} fora do seu escopo.",
            sessao.id,
            sessao.role,
            unidade_id
        );
        Err(AppError::Forbidden)
    }
}

/// Igual a `ensure_unit_in_scope`, a partir da turma. Turma inexistente dá NotFound.
pub async fn ensure_class_in_scope(
    db_pool: &SqlitePool,
    sessao: &SessaoUsuario,
    turma_id: i64,
) -> AppResult<()> {
    if sessao.role.tabela_vinculos().is_none() {
        return Ok(());
    }
    let unidade_id: Option<i64> = sqlx::query_scalar("SELECT unidade_id FROM turmas WHERE id = ?1")
        .bind(turma_id)
        .fetch_optional(db_pool)
        .await?;
    let unidade_id = unidade_id.ok_or_else(|| AppError::NotFound("Turma não encontrada".into()))?;
    ensure_unit_in_scope(db_pool, sessao, unidade_id).await
}
