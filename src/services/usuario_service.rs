// src/services/usuario_service.rs
use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::usuario::{ContaDetalhe, ContaResumo, Role, Usuario},
    services::auth_service,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

const SELECT_USUARIO: &str = r#"
    SELECT id, usuario, email, senha_hash, role
    FROM usuarios
"#;

pub async fn find_by_id(db_pool: &SqlitePool, usuario_id: i64) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando conta por ID: {}", usuario_id);
    let usuario = sqlx::query_as::<_, Usuario>(&format!("{} WHERE id = ?1", SELECT_USUARIO))
        .bind(usuario_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(usuario)
}

pub async fn find_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<Usuario>> {
    tracing::debug!("Buscando conta por usuário: {}", username);
    let usuario = sqlx::query_as::<_, Usuario>(&format!("{} WHERE usuario = ?1", SELECT_USUARIO))
        .bind(username.trim())
        .fetch_optional(db_pool)
        .await?;
    Ok(usuario)
}

fn validate_account_fields(name: &str, email: &str) -> AppResult<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(AppError::ValidationError("Nome e email são obrigatórios.".into()));
    }
    Ok(())
}

/// Apaga os vínculos da conta na tabela da função e insere o novo conjunto.
async fn replace_unit_links(
    tx: &mut Transaction<'_, Sqlite>,
    tabela: &'static str,
    usuario_id: i64,
    unit_ids: &[i64],
) -> AppResult<()> {
    sqlx::query(&format!("DELETE FROM {} WHERE usuario_id = ?1", tabela))
        .bind(usuario_id)
        .execute(&mut **tx)
        .await?;

    for unidade_id in unit_ids {
        // IDs repetidos no pedido ficam com um único vínculo
        sqlx::query(&format!(
            "INSERT OR IGNORE INTO {} (usuario_id, unidade_id) VALUES (?1, ?2)",
            tabela
        ))
        .bind(usuario_id)
        .bind(unidade_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Cria a conta com a função indicada e vincula-a às unidades, tudo numa transação.
pub async fn create_account(
    db_pool: &SqlitePool,
    bcrypt_cost: u32,
    role: Role,
    name: &str,
    email: &str,
    raw_password: &str,
    unit_ids: &[i64],
) -> AppResult<i64> {
    validate_account_fields(name, email)?;
    if raw_password.is_empty() {
        return Err(AppError::ValidationError("A senha é obrigatória.".into()));
    }
    tracing::info!("Criando conta '{}' ({}) com {} unidade(s)", name, role, unit_ids.len());

    let senha_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;

    let mut tx = db_pool.begin().await?;
    let inserted = sqlx::query(
        r#"
        INSERT INTO usuarios (usuario, email, senha_hash, role)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(name.trim())
    .bind(email.trim())
    .bind(&senha_hash)
    .bind(role)
    .execute(&mut *tx)
    .await;

    let usuario_id = match inserted {
        Ok(result) => result.last_insert_rowid(),
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Conta '{}' já existe.", name);
            tx.rollback().await?;
            return Err(AppError::Conflict(format!("O usuário '{}' já existe.", name.trim())));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(tabela) = role.tabela_vinculos() {
        replace_unit_links(&mut tx, tabela, usuario_id, unit_ids).await?;
    }

    tx.commit().await?;
    tracing::info!("✅ Conta '{}' criada com id {}.", name, usuario_id);
    Ok(usuario_id)
}

/// Atualiza nome/email (e senha, se vier preenchida) e substitui os vínculos de unidade.
/// Só altera contas da função indicada.
pub async fn update_account(
    db_pool: &SqlitePool,
    bcrypt_cost: u32,
    role: Role,
    usuario_id: i64,
    name: &str,
    email: &str,
    raw_password: Option<&str>,
    unit_ids: &[i64],
) -> AppResult<()> {
    validate_account_fields(name, email)?;
    tracing::info!("Atualizando conta {} ({})", usuario_id, role);

    let nova_senha_hash = match raw_password.filter(|p| !p.is_empty()) {
        Some(p) => Some(auth_service::hash_password(p, bcrypt_cost).await?),
        None => None,
    };

    let mut tx = db_pool.begin().await?;
    let updated = sqlx::query(
        r#"
        UPDATE usuarios
        SET usuario = ?1,
            email = ?2,
            senha_hash = COALESCE(?3, senha_hash)
        WHERE id = ?4 AND role = ?5
        "#,
    )
    .bind(name.trim())
    .bind(email.trim())
    .bind(nova_senha_hash)
    .bind(usuario_id)
    .bind(role)
    .execute(&mut *tx)
    .await;

    let rows_affected = match updated {
        Ok(result) => result.rows_affected(),
        Err(e) if is_unique_violation(&e) => {
            tx.rollback().await?;
            return Err(AppError::Conflict(format!("O usuário '{}' já existe.", name.trim())));
        }
        Err(e) => return Err(e.into()),
    };
    if rows_affected == 0 {
        tracing::warn!("Conta {} ({}) não encontrada para atualização.", usuario_id, role);
        tx.rollback().await?;
        return Err(AppError::NotFound(format!("{} não encontrado", nome_funcao(role))));
    }

    if let Some(tabela) = role.tabela_vinculos() {
        replace_unit_links(&mut tx, tabela, usuario_id, unit_ids).await?;
    }

    tx.commit().await?;
    tracing::info!("✅ Conta {} atualizada.", usuario_id);
    Ok(())
}

/// Lista as contas de uma função com as escolas vinculadas.
/// Com `coordenador_id`, mantém só as contas vinculadas a unidades desse coordenador.
pub async fn list_accounts(
    db_pool: &SqlitePool,
    role: Role,
    coordenador_id: Option<i64>,
) -> AppResult<Vec<ContaResumo>> {
    let Some(tabela) = role.tabela_vinculos() else {
        return Ok(Vec::new());
    };
    tracing::debug!("Listando contas '{}' (filtro coordenador: {:?})", role, coordenador_id);

    let mut sql = format!(
        r#"
        SELECT u.id, u.usuario, u.email, GROUP_CONCAT(un.escola, ',') AS unidades
        FROM usuarios u
        LEFT JOIN {tabela} v ON u.id = v.usuario_id
        LEFT JOIN unidades un ON v.unidade_id = un.id
        WHERE u.role = ?1
        "#
    );
    if coordenador_id.is_some() {
        sql.push_str(
            " AND v.unidade_id IN (SELECT unidade_id FROM coordenadores_unidades WHERE usuario_id = ?2)",
        );
    }
    sql.push_str(" GROUP BY u.id ORDER BY u.usuario ASC");

    let mut query = sqlx::query_as::<_, ContaResumo>(&sql).bind(role);
    if let Some(id) = coordenador_id {
        query = query.bind(id);
    }
    let contas = query.fetch_all(db_pool).await?;
    tracing::debug!("Encontradas {} contas '{}'.", contas.len(), role);
    Ok(contas)
}

/// Conta de uma função com os ids das unidades vinculadas.
pub async fn find_account_detail(
    db_pool: &SqlitePool,
    role: Role,
    usuario_id: i64,
) -> AppResult<ContaDetalhe> {
    let usuario = find_by_id(db_pool, usuario_id)
        .await?
        .filter(|u| u.role == role)
        .ok_or_else(|| AppError::NotFound(format!("{} não encontrado", nome_funcao(role))))?;

    let unidade_ids = match role.tabela_vinculos() {
        Some(tabela) => {
            sqlx::query_scalar::<_, i64>(&format!(
                "SELECT unidade_id FROM {} WHERE usuario_id = ?1 ORDER BY unidade_id",
                tabela
            ))
            .bind(usuario_id)
            .fetch_all(db_pool)
            .await?
        }
        None => Vec::new(),
    };

    Ok(ContaDetalhe {
        id: usuario.id,
        usuario: usuario.usuario,
        email: usuario.email,
        role: usuario.role,
        unidade_ids,
    })
}

fn nome_funcao(role: Role) -> &'static str {
    match role {
        Role::Ceo => "CEO",
        Role::Coordenador => "Coordenador",
        Role::Instrutor => "Instrutor",
    }
}
