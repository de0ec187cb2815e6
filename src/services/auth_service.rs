// src/services/auth_service.rs
use crate::{
    config::CeoBootstrap,
    error::{AppError, AppResult},
    models::usuario::{Role, Usuario},
    services::usuario_service,
};
use sqlx::SqlitePool;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Valida usuário e senha. Conta inexistente e senha errada dão o mesmo erro.
pub async fn authenticate(
    db_pool: &SqlitePool,
    username: &str,
    password: &str,
) -> AppResult<Usuario> {
    let Some(usuario) = usuario_service::find_by_username(db_pool, username).await? else {
        tracing::warn!("Login recusado: usuário '{}' não existe.", username);
        return Err(AppError::InvalidCredentials);
    };

    if verify_password(password, &usuario.senha_hash).await? {
        Ok(usuario)
    } else {
        tracing::warn!("Login recusado: senha incorreta para '{}'.", username);
        Err(AppError::InvalidCredentials)
    }
}

/// Cria a conta CEO configurada quando ainda não existe nenhuma conta CEO.
/// Devolve o id da conta criada, ou None se nada foi feito.
pub async fn ensure_ceo(
    db_pool: &SqlitePool,
    bcrypt_cost: u32,
    bootstrap: &CeoBootstrap,
) -> AppResult<Option<i64>> {
    let existentes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE role = 'ceo'")
        .fetch_one(db_pool)
        .await?;
    if existentes > 0 {
        tracing::debug!("Já existe conta CEO; bootstrap ignorado.");
        return Ok(None);
    }

    let id = usuario_service::create_account(
        db_pool,
        bcrypt_cost,
        Role::Ceo,
        &bootstrap.usuario,
        &bootstrap.email,
        &bootstrap.senha,
        &[],
    )
    .await?;
    tracing::info!("👤 Conta CEO '{}' criada no arranque.", bootstrap.usuario);
    Ok(Some(id))
}
