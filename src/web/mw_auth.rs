// src/web/mw_auth.rs
use crate::{error::AppError, models::usuario::SessaoUsuario};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da conta autenticada na sessão.
pub const SESSION_USER_KEY: &str = "usuario";

/// Lê a conta autenticada da sessão do servidor.
pub async fn session_user(session: &Session) -> Result<Option<SessaoUsuario>, AppError> {
    session
        .get::<SessaoUsuario>(SESSION_USER_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao ler sessão: {}", e)))
}

/// Middleware das rotas /api: sem sessão responde 401 em JSON.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_user(&session).await? {
        Some(sessao) => {
            tracing::debug!("Autenticação MW: conta {} ({}) autenticada.", sessao.id, sessao.role);
            request.extensions_mut().insert(sessao);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Autenticação MW: pedido sem sessão para {}", request.uri().path());
            Err(AppError::Unauthorized)
        }
    }
}

/// Middleware das páginas: sem sessão redireciona para /login.
pub async fn require_auth_page(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_user(&session).await? {
        Some(sessao) => {
            request.extensions_mut().insert(sessao);
            Ok(next.run(request).await)
        }
        None => Ok(Redirect::to("/login").into_response()),
    }
}
