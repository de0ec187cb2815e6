// src/web/mw_politica.rs
use crate::{
    error::AppError,
    models::usuario::SessaoUsuario,
    politica::{self, Capacidade},
};
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};

/// Exige que a função da sessão tenha a capacidade do grupo de rotas.
/// Corre depois de `require_auth`.
pub async fn require_capability(
    State(capacidade): State<Capacidade>,
    Extension(sessao): Extension<SessaoUsuario>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if politica::pode(sessao.role, capacidade) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "Política MW: conta {} ({}) sem capacidade {:?} para {} {}",
            sessao.id,
            sessao.role,
            capacidade,
            request.method(),
            request.uri().path()
        );
        Err(AppError::Forbidden)
    }
}
