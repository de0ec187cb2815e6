// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{LoginPayload, SessaoUsuario, Usuario, UsuarioPublico},
    services::auth_service,
    state::AppState,
    templates::LoginPage,
    web::mw_auth::{session_user, SESSION_USER_KEY},
};
use askama::Template;
use axum::{
    extract::{Extension, Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tower_sessions::Session;

/// Gera novo ID de sessão e guarda a conta autenticada.
async fn open_session(session: &Session, usuario: &Usuario) -> AppResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    let sessao = SessaoUsuario {
        id: usuario.id,
        usuario: usuario.usuario.clone(),
        role: usuario.role,
    };
    session
        .insert(SESSION_USER_KEY, &sessao)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
    Ok(())
}

async fn close_session(session: &Session) -> AppResult<Option<SessaoUsuario>> {
    let sessao = session_user(session).await.ok().flatten();
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;
    Ok(sessao)
}

// POST /api/login
pub async fn api_login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Tentativa de login para: {}", payload.username);
    let usuario = auth_service::authenticate(&state.db_pool, &payload.username, &payload.password).await?;
    open_session(&session, &usuario).await?;

    tracing::info!("✅ Login bem-sucedido para: {} ({})", usuario.usuario, usuario.role);
    Ok(Json(json!({
        "message": "Login realizado com sucesso",
        "user": UsuarioPublico::from(&usuario),
    })))
}

// POST /api/logout
pub async fn api_logout(session: Session) -> AppResult<StatusCode> {
    if let Some(sessao) = close_session(&session).await? {
        tracing::info!("🚪 Conta {} desligada.", sessao.id);
    }
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/me
pub async fn api_me(Extension(sessao): Extension<SessaoUsuario>) -> Json<SessaoUsuario> {
    Json(sessao)
}

fn render_login(error: Option<String>, status: StatusCode) -> Response {
    match (LoginPage { error }).render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Falha ao renderizar template de login: {}", e);
            AppError::InternalServerError.into_response()
        }
    }
}

// GET /login
pub async fn show_login_form(session: Session) -> Response {
    if session_user(&session).await.ok().flatten().is_some() {
        return Redirect::to("/painel").into_response();
    }
    render_login(None, StatusCode::OK)
}

// POST /login (formulário da página)
pub async fn handle_login_form(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginPayload>,
) -> AppResult<Response> {
    match auth_service::authenticate(&state.db_pool, &form.username, &form.password).await {
        Ok(usuario) => {
            open_session(&session, &usuario).await?;
            tracing::info!("✅ Login (página) bem-sucedido para: {}", usuario.usuario);
            Ok(Redirect::to("/painel").into_response())
        }
        Err(AppError::InvalidCredentials) => Ok(render_login(
            Some(AppError::InvalidCredentials.to_string()),
            StatusCode::UNAUTHORIZED,
        )),
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    if let Some(sessao) = close_session(&session).await? {
        tracing::info!("🚪 Conta {} desligada.", sessao.id);
    }
    Ok(Redirect::to("/login"))
}
