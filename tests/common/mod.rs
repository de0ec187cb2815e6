#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use gestao_escolar::{
    db,
    models::usuario::Role,
    services::{aluno_service, turma_service, unidade_service, usuario_service},
    state::AppState,
    web::routes::create_router,
};
use gestao_escolar::models::{aluno::AlunoPayload, turma::TurmaPayload, unidade::UnidadePayload};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

// Custo mínimo do bcrypt para os testes não ficarem lentos
pub const CUSTO_TESTE: u32 = 4;

/// Base SQLite em memória com as migrações reais. Uma só conexão, mantida viva.
pub async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("URL inválida")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Falha ao criar base em memória");
    db::run_migrations(&pool).await.expect("Falha nas migrações");
    pool
}

pub async fn nova_unidade(pool: &SqlitePool, escola: &str) -> i64 {
    let payload = UnidadePayload {
        pais: "Brasil".into(),
        estado: "SP".into(),
        cidade: "Campinas".into(),
        escola: escola.into(),
    };
    unidade_service::create_unit(pool, &payload).await.expect("unidade")
}

pub async fn nova_conta(pool: &SqlitePool, role: Role, nome: &str, senha: &str, unidades: &[i64]) -> i64 {
    usuario_service::create_account(
        pool,
        CUSTO_TESTE,
        role,
        nome,
        &format!("{}@escola.br", nome.to_lowercase()),
        senha,
        unidades,
    )
    .await
    .expect("conta")
}

pub async fn nova_turma(pool: &SqlitePool, nome: &str, unidade_id: i64) -> i64 {
    let payload = TurmaPayload { nome: nome.into(), serie: "9".into(), unidade_id };
    turma_service::create_class(pool, &payload).await.expect("turma")
}

pub fn aluno_payload(nome: &str, turma_id: i64) -> AlunoPayload {
    AlunoPayload {
        nome: nome.into(),
        turma_id,
        data_nascimento: Some("2012-05-04".into()),
        nome_responsavel: Some("Responsável".into()),
        contato_responsavel: None,
    }
}

pub async fn novo_aluno(pool: &SqlitePool, nome: &str, turma_id: i64) -> i64 {
    aluno_service::create_student(pool, &aluno_payload(nome, turma_id))
        .await
        .expect("aluno")
}

pub async fn contar(pool: &SqlitePool, sql: &str, id: i64) -> i64 {
    sqlx::query_scalar(sql).bind(id).fetch_one(pool).await.expect("contagem")
}

/// Router completo com sessões em memória.
pub fn test_app(pool: SqlitePool) -> Router {
    create_router(AppState::new(pool, CUSTO_TESTE))
        .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
}

/// Envia um pedido e devolve o status e o corpo JSON (Null se vazio ou não JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("pedido"),
        None => builder.body(Body::empty()).expect("pedido"),
    };

    let response = app.clone().oneshot(request).await.expect("resposta");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("corpo");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json, set_cookie)
}

/// Faz login pela API e devolve o cookie de sessão.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, _, cookie) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login de {} falhou", username);
    cookie.expect("login sem cookie de sessão")
}

/// GET de uma página HTML: status e corpo como texto.
pub async fn get_page(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).expect("pedido"))
        .await
        .expect("resposta");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("corpo");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
