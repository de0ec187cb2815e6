// src/web/painel_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        turma::Turma,
        usuario::{Role, SessaoUsuario},
    },
    politica::{self, Capacidade},
    services::{aula_service, escopo_service, turma_service, unidade_service, usuario_service},
    state::AppState,
    templates::{PainelPage, SecaoPage},
};
use askama::Template;
use axum::{
    extract::{Extension, Path, State},
    response::Html,
};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};

const COLUNAS_ESCOLAS: &[&str] = &["Escola", "Cidade", "Estado", "País", "Com coordenador"];
const COLUNAS_CONTAS: &[&str] = &["Usuário", "Email", "Unidades"];
const COLUNAS_TURMAS: &[&str] = &["Turma", "Série", "Escola"];
const COLUNAS_DIARIO: &[&str] = &["Data", "Turma", "Título", "Conteúdo"];

fn primeiro_nome(sessao: &SessaoUsuario) -> String {
    sessao
        .usuario
        .split_whitespace()
        .next()
        .unwrap_or(&sessao.usuario)
        .to_string()
}

fn inicial(nome: &str) -> String {
    nome.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
}

fn render<T: Template>(template: T, nome: &str) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template {}: {}", nome, e);
        AppError::InternalServerError
    })
}

// GET /painel
pub async fn painel_handler(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /painel: acesso de {} ({})", sessao.id, sessao.role);

    let estatisticas = aula_service::statistics(&state.db_pool).await?;
    let unidades = if politica::escopo_por_unidade(sessao.role) {
        Some(escopo_service::units_for_role(&state.db_pool, sessao.role, sessao.id).await?)
    } else {
        None
    };

    let primeiro_nome = primeiro_nome(&sessao);
    let template = PainelPage {
        inicial: inicial(&primeiro_nome),
        primeiro_nome,
        role: sessao.role.to_string(),
        navegacao: politica::navegacao(sessao.role),
        estatisticas,
        unidades,
    };
    render(template, "PainelPage")
}

/// Turmas visíveis para a conta: todas para funções globais, só as das unidades vinculadas nas outras.
async fn turmas_visiveis(db_pool: &SqlitePool, sessao: &SessaoUsuario) -> AppResult<Vec<Turma>> {
    let turmas = turma_service::list_classes(db_pool, None).await?;
    if !politica::escopo_por_unidade(sessao.role) {
        return Ok(turmas);
    }
    let unidades: HashSet<i64> = escopo_service::units_for_role(db_pool, sessao.role, sessao.id)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();
    Ok(turmas.into_iter().filter(|t| unidades.contains(&t.unidade_id)).collect())
}

async fn linhas_da_secao(
    db_pool: &SqlitePool,
    sessao: &SessaoUsuario,
    capacidade: Capacidade,
) -> AppResult<(&'static [&'static str], Vec<Vec<String>>)> {
    match capacidade {
        Capacidade::GerirUnidades => {
            let linhas = unidade_service::list_units(db_pool)
                .await?
                .into_iter()
                .map(|u| {
                    let ocupada = if u.esta_ocupada { "Sim" } else { "Não" };
                    vec![u.escola, u.cidade, u.estado, u.pais, ocupada.to_string()]
                })
                .collect();
            Ok((COLUNAS_ESCOLAS, linhas))
        }
        Capacidade::GerirCoordenadores | Capacidade::GerirInstrutores => {
            let (role, filtro) = if capacidade == Capacidade::GerirCoordenadores {
                (Role::Coordenador, None)
            } else if sessao.role == Role::Coordenador {
                (Role::Instrutor, Some(sessao.id))
            } else {
                (Role::Instrutor, None)
            };
            let linhas = usuario_service::list_accounts(db_pool, role, filtro)
                .await?
                .into_iter()
                .map(|c| vec![c.usuario, c.email, c.unidades.unwrap_or_else(|| "-".into())])
                .collect();
            Ok((COLUNAS_CONTAS, linhas))
        }
        Capacidade::GerirTurmas => {
            let escolas: HashMap<i64, String> = unidade_service::list_units(db_pool)
                .await?
                .into_iter()
                .map(|u| (u.id, u.escola))
                .collect();
            let linhas = turmas_visiveis(db_pool, sessao)
                .await?
                .into_iter()
                .map(|t| {
                    let escola = escolas.get(&t.unidade_id).cloned().unwrap_or_default();
                    vec![t.nome, t.serie, escola]
                })
                .collect();
            Ok((COLUNAS_TURMAS, linhas))
        }
        Capacidade::GerirDiario => {
            let visiveis: HashSet<i64> =
                turmas_visiveis(db_pool, sessao).await?.into_iter().map(|t| t.id).collect();
            let linhas = aula_service::list_lessons(db_pool, None)
                .await?
                .into_iter()
                .filter(|a| visiveis.contains(&a.turma_id))
                .map(|a| {
                    vec![
                        a.data.format("%d/%m/%Y %H:%M").to_string(),
                        a.turma_nome,
                        a.titulo.unwrap_or_default(),
                        a.conteudo,
                    ]
                })
                .collect();
            Ok((COLUNAS_DIARIO, linhas))
        }
        _ => Err(AppError::NotFound("Página não encontrada".into())),
    }
}

// GET /painel/{secao}
pub async fn secao_handler(
    State(state): State<AppState>,
    Extension(sessao): Extension<SessaoUsuario>,
    Path(nome): Path<String>,
) -> AppResult<Html<String>> {
    let (capacidade, item) =
        politica::secao(&nome).ok_or_else(|| AppError::NotFound("Página não encontrada".into()))?;
    if !politica::pode(sessao.role, capacidade) {
        tracing::warn!("Conta {} ({}) sem acesso à secção '{}'", sessao.id, sessao.role, nome);
        return Err(AppError::Forbidden);
    }

    let (colunas, linhas) = linhas_da_secao(&state.db_pool, &sessao, capacidade).await?;
    let template = SecaoPage {
        titulo: item.titulo.to_string(),
        inicial: inicial(&primeiro_nome(&sessao)),
        role: sessao.role.to_string(),
        navegacao: politica::navegacao(sessao.role),
        colunas,
        linhas,
    };
    render(template, "SecaoPage")
}
