// src/templates.rs
use crate::{models::aula::Estatisticas, models::unidade::Unidade, politica::ItemNavegacao};
use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "painel.html")]
pub struct PainelPage {
    pub primeiro_nome: String,
    pub inicial: String,
    pub role: String,
    pub navegacao: Vec<ItemNavegacao>,
    pub estatisticas: Estatisticas,
    // None para funções globais, que não têm escopo de unidades
    pub unidades: Option<Vec<Unidade>>,
}

/// Listagem de uma secção do painel em tabela.
#[derive(Template)]
#[template(path = "secao.html")]
pub struct SecaoPage {
    pub titulo: String,
    pub inicial: String,
    pub role: String,
    pub navegacao: Vec<ItemNavegacao>,
    pub colunas: &'static [&'static str],
    pub linhas: Vec<Vec<String>>,
}
