// src/politica.rs
//! Tabela única de capacidades por função, consultada uma vez por pedido.

use crate::models::usuario::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacidade {
    ConsultarUnidades,
    GerirUnidades,
    GerirCoordenadores,
    GerirInstrutores,
    ConsultarTurmas,
    GerirTurmas,
    GerirDiario,
    ConsultarEstatisticas,
}

const CAPACIDADES_CEO: &[Capacidade] = &[
    Capacidade::ConsultarUnidades,
    Capacidade::GerirUnidades,
    Capacidade::GerirCoordenadores,
    Capacidade::ConsultarTurmas,
    Capacidade::ConsultarEstatisticas,
];

const CAPACIDADES_COORDENADOR: &[Capacidade] = &[
    Capacidade::ConsultarUnidades,
    Capacidade::GerirInstrutores,
    Capacidade::ConsultarTurmas,
    Capacidade::GerirTurmas,
    Capacidade::GerirDiario,
    Capacidade::ConsultarEstatisticas,
];

const CAPACIDADES_INSTRUTOR: &[Capacidade] = &[
    Capacidade::ConsultarUnidades,
    Capacidade::ConsultarTurmas,
    Capacidade::GerirTurmas,
    Capacidade::GerirDiario,
    Capacidade::ConsultarEstatisticas,
];

pub fn capacidades(role: Role) -> &'static [Capacidade] {
    match role {
        Role::Ceo => CAPACIDADES_CEO,
        Role::Coordenador => CAPACIDADES_COORDENADOR,
        Role::Instrutor => CAPACIDADES_INSTRUTOR,
    }
}

pub fn pode(role: Role, capacidade: Capacidade) -> bool {
    capacidades(role).contains(&capacidade)
}

/// Funções cujo acesso a turmas é limitado às unidades vinculadas.
pub fn escopo_por_unidade(role: Role) -> bool {
    role.tabela_vinculos().is_some()
}

/// Item da navegação do painel. Cada item abre a página `/painel/{secao}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNavegacao {
    pub titulo: &'static str,
    pub secao: &'static str,
}

impl ItemNavegacao {
    pub fn href(&self) -> String {
        format!("/painel/{}", self.secao)
    }
}

// Cada item aparece quando a função tem a capacidade associada
const NAVEGACAO: &[(Capacidade, ItemNavegacao)] = &[
    (
        Capacidade::GerirUnidades,
        ItemNavegacao { titulo: "Gerenciar Escolas", secao: "escolas" },
    ),
    (
        Capacidade::GerirCoordenadores,
        ItemNavegacao { titulo: "Gerenciar Coordenadores", secao: "coordenadores" },
    ),
    (
        Capacidade::GerirInstrutores,
        ItemNavegacao { titulo: "Gerenciar Instrutores", secao: "instrutores" },
    ),
    (
        Capacidade::GerirTurmas,
        ItemNavegacao { titulo: "Gerenciar Turmas", secao: "turmas" },
    ),
    (
        Capacidade::GerirDiario,
        ItemNavegacao { titulo: "Diário de Aulas", secao: "diario" },
    ),
];

pub fn navegacao(role: Role) -> Vec<ItemNavegacao> {
    NAVEGACAO
        .iter()
        .filter(|(cap, _)| pode(role, *cap))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Item e capacidade exigida de uma secção do painel.
pub fn secao(nome: &str) -> Option<(Capacidade, &'static ItemNavegacao)> {
    NAVEGACAO
        .iter()
        .find(|(_, item)| item.secao == nome)
        .map(|(cap, item)| (*cap, item))
}
