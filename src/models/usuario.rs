// src/models/usuario.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Função de uma conta. Fixada na criação pelo endpoint usado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Ceo,
    Coordenador,
    Instrutor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ceo => "ceo",
            Role::Coordenador => "coordenador",
            Role::Instrutor => "instrutor",
        }
    }

    /// Tabela de vínculos conta/unidade desta função (None para funções globais).
    pub fn tabela_vinculos(&self) -> Option<&'static str> {
        match self {
            Role::Ceo => None,
            Role::Coordenador => Some("coordenadores_unidades"),
            Role::Instrutor => Some("instrutores_unidades"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conta da tabela 'usuarios' com o hash da senha
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub usuario: String,
    pub email: String,
    pub senha_hash: String,
    pub role: Role,
}

/// Conta guardada na sessão do servidor depois do login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessaoUsuario {
    pub id: i64,
    pub usuario: String,
    pub role: Role,
}

/// Forma pública da conta devolvida pelo login (`user` no JSON).
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioPublico {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Usuario> for UsuarioPublico {
    fn from(u: &Usuario) -> Self {
        Self {
            id: u.id,
            username: u.usuario.clone(),
            name: u.usuario.clone(),
            email: u.email.clone(),
            role: u.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Linha das listagens de coordenadores/instrutores.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContaResumo {
    pub id: i64,
    pub usuario: String,
    pub email: String,
    // Nomes das escolas vinculadas separados por vírgula
    pub unidades: Option<String>,
}

/// Detalhe de uma conta com os ids das unidades vinculadas.
#[derive(Debug, Clone, Serialize)]
pub struct ContaDetalhe {
    pub id: i64,
    pub usuario: String,
    pub email: String,
    pub role: Role,
    pub unidade_ids: Vec<i64>,
}

/// Corpo de criação/edição de coordenador ou instrutor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContaPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub unit_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializa_em_minusculas() {
        assert_eq!(serde_json::to_value(Role::Coordenador).unwrap(), "coordenador");
        assert_eq!(Role::Instrutor.to_string(), "instrutor");
        assert!(serde_json::from_str::<Role>(r#""admin""#).is_err());
    }

    #[test]
    fn apenas_funcoes_de_unidade_tem_tabela_de_vinculos() {
        assert_eq!(Role::Ceo.tabela_vinculos(), None);
        assert_eq!(Role::Coordenador.tabela_vinculos(), Some("coordenadores_unidades"));
        assert_eq!(Role::Instrutor.tabela_vinculos(), Some("instrutores_unidades"));
    }

    #[test]
    fn payload_de_conta_sem_unidades_usa_lista_vazia() {
        let p: ContaPayload =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@escola.br","password":"x"}"#).unwrap();
        assert!(p.unit_ids.is_empty());
        assert_eq!(p.password.as_deref(), Some("x"));
    }
}
