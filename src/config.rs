// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

/// Conta CEO criada no arranque quando ainda não existe nenhuma.
#[derive(Debug, Clone)]
pub struct CeoBootstrap {
    pub usuario: String,
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
    pub session_inactivity_hours: i64,
    pub ceo_bootstrap: Option<CeoBootstrap>,
}

impl AppConfig {
    /// Lê a configuração das variáveis de ambiente (carregando `.env` se existir).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let session_secret = env::var("SESSION_SECRET")?;
        if session_secret.len() < 64 {
            return Err(AppError::ConfigError(
                "SESSION_SECRET precisa de pelo menos 64 bytes".into(),
            ));
        }

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("PORT").unwrap_or_else(|_| "5000".into());
        let bind_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| AppError::ConfigError(format!("HOST/PORT inválidos: {}", e)))?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => parse_bcrypt_cost(&raw)?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let session_inactivity_hours = match env::var("SESSION_INACTIVITY_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or_else(|| {
                    AppError::ConfigError(format!("SESSION_INACTIVITY_HOURS inválido: {}", raw))
                })?,
            Err(_) => 24,
        };

        let ceo_bootstrap = match (
            env::var("CEO_USUARIO"),
            env::var("CEO_EMAIL"),
            env::var("CEO_SENHA"),
        ) {
            (Ok(usuario), Ok(email), Ok(senha)) if !usuario.trim().is_empty() && !senha.is_empty() => {
                Some(CeoBootstrap { usuario, email, senha })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            bcrypt_cost,
            session_inactivity_hours,
            ceo_bootstrap,
        })
    }
}

fn parse_bcrypt_cost(raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|c| (4..=31).contains(c))
        .ok_or_else(|| AppError::ConfigError(format!("BCRYPT_COST inválido: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcrypt_cost_aceita_apenas_intervalo_do_bcrypt() {
        assert_eq!(parse_bcrypt_cost("4").unwrap(), 4);
        assert_eq!(parse_bcrypt_cost(" 12 ").unwrap(), 12);
        assert!(parse_bcrypt_cost("3").is_err());
        assert!(parse_bcrypt_cost("32").is_err());
        assert!(parse_bcrypt_cost("abc").is_err());
    }
}
