// src/state.rs
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Custo bcrypt usado ao gravar senhas novas
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { db_pool, bcrypt_cost }
    }
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
