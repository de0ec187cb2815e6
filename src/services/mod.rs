// src/services/mod.rs
pub mod aluno_service;
pub mod auth_service;
pub mod aula_service;
pub mod escopo_service;
pub mod turma_service;
pub mod unidade_service;
pub mod usuario_service;
