// src/models/mod.rs
pub mod aluno;
pub mod aula;
pub mod turma;
pub mod unidade;
pub mod usuario;
