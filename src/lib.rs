// src/lib.rs
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod politica;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;
