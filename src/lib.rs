// src/lib.rs

pub mod api;
pub mod auth;
pub mod chat;
pub mod companion;
pub mod config;
pub mod db;
pub mod fallback;
pub mod journal;
pub mod llm;
pub mod mood;
pub mod news;
pub mod persona;
pub mod prompt;
pub mod state;
pub mod wellness;
