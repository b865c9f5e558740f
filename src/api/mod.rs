// src/api/mod.rs
// HTTP surface: routing, auth extraction, handlers, and error responses.

pub mod auth;
pub mod chat;
pub mod companion;
pub mod error;
pub mod journal;
pub mod mood;
pub mod news;
pub mod router;
pub mod wellness;
