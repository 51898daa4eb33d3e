//! Core Vitrola library (config, session, service clients, auth, purchases).

pub mod api;
pub mod auth;
pub mod config;
pub mod interrupt;
pub mod logging;
pub mod models;
pub mod purchase;
pub mod session;
