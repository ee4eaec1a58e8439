//! Data models shared across the application.
pub mod auth;
pub mod config;
