//! MindCompass Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod auth;
pub mod config;

pub use adapters::ReqwestTransport;
pub use auth::{FirebaseConfig, FirebaseSession};
pub use config::{Settings, SettingsError};
