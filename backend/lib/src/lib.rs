//! Tron Wallet Backend Library

pub mod api;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod log;
pub mod models;
pub mod services;

pub use api::create_app;
pub use config::Config;
pub use error::{Error, Result};
