//! Shared vocabulary and configuration for devpulse.
//!
//! The post/result types here are the common shape every platform adapter
//! normalizes into, so the aggregator can treat adapters interchangeably.

pub mod app_config;
mod config;
mod posts;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{Engagement, Platform, PlatformResult, Post};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
