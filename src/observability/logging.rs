//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Pretty format for development, compact format elsewhere
//! - Default filter follows the DEBUG flag; RUST_LOG always wins

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Initialize the global tracing subscriber.
pub fn init_tracing(debug: bool, environment: Environment) {
    let default_filter = if debug {
        "medflow_api=debug,tower_http=debug"
    } else {
        "medflow_api=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if environment == Environment::Development {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}
