//! MedFlow API service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod llm;
pub mod observability;
pub mod resilience;

pub use config::{Environment, Settings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
