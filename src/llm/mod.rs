//! Chat-completions integration subsystem.
//!
//! # Data Flow
//! ```text
//! POST /ask handler
//!     → client.rs (build messages, send with retry)
//!     → types.rs (request/response wire shapes)
//!     → first choice content returned to the handler
//! ```

pub mod client;
pub mod types;

pub use client::{LlmClient, LlmError};
