//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → handlers.rs (route handlers)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::MakeRequestUuid;
pub use server::{AppState, HttpServer};
