//! HTTP surface of the BFF.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout, metrics)
//!     → handler (one module per route)
//!         → query parser → upstream client(s) → transformer(s)
//!     → JSON response, or BffError → { error, code }
//! ```

pub mod autocomplete;
pub mod cache_control;
pub mod course_details;
pub mod courses;
pub mod health;
pub mod seo;
pub mod server;
pub mod units;

pub use server::{build_router, AppState, BffServer, X_REQUEST_ID};
