//! Course catalog backend-for-frontend.
//!
//! Aggregates a headless CMS and a pricing/enrollment API behind a small set
//! of read-only JSON routes shaped for the front end.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod transform;
pub mod upstream;

pub use config::BffConfig;
pub use error::{BffError, BffResult, BffValidationError};
pub use http::{build_router, AppState, BffServer};
pub use lifecycle::Shutdown;
