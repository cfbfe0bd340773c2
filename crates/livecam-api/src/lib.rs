//! HTTP front end for the live camera clip service.
//!
//! Exposed as a library so integration tests can build the same router the
//! binary serves.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;
