//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! GET /         → page.rs (static template)
//! GET /session  → SessionStore snapshot as JSON
//! GET /health   → "ok"
//! ```

pub mod page;
pub mod server;

pub use server::{AppState, HttpServer};
