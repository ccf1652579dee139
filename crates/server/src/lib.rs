//! Thin axum HTTP surface exposing `Router::route` and
//! `StyleRenderer::render` for local integration testing and demos
//! (SPEC_FULL §1, §3). Telephony transport, sessions, auth, and real
//! collaborator backends are Non-goals — see DESIGN.md.

pub mod collaborators;
pub mod error;
pub mod http;
pub mod state;

pub use error::{Result, ServerError};
pub use http::create_router;
pub use state::AppState;
