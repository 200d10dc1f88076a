//! # API Module
//!
//! HTTP endpoints of the short-lived local server started by `songlist auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server and completes the PKCE flow by exchanging it for
//!   an access token, which is stored in the shared state for the waiting
//!   auth command.
//! - [`health`] - Reports status, service name and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use songlist::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
